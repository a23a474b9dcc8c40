//! Test fixtures for the method binding tests
//!
//! This module provides a stand-in dispatch layer to act as caller,
//! handlers that report what they were given, and a synchronous way to
//! capture a completion.

use crate::domain::{Completion, Handler, HandlerOutcome, Method, Params};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

/// Stand-in for the server object that dispatches requests
#[derive(Debug, Default)]
pub struct TestServer {
    pub calls: AtomicUsize,
}

impl TestServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// A completion paired with the receiving end of its outcome
pub fn capture() -> (Completion, mpsc::Receiver<HandlerOutcome>) {
    let (tx, rx) = mpsc::channel();
    let completion = Completion::new(move |outcome| {
        let _ = tx.send(outcome);
    });
    (completion, rx)
}

/// Execute `method` and return the outcome its handler reported inline
pub fn execute_sync(method: &Method<TestServer>, server: &TestServer, params: Params) -> HandlerOutcome {
    let (completion, rx) = capture();
    method.execute(server, params, completion);
    rx.try_recv().expect("handler completed inline")
}

/// Like [`execute_sync`] with an explicit context
pub fn execute_sync_with_context(
    method: &Method<TestServer>,
    server: &TestServer,
    params: Params,
    context: Value,
) -> HandlerOutcome {
    let (completion, rx) = capture();
    method.execute_with_context(server, params, context, completion);
    rx.try_recv().expect("handler completed inline")
}

/// Sum of the numeric argument values; absent (null) values count as zero
pub fn sum_values(args: &Params) -> i64 {
    args.values().filter_map(Value::as_i64).sum()
}

/// Handler reporting the shape it received, its keys and the sum of its values
pub fn describing_adder() -> Handler<TestServer> {
    Handler::plain(|server: &TestServer, args: Params, done: Completion| {
        server.record_call();
        let keys: Vec<String> = args
            .as_named()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        done.ok(json!({
            "kind": args.kind(),
            "keys": keys,
            "sum": sum_values(&args),
            "args": args.into_value(),
        }))
    })
}

/// Handler that reports the context it was given
pub fn context_echo() -> Handler<TestServer> {
    Handler::contextual(|_: &TestServer, _: Params, context: Value, done: Completion| done.ok(context))
}

/// Handler that reports an empty object whatever it is given
pub fn empty_reply() -> Handler<TestServer> {
    Handler::plain(|_: &TestServer, _: Params, done: Completion| done.ok(json!({})))
}

/// Parse JSON into params, panicking on scalars
pub fn params(value: Value) -> Params {
    Params::try_from(value).expect("array or object params")
}
