//! Handler domain logic - the business-logic callable behind a method and its completion sink

use super::params::Params;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What a handler reports: `Ok(result)` or `Err(error)`, relayed uninterpreted
pub type HandlerOutcome = Result<Value, Value>;

type PlainFn<C> = dyn Fn(&C, Params, Completion) + Send + Sync;
type ContextualFn<C> = dyn Fn(&C, Params, Value, Completion) + Send + Sync;

/// Single-use sink through which a handler reports its outcome.
///
/// Consumed on use, so a handler can report at most once. Dropping it
/// without reporting leaves the invocation without an outcome.
pub struct Completion {
    sink: Box<dyn FnOnce(HandlerOutcome) + Send + 'static>,
}

impl Completion {
    /// Wrap a callback receiving the handler outcome
    pub fn new<F>(sink: F) -> Self
    where
        F: FnOnce(HandlerOutcome) + Send + 'static,
    {
        Self { sink: Box::new(sink) }
    }

    /// Report the outcome
    pub fn complete(self, outcome: HandlerOutcome) {
        (self.sink)(outcome)
    }

    /// Report a successful result
    pub fn ok(self, result: Value) {
        self.complete(Ok(result))
    }

    /// Report a handler error
    pub fn err(self, error: Value) {
        self.complete(Err(error))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

/// Handler of a method, invoked with the caller and the normalized arguments
pub enum Handler<C = ()> {
    /// `(caller, args, completion)`
    Plain(Arc<PlainFn<C>>),

    /// `(caller, args, context, completion)`
    Contextual(Arc<ContextualFn<C>>),
}

impl<C> Handler<C> {
    /// Create a handler that does not receive a context
    pub fn plain<F>(handler: F) -> Self
    where
        F: Fn(&C, Params, Completion) + Send + Sync + 'static,
    {
        Handler::Plain(Arc::new(handler))
    }

    /// Create a handler that receives the request context
    pub fn contextual<F>(handler: F) -> Self
    where
        F: Fn(&C, Params, Value, Completion) + Send + Sync + 'static,
    {
        Handler::Contextual(Arc::new(handler))
    }

    pub fn expects_context(&self) -> bool {
        matches!(self, Handler::Contextual(_))
    }

    /// Whether both references point at the same handler function
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Handler::Plain(a), Handler::Plain(b)) => Arc::ptr_eq(a, b),
            (Handler::Contextual(a), Handler::Contextual(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        match self {
            Handler::Plain(handler) => Handler::Plain(Arc::clone(handler)),
            Handler::Contextual(handler) => Handler::Contextual(Arc::clone(handler)),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Plain(_) => f.write_str("Handler::Plain"),
            Handler::Contextual(_) => f.write_str("Handler::Contextual"),
        }
    }
}
