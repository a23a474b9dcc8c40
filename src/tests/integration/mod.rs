//! Integration tests for the method binding layer
//!
//! These tests drive methods the way a dispatch layer would: declarations
//! come from configuration, params come out of a request envelope, and the
//! outcome is awaited through the invocation service.

use crate::{
    application::InvocationService,
    domain::{Completion, Handler, Params},
    shared::error::AppError,
    tests::{
        config,
        fixtures::{context_echo, describing_adder, TestServer},
        TestResult,
    },
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Pull the params member out of a request envelope
fn params_of(request: &Value) -> Result<Params, AppError> {
    Params::from_value(request.get("params").cloned())
}

#[tokio::test]
async fn test_configured_shapes_bind_envelope_params() -> TestResult<()> {
    config::init();
    let app_config = config::test_config();
    let server = TestServer::new();

    let cases = [
        ("add_positional", json!({"a": 1, "b": 2, "c": 3}), json!(6), "array"),
        ("add_named", json!([1, 2, 3, 4]), json!(10), "object"),
        ("add_abc", json!({"a": 1}), json!(1), "object"),
        ("add_abc", json!([1, 2, 3]), json!(0), "object"),
        ("add_defaults", json!({"a": 5}), json!(5), "object"),
        ("add_defaults", json!([1, 2, 3]), json!(0), "object"),
    ];

    for (name, raw, expected_sum, expected_kind) in cases {
        let service = InvocationService::from_config(name, &app_config, describing_adder())?;
        let request = json!({"jsonrpc": "2.0", "method": name, "params": raw, "id": 1});

        let reply = service
            .invoke(&server, params_of(&request)?, None)
            .await?
            .map_err(|e| format!("handler error: {}", e))?;

        assert_eq!(reply["sum"], expected_sum, "sum for {}", name);
        assert_eq!(reply["kind"], expected_kind, "kind for {}", name);
    }

    assert_eq!(server.call_count(), 6);
    Ok(())
}

#[tokio::test]
async fn test_context_flows_through_configured_method() -> TestResult<()> {
    let app_config = config::test_config();
    let service = InvocationService::from_config("whoami", &app_config, context_echo())?;
    let server = TestServer::new();

    let with_context = service
        .invoke(&server, Params::Positional(vec![]), Some(json!({"hello": true})))
        .await?;
    assert_eq!(with_context, Ok(json!({"hello": true})));

    let without_context = service.invoke(&server, Params::Positional(vec![]), None).await?;
    assert_eq!(without_context, Ok(json!({})));

    assert_eq!(
        service.method().options().extra.get("description"),
        Some(&json!("returns the session context"))
    );
    Ok(())
}

#[tokio::test]
async fn test_plain_handler_cannot_bind_to_context_method() {
    let app_config = config::test_config();
    let result = InvocationService::from_config("whoami", &app_config, describing_adder());
    assert!(matches!(result, Err(AppError::InvalidHandler(_))));
}

#[tokio::test]
async fn test_scalar_params_are_rejected_before_invocation() {
    let request = json!({"jsonrpc": "2.0", "method": "add_positional", "params": 42, "id": 7});
    let err = params_of(&request).unwrap_err();
    assert_eq!(err.to_jsonrpc_error()["error"]["code"], -32602);
}

#[tokio::test]
async fn test_concurrent_invocations_share_one_method() -> TestResult<()> {
    // Caller state the handler hands to a background task
    struct Ledger {
        entries: Arc<tokio::sync::Mutex<Vec<i64>>>,
    }

    let handler = Handler::plain(|ledger: &Ledger, args: Params, done: Completion| {
        let entries = Arc::clone(&ledger.entries);
        let amount = args.get("amount").and_then(Value::as_i64).unwrap_or_default();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2)).await;
            let mut entries = entries.lock().await;
            entries.push(amount);
            done.ok(json!(entries.len()));
        });
    });

    let app_config = crate::config::AppConfig::from_toml_str(
        r#"
        [methods.credit.params]
        amount = 1
        "#,
    )?;
    let service = InvocationService::from_config("credit", &app_config, handler)?;
    let ledger = Ledger {
        entries: Arc::new(tokio::sync::Mutex::new(Vec::new())),
    };

    let pending: Vec<_> = (1..=5)
        .map(|amount| service.invoke(&ledger, Params::try_from(json!({"amount": amount})).expect("params"), None))
        .chain(std::iter::once(service.invoke(&ledger, Params::Positional(vec![]), None)))
        .collect();

    for future in pending {
        assert!(future.await?.is_ok());
    }

    let mut entries = ledger.entries.lock().await.clone();
    entries.sort_unstable();
    assert_eq!(entries, vec![1, 1, 2, 3, 4, 5]);
    Ok(())
}
