//! Invocation service that turns a method's completion callback into a future

use crate::{
    config::AppConfig,
    domain::{Completion, Handler, HandlerOutcome, Method, Params},
    shared::{
        error::{AppError, AppResult},
        logging::LoggingUtils,
    },
};
use serde_json::Value;
use std::{future::Future, sync::Arc, time::Instant};
use tokio::sync::oneshot;
use tracing::{info_span, Instrument};

/// A named method that can be awaited by a dispatch layer
pub struct InvocationService<C = ()> {
    name: String,
    method: Arc<Method<C>>,
}

impl<C> InvocationService<C> {
    /// Create a new invocation service
    pub fn new(name: impl Into<String>, method: Method<C>) -> Self {
        Self {
            name: name.into(),
            method: Arc::new(method),
        }
    }

    /// Create a service whose options come from the method declarations in `config`
    pub fn from_config(name: impl Into<String>, config: &AppConfig, handler: Handler<C>) -> AppResult<Self> {
        let name = name.into();
        let method = Method::with_options(handler, config.method_options(&name))?;
        Ok(Self::new(name, method))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> &Method<C> {
        &self.method
    }

    /// Execute the method and wait for its completion.
    ///
    /// The handler runs before this returns. The returned future resolves
    /// once the handler reports, or with [`AppError::CompletionDropped`] if
    /// it drops its completion without reporting.
    pub fn invoke(
        &self,
        caller: &C,
        params: Params,
        context: Option<Value>,
    ) -> impl Future<Output = AppResult<HandlerOutcome>> + Send + 'static
    where
        C: 'static,
    {
        let invocation_id = LoggingUtils::generate_invocation_id();
        let span = info_span!("invoke", method = %self.name, invocation_id = %invocation_id);
        let started = Instant::now();

        let (tx, rx) = oneshot::channel();
        let completion = Completion::new(move |outcome| {
            // Receiver is gone when the caller stopped waiting
            let _ = tx.send(outcome);
        });

        span.in_scope(|| match context {
            Some(context) => self.method.execute_with_context(caller, params, context, completion),
            None => self.method.execute(caller, params, completion),
        });

        async move {
            let outcome = rx.await;
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match outcome {
                Ok(outcome) => {
                    LoggingUtils::log_completed(&invocation_id, outcome.is_err(), elapsed_ms);
                    Ok(outcome)
                }
                Err(_) => {
                    LoggingUtils::log_dropped_completion(&invocation_id, elapsed_ms);
                    Err(AppError::CompletionDropped)
                }
            }
        }
        .instrument(span)
    }
}

impl<C> Clone for InvocationService<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            method: Arc::clone(&self.method),
        }
    }
}
