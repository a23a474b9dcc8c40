//! Method domain logic - binds a handler to its declared calling convention

use super::handler::{Completion, Handler};
use super::params::{Params, ParamsShape};
use crate::shared::{
    error::{AppError, AppResult},
    logging::LoggingUtils,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Calling convention declared for a method
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MethodOptions {
    /// Shape the handler expects its arguments in
    #[serde(default)]
    pub params: ParamsShape,

    /// Whether the handler receives the request context
    #[serde(default, alias = "useContext")]
    pub use_context: bool,

    /// Keys this layer does not interpret, kept as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MethodOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: ParamsShape) -> Self {
        self.params = params;
        self
    }

    pub fn with_context(mut self, use_context: bool) -> Self {
        self.use_context = use_context;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// A handler together with the options that shape how it is called.
///
/// Immutable once built, apart from [`Method::set_handler`].
pub struct Method<C = ()> {
    handler: Handler<C>,
    options: MethodOptions,
}

impl<C> Clone for Method<C> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            options: self.options.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Method<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("handler", &self.handler)
            .field("options", &self.options)
            .finish()
    }
}

impl<C> Method<C> {
    /// Create a method with default options
    pub fn new(handler: Handler<C>) -> AppResult<Self> {
        Self::with_options(handler, MethodOptions::default())
    }

    /// Create a method with explicit options
    pub fn with_options(handler: Handler<C>, options: MethodOptions) -> AppResult<Self> {
        options.params.validate()?;
        check_handler(&handler, &options)?;
        Ok(Self { handler, options })
    }

    /// Start building a method whose handler is supplied as an option
    pub fn builder() -> MethodBuilder<C> {
        MethodBuilder::new()
    }

    pub fn handler(&self) -> &Handler<C> {
        &self.handler
    }

    /// Replace the handler
    pub fn set_handler(&mut self, handler: Handler<C>) -> AppResult<()> {
        check_handler(&handler, &self.options)?;
        self.handler = handler;
        Ok(())
    }

    pub fn options(&self) -> &MethodOptions {
        &self.options
    }

    /// Bind raw arguments to the declared shape
    pub fn normalize(&self, params: Params) -> Params {
        self.options.params.normalize(params)
    }

    /// Invoke the handler without a caller-supplied context.
    ///
    /// Context-aware handlers receive an empty object. The outcome is
    /// reported through `completion` only.
    pub fn execute(&self, caller: &C, params: Params, completion: Completion) {
        self.dispatch(caller, params, None, completion);
    }

    /// Invoke the handler with a request context.
    ///
    /// The context is dropped when the method does not use one.
    pub fn execute_with_context(&self, caller: &C, params: Params, context: Value, completion: Completion) {
        self.dispatch(caller, params, Some(context), completion);
    }

    fn dispatch(&self, caller: &C, params: Params, context: Option<Value>, completion: Completion) {
        let input = params.kind();
        let args = self.normalize(params);
        LoggingUtils::log_normalized(
            self.options.params.kind(),
            input,
            args.kind(),
            self.options.use_context,
        );

        match &self.handler {
            Handler::Plain(handler) => handler(caller, args, completion),
            Handler::Contextual(handler) => {
                let context = context.unwrap_or_else(|| Value::Object(Map::new()));
                handler(caller, args, context, completion)
            }
        }
    }
}

impl<C> TryFrom<Handler<C>> for Method<C> {
    type Error = AppError;

    fn try_from(handler: Handler<C>) -> AppResult<Self> {
        Method::new(handler)
    }
}

/// Options record carrying the handler as one of its fields
pub struct MethodBuilder<C = ()> {
    handler: Option<Handler<C>>,
    options: MethodOptions,
}

impl<C> MethodBuilder<C> {
    pub fn new() -> Self {
        Self {
            handler: None,
            options: MethodOptions::default(),
        }
    }

    pub fn with_handler(mut self, handler: Handler<C>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Replace all options at once, keeping the handler
    pub fn with_options(mut self, options: MethodOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_params(mut self, params: ParamsShape) -> Self {
        self.options.params = params;
        self
    }

    pub fn with_context(mut self, use_context: bool) -> Self {
        self.options.use_context = use_context;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> AppResult<Method<C>> {
        let handler = self
            .handler
            .ok_or_else(|| AppError::InvalidHandler("no handler supplied".to_string()))?;
        Method::with_options(handler, self.options)
    }
}

impl<C> Default for MethodBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_handler<C>(handler: &Handler<C>, options: &MethodOptions) -> AppResult<()> {
    match (handler.expects_context(), options.use_context) {
        (true, false) => Err(AppError::InvalidHandler(
            "handler expects a context but use_context is disabled".to_string(),
        )),
        (false, true) => Err(AppError::InvalidHandler(
            "use_context is enabled but the handler takes no context".to_string(),
        )),
        _ => Ok(()),
    }
}
