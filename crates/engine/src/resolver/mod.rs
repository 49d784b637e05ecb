//! Resolver bindings invoked by the engine for every field.

mod context;

use std::{future::Future, sync::Arc};

use error::{ErrorCode, GraphqlError};
use serde_json::Value;

pub use context::{ResolverContext, ScopedData};

use crate::schema::Schema;

pub type ResolverResult = Result<FieldOutput, FieldError>;

/// Asynchronous field resolver.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, ctx: ResolverContext) -> ResolverResult;
}

pub type SyncResolverFn = dyn Fn(&ResolverContext) -> ResolverResult + Send + Sync;

#[derive(Clone)]
pub enum FieldResolver {
    Sync(Arc<SyncResolverFn>),
    Async(Arc<dyn Resolver>),
}

impl FieldResolver {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&ResolverContext) -> ResolverResult + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(ResolverContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResolverResult> + Send + 'static,
    {
        Self::Async(Arc::new(AsyncFnResolver(f)))
    }

    pub fn from_resolver(resolver: impl Resolver + 'static) -> Self {
        Self::Async(Arc::new(resolver))
    }

    /// Always returns the same value.
    pub fn value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::from_fn(move |_| Ok(FieldOutput::new(value.clone())))
    }

    /// Reads a property of the parent value, null if absent.
    pub fn parent_field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::from_fn(move |ctx| Ok(ctx.parent().get(&name).cloned().unwrap_or_default().into()))
    }

    pub fn typename() -> Self {
        Self::from_fn(|ctx| Ok(Value::String(ctx.object_type_name().to_string()).into()))
    }

    pub fn is_sync(&self) -> bool {
        matches!(self, Self::Sync(_))
    }
}

impl std::fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("FieldResolver::Sync"),
            Self::Async(_) => f.write_str("FieldResolver::Async"),
        }
    }
}

struct AsyncFnResolver<F>(F);

#[async_trait::async_trait]
impl<F, Fut> Resolver for AsyncFnResolver<F>
where
    F: Fn(ResolverContext) -> Fut + Send + Sync,
    Fut: Future<Output = ResolverResult> + Send + 'static,
{
    async fn resolve(&self, ctx: ResolverContext) -> ResolverResult {
        (self.0)(ctx).await
    }
}

/// Raw value produced by a resolver, with context data made visible to the field's subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOutput {
    pub value: Value,
    pub scoped_data: Vec<(Arc<str>, Value)>,
}

impl FieldOutput {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            scoped_data: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scoped_data(mut self, key: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.scoped_data.push((key.into(), value.into()));
        self
    }
}

impl From<Value> for FieldOutput {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("{message}")]
    Message {
        message: String,
        extensions: Vec<(String, Value)>,
    },
    #[error("Operation was cancelled")]
    Cancelled,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
            extensions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Self::Message { extensions, .. } = &mut self {
            extensions.push((key.into(), value.into()));
        }
        self
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Runs the schema's error handlers, falling back to the default conversion.
    pub(crate) fn to_graphql_error(&self, schema: &Schema, include_error_details: bool) -> GraphqlError {
        if let Some(error) = schema.error_handlers().iter().find_map(|handler| handler(self)) {
            return error;
        }
        match self {
            FieldError::Message { message, extensions } => GraphqlError::new(message.clone(), ErrorCode::ResolverError)
                .with_extensions(extensions.iter().map(|(key, value)| (key.clone(), value.clone()))),
            FieldError::Internal(err) if include_error_details => {
                GraphqlError::new(err.to_string(), ErrorCode::InternalServerError)
            }
            FieldError::Internal(_) | FieldError::Cancelled => GraphqlError::unexpected_execution_error(),
        }
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
