use error::{ErrorPath, GraphqlError};

use super::ExecutionStats;
use crate::{
    operation::{Field, FieldId, PreparedOperation},
    response::ResponsePath,
};

/// Diagnostic callbacks. Every method defaults to doing nothing.
pub trait ExecutionHooks: Send + Sync {
    fn on_execution_start(&self, _operation: &PreparedOperation) {}

    fn on_resolver_start(&self, _info: ResolverInfo<'_>) {}

    fn on_resolver_end(&self, _info: ResolverInfo<'_>, _outcome: ResolverOutcome) {}

    /// Called for every error added to the response, non-null violations included.
    fn on_field_error(&self, _error: &GraphqlError) {}

    fn on_execution_end(&self, _stats: &ExecutionStats) {}
}

pub struct NoopHooks;

impl ExecutionHooks for NoopHooks {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverOutcome {
    Success,
    Error,
    Cancelled,
}

#[derive(Clone, Copy)]
pub struct ResolverInfo<'a> {
    pub(crate) operation: &'a PreparedOperation,
    pub(crate) field_id: FieldId,
    pub(crate) path: &'a ResponsePath,
    pub(crate) inline: bool,
}

impl<'a> ResolverInfo<'a> {
    pub fn field(&self) -> &'a Field {
        &self.operation[self.field_id]
    }

    pub fn field_name(&self) -> &'a str {
        self.field().name()
    }

    pub fn path(&self) -> ErrorPath {
        self.path.to_error_path(&self.operation.response_keys)
    }

    /// Whether the resolver ran inline rather than in a task.
    pub fn is_inline(&self) -> bool {
        self.inline
    }
}
