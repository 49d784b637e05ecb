use std::sync::Arc;

use error::GraphqlError;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::{ExecutionHooks, ExecutionStats, ResolverInfo, TaskPool};
use crate::{
    operation::{FieldId, PreparedOperation, Variables},
    resolver::{ResolverContext, ScopedData},
    response::{ResponseBuilder, ResponsePath},
    schema::{ObjectDefinitionId, Schema},
};

/// Mutable state of one in-flight request, owned by its execution loop.
pub(crate) struct OperationContext {
    pub schema: Arc<Schema>,
    pub operation: Arc<PreparedOperation>,
    pub variables: Arc<Variables>,
    pub cancellation_token: CancellationToken,
    pub response: ResponseBuilder,
    pub stats: ExecutionStats,
    pub hooks: Arc<dyn ExecutionHooks>,
    pub task_pool: Arc<TaskPool>,
    pub include_error_details: bool,
}

pub(crate) struct ResolverInput {
    pub field_id: FieldId,
    pub object_definition_id: ObjectDefinitionId,
    pub parent: Arc<Value>,
    pub arguments: Arc<Map<String, Value>>,
    pub path: ResponsePath,
    pub scoped_data: ScopedData,
}

impl OperationContext {
    pub fn resolver_context(&self, input: ResolverInput) -> ResolverContext {
        ResolverContext {
            schema: self.schema.clone(),
            operation: self.operation.clone(),
            variables: self.variables.clone(),
            field_id: input.field_id,
            object_id: input.object_definition_id,
            parent: input.parent,
            arguments: input.arguments,
            path: input.path,
            scoped_data: input.scoped_data,
            cancellation_token: self.cancellation_token.clone(),
        }
    }

    pub fn resolver_info<'a>(&'a self, field_id: FieldId, path: &'a ResponsePath, inline: bool) -> ResolverInfo<'a> {
        ResolverInfo {
            operation: &self.operation,
            field_id,
            path,
            inline,
        }
    }

    /// Adds an error located at the field the path points to.
    pub fn push_field_error(&mut self, error: GraphqlError, field_id: FieldId, path: &ResponsePath) {
        let mut error = error.with_path(path.to_error_path(&self.operation.response_keys));
        if let Some(location) = self.operation[field_id].location {
            error = error.with_location(location);
        }
        self.hooks.on_field_error(&error);
        self.response.push_error(error);
    }
}
