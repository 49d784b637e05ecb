use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use super::{
    completion::{self, CompletionStatus, FieldCompletion},
    context::ResolverInput,
    OperationContext, TaskBatch,
};
use crate::{
    operation::FieldId,
    resolver::{FieldResolver, ResolverContext, ResolverResult, ScopedData},
    response::ResponsePath,
    schema::ObjectDefinitionId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum TaskStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Faulted,
}

pub(crate) struct TaskInit {
    pub field_id: FieldId,
    pub object_definition_id: ObjectDefinitionId,
    pub parent: Arc<Value>,
    pub path: ResponsePath,
    pub scoped_data: ScopedData,
    pub arguments: Arc<Map<String, Value>>,
    pub serial: bool,
    pub in_serial_scope: bool,
}

/// Resolves one field and completes its value. Rented from the [`TaskPool`](super::TaskPool),
/// bound to a field with `initialize` and fully reset before going back.
#[derive(Default)]
pub(crate) struct ResolverTask {
    status: TaskStatus,
    // None for no-op tasks.
    field_id: Option<FieldId>,
    object_definition_id: Option<ObjectDefinitionId>,
    parent: Option<Arc<Value>>,
    // Target slot is the last element.
    path: ResponsePath,
    scoped_data: ScopedData,
    arguments: Option<Arc<Map<String, Value>>>,
    serial: bool,
    in_serial_scope: bool,
}

pub(crate) enum TaskOutcome {
    Noop,
    Cancelled,
    Resolved(ResolverResult),
}

pub(crate) struct TaskRun {
    pub task: Box<ResolverTask>,
    pub outcome: TaskOutcome,
}

impl ResolverTask {
    pub fn initialize(&mut self, init: TaskInit) {
        debug_assert!(self.is_reset(), "task initialized twice");
        let TaskInit {
            field_id,
            object_definition_id,
            parent,
            path,
            scoped_data,
            arguments,
            serial,
            in_serial_scope,
        } = init;
        self.field_id = Some(field_id);
        self.object_definition_id = Some(object_definition_id);
        self.parent = Some(parent);
        self.path = path;
        self.scoped_data = scoped_data;
        self.arguments = Some(arguments);
        self.serial = serial;
        self.in_serial_scope = in_serial_scope;
    }

    /// Binds the task to nothing: it only keeps the bookkeeping of an empty selection set going.
    pub fn initialize_noop(&mut self, path: ResponsePath, in_serial_scope: bool) {
        debug_assert!(self.is_reset(), "task initialized twice");
        self.path = path;
        self.in_serial_scope = in_serial_scope;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_reset(&self) -> bool {
        self.status == TaskStatus::Pending
            && self.field_id.is_none()
            && self.object_definition_id.is_none()
            && self.parent.is_none()
            && self.path.is_empty()
            && self.scoped_data.is_empty()
            && self.arguments.is_none()
            && !self.serial
            && !self.in_serial_scope
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn field_id(&self) -> Option<FieldId> {
        self.field_id
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    #[cfg(test)]
    pub fn parent(&self) -> Option<&Arc<Value>> {
        self.parent.as_ref()
    }

    #[cfg(test)]
    pub fn scoped_data(&self) -> &ScopedData {
        &self.scoped_data
    }

    /// Queued in the serial queue rather than the parallel one.
    pub fn is_serial(&self) -> bool {
        self.serial
    }

    /// Registered while a serial task's subtree was being built.
    pub fn in_serial_scope(&self) -> bool {
        self.in_serial_scope
    }

    /// Whether the task must complete before the next serial task may start.
    pub fn holds_serial_scope(&self) -> bool {
        self.serial || self.in_serial_scope
    }

    fn resolver_context(&self, ctx: &OperationContext) -> Option<ResolverContext> {
        let field_id = self.field_id?;
        Some(ctx.resolver_context(ResolverInput {
            field_id,
            object_definition_id: self.object_definition_id?,
            parent: self.parent.clone()?,
            arguments: self.arguments.clone()?,
            path: self.path.clone(),
            scoped_data: self.scoped_data.clone(),
        }))
    }

    /// Starts the resolver. Nothing is written to the response until the returned future
    /// completes and the task is handed to `complete_value`.
    pub fn begin_execute(mut self: Box<Self>, ctx: &OperationContext) -> BoxFuture<'static, TaskRun> {
        self.status = TaskStatus::Running;
        let Some(resolver_ctx) = self.resolver_context(ctx) else {
            return Box::pin(std::future::ready(TaskRun {
                task: self,
                outcome: TaskOutcome::Noop,
            }));
        };

        tracing::trace!(field = %resolver_ctx.field_name(), "Starting task");
        ctx.hooks
            .on_resolver_start(ctx.resolver_info(resolver_ctx.field_id, &self.path, false));

        let resolver = ctx.operation[resolver_ctx.field_id].resolver.clone();
        let token = ctx.cancellation_token.clone();
        Box::pin(async move {
            let outcome = match resolver {
                FieldResolver::Sync(resolver) => TaskOutcome::Resolved(resolver(&resolver_ctx)),
                FieldResolver::Async(resolver) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => TaskOutcome::Cancelled,
                        result = resolver.resolve(resolver_ctx) => TaskOutcome::Resolved(result),
                    }
                }
            };
            TaskRun { task: self, outcome }
        })
    }

    /// Writes the resolver result into the target slot, pushing child tasks into `batch`.
    pub fn complete_value(
        &mut self,
        ctx: &mut OperationContext,
        batch: &mut TaskBatch,
        result: ResolverResult,
    ) -> CompletionStatus {
        let (Some(field_id), Some(object_definition_id)) = (self.field_id, self.object_definition_id) else {
            self.status = TaskStatus::Completed;
            return CompletionStatus::Completed;
        };
        let status = completion::complete_field(
            ctx,
            batch,
            FieldCompletion {
                field_id,
                object_definition_id,
                path: self.path.clone(),
                scoped_data: std::mem::take(&mut self.scoped_data),
                in_serial_scope: self.holds_serial_scope(),
            },
            result,
        );
        self.status = match status {
            CompletionStatus::Completed => TaskStatus::Completed,
            CompletionStatus::Faulted | CompletionStatus::Cancelled | CompletionStatus::Discarded => {
                TaskStatus::Faulted
            }
        };
        status
    }

    pub fn mark_faulted(&mut self) {
        self.status = TaskStatus::Faulted;
    }

    pub fn mark_completed(&mut self) {
        self.status = TaskStatus::Completed;
    }
}
