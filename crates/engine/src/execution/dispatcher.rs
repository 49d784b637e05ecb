use std::sync::Arc;

use serde_json::Value;

use super::{
    completion::{self, FieldCompletion},
    context::ResolverInput,
    hooks::ResolverOutcome,
    task::TaskInit,
    OperationContext, TaskBatch,
};
use crate::{
    operation::{ExecutionStrategy, FieldId, SelectionSetId},
    resolver::{FieldResolver, ScopedData},
    response::{ResponsePath, ResponseValueId},
    schema::ObjectDefinitionId,
};

/// An object value whose selection set is to be expanded into child work.
pub(crate) struct ObjectTarget {
    pub selection_set_id: SelectionSetId,
    pub definition_id: ObjectDefinitionId,
    pub parent: Arc<Value>,
    /// Path of the slot holding the object, empty for the root object.
    pub path: ResponsePath,
    pub scoped_data: ScopedData,
    pub in_serial_scope: bool,
}

/// Materializes the object in the response, then resolves its pure fields inline and rents a
/// task for every other field. Tasks are only pushed into `batch`, the caller registers them.
pub(crate) fn expand_object(ctx: &mut OperationContext, batch: &mut TaskBatch, target: ObjectTarget) {
    let operation = ctx.operation.clone();
    let field_ids = operation[target.selection_set_id]
        .field_ids
        .iter()
        .filter(|id| {
            let field = &operation[*id];
            field.is_included(&ctx.variables) && field.applies_to(&ctx.schema, target.definition_id)
        })
        .collect::<Vec<FieldId>>();

    let keys = field_ids.iter().map(|id| operation[*id].response_key);
    let object_id = match target.path.last() {
        Some(slot) => {
            let object_id = ctx.response.push_object(target.definition_id, keys);
            ctx.response.write(*slot, object_id);
            object_id
        }
        None => ctx.response.push_root_object(target.definition_id, keys),
    };

    if field_ids.is_empty() {
        let mut task = ctx.task_pool.rent();
        task.initialize_noop(target.path, target.in_serial_scope);
        batch.push(task);
        return;
    }

    for (position, field_id) in field_ids.into_iter().enumerate() {
        // An inline completion may have nulled this object, the remaining fields are dropped.
        if !ctx.response.is_alive(&target.path) {
            tracing::trace!("Object nulled during expansion");
            break;
        }
        let field = &operation[field_id];
        let slot = ResponseValueId::field(object_id, position, field.response_key, field.ty.wrapping.is_nullable());
        let path = target.path.child(slot);
        let arguments = field.coerce_arguments(&ctx.variables);

        match (&field.strategy, &field.resolver) {
            (ExecutionStrategy::Pure, FieldResolver::Sync(resolver)) => {
                ctx.stats.inline_resolutions += 1;
                let resolver_ctx = ctx.resolver_context(ResolverInput {
                    field_id,
                    object_definition_id: target.definition_id,
                    parent: target.parent.clone(),
                    arguments,
                    path: path.clone(),
                    scoped_data: target.scoped_data.clone(),
                });
                ctx.hooks.on_resolver_start(ctx.resolver_info(field_id, &path, true));
                let result = resolver(&resolver_ctx);
                let outcome = match &result {
                    Ok(_) => ResolverOutcome::Success,
                    Err(err) if err.is_cancellation() => ResolverOutcome::Cancelled,
                    Err(_) => ResolverOutcome::Error,
                };
                ctx.hooks.on_resolver_end(ctx.resolver_info(field_id, &path, true), outcome);

                completion::complete_field(
                    ctx,
                    batch,
                    FieldCompletion {
                        field_id,
                        object_definition_id: target.definition_id,
                        path,
                        scoped_data: target.scoped_data.clone(),
                        in_serial_scope: target.in_serial_scope,
                    },
                    result,
                );
            }
            (strategy, _) => {
                let mut task = ctx.task_pool.rent();
                task.initialize(TaskInit {
                    field_id,
                    object_definition_id: target.definition_id,
                    parent: target.parent.clone(),
                    path,
                    scoped_data: target.scoped_data.clone(),
                    arguments,
                    serial: *strategy == ExecutionStrategy::Serial,
                    in_serial_scope: target.in_serial_scope,
                });
                batch.push(task);
            }
        }
    }
}
