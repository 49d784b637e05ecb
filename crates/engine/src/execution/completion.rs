use std::sync::Arc;

use error::{ErrorCode, GraphqlError};
use serde_json::Value;

use super::{expand_object, ObjectTarget, OperationContext, TaskBatch};
use crate::{
    operation::{Field, FieldId},
    resolver::{FieldOutput, ResolverResult, ScopedData},
    response::{ResponsePath, ResponseValue, ResponseValueId},
    schema::{coerce_leaf, Definition, ObjectDefinitionId, Wrapping},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompletionStatus {
    /// The slot holds a value, or a null the field's type allows.
    Completed,
    /// A non-null slot ended up null and the null was propagated.
    Faulted,
    /// The resolver observed cancellation, nothing was written.
    Cancelled,
    /// The slot was nulled by propagation in the meantime, the result was dropped.
    Discarded,
}

pub(crate) struct FieldCompletion {
    pub field_id: FieldId,
    /// Concrete type of the object the field belongs to.
    pub object_definition_id: ObjectDefinitionId,
    pub path: ResponsePath,
    pub scoped_data: ScopedData,
    pub in_serial_scope: bool,
}

/// Completes a resolver result into the field's slot, the last element of the path.
///
/// Same code path for tasks and inline pure resolutions.
pub(crate) fn complete_field(
    ctx: &mut OperationContext,
    batch: &mut TaskBatch,
    completion: FieldCompletion,
    result: ResolverResult,
) -> CompletionStatus {
    if !ctx.response.is_alive(&completion.path) {
        // The value is dropped but a resolver failure is still reported.
        if let Err(err) = result {
            if !err.is_cancellation() {
                let error = err.to_graphql_error(&ctx.schema, ctx.include_error_details);
                ctx.push_field_error(error, completion.field_id, &completion.path);
            }
        }
        return CompletionStatus::Discarded;
    }
    let operation = ctx.operation.clone();
    let field = &operation[completion.field_id];
    let Some(&slot) = completion.path.last() else {
        return CompletionStatus::Discarded;
    };

    match result {
        Err(err) if err.is_cancellation() => CompletionStatus::Cancelled,
        Err(err) => {
            tracing::trace!(field = %field.name(), "Resolver failed");
            let error = err.to_graphql_error(&ctx.schema, ctx.include_error_details);
            ctx.push_field_error(error, completion.field_id, &completion.path);
            if slot.is_nullable() {
                ctx.response.write(slot, ResponseValue::Null);
                CompletionStatus::Completed
            } else {
                ctx.response.propagate_null(&completion.path);
                CompletionStatus::Faulted
            }
        }
        Ok(FieldOutput { value, scoped_data }) => {
            let mut completer = ValueCompleter {
                ctx,
                batch,
                field_id: completion.field_id,
                field,
                object_definition_id: completion.object_definition_id,
                scoped_data: scoped_data
                    .into_iter()
                    .fold(completion.scoped_data, |mut data, (key, value)| {
                        data.insert(key, value);
                        data
                    }),
                in_serial_scope: completion.in_serial_scope,
            };
            completer.complete_value(field.ty.wrapping, &completion.path, value);

            if slot.is_nullable() || (ctx.response.is_alive(&completion.path) && !ctx.response.get(slot).is_null()) {
                CompletionStatus::Completed
            } else {
                CompletionStatus::Faulted
            }
        }
    }
}

struct ValueCompleter<'ctx, 'op> {
    ctx: &'ctx mut OperationContext,
    batch: &'ctx mut TaskBatch,
    field_id: FieldId,
    field: &'op Field,
    object_definition_id: ObjectDefinitionId,
    scoped_data: ScopedData,
    in_serial_scope: bool,
}

impl ValueCompleter<'_, '_> {
    fn complete_value(&mut self, wrapping: Wrapping, path: &ResponsePath, value: Value) {
        let Some(&slot) = path.last() else {
            return;
        };

        if value.is_null() {
            if wrapping.is_required() {
                let error = GraphqlError::non_null_violation(
                    &self.ctx.schema[self.object_definition_id].name,
                    self.field.name(),
                );
                self.ctx.push_field_error(error, self.field_id, path);
                self.ctx.response.propagate_null(path);
            } else {
                self.ctx.response.write(slot, ResponseValue::Null);
            }
            return;
        }

        if let Some(item_wrapping) = wrapping.item_wrapping() {
            let items = match value {
                Value::Array(items) => items,
                value => {
                    let message = format!(
                        "Expected a list for field {}.{}, found: {value}",
                        self.ctx.schema[self.object_definition_id].name,
                        self.field.name()
                    );
                    return self.fail(wrapping, path, message);
                }
            };
            let list_id = self.ctx.response.push_list(items.len());
            self.ctx.response.write(slot, list_id);
            for (index, item) in items.into_iter().enumerate() {
                // An item that is null and non-null may have nulled the list or an ancestor.
                if !self.ctx.response.is_alive(path) || self.ctx.response.get(slot).is_null() {
                    break;
                }
                let item_path = path.child(ResponseValueId::index(list_id, index, item_wrapping.is_nullable()));
                self.complete_value(item_wrapping, &item_path, item);
            }
            return;
        }

        let definition = self.field.ty.definition;
        if definition.is_composite() {
            return self.complete_object(definition, wrapping, path, value);
        }

        match coerce_leaf(&self.ctx.schema, definition, value) {
            Ok(value) => self.ctx.response.write(slot, value),
            Err(message) => self.fail(wrapping, path, message),
        }
    }

    fn complete_object(&mut self, definition: Definition, wrapping: Wrapping, path: &ResponsePath, value: Value) {
        let Some(definition_id) = self.ctx.schema.resolve_concrete_type(definition, &value) else {
            let message = format!(
                "Abstract type {} must resolve to an object type at runtime for field {}.{}",
                self.ctx.schema.definition_name(definition),
                self.ctx.schema[self.object_definition_id].name,
                self.field.name()
            );
            return self.fail(wrapping, path, message);
        };
        let Some(selection_set_id) = self.field.selection_set_id else {
            let message = format!("Field {} has no selection set", self.field.name());
            return self.fail(wrapping, path, message);
        };

        expand_object(
            self.ctx,
            self.batch,
            ObjectTarget {
                selection_set_id,
                definition_id,
                parent: Arc::new(value),
                path: path.clone(),
                scoped_data: self.scoped_data.clone(),
                in_serial_scope: self.in_serial_scope,
            },
        );
    }

    /// Completion error: recorded at the slot, which is then nulled or propagated.
    fn fail(&mut self, wrapping: Wrapping, path: &ResponsePath, message: String) {
        tracing::trace!(field = %self.field.name(), %message, "Invalid field value");
        let error = GraphqlError::new(message, ErrorCode::InvalidFieldValue);
        self.ctx.push_field_error(error, self.field_id, path);
        match path.last() {
            Some(&slot) if !wrapping.is_required() => self.ctx.response.write(slot, ResponseValue::Null),
            _ => self.ctx.response.propagate_null(path),
        }
    }
}
