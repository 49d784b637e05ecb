use std::sync::Arc;

use error::Location;

use super::*;
use crate::{
    resolver::FieldResolver,
    schema::{FieldType, ScalarType, Schema},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OperationBuildError {
    #[error("Field '{field}' of composite type {ty} must have a selection set")]
    MissingSelectionSet { field: String, ty: String },
    #[error("Field '{field}' of leaf type {ty} cannot have a selection set")]
    UnexpectedSelectionSet { field: String, ty: String },
    #[error("Selection set of field '{field}' is empty")]
    EmptySelectionSet { field: String },
    #[error("Subscription operations must select exactly one root field")]
    InvalidSubscriptionRoot,
}

/// Emits a [`PreparedOperation`]. This is the surface used by the operation compiler.
pub struct OperationBuilder {
    ty: OperationType,
    name: Option<String>,
    root_object_id: ObjectDefinitionId,
    root: SelectionSetBuilder,
}

#[derive(Default)]
pub struct SelectionSetBuilder {
    fields: Vec<FieldBuilder>,
}

pub struct FieldBuilder {
    name: String,
    alias: Option<String>,
    ty: FieldType,
    resolver: FieldResolver,
    strategy: Option<ExecutionStrategy>,
    arguments: Vec<(String, InputValue)>,
    selection_set: Option<SelectionSetBuilder>,
    type_condition: Option<TypeCondition>,
    include_conditions: Vec<IncludeCondition>,
    location: Option<Location>,
}

impl OperationBuilder {
    pub fn new(ty: OperationType, root_object_id: ObjectDefinitionId) -> Self {
        Self {
            ty,
            name: None,
            root_object_id,
            root: SelectionSetBuilder::default(),
        }
    }

    pub fn query(root_object_id: ObjectDefinitionId) -> Self {
        Self::new(OperationType::Query, root_object_id)
    }

    pub fn mutation(root_object_id: ObjectDefinitionId) -> Self {
        Self::new(OperationType::Mutation, root_object_id)
    }

    pub fn subscription(root_object_id: ObjectDefinitionId) -> Self {
        Self::new(OperationType::Subscription, root_object_id)
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn root_selection_set(&mut self, f: impl FnOnce(&mut SelectionSetBuilder)) -> &mut Self {
        f(&mut self.root);
        self
    }

    pub fn build(self, schema: &Schema) -> Result<PreparedOperation, OperationBuildError> {
        if self.ty == OperationType::Subscription && self.root.fields.len() != 1 {
            return Err(OperationBuildError::InvalidSubscriptionRoot);
        }

        let mut flattener = Flattener {
            schema,
            ty: self.ty,
            fields: Vec::new(),
            selection_sets: Vec::new(),
            response_keys: ResponseKeys::default(),
        };
        let root_selection_set_id = flattener.flatten(self.root, true)?;

        Ok(PreparedOperation {
            id: OperationId::next(),
            name: self.name,
            ty: self.ty,
            root_object_id: self.root_object_id,
            root_selection_set_id,
            selection_sets: flattener.selection_sets,
            fields: flattener.fields,
            response_keys: flattener.response_keys,
        })
    }
}

impl SelectionSetBuilder {
    pub fn field(&mut self, name: impl Into<String>, ty: FieldType, resolver: FieldResolver) -> &mut FieldBuilder {
        self.fields.push(FieldBuilder {
            name: name.into(),
            alias: None,
            ty,
            resolver,
            strategy: None,
            arguments: Vec::new(),
            selection_set: None,
            type_condition: None,
            include_conditions: Vec::new(),
            location: None,
        });
        let n = self.fields.len();
        &mut self.fields[n - 1]
    }

    /// `__typename` of the enclosing object.
    pub fn typename(&mut self) -> &mut FieldBuilder {
        self.field(
            "__typename",
            FieldType::required(ScalarType::String),
            FieldResolver::typename(),
        )
        .strategy(ExecutionStrategy::Pure)
    }
}

impl FieldBuilder {
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn strategy(&mut self, strategy: ExecutionStrategy) -> &mut Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn argument(&mut self, name: impl Into<String>, value: impl Into<InputValue>) -> &mut Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    pub fn selection_set(&mut self, f: impl FnOnce(&mut SelectionSetBuilder)) -> &mut Self {
        f(self.selection_set.get_or_insert_with(SelectionSetBuilder::default));
        self
    }

    /// Only selected on objects matching the condition, like a field inside `... on Type`.
    pub fn on(&mut self, condition: impl Into<TypeCondition>) -> &mut Self {
        self.type_condition = Some(condition.into());
        self
    }

    pub fn skip_if(&mut self, variable: impl Into<String>) -> &mut Self {
        self.include_conditions.push(IncludeCondition::Skip {
            variable: variable.into(),
        });
        self
    }

    pub fn include_if(&mut self, variable: impl Into<String>) -> &mut Self {
        self.include_conditions.push(IncludeCondition::Include {
            variable: variable.into(),
        });
        self
    }

    pub fn location(&mut self, line: u32, column: u32) -> &mut Self {
        self.location = Some(Location::new(line, column));
        self
    }
}

struct Flattener<'a> {
    schema: &'a Schema,
    ty: OperationType,
    fields: Vec<Field>,
    selection_sets: Vec<SelectionSet>,
    response_keys: ResponseKeys,
}

impl Flattener<'_> {
    // Children are flattened first so that the fields of every selection set end up contiguous.
    fn flatten(&mut self, builder: SelectionSetBuilder, is_root: bool) -> Result<SelectionSetId, OperationBuildError> {
        let mut fields = Vec::with_capacity(builder.fields.len());
        for field in builder.fields {
            fields.push(self.field(field, is_root)?);
        }

        let start = self.fields.len();
        self.fields.extend(fields);
        self.selection_sets.push(SelectionSet {
            field_ids: IdRange::from(start..self.fields.len()),
        });
        Ok(SelectionSetId::from(self.selection_sets.len() - 1))
    }

    fn field(&mut self, builder: FieldBuilder, is_root: bool) -> Result<Field, OperationBuildError> {
        let FieldBuilder {
            name,
            alias,
            ty,
            resolver,
            strategy,
            arguments,
            selection_set,
            type_condition,
            include_conditions,
            location,
        } = builder;

        let selection_set_id = match (ty.definition.is_composite(), selection_set) {
            (true, Some(selection_set)) => {
                if selection_set.fields.is_empty() {
                    return Err(OperationBuildError::EmptySelectionSet { field: name });
                }
                Some(self.flatten(selection_set, false)?)
            }
            (true, None) => {
                return Err(OperationBuildError::MissingSelectionSet {
                    ty: ty.wrapping.type_display(self.schema.definition_name(ty.definition)),
                    field: name,
                });
            }
            (false, Some(_)) => {
                return Err(OperationBuildError::UnexpectedSelectionSet {
                    ty: ty.wrapping.type_display(self.schema.definition_name(ty.definition)),
                    field: name,
                });
            }
            (false, None) => None,
        };

        let strategy = match strategy {
            Some(ExecutionStrategy::Pure) if !resolver.is_sync() => {
                tracing::warn!(field = %name, "Pure field has an asynchronous resolver, executing it in parallel instead");
                ExecutionStrategy::Parallel
            }
            Some(strategy) => strategy,
            None if is_root && self.ty == OperationType::Mutation => ExecutionStrategy::Serial,
            None => ExecutionStrategy::Parallel,
        };

        let static_arguments = if arguments.iter().any(|(_, value)| value.has_variables()) {
            None
        } else {
            let variables = Variables::default();
            Some(Arc::new(
                arguments
                    .iter()
                    .map(|(name, value)| (name.clone(), value.resolve(&variables)))
                    .collect(),
            ))
        };

        Ok(Field {
            response_key: self.response_keys.get_or_intern(alias.as_deref().unwrap_or(&name)),
            name,
            ty,
            resolver,
            strategy,
            arguments,
            static_arguments,
            selection_set_id,
            type_condition,
            include_conditions,
            location,
        })
    }
}
