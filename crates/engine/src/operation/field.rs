use std::sync::Arc;

use error::Location;
use serde_json::{Map, Value};

use super::{InputValue, ResponseKey, SelectionSetId, Variables};
use crate::{
    resolver::FieldResolver,
    schema::{FieldType, InterfaceDefinitionId, ObjectDefinitionId, Schema, UnionDefinitionId},
};

/// How a field is scheduled relative to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionStrategy {
    /// May run concurrently with any sibling.
    #[default]
    Parallel,
    /// Runs, with its whole subtree, only after the previous serial sibling completed.
    Serial,
    /// Side-effect free and synchronous, resolved inline without a task.
    Pure,
}

/// Restricts a field to objects of a given type, as produced by fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCondition {
    Object(ObjectDefinitionId),
    Interface(InterfaceDefinitionId),
    Union(UnionDefinitionId),
}

impl TypeCondition {
    pub fn matches(&self, schema: &Schema, object_id: ObjectDefinitionId) -> bool {
        match *self {
            TypeCondition::Object(id) => id == object_id,
            TypeCondition::Interface(id) => schema.implements_interface(object_id, id),
            TypeCondition::Union(id) => schema.is_union_member(object_id, id),
        }
    }
}

impl From<ObjectDefinitionId> for TypeCondition {
    fn from(id: ObjectDefinitionId) -> Self {
        Self::Object(id)
    }
}

impl From<InterfaceDefinitionId> for TypeCondition {
    fn from(id: InterfaceDefinitionId) -> Self {
        Self::Interface(id)
    }
}

impl From<UnionDefinitionId> for TypeCondition {
    fn from(id: UnionDefinitionId) -> Self {
        Self::Union(id)
    }
}

/// `@skip(if: $var)` and `@include(if: $var)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IncludeCondition {
    Skip { variable: String },
    Include { variable: String },
}

impl IncludeCondition {
    pub fn variable(&self) -> &str {
        match self {
            IncludeCondition::Skip { variable } | IncludeCondition::Include { variable } => variable,
        }
    }

    pub fn is_included(&self, variables: &Variables) -> bool {
        let value = variables.get(self.variable()).and_then(Value::as_bool).unwrap_or(false);
        match self {
            IncludeCondition::Skip { .. } => !value,
            IncludeCondition::Include { .. } => value,
        }
    }
}

/// One field occurrence within a selection set.
pub struct Field {
    pub(crate) response_key: ResponseKey,
    pub(crate) name: String,
    pub(crate) ty: FieldType,
    pub(crate) resolver: FieldResolver,
    pub(crate) strategy: ExecutionStrategy,
    pub(crate) arguments: Vec<(String, InputValue)>,
    // Coerced once when the operation is prepared if no argument references a variable.
    pub(crate) static_arguments: Option<Arc<Map<String, Value>>>,
    pub(crate) selection_set_id: Option<SelectionSetId>,
    pub(crate) type_condition: Option<TypeCondition>,
    pub(crate) include_conditions: Vec<IncludeCondition>,
    pub(crate) location: Option<Location>,
}

impl Field {
    pub fn response_key(&self) -> ResponseKey {
        self.response_key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn selection_set_id(&self) -> Option<SelectionSetId> {
        self.selection_set_id
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub(crate) fn is_included(&self, variables: &Variables) -> bool {
        self.include_conditions
            .iter()
            .all(|condition| condition.is_included(variables))
    }

    pub(crate) fn applies_to(&self, schema: &Schema, object_id: ObjectDefinitionId) -> bool {
        self.type_condition
            .map_or(true, |condition| condition.matches(schema, object_id))
    }

    pub(crate) fn coerce_arguments(&self, variables: &Variables) -> Arc<Map<String, Value>> {
        if let Some(arguments) = &self.static_arguments {
            return arguments.clone();
        }
        Arc::new(
            self.arguments
                .iter()
                .map(|(name, value)| (name.clone(), value.resolve(variables)))
                .collect(),
        )
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("strategy", &self.strategy)
            .field("selection_set_id", &self.selection_set_id)
            .finish_non_exhaustive()
    }
}
