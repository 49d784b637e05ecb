//! Compiled, immutable representation of an operation. Fields and selection sets live in flat
//! arenas and the fields of a selection set are always contiguous.

mod builder;
mod field;
mod key;
mod variables;

use std::sync::atomic::{AtomicU64, Ordering};

use id_newtypes::IdRange;

pub use builder::{FieldBuilder, OperationBuildError, OperationBuilder, SelectionSetBuilder};
pub use field::{ExecutionStrategy, Field, IncludeCondition, TypeCondition};
pub use key::{ResponseKey, ResponseKeys};
pub use variables::{InputValue, Variables};

use crate::schema::ObjectDefinitionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(u64);

impl OperationId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

pub struct PreparedOperation {
    pub(crate) id: OperationId,
    pub(crate) name: Option<String>,
    pub(crate) ty: OperationType,
    pub(crate) root_object_id: ObjectDefinitionId,
    pub(crate) root_selection_set_id: SelectionSetId,
    pub(crate) selection_sets: Vec<SelectionSet>,
    pub(crate) fields: Vec<Field>,
    pub(crate) response_keys: ResponseKeys,
}

id_newtypes::NonZeroU32! {
    PreparedOperation.fields[FieldId] => Field,
    PreparedOperation.selection_sets[SelectionSetId] => SelectionSet,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionSet {
    pub(crate) field_ids: IdRange<FieldId>,
}

impl SelectionSet {
    pub fn field_ids(&self) -> IdRange<FieldId> {
        self.field_ids
    }
}

impl PreparedOperation {
    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ty(&self) -> OperationType {
        self.ty
    }

    pub fn root_object_id(&self) -> ObjectDefinitionId {
        self.root_object_id
    }

    pub fn root_selection_set_id(&self) -> SelectionSetId {
        self.root_selection_set_id
    }

    pub fn response_keys(&self) -> &ResponseKeys {
        &self.response_keys
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = (FieldId, &Field)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, field)| (FieldId::from(i), field))
    }
}

impl std::fmt::Debug for PreparedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedOperation")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
