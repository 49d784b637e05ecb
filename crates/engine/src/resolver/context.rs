use std::sync::Arc;

use error::ErrorPath;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::FieldError;
use crate::{
    operation::{Field, FieldId, PreparedOperation, Variables},
    response::ResponsePath,
    schema::{ObjectDefinitionId, Schema},
};

/// Context data inherited by a field's descendants.
pub type ScopedData = im::HashMap<Arc<str>, Value>;

/// Everything a resolver may look at. Owned so that asynchronous resolvers can keep it across
/// suspension points.
#[derive(Clone)]
pub struct ResolverContext {
    pub(crate) schema: Arc<Schema>,
    pub(crate) operation: Arc<PreparedOperation>,
    pub(crate) variables: Arc<Variables>,
    pub(crate) field_id: FieldId,
    pub(crate) object_id: ObjectDefinitionId,
    pub(crate) parent: Arc<Value>,
    pub(crate) arguments: Arc<Map<String, Value>>,
    pub(crate) path: ResponsePath,
    pub(crate) scoped_data: ScopedData,
    pub(crate) cancellation_token: CancellationToken,
}

impl ResolverContext {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn operation(&self) -> &PreparedOperation {
        &self.operation
    }

    pub fn field(&self) -> &Field {
        &self.operation[self.field_id]
    }

    pub fn field_name(&self) -> &str {
        self.field().name()
    }

    /// Name of the concrete object type the field is resolved on.
    pub fn object_type_name(&self) -> &str {
        &self.schema[self.object_id].name
    }

    pub fn parent(&self) -> &Value {
        &self.parent
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Deserializes an argument, a missing one being read as null.
    pub fn argument<T: DeserializeOwned>(&self, name: &str) -> Result<T, FieldError> {
        let value = self.arguments.get(name).cloned().unwrap_or_default();
        serde_json::from_value(value).map_err(|err| FieldError::new(format!("Invalid argument '{name}': {err}")))
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn scoped_data(&self, key: &str) -> Option<&Value> {
        self.scoped_data.get(key)
    }

    pub fn path(&self) -> ErrorPath {
        self.path.to_error_path(&self.operation.response_keys)
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }
}

impl std::fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverContext")
            .field("field", &self.field_name())
            .field("path", &self.path().to_string())
            .finish_non_exhaustive()
    }
}
