use serde_json::Value;

use super::{ResponseListId, ResponseObjectId};

/// Content of a slot in the result tree. Containers are referenced by id, never by pointer.
#[derive(Default, Debug, Clone, PartialEq)]
pub(crate) enum ResponseValue {
    /// Placeholder until the field completes.
    #[default]
    Unset,
    Null,
    Boolean {
        value: bool,
    },
    // Defined as i32
    // https://spec.graphql.org/October2021/#sec-Int
    Int {
        value: i32,
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    // Output of custom scalar serializers.
    Json {
        value: Box<Value>,
    },
    List {
        id: ResponseListId,
    },
    Object {
        id: ResponseObjectId,
    },
}

impl ResponseValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<T: Into<ResponseValue>> From<Option<T>> for ResponseValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl From<bool> for ResponseValue {
    fn from(value: bool) -> Self {
        Self::Boolean { value }
    }
}

impl From<i32> for ResponseValue {
    fn from(value: i32) -> Self {
        Self::Int { value }
    }
}

impl From<f64> for ResponseValue {
    fn from(value: f64) -> Self {
        Self::Float { value }
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        Self::String { value }
    }
}

impl From<ResponseObjectId> for ResponseValue {
    fn from(id: ResponseObjectId) -> Self {
        Self::Object { id }
    }
}

impl From<ResponseListId> for ResponseValue {
    fn from(id: ResponseListId) -> Self {
        Self::List { id }
    }
}
