use error::ErrorPath;

use super::{ResponseListId, ResponseObjectId};
use crate::operation::{ResponseKey, ResponseKeys};

/// Unique identifier of a slot within the response. Used to propagate null at the right place
/// and to generate the appropriate error path for GraphQL errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseValueId {
    Field {
        object_id: ResponseObjectId,
        position: u32,
        key: ResponseKey,
        nullable: bool,
    },
    Index {
        list_id: ResponseListId,
        index: u32,
        nullable: bool,
    },
}

impl ResponseValueId {
    pub fn field(object_id: ResponseObjectId, position: usize, key: ResponseKey, nullable: bool) -> Self {
        Self::Field {
            object_id,
            position: position as u32,
            key,
            nullable,
        }
    }

    pub fn index(list_id: ResponseListId, index: usize, nullable: bool) -> Self {
        Self::Index {
            list_id,
            index: index as u32,
            nullable,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            ResponseValueId::Field { nullable, .. } | ResponseValueId::Index { nullable, .. } => *nullable,
        }
    }
}

/// Slots from the root down to a value. Persistent, so sharing a prefix with the parent is cheap.
#[derive(Default, Debug, Clone)]
pub(crate) struct ResponsePath(im::Vector<ResponseValueId>);

impl ResponsePath {
    pub fn child(&self, id: ResponseValueId) -> ResponsePath {
        let mut path = self.0.clone();
        path.push_back(id);
        ResponsePath(path)
    }

    pub fn last(&self) -> Option<&ResponseValueId> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ResponseValueId> + '_ {
        self.0.iter()
    }

    pub fn to_error_path(&self, keys: &ResponseKeys) -> ErrorPath {
        let mut path = ErrorPath::new();
        for id in self.iter() {
            match *id {
                ResponseValueId::Field { key, .. } => path.push(&keys[key]),
                ResponseValueId::Index { index, .. } => path.push(index as usize),
            }
        }
        path
    }
}
