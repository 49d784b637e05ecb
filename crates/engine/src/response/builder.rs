use error::GraphqlError;

use super::{
    ResponseData, ResponseList, ResponseListId, ResponseObject, ResponseObjectField, ResponseObjectId, ResponsePath,
    ResponseValue, ResponseValueId,
};
use crate::{operation::ResponseKey, schema::ObjectDefinitionId};

/// In-progress result tree of one operation execution. Only ever written from the execution
/// loop, so it needs no synchronization.
#[derive(Default)]
pub(crate) struct ResponseBuilder {
    // will be None if an error propagated up to the root.
    pub(super) root: Option<ResponseObjectId>,
    pub(super) data: ResponseData,
    pub(super) errors: Vec<GraphqlError>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_root_object(
        &mut self,
        definition_id: ObjectDefinitionId,
        keys: impl IntoIterator<Item = ResponseKey>,
    ) -> ResponseObjectId {
        let id = self.push_object(definition_id, keys);
        self.root = Some(id);
        id
    }

    /// Creates an object with one `Unset` field per key, in order.
    pub fn push_object(
        &mut self,
        definition_id: ObjectDefinitionId,
        keys: impl IntoIterator<Item = ResponseKey>,
    ) -> ResponseObjectId {
        self.data.push_object(ResponseObject {
            definition_id,
            fields: keys
                .into_iter()
                .map(|key| ResponseObjectField {
                    key,
                    value: ResponseValue::Unset,
                })
                .collect(),
            invalidated: false,
        })
    }

    pub fn push_list(&mut self, len: usize) -> ResponseListId {
        self.data.push_list(ResponseList {
            values: vec![ResponseValue::Unset; len],
            invalidated: false,
        })
    }

    pub fn write(&mut self, slot: ResponseValueId, value: impl Into<ResponseValue>) {
        *self.slot_mut(slot) = value.into();
    }

    pub fn get(&self, slot: ResponseValueId) -> &ResponseValue {
        match slot {
            ResponseValueId::Field {
                object_id, position, ..
            } => &self.data[object_id].fields[position as usize].value,
            ResponseValueId::Index { list_id, index, .. } => &self.data[list_id].values[index as usize],
        }
    }

    fn slot_mut(&mut self, slot: ResponseValueId) -> &mut ResponseValue {
        match slot {
            ResponseValueId::Field {
                object_id, position, ..
            } => &mut self.data[object_id].fields[position as usize].value,
            ResponseValueId::Index { list_id, index, .. } => &mut self.data[list_id].values[index as usize],
        }
    }

    /// Whether a value at this path can still be part of the response: nothing along the
    /// path was nulled by propagation.
    pub fn is_alive(&self, path: &ResponsePath) -> bool {
        self.root.is_some()
            && path.iter().all(|id| match *id {
                ResponseValueId::Field { object_id, .. } => !self.data[object_id].invalidated,
                ResponseValueId::Index { list_id, .. } => !self.data[list_id].invalidated,
            })
    }

    pub fn is_data_null(&self) -> bool {
        self.root.is_none()
    }

    /// Nulls the closest nullable slot of the path, or the whole data if there is none.
    pub fn propagate_null(&mut self, path: &ResponsePath) {
        let Some(slot) = path.iter().rev().find(|id| id.is_nullable()).copied() else {
            tracing::debug!("Null propagated to the root");
            self.root = None;
            return;
        };
        match std::mem::replace(self.slot_mut(slot), ResponseValue::Null) {
            ResponseValue::Object { id } => self.data[id].invalidated = true,
            ResponseValue::List { id } => self.data[id].invalidated = true,
            _ => {}
        }
    }

    pub fn push_error(&mut self, error: impl Into<GraphqlError>) {
        self.errors.push(error.into());
    }

    pub fn errors(&self) -> &[GraphqlError] {
        &self.errors
    }
}
