use crate::{operation::ResponseKey, schema::ObjectDefinitionId};

use super::ResponseValue;

/// Arenas holding every object and list of the response.
#[derive(Default, Debug)]
pub(crate) struct ResponseData {
    pub(super) objects: Vec<ResponseObject>,
    pub(super) lists: Vec<ResponseList>,
}

id_newtypes::NonZeroU32! {
    ResponseData.objects[ResponseObjectId] => ResponseObject,
    ResponseData.lists[ResponseListId] => ResponseList,
}

#[derive(Debug)]
pub(crate) struct ResponseObject {
    pub definition_id: ObjectDefinitionId,
    // In document order, pre-populated with `Unset` placeholders.
    pub fields: Vec<ResponseObjectField>,
    // Set when the slot holding this object was nulled.
    pub invalidated: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ResponseObjectField {
    pub key: ResponseKey,
    pub value: ResponseValue,
}

#[derive(Debug)]
pub(crate) struct ResponseList {
    pub values: Vec<ResponseValue>,
    pub invalidated: bool,
}

impl ResponseData {
    pub(super) fn push_object(&mut self, object: ResponseObject) -> ResponseObjectId {
        let id = ResponseObjectId::from(self.objects.len());
        self.objects.push(object);
        id
    }

    pub(super) fn push_list(&mut self, list: ResponseList) -> ResponseListId {
        let id = ResponseListId::from(self.lists.len());
        self.lists.push(list);
        id
    }
}
