use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serialize,
};

use super::{Response, ResponseListId, ResponseObjectId, ResponseValue};

impl serde::Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self.root {
            Some(root) => map.serialize_entry("data", &self.serializable_object(root))?,
            None => map.serialize_entry("data", &())?,
        }
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        if !self.extensions.is_empty() {
            map.serialize_entry("extensions", &self.extensions)?;
        }
        map.end()
    }
}

impl Response {
    pub(super) fn serializable_object(&self, id: ResponseObjectId) -> SerializableObject<'_> {
        SerializableObject { response: self, id }
    }
}

pub(super) struct SerializableObject<'a> {
    response: &'a Response,
    id: ResponseObjectId,
}

impl serde::Serialize for SerializableObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let object = &self.response.data[self.id];
        let keys = &self.response.operation.response_keys;
        let mut map = serializer.serialize_map(Some(object.fields.len()))?;
        for field in &object.fields {
            map.serialize_entry(
                &keys[field.key],
                &SerializableValue {
                    response: self.response,
                    value: &field.value,
                },
            )?;
        }
        map.end()
    }
}

struct SerializableList<'a> {
    response: &'a Response,
    id: ResponseListId,
}

impl serde::Serialize for SerializableList<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let values = &self.response.data[self.id].values;
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&SerializableValue {
                response: self.response,
                value,
            })?;
        }
        seq.end()
    }
}

struct SerializableValue<'a> {
    response: &'a Response,
    value: &'a ResponseValue,
}

impl serde::Serialize for SerializableValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.value {
            // Placeholders only remain under a nulled ancestor, which is never reached.
            ResponseValue::Unset | ResponseValue::Null => serializer.serialize_none(),
            ResponseValue::Boolean { value } => serializer.serialize_bool(*value),
            ResponseValue::Int { value } => serializer.serialize_i32(*value),
            ResponseValue::Float { value } => serializer.serialize_f64(*value),
            ResponseValue::String { value } => serializer.serialize_str(value),
            ResponseValue::Json { value } => value.serialize(serializer),
            ResponseValue::List { id } => SerializableList {
                response: self.response,
                id: *id,
            }
            .serialize(serializer),
            ResponseValue::Object { id } => self.response.serializable_object(*id).serialize(serializer),
        }
    }
}
