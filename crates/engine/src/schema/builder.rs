use std::sync::Arc;

use error::GraphqlError;
use serde_json::Value;

use super::*;

/// Builds a [`Schema`]. Definitions are appended and addressed by the returned ids.
#[derive(Default)]
pub struct SchemaBuilder {
    objects: Vec<ObjectDefinition>,
    interfaces: Vec<InterfaceDefinition>,
    unions: Vec<UnionDefinition>,
    enums: Vec<EnumDefinition>,
    scalars: Vec<ScalarDefinition>,
    error_handlers: Vec<ErrorHandler>,
}

impl SchemaBuilder {
    pub fn object(&mut self, name: impl Into<String>) -> ObjectDefinitionId {
        self.objects.push(ObjectDefinition {
            name: name.into(),
            interface_ids: Vec::new(),
        });
        ObjectDefinitionId::from(self.objects.len() - 1)
    }

    pub fn interface(&mut self, name: impl Into<String>) -> InterfaceDefinitionId {
        self.interfaces.push(InterfaceDefinition {
            name: name.into(),
            possible_type_ids: Vec::new(),
            type_resolver: None,
        });
        InterfaceDefinitionId::from(self.interfaces.len() - 1)
    }

    pub fn union(&mut self, name: impl Into<String>, members: &[ObjectDefinitionId]) -> UnionDefinitionId {
        self.unions.push(UnionDefinition {
            name: name.into(),
            possible_type_ids: members.to_vec(),
            type_resolver: None,
        });
        UnionDefinitionId::from(self.unions.len() - 1)
    }

    pub fn enum_definition<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> EnumDefinitionId {
        self.enums.push(EnumDefinition {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        EnumDefinitionId::from(self.enums.len() - 1)
    }

    pub fn scalar<F>(&mut self, name: impl Into<String>, serialize: F) -> ScalarDefinitionId
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.scalars.push(ScalarDefinition {
            name: name.into(),
            serialize: Arc::new(serialize),
        });
        ScalarDefinitionId::from(self.scalars.len() - 1)
    }

    pub fn implements(&mut self, object_id: ObjectDefinitionId, interface_id: InterfaceDefinitionId) -> &mut Self {
        let object = &mut self.objects[usize::from(object_id)];
        if !object.interface_ids.contains(&interface_id) {
            object.interface_ids.push(interface_id);
            self.interfaces[usize::from(interface_id)]
                .possible_type_ids
                .push(object_id);
        }
        self
    }

    pub fn interface_type_resolver(
        &mut self,
        interface_id: InterfaceDefinitionId,
        resolver: impl TypeResolver + 'static,
    ) -> &mut Self {
        self.interfaces[usize::from(interface_id)].type_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn union_type_resolver(&mut self, union_id: UnionDefinitionId, resolver: impl TypeResolver + 'static) -> &mut Self {
        self.unions[usize::from(union_id)].type_resolver = Some(Arc::new(resolver));
        self
    }

    /// Appends a handler to the error conversion chain.
    pub fn error_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&FieldError) -> Option<GraphqlError> + Send + Sync + 'static,
    {
        self.error_handlers.push(Arc::new(handler));
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            objects: self.objects,
            interfaces: self.interfaces,
            unions: self.unions,
            enums: self.enums,
            scalars: self.scalars,
            error_handlers: self.error_handlers,
        }
    }
}
