//! Type graph consumed by the execution engine: object, interface, union, enum and scalar
//! definitions addressed by dense ids, plus field types with their wrapping.

mod builder;
mod scalar;
mod wrapping;

use std::sync::Arc;

use error::GraphqlError;
use serde_json::Value;

pub use builder::SchemaBuilder;
pub(crate) use scalar::coerce_leaf;
pub use wrapping::{ListWrapping, Wrapping};

use crate::resolver::FieldError;

pub type ScalarSerializer = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Converts a resolver failure into a client facing error. Handlers are tried in order and the
/// first one returning `Some` wins.
pub type ErrorHandler = Arc<dyn Fn(&FieldError) -> Option<GraphqlError> + Send + Sync>;

pub struct Schema {
    pub(crate) objects: Vec<ObjectDefinition>,
    pub(crate) interfaces: Vec<InterfaceDefinition>,
    pub(crate) unions: Vec<UnionDefinition>,
    pub(crate) enums: Vec<EnumDefinition>,
    pub(crate) scalars: Vec<ScalarDefinition>,
    pub(crate) error_handlers: Vec<ErrorHandler>,
}

id_newtypes::NonZeroU32! {
    Schema.objects[ObjectDefinitionId] => ObjectDefinition,
    Schema.interfaces[InterfaceDefinitionId] => InterfaceDefinition,
    Schema.unions[UnionDefinitionId] => UnionDefinition,
    Schema.enums[EnumDefinitionId] => EnumDefinition,
    Schema.scalars[ScalarDefinitionId] => ScalarDefinition,
}

#[derive(Debug, Clone)]
pub struct ObjectDefinition {
    pub name: String,
    pub interface_ids: Vec<InterfaceDefinitionId>,
}

pub struct InterfaceDefinition {
    pub name: String,
    pub possible_type_ids: Vec<ObjectDefinitionId>,
    pub type_resolver: Option<Arc<dyn TypeResolver>>,
}

pub struct UnionDefinition {
    pub name: String,
    pub possible_type_ids: Vec<ObjectDefinitionId>,
    pub type_resolver: Option<Arc<dyn TypeResolver>>,
}

#[derive(Debug, Clone)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
}

pub struct ScalarDefinition {
    pub name: String,
    pub serialize: ScalarSerializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
    Id,
    Custom(ScalarDefinitionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Definition {
    Scalar(ScalarType),
    Enum(EnumDefinitionId),
    Object(ObjectDefinitionId),
    Interface(InterfaceDefinitionId),
    Union(UnionDefinitionId),
}

impl Definition {
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }
}

impl From<ScalarType> for Definition {
    fn from(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<EnumDefinitionId> for Definition {
    fn from(id: EnumDefinitionId) -> Self {
        Self::Enum(id)
    }
}

impl From<ObjectDefinitionId> for Definition {
    fn from(id: ObjectDefinitionId) -> Self {
        Self::Object(id)
    }
}

impl From<InterfaceDefinitionId> for Definition {
    fn from(id: InterfaceDefinitionId) -> Self {
        Self::Interface(id)
    }
}

impl From<UnionDefinitionId> for Definition {
    fn from(id: UnionDefinitionId) -> Self {
        Self::Union(id)
    }
}

/// Declared output type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub definition: Definition,
    pub wrapping: Wrapping,
}

impl FieldType {
    pub fn new(definition: impl Into<Definition>, wrapping: Wrapping) -> Self {
        Self {
            definition: definition.into(),
            wrapping,
        }
    }

    pub fn nullable(definition: impl Into<Definition>) -> Self {
        Self::new(definition, Wrapping::nullable())
    }

    pub fn required(definition: impl Into<Definition>) -> Self {
        Self::new(definition, Wrapping::required())
    }
}

/// Picks the concrete object type of a value returned for an interface or union field.
pub trait TypeResolver: Send + Sync {
    fn resolve_concrete_type(&self, schema: &Schema, value: &Value) -> Option<ObjectDefinitionId>;
}

impl<F> TypeResolver for F
where
    F: Fn(&Schema, &Value) -> Option<ObjectDefinitionId> + Send + Sync,
{
    fn resolve_concrete_type(&self, schema: &Schema, value: &Value) -> Option<ObjectDefinitionId> {
        self(schema, value)
    }
}

/// Reads the `__typename` property of the value.
pub struct TypenameTypeResolver;

impl TypeResolver for TypenameTypeResolver {
    fn resolve_concrete_type(&self, schema: &Schema, value: &Value) -> Option<ObjectDefinitionId> {
        let typename = value.get("__typename")?.as_str()?;
        schema.object_by_name(typename)
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn object_by_name(&self, name: &str) -> Option<ObjectDefinitionId> {
        self.objects
            .iter()
            .position(|object| object.name == name)
            .map(ObjectDefinitionId::from)
    }

    pub fn definition_name(&self, definition: Definition) -> &str {
        match definition {
            Definition::Scalar(scalar) => match scalar {
                ScalarType::Int => "Int",
                ScalarType::Float => "Float",
                ScalarType::String => "String",
                ScalarType::Boolean => "Boolean",
                ScalarType::Id => "ID",
                ScalarType::Custom(id) => self[id].name.as_str(),
            },
            Definition::Enum(id) => self[id].name.as_str(),
            Definition::Object(id) => self[id].name.as_str(),
            Definition::Interface(id) => self[id].name.as_str(),
            Definition::Union(id) => self[id].name.as_str(),
        }
    }

    /// Resolves the object type a composite value is of. For abstract types the concrete type
    /// must be one of the possible types.
    pub fn resolve_concrete_type(&self, definition: Definition, value: &Value) -> Option<ObjectDefinitionId> {
        let (possible_type_ids, type_resolver) = match definition {
            Definition::Object(id) => return Some(id),
            Definition::Interface(id) => {
                let interface = &self[id];
                (&interface.possible_type_ids, interface.type_resolver.as_deref())
            }
            Definition::Union(id) => {
                let union = &self[id];
                (&union.possible_type_ids, union.type_resolver.as_deref())
            }
            Definition::Scalar(_) | Definition::Enum(_) => return None,
        };
        let object_id = match type_resolver {
            Some(resolver) => resolver.resolve_concrete_type(self, value),
            None => TypenameTypeResolver.resolve_concrete_type(self, value),
        }?;
        possible_type_ids.contains(&object_id).then_some(object_id)
    }

    pub(crate) fn implements_interface(&self, object_id: ObjectDefinitionId, interface_id: InterfaceDefinitionId) -> bool {
        self[object_id].interface_ids.contains(&interface_id)
    }

    pub(crate) fn is_union_member(&self, object_id: ObjectDefinitionId, union_id: UnionDefinitionId) -> bool {
        self[union_id].possible_type_ids.contains(&object_id)
    }

    pub(crate) fn error_handlers(&self) -> &[ErrorHandler] {
        &self.error_handlers
    }
}
