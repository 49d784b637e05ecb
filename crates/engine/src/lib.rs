//! Execution engine for prepared GraphQL operations.
//!
//! A [`PreparedOperation`] is a flat, immutable selection tree bound to resolvers. The
//! [`Engine`] runs it: pure fields are resolved inline, every other field goes through a pooled
//! resolver task driven by a scheduler with a serial and a parallel queue. Resolver results are
//! completed against the field types into an index addressed result tree, nulls of non-null
//! fields being propagated to the closest nullable ancestor.

mod config;
mod engine;
mod execution;
mod operation;
mod resolver;
mod response;
mod schema;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, Request};
pub use error::{ErrorCode, ErrorPath, ErrorPathSegment, GraphqlError, Location};
pub use execution::{
    ExecutionError, ExecutionHooks, ExecutionResult, ExecutionStats, NoopHooks, ResolverInfo, ResolverOutcome,
};
pub use operation::{
    ExecutionStrategy, Field, FieldBuilder, FieldId, IncludeCondition, InputValue, OperationBuildError,
    OperationBuilder, OperationId, OperationType, PreparedOperation, ResponseKey, ResponseKeys, SelectionSet,
    SelectionSetBuilder, SelectionSetId, TypeCondition, Variables,
};
pub use resolver::{
    FieldError, FieldOutput, FieldResolver, Resolver, ResolverContext, ResolverResult, ScopedData, SyncResolverFn,
};
pub use response::Response;
pub use schema::{
    Definition, EnumDefinition, EnumDefinitionId, ErrorHandler, FieldType, InterfaceDefinition, InterfaceDefinitionId,
    ListWrapping, ObjectDefinition, ObjectDefinitionId, ScalarDefinition, ScalarDefinitionId, ScalarSerializer,
    ScalarType, Schema, SchemaBuilder, TypeResolver, TypenameTypeResolver, UnionDefinition, UnionDefinitionId,
    Wrapping,
};
