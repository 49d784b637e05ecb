mod builder;
mod data;
mod path;
mod ser;
mod value;

use std::sync::Arc;

use error::GraphqlError;
use serde_json::{Map, Value};

pub(crate) use builder::ResponseBuilder;
pub(crate) use data::*;
pub(crate) use path::*;
pub(crate) use value::*;

use crate::{execution::ExecutionStats, operation::PreparedOperation};

/// Result of one execution: `data`, `errors` and `extensions`, serializable as a GraphQL response.
pub struct Response {
    operation: Arc<PreparedOperation>,
    root: Option<ResponseObjectId>,
    data: ResponseData,
    errors: Vec<GraphqlError>,
    extensions: Map<String, Value>,
    stats: ExecutionStats,
}

impl Response {
    pub(crate) fn new(operation: Arc<PreparedOperation>, builder: ResponseBuilder, stats: ExecutionStats) -> Self {
        let ResponseBuilder { root, data, errors } = builder;
        Self {
            operation,
            root,
            data,
            errors,
            extensions: Map::new(),
            stats,
        }
    }

    pub fn errors(&self) -> &[GraphqlError] {
        &self.errors
    }

    /// `false` when a null propagated up to the root.
    pub fn has_data(&self) -> bool {
        self.root.is_some()
    }

    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extensions
    }

    pub fn operation(&self) -> &PreparedOperation {
        &self.operation
    }

    /// `data` as a JSON value.
    pub fn data(&self) -> Value {
        match self.root {
            Some(root) => serde_json::to_value(self.serializable_object(root)).unwrap_or_default(),
            None => Value::Null,
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("data", &self.data())
            .field("errors", &self.errors)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}
