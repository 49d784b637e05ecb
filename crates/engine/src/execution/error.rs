use std::borrow::Cow;

use error::{ErrorCode, GraphqlError};

/// Failure of a whole execution. Field level failures end up in the response errors instead.
#[derive(thiserror::Error, Debug)]
pub enum ExecutionError {
    #[error("Operation was cancelled")]
    Cancelled,
    #[error("Invalid operation: {0}")]
    InvalidOperation(Cow<'static, str>),
    #[error("Variable \"${name}\" must be a Boolean to be used in a @skip or @include condition")]
    InvalidVariable { name: String },
}

pub type ExecutionResult<T> = Result<T, ExecutionError>;

impl From<ExecutionError> for GraphqlError {
    fn from(err: ExecutionError) -> Self {
        let message = err.to_string();
        let code = match &err {
            ExecutionError::Cancelled => ErrorCode::InternalServerError,
            ExecutionError::InvalidOperation(_) => ErrorCode::BadRequest,
            ExecutionError::InvalidVariable { .. } => ErrorCode::VariableError,
        };
        GraphqlError::new(message, code)
    }
}
