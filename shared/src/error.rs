use thiserror::Error;

/// Errors raised when a dotted field path cannot address a draft location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldPathError {
    #[error("field path is empty")]
    Empty,

    #[error("field path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// Errors raised while coercing a form draft into a typed API request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("field '{0}' is required")]
    MissingField(String),

    #[error("field '{field}' is not a valid date: '{value}'")]
    InvalidDate { field: String, value: String },
}

pub type PayloadResult<T> = std::result::Result<T, PayloadError>;
