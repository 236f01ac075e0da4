use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown medicine status: {0}")]
    UnknownStatus(String),
    #[error("invalid timestamp in field {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, ModelError>;
