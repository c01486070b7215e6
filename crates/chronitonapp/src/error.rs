use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ChronitonError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Index {index} is out of range for {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Consistency error: {0}")]
    Consistency(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ChronitonError>;
