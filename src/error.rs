//! Error types for the SMØR engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmorError {
    #[error("Unknown effect key '{key}' on {owner}")]
    UnknownEffectKey { owner: String, key: String },

    #[error("Invalid effect value for '{key}' on {owner}: {value}")]
    InvalidEffectValue {
        owner: String,
        key: String,
        value: String,
    },

    #[error("Unknown special effect '{0}'")]
    UnknownSpecialEffect(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmorError>;
