//! Error types for meet-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("a comparison needs at least 2 entities, got {0}")]
    NotEnoughEntities(usize),

    #[error("schedule unavailable for {entity}")]
    EntityUnavailable { entity: String },

    #[error("directory listing unavailable: {0}")]
    DirectoryUnavailable(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
