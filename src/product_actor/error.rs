use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(u64),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Maps a store-level failure for the product `id` the caller asked about.
    pub fn from_framework(id: u64, err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(_) => ProductError::NotFound(id),
            FrameworkError::Validation(msg) => ProductError::ValidationError(msg),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
