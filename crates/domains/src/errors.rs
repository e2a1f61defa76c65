//! # DomainError
//!
//! Centralized error handling for the moments services.
//! Every port and service operation reports one of three failure kinds.

use std::fmt::Display;

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown identifier (e.g., a post that was never created or was deleted)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// A required field is missing or a value is out of range
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure (e.g., connection lost, write rejected)
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Display) -> Self {
        Self::NotFound { entity: "Post", id: id.to_string() }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(err: impl Display) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A specialized Result type for domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
