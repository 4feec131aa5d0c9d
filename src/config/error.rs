//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Search minimum length must be at least 1")]
    InvalidSearchMinChars,

    #[error("Photo size ceiling must be non-zero")]
    InvalidPhotoCeiling,

    #[error("Photo size ceiling exceeds maximum allowed (32 MiB)")]
    PhotoCeilingTooLarge,
}
