//! Error types for the TensorGrid platform
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

use crate::types::rule::ResourceType;

/// Result type alias using TensorGridError
pub type Result<T> = std::result::Result<T, TensorGridError>;

/// Unified error type for TensorGrid operations
#[derive(Debug, Error)]
pub enum TensorGridError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Pricing engine errors
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Invalid pricing rule: {0}")]
    Validation(String),

    #[error("No valid pricing rule for resource type '{resource_type}'{}", format_spec(.resource_spec))]
    NoMatchingRule {
        resource_type: ResourceType,
        resource_spec: Option<String>,
    },
}

fn format_spec(spec: &Option<String>) -> String {
    match spec {
        Some(s) => format!(" with spec '{}'", s),
        None => String::new(),
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for TensorGridError {
    fn from(err: serde_json::Error) -> Self {
        TensorGridError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for TensorGridError {
    fn from(err: std::io::Error) -> Self {
        TensorGridError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for TensorGridError {
    fn from(err: anyhow::Error) -> Self {
        TensorGridError::Internal(err.to_string())
    }
}
