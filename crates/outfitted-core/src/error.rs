//! Error types for the Outfitted client core.

use thiserror::Error;

/// A shared error type for the entire Outfitted client core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant renders to a
/// user-displayable message through `Display`.
#[derive(Error, Debug, Clone)]
pub enum OutfittedError {
    /// Client-side precondition failure. Never reaches the network.
    #[error("Validation error on '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// Login/registration rejected or identity lookup failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Entity not found with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Generic 4xx/5xx with a server-supplied detail message
    #[error("Server error ({status}): {detail}")]
    Server { status: u16, detail: String },

    /// Transport failure, no detail available
    #[error("Network error: {0}")]
    Network(String),

    /// IO error (token storage, file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutfittedError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Server error with the HTTP status and detail message
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for OutfittedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for OutfittedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, OutfittedError>`.
pub type Result<T> = std::result::Result<T, OutfittedError>;
