//! Error types for the Crewlink domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Crewlink operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Backend errors ---
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised by the tool dispatch layer.
///
/// `NotFound` and `InvalidArguments` are detected before any network call
/// and abort the dispatch immediately. `ExecutionFailed` carries the tool
/// name so an unexpected failure is never reported anonymously.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Internal tool error: {0}")]
    Internal(String),
}

/// Errors raised at the backend client boundary.
///
/// Transport failures and non-success statuses both mean "backend
/// unavailable" to callers; tools convert these into structured
/// `status = "error"` results rather than letting them cross the
/// dispatcher boundary as raw errors. A wait timeout is *not* an error
/// and has no variant here.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Backend connection failed: {0}")]
    Connection(String),

    #[error("Invalid backend payload: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "send_message".into(),
            reason: "socket refused".into(),
        });
        assert!(err.to_string().contains("send_message"));
        assert!(err.to_string().contains("socket refused"));
    }

    #[test]
    fn backend_error_displays_correctly() {
        let err = Error::Backend(BackendError::ApiError {
            status_code: 502,
            message: "Bad Gateway".into(),
        });
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
