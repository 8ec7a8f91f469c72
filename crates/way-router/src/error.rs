//! Error types for routing.

use thiserror::Error;

/// Router-specific errors.
///
/// Matching and dispatch never fail; these only arise when a verb
/// string is parsed at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The method string is empty or not a valid token.
    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
