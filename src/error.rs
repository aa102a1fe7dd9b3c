//! Error types for namespace resolution.

use thiserror::Error;

/// Errors that can occur while decoding, building or resolving namespace paths.
///
/// Every operation here is a deterministic computation over in-memory data,
/// so none of these are transient: each one points at malformed input or a
/// logic defect upstream.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// Conflicting or inconsistent name markers or counts.
    #[error("Invalid name encoding: {0}")]
    InvalidEncoding(String),

    /// Bad node or argument, climbing past the root, or an ambiguous match.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A scratch buffer was too small for the path being built.
    #[error("Buffer too small: needed {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    /// Scratch allocation failed.
    #[error("Out of resources: {0}")]
    OutOfResources(String),

    /// No node matches the requested path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An alias chain loops back on itself or is too deep to follow.
    #[error("Alias cycle: {0}")]
    AliasCycle(String),
}

impl NamespaceError {
    /// Create an invalid encoding error.
    pub fn invalid_encoding(message: impl Into<String>) -> Self {
        Self::InvalidEncoding(message.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = NamespaceError> = std::result::Result<T, E>;
