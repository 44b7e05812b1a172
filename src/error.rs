//! Error types for meshcode.
//!
//! This module defines all error types used throughout the library. Malformed
//! prompt input and unresolvable selection points are not errors: they are
//! dropped silently by the components that encounter them.

use thiserror::Error;

/// Result type alias using [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur while loading, merging or validating meshes.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success HTTP status.
    #[error("server {status}")]
    Status {
        /// The endpoint path that was called.
        endpoint: &'static str,
        /// The HTTP status code returned.
        status: u16,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A mesh field could not be coerced to a number.
    #[error("invalid mesh {field} at index {index}: {message}")]
    InvalidMesh {
        /// Name of the offending field (`nodes`, `elems` or `codes`).
        field: &'static str,
        /// Position of the offending entry.
        index: usize,
        /// Description of the problem.
        message: String,
    },

    /// The mesh carries a different number of codes than nodes.
    #[error("mesh has {nodes} nodes but {codes} codes")]
    CodeCountMismatch {
        /// Number of nodes.
        nodes: usize,
        /// Number of codes.
        codes: usize,
    },

    /// An element references a node that does not exist.
    #[error("element {elem} references invalid node {node} (mesh has {node_count} nodes)")]
    InvalidNodeIndex {
        /// The element index.
        elem: usize,
        /// The invalid node index.
        node: usize,
        /// Number of nodes in the mesh.
        node_count: usize,
    },

    /// A merge was requested without two loaded meshes.
    #[error("load two meshes to merge")]
    MissingMeshes,

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl EditorError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        EditorError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an invalid mesh error.
    pub fn invalid_mesh(field: &'static str, index: usize, message: impl Into<String>) -> Self {
        EditorError::InvalidMesh {
            field,
            index,
            message: message.into(),
        }
    }
}
