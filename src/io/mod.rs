//! Mesh backend access.
//!
//! Loading a mesh file and merging two meshes happen in an external backend.
//! This module defines the [`MeshService`] seam the rest of the crate talks
//! to, and [`HttpMeshService`], its implementation over HTTP.
//!
//! # Endpoints
//!
//! | Call | Method | Path | Request | Response |
//! |------|--------|------|---------|----------|
//! | [`MeshService::load_mesh`] | `POST` | `/load_mesh` | multipart, one part named `file` | mesh JSON |
//! | [`MeshService::merge`] | `POST` | `/merge` | `{"mesh1": mesh, "mesh2": mesh}` | mesh JSON |
//!
//! Mesh JSON is `{"nodes": [[x, y], ...], "elems": [[i, ...], ...], "codes": [c, ...]}`.
//! Responses may encode any number as a string; see [`RawMesh::normalize`].
//! A non-success status fails with [`EditorError::Status`].
//!
//! # Usage
//!
//! ```no_run
//! use meshcode::config::EditorConfig;
//! use meshcode::io::{HttpMeshService, MeshService};
//!
//! let service = HttpMeshService::new(&EditorConfig::default()).unwrap();
//! let first = service.load_mesh("lagoon.mesh".as_ref()).unwrap();
//! let second = service.load_mesh("harbour.mesh".as_ref()).unwrap();
//! let merged = service.merge(&first, &second).unwrap();
//! println!("merged mesh has {} nodes", merged.num_nodes());
//! ```
//!
//! [`RawMesh::normalize`]: crate::mesh::RawMesh::normalize
//! [`EditorError::Status`]: crate::error::EditorError::Status

mod http;

use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;

pub use http::{HttpMeshService, LOAD_MESH_PATH, MERGE_PATH};

/// Access to the mesh loading and merging backend.
///
/// Implementations must be shareable across threads: the two loads of an
/// upload are issued concurrently.
pub trait MeshService: Sync {
    /// Load and normalize the mesh stored in `file`.
    fn load_mesh(&self, file: &Path) -> Result<Mesh>;

    /// Merge two meshes into a new one.
    fn merge(&self, first: &Mesh, second: &Mesh) -> Result<Mesh>;
}

impl<S: MeshService + ?Sized> MeshService for &S {
    fn load_mesh(&self, file: &Path) -> Result<Mesh> {
        (**self).load_mesh(file)
    }

    fn merge(&self, first: &Mesh, second: &Mesh) -> Result<Mesh> {
        (**self).merge(first, second)
    }
}
