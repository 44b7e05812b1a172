//! Core mesh data structures.
//!
//! This module provides the in-memory representation of a 2D mesh and the
//! two slots a session can hold meshes in.
//!
//! # Overview
//!
//! The primary type is [`Mesh`]: an ordered list of node positions, a list of
//! elements (polygons over node indices) and one integer code per node. Node
//! indices are dense and stable for the lifetime of a mesh; only code values
//! ever change.
//!
//! Meshes arrive from the backend as loosely typed JSON, where any number may
//! be encoded as a string. [`RawMesh`] accepts that shape and
//! [`RawMesh::normalize`] coerces it into a validated [`Mesh`].
//!
//! # Codes
//!
//! Code `0` marks an unlabeled node: it gets no marker trace and cannot be
//! picked by polygon selection. Every other value, negative ones included,
//! labels a region or boundary class.
//!
//! ```
//! use meshcode::mesh::Mesh;
//! use nalgebra::Point2;
//!
//! let mesh = Mesh::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     vec![vec![0, 1, 2]],
//!     vec![1, 1, 2],
//! )
//! .unwrap();
//!
//! assert_eq!(mesh.distinct_codes(), vec![1, 2]);
//! assert_eq!(mesh.nodes_with_code(1).collect::<Vec<_>>(), vec![0, 1]);
//! ```

mod model;
mod normalize;
mod slot;

pub use model::Mesh;
pub use normalize::RawMesh;
pub use slot::{MeshLookup, Slot, SlotState};
