//! # Meshcode
//!
//! Interactive relabeling of node codes on pairs of 2D meshes.
//!
//! Meshcode keeps up to two meshes loaded side by side, renders their
//! elements and coded nodes as plot traces, and lets the user pick nodes
//! (by region selection, click or a hand-drawn polygon) to assign them a new
//! integer code. Loading and merging meshes is delegated to an HTTP backend.
//!
//! ## Features
//!
//! - **Trace building**: one element trace per mesh, one marker trace per code
//! - **Reverse lookup**: rendered points resolve back to mesh node indices
//! - **Polygon selection**: even-odd hit testing in data coordinates
//! - **Backend access**: concurrent loads, merge of the two loaded meshes
//!
//! ## Quick Start
//!
//! ```no_run
//! use meshcode::prelude::*;
//! use std::path::Path;
//!
//! let config = EditorConfig::from_env().unwrap();
//! let service = HttpMeshService::new(&config).unwrap();
//!
//! let mut manager = MeshManager::new(config.line_width);
//! let upload = manager.upload_meshes(&service, [Some(Path::new("lagoon.mesh")), None]);
//! println!("{} traces to draw", upload.redraw.traces.len());
//!
//! // The user clicked point 0 of trace 1
//! let event = PlotEvent::from_points([(1, 0)]);
//! let selection = manager.find_nodes_from_event(&event, manager.trace_map());
//! let redraw = manager.update_codes(&selection, 5);
//! println!("{} traces after relabel", redraw.traces.len());
//! ```
//!
//! ## Building Scenes Directly
//!
//! ```
//! use meshcode::prelude::*;
//! use nalgebra::Point2;
//!
//! let mesh = Mesh::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
//!     vec![vec![0, 1, 2]],
//!     vec![3, 0, 3],
//! )
//! .unwrap();
//!
//! let scene = build_scene(&[Some(&mesh), None], LineWidth::DEFAULT);
//! // elements + code 3; code 0 gets no trace
//! assert_eq!(scene.traces.len(), 2);
//!
//! let selection = SelectionResolver::new(&scene.trace_map, &[Some(&mesh), None])
//!     .resolve(&PlotEvent::from_points([(1, 1)]));
//! assert_eq!(selection.nodes(Slot::First), &[2]);
//! ```
//!
//! ## Driving a Session
//!
//! [`editor::MeshEditor`] wires everything to a [`editor::Frontend`]
//! implementation, which supplies prompts, notifications and rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod io;
pub mod manager;
pub mod mesh;
pub mod plot;
pub mod polygon;
pub mod select;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use meshcode::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{EditorConfig, LineWidth};
    pub use crate::editor::{Frontend, MeshEditor};
    pub use crate::error::{EditorError, Result};
    pub use crate::geometry::{point_in_polygon, PlotFrame};
    pub use crate::interaction::{parse_code, CodeRequest, Interaction};
    pub use crate::io::{HttpMeshService, MeshService};
    pub use crate::manager::{MeshManager, Redraw, RedrawMode};
    pub use crate::mesh::{Mesh, MeshLookup, RawMesh, Slot};
    pub use crate::plot::{build_scene, Scene, Trace, TraceMap};
    pub use crate::polygon::{Cursor, PointerButton, PointerEvent, PolygonSelector};
    pub use crate::select::{PlotEvent, Selection, SelectionResolver};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
