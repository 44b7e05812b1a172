//! Trace building.
//!
//! The rendering engine only knows anonymous traces, identified at runtime by
//! their position among all drawn traces ("curve number") and by a point
//! offset inside the trace. This module turns meshes into such traces and
//! records, in a [`TraceMap`], which trace holds the nodes of each
//! (slot, code) pair.
//!
//! # Scene Layout
//!
//! For every occupied slot, in slot order:
//!
//! 1. one line trace with every element edge ([`build_element_trace`])
//! 2. one marker trace per distinct non-zero code, in order of first
//!    appearance ([`build_node_traces`])
//!
//! Inside a marker trace, points follow ascending node index. That order is
//! what lets the selection resolver recover a node from a point offset
//! without storing a per-point index table.
//!
//! # Example
//!
//! ```
//! use meshcode::config::LineWidth;
//! use meshcode::mesh::{Mesh, Slot};
//! use meshcode::plot::build_scene;
//! use nalgebra::Point2;
//!
//! let mesh = Mesh::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     vec![vec![0, 1, 2]],
//!     vec![1, 1, 2],
//! )
//! .unwrap();
//!
//! let scene = build_scene(&[Some(&mesh), None], LineWidth::DEFAULT);
//! assert_eq!(scene.traces.len(), 3);
//! assert_eq!(scene.trace_map.position(Slot::First, 2), Some(2));
//! ```

mod builder;
mod style;
mod trace;
mod trace_map;

pub use builder::{
    build_element_trace, build_node_traces, build_polygon_preview, build_scene, NodeTraces, Scene,
};
pub use style::{code_marker_size, code_to_color, slot_edge_color, NEGATIVE_CODE_COLOR, PALETTE};
pub use trace::{LineStyle, MarkerStyle, Mode, Trace, TraceType};
pub use trace_map::TraceMap;
