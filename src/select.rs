//! Selection sets and selection resolving.
//!
//! Every selection mechanism (region select, click, polygon) ends in a
//! [`Selection`]: node indices grouped by mesh slot. Rendering-engine events
//! report hits as `(curveNumber, pointIndex)` pairs; [`SelectionResolver`]
//! translates those back into nodes.
//!
//! # Resolving
//!
//! For each reported point the resolver finds the (slot, code) pair whose
//! marker trace sits at `curveNumber`, then walks the slot's mesh and picks
//! the `pointIndex`-th node carrying that code, in ascending node order. This
//! is the exact order marker traces are built in, so no reverse index is
//! stored. Points naming an unknown trace or an offset past the end of the
//! code's node list are skipped.
//!
//! ```
//! use meshcode::config::LineWidth;
//! use meshcode::mesh::{Mesh, Slot};
//! use meshcode::plot::build_scene;
//! use meshcode::select::{PlotEvent, SelectionResolver};
//! use nalgebra::Point2;
//!
//! let mesh = Mesh::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     vec![vec![0, 1, 2]],
//!     vec![1, 1, 2],
//! )
//! .unwrap();
//! let meshes = [Some(&mesh), None];
//! let scene = build_scene(&meshes, LineWidth::DEFAULT);
//!
//! // second point of the code-1 trace
//! let event = PlotEvent::from_points([(1, 1)]);
//! let selection = SelectionResolver::new(&scene.trace_map, &meshes).resolve(&event);
//! assert_eq!(selection.nodes(Slot::First), &[1]);
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::mesh::{MeshLookup, Slot};
use crate::plot::TraceMap;

/// One point reported by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPoint {
    /// Position of the trace among all drawn traces.
    pub curve_number: usize,
    /// Offset of the point inside its trace.
    pub point_index: usize,
}

/// A selection or click event from the rendering engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlotEvent {
    /// Points hit by the interaction. Missing in the payload means none.
    #[serde(default)]
    pub points: Vec<PlotPoint>,
}

impl PlotEvent {
    /// Build an event from `(curve_number, point_index)` pairs.
    pub fn from_points(points: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            points: points
                .into_iter()
                .map(|(curve_number, point_index)| PlotPoint {
                    curve_number,
                    point_index,
                })
                .collect(),
        }
    }

    /// Parse an event from the engine's JSON payload.
    ///
    /// A `null` payload is an event without points.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        let event: Option<PlotEvent> = serde_json::from_str(text)?;
        Ok(event.unwrap_or_default())
    }
}

/// Node indices grouped by mesh slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: [Vec<usize>; 2],
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node of `slot`.
    pub fn push(&mut self, slot: Slot, node: usize) {
        self.nodes[slot.index()].push(node);
    }

    /// Selected nodes of `slot`, in the order they were added.
    pub fn nodes(&self, slot: Slot) -> &[usize] {
        &self.nodes[slot.index()]
    }

    /// All `(slot, node)` pairs, slot 0 first.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, usize)> + '_ {
        Slot::ALL
            .into_iter()
            .flat_map(move |slot| self.nodes(slot).iter().map(move |&n| (slot, n)))
    }

    /// The first selected node, scanning slot 0 before slot 1.
    pub fn first(&self) -> Option<(Slot, usize)> {
        self.iter().next()
    }

    /// A selection holding only [`Selection::first`].
    pub fn only_first(&self) -> Selection {
        let mut single = Selection::new();
        if let Some((slot, node)) = self.first() {
            single.push(slot, node);
        }
        single
    }

    /// Total number of selected nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().map(Vec::len).sum()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Vec::is_empty)
    }
}

impl FromIterator<(Slot, usize)> for Selection {
    fn from_iter<T: IntoIterator<Item = (Slot, usize)>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for (slot, node) in iter {
            selection.push(slot, node);
        }
        selection
    }
}

/// Translates rendering-engine hits into mesh nodes.
///
/// A resolver borrows the trace map of the current redraw, so it cannot
/// outlive it.
pub struct SelectionResolver<'a, M: MeshLookup + ?Sized> {
    trace_map: &'a TraceMap,
    meshes: &'a M,
}

impl<'a, M: MeshLookup + ?Sized> SelectionResolver<'a, M> {
    /// Create a resolver over a trace map and the meshes it was built from.
    pub fn new(trace_map: &'a TraceMap, meshes: &'a M) -> Self {
        Self { trace_map, meshes }
    }

    /// Resolve a single reported point to `(slot, node)`.
    pub fn resolve_point(&self, point: &PlotPoint) -> Option<(Slot, usize)> {
        let (slot, code) = self.trace_map.lookup(point.curve_number)?;
        let mesh = self.meshes.mesh(slot)?;
        let node = mesh.nodes_with_code(code).nth(point.point_index)?;
        Some((slot, node))
    }

    /// Resolve every point of an event, skipping unresolvable ones.
    pub fn resolve(&self, event: &PlotEvent) -> Selection {
        event
            .points
            .iter()
            .filter_map(|point| {
                let hit = self.resolve_point(point);
                if hit.is_none() {
                    debug!(
                        curve = point.curve_number,
                        point = point.point_index,
                        "dropping unresolved selection point"
                    );
                }
                hit
            })
            .collect()
    }
}
