//! Trace construction from meshes.

use nalgebra::Point2;

use super::style::{code_marker_size, code_to_color, slot_edge_color};
use super::trace::{LineStyle, MarkerStyle, Mode, Trace, TraceType};
use super::trace_map::TraceMap;
use crate::config::LineWidth;
use crate::mesh::{Mesh, MeshLookup, Slot};

/// Marker traces of one mesh plus where each code landed among them.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTraces {
    /// One marker trace per distinct non-zero code.
    pub traces: Vec<Trace>,
    /// `(code, position within traces)`, in trace order.
    pub index_map: Vec<(i64, usize)>,
}

/// Everything the rendering engine needs for one redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Traces in drawing order.
    pub traces: Vec<Trace>,
    /// Positions of the marker traces within `traces`.
    pub trace_map: TraceMap,
}

/// Build the polyline trace holding every element edge of a mesh.
///
/// Each edge is emitted as its two endpoints followed by a path break, so
/// neighbouring edges are never joined by a stray segment.
pub fn build_element_trace(mesh: &Mesh, slot: Slot, line_width: LineWidth) -> Trace {
    let mut trace = Trace::new(
        TraceType::Scattergl,
        Mode::Lines,
        format!("Mesh {} elements", slot.number()),
    );
    trace.line = Some(LineStyle {
        color: slot_edge_color(slot),
        width: line_width.get(),
    });

    let nodes = mesh.nodes();
    for (a, b) in mesh.edges() {
        trace.push(nodes[a]);
        trace.push(nodes[b]);
        trace.push_break();
    }
    trace
}

/// Build one marker trace per distinct non-zero code of a mesh.
///
/// Codes are visited in order of first appearance. Within a trace, points are
/// the code's nodes in ascending node index order; see
/// [`Mesh::nodes_with_code`].
pub fn build_node_traces(mesh: &Mesh, slot: Slot) -> NodeTraces {
    let mut traces = Vec::new();
    let mut index_map = Vec::new();

    for code in mesh.distinct_codes() {
        let mut trace = Trace::new(
            TraceType::Scattergl,
            Mode::Markers,
            format!("Mesh {} - Code {}", slot.number(), code),
        );
        trace.marker = Some(MarkerStyle {
            color: code_to_color(code),
            size: code_marker_size(code),
            symbol: None,
        });
        trace.hoverinfo = Some("text");

        for i in mesh.nodes_with_code(code) {
            trace.push(mesh.nodes()[i]);
            trace.text.push(format!("node {} code {}", i, code));
        }

        index_map.push((code, traces.len()));
        traces.push(trace);
    }

    NodeTraces { traces, index_map }
}

/// Build the full scene for both slots.
///
/// Per occupied slot, in slot order: the element trace, then the slot's
/// marker traces. The returned trace map records every marker trace's
/// absolute position.
pub fn build_scene<M: MeshLookup + ?Sized>(meshes: &M, line_width: LineWidth) -> Scene {
    let mut scene = Scene::default();

    for slot in Slot::ALL {
        let Some(mesh) = meshes.mesh(slot) else {
            continue;
        };

        scene.traces.push(build_element_trace(mesh, slot, line_width));

        let NodeTraces { traces, index_map } = build_node_traces(mesh, slot);
        let base = scene.traces.len();
        scene.traces.extend(traces);
        for (code, offset) in index_map {
            scene.trace_map.insert(slot, code, base + offset);
        }
    }

    scene
}

/// Build the overlay previewing a polygon being drawn.
///
/// The outline is closed back to the first vertex. Returns `None` for an
/// empty vertex list.
pub fn build_polygon_preview(vertices: &[Point2<f64>]) -> Option<Trace> {
    let first = *vertices.first()?;

    let mut trace = Trace::new(TraceType::Scatter, Mode::LinesMarkers, "polygon-draw");
    trace.line = Some(LineStyle {
        color: "black",
        width: 2.0,
    });
    trace.marker = Some(MarkerStyle {
        color: "black",
        size: 6.0,
        symbol: Some("circle"),
    });
    trace.hoverinfo = Some("none");
    trace.showlegend = false;

    for &v in vertices {
        trace.push(v);
    }
    trace.push(first);
    Some(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_mesh(codes: Vec<i64>) -> Mesh {
        let nodes = (0..codes.len())
            .map(|i| Point2::new(i as f64, (i * i) as f64))
            .collect();
        Mesh::new(nodes, vec![], codes).unwrap()
    }

    fn create_triangle() -> Mesh {
        Mesh::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            vec![vec![0, 1, 2]],
            vec![1, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_element_trace_breaks_between_edges() {
        let mesh = create_triangle();
        let trace = build_element_trace(&mesh, Slot::Second, LineWidth::new(1.5));

        assert_eq!(trace.mode, Mode::Lines);
        assert_eq!(trace.len(), 9);
        assert_eq!(
            trace.x,
            vec![
                Some(0.0), Some(1.0), None,
                Some(1.0), Some(1.0), None,
                Some(1.0), Some(0.0), None,
            ]
        );
        assert_eq!(
            trace.line,
            Some(LineStyle {
                color: "lightblue",
                width: 1.5
            })
        );
        assert_eq!(trace.name, "Mesh 2 elements");
    }

    #[test]
    fn test_node_traces_skip_code_zero() {
        let mesh = create_mesh(vec![0, 3, 0, -2, 3]);
        let NodeTraces { traces, index_map } = build_node_traces(&mesh, Slot::First);

        assert_eq!(index_map, vec![(3, 0), (-2, 1)]);
        assert_eq!(traces.len(), 2);
        assert!(traces.iter().all(|t| !t.name.ends_with("Code 0")));
        assert_eq!(traces[0].x, vec![Some(1.0), Some(4.0)]);
        assert_eq!(traces[0].text, vec!["node 1 code 3", "node 4 code 3"]);
        assert_eq!(traces[1].marker.unwrap().color, "black");
    }

    #[test]
    fn test_node_traces_all_zero() {
        let mesh = create_mesh(vec![0, 0, 0]);
        let node_traces = build_node_traces(&mesh, Slot::First);
        assert!(node_traces.traces.is_empty());
        assert!(node_traces.index_map.is_empty());
    }

    #[test]
    fn test_scene_positions_follow_append_order() {
        let first = create_mesh(vec![1, 2, 1]);
        let second = create_mesh(vec![5, 0, 1]);
        let meshes = [Some(&first), Some(&second)];

        let scene = build_scene(&meshes, LineWidth::DEFAULT);

        // elements(0), code 1, code 2, elements(1), code 5, code 1
        assert_eq!(scene.traces.len(), 6);
        assert_eq!(scene.trace_map.entries(Slot::First), &[(1, 1), (2, 2)]);
        assert_eq!(scene.trace_map.entries(Slot::Second), &[(5, 4), (1, 5)]);
        assert_eq!(scene.traces[3].name, "Mesh 2 elements");
        assert_eq!(scene.traces[5].name, "Mesh 2 - Code 1");
    }

    #[test]
    fn test_scene_skips_empty_slots() {
        let second = create_mesh(vec![4]);
        let meshes = [None, Some(&second)];

        let scene = build_scene(&meshes, LineWidth::DEFAULT);
        assert_eq!(scene.traces.len(), 2);
        assert!(scene.trace_map.entries(Slot::First).is_empty());
        assert_eq!(scene.trace_map.position(Slot::Second, 4), Some(1));

        let empty: [Option<&Mesh>; 2] = [None, None];
        assert_eq!(build_scene(&empty, LineWidth::DEFAULT), Scene::default());
    }

    #[test]
    fn test_trace_points_match_filtered_nodes() {
        let mesh = create_mesh(vec![2, 7, 2, 2, 0, 7]);
        let NodeTraces { traces, index_map } = build_node_traces(&mesh, Slot::First);

        for (code, position) in index_map {
            let trace = &traces[position];
            for (offset, node) in mesh.nodes_with_code(code).enumerate() {
                assert_eq!(trace.point(offset), mesh.node(node).copied());
            }
            assert_eq!(trace.len(), mesh.nodes_with_code(code).count());
        }
    }

    #[test]
    fn test_polygon_preview_closes_outline() {
        assert!(build_polygon_preview(&[]).is_none());

        let vertices = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
        let trace = build_polygon_preview(&vertices).unwrap();
        assert_eq!(trace.x, vec![Some(0.0), Some(2.0), Some(0.0)]);
        assert_eq!(trace.mode, Mode::LinesMarkers);
        assert!(!trace.showlegend);
    }
}
