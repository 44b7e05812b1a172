//! Freehand polygon selection.
//!
//! An alternative to the rendering engine's own lasso: the user toggles the
//! mode on, presses the primary button once per vertex, and closes the
//! polygon with a secondary press, a double press or an explicit finish.
//! Pointer positions arrive in screen pixels and are mapped to data
//! coordinates through the current [`PlotFrame`].
//!
//! # States
//!
//! ```text
//!        toggle                 finish (>= 3 vertices: hit test + prompt)
//! Off ----------> Drawing ---------------------------------------------> Off
//!  ^                 |  primary press: add vertex, refresh preview
//!  +-----------------+
//!    toggle / finish with < 3 vertices (discarded)
//! ```
//!
//! Handlers return [`PolygonEffect`]s instead of touching the UI, so the
//! selector can be driven without a live rendering surface.

use nalgebra::Point2;
use tracing::debug;

use crate::geometry::{point_in_polygon, PlotFrame};
use crate::interaction::CodeRequest;
use crate::mesh::{MeshLookup, Slot};
use crate::plot::{build_polygon_preview, Trace};
use crate::select::Selection;

/// Fewest vertices forming a usable polygon.
pub const MIN_VERTICES: usize = 3;

/// Pointer button of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
}

/// Raw pointer input on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button went down at a screen position.
    Press {
        /// Which button.
        button: PointerButton,
        /// Screen position in pixels.
        position: Point2<f64>,
    },
    /// A double press anywhere on the surface.
    DoublePress,
    /// The dedicated finish gesture.
    Finish,
}

/// Pointer cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Regular cursor.
    Default,
    /// Crosshair, while drawing.
    Crosshair,
}

/// Something the UI should do in response to polygon input.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonEffect {
    /// Change the cursor.
    SetCursor(Cursor),
    /// Show or replace the outline preview overlay.
    ShowPreview(Trace),
    /// Remove the outline preview overlay.
    ClearPreview,
    /// Ask the user for a code and apply it to the enclosed nodes.
    RequestCode(CodeRequest),
}

/// Selection mode state.
///
/// There is no resting "finished" state. Closing a polygon with at least
/// [`MIN_VERTICES`] vertices is a transition from `Drawing` straight back to
/// `Off` whose output is the hit test, carried by
/// [`PolygonEffect::RequestCode`]. Closing with fewer vertices goes to `Off`
/// with no request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolygonState {
    /// Mode inactive; pointer input is ignored.
    #[default]
    Off,
    /// Collecting vertices, in data coordinates.
    Drawing {
        /// Vertices placed so far.
        vertices: Vec<Point2<f64>>,
    },
}

/// Nodes with a non-zero code inside `polygon`, per slot, ascending.
///
/// Code-0 nodes are never selected, wherever they lie.
pub fn hit_test<M: MeshLookup + ?Sized>(polygon: &[Point2<f64>], meshes: &M) -> Selection {
    let mut selection = Selection::new();
    for slot in Slot::ALL {
        let Some(mesh) = meshes.mesh(slot) else {
            continue;
        };
        for (i, (node, &code)) in mesh.nodes().iter().zip(mesh.codes()).enumerate() {
            if code != 0 && point_in_polygon(node, polygon) {
                selection.push(slot, i);
            }
        }
    }
    selection
}

/// Manually driven polygon selection mode.
#[derive(Debug, Default)]
pub struct PolygonSelector {
    state: PolygonState,
}

impl PolygonSelector {
    /// Create a selector with the mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &PolygonState {
        &self.state
    }

    /// Whether the mode is on.
    pub fn is_active(&self) -> bool {
        matches!(self.state, PolygonState::Drawing { .. })
    }

    /// Vertices placed so far; empty when the mode is off.
    pub fn vertices(&self) -> &[Point2<f64>] {
        match &self.state {
            PolygonState::Off => &[],
            PolygonState::Drawing { vertices } => vertices,
        }
    }

    /// Switch the mode on or off. Switching off discards placed vertices.
    pub fn toggle(&mut self) -> Vec<PolygonEffect> {
        match std::mem::take(&mut self.state) {
            PolygonState::Off => {
                self.state = PolygonState::Drawing {
                    vertices: Vec::new(),
                };
                vec![PolygonEffect::SetCursor(Cursor::Crosshair)]
            }
            PolygonState::Drawing { vertices } => {
                debug!(discarded = vertices.len(), "polygon mode off");
                Self::teardown(&vertices)
            }
        }
    }

    /// Handle pointer input.
    ///
    /// `frame` maps screen positions to data coordinates; `meshes` is
    /// consulted when the polygon is closed.
    pub fn handle<M: MeshLookup + ?Sized>(
        &mut self,
        event: PointerEvent,
        frame: &PlotFrame,
        meshes: &M,
    ) -> Vec<PolygonEffect> {
        let PolygonState::Drawing { vertices } = &mut self.state else {
            return Vec::new();
        };

        match event {
            PointerEvent::Press {
                button: PointerButton::Primary,
                position,
            } => {
                let Some(vertex) = frame.to_data(position) else {
                    return Vec::new();
                };
                vertices.push(vertex);
                debug!(x = vertex.x, y = vertex.y, count = vertices.len(), "polygon vertex");
                build_polygon_preview(vertices)
                    .map(PolygonEffect::ShowPreview)
                    .into_iter()
                    .collect()
            }
            PointerEvent::Press {
                button: PointerButton::Auxiliary,
                ..
            } => Vec::new(),
            PointerEvent::Press {
                button: PointerButton::Secondary,
                ..
            }
            | PointerEvent::DoublePress
            | PointerEvent::Finish => self.finish(meshes),
        }
    }

    fn finish<M: MeshLookup + ?Sized>(&mut self, meshes: &M) -> Vec<PolygonEffect> {
        let vertices = match std::mem::take(&mut self.state) {
            PolygonState::Off => return Vec::new(),
            PolygonState::Drawing { vertices } => vertices,
        };

        let mut effects = Self::teardown(&vertices);
        if vertices.len() < MIN_VERTICES {
            debug!(count = vertices.len(), "polygon aborted");
            return effects;
        }

        let selection = hit_test(&vertices, meshes);
        debug!(
            vertices = vertices.len(),
            nodes = selection.len(),
            "polygon closed"
        );
        if !selection.is_empty() {
            effects.push(PolygonEffect::RequestCode(CodeRequest::for_selection(
                selection,
            )));
        }
        effects
    }

    fn teardown(vertices: &[Point2<f64>]) -> Vec<PolygonEffect> {
        let mut effects = Vec::with_capacity(2);
        if !vertices.is_empty() {
            effects.push(PolygonEffect::ClearPreview);
        }
        effects.push(PolygonEffect::SetCursor(Cursor::Default));
        effects
    }
}
