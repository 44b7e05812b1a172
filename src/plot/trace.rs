//! Rendering traces.
//!
//! A [`Trace`] is one batch of points or line segments handed to the rendering
//! engine. It serializes to the engine's JSON trace shape; path breaks are
//! encoded as `null` coordinates.

use nalgebra::Point2;
use serde::Serialize;

/// Rendering backend for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    /// SVG scatter, used for the small polygon overlay.
    Scatter,
    /// WebGL scatter, used for mesh traces.
    Scattergl,
}

/// How a trace's points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Connected polyline.
    #[serde(rename = "lines")]
    Lines,
    /// Individual markers.
    #[serde(rename = "markers")]
    Markers,
    /// Polyline with a marker on every vertex.
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// Line styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    /// Named color.
    pub color: &'static str,
    /// Width in pixels.
    pub width: f64,
}

/// Marker styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    /// Named color.
    pub color: &'static str,
    /// Diameter in pixels.
    pub size: f64,
    /// Marker symbol; the engine default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
}

/// A batch of renderable points.
///
/// Traces carry no node identity. The rendering engine reports hits as
/// (trace position, point offset) and the caller maps those back to nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Rendering backend.
    #[serde(rename = "type")]
    pub kind: TraceType,
    /// Drawing mode.
    pub mode: Mode,
    /// X coordinates; `None` breaks the path.
    pub x: Vec<Option<f64>>,
    /// Y coordinates; `None` breaks the path.
    pub y: Vec<Option<f64>>,
    /// Line styling, for traces drawn with lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    /// Marker styling, for traces drawn with markers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
    /// Per-point hover text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    /// Hover behaviour override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    /// Legend label.
    pub name: String,
    /// Whether the trace appears in the legend.
    pub showlegend: bool,
}

impl Trace {
    /// Create an empty trace.
    pub fn new(kind: TraceType, mode: Mode, name: impl Into<String>) -> Self {
        Self {
            kind,
            mode,
            x: Vec::new(),
            y: Vec::new(),
            line: None,
            marker: None,
            text: Vec::new(),
            hoverinfo: None,
            name: name.into(),
            showlegend: true,
        }
    }

    /// Append a point.
    pub fn push(&mut self, p: Point2<f64>) {
        self.x.push(Some(p.x));
        self.y.push(Some(p.y));
    }

    /// Append a path break.
    pub fn push_break(&mut self) {
        self.x.push(None);
        self.y.push(None);
    }

    /// Number of entries, path breaks included.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the trace holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The point at `offset`, or `None` for a path break or out-of-range offset.
    pub fn point(&self, offset: usize) -> Option<Point2<f64>> {
        match (self.x.get(offset)?, self.y.get(offset)?) {
            (Some(x), Some(y)) => Some(Point2::new(*x, *y)),
            _ => None,
        }
    }
}
