//! Planar geometry helpers.
//!
//! - [`point_in_polygon`]: even-odd ray casting against an implicitly closed polygon
//! - [`PlotFrame`]: maps pointer positions in screen pixels to plot data coordinates

use nalgebra::Point2;

/// Denominator floor for edges whose endpoints share (almost) the same `y`.
const EDGE_EPSILON: f64 = 1e-12;

/// Test whether `p` lies inside `polygon` using even-odd ray casting.
///
/// The polygon is closed implicitly from its last vertex back to the first.
/// A horizontal ray is cast towards `+x`; an edge counts as crossed when its
/// endpoints lie on opposite sides of `p.y` (lower endpoint inclusive, upper
/// exclusive) and the crossing lies strictly right of `p.x`.
///
/// Points exactly on the boundary follow from that rule: for an axis-aligned
/// square, points on the left and bottom edges are inside, points on the
/// right and top edges are outside.
///
/// # Example
///
/// ```
/// use meshcode::geometry::point_in_polygon;
/// use nalgebra::Point2;
///
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert!(point_in_polygon(&Point2::new(0.5, 0.5), &square));
/// assert!(!point_in_polygon(&Point2::new(2.0, 2.0), &square));
/// ```
pub fn point_in_polygon(p: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let mut dy = pj.y - pi.y;
            if dy.abs() < EDGE_EPSILON {
                dy = EDGE_EPSILON.copysign(dy);
            }
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / dy + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Margins around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margin {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
}

/// Current layout of the rendering surface.
///
/// Captures everything needed to invert the screen-to-plot projection: where
/// the surface sits on screen, its size, the margins around the axes and the
/// visible axis ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    /// Screen position of the surface's top-left corner.
    pub origin: Point2<f64>,
    /// Total surface width in pixels, margins included.
    pub width: f64,
    /// Total surface height in pixels, margins included.
    pub height: f64,
    /// Margins around the axes.
    pub margin: Margin,
    /// Visible x-axis range `(xmin, xmax)`.
    pub x_range: (f64, f64),
    /// Visible y-axis range `(ymin, ymax)`.
    pub y_range: (f64, f64),
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self {
            origin: Point2::origin(),
            width: 1.0,
            height: 1.0,
            margin: Margin::default(),
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
    }
}

impl PlotFrame {
    /// Create a frame of the given pixel size showing the given axis ranges.
    pub fn new(width: f64, height: f64, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            width,
            height,
            x_range,
            y_range,
            ..Self::default()
        }
    }

    /// Set the margins around the axes.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Set the screen position of the surface.
    pub fn with_origin(mut self, origin: Point2<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Width of the area inside the margins.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the area inside the margins.
    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Convert a screen position to plot data coordinates.
    ///
    /// The y axis is flipped: screen rows grow downwards, data grows upwards.
    /// Returns `None` when the plotting area has no extent.
    pub fn to_data(&self, screen: Point2<f64>) -> Option<Point2<f64>> {
        let (plot_width, plot_height) = (self.plot_width(), self.plot_height());
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return None;
        }

        let rx = (screen.x - self.origin.x - self.margin.left) / plot_width;
        let ry = (screen.y - self.origin.y - self.margin.top) / plot_height;
        let (xmin, xmax) = self.x_range;
        let (ymin, ymax) = self.y_range;

        Some(Point2::new(
            xmin + rx * (xmax - xmin),
            ymax - ry * (ymax - ymin),
        ))
    }
}
