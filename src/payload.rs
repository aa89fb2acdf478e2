//! Action payload model: the drawable primitives exchanged between clients.
//!
//! Every variant of [`ActionPayload`] describes one discrete drawing
//! operation in **normalized coordinates** — floating point in `[0, 1]`
//! relative to the canvas width/height at creation time — so a replay is
//! correct at any canvas resolution. Payloads are pure data; construction
//! helpers validate raw gesture geometry and return `None` for degenerate
//! shapes so callers never put an unviewable action on the wire.
//!
//! Instance ids are deliberately *not* part of the payload: they travel on
//! the envelope and are re-associated with the payload on receipt.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_POLYGON_SIDES, MIN_SHAPE_SPAN, MIN_STROKE_POINTS};

/// A 2D point in normalized canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position as a fraction of canvas width.
    pub x: f64,
    /// Vertical position as a fraction of canvas height.
    pub y: f64,
}

impl Point {
    /// Construct a point from normalized coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in normalized space.
    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One drawable action, tagged by `tool` on the wire.
///
/// The [`ActionPayload::Unknown`] variant absorbs tool discriminants added
/// by newer peers; the renderer skips it instead of failing, so a stale
/// client never crashes on a forward-version broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ActionPayload {
    /// Freehand stroke painted with the brush.
    Brush {
        /// Ordered stroke points, at least two.
        points: Vec<Point>,
        /// Stroke color as a CSS color string.
        color: String,
        /// Stroke width in device pixels.
        line_width: f64,
    },
    /// Freehand stroke that reveals the background instead of painting.
    Eraser {
        /// Ordered stroke points, at least two.
        points: Vec<Point>,
        /// Carried for wire symmetry; composite mode ignores it.
        color: String,
        /// Stroke width in device pixels.
        line_width: f64,
    },
    /// Axis-aligned square (top-left + extents).
    Square {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
    /// Axis-aligned rectangle (top-left + extents).
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
    /// Circle (center + radius).
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
    /// Triangle given by three vertices.
    Triangle {
        points: [Point; 3],
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
    /// Regular polygon or star (center + circumradius + side count).
    Polygon {
        x: f64,
        y: f64,
        radius: f64,
        sides: u32,
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
    /// Text box with word-wrapped content.
    Text {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
        font_size: f64,
        color: String,
    },
    /// Straight line segment, optionally dashed.
    Line {
        from: Point,
        to: Point,
        color: String,
        line_width: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        dash: Option<Vec<f64>>,
    },
    /// Directed arrow; the head is computed at render time.
    Arrow {
        from: Point,
        to: Point,
        color: String,
        line_width: f64,
    },
    /// Tool discriminant this client version does not recognize.
    #[serde(other)]
    Unknown,
}

impl ActionPayload {
    /// Build a brush stroke. Returns `None` for fewer than two points.
    #[must_use]
    pub fn brush(points: Vec<Point>, color: impl Into<String>, line_width: f64) -> Option<Self> {
        if points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(Self::Brush { points, color: color.into(), line_width })
    }

    /// Build an eraser stroke. Returns `None` for fewer than two points.
    #[must_use]
    pub fn eraser(points: Vec<Point>, color: impl Into<String>, line_width: f64) -> Option<Self> {
        if points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(Self::Eraser { points, color: color.into(), line_width })
    }

    /// Build a square. Returns `None` for a degenerate span.
    #[must_use]
    pub fn square(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: impl Into<String>,
        line_width: f64,
        fill_color: Option<String>,
    ) -> Option<Self> {
        if !box_is_viable(width, height) {
            return None;
        }
        Some(Self::Square { x, y, width, height, color: color.into(), line_width, fill_color })
    }

    /// Build a rectangle. Returns `None` for a degenerate span.
    #[must_use]
    pub fn rectangle(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: impl Into<String>,
        line_width: f64,
        fill_color: Option<String>,
    ) -> Option<Self> {
        if !box_is_viable(width, height) {
            return None;
        }
        Some(Self::Rectangle { x, y, width, height, color: color.into(), line_width, fill_color })
    }

    /// Build a circle. Returns `None` for a degenerate radius.
    #[must_use]
    pub fn circle(
        x: f64,
        y: f64,
        radius: f64,
        color: impl Into<String>,
        line_width: f64,
        fill_color: Option<String>,
    ) -> Option<Self> {
        if !radius.is_finite() || radius * 2.0 < MIN_SHAPE_SPAN {
            return None;
        }
        Some(Self::Circle { x, y, radius, color: color.into(), line_width, fill_color })
    }

    /// Build a triangle. Returns `None` when the vertices span a degenerate box.
    #[must_use]
    pub fn triangle(
        points: [Point; 3],
        color: impl Into<String>,
        line_width: f64,
        fill_color: Option<String>,
    ) -> Option<Self> {
        let xs = points.map(|p| p.x);
        let ys = points.map(|p| p.y);
        let span_x = max_of(xs) - min_of(xs);
        let span_y = max_of(ys) - min_of(ys);
        if !box_is_viable(span_x, span_y) {
            return None;
        }
        Some(Self::Triangle { points, color: color.into(), line_width, fill_color })
    }

    /// Build a regular polygon/star. Returns `None` for a degenerate radius
    /// or fewer than three sides.
    #[must_use]
    pub fn polygon(
        x: f64,
        y: f64,
        radius: f64,
        sides: u32,
        color: impl Into<String>,
        line_width: f64,
        fill_color: Option<String>,
    ) -> Option<Self> {
        if sides < MIN_POLYGON_SIDES || !radius.is_finite() || radius * 2.0 < MIN_SHAPE_SPAN {
            return None;
        }
        Some(Self::Polygon { x, y, radius, sides, color: color.into(), line_width, fill_color })
    }

    /// Build a text box. Returns `None` for blank text, a non-positive font
    /// size, or a degenerate box.
    #[must_use]
    pub fn text(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: impl Into<String>,
        font_size: f64,
        color: impl Into<String>,
    ) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() || font_size <= 0.0 || !box_is_viable(width, height) {
            return None;
        }
        Some(Self::Text { x, y, width, height, text, font_size, color: color.into() })
    }

    /// Build a straight (optionally dashed) line. Returns `None` when the
    /// endpoints are closer than the minimum span.
    #[must_use]
    pub fn line(
        from: Point,
        to: Point,
        color: impl Into<String>,
        line_width: f64,
        dash: Option<Vec<f64>>,
    ) -> Option<Self> {
        if from.distance_to(to) < MIN_SHAPE_SPAN {
            return None;
        }
        Some(Self::Line { from, to, color: color.into(), line_width, dash })
    }

    /// Build an arrow. Returns `None` when the endpoints are closer than the
    /// minimum span.
    #[must_use]
    pub fn arrow(from: Point, to: Point, color: impl Into<String>, line_width: f64) -> Option<Self> {
        if from.distance_to(to) < MIN_SHAPE_SPAN {
            return None;
        }
        Some(Self::Arrow { from, to, color: color.into(), line_width })
    }
}

/// A box is viable when its extents are finite, non-negative, and its larger
/// side reaches the minimum span.
fn box_is_viable(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 && width.max(height) >= MIN_SHAPE_SPAN
}

fn min_of(values: [f64; 3]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: [f64; 3]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
