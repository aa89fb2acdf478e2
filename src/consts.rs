//! Shared numeric constants for the synchronization engine.

use std::time::Duration;

// ── Gesture validation ──────────────────────────────────────────

/// Minimum normalized span (fraction of canvas size) below which a shape
/// gesture is considered degenerate and dropped.
pub const MIN_SHAPE_SPAN: f64 = 0.004;

/// Minimum number of points for a freehand stroke.
pub const MIN_STROKE_POINTS: usize = 2;

/// Minimum number of sides for a polygon payload.
pub const MIN_POLYGON_SIDES: u32 = 3;

// ── Rendering ───────────────────────────────────────────────────

/// Opacity for actions still awaiting their server echo.
pub const PENDING_ALPHA: f64 = 0.6;

/// Opacity for actions whose publish failed.
pub const FAILED_ALPHA: f64 = 0.3;

/// Arrowhead length as a multiple of the stroke width.
pub const ARROWHEAD_SCALE: f64 = 3.0;

/// Arrowhead length floor in device pixels.
pub const ARROWHEAD_MIN_PX: f64 = 6.0;

/// Arrowhead length ceiling as a fraction of the segment length.
pub const ARROWHEAD_MAX_FRACTION: f64 = 0.4;

/// Arrowhead half-angle in radians (~30°).
pub const ARROWHEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Line height as a multiple of the font size for text layout.
pub const TEXT_LINE_HEIGHT: f64 = 1.25;

// ── Reconciliation ──────────────────────────────────────────────

/// Default age after which an unreconciled `pending` action is marked failed.
pub const DEFAULT_PENDING_TIMEOUT: Duration = Duration::from_secs(10);
