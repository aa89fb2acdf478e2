//! Rendering: deterministic replay of the action list onto a 2D surface.
//!
//! This module is the only place that issues drawing commands. It receives a
//! read-only view of the canonical action list and produces pixels through
//! the [`Surface`] abstraction — it never mutates engine state. The host
//! (browser canvas, test double, headless raster) implements `Surface`.
//!
//! All geometry is stored normalized; it is multiplied by the surface's
//! *current* pixel dimensions on every draw, never cached in pixel space, so
//! a resize followed by a redraw is correct without refetching data.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use crate::consts::{
    ARROWHEAD_ANGLE, ARROWHEAD_MAX_FRACTION, ARROWHEAD_MIN_PX, ARROWHEAD_SCALE, FAILED_ALPHA,
    PENDING_ALPHA, TEXT_LINE_HEIGHT,
};
use crate::oplog::{TrackedAction, TransactionStatus};
use crate::payload::{ActionPayload, Point};

/// Pixel compositing mode for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal painting.
    SourceOver,
    /// Erase: drawn pixels reveal the background.
    DestinationOut,
}

/// The subset of a Canvas2D-style context the replay renderer needs.
///
/// `save`/`restore` snapshot and restore style state (colors, line width,
/// dash, alpha, composite mode, clip), matching Canvas2D semantics.
pub trait Surface {
    /// Current drawing width in pixels.
    fn width(&self) -> f64;
    /// Current drawing height in pixels.
    fn height(&self) -> f64;
    /// Clear the whole surface.
    fn clear(&mut self);
    /// Push the current style/clip state.
    fn save(&mut self);
    /// Pop the most recently pushed style/clip state.
    fn restore(&mut self);
    /// Set the stroke color (CSS color string).
    fn set_stroke_color(&mut self, color: &str);
    /// Set the fill color (CSS color string).
    fn set_fill_color(&mut self, color: &str);
    /// Set the stroke width in pixels.
    fn set_line_width(&mut self, width: f64);
    /// Set the stroke dash pattern; an empty slice means solid.
    fn set_line_dash(&mut self, segments: &[f64]);
    /// Set the global opacity for subsequent drawing.
    fn set_global_alpha(&mut self, alpha: f64);
    /// Set the compositing mode for subsequent drawing.
    fn set_composite_mode(&mut self, mode: CompositeMode);
    /// Set the font size in pixels for subsequent text.
    fn set_font_size(&mut self, px: f64);
    /// Begin a new path.
    fn begin_path(&mut self);
    /// Move the path cursor without drawing.
    fn move_to(&mut self, x: f64, y: f64);
    /// Extend the path with a straight segment.
    fn line_to(&mut self, x: f64, y: f64);
    /// Extend the path with a circular arc.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    /// Close the current subpath.
    fn close_path(&mut self);
    /// Stroke the current path.
    fn stroke(&mut self);
    /// Fill the current path.
    fn fill(&mut self);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Intersect the clip region with an axis-aligned rectangle.
    fn clip_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Draw text anchored at the left edge of its baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Measured width of text at the current font size, in pixels.
    fn measure_text(&self, text: &str) -> f64;
}

/// Clear the surface and replay every action in list order.
///
/// Later entries draw on top (last-write-wins visually). Unrecognized
/// payloads are skipped, never fatal.
pub fn draw(surface: &mut dyn Surface, actions: &[TrackedAction]) {
    surface.clear();
    for action in actions {
        draw_action(surface, action);
    }
}

fn draw_action(surface: &mut dyn Surface, action: &TrackedAction) {
    if matches!(action.payload, ActionPayload::Unknown) {
        return;
    }
    surface.save();
    surface.set_global_alpha(status_alpha(action.effective_status()));
    draw_payload(surface, &action.payload);
    surface.restore();
}

/// Opacity for an entry: in-flight actions are dimmed, failed ones more so.
fn status_alpha(status: TransactionStatus) -> f64 {
    match status {
        TransactionStatus::Confirmed => 1.0,
        TransactionStatus::Pending | TransactionStatus::Sending => PENDING_ALPHA,
        TransactionStatus::Failed => FAILED_ALPHA,
    }
}

// =============================================================
// Payload dispatch
// =============================================================

fn draw_payload(surface: &mut dyn Surface, payload: &ActionPayload) {
    match payload {
        ActionPayload::Brush { points, color, line_width } => {
            draw_stroke(surface, points, color, *line_width, false);
        }
        ActionPayload::Eraser { points, line_width, .. } => {
            // Color is irrelevant under destination-out.
            draw_stroke(surface, points, "#000", *line_width, true);
        }
        ActionPayload::Square { x, y, width, height, color, line_width, fill_color }
        | ActionPayload::Rectangle { x, y, width, height, color, line_width, fill_color } => {
            draw_box(surface, *x, *y, *width, *height, color, *line_width, fill_color.as_deref());
        }
        ActionPayload::Circle { x, y, radius, color, line_width, fill_color } => {
            draw_circle(surface, *x, *y, *radius, color, *line_width, fill_color.as_deref());
        }
        ActionPayload::Triangle { points, color, line_width, fill_color } => {
            draw_closed_path(surface, points, color, *line_width, fill_color.as_deref());
        }
        ActionPayload::Polygon { x, y, radius, sides, color, line_width, fill_color } => {
            let vertices = polygon_vertices(*x, *y, *radius, *sides);
            draw_closed_path(surface, &vertices, color, *line_width, fill_color.as_deref());
        }
        ActionPayload::Text { x, y, width, height, text, font_size, color } => {
            draw_text_box(surface, *x, *y, *width, *height, text, *font_size, color);
        }
        ActionPayload::Line { from, to, color, line_width, dash } => {
            draw_segment(surface, *from, *to, color, *line_width, dash.as_deref());
        }
        ActionPayload::Arrow { from, to, color, line_width } => {
            draw_arrow(surface, *from, *to, color, *line_width);
        }
        ActionPayload::Unknown => {}
    }
}

// =============================================================
// Strokes
// =============================================================

fn draw_stroke(surface: &mut dyn Surface, points: &[Point], color: &str, line_width: f64, erase: bool) {
    if points.len() < 2 {
        return;
    }
    let (w, h) = (surface.width(), surface.height());

    if erase {
        surface.set_composite_mode(CompositeMode::DestinationOut);
    }
    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    surface.begin_path();
    surface.move_to(points[0].x * w, points[0].y * h);
    for p in &points[1..] {
        surface.line_to(p.x * w, p.y * h);
    }
    surface.stroke();
    if erase {
        // Reset so subsequent shapes paint normally.
        surface.set_composite_mode(CompositeMode::SourceOver);
    }
}

// =============================================================
// Shapes
// =============================================================

fn draw_box(
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &str,
    line_width: f64,
    fill_color: Option<&str>,
) {
    let (w, h) = (surface.width(), surface.height());
    let (px, py, pw, ph) = (x * w, y * h, width * w, height * h);

    if let Some(fill) = fill_color {
        surface.set_fill_color(fill);
        surface.fill_rect(px, py, pw, ph);
    }
    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    surface.stroke_rect(px, py, pw, ph);
}

fn draw_circle(
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    radius: f64,
    color: &str,
    line_width: f64,
    fill_color: Option<&str>,
) {
    let (w, h) = (surface.width(), surface.height());
    // Radius scales with the smaller dimension so circles stay circular
    // across aspect-ratio changes.
    let r = radius * w.min(h);

    surface.begin_path();
    surface.arc(x * w, y * h, r, 0.0, 2.0 * PI);
    if let Some(fill) = fill_color {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    surface.stroke();
}

fn draw_closed_path(
    surface: &mut dyn Surface,
    points: &[Point],
    color: &str,
    line_width: f64,
    fill_color: Option<&str>,
) {
    if points.len() < 3 {
        return;
    }
    let (w, h) = (surface.width(), surface.height());

    surface.begin_path();
    surface.move_to(points[0].x * w, points[0].y * h);
    for p in &points[1..] {
        surface.line_to(p.x * w, p.y * h);
    }
    surface.close_path();
    if let Some(fill) = fill_color {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    surface.stroke();
}

/// Vertices of a regular polygon in normalized coordinates, first vertex at
/// the top.
fn polygon_vertices(cx: f64, cy: f64, radius: f64, sides: u32) -> Vec<Point> {
    let offset = std::f64::consts::FRAC_PI_2;
    (0..sides)
        .map(|i| {
            let angle = (2.0 * PI * f64::from(i)) / f64::from(sides) - offset;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

// =============================================================
// Segments and arrows
// =============================================================

fn draw_segment(
    surface: &mut dyn Surface,
    from: Point,
    to: Point,
    color: &str,
    line_width: f64,
    dash: Option<&[f64]>,
) {
    let (w, h) = (surface.width(), surface.height());

    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    if let Some(segments) = dash {
        surface.set_line_dash(segments);
    }
    surface.begin_path();
    surface.move_to(from.x * w, from.y * h);
    surface.line_to(to.x * w, to.y * h);
    surface.stroke();
    if dash.is_some() {
        surface.set_line_dash(&[]);
    }
}

fn draw_arrow(surface: &mut dyn Surface, from: Point, to: Point, color: &str, line_width: f64) {
    let (w, h) = (surface.width(), surface.height());
    let (ax, ay) = (from.x * w, from.y * h);
    let (bx, by) = (to.x * w, to.y * h);

    surface.set_stroke_color(color);
    surface.set_line_width(line_width);
    surface.begin_path();
    surface.move_to(ax, ay);
    surface.line_to(bx, by);
    surface.stroke();

    let len = (bx - ax).hypot(by - ay);
    if len <= 0.0 {
        return;
    }
    let head = arrowhead_length(line_width, len);
    let angle = (by - ay).atan2(bx - ax);

    let x1 = bx - head * (angle - ARROWHEAD_ANGLE).cos();
    let y1 = by - head * (angle - ARROWHEAD_ANGLE).sin();
    let x2 = bx - head * (angle + ARROWHEAD_ANGLE).cos();
    let y2 = by - head * (angle + ARROWHEAD_ANGLE).sin();

    surface.set_fill_color(color);
    surface.begin_path();
    surface.move_to(bx, by);
    surface.line_to(x1, y1);
    surface.line_to(x2, y2);
    surface.close_path();
    surface.fill();
}

/// Arrowhead length in pixels: proportional to stroke width, capped against
/// the segment length, floored so very short arrows still show a head.
fn arrowhead_length(line_width: f64, segment_len: f64) -> f64 {
    (line_width * ARROWHEAD_SCALE)
        .max(ARROWHEAD_MIN_PX)
        .min(segment_len * ARROWHEAD_MAX_FRACTION)
        .max(2.0)
}

// =============================================================
// Text
// =============================================================

#[allow(clippy::too_many_arguments)]
fn draw_text_box(
    surface: &mut dyn Surface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    text: &str,
    font_size: f64,
    color: &str,
) {
    if text.is_empty() || font_size <= 0.0 {
        return;
    }
    let (w, h) = (surface.width(), surface.height());
    let (px, py, pw, ph) = (x * w, y * h, width * w, height * h);

    surface.save();
    surface.clip_rect(px, py, pw, ph);
    surface.set_font_size(font_size);
    surface.set_fill_color(color);

    let line_height = (font_size * TEXT_LINE_HEIGHT).max(1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_lines = ((ph / line_height).floor() as usize).max(1);
    let max_w = pw.max(1.0);

    let mut lines = wrap_text_lines(surface, text, max_w);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = fit_text_with_ellipsis(surface, last, max_w);
        }
    }
    for (idx, line) in lines.iter().enumerate() {
        let baseline = py + (idx as f64).mul_add(line_height, font_size);
        surface.fill_text(line, px, baseline);
    }
    surface.restore();
}

/// Word-wrap text to a pixel width, breaking overlong words character-wise.
fn wrap_text_lines(surface: &dyn Surface, text: &str, max_w: f64) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            if current.is_empty() {
                if surface.measure_text(word) <= max_w {
                    current.push_str(word);
                } else {
                    let mut chunks = break_long_word(surface, word, max_w);
                    if let Some(last) = chunks.pop() {
                        out.extend(chunks);
                        current = last;
                    }
                }
                continue;
            }

            let candidate = format!("{current} {word}");
            if surface.measure_text(&candidate) <= max_w {
                current = candidate;
            } else {
                out.push(std::mem::take(&mut current));
                if surface.measure_text(word) <= max_w {
                    current = word.to_owned();
                } else {
                    let mut chunks = break_long_word(surface, word, max_w);
                    if let Some(last) = chunks.pop() {
                        out.extend(chunks);
                        current = last;
                    }
                }
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn break_long_word(surface: &dyn Surface, word: &str, max_w: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && surface.measure_text(&candidate) > max_w {
            lines.push(current);
            current = ch.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Append a trailing ellipsis to the last visible line, trimming characters
/// until the result fits the pixel width.
fn fit_text_with_ellipsis(surface: &dyn Surface, text: &str, max_w: f64) -> String {
    let ellipsis = "...";
    let mut chars: Vec<char> = text.trim_end().chars().collect();
    loop {
        let candidate = format!("{}{}", chars.iter().collect::<String>().trim_end(), ellipsis);
        if chars.is_empty() || surface.measure_text(&candidate) <= max_w {
            return candidate;
        }
        chars.pop();
    }
}
