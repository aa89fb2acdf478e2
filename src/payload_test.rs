#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::MIN_SHAPE_SPAN;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(0.3, 0.4);
    assert!((a.distance_to(b) - 0.5).abs() < 1e-12);
}

#[test]
fn point_serde_roundtrip() {
    let p = Point::new(0.25, 0.75);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"x":0.25,"y":0.75}"#);
    let back: Point = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

// =============================================================
// Constructors: strokes
// =============================================================

#[test]
fn brush_accepts_two_points() {
    let payload = ActionPayload::brush(pts(&[(0.1, 0.1), (0.2, 0.2)]), "#FFFFFF", 3.0);
    assert!(payload.is_some());
}

#[test]
fn brush_rejects_single_point() {
    assert!(ActionPayload::brush(pts(&[(0.1, 0.1)]), "#FFFFFF", 3.0).is_none());
}

#[test]
fn brush_rejects_empty_points() {
    assert!(ActionPayload::brush(Vec::new(), "#FFFFFF", 3.0).is_none());
}

#[test]
fn eraser_rejects_single_point() {
    assert!(ActionPayload::eraser(pts(&[(0.5, 0.5)]), "#000", 10.0).is_none());
}

// =============================================================
// Constructors: boxes
// =============================================================

#[test]
fn rectangle_rejects_degenerate_span() {
    // Both dimensions at or below the minimum span: never an envelope.
    let r = ActionPayload::rectangle(0.5, 0.5, MIN_SHAPE_SPAN * 0.5, MIN_SHAPE_SPAN * 0.5, "#000", 1.0, None);
    assert!(r.is_none());
}

#[test]
fn rectangle_accepts_when_one_dimension_viable() {
    let r = ActionPayload::rectangle(0.1, 0.1, 0.4, 0.0, "#000", 1.0, None);
    assert!(r.is_some());
}

#[test]
fn rectangle_rejects_negative_extent() {
    assert!(ActionPayload::rectangle(0.1, 0.1, -0.2, 0.3, "#000", 1.0, None).is_none());
}

#[test]
fn rectangle_rejects_non_finite_extent() {
    assert!(ActionPayload::rectangle(0.1, 0.1, f64::NAN, 0.3, "#000", 1.0, None).is_none());
}

#[test]
fn square_rejects_degenerate_span() {
    assert!(ActionPayload::square(0.0, 0.0, 0.0, 0.0, "#000", 1.0, None).is_none());
}

// =============================================================
// Constructors: circle / triangle / polygon
// =============================================================

#[test]
fn circle_rejects_tiny_radius() {
    assert!(ActionPayload::circle(0.5, 0.5, MIN_SHAPE_SPAN * 0.25, "#000", 1.0, None).is_none());
}

#[test]
fn circle_accepts_viable_radius() {
    assert!(ActionPayload::circle(0.5, 0.5, 0.1, "#000", 1.0, Some("#FFF".to_owned())).is_some());
}

#[test]
fn triangle_rejects_coincident_vertices() {
    let p = Point::new(0.4, 0.4);
    assert!(ActionPayload::triangle([p, p, p], "#000", 1.0, None).is_none());
}

#[test]
fn triangle_accepts_viable_vertices() {
    let t = ActionPayload::triangle(
        [Point::new(0.1, 0.1), Point::new(0.3, 0.1), Point::new(0.2, 0.3)],
        "#000",
        1.0,
        None,
    );
    assert!(t.is_some());
}

#[test]
fn polygon_rejects_two_sides() {
    assert!(ActionPayload::polygon(0.5, 0.5, 0.2, 2, "#000", 1.0, None).is_none());
}

#[test]
fn polygon_rejects_tiny_radius() {
    assert!(ActionPayload::polygon(0.5, 0.5, 0.0, 5, "#000", 1.0, None).is_none());
}

#[test]
fn polygon_accepts_star_shape() {
    assert!(ActionPayload::polygon(0.5, 0.5, 0.2, 5, "#000", 1.0, None).is_some());
}

// =============================================================
// Constructors: text / line / arrow
// =============================================================

#[test]
fn text_rejects_blank_content() {
    assert!(ActionPayload::text(0.1, 0.1, 0.3, 0.2, "   ", 14.0, "#000").is_none());
}

#[test]
fn text_rejects_zero_font_size() {
    assert!(ActionPayload::text(0.1, 0.1, 0.3, 0.2, "hi", 0.0, "#000").is_none());
}

#[test]
fn text_accepts_viable_box() {
    assert!(ActionPayload::text(0.1, 0.1, 0.3, 0.2, "hello", 14.0, "#000").is_some());
}

#[test]
fn line_rejects_coincident_endpoints() {
    let p = Point::new(0.5, 0.5);
    assert!(ActionPayload::line(p, p, "#000", 2.0, None).is_none());
}

#[test]
fn line_accepts_with_dash() {
    let l = ActionPayload::line(Point::new(0.1, 0.1), Point::new(0.9, 0.9), "#000", 2.0, Some(vec![4.0, 2.0]));
    assert!(l.is_some());
}

#[test]
fn arrow_rejects_near_coincident_endpoints() {
    let a = Point::new(0.5, 0.5);
    let b = Point::new(0.5 + MIN_SHAPE_SPAN * 0.1, 0.5);
    assert!(ActionPayload::arrow(a, b, "#000", 2.0).is_none());
}

// =============================================================
// Serde: wire shape
// =============================================================

#[test]
fn brush_serializes_with_tool_tag_and_camel_case() {
    let payload = ActionPayload::brush(pts(&[(0.0, 0.0), (1.0, 1.0)]), "#FFFFFF", 3.0).unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains(r#""tool":"brush""#));
    assert!(json.contains(r#""lineWidth":3.0"#));
    assert!(!json.contains("line_width"));
}

#[test]
fn all_tools_serialize_lowercase() {
    let cases: Vec<(ActionPayload, &str)> = vec![
        (ActionPayload::brush(pts(&[(0.0, 0.0), (1.0, 1.0)]), "#fff", 1.0).unwrap(), "brush"),
        (ActionPayload::eraser(pts(&[(0.0, 0.0), (1.0, 1.0)]), "#fff", 1.0).unwrap(), "eraser"),
        (ActionPayload::square(0.0, 0.0, 0.2, 0.2, "#fff", 1.0, None).unwrap(), "square"),
        (ActionPayload::rectangle(0.0, 0.0, 0.2, 0.1, "#fff", 1.0, None).unwrap(), "rectangle"),
        (ActionPayload::circle(0.5, 0.5, 0.1, "#fff", 1.0, None).unwrap(), "circle"),
        (
            ActionPayload::triangle(
                [Point::new(0.1, 0.1), Point::new(0.3, 0.1), Point::new(0.2, 0.3)],
                "#fff",
                1.0,
                None,
            )
            .unwrap(),
            "triangle",
        ),
        (ActionPayload::polygon(0.5, 0.5, 0.2, 5, "#fff", 1.0, None).unwrap(), "polygon"),
        (ActionPayload::text(0.1, 0.1, 0.3, 0.2, "hi", 12.0, "#fff").unwrap(), "text"),
        (
            ActionPayload::line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), "#fff", 1.0, None).unwrap(),
            "line",
        ),
        (ActionPayload::arrow(Point::new(0.0, 0.0), Point::new(1.0, 1.0), "#fff", 1.0).unwrap(), "arrow"),
    ];
    for (payload, tag) in cases {
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(&format!(r#""tool":"{tag}""#)), "missing tag {tag} in {json}");
    }
}

#[test]
fn fill_color_omitted_when_absent() {
    let payload = ActionPayload::circle(0.5, 0.5, 0.1, "#fff", 1.0, None).unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    assert!(!json.contains("fillColor"));
}

#[test]
fn fill_color_present_when_set() {
    let payload = ActionPayload::circle(0.5, 0.5, 0.1, "#fff", 1.0, Some("#ABCDEF".to_owned())).unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains(r##""fillColor":"#ABCDEF""##));
}

#[test]
fn text_serializes_font_size_camel_case() {
    let payload = ActionPayload::text(0.1, 0.1, 0.3, 0.2, "hi", 12.5, "#000").unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains(r#""fontSize":12.5"#));
}

#[test]
fn payload_serde_roundtrip() {
    let payload = ActionPayload::line(
        Point::new(0.1, 0.2),
        Point::new(0.8, 0.9),
        "#123456",
        2.0,
        Some(vec![6.0, 3.0]),
    )
    .unwrap();
    let json = serde_json::to_string(&payload).unwrap();
    let back: ActionPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payload);
}

// =============================================================
// Serde: forward compatibility
// =============================================================

#[test]
fn unknown_tool_deserializes_to_unknown() {
    let back: ActionPayload =
        serde_json::from_str(r#"{"tool":"hexagon","x":0.1,"y":0.2,"sides":6}"#).unwrap();
    assert_eq!(back, ActionPayload::Unknown);
}

#[test]
fn known_tool_with_extra_fields_still_parses() {
    let back: ActionPayload = serde_json::from_str(
        r##"{"tool":"circle","x":0.5,"y":0.5,"radius":0.1,"color":"#fff","lineWidth":2.0,"glow":true}"##,
    )
    .unwrap();
    assert!(matches!(back, ActionPayload::Circle { .. }));
}
