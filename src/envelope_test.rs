use uuid::Uuid;

use super::*;
use crate::payload::{ActionPayload, Point};
use crate::session::SessionId;

fn sample_envelope(kind: ActionType) -> ActionEnvelope {
    ActionEnvelope {
        board_id: Uuid::nil(),
        kind,
        payload: ActionPayload::brush(
            vec![Point::new(0.1, 0.2), Point::new(0.3, 0.4)],
            "#FFFFFF",
            3.0,
        )
        .unwrap(),
        instance_id: Uuid::new_v4(),
        sender: SessionId::generate(),
    }
}

// =============================================================
// ActionType wire spelling
// =============================================================

#[test]
fn action_type_serializes_screaming_snake() {
    let cases = [
        (ActionType::ObjectAdd, "\"OBJECT_ADD\""),
        (ActionType::ObjectUpdate, "\"OBJECT_UPDATE\""),
        (ActionType::ObjectDelete, "\"OBJECT_DELETE\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
    }
}

#[test]
fn action_type_deserializes_from_wire_spelling() {
    let kind: ActionType = serde_json::from_str("\"OBJECT_DELETE\"").unwrap();
    assert_eq!(kind, ActionType::ObjectDelete);
}

#[test]
fn action_type_rejects_unknown_spelling() {
    assert!(serde_json::from_str::<ActionType>("\"OBJECT_MOVE\"").is_err());
}

// =============================================================
// Envelope codec
// =============================================================

#[test]
fn envelope_roundtrip() {
    let envelope = sample_envelope(ActionType::ObjectAdd);
    let text = encode_envelope(&envelope).unwrap();
    let back = decode_envelope(&text).unwrap();
    assert_eq!(back, envelope);
}

#[test]
fn envelope_wire_field_names_are_camel_case() {
    let envelope = sample_envelope(ActionType::ObjectAdd);
    let text = encode_envelope(&envelope).unwrap();
    assert!(text.contains("\"boardId\""));
    assert!(text.contains("\"instanceId\""));
    assert!(text.contains("\"sender\""));
    assert!(text.contains("\"type\":\"OBJECT_ADD\""));
    assert!(!text.contains("board_id"));
    assert!(!text.contains("instance_id"));
}

#[test]
fn envelope_payload_travels_without_instance_id() {
    let envelope = sample_envelope(ActionType::ObjectAdd);
    let value: serde_json::Value = serde_json::from_str(&encode_envelope(&envelope).unwrap()).unwrap();
    assert!(value["payload"].get("instanceId").is_none());
    assert_eq!(value["payload"]["tool"], "brush");
}

#[test]
fn decode_five_point_brush_envelope() {
    let text = r##"{
        "boardId": "00000000-0000-0000-0000-000000000000",
        "type": "OBJECT_ADD",
        "payload": {
            "tool": "brush",
            "points": [
                {"x": 0.1, "y": 0.1}, {"x": 0.2, "y": 0.2}, {"x": 0.3, "y": 0.3},
                {"x": 0.4, "y": 0.4}, {"x": 0.5, "y": 0.5}
            ],
            "color": "#FFFFFF",
            "lineWidth": 3.0
        },
        "instanceId": "11111111-1111-1111-1111-111111111111",
        "sender": "22222222-2222-2222-2222-222222222222"
    }"##;
    let envelope = decode_envelope(text).unwrap();
    assert_eq!(envelope.kind, ActionType::ObjectAdd);
    match envelope.payload {
        ActionPayload::Brush { ref points, ref color, line_width } => {
            assert_eq!(points.len(), 5);
            assert_eq!(color, "#FFFFFF");
            assert!((line_width - 3.0).abs() < f64::EPSILON);
        }
        ref other => panic!("expected brush payload, got {other:?}"),
    }
}

#[test]
fn decode_unknown_tool_keeps_envelope_usable() {
    let text = r#"{
        "boardId": "00000000-0000-0000-0000-000000000000",
        "type": "OBJECT_ADD",
        "payload": {"tool": "spray", "density": 0.8},
        "instanceId": "11111111-1111-1111-1111-111111111111",
        "sender": "22222222-2222-2222-2222-222222222222"
    }"#;
    let envelope = decode_envelope(text).unwrap();
    assert_eq!(envelope.payload, ActionPayload::Unknown);
}

#[test]
fn decode_rejects_malformed_text() {
    assert!(decode_envelope("not json").is_err());
}

#[test]
fn decode_rejects_missing_fields() {
    assert!(decode_envelope(r#"{"boardId":"00000000-0000-0000-0000-000000000000"}"#).is_err());
}

// =============================================================
// Topic helpers
// =============================================================

#[test]
fn topic_and_destination_embed_board_id() {
    let board = Uuid::nil();
    assert_eq!(board_topic(board), "/topic/board/00000000-0000-0000-0000-000000000000");
    assert_eq!(board_destination(board), "/app/board/00000000-0000-0000-0000-000000000000");
}
