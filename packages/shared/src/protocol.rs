//! Wire protocol of the drawing relay.
//!
//! Every event travels as one WebSocket text frame holding a JSON envelope:
//!
//! ```text
//! {"event":"draw","data":{"x0":0,"y0":0,"x1":10,"y1":10,"color":"#ff0000","brushSize":3}}
//! {"event":"clear"}
//! ```
//!
//! The server only inspects the envelope header (`inspect_frame`) and relays
//! the frame text untouched. Clients use the typed `WireEvent`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::IgnoredAny};
use thiserror::Error;

/// Canonical frame sent to recipients of a clear signal
pub const CLEAR_FRAME: &str = r#"{"event":"clear"}"#;

/// Background color of the shared canvas. The eraser paints with it.
pub const BACKGROUND_COLOR: &str = "#ffffff";

/// Protocol-level errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The `event` tag is not one the relay knows
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// The event requires a payload but none was present
    #[error("Event '{0}' requires a payload")]
    MissingPayload(EventKind),

    /// The frame is not a JSON envelope
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),
}

/// Event kinds carried by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// One line segment to render
    Draw,
    /// Reset the shared canvas
    Clear,
}

impl EventKind {
    /// Tag used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Draw => "draw",
            EventKind::Clear => "clear",
        }
    }

    /// Whether frames of this kind must carry a `data` payload
    pub fn requires_payload(&self) -> bool {
        matches!(self, EventKind::Draw)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(EventKind::Draw),
            "clear" => Ok(EventKind::Clear),
            other => Err(ProtocolError::UnknownEvent(other.to_string())),
        }
    }
}

/// A single line segment of a freehand stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeSegment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    /// Hex color string, e.g. `#ff0000`
    pub color: String,
    /// Stroke width in pixels
    pub brush_size: f64,
}

/// Typed view of a relay frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum WireEvent {
    Draw(StrokeSegment),
    Clear,
}

impl WireEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WireEvent::Draw(_) => EventKind::Draw,
            WireEvent::Clear => EventKind::Clear,
        }
    }

    /// Serialize into a frame body
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::MalformedFrame(e.to_string()))
    }

    /// Parse a frame body
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(|e| ProtocolError::MalformedFrame(e.to_string()))
    }
}

/// Envelope header. The payload is skipped, only its presence is recorded.
#[derive(Debug, Deserialize)]
struct EnvelopeHeader {
    event: String,
    #[serde(default)]
    data: Option<IgnoredAny>,
}

/// Resolve the event kind of an inbound frame without interpreting its payload.
///
/// # Errors
///
/// - `MalformedFrame` if the text is not a JSON object with a string `event` field
/// - `UnknownEvent` if the tag is not a known `EventKind`
/// - `MissingPayload` if the kind requires `data` and it is absent or `null`
pub fn inspect_frame(text: &str) -> Result<EventKind, ProtocolError> {
    let header: EnvelopeHeader =
        serde_json::from_str(text).map_err(|e| ProtocolError::MalformedFrame(e.to_string()))?;
    let kind: EventKind = header.event.parse()?;

    if kind.requires_payload() && header.data.is_none() {
        return Err(ProtocolError::MissingPayload(kind));
    }

    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_segment() -> StrokeSegment {
        StrokeSegment {
            x0: 0.0,
            y0: 0.0,
            x1: 10.0,
            y1: 10.0,
            color: "#ff0000".to_string(),
            brush_size: 3.0,
        }
    }

    #[test]
    fn test_draw_event_uses_camel_case_brush_size() {
        // テスト項目: draw イベントが brushSize フィールド名でシリアライズされる
        // given (前提条件):
        let event = WireEvent::Draw(sample_segment());

        // when (操作):
        let json = event.to_json().unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "draw");
        assert_eq!(value["data"]["brushSize"], 3.0);
        assert_eq!(value["data"]["color"], "#ff0000");
        assert!(value["data"].get("brush_size").is_none());
    }

    #[test]
    fn test_clear_event_matches_canonical_frame() {
        // テスト項目: clear イベントは正規のフレーム文字列と一致する
        // given (前提条件):
        let event = WireEvent::Clear;

        // when (操作):
        let json = event.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, CLEAR_FRAME);
    }

    #[test]
    fn test_parse_draw_frame_from_browser_client() {
        // テスト項目: ブラウザクライアント形式（整数座標）の draw フレームをパースできる
        // given (前提条件):
        let text = r##"{"event":"draw","data":{"x0":0,"y0":0,"x1":10,"y1":10,"color":"#ff0000","brushSize":3}}"##;

        // when (操作):
        let event = WireEvent::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(event, WireEvent::Draw(sample_segment()));
        assert_eq!(event.kind(), EventKind::Draw);
    }

    #[test]
    fn test_inspect_frame_draw() {
        // テスト項目: draw フレームの種別が判定される
        // given (前提条件):
        let text = r##"{"event":"draw","data":{"x0":1}}"##;

        // when (操作):
        let kind = inspect_frame(text);

        // then (期待する結果): ペイロードの中身は検証しない
        assert_eq!(kind, Ok(EventKind::Draw));
    }

    #[test]
    fn test_inspect_frame_clear_without_payload() {
        // テスト項目: clear フレームはペイロードなしで受理される
        // given (前提条件):
        let text = CLEAR_FRAME;

        // when (操作):
        let kind = inspect_frame(text);

        // then (期待する結果):
        assert_eq!(kind, Ok(EventKind::Clear));
    }

    #[test]
    fn test_inspect_frame_draw_without_payload() {
        // テスト項目: ペイロードのない draw フレームは拒否される
        // given (前提条件):
        let missing = r#"{"event":"draw"}"#;
        let null = r#"{"event":"draw","data":null}"#;

        // when (操作):
        let missing_result = inspect_frame(missing);
        let null_result = inspect_frame(null);

        // then (期待する結果):
        assert_eq!(
            missing_result,
            Err(ProtocolError::MissingPayload(EventKind::Draw))
        );
        assert_eq!(
            null_result,
            Err(ProtocolError::MissingPayload(EventKind::Draw))
        );
    }

    #[test]
    fn test_inspect_frame_unknown_event() {
        // テスト項目: 未知のイベント名は UnknownEvent になる
        // given (前提条件):
        let text = r#"{"event":"chat","data":"hello"}"#;

        // when (操作):
        let kind = inspect_frame(text);

        // then (期待する結果):
        assert_eq!(kind, Err(ProtocolError::UnknownEvent("chat".to_string())));
    }

    #[test]
    fn test_inspect_frame_not_json() {
        // テスト項目: JSON でないフレームは MalformedFrame になる
        // given (前提条件):
        let text = "hello";

        // when (操作):
        let kind = inspect_frame(text);

        // then (期待する結果):
        assert!(matches!(kind, Err(ProtocolError::MalformedFrame(_))));
    }

    #[test]
    fn test_event_kind_from_str() {
        // テスト項目: イベント名と EventKind が相互に変換できる
        // given (前提条件):
        let kinds = [EventKind::Draw, EventKind::Clear];

        // when (操作) / then (期待する結果):
        for kind in kinds {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
        assert!("Draw".parse::<EventKind>().is_err());
    }
}
