//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Frame sent by a client.
///
/// Any `from` field in the payload is ignored: the sender is always the
/// authenticated identity of the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub to: String,
    #[serde(default)]
    pub content: String,
}

/// Frame delivered to every connection of the destination identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_message_parses_minimal_payload() {
        // テスト項目: to と content を持つ JSON が InboundMessage にデシリアライズされる
        // given (前提条件):
        let json = r#"{"to":"bob","content":"hi"}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg.to, "bob");
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn test_inbound_message_defaults_missing_content() {
        // テスト項目: content が省略された場合は空文字になる
        // given (前提条件):
        let json = r#"{"to":"bob"}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg.content, "");
    }

    #[test]
    fn test_inbound_message_requires_to() {
        // テスト項目: to が無い JSON はエラーになる
        // given (前提条件):
        let json = r#"{"content":"hi"}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_inbound_message_ignores_forged_from() {
        // テスト項目: ペイロード中の from フィールドは無視される
        // given (前提条件):
        let json = r#"{"from":"mallory","to":"bob","content":"hi"}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            msg,
            InboundMessage {
                to: "bob".to_string(),
                content: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_outbound_message_field_names() {
        // テスト項目: OutboundMessage は from / to / content のキーでシリアライズされる
        // given (前提条件):
        let msg = OutboundMessage {
            from: "alice".to_string(),
            to: "bob".to_string(),
            content: "hi".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({"from": "alice", "to": "bob", "content": "hi"})
        );
    }
}
