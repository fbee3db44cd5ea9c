//! Input parsing and message formatting for the terminal.

use thiserror::Error;
use yubin_server::infrastructure::dto::websocket::{InboundMessage, OutboundMessage};
use yubin_shared::time::timestamp_to_rfc3339;

/// Why a typed line could not become a message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("expected '<to>: <message>'")]
    MissingSeparator,
    #[error("recipient is empty")]
    EmptyRecipient,
}

/// Parse a `<to>: <content>` line typed at the prompt.
///
/// Only the first `:` separates; the content keeps any further colons.
pub fn parse_input_line(line: &str) -> Result<InboundMessage, InputError> {
    let (to, content) = line.split_once(':').ok_or(InputError::MissingSeparator)?;
    let to = to.trim();
    if to.is_empty() {
        return Err(InputError::EmptyRecipient);
    }
    Ok(InboundMessage {
        to: to.to_string(),
        content: content.trim_start().to_string(),
    })
}

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a message delivered to this identity
    ///
    /// # Arguments
    ///
    /// * `message` - The delivered frame
    /// * `received_at` - Unix timestamp when the frame arrived (milliseconds)
    pub fn format_delivered(message: &OutboundMessage, received_at: i64) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             @{} → @{}: {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            message.from,
            message.to,
            message.content,
            timestamp_to_rfc3339(received_at)
        )
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(to: &str, sent_at: i64) -> String {
        format!("sent to @{} at {}\n", to, timestamp_to_rfc3339(sent_at))
    }

    /// Format a rejected input line
    pub fn format_input_error(error: &InputError) -> String {
        format!("! {}\n", error)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_line() {
        // テスト項目: "<to>: <content>" 形式の入力が InboundMessage に変換される
        // given (前提条件):
        let line = "bob: hello there";

        // when (操作):
        let result = parse_input_line(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InboundMessage {
                to: "bob".to_string(),
                content: "hello there".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_input_line_keeps_later_colons() {
        // テスト項目: 最初の ':' だけが区切りとして扱われる
        // given (前提条件):
        let line = "bob: see you at 10:30";

        // when (操作):
        let result = parse_input_line(line).unwrap();

        // then (期待する結果):
        assert_eq!(result.to, "bob");
        assert_eq!(result.content, "see you at 10:30");
    }

    #[test]
    fn test_parse_input_line_allows_empty_content() {
        // テスト項目: 内容が空のメッセージも送信できる
        // given (前提条件):
        let line = "bob:";

        // when (操作):
        let result = parse_input_line(line).unwrap();

        // then (期待する結果):
        assert_eq!(result.content, "");
    }

    #[test]
    fn test_parse_input_line_rejects_missing_separator() {
        // テスト項目: ':' を含まない入力はエラーになる
        // given (前提条件):
        let line = "hello";

        // when (操作):
        let result = parse_input_line(line);

        // then (期待する結果):
        assert_eq!(result, Err(InputError::MissingSeparator));
    }

    #[test]
    fn test_parse_input_line_rejects_empty_recipient() {
        // テスト項目: 宛先が空の入力はエラーになる
        // given (前提条件):
        let line = "  : hi";

        // when (操作):
        let result = parse_input_line(line);

        // then (期待する結果):
        assert_eq!(result, Err(InputError::EmptyRecipient));
    }

    #[test]
    fn test_format_delivered() {
        // テスト項目: 受信メッセージが送信者・宛先・内容・受信時刻付きでフォーマットされる
        // given (前提条件):
        let message = OutboundMessage {
            from: "alice".to_string(),
            to: "bob".to_string(),
            content: "Hello, world!".to_string(),
        };
        let received_at = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_delivered(&message, received_at);

        // then (期待する結果):
        assert!(result.contains("@alice → @bob: Hello, world!"));
        assert!(result.contains("received at 2023-01-01T00:00:00.000Z"));
        assert!(result.contains("------------------------------------------------------------"));
    }

    #[test]
    fn test_format_sent_confirmation() {
        // テスト項目: 送信確認メッセージが正しくフォーマットされる
        // given (前提条件):
        let sent_at = 1672531200000;

        // when (操作):
        let result = MessageFormatter::format_sent_confirmation("bob", sent_at);

        // then (期待する結果):
        assert_eq!(result, "sent to @bob at 2023-01-01T00:00:00.000Z\n");
    }

    #[test]
    fn test_format_input_error() {
        // テスト項目: 入力エラーが理由付きで表示される
        // given (前提条件):
        let error = InputError::MissingSeparator;

        // when (操作):
        let result = MessageFormatter::format_input_error(&error);

        // then (期待する結果):
        assert!(result.contains("expected '<to>: <message>'"));
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージ通知が正しくフォーマットされる
        // given (前提条件):
        let byte_count = 1024;

        // when (操作):
        let result = MessageFormatter::format_binary_message(byte_count);

        // then (期待する結果):
        assert!(result.contains("1024 bytes"));
        assert!(result.contains("Received"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 生メッセージが正しくフォーマットされる
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
