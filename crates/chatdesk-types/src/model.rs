use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TITLE_MAX_CHARS;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque conversation identifier.
///
/// The backend hands out integer ids while the DOM and the terminal only
/// ever see text, so an id remembers which JSON form it arrived in and
/// compares by its text alone: `7` and `"7"` are the same conversation.
#[derive(Debug, Clone)]
pub struct ConversationId {
    text: String,
    numeric: bool,
}

impl ConversationId {
    /// Build an id from text typed by a user or read from a data attribute.
    /// Digit-only text travels back to the server as a JSON number.
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let numeric = is_integer(&text);
        Self { text, numeric }
    }

    /// Build an id that is always sent as a JSON string
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl PartialEq for ConversationId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ConversationId {}

impl Hash for ConversationId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<i64> for ConversationId {
    fn from(value: i64) -> Self {
        Self {
            text: value.to_string(),
            numeric: true,
        }
    }
}

impl Serialize for ConversationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(number) = self.text.parse::<serde_json::Number>() {
                return number.serialize(serializer);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ConversationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => Ok(Self {
                text: n.to_string(),
                numeric: true,
            }),
            serde_json::Value::String(s) if !s.is_empty() => Ok(Self::text(s)),
            other => Err(serde::de::Error::custom(format!(
                "conversation id must be a number or a non-empty string, got {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Conversation data
// ============================================================================

/// One user message paired with the generated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user_message: String,
    pub bot_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Exchange {
    pub fn new(user_message: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            context_summary: None,
            timestamp: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.context_summary = Some(summary.into());
        self
    }

    /// Summary worth displaying; blank summaries count as absent
    pub fn summary(&self) -> Option<&str> {
        self.context_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// Full conversation as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Exchange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<usize>,
}

/// Sidebar entry as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ConversationSummary {
    pub fn new(id: ConversationId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            message_count: None,
            last_updated: None,
            created_at: None,
        }
    }
}

/// Title derived from the first message of a new conversation
pub fn title_from_first_message(message: &str) -> String {
    if message.chars().count() > TITLE_MAX_CHARS {
        format!("{}...", message.chars().take(TITLE_MAX_CHARS).collect::<String>())
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_id_equal_across_json_forms() {
        let from_number: ConversationId = serde_json::from_str("42").unwrap();
        let from_string: ConversationId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(from_number.is_numeric());
        assert!(!from_string.is_numeric());
    }

    #[test]
    fn test_id_keeps_wire_form() {
        let id: ConversationId = serde_json::from_str("17").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");

        let id = ConversationId::text("abc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-1\"");
    }

    #[test]
    fn test_id_rejects_other_json() {
        assert!(serde_json::from_str::<ConversationId>("null").is_err());
        assert!(serde_json::from_str::<ConversationId>("\"\"").is_err());
        assert!(serde_json::from_str::<ConversationId>("[1]").is_err());
    }

    #[test]
    fn test_parse_detects_numbers() {
        assert!(ConversationId::parse(" 12 ").is_numeric());
        assert_eq!(ConversationId::parse(" 12 ").as_str(), "12");
        assert!(!ConversationId::parse("12a").is_numeric());
        assert!(!ConversationId::parse("-").is_numeric());
    }

    #[test]
    fn test_exchange_blank_summary_is_absent() {
        let exchange = Exchange::new("hi", "hello").with_summary("   ");
        assert_eq!(exchange.summary(), None);

        let exchange: Exchange = serde_json::from_str(
            r#"{"user_message":"hi","bot_response":"hello","context_summary":null}"#,
        )
        .unwrap();
        assert_eq!(exchange.summary(), None);
    }

    #[test]
    fn test_title_short_message_kept() {
        assert_eq!(title_from_first_message("Hello there"), "Hello there");
    }

    #[test]
    fn test_title_long_message_truncated() {
        let message = "a".repeat(31);
        assert_eq!(title_from_first_message(&message), format!("{}...", "a".repeat(30)));
        assert_eq!(title_from_first_message(&"b".repeat(30)), "b".repeat(30));
    }

    #[test]
    fn test_title_truncation_respects_char_boundaries() {
        let message = "é".repeat(40);
        assert_eq!(title_from_first_message(&message), format!("{}...", "é".repeat(30)));
    }
}
