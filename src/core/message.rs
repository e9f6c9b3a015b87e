//! Flash message values and caller-side message input.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One queued flash message as it is stored in the session.
///
/// Serialized untagged: text is a plain JSON string, anything else is kept as
/// the structured value it was enqueued with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlashMessage {
    Text(String),
    Record(Value),
}

impl FlashMessage {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Record(_) => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Record(value) => value,
        }
    }
}

impl From<Value> for FlashMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Record(other),
        }
    }
}

impl From<String> for FlashMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FlashMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for FlashMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Record(value) => write!(f, "{value}"),
        }
    }
}

/// Message argument accepted by enqueue calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(String),
    Record(Value),
    /// Each element is appended on its own, without formatting.
    Many(Vec<FlashMessage>),
}

impl Message {
    /// Falsy messages (empty text, `null`, `false`, zero) count as "no message"
    /// when dispatching by call shape. A list is never blank, even when empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Record(Value::Null | Value::Bool(false)) => true,
            Self::Record(Value::Number(number)) => number.as_f64() == Some(0.0),
            Self::Record(_) | Self::Many(_) => false,
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Many(items.into_iter().map(FlashMessage::from).collect()),
            other => Self::Record(other),
        }
    }
}

impl From<FlashMessage> for Message {
    fn from(message: FlashMessage) -> Self {
        match message {
            FlashMessage::Text(text) => Self::Text(text),
            FlashMessage::Record(value) => Self::Record(value),
        }
    }
}

impl<T: Into<FlashMessage>> From<Vec<T>> for Message {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

/// Owned snapshot of a flash store, ordered by category.
pub type Flashes = BTreeMap<String, Vec<FlashMessage>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn untagged_serialization_keeps_plain_shapes() {
        let text = serde_json::to_value(FlashMessage::from("saved")).expect("serialize");
        assert_eq!(text, json!("saved"));

        let record = serde_json::to_value(FlashMessage::Record(json!({ "code": 7 })))
            .expect("serialize");
        assert_eq!(record, json!({ "code": 7 }));

        let back: FlashMessage = serde_json::from_value(json!("saved")).expect("deserialize");
        assert_eq!(back, FlashMessage::Text("saved".to_string()));
    }

    #[test]
    fn json_array_becomes_many() {
        let message = Message::from(json!(["a", { "b": 1 }]));
        assert_eq!(
            message,
            Message::Many(vec![
                FlashMessage::Text("a".to_string()),
                FlashMessage::Record(json!({ "b": 1 })),
            ])
        );
    }

    #[test]
    fn falsy_messages_are_blank() {
        assert!(Message::from("").is_blank());
        assert!(Message::Record(json!(null)).is_blank());
        assert!(Message::Record(json!(false)).is_blank());
        assert!(Message::Record(json!(0)).is_blank());
        assert!(!Message::from(" ").is_blank());
        assert!(!Message::Record(json!({})).is_blank());
        assert!(!Message::Many(Vec::new()).is_blank());
    }
}
