use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlashError {
    #[error("flash operations require a session")]
    SessionRequired,

    #[error("session value 'flash' must be an object of message lists, found {found}")]
    MalformedStore { found: &'static str },

    #[error("flash category '{category}' must hold a message list, found {found}")]
    MalformedCategory {
        category: String,
        found: &'static str,
    },
}

impl FlashError {
    #[must_use]
    pub fn malformed_category(category: impl Into<String>, found: &serde_json::Value) -> Self {
        Self::MalformedCategory {
            category: category.into(),
            found: json_kind(found),
        }
    }
}

#[must_use]
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
