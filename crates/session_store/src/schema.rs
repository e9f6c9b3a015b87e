use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::SessionStoreError;

/// One persisted session: an id, its creation time, and an open key/value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl Session {
    /// Creates an empty session with a fresh v4 id stamped with the current UTC time.
    pub fn new() -> Result<Self, SessionStoreError> {
        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(SessionStoreError::ClockFormat)?;
        Ok(Self::with_id(Uuid::new_v4().to_string(), created_at))
    }

    #[must_use]
    pub fn with_id(id: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: created_at.into(),
            values: Map::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.values.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Returns the value under `key`, inserting `default()` first when absent.
    pub fn entry_or_insert_with(
        &mut self,
        key: impl Into<String>,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        self.values.entry(key.into()).or_insert_with(default)
    }
}
