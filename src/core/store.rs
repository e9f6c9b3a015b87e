//! Category-keyed message lists kept inside a session's `flash` value.

use serde_json::{Map, Value};
use session_store::Session;

use crate::core::message::{FlashMessage, Flashes};
use crate::error::{json_kind, FlashError};

/// Session key holding the flash store.
pub const FLASH_KEY: &str = "flash";

/// Mutable view over one session's flash store.
///
/// The store is a JSON object mapping category to an array of messages, so it
/// persists with the session like any other value.
#[derive(Debug)]
pub struct FlashStore<'a> {
    entries: &'a mut Map<String, Value>,
}

impl<'a> FlashStore<'a> {
    /// Borrows the session's store, creating an empty one when it is missing
    /// or `null`.
    pub fn attach(session: &'a mut Session) -> Result<Self, FlashError> {
        let slot = session.entry_or_insert_with(FLASH_KEY, || Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }

        match slot {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(FlashError::MalformedStore {
                found: json_kind(other),
            }),
        }
    }

    /// Replaces the session's store with an empty one, whatever it held.
    pub fn reset(session: &'a mut Session) -> Self {
        let slot = session.entry_or_insert_with(FLASH_KEY, || Value::Null);
        *slot = Value::Object(Map::new());
        let Value::Object(entries) = slot else {
            unreachable!("flash store was just replaced with an object");
        };
        Self { entries }
    }

    /// Appends one message and returns the category's new length.
    pub fn push(&mut self, category: &str, message: FlashMessage) -> Result<usize, FlashError> {
        let list = self.list_mut(category)?;
        list.push(message.into_value());
        Ok(list.len())
    }

    /// Appends each message in order and returns the category's final length.
    pub fn extend(
        &mut self,
        category: &str,
        messages: impl IntoIterator<Item = FlashMessage>,
    ) -> Result<usize, FlashError> {
        let list = self.list_mut(category)?;
        list.extend(messages.into_iter().map(FlashMessage::into_value));
        Ok(list.len())
    }

    /// Removes the category and returns its messages; an absent category is empty.
    ///
    /// The category is removed whatever it holds. A stray non-list value comes
    /// back as a single message.
    pub fn drain(&mut self, category: &str) -> Vec<FlashMessage> {
        match self.entries.remove(category) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().map(FlashMessage::from).collect(),
            Some(stray) => vec![FlashMessage::from(stray)],
        }
    }

    /// Returns a category's messages without removing them.
    pub fn peek(&self, category: &str) -> Result<Vec<FlashMessage>, FlashError> {
        match self.entries.get(category) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.iter().cloned().map(FlashMessage::from).collect()),
            Some(other) => Err(FlashError::malformed_category(category, other)),
        }
    }

    pub fn len(&self, category: &str) -> Result<usize, FlashError> {
        match self.entries.get(category) {
            None => Ok(0),
            Some(Value::Array(items)) => Ok(items.len()),
            Some(other) => Err(FlashError::malformed_category(category, other)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every category out of the store.
    pub fn snapshot(&self) -> Result<Flashes, FlashError> {
        self.entries
            .keys()
            .map(|category| Ok((category.clone(), self.peek(category)?)))
            .collect()
    }

    /// Drops every category.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn list_mut(&mut self, category: &str) -> Result<&mut Vec<Value>, FlashError> {
        let slot = self
            .entries
            .entry(category)
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => Ok(items),
            other => Err(FlashError::malformed_category(category, other)),
        }
    }
}
