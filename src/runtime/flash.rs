//! The per-request flash handle and its command set.

use serde_json::Value;
use uuid::Uuid;

use crate::core::format::{format_message, format_values};
use crate::core::message::{FlashMessage, Flashes, Message};
use crate::core::store::FlashStore;
use crate::error::FlashError;
use crate::runtime::request::SessionSlot;

/// One flash operation, chosen explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashCall {
    /// Formats `template` with `args` and appends the single resulting string.
    Enqueue {
        category: String,
        template: String,
        args: Vec<Value>,
    },
    /// Appends every item in order, unformatted.
    EnqueueMany {
        category: String,
        items: Vec<FlashMessage>,
    },
    EnqueueOne {
        category: String,
        item: FlashMessage,
    },
    /// Removes the category and returns what it held.
    Drain { category: String },
    /// Empties the whole store.
    ResetAll,
}

impl FlashCall {
    /// Picks the operation from loosely shaped arguments.
    ///
    /// A blank category or message counts as absent. Category and message with
    /// extra arguments formats; a list message enqueues each item; a single
    /// message enqueues it; a category alone drains; anything else resets.
    #[must_use]
    pub fn from_shape(category: Option<&str>, message: Option<Message>, args: Vec<Value>) -> Self {
        let category = category.filter(|category| !category.is_empty());
        let message = message.filter(|message| !message.is_blank());

        match (category, message) {
            (Some(category), Some(message)) if !args.is_empty() => match message {
                Message::Text(template) => Self::Enqueue {
                    category: category.to_string(),
                    template,
                    args,
                },
                other => {
                    let mut values = Vec::with_capacity(args.len() + 1);
                    values.push(message_value(other));
                    values.extend(args);
                    Self::EnqueueOne {
                        category: category.to_string(),
                        item: FlashMessage::Text(format_values(&values)),
                    }
                }
            },
            (Some(category), Some(Message::Many(items))) => Self::EnqueueMany {
                category: category.to_string(),
                items,
            },
            (Some(category), Some(Message::Text(text))) => Self::EnqueueOne {
                category: category.to_string(),
                item: FlashMessage::Text(text),
            },
            (Some(category), Some(Message::Record(value))) => Self::EnqueueOne {
                category: category.to_string(),
                item: FlashMessage::Record(value),
            },
            (Some(category), None) => Self::Drain {
                category: category.to_string(),
            },
            (None, _) => Self::ResetAll,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Enqueue { category, .. }
            | Self::EnqueueMany { category, .. }
            | Self::EnqueueOne { category, .. }
            | Self::Drain { category } => Some(category),
            Self::ResetAll => None,
        }
    }
}

fn message_value(message: Message) -> Value {
    match message {
        Message::Text(text) => Value::String(text),
        Message::Record(value) => value,
        Message::Many(items) => {
            Value::Array(items.into_iter().map(FlashMessage::into_value).collect())
        }
    }
}

/// Result of a [`FlashCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashOutcome {
    /// Category length after an enqueue.
    Count(usize),
    /// Messages removed by a drain.
    Messages(Vec<FlashMessage>),
    /// Store contents after a reset.
    Store(Flashes),
}

impl FlashOutcome {
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Count(count) => Some(*count),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_messages(self) -> Option<Vec<FlashMessage>> {
        match self {
            Self::Messages(messages) => Some(messages),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_store(self) -> Option<Flashes> {
        match self {
            Self::Store(store) => Some(store),
            _ => None,
        }
    }
}

/// Flash handle bound to one request's session slot.
///
/// Every operation checks for a session when it runs, not when the handle is
/// created, so a session may be attached after installation.
#[derive(Debug, Clone)]
pub struct Flash {
    slot: SessionSlot,
    installation: Uuid,
}

impl Flash {
    #[must_use]
    pub fn bind(slot: SessionSlot) -> Self {
        Self {
            slot,
            installation: Uuid::new_v4(),
        }
    }

    /// Distinguishes one installed handle from another.
    #[must_use]
    pub fn installation_id(&self) -> Uuid {
        self.installation
    }

    #[must_use]
    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    pub fn call(&self, call: FlashCall) -> Result<FlashOutcome, FlashError> {
        match call {
            FlashCall::Enqueue {
                category,
                template,
                args,
            } => {
                let text = format_message(&template, &args);
                self.push(&category, FlashMessage::Text(text))
                    .map(FlashOutcome::Count)
            }
            FlashCall::EnqueueMany { category, items } => {
                self.extend(&category, items).map(FlashOutcome::Count)
            }
            FlashCall::EnqueueOne { category, item } => {
                self.push(&category, item).map(FlashOutcome::Count)
            }
            FlashCall::Drain { category } => self.drain(&category).map(FlashOutcome::Messages),
            FlashCall::ResetAll => self.reset().map(FlashOutcome::Store),
        }
    }

    /// Appends `message`; a [`Message::Many`] appends each item. Returns the
    /// category's new length.
    pub fn enqueue(&self, category: &str, message: impl Into<Message>) -> Result<usize, FlashError> {
        match message.into() {
            Message::Text(text) => self.push(category, FlashMessage::Text(text)),
            Message::Record(value) => self.push(category, FlashMessage::Record(value)),
            Message::Many(items) => self.extend(category, items),
        }
    }

    /// Formats `template` with `args` and appends the result.
    pub fn enqueue_fmt(
        &self,
        category: &str,
        template: &str,
        args: &[Value],
    ) -> Result<usize, FlashError> {
        self.push(category, FlashMessage::Text(format_message(template, args)))
    }

    pub fn enqueue_many<I, M>(&self, category: &str, items: I) -> Result<usize, FlashError>
    where
        I: IntoIterator<Item = M>,
        M: Into<FlashMessage>,
    {
        self.extend(category, items.into_iter().map(Into::into).collect())
    }

    pub fn drain(&self, category: &str) -> Result<Vec<FlashMessage>, FlashError> {
        self.slot.with_session_mut(|session| {
            let messages = FlashStore::attach(session)?.drain(category);
            tracing::trace!(
                installation = %self.installation,
                %category,
                drained = messages.len(),
                "flash drained"
            );
            Ok(messages)
        })
    }

    /// Replaces the store with an empty one, whatever it held, and returns
    /// it, which is always an empty map. Use [`Flash::take_all`] to get the
    /// previous contents.
    pub fn reset(&self) -> Result<Flashes, FlashError> {
        self.slot.with_session_mut(|session| {
            let store = FlashStore::reset(session);
            tracing::trace!(installation = %self.installation, "flash store reset");
            store.snapshot()
        })
    }

    /// Empties the store and returns everything it held.
    pub fn take_all(&self) -> Result<Flashes, FlashError> {
        self.slot.with_session_mut(|session| {
            let mut store = FlashStore::attach(session)?;
            let taken = store.snapshot()?;
            store.clear();
            tracing::trace!(
                installation = %self.installation,
                categories = taken.len(),
                "flash store taken"
            );
            Ok(taken)
        })
    }

    /// Reads a category without consuming it.
    pub fn peek(&self, category: &str) -> Result<Vec<FlashMessage>, FlashError> {
        self.slot
            .with_session_mut(|session| FlashStore::attach(session)?.peek(category))
    }

    pub fn len(&self, category: &str) -> Result<usize, FlashError> {
        self.slot
            .with_session_mut(|session| FlashStore::attach(session)?.len(category))
    }

    fn push(&self, category: &str, message: FlashMessage) -> Result<usize, FlashError> {
        self.slot.with_session_mut(|session| {
            let count = FlashStore::attach(session)?.push(category, message)?;
            tracing::trace!(
                installation = %self.installation,
                %category,
                count,
                "flash enqueued"
            );
            Ok(count)
        })
    }

    fn extend(&self, category: &str, items: Vec<FlashMessage>) -> Result<usize, FlashError> {
        self.slot.with_session_mut(|session| {
            let added = items.len();
            let count = FlashStore::attach(session)?.extend(category, items)?;
            tracing::trace!(
                installation = %self.installation,
                %category,
                added,
                count,
                "flash enqueued"
            );
            Ok(count)
        })
    }
}
