//! Message values, formatting, and the session-backed store.

pub mod format;
pub mod message;
pub mod store;
