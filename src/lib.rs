//! One-shot flash messages kept in the request's session.
//!
//! Handlers enqueue messages by category; the next read of a category drains
//! it, so each message is seen once (typically on the page after a redirect).
//!
//! # Public API Overview
//! - Install a [`Flash`] handle on each request with [`FlashMiddleware`].
//! - Enqueue, drain, or reset through [`Flash`] methods or an explicit
//!   [`FlashCall`] passed to [`Flash::call`].
//! - Host request types plug in by implementing [`FlashRequest`].
//! - Messages live in the session under [`FLASH_KEY`], so any
//!   [`session_store::Session`] persistence carries them across requests.

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod runtime;

/// Setup options and environment configuration.
pub use crate::config::{EnvConfig, FlashOptions};
/// Flash operation failures.
pub use crate::error::FlashError;

/// Message values and formatting.
pub use crate::core::format::{format_message, format_values};
pub use crate::core::message::{FlashMessage, Flashes, Message};
pub use crate::core::store::{FlashStore, FLASH_KEY};

/// Request-side handle, middleware and request seam.
pub use crate::runtime::{
    flash, Flash, FlashCall, FlashMiddleware, FlashOutcome, FlashRequest, Installation, Request,
    SessionSlot,
};

pub use session_store::Session;
