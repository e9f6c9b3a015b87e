//! Setup options and environment configuration.

use std::env;

use serde::{Deserialize, Serialize};

pub const UNSAFE_ENV: &str = "SESSION_FLASH_UNSAFE";
pub const LOG_ENV: &str = "SESSION_FLASH_LOG";

/// Options recognized by [`crate::FlashMiddleware::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashOptions {
    /// Overwrite a flash handle that is already installed on the request.
    #[serde(rename = "unsafe")]
    pub unsafe_overwrite: bool,
}

impl FlashOptions {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            unsafe_overwrite: env_flag(UNSAFE_ENV),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub options: FlashOptions,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            options: FlashOptions::from_env(),
            log_filter: env_string_opt(LOG_ENV),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
