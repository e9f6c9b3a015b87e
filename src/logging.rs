//! `tracing` subscriber setup.
//!
//! The library only emits events; hosts that already install a subscriber can
//! ignore this module.

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

/// Filter applied when neither `SESSION_FLASH_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from an explicit directive, falling back to `RUST_LOG`
/// and then [`DEFAULT_FILTER`]. An unparsable directive also falls back.
#[must_use]
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a fmt subscriber. Returns `false` when a global subscriber was
/// already set, which leaves the existing one in place.
pub fn init(directive: Option<&str>) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .try_init()
        .is_ok()
}

/// [`init`] using the `SESSION_FLASH_LOG` directive.
pub fn init_from_env() -> bool {
    init(EnvConfig::from_env().log_filter.as_deref())
}
