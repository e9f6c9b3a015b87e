//! Installs flash handles onto requests.

use crate::config::FlashOptions;
use crate::runtime::flash::Flash;
use crate::runtime::request::FlashRequest;

/// Outcome of one installation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installation {
    /// A new handle was bound to the request's session slot.
    Installed,
    /// A handle installed earlier replaced by this one (unsafe mode only).
    Replaced,
    /// An existing handle was kept.
    Skipped,
}

/// Request stage that equips each request with a [`Flash`] handle.
#[derive(Debug, Clone, Copy)]
pub struct FlashMiddleware {
    safe: bool,
}

impl FlashMiddleware {
    #[must_use]
    pub fn new(options: FlashOptions) -> Self {
        let safe = !options.unsafe_overwrite;
        tracing::debug!(?options, safe, "flash middleware configured");
        Self { safe }
    }

    /// In safe mode an already installed handle is left alone.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Installs a handle on `request` unless one is present and the
    /// middleware is safe. Never touches the session itself.
    pub fn install<R: FlashRequest + ?Sized>(&self, request: &mut R) -> Installation {
        let existing = request.flash().map(Flash::installation_id);
        if existing.is_some() && self.safe {
            tracing::trace!(installation = ?existing, "flash already installed, keeping it");
            return Installation::Skipped;
        }

        let flash = Flash::bind(request.session_slot());
        tracing::trace!(
            installation = %flash.installation_id(),
            replaced = ?existing,
            "flash installed"
        );
        request.set_flash(flash);

        if existing.is_some() {
            Installation::Replaced
        } else {
            Installation::Installed
        }
    }

    /// Installs (or keeps) the handle, then runs `next` exactly once.
    pub fn handle<R, T>(&self, request: &mut R, next: impl FnOnce(&mut R) -> T) -> T
    where
        R: FlashRequest + ?Sized,
    {
        self.install(request);
        next(request)
    }
}

impl Default for FlashMiddleware {
    fn default() -> Self {
        Self::new(FlashOptions::default())
    }
}

/// Builds the flash middleware from `options`.
#[must_use]
pub fn flash(options: FlashOptions) -> FlashMiddleware {
    FlashMiddleware::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::request::Request;

    #[test]
    fn safe_by_default() {
        assert!(FlashMiddleware::default().is_safe());
        assert!(!flash(FlashOptions {
            unsafe_overwrite: true
        })
        .is_safe());
    }

    #[test]
    fn install_reports_each_path() {
        let mut request = Request::new();
        let safe = FlashMiddleware::default();
        let overwriting = flash(FlashOptions {
            unsafe_overwrite: true,
        });

        assert_eq!(safe.install(&mut request), Installation::Installed);
        assert_eq!(safe.install(&mut request), Installation::Skipped);
        assert_eq!(overwriting.install(&mut request), Installation::Replaced);
    }

    #[test]
    fn handle_calls_next_once_on_both_paths() {
        let mut request = Request::new();
        let middleware = FlashMiddleware::default();
        let mut calls = 0;

        middleware.handle(&mut request, |_| calls += 1);
        middleware.handle(&mut request, |_| calls += 1);
        assert_eq!(calls, 2);
    }

    #[test]
    fn handle_returns_next_result() {
        let mut request = Request::new();
        let installed = FlashMiddleware::default()
            .handle(&mut request, |request| request.flash().is_some());
        assert!(installed);
    }
}
