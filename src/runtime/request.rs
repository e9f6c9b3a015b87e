//! Request-side plumbing: the shared session slot and the host request seam.

use std::cell::RefCell;
use std::rc::Rc;

use session_store::Session;

use crate::error::FlashError;
use crate::runtime::flash::Flash;

/// Shared handle to the session attached to one request.
///
/// Cloning shares the slot. A session attached after a flash handle was
/// installed is visible to that handle.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    inner: Rc<RefCell<Option<Session>>>,
}

impl SessionSlot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(session))),
        }
    }

    /// Puts `session` in the slot, returning whatever was there before.
    pub fn attach(&self, session: Session) -> Option<Session> {
        self.inner.borrow_mut().replace(session)
    }

    pub fn detach(&self) -> Option<Session> {
        self.inner.borrow_mut().take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Clones the attached session out of the slot, typically to persist it.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.inner.borrow().clone()
    }

    /// Whether both handles share the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Runs `f` against the attached session.
    ///
    /// Fails with [`FlashError::SessionRequired`] when the slot is empty; `f`
    /// is not called in that case.
    pub fn with_session_mut<T>(
        &self,
        f: impl FnOnce(&mut Session) -> Result<T, FlashError>,
    ) -> Result<T, FlashError> {
        let mut guard = self.inner.borrow_mut();
        let session = guard.as_mut().ok_or(FlashError::SessionRequired)?;
        f(session)
    }
}

/// What the flash middleware needs from a host request type.
pub trait FlashRequest {
    /// The slot flash handles bind to.
    fn session_slot(&self) -> SessionSlot;

    /// The currently installed flash handle, if any.
    fn flash(&self) -> Option<&Flash>;

    /// Installs `flash`, replacing any existing handle.
    fn set_flash(&mut self, flash: Flash);
}

/// Minimal request carrying a session slot and an optional flash handle.
#[derive(Debug, Default)]
pub struct Request {
    session: SessionSlot,
    flash: Option<Flash>,
}

impl Request {
    /// A request with no session attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            session: SessionSlot::with_session(session),
            flash: None,
        }
    }

    pub fn attach_session(&self, session: Session) -> Option<Session> {
        self.session.attach(session)
    }

    pub fn detach_session(&self) -> Option<Session> {
        self.session.detach()
    }

    /// Swaps in a different slot (for example after session regeneration).
    /// Handles installed earlier stay bound to the previous slot.
    pub fn replace_session_slot(&mut self, slot: SessionSlot) -> SessionSlot {
        std::mem::replace(&mut self.session, slot)
    }

    #[must_use]
    pub fn session(&self) -> &SessionSlot {
        &self.session
    }

    /// Removes the installed flash handle.
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }
}

impl FlashRequest for Request {
    fn session_slot(&self) -> SessionSlot {
        self.session.clone()
    }

    fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> Session {
        Session::with_id(id, "2026-10-18T00:00:00Z")
    }

    #[test]
    fn empty_slot_requires_session() {
        let slot = SessionSlot::empty();
        let mut called = false;
        let result = slot.with_session_mut(|_| {
            called = true;
            Ok(())
        });

        assert_eq!(result, Err(FlashError::SessionRequired));
        assert!(!called);
    }

    #[test]
    fn clones_share_the_attached_session() {
        let slot = SessionSlot::empty();
        let alias = slot.clone();
        assert!(slot.attach(session("a")).is_none());

        assert!(alias.is_attached());
        assert!(alias.same_slot(&slot));
        assert_eq!(alias.snapshot().map(|s| s.id), Some("a".to_string()));
        assert_eq!(slot.detach().map(|s| s.id), Some("a".to_string()));
        assert!(!alias.is_attached());
    }

    #[test]
    fn replacing_slot_returns_previous() {
        let mut request = Request::with_session(session("old"));
        let previous = request.replace_session_slot(SessionSlot::with_session(session("new")));

        assert_eq!(previous.snapshot().map(|s| s.id), Some("old".to_string()));
        assert_eq!(request.session().snapshot().map(|s| s.id), Some("new".to_string()));
        assert!(!previous.same_slot(request.session()));
    }
}
