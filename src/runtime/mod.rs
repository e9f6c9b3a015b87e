//! Per-request flash handles and the middleware that installs them.

pub mod flash;
pub mod middleware;
pub mod request;

pub use flash::{Flash, FlashCall, FlashOutcome};
pub use middleware::{flash, FlashMiddleware, Installation};
pub use request::{FlashRequest, Request, SessionSlot};
