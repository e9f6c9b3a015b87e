//! File-backed session records.
//!
//! Each session is one JSON document named after its id. The store knows
//! nothing about what lives in [`Session::values`]; callers own that shape.

mod error;
mod paths;
mod schema;
mod store;

pub use error::SessionStoreError;
pub use paths::{is_valid_session_id, session_file_name, session_root};
pub use schema::Session;
pub use store::SessionStore;
