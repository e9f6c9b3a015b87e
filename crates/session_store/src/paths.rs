use std::path::{Path, PathBuf};

pub const SESSION_DIR: [&str; 2] = [".flash", "sessions"];
pub const SESSION_FILE_EXTENSION: &str = "json";

#[must_use]
pub fn session_root(base: &Path) -> PathBuf {
    base.join(SESSION_DIR[0]).join(SESSION_DIR[1])
}

/// Session ids become file names, so only a conservative alphabet is allowed.
#[must_use]
pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[must_use]
pub fn session_file_name(session_id: &str) -> String {
    format!("{session_id}.{SESSION_FILE_EXTENSION}")
}
