use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SessionStoreError;
use crate::paths::{is_valid_session_id, session_file_name, SESSION_FILE_EXTENSION};
use crate::schema::Session;

pub struct SessionStore {
    pub(crate) root: PathBuf,
}

impl SessionStore {
    /// Opens a store rooted at `root`, creating the directory when missing.
    pub fn open(root: &Path) -> Result<Self, SessionStoreError> {
        let root = root.to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|source| SessionStoreError::io("creating session directory", &root, source))?;
        tracing::debug!(root = %root.display(), "session store opened");
        Ok(Self { root })
    }

    /// Creates and persists a fresh, empty session.
    pub fn create(&self) -> Result<Session, SessionStoreError> {
        let session = Session::new()?;
        self.save(&session)?;
        Ok(session)
    }

    /// Loads a session by id. A missing file is `Ok(None)`, not an error.
    pub fn load(&self, id: &str) -> Result<Option<Session>, SessionStoreError> {
        let path = self.path_for(id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionStoreError::io("reading session file", &path, source));
            }
        };

        let session = serde_json::from_str::<Session>(&raw)
            .map_err(|source| SessionStoreError::json_parse(&path, source))?;
        validate_session(&path, id, &session)?;
        tracing::trace!(session_id = id, "session loaded");
        Ok(Some(session))
    }

    /// Writes the session through a temporary file and renames it into place.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let path = self.path_for(&session.id)?;
        validate_rfc3339(&path, "created_at", &session.created_at)?;

        let encoded = serde_json::to_vec_pretty(session)
            .map_err(|source| SessionStoreError::json_serialize(&path, source))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, encoded)
            .map_err(|source| SessionStoreError::io("writing session file", &staging, source))?;
        fs::rename(&staging, &path)
            .map_err(|source| SessionStoreError::io("replacing session file", &path, source))?;
        tracing::trace!(session_id = %session.id, "session saved");
        Ok(())
    }

    /// Deletes a session. Returns whether a file was removed.
    pub fn destroy(&self, id: &str) -> Result<bool, SessionStoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(session_id = id, "session destroyed");
                Ok(true)
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionStoreError::io("removing session file", &path, source)),
        }
    }

    /// Lists stored session ids in sorted order.
    pub fn ids(&self) -> Result<Vec<String>, SessionStoreError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|source| SessionStoreError::io("listing sessions", &self.root, source))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|source| SessionStoreError::io("listing sessions", &self.root, source))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SESSION_FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if is_valid_session_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, SessionStoreError> {
        if !is_valid_session_id(id) {
            return Err(SessionStoreError::InvalidSessionId { id: id.to_string() });
        }
        Ok(self.root.join(session_file_name(id)))
    }
}

pub(crate) fn validate_session(
    path: &Path,
    expected_id: &str,
    session: &Session,
) -> Result<(), SessionStoreError> {
    if session.id != expected_id {
        return Err(SessionStoreError::MismatchedSessionId {
            path: path.to_path_buf(),
            expected: expected_id.to_string(),
            found: session.id.clone(),
        });
    }

    validate_rfc3339(path, "created_at", &session.created_at)
}

pub(crate) fn validate_rfc3339(
    path: &Path,
    field: &'static str,
    value: &str,
) -> Result<(), SessionStoreError> {
    if OffsetDateTime::parse(value, &Rfc3339).is_err() {
        return Err(SessionStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}
