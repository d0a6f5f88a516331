use super::ports::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk shape of the persisted auth record
#[derive(Debug, Serialize, Deserialize)]
struct PersistedAuth {
    user_info: Profile,
}

/// Outcome of reading the persisted record. Kept explicit so tests can
/// distinguish "never written" from "written but unreadable"; public
/// callers only ever see the collapsed Option.
#[derive(Debug, PartialEq)]
pub enum CacheLoad {
    Found(Profile),
    NotFound,
    Corrupt,
}

/// File-backed cache of the last authenticated profile.
///
/// The record's mere existence is treated as proof of authentication: no
/// expiry, no signature, no binding to the session that wrote it. That is
/// the intended single-user trade-off, not an oversight. There is also no
/// locking; concurrent writers can race, and a torn write reads back as
/// Corrupt (equivalent to "no persisted session").
pub struct AuthCache {
    path: PathBuf,
}

impl AuthCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(&self) -> CacheLoad {
        if !self.path.exists() {
            return CacheLoad::NotFound;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Failed to read persisted auth record");
                return CacheLoad::Corrupt;
            }
        };

        match serde_json::from_str::<PersistedAuth>(&content) {
            Ok(record) if !record.user_info.email.is_empty() => {
                CacheLoad::Found(record.user_info)
            }
            Ok(_) => {
                debug!(path = %self.path.display(), "Persisted auth record has no email");
                CacheLoad::Corrupt
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Failed to parse persisted auth record");
                CacheLoad::Corrupt
            }
        }
    }

    /// Read the cached profile; any failure degrades to None
    pub fn load(&self) -> Option<Profile> {
        match self.read() {
            CacheLoad::Found(profile) => Some(profile),
            CacheLoad::NotFound | CacheLoad::Corrupt => None,
        }
    }

    /// Overwrite the record with the given profile; write errors are swallowed
    pub fn save(&self, profile: &Profile) {
        let record = PersistedAuth {
            user_info: profile.clone(),
        };

        let serialized = match serde_json::to_string(&record) {
            Ok(serialized) => serialized,
            Err(e) => {
                debug!(error = %e, "Failed to serialize auth record");
                return;
            }
        };

        if let Err(e) = std::fs::write(&self.path, serialized) {
            debug!(path = %self.path.display(), error = %e, "Failed to write persisted auth record");
        }
    }

    /// Delete the record if present; errors are swallowed
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                debug!(path = %self.path.display(), error = %e, "Failed to delete persisted auth record");
            }
        }
    }
}
