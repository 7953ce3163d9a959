//! Session storage
//!
//! The store is an injected capability rather than ambient global state, so
//! the client and the route guard are testable without a real browser or
//! filesystem environment, and ownership of the session lifetime is explicit.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::Session;

/// Local session storage capability.
///
/// One session at a time. Reads and writes are atomic per call; the client
/// reads at request-build time and writes/clears at response-completion time.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<Session>;
    fn set(&self, session: Session);
    fn clear(&self);
}

// ============ In-memory store ============

/// Mutex-backed store for tests and short-lived embedders
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(self, session: Session) -> Self {
        self.set(session);
        self
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        // a poisoned slot still holds a coherent Option
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.slot().clone()
    }

    fn set(&self, session: Session) {
        *self.slot() = Some(session);
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}

// ============ File-backed store ============

/// JSON-file store, the CLI's stand-in for browser local storage.
///
/// A missing or unreadable file means "no session"; a corrupt file is
/// ignored (and logged) rather than surfaced, since the only recovery is
/// re-authentication anyway.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.gatepass/session.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gatepass")
            .join("session.json")
    }

    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<Session> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!(
                    "[session] ignoring unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn set(&self, session: Session) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!(
                    "[session] failed to create session directory {}: {}",
                    parent.display(),
                    e
                );
                return;
            }
        }
        match serde_json::to_string_pretty(&session) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::error!(
                        "[session] failed to persist session to {}: {}",
                        self.path.display(),
                        e
                    );
                } else {
                    log::debug!("[session] session persisted to {}", self.path.display());
                }
            }
            Err(e) => log::error!("[session] failed to serialize session: {}", e),
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("[session] session file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "[session] failed to remove session file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;

    fn session(token: &str) -> Session {
        Session::new(token, UserProfile::default())
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(session("t1"));
        assert_eq!(store.get().unwrap().token, "t1");

        store.set(session("t2"));
        assert_eq!(store.get().unwrap().token, "t2");

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_with_session() {
        let store = MemorySessionStore::new().with_session(session("seeded"));
        assert_eq!(store.get().unwrap().token, "seeded");
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.get().is_none());

        store.set(session("t1"));
        assert_eq!(store.get().unwrap().token, "t1");

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear();
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_tolerates_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_default_path_shape() {
        let path = FileSessionStore::default_path();
        assert!(path.ends_with(".gatepass/session.json"));
    }
}
