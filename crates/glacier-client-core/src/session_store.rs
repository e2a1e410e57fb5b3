//! Persistence of the session record. The store is the only owner of the
//! session; callers never hold a copy beyond a single operation, every
//! read goes back to the store.

use std::fmt::Debug;
use std::sync::Mutex;

use glacier_shared::session::Session;

/// Repository the [`crate::Client`] reads and writes the session through.
/// Injectable so tests can swap in [`InMemorySessionStore`].
///
/// There are no partial updates: `save` always writes the full record
/// under the one fixed key, `read` returns `None` for a missing or
/// unparsable record instead of erroring.
pub trait SessionStore: Debug + Send + Sync {
    fn save(&self, session: &Session) -> anyhow::Result<()>;
    fn read(&self) -> Option<Session>;
    /// Must succeed in the sense that a following `read` returns `None`,
    /// even if nothing was stored to begin with
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, session: &Session) -> anyhow::Result<()> {
        *self.inner.lock().expect("mutex poisoned") = Some(session.clone());
        Ok(())
    }

    fn read(&self) -> Option<Session> {
        self.inner.lock().expect("mutex poisoned").clone()
    }

    fn clear(&self) {
        *self.inner.lock().expect("mutex poisoned") = None;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileSessionStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use anyhow::Context as _;
    use glacier_shared::const_config::client::CLIENT_SESSION_STORAGE_KEY;
    use tracing::warn;

    use super::*;

    /// One JSON file holding the serialized record
    #[derive(Debug)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Default for FileSessionStore {
        fn default() -> Self {
            Self::new(format!("{CLIENT_SESSION_STORAGE_KEY}.json"))
        }
    }

    impl SessionStore for FileSessionStore {
        fn save(&self, session: &Session) -> anyhow::Result<()> {
            let serialized =
                serde_json::to_string(session).context("failed to serialize session")?;
            std::fs::write(&self.path, serialized)
                .with_context(|| format!("failed to write session to {:?}", self.path))
        }

        fn read(&self) -> Option<Session> {
            let raw = std::fs::read_to_string(&self.path).ok()?;
            match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    // An unreadable record counts as no record
                    warn!(?err, path = ?self.path, "stored session failed to parse");
                    None
                }
            }
        }

        fn clear(&self) {
            match std::fs::remove_file(&self.path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                    warn!(?err, path = ?self.path, "failed to remove stored session");
                }
                _ => {}
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebSessionStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use glacier_shared::const_config::client::CLIENT_SESSION_STORAGE_KEY;
    use tracing::warn;

    use super::*;

    /// Browser `localStorage` under the same fixed key the web panel used
    ///
    /// The browser handle is looked up per call instead of being held so
    /// the struct stays thread-safe by construction.
    #[derive(Debug, Default)]
    pub struct WebSessionStore;

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl SessionStore for WebSessionStore {
        fn save(&self, session: &Session) -> anyhow::Result<()> {
            let serialized =
                serde_json::to_string(session).expect("session serialization cannot fail");
            let Some(storage) = local_storage() else {
                anyhow::bail!("browser local storage is not available");
            };
            storage
                .set_item(CLIENT_SESSION_STORAGE_KEY, &serialized)
                .map_err(|err| anyhow::anyhow!("failed to store session: {err:?}"))
        }

        fn read(&self) -> Option<Session> {
            let raw = local_storage()?.get_item(CLIENT_SESSION_STORAGE_KEY).ok()??;
            match serde_json::from_str(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(?err, "stored session failed to parse");
                    None
                }
            }
        }

        fn clear(&self) {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(CLIENT_SESSION_STORAGE_KEY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            id: 11,
            access_token: "tok-11".to_string(),
            email: "admin@example.com".to_string(),
            username: "admin".to_string(),
            original_username: "Admin".to_string(),
            is_admin: 1,
            created_at: "2022-06-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn in_memory_save_then_read_round_trips_all_fields() {
        let store = InMemorySessionStore::default();
        let session = sample_session();

        store.save(&session).unwrap();

        assert_eq!(store.read(), Some(session));
    }

    #[test]
    fn clear_is_safe_with_and_without_a_prior_session() {
        let store = InMemorySessionStore::default();
        store.clear(); // nothing stored yet
        assert_eq!(store.read(), None);

        store.save(&sample_session()).unwrap();
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file_store {
        use super::*;

        fn temp_store(test_name: &str) -> FileSessionStore {
            let path = std::env::temp_dir().join(format!(
                "glacier-session-{}-{test_name}.json",
                std::process::id()
            ));
            let store = FileSessionStore::new(path);
            store.clear(); // Start from a clean slate in case of a leftover file
            store
        }

        #[test]
        fn save_then_read_round_trips_all_fields() {
            let store = temp_store("round-trip");
            let session = sample_session();

            store.save(&session).unwrap();
            let read_back = store.read();
            store.clear();

            assert_eq!(read_back, Some(session));
        }

        #[test]
        fn unparsable_record_reads_as_absent() {
            let store = temp_store("unparsable");
            std::fs::write(store.path(), "not json at all").unwrap();

            let read_back = store.read();
            store.clear();

            assert_eq!(read_back, None);
        }

        #[test]
        fn missing_file_reads_as_absent_and_clear_is_idempotent() {
            let store = temp_store("missing");
            assert_eq!(store.read(), None);
            store.clear();
            store.clear();
            assert_eq!(store.read(), None);
        }

        #[test]
        fn save_overwrites_the_full_record() {
            let store = temp_store("overwrite");
            store.save(&sample_session()).unwrap();

            let mut updated = sample_session();
            updated.username = "renamed".to_string();
            updated.is_admin = 0;
            store.save(&updated).unwrap();

            let read_back = store.read();
            store.clear();
            assert_eq!(read_back, Some(updated));
        }
    }
}
