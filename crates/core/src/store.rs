//! Token store: dumb key/value persistence for the session fields
//!
//! Stores perform no validation. Writes are last-write-wins; two refreshes
//! settling out of order simply overwrite each other.

use crate::MaybeSendSync;
use crate::config::AuthConfig;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Synchronous key/value storage shared by every consumer of the session
pub trait TokenStore: MaybeSendSync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    /// Remove the session unit. `theme` and any other keys are left alone.
    fn clear(&self) {
        for key in AuthConfig::SESSION_KEYS.iter().rev() {
            self.remove(key);
        }
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// In-process store; clones share the same map
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

/// Keys only; values are tokens
impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("keys", &self.keys())
            .finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every key currently stored
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::TokenStore;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::{debug, warn};

    /// JSON file on disk holding the same keys the browser keeps in `localStorage`
    #[derive(Clone)]
    pub struct FileStore {
        path: Arc<PathBuf>,
        entries: Arc<Mutex<BTreeMap<String, String>>>,
    }

    impl std::fmt::Debug for FileStore {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let keys: Vec<String> = self.lock().keys().cloned().collect();
            f.debug_struct("FileStore")
                .field("path", &self.path)
                .field("keys", &keys)
                .finish()
        }
    }

    impl FileStore {
        /// Open (or lazily create) the store at `path`
        ///
        /// # Errors
        ///
        /// Returns an error if an existing file cannot be read or is not a JSON object
        pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
            let path = path.as_ref().to_path_buf();
            let entries = match std::fs::read_to_string(&path) {
                Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
                Ok(contents) => serde_json::from_str(&contents)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => return Err(e),
            };
            debug!(path = %path.display(), keys = entries.len(), "Opened session file");
            Ok(Self {
                path: Arc::new(path),
                entries: Arc::new(Mutex::new(entries)),
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
            self.entries.lock().unwrap_or_else(|e| e.into_inner())
        }

        fn persist(&self, entries: &BTreeMap<String, String>) {
            if let Err(e) = write_atomically(&self.path, entries) {
                warn!(path = %self.path.display(), error = %e, "Failed to persist session file");
            }
        }
    }

    fn write_atomically(path: &Path, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_vec_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)
    }

    impl TokenStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.lock().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            let mut entries = self.lock();
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }

        fn remove(&self, key: &str) {
            let mut entries = self.lock();
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }

        fn clear(&self) {
            let mut entries = self.lock();
            for key in crate::config::AuthConfig::SESSION_KEYS {
                entries.remove(key);
            }
            self.persist(&entries);
        }
    }
}
