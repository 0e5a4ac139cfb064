//! Durable key/value storage for the serialized state document.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Key/value storage holding one JSON document per key.
pub trait StateStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S> StateStorage for Arc<S>
where
    S: StateStorage + ?Sized,
{
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// In-memory storage for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document (e.g. one written by an older or foreign client).
    pub fn with_document(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut map) = storage.inner.write() {
            map.insert(key.into(), value.into());
        }
        storage
    }
}

impl StateStorage for InMemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: `<dir>/<key>.json`.
///
/// The directory is created on first save. Saves write a sibling temp file and
/// rename it over the target, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl StateStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(io_error(&tmp))?;
            file.write_all(value.as_bytes()).map_err(io_error(&tmp))?;
            file.sync_all().map_err(io_error(&tmp))?;
        }
        fs::rename(&tmp, &path).map_err(io_error(&path))?;
        Ok(())
    }
}
