//! Store configuration from the environment.

use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "DEPOT_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "DEPOT_STORAGE_KEY";

pub const DEFAULT_DATA_DIR: &str = ".depot";
/// Fixed namespaced key the state document is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "warehouseApp.v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = read(DATA_DIR_ENV).map(PathBuf::from).unwrap_or_else(|| {
            tracing::debug!("{DATA_DIR_ENV} not set; using {DEFAULT_DATA_DIR}");
            PathBuf::from(DEFAULT_DATA_DIR)
        });
        let storage_key = read(STORAGE_KEY_ENV).unwrap_or_else(|| {
            tracing::debug!("{STORAGE_KEY_ENV} not set; using {DEFAULT_STORAGE_KEY}");
            DEFAULT_STORAGE_KEY.to_string()
        });

        Self { data_dir, storage_key }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}
