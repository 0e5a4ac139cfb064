//! Infrastructure layer: storage backends, state codec, the state store, and
//! the operation surface exposed to the CLI and the tool adapter.

pub mod codec;
pub mod config;
pub mod service;
pub mod storage;
pub mod store;
pub mod tools;


pub use codec::{CodecError, decode, encode};
pub use config::{DEFAULT_STORAGE_KEY, StoreConfig};
pub use service::{AssignmentSummary, WarehouseAppData, WarehouseService};
pub use storage::{FileStorage, InMemoryStorage, StateStorage, StorageError};
pub use store::{Snapshot, StateStore};
pub use tools::{ToolDefinition, ToolError, call_tool, tool_definitions};

/// Service over `<data_dir>/<storage_key>.json` with an in-process notifier.
pub fn open_file_service(config: &StoreConfig) -> WarehouseService<FileStorage> {
    let storage = FileStorage::new(config.data_dir.clone());
    tracing::debug!(path = %storage.path_for(&config.storage_key).display(), "opening state file");
    WarehouseService::new(StateStore::new(
        storage,
        depot_events::InMemoryNotifier::new(),
        config.storage_key.clone(),
    ))
}
