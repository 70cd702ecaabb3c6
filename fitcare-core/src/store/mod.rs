//! Local key-value storage for per-goal ledger documents.
//!
//! Two logical documents exist, each mapping a goal id to a sequence:
//! - `consumedItems`: goal id -> consumed items
//! - `calorieHistory`: goal id -> running-total history
//!
//! Stores are read and written whole; there is no partial persistence and no
//! locking across processes.

mod document;
mod json_file;
mod memory;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use document::LedgerDocument;
pub use json_file::JsonFileStore;
pub use memory::{MemoryStore, StoreOp};

use crate::models::{CalorieHistoryItem, ConsumedItem, GoalId};

/// Repository for one per-goal document.
pub trait GoalStore<T>: Send + Sync {
    /// Returns the goal's sequence, empty if none has been stored.
    fn get(&self, goal_id: GoalId) -> Result<Vec<T>, StoreError>;

    /// Replaces the goal's sequence.
    fn put(&self, goal_id: GoalId, values: &[T]) -> Result<(), StoreError>;
}

impl<T, S> GoalStore<T> for Arc<S>
where
    S: GoalStore<T> + ?Sized,
{
    fn get(&self, goal_id: GoalId) -> Result<Vec<T>, StoreError> {
        (**self).get(goal_id)
    }

    fn put(&self, goal_id: GoalId, values: &[T]) -> Result<(), StoreError> {
        (**self).put(goal_id, values)
    }
}

/// The pair of stores the reconciler works against.
#[derive(Clone)]
pub struct LedgerStores {
    pub consumed: Arc<dyn GoalStore<ConsumedItem>>,
    pub history: Arc<dyn GoalStore<CalorieHistoryItem>>,
}

impl LedgerStores {
    pub fn new(
        consumed: Arc<dyn GoalStore<ConsumedItem>>,
        history: Arc<dyn GoalStore<CalorieHistoryItem>>,
    ) -> Self {
        Self { consumed, history }
    }

    /// JSON documents in `data_dir`.
    pub fn json(data_dir: impl AsRef<Path>) -> Self {
        let data_dir: PathBuf = data_dir.as_ref().to_path_buf();
        Self {
            consumed: Arc::new(JsonFileStore::new(
                data_dir.clone(),
                LedgerDocument::ConsumedItems,
            )),
            history: Arc::new(JsonFileStore::new(data_dir, LedgerDocument::CalorieHistory)),
        }
    }

    /// Fresh in-memory stores.
    pub fn memory() -> Self {
        Self {
            consumed: Arc::new(MemoryStore::new()),
            history: Arc::new(MemoryStore::new()),
        }
    }
}

/// Errors that can occur while reading or writing local documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}
