//! JSON document storage for persisting ledger data to disk.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::{GoalStore, LedgerDocument, StoreError};
use crate::models::GoalId;

/// File-backed store for one ledger document.
///
/// The file holds a JSON object mapping goal ids to sequences. Every call
/// reads the whole file; `put` writes the whole file back. A missing or
/// malformed file reads as empty.
pub struct JsonFileStore<T> {
    data_dir: PathBuf,
    document: LedgerDocument,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileStore<T> {
    fn clone(&self) -> Self {
        Self {
            data_dir: self.data_dir.clone(),
            document: self.document,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("data_dir", &self.data_dir)
            .field("document", &self.document)
            .finish()
    }
}

impl<T> JsonFileStore<T> {
    pub fn new(data_dir: impl Into<PathBuf>, document: LedgerDocument) -> Self {
        Self {
            data_dir: data_dir.into(),
            document,
            _marker: PhantomData,
        }
    }

    /// Returns the full path of the document file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(self.document.filename())
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Reads the raw document. Missing and malformed files yield an empty map.
    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        let path = self.path();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(
                    "Ignoring malformed {} document at {}",
                    self.document,
                    path.display()
                );
                Ok(Map::new())
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::Io {
            path: self.data_dir.clone(),
            source: e,
        })?;

        let path = self.path();
        let bytes = serde_json::to_vec(document).map_err(StoreError::Encode)?;
        fs::write(&path, bytes).map_err(|e| StoreError::Io { path, source: e })
    }
}

impl<T> GoalStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn get(&self, goal_id: GoalId) -> Result<Vec<T>, StoreError> {
        let mut document = self.read_document()?;

        let Some(entry) = document.remove(&goal_id.to_string()) else {
            return Ok(Vec::new());
        };

        match serde_json::from_value(entry) {
            Ok(values) => Ok(values),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed {} entry for goal {}: {}",
                    self.document,
                    goal_id,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn put(&self, goal_id: GoalId, values: &[T]) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        let entry = serde_json::to_value(values).map_err(StoreError::Encode)?;
        document.insert(goal_id.to_string(), entry);

        self.write_document(&document)?;
        tracing::debug!(
            "Wrote {} {} entries for goal {}",
            values.len(),
            self.document,
            goal_id
        );
        Ok(())
    }
}
