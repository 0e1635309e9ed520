use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{EntryError, EntryId, VocabEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Entry to append; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVocabRecord {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub created_at: DateTime<Utc>,
}

impl NewVocabRecord {
    #[must_use]
    pub fn from_entry(entry: &VocabEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            word: entry.word().to_owned(),
            definition: entry.definition().to_owned(),
            example: entry.example().to_owned(),
            created_at,
        }
    }
}

/// Persisted vocabulary row.
///
/// Fields are kept as raw strings; the quiz shape is only enforced when a
/// record is converted with [`VocabRecord::to_entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabRecord {
    pub id: EntryId,
    pub word: String,
    pub definition: String,
    pub example: String,
    pub created_at: DateTime<Utc>,
}

impl VocabRecord {
    /// # Errors
    ///
    /// Returns `EntryError` when the word or definition is blank.
    pub fn to_entry(&self) -> Result<VocabEntry, EntryError> {
        VocabEntry::from_raw(
            self.word.clone(),
            self.definition.clone(),
            self.example.clone(),
        )
    }
}

/// Stored session snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub key: String,
    pub payload: String,
    pub saved_at: DateTime<Utc>,
}

/// Append-only vocabulary store.
#[async_trait]
pub trait VocabRepository: Send + Sync {
    /// Append a new entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn append_entry(&self, entry: &NewVocabRecord) -> Result<VocabRecord, StorageError>;

    /// All entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn list_entries(&self) -> Result<Vec<VocabRecord>, StorageError>;
}

/// Key-value store for serialized sessions.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Load the snapshot saved under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load_snapshot(&self, key: &str) -> Result<Option<SnapshotRecord>, StorageError>;

    /// Insert or replace the snapshot under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_snapshot(
        &self,
        key: &str,
        payload: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Remove the snapshot under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn clear_snapshot(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<Vec<VocabRecord>>>,
    snapshots: Arc<Mutex<HashMap<String, SnapshotRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VocabRepository for InMemoryRepository {
    async fn append_entry(&self, entry: &NewVocabRecord) -> Result<VocabRecord, StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next_id = guard.last().map_or(1, |r| r.id.value() + 1);
        let record = VocabRecord {
            id: EntryId::new(next_id),
            word: entry.word.clone(),
            definition: entry.definition.clone(),
            example: entry.example.clone(),
            created_at: entry.created_at,
        };
        guard.push(record.clone());
        Ok(record)
    }

    async fn list_entries(&self) -> Result<Vec<VocabRecord>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryRepository {
    async fn load_snapshot(&self, key: &str) -> Result<Option<SnapshotRecord>, StorageError> {
        let guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn save_snapshot(
        &self,
        key: &str,
        payload: &str,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            key.to_owned(),
            SnapshotRecord {
                key: key.to_owned(),
                payload: payload.to_owned(),
                saved_at,
            },
        );
        Ok(())
    }

    async fn clear_snapshot(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .snapshots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub vocab: Arc<dyn VocabRepository>,
    pub snapshots: Arc<dyn SnapshotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let vocab: Arc<dyn VocabRepository> = Arc::new(repo.clone());
        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(repo);
        Self { vocab, snapshots }
    }
}
