//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::GenerateError;
use quiz_core::model::{EntryError, SnapshotError, TransitionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `VocabService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VocabServiceError {
    #[error(transparent)]
    Entry(#[from] EntryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("not enough vocabulary: {0}")]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Vocab(#[from] VocabServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizServiceError {
    /// True when the user has to add entries before a quiz can start.
    #[must_use]
    pub fn is_insufficient_vocabulary(&self) -> bool {
        matches!(
            self,
            QuizServiceError::Generate(GenerateError::InsufficientVocabulary { .. })
        )
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
