use std::sync::Arc;

use quiz_core::model::{VocabDraft, VocabEntry};
use storage::repository::{NewVocabRecord, VocabRecord, VocabRepository};
use tracing::debug;

use crate::Clock;
use crate::error::VocabServiceError;

/// Usable quiz vocabulary plus a count of rows that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyLoad {
    pub entries: Vec<VocabEntry>,
    pub skipped: usize,
}

/// Adds and lists vocabulary entries.
#[derive(Clone)]
pub struct VocabService {
    clock: Clock,
    vocab: Arc<dyn VocabRepository>,
}

impl VocabService {
    #[must_use]
    pub fn new(clock: Clock, vocab: Arc<dyn VocabRepository>) -> Self {
        Self { clock, vocab }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(
            clock,
            Arc::new(storage::repository::InMemoryRepository::new()),
        )
    }

    /// Validate a draft and append it to the store.
    ///
    /// Duplicate words are accepted; quizzes exclude distractors by exact word.
    ///
    /// # Errors
    ///
    /// Returns `VocabServiceError::Entry` when a field is empty after trimming,
    /// or `VocabServiceError::Storage` if the append fails.
    pub async fn add_entry(&self, draft: VocabDraft) -> Result<VocabRecord, VocabServiceError> {
        let entry = draft.validate()?;
        let record = self
            .vocab
            .append_entry(&NewVocabRecord::from_entry(&entry, self.clock.now()))
            .await?;
        debug!(id = %record.id, word = %record.word, "vocabulary entry added");
        Ok(record)
    }

    /// Every stored row, including ones a quiz would skip.
    ///
    /// # Errors
    ///
    /// Returns `VocabServiceError::Storage` on repository failures.
    pub async fn list_entries(&self) -> Result<Vec<VocabRecord>, VocabServiceError> {
        Ok(self.vocab.list_entries().await?)
    }

    /// Rows that can take part in a quiz, in store order.
    ///
    /// # Errors
    ///
    /// Returns `VocabServiceError::Storage` on repository failures.
    pub async fn quiz_vocabulary(&self) -> Result<VocabularyLoad, VocabServiceError> {
        let records = self.vocab.list_entries().await?;
        let mut entries = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for record in &records {
            match record.to_entry() {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    skipped += 1;
                    debug!(id = %record.id, %err, "skipping vocabulary entry");
                }
            }
        }
        Ok(VocabularyLoad { entries, skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::EntryError;
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn add_entry_trims_and_stamps() {
        let service = VocabService::in_memory(fixed_clock());
        let record = service
            .add_entry(VocabDraft::new(" cat ", "a feline ", " The cat sat."))
            .await
            .unwrap();

        assert_eq!(record.word, "cat");
        assert_eq!(record.definition, "a feline");
        assert_eq!(record.example, "The cat sat.");
        assert_eq!(record.created_at, fixed_now());
    }

    #[tokio::test]
    async fn add_entry_requires_every_field() {
        let service = VocabService::in_memory(fixed_clock());
        let err = service
            .add_entry(VocabDraft::new("cat", "a feline", ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VocabServiceError::Entry(EntryError::EmptyExample)
        ));
        assert!(service.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn quiz_vocabulary_skips_blank_rows() {
        let repo = InMemoryRepository::new();
        for (word, definition) in [("cat", "a feline"), ("", "orphan"), ("dog", "  ")] {
            repo.append_entry(&NewVocabRecord {
                word: word.into(),
                definition: definition.into(),
                example: String::new(),
                created_at: fixed_now(),
            })
            .await
            .unwrap();
        }

        let service = VocabService::new(fixed_clock(), Arc::new(repo));
        let load = service.quiz_vocabulary().await.unwrap();
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].word(), "cat");
        assert_eq!(load.skipped, 2);
        assert_eq!(service.list_entries().await.unwrap().len(), 3);
    }
}
