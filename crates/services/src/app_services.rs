use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::quiz::QuizService;
use crate::vocab_service::VocabService;
use crate::{Clock, RandomSource};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    vocab: Arc<VocabService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        random: RandomSource,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, random))
    }

    #[must_use]
    pub fn in_memory(clock: Clock, random: RandomSource) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, random)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, random: RandomSource) -> Self {
        let vocab = Arc::new(VocabService::new(clock, Arc::clone(&storage.vocab)));
        let quiz = Arc::new(
            QuizService::new(
                clock,
                Arc::clone(&storage.vocab),
                Arc::clone(&storage.snapshots),
            )
            .with_random(random),
        );
        Self { vocab, quiz }
    }

    #[must_use]
    pub fn vocab(&self) -> Arc<VocabService> {
        Arc::clone(&self.vocab)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
