use std::fmt;
use std::sync::Arc;

use quiz_core::QuestionGenerator;
use quiz_core::model::{AnswerFeedback, AnswerRecord, QuizSession, SessionSnapshot};
use storage::repository::{SnapshotRepository, VocabRepository};
use tracing::{debug, info, warn};

use super::view::QuizView;
use crate::error::QuizServiceError;
use crate::vocab_service::VocabService;
use crate::{Clock, RandomSource};

/// Storage key of the single saved quiz.
pub const SESSION_SNAPSHOT_KEY: &str = "quizState";

/// Orchestrates quiz start, answering and persistence.
///
/// The session itself is owned by the caller; every successful transition is
/// followed by a snapshot write so a restart can resume where it left off.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    random: RandomSource,
    generator: QuestionGenerator,
    vocab: VocabService,
    snapshots: Arc<dyn SnapshotRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        vocab: Arc<dyn VocabRepository>,
        snapshots: Arc<dyn SnapshotRepository>,
    ) -> Self {
        Self {
            clock,
            random: RandomSource::default(),
            generator: QuestionGenerator::new(),
            vocab: VocabService::new(clock, vocab),
            snapshots,
        }
    }

    #[must_use]
    pub fn with_random(mut self, random: RandomSource) -> Self {
        self.random = random;
        self
    }

    /// Generate a new quiz of up to `count` questions and save it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Generate` when fewer than four usable
    /// entries exist, `QuizServiceError::Transition` when `count` is zero,
    /// and `QuizServiceError::Storage` on repository failures.
    pub async fn start_quiz(&self, count: usize) -> Result<QuizSession, QuizServiceError> {
        let vocabulary = self.vocab.quiz_vocabulary().await?;
        let mut rng = self.random.rng();
        let questions = self
            .generator
            .generate(&vocabulary.entries, count, &mut rng)?;
        let session = QuizSession::with_questions(questions)?;
        self.persist(&session).await?;

        info!(
            questions = session.total_questions(),
            vocabulary = vocabulary.entries.len(),
            skipped = vocabulary.skipped,
            seeded = self.random.is_seeded(),
            "quiz started"
        );
        Ok(session)
    }

    /// Replace `session` with a freshly generated quiz.
    ///
    /// On failure the existing session is left as it was.
    ///
    /// # Errors
    ///
    /// Same as [`start_quiz`](Self::start_quiz).
    pub async fn restart(
        &self,
        session: &mut QuizSession,
        count: usize,
    ) -> Result<(), QuizServiceError> {
        *session = self.start_quiz(count).await?;
        Ok(())
    }

    /// Load the saved quiz, if one exists and is readable.
    ///
    /// An unreadable snapshot is removed and treated as "no saved quiz",
    /// even when the removal itself fails.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the snapshot cannot be loaded.
    pub async fn resume(&self) -> Result<Option<QuizSession>, QuizServiceError> {
        let Some(record) = self.snapshots.load_snapshot(SESSION_SNAPSHOT_KEY).await? else {
            return Ok(None);
        };

        match SessionSnapshot::from_json(&record.payload).and_then(QuizSession::restore) {
            Ok(session) => {
                debug!(
                    index = session.current_question_index(),
                    total = session.total_questions(),
                    saved_at = %record.saved_at,
                    "resumed saved quiz"
                );
                Ok(Some(session))
            }
            Err(err) => {
                warn!(%err, "discarding unreadable saved quiz");
                if let Err(clear_err) = self.snapshots.clear_snapshot(SESSION_SNAPSHOT_KEY).await {
                    warn!(err = %clear_err, "could not remove unreadable saved quiz");
                }
                Ok(None)
            }
        }
    }

    /// Record a right/wrong answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Transition` if the question was already
    /// answered or the quiz is not running; nothing is persisted then.
    pub async fn submit_answer(
        &self,
        session: &mut QuizSession,
        is_correct: bool,
    ) -> Result<AnswerRecord, QuizServiceError> {
        let record = session.submit_answer(is_correct)?;
        self.persist(session).await?;
        debug!(index = record.question_index, is_correct, "answer recorded");
        Ok(record)
    }

    /// Answer the current question by option position.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Transition` for a bad option or repeated answer.
    pub async fn choose_option(
        &self,
        session: &mut QuizSession,
        option_index: usize,
    ) -> Result<AnswerFeedback, QuizServiceError> {
        let feedback = session.choose_option(option_index)?;
        self.persist(session).await?;
        debug!(
            index = session.current_question_index(),
            option_index,
            is_correct = feedback.is_correct,
            "option chosen"
        );
        Ok(feedback)
    }

    /// Move to the next question, or finish the quiz after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Transition` if the current question is unanswered.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<(), QuizServiceError> {
        session.advance()?;
        self.persist(session).await?;
        if session.is_over() {
            info!(
                score = session.score(),
                total = session.total_questions(),
                "quiz completed"
            );
        }
        Ok(())
    }

    /// Forget the saved quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the delete fails.
    pub async fn discard(&self) -> Result<(), QuizServiceError> {
        self.snapshots.clear_snapshot(SESSION_SNAPSHOT_KEY).await?;
        Ok(())
    }

    #[must_use]
    pub fn view<'a>(&self, session: &'a QuizSession) -> QuizView<'a> {
        QuizView::of(session)
    }

    async fn persist(&self, session: &QuizSession) -> Result<(), QuizServiceError> {
        let payload = session.snapshot().to_json()?;
        self.snapshots
            .save_snapshot(SESSION_SNAPSHOT_KEY, &payload, self.clock.now())
            .await?;
        Ok(())
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("clock", &self.clock)
            .field("random", &self.random)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
