use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{QuizQuestion, QuizResult, SNAPSHOT_VERSION, SessionSnapshot, SnapshotError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Out-of-order use of the session state machine.
///
/// These are caller contract violations; the presentation layer is expected
/// to prevent them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("a quiz needs at least one question")]
    NoQuestions,
    #[error("quiz has not been started")]
    NotStarted,
    #[error("quiz is already over")]
    Completed,
    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },
    #[error("question {index} has not been answered yet")]
    NotAnswered { index: usize },
    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub is_correct: bool,
}

/// What the user sees right after picking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_answer: String,
    pub word: String,
    pub example: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress { index: usize, answered: bool },
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Progress through one quiz run.
///
/// Questions are fixed at [`start`](Self::start); the session then alternates
/// `submit_answer` / `advance` until the last question has been passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
    is_over: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and start it immediately.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NoQuestions` if `questions` is empty.
    pub fn with_questions(questions: Vec<QuizQuestion>) -> Result<Self, TransitionError> {
        let mut session = Self::new();
        session.start(questions)?;
        Ok(session)
    }

    /// Begin a fresh run, discarding any previous progress.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NoQuestions` if `questions` is empty; the
    /// session is left untouched in that case.
    pub fn start(&mut self, questions: Vec<QuizQuestion>) -> Result<(), TransitionError> {
        if questions.is_empty() {
            return Err(TransitionError::NoQuestions);
        }
        *self = Self {
            questions,
            ..Self::default()
        };
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.questions.is_empty() {
            SessionState::NotStarted
        } else if self.is_over {
            SessionState::Completed
        } else {
            SessionState::InProgress {
                index: self.current_index,
                answered: self.is_current_answered(),
            }
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.is_over {
            return None;
        }
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.answers.len() > self.current_index
    }

    fn ensure_in_progress(&self) -> Result<(), TransitionError> {
        match self.state() {
            SessionState::NotStarted => Err(TransitionError::NotStarted),
            SessionState::Completed => Err(TransitionError::Completed),
            SessionState::InProgress { .. } => Ok(()),
        }
    }

    /// Record the answer to the current question.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::AlreadyAnswered` on a second submission for
    /// the same question, or `NotStarted` / `Completed` outside a run.
    pub fn submit_answer(&mut self, is_correct: bool) -> Result<AnswerRecord, TransitionError> {
        self.ensure_in_progress()?;
        if self.is_current_answered() {
            return Err(TransitionError::AlreadyAnswered {
                index: self.current_index,
            });
        }

        let record = AnswerRecord {
            question_index: self.current_index,
            is_correct,
        };
        self.answers.push(record);
        if is_correct {
            self.score += 1;
        }
        Ok(record)
    }

    /// Answer the current question by picking one of its options.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::OptionOutOfRange` for a bad index, otherwise
    /// the same errors as [`submit_answer`](Self::submit_answer).
    pub fn choose_option(&mut self, option_index: usize) -> Result<AnswerFeedback, TransitionError> {
        self.ensure_in_progress()?;
        let question = &self.questions[self.current_index];
        let option = question
            .options
            .get(option_index)
            .ok_or(TransitionError::OptionOutOfRange {
                index: option_index,
                len: question.options.len(),
            })?;

        let feedback = AnswerFeedback {
            is_correct: option.is_correct,
            correct_answer: question.correct_answer.clone(),
            word: question.word.clone(),
            example: question.example.clone(),
        };
        self.submit_answer(feedback.is_correct)?;
        Ok(feedback)
    }

    /// Move past the answered current question; passing the last one ends the quiz.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NotAnswered` if the current question has no
    /// answer yet, or `NotStarted` / `Completed` outside a run.
    pub fn advance(&mut self) -> Result<(), TransitionError> {
        self.ensure_in_progress()?;
        if !self.is_current_answered() {
            return Err(TransitionError::NotAnswered {
                index: self.current_index,
            });
        }

        if self.current_index + 1 >= self.questions.len() {
            self.is_over = true;
        } else {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Summary of a finished run; `None` until the quiz is over.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.is_over.then(|| QuizResult::from_answers(&self.questions, &self.answers))
    }

    //
    // ─── PERSISTENCE ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            questions: self.questions.clone(),
            current_question_index: self.current_index,
            score: self.score,
            answers: self.answers.clone(),
            is_over: self.is_over,
        }
    }

    /// Rebuild a session from a snapshot, rejecting anything a live session could not reach.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::UnsupportedVersion` for another schema version
    /// and `SnapshotError::Inconsistent` when the state breaks an invariant.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let SessionSnapshot {
            questions,
            current_question_index,
            score,
            answers,
            is_over,
            ..
        } = snapshot;

        let inconsistent = |reason: &str| Err(SnapshotError::Inconsistent(reason.to_owned()));

        if questions.is_empty() {
            return inconsistent("no questions");
        }
        if !questions.iter().all(QuizQuestion::is_well_formed) {
            return inconsistent("malformed question options");
        }
        if current_question_index >= questions.len() {
            return inconsistent("question index out of range");
        }
        if answers
            .iter()
            .enumerate()
            .any(|(i, record)| record.question_index != i)
        {
            return inconsistent("answers out of order");
        }

        let answered = answers.len();
        let position_ok = if is_over {
            answered == questions.len() && current_question_index + 1 == questions.len()
        } else {
            answered == current_question_index || answered == current_question_index + 1
        };
        if !position_ok {
            return inconsistent("answers do not match question index");
        }
        if score != answers.iter().filter(|a| a.is_correct).count() {
            return inconsistent("score does not match answers");
        }

        Ok(Self {
            questions,
            current_index: current_question_index,
            score,
            answers,
            is_over,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionType, QuizOption};

    fn question(word: &str) -> QuizQuestion {
        QuizQuestion {
            question_text: word.to_owned(),
            options: vec![
                QuizOption::distractor(format!("not {word}")),
                QuizOption::correct(format!("meaning of {word}")),
            ],
            correct_answer: format!("meaning of {word}"),
            example: String::new(),
            question_type: QuestionType::WordToDefinition,
            word: word.to_owned(),
        }
    }

    fn session(n: usize) -> QuizSession {
        let questions = (0..n).map(|i| question(&format!("w{i}"))).collect();
        QuizSession::with_questions(questions).unwrap()
    }

    #[test]
    fn new_session_is_not_started() {
        let mut session = QuizSession::new();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.current_question().is_none());
        assert_eq!(session.submit_answer(true), Err(TransitionError::NotStarted));
        assert_eq!(session.advance(), Err(TransitionError::NotStarted));
    }

    #[test]
    fn start_requires_questions() {
        let mut session = QuizSession::new();
        assert_eq!(session.start(Vec::new()), Err(TransitionError::NoQuestions));
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn all_correct_run_completes_with_full_score() {
        let mut session = session(5);
        for _ in 0..5 {
            session.submit_answer(true).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.score(), 5);
        assert!(session.is_over());
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn second_submission_for_same_question_is_rejected() {
        let mut session = session(2);
        session.submit_answer(true).unwrap();
        session.advance().unwrap();

        session.submit_answer(false).unwrap();
        let err = session.submit_answer(true).unwrap_err();
        assert_eq!(err, TransitionError::AlreadyAnswered { index: 1 });

        let for_second = session
            .answers()
            .iter()
            .filter(|a| a.question_index == 1)
            .count();
        assert_eq!(for_second, 1);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = session(2);
        assert_eq!(
            session.advance(),
            Err(TransitionError::NotAnswered { index: 0 })
        );
        assert_eq!(session.current_question_index(), 0);
    }

    #[test]
    fn completed_session_rejects_further_input() {
        let mut session = session(1);
        session.submit_answer(false).unwrap();
        session.advance().unwrap();
        assert_eq!(session.submit_answer(true), Err(TransitionError::Completed));
        assert_eq!(session.advance(), Err(TransitionError::Completed));
    }

    #[test]
    fn state_tracks_answered_flag() {
        let mut session = session(3);
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                index: 0,
                answered: false
            }
        );
        session.submit_answer(true).unwrap();
        assert_eq!(
            session.state(),
            SessionState::InProgress {
                index: 0,
                answered: true
            }
        );
    }

    #[test]
    fn restart_discards_progress() {
        let mut session = session(3);
        session.submit_answer(true).unwrap();
        session.advance().unwrap();

        session.start(vec![question("again")]).unwrap();
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.total_questions(), 1);
    }

    #[test]
    fn choose_option_reports_feedback() {
        let mut session = session(1);
        let feedback = session.choose_option(0).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, "meaning of w0");
        assert_eq!(feedback.word, "w0");
        assert_eq!(session.score(), 0);

        assert_eq!(
            session.choose_option(1),
            Err(TransitionError::AlreadyAnswered { index: 0 })
        );
    }

    #[test]
    fn choose_option_rejects_bad_index() {
        let mut session = session(1);
        assert_eq!(
            session.choose_option(9),
            Err(TransitionError::OptionOutOfRange { index: 9, len: 2 })
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn result_lists_missed_questions() {
        let mut session = session(2);
        assert!(session.result().is_none());
        session.submit_answer(false).unwrap();
        session.advance().unwrap();
        session.submit_answer(true).unwrap();
        session.advance().unwrap();

        let result = session.result().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.missed.len(), 1);
        assert_eq!(result.missed[0].word, "w0");
    }

    #[test]
    fn snapshot_restore_is_identity() {
        let mut session = session(3);
        session.submit_answer(true).unwrap();
        session.advance().unwrap();
        session.submit_answer(false).unwrap();

        let restored = QuizSession::restore(session.snapshot()).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn restore_rejects_score_mismatch() {
        let mut session = session(2);
        session.submit_answer(false).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.score = 1;
        assert!(matches!(
            QuizSession::restore(snapshot),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn restore_rejects_skipped_answers() {
        let session = session(3);
        let mut snapshot = session.snapshot();
        snapshot.current_question_index = 2;
        assert!(matches!(
            QuizSession::restore(snapshot),
            Err(SnapshotError::Inconsistent(_))
        ));
    }

    #[test]
    fn restore_rejects_other_versions() {
        let mut snapshot = session(1).snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            QuizSession::restore(snapshot),
            Err(SnapshotError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn restore_rejects_empty_session() {
        let snapshot = QuizSession::new().snapshot();
        assert!(QuizSession::restore(snapshot).is_err());
    }

    fn inconsistency(snapshot: SessionSnapshot) -> String {
        match QuizSession::restore(snapshot) {
            Err(SnapshotError::Inconsistent(reason)) => reason,
            other => panic!("expected an inconsistent snapshot, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_index_past_the_end() {
        let mut snapshot = session(2).snapshot();
        snapshot.current_question_index = 5;
        assert_eq!(inconsistency(snapshot), "question index out of range");
    }

    #[test]
    fn restore_rejects_finished_flag_before_last_answer() {
        let mut session = session(2);
        session.submit_answer(true).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.is_over = true;
        assert_eq!(inconsistency(snapshot), "answers do not match question index");
    }

    #[test]
    fn restore_rejects_answer_for_wrong_question() {
        let mut session = session(2);
        session.submit_answer(true).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.answers[0].question_index = 1;
        assert_eq!(inconsistency(snapshot), "answers out of order");
    }

    #[test]
    fn restore_rejects_question_with_two_correct_options() {
        let mut snapshot = session(2).snapshot();
        snapshot.questions[0].options[0].is_correct = true;
        assert_eq!(inconsistency(snapshot), "malformed question options");
    }

    #[test]
    fn restore_rejects_answers_running_ahead() {
        let mut session = session(3);
        session.submit_answer(false).unwrap();
        let mut snapshot = session.snapshot();
        snapshot.answers.push(AnswerRecord {
            question_index: 1,
            is_correct: false,
        });
        assert_eq!(inconsistency(snapshot), "answers do not match question index");
    }
}
