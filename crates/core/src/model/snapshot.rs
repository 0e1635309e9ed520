use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerRecord, QuizQuestion};

/// Schema version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(String),
    #[error("snapshot schema version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("snapshot state is inconsistent: {0}")]
    Inconsistent(String),
}

/// Serialized copy of a [`QuizSession`](crate::model::QuizSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub version: u32,
    pub questions: Vec<QuizQuestion>,
    pub current_question_index: usize,
    pub score: usize,
    pub answers: Vec<AnswerRecord>,
    pub is_over: bool,
}

impl SessionSnapshot {
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    /// Parse a stored payload. Structural checks happen in `QuizSession::restore`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` for invalid JSON or missing fields.
    pub fn from_json(payload: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(payload).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionType, QuizOption, QuizSession};

    fn snapshot() -> SessionSnapshot {
        let question = QuizQuestion {
            question_text: "a feline".into(),
            options: vec![QuizOption::correct("cat"), QuizOption::distractor("dog")],
            correct_answer: "cat".into(),
            example: "The cat sat.".into(),
            question_type: QuestionType::DefinitionToWord,
            word: "cat".into(),
        };
        let mut session = QuizSession::with_questions(vec![question]).unwrap();
        session.submit_answer(true).unwrap();
        session.snapshot()
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = snapshot().to_json().unwrap();
        assert!(json.contains("\"currentQuestionIndex\":0"));
        assert!(json.contains("\"isOver\":false"));
        assert!(json.contains("\"questionIndex\":0"));
        assert!(json.contains("\"type\":\"definition-to-word\""));
    }

    #[test]
    fn json_round_trip() {
        let original = snapshot();
        let parsed = SessionSnapshot::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            SessionSnapshot::from_json("{not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            SessionSnapshot::from_json(r#"{"version":1}"#),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
