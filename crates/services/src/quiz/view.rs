use quiz_core::model::{QuizQuestion, QuizSession};

/// Read-only state the presentation layer renders from.
///
/// No formatting happens here; the front end decides how to show progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizView<'a> {
    pub current_question: Option<&'a QuizQuestion>,
    pub current_question_index: usize,
    pub score: usize,
    pub is_over: bool,
    pub total_questions: usize,
    pub is_current_answered: bool,
}

impl<'a> QuizView<'a> {
    #[must_use]
    pub fn of(session: &'a QuizSession) -> Self {
        Self {
            current_question: session.current_question(),
            current_question_index: session.current_question_index(),
            score: session.score(),
            is_over: session.is_over(),
            total_questions: session.total_questions(),
            is_current_answered: session.is_current_answered(),
        }
    }

    /// One-based position for "question N of M" displays.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current_question_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionType, QuizOption};

    #[test]
    fn view_reflects_session_progress() {
        let question = QuizQuestion {
            question_text: "cat".into(),
            options: vec![QuizOption::correct("a feline")],
            correct_answer: "a feline".into(),
            example: String::new(),
            question_type: QuestionType::WordToDefinition,
            word: "cat".into(),
        };
        let mut session = QuizSession::with_questions(vec![question.clone(), question]).unwrap();
        session.submit_answer(true).unwrap();

        let view = QuizView::of(&session);
        assert_eq!(view.question_number(), 1);
        assert_eq!(view.total_questions, 2);
        assert_eq!(view.score, 1);
        assert!(view.is_current_answered);
        assert!(!view.is_over);
        assert_eq!(view.current_question.map(|q| q.word.as_str()), Some("cat"));
    }
}
