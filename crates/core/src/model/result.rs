use crate::model::{AnswerRecord, QuizQuestion};

/// Verdict band shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizGrade {
    /// 80% and above.
    Excellent,
    /// 50% to 79%.
    Good,
    KeepPracticing,
}

impl QuizGrade {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => QuizGrade::Excellent,
            50..=79 => QuizGrade::Good,
            _ => QuizGrade::KeepPracticing,
        }
    }
}

/// Outcome of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
    pub grade: QuizGrade,
    /// Questions answered incorrectly, in quiz order.
    pub missed: Vec<QuizQuestion>,
}

impl QuizResult {
    #[must_use]
    pub fn from_answers(questions: &[QuizQuestion], answers: &[AnswerRecord]) -> Self {
        let score = answers.iter().filter(|a| a.is_correct).count();
        let total = questions.len();
        let percentage = if total == 0 {
            0
        } else {
            u32::try_from((score * 200 + total) / (2 * total)).unwrap_or(100)
        };
        let missed = answers
            .iter()
            .filter(|a| !a.is_correct)
            .filter_map(|a| questions.get(a.question_index).cloned())
            .collect();

        Self {
            score,
            total,
            percentage,
            grade: QuizGrade::from_percentage(percentage),
            missed,
        }
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty() && self.score == self.total
    }
}
