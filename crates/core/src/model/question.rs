use serde::{Deserialize, Serialize};

use crate::model::VocabEntry;

/// Direction of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Prompt is the word, options are definitions.
    WordToDefinition,
    /// Prompt is the definition, options are words.
    DefinitionToWord,
}

impl QuestionType {
    /// Text shown as the question prompt for `entry`.
    #[must_use]
    pub fn prompt_of<'a>(&self, entry: &'a VocabEntry) -> &'a str {
        match self {
            QuestionType::WordToDefinition => entry.word(),
            QuestionType::DefinitionToWord => entry.definition(),
        }
    }

    /// Text offered as an answer option for `entry`.
    #[must_use]
    pub fn answer_of<'a>(&self, entry: &'a VocabEntry) -> &'a str {
        match self {
            QuestionType::WordToDefinition => entry.definition(),
            QuestionType::DefinitionToWord => entry.word(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
        }
    }

    #[must_use]
    pub fn distractor(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

/// A generated multiple-choice question.
///
/// Built once per quiz run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
    pub example: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Subject word, kept for feedback and the result review list.
    pub word: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }

    /// Exactly one correct option whose text is `correct_answer`, and no repeated texts.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut correct = self.options.iter().filter(|o| o.is_correct);
        let single_correct = matches!(
            (correct.next(), correct.next()),
            (Some(option), None) if option.text == self.correct_answer
        );
        let unique_texts = self
            .options
            .iter()
            .enumerate()
            .all(|(i, a)| self.options[i + 1..].iter().all(|b| b.text != a.text));
        single_correct && unique_texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: Vec<QuizOption>) -> QuizQuestion {
        QuizQuestion {
            question_text: "cat".into(),
            options,
            correct_answer: "a feline".into(),
            example: "The cat sat.".into(),
            question_type: QuestionType::WordToDefinition,
            word: "cat".into(),
        }
    }

    #[test]
    fn question_type_picks_fields() {
        let entry = VocabEntry::from_raw("cat", "a feline", "").unwrap();
        assert_eq!(QuestionType::WordToDefinition.prompt_of(&entry), "cat");
        assert_eq!(QuestionType::WordToDefinition.answer_of(&entry), "a feline");
        assert_eq!(QuestionType::DefinitionToWord.prompt_of(&entry), "a feline");
        assert_eq!(QuestionType::DefinitionToWord.answer_of(&entry), "cat");
    }

    #[test]
    fn question_type_serializes_kebab_case() {
        let json = serde_json::to_string(&QuestionType::DefinitionToWord).unwrap();
        assert_eq!(json, "\"definition-to-word\"");
        let back: QuestionType = serde_json::from_str("\"word-to-definition\"").unwrap();
        assert_eq!(back, QuestionType::WordToDefinition);
    }

    #[test]
    fn well_formed_requires_one_matching_correct_option() {
        let ok = question(vec![
            QuizOption::distractor("a canine"),
            QuizOption::correct("a feline"),
        ]);
        assert!(ok.is_well_formed());
        assert_eq!(ok.correct_option_index(), Some(1));

        let two_correct = question(vec![
            QuizOption::correct("a feline"),
            QuizOption::correct("a canine"),
        ]);
        assert!(!two_correct.is_well_formed());

        let wrong_text = question(vec![QuizOption::correct("a canine")]);
        assert!(!wrong_text.is_well_formed());

        let repeated = question(vec![
            QuizOption::correct("a feline"),
            QuizOption::distractor("a feline"),
        ]);
        assert!(!repeated.is_well_formed());
    }
}
