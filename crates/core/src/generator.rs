use std::collections::HashSet;

use rand::Rng;
use rand::seq::{SliceRandom, index};
use thiserror::Error;

use crate::model::{QuestionType, QuizOption, QuizQuestion, VocabEntry};

/// Smallest vocabulary a quiz can be generated from.
///
/// Counts entries, not distinct words: with repeated words or shared
/// definitions a question may end up with fewer than four options.
pub const MIN_VOCABULARY: usize = 4;

/// Correct answer plus up to three distractors.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("at least {required} vocabulary entries are needed to start a quiz, found {found}")]
    InsufficientVocabulary { found: usize, required: usize },
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Turns a vocabulary list into multiple-choice questions.
///
/// Stateless apart from its configuration; all randomness comes from the
/// caller's RNG so a seeded generator reproduces the same quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionGenerator {
    min_vocabulary: usize,
    options_per_question: usize,
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_vocabulary: MIN_VOCABULARY,
            options_per_question: OPTIONS_PER_QUESTION,
        }
    }

    /// Generate up to `count` questions, one per distinct subject entry.
    ///
    /// Subjects are the first `min(count, vocab.len())` entries of a uniform
    /// permutation. Each question picks its direction with probability 1/2 and
    /// draws distractors from entries with a different `word`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::InsufficientVocabulary` if `vocab` holds fewer
    /// than [`MIN_VOCABULARY`] entries.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        vocab: &[VocabEntry],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<QuizQuestion>, GenerateError> {
        if vocab.len() < self.min_vocabulary {
            return Err(GenerateError::InsufficientVocabulary {
                found: vocab.len(),
                required: self.min_vocabulary,
            });
        }

        let mut order: Vec<&VocabEntry> = vocab.iter().collect();
        order.shuffle(rng);

        let questions = order
            .iter()
            .take(count)
            .map(|subject| {
                let question_type = if rng.random_bool(0.5) {
                    QuestionType::WordToDefinition
                } else {
                    QuestionType::DefinitionToWord
                };
                self.build_question(subject, question_type, vocab, rng)
            })
            .collect();

        Ok(questions)
    }

    fn build_question<R: Rng + ?Sized>(
        &self,
        subject: &VocabEntry,
        question_type: QuestionType,
        vocab: &[VocabEntry],
        rng: &mut R,
    ) -> QuizQuestion {
        let correct = question_type.answer_of(subject);

        let mut seen: HashSet<&str> = HashSet::from([correct]);
        let pool: Vec<&str> = vocab
            .iter()
            .filter(|entry| entry.word() != subject.word())
            .map(|entry| question_type.answer_of(entry))
            .filter(|text| seen.insert(*text))
            .collect();

        let wanted = self.options_per_question.saturating_sub(1).min(pool.len());
        let mut options = Vec::with_capacity(wanted + 1);
        options.push(QuizOption::correct(correct));
        options.extend(
            index::sample(rng, pool.len(), wanted)
                .into_iter()
                .map(|i| QuizOption::distractor(pool[i])),
        );
        options.shuffle(rng);

        QuizQuestion {
            question_text: question_type.prompt_of(subject).to_owned(),
            options,
            correct_answer: correct.to_owned(),
            example: subject.example().to_owned(),
            question_type,
            word: subject.word().to_owned(),
        }
    }
}
