use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("word must not be empty")]
    EmptyWord,
    #[error("definition must not be empty")]
    EmptyDefinition,
    #[error("example must not be empty")]
    EmptyExample,
}

//
// ─── VOCAB ENTRY ───────────────────────────────────────────────────────────────
//

/// A vocabulary entry usable in a quiz.
///
/// `word` and `definition` are guaranteed non-blank; `example` may be empty.
/// Entries are compared by exact `word` when picking distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    word: String,
    definition: String,
    example: String,
}

impl VocabEntry {
    /// Build an entry from loosely-typed store data.
    ///
    /// Values are kept as given; only blankness is checked.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyWord` or `EntryError::EmptyDefinition` when
    /// the field is empty or whitespace only.
    pub fn from_raw(
        word: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
    ) -> Result<Self, EntryError> {
        let word = word.into();
        let definition = definition.into();
        if word.trim().is_empty() {
            return Err(EntryError::EmptyWord);
        }
        if definition.trim().is_empty() {
            return Err(EntryError::EmptyDefinition);
        }
        Ok(Self {
            word,
            definition,
            example: example.into(),
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn example(&self) -> &str {
        &self.example
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// User input for a new entry, before it is appended to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabDraft {
    pub word: String,
    pub definition: String,
    pub example: String,
}

impl VocabDraft {
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            example: example.into(),
        }
    }

    /// Trim every field and require all three to be present.
    ///
    /// # Errors
    ///
    /// Returns the `EntryError` for the first empty field.
    pub fn validate(self) -> Result<VocabEntry, EntryError> {
        let word = self.word.trim();
        let definition = self.definition.trim();
        let example = self.example.trim();
        if word.is_empty() {
            return Err(EntryError::EmptyWord);
        }
        if definition.is_empty() {
            return Err(EntryError::EmptyDefinition);
        }
        if example.is_empty() {
            return Err(EntryError::EmptyExample);
        }
        Ok(VocabEntry {
            word: word.to_owned(),
            definition: definition.to_owned(),
            example: example.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_blank_word_and_definition() {
        assert_eq!(
            VocabEntry::from_raw("  ", "a feline", "").unwrap_err(),
            EntryError::EmptyWord
        );
        assert_eq!(
            VocabEntry::from_raw("cat", "\t", "").unwrap_err(),
            EntryError::EmptyDefinition
        );
    }

    #[test]
    fn from_raw_allows_empty_example() {
        let entry = VocabEntry::from_raw("cat", "a feline", "").unwrap();
        assert_eq!(entry.word(), "cat");
        assert_eq!(entry.example(), "");
    }

    #[test]
    fn draft_trims_and_requires_every_field() {
        let entry = VocabDraft::new(" cat ", " a feline ", " The cat sat. ")
            .validate()
            .unwrap();
        assert_eq!(entry.word(), "cat");
        assert_eq!(entry.definition(), "a feline");
        assert_eq!(entry.example(), "The cat sat.");

        let err = VocabDraft::new("cat", "a feline", "   ").validate().unwrap_err();
        assert_eq!(err, EntryError::EmptyExample);

        let err = VocabDraft::new("", "a feline", "").validate().unwrap_err();
        assert_eq!(err, EntryError::EmptyWord);
    }
}
