#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod vocab_service;

pub use quiz_core::{Clock, RandomSource};

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizServiceError, VocabServiceError};
pub use quiz::{QuizService, QuizView, SESSION_SNAPSHOT_KEY};
pub use vocab_service::{VocabService, VocabularyLoad};
