#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod model;
pub mod random;
pub mod time;

pub use error::Error;
pub use generator::{GenerateError, MIN_VOCABULARY, OPTIONS_PER_QUESTION, QuestionGenerator};
pub use random::RandomSource;
pub use time::Clock;
