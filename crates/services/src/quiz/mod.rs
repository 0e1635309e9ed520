mod service;
mod view;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use service::{QuizService, SESSION_SNAPSHOT_KEY};
pub use view::QuizView;
