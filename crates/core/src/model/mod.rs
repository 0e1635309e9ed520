mod entry;
mod ids;
mod question;
mod result;
mod session;
mod snapshot;

pub use entry::{EntryError, VocabDraft, VocabEntry};
pub use ids::EntryId;
pub use question::{QuestionType, QuizOption, QuizQuestion};
pub use result::{QuizGrade, QuizResult};
pub use session::{AnswerFeedback, AnswerRecord, QuizSession, SessionState, TransitionError};
pub use snapshot::{SNAPSHOT_VERSION, SessionSnapshot, SnapshotError};
