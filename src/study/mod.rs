//! Flashcard study sessions derived from the table selection.

pub mod flag;
pub mod session;

pub use flag::{FlagMutation, FlagOutcome, persist_flag};
pub use session::{
    CardFace, Feedback, FeedbackKind, NO_SELECTION_MESSAGE, SESSION_ENDED_MESSAGE, StudySession,
};
