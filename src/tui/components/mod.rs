//! UI components for the vocabulary TUI.
//!
//! Components are stateless renderers: each takes a borrowed view context
//! and returns the frame text for its region.

mod flashcard;
mod text_fit;
mod vocab_table;

pub use flashcard::{FlashcardComponent, FlashcardViewContext};
pub use vocab_table::{VocabTableComponent, VocabTableViewContext};
