//! Input and overlay state for the vocabulary TUI.
//!
//! Filter, sort, and selection state live in [`crate::table`]; this module
//! only holds what the terminal front end needs on top: the text being
//! typed into a filter, the debounce for integer filters, and the cursors of
//! the membership picker and column finder overlays.

mod debounce;
mod filter_editor;
mod pickers;

pub use debounce::DebouncedInput;
pub use filter_editor::{FilterEditor, FilterTarget};
pub use pickers::{FinderNav, MembershipPicker};
