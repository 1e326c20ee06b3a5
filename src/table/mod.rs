//! Vocabulary table: filters, sorting, column layout, and row selection.
//!
//! The pieces compose in [`TableView`]: the visible rows are the entries
//! passing every predicate of the [`FilterPredicateSet`], ordered by the
//! [`SortSpec`]. Column visibility is driven by the [`TableLayout`] and the
//! hierarchical [`ColumnFinder`].

pub mod columns;
pub mod cursor;
pub mod filter;
pub mod finder;
pub mod integer_set;
pub mod layout;
pub mod sort;
pub mod view;

pub use columns::{ColumnId, FilterKind};
pub use cursor::RowCursor;
pub use filter::{ColumnPredicate, FilterPredicateSet};
pub use finder::{ColumnFinder, ColumnNode, NodeStatus, default_hierarchy};
pub use integer_set::IntegerSet;
pub use layout::{ColumnLayout, SELECT_COLUMN_WIDTH, TableLayout};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use view::{SelectAllState, TableView};
