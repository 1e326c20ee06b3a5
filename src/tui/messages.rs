//! Message types for the TUI update loop.
//!
//! Messages represent user actions mapped from key presses, results of
//! async commands (entry loads, flag writes), and timer ticks.

use crate::study::FlagOutcome;
use crate::vocabulary::Entry;

/// Messages for the vocabulary TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Navigation
    /// Move the row (or overlay) cursor up.
    CursorUp,
    /// Move the row (or overlay) cursor down.
    CursorDown,
    /// Move the row cursor up one page.
    PageUp,
    /// Move the row cursor down one page.
    PageDown,
    /// Move the row cursor to the first row.
    Home,
    /// Move the row cursor to the last row.
    End,
    /// Focus the column to the left.
    ColumnLeft,
    /// Focus the column to the right.
    ColumnRight,

    // Table actions
    /// Flip the selection of the row under the cursor.
    ToggleRow,
    /// Select every visible row, or deselect them when all are selected.
    ToggleAllVisible,
    /// Cycle the sort state of the focused column.
    SortColumn {
        /// Append to the existing sort keys instead of replacing them.
        multi: bool,
    },
    /// Drop every sort key.
    ClearSort,
    /// Grow the focused column by one cell.
    WidenColumn,
    /// Shrink the focused column by one cell.
    NarrowColumn,
    /// Edit the filter of the focused column.
    EditColumnFilter,
    /// Edit the global search.
    EditGlobalSearch,
    /// Remove every filter.
    ClearFilters,
    /// Open the column finder overlay.
    OpenColumnFinder,
    /// Start a study session over the selected entries.
    StartSession,
    /// Fetch the entries again.
    RefreshRequested,

    // Text input
    /// A character typed into the filter editor.
    InputChar(char),
    /// Delete the last character of the filter editor.
    InputBackspace,
    /// Apply the filter editor and close it.
    InputSubmit,
    /// Close the filter editor; applied text stays applied.
    InputCancel,

    // Overlays
    /// Toggle the highlighted option or column.
    OverlayToggle,
    /// Open the highlighted finder group.
    OverlayEnter,
    /// Return to the parent finder level.
    OverlayBack,
    /// Close the open overlay.
    CloseOverlay,

    // Study session
    /// Show the previous card.
    PreviousCard,
    /// Show the next card.
    NextCard,
    /// Turn the card over.
    FlipCard,
    /// Remove the card from the session and the selection.
    RemoveCard,
    /// Toggle the card's flag.
    FlagCard,
    /// Return to the table.
    LeaveSession,

    // Async results and timers
    /// Entries fetched from the backend.
    EntriesLoaded {
        /// Full entry collection.
        entries: Vec<Entry>,
        /// How long the fetch took.
        latency_ms: u64,
    },
    /// The fetch failed.
    EntriesFailed(String),
    /// Debounce timer for an integer filter fired.
    FilterDebounceTick {
        /// Generation the timer was armed with.
        generation: u64,
    },
    /// Backend answer to a flag change.
    FlagPersisted(FlagOutcome),
    /// Feedback expiry timer fired.
    FeedbackExpired {
        /// Generation of the feedback the timer was armed for.
        generation: u64,
    },

    // Application lifecycle
    /// Synthetic startup message that triggers the first load.
    Initialized,
    /// Quit the application.
    Quit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for cursor and focus movement.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp
                | Self::CursorDown
                | Self::PageUp
                | Self::PageDown
                | Self::Home
                | Self::End
                | Self::ColumnLeft
                | Self::ColumnRight
        )
    }

    /// Returns true for filter editing and overlay messages.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::EditColumnFilter
                | Self::EditGlobalSearch
                | Self::ClearFilters
                | Self::OpenColumnFinder
                | Self::InputChar(_)
                | Self::InputBackspace
                | Self::InputSubmit
                | Self::InputCancel
                | Self::OverlayToggle
                | Self::OverlayEnter
                | Self::OverlayBack
                | Self::CloseOverlay
                | Self::FilterDebounceTick { .. }
        )
    }

    /// Returns true for study session messages.
    #[must_use]
    pub const fn is_study(&self) -> bool {
        matches!(
            self,
            Self::PreviousCard
                | Self::NextCard
                | Self::FlipCard
                | Self::RemoveCard
                | Self::FlagCard
                | Self::LeaveSession
                | Self::FlagPersisted(_)
                | Self::FeedbackExpired { .. }
        )
    }

    /// Returns true for entry loading messages.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(
            self,
            Self::RefreshRequested | Self::EntriesLoaded { .. } | Self::EntriesFailed(_)
        )
    }
}
