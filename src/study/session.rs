//! Flashcard session over a snapshot of the selected entries.
//!
//! A session starts from full entry copies captured when the user leaves the
//! table. Removing a card excludes it from the session and drops it from the
//! durable selection; flagging a card changes the snapshot immediately and
//! is rolled back if the backend refuses the change.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::flag::{FlagMutation, FlagOutcome};
use crate::selection::{SelectionError, SelectionStore};
use crate::table::columns::MISSING_TEXT;
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use crate::vocabulary::Entry;

/// Shown when the session was started without any entries.
pub const NO_SELECTION_MESSAGE: &str = "No vocabulary items selected or passed to study.";

/// Shown once every card of a non-empty session has been removed.
pub const SESSION_ENDED_MESSAGE: &str = "All items removed from this session or session ended.";

/// Tone of a feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Confirmation of a user action.
    Info,
    /// A backend or storage failure.
    Error,
}

/// Transient message shown above the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Text to display.
    pub message: String,
    /// Tone of the message.
    pub kind: FeedbackKind,
    /// Increases with every new message; expiry timers carry it so a stale
    /// timer cannot clear a newer message.
    pub generation: u64,
}

/// One side of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace<'a> {
    /// Small reading line above the main text (furigana on the back).
    pub reading: Option<&'a str>,
    /// Main text of the face.
    pub text: &'a str,
}

/// State of one study session.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    snapshot: Vec<Entry>,
    removed_ids: HashSet<i64>,
    cursor: usize,
    flipped: bool,
    feedback: Option<Feedback>,
    feedback_generation: u64,
}

impl StudySession {
    /// Starts a session over `entries`, keeping the caller's order.
    #[must_use]
    pub fn start(entries: Vec<Entry>) -> Self {
        Self {
            snapshot: entries,
            ..Self::default()
        }
    }

    /// Every entry captured at start, including removed ones.
    #[must_use]
    pub fn snapshot(&self) -> &[Entry] {
        &self.snapshot
    }

    /// Entries still in the session, in snapshot order.
    pub fn active_entries(&self) -> impl Iterator<Item = &Entry> {
        self.snapshot
            .iter()
            .filter(|entry| !self.removed_ids.contains(&entry.id))
    }

    /// Number of entries still in the session.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_entries().count()
    }

    /// Returns true when no card is left to study.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Entry> {
        self.active_entries().nth(self.cursor)
    }

    /// Zero-based position within the active entries.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true when the back of the card is showing.
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Current feedback line.
    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// One-based position and active total, or `None` when empty.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        let total = self.active_count();
        (total > 0).then(|| (self.cursor.saturating_add(1), total))
    }

    /// Message explaining why there is nothing to study.
    #[must_use]
    pub fn empty_message(&self) -> &'static str {
        if self.snapshot.is_empty() {
            NO_SELECTION_MESSAGE
        } else {
            SESSION_ENDED_MESSAGE
        }
    }

    /// Front of the current card: the English word.
    #[must_use]
    pub fn front(&self) -> Option<CardFace<'_>> {
        self.current().map(|entry| CardFace {
            reading: None,
            text: entry.english.as_deref().unwrap_or(MISSING_TEXT),
        })
    }

    /// Back of the current card: furigana above the Japanese text.
    #[must_use]
    pub fn back(&self) -> Option<CardFace<'_>> {
        self.current().map(|entry| CardFace {
            reading: entry.furigana.as_deref().filter(|text| !text.is_empty()),
            text: entry.japanese.as_deref().unwrap_or(MISSING_TEXT),
        })
    }

    /// The face currently showing.
    #[must_use]
    pub fn visible_face(&self) -> Option<CardFace<'_>> {
        if self.flipped {
            self.back()
        } else {
            self.front()
        }
    }

    /// Moves to the next card. Returns false at the last card.
    pub fn next(&mut self) -> bool {
        if self.cursor.saturating_add(1) >= self.active_count() {
            return false;
        }
        self.cursor = self.cursor.saturating_add(1);
        self.reset_card();
        true
    }

    /// Moves to the previous card. Returns false at the first card.
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.reset_card();
        true
    }

    /// Turns the current card over. Returns false when the session is empty.
    pub fn flip(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.flipped = !self.flipped;
        self.feedback = None;
        true
    }

    /// Removes the current card from the session and from `selection`.
    ///
    /// Returns the removed id, or `None` when the session is empty. The
    /// cursor stays put unless it fell off the end of the shrunk list.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the selection could not be written.
    /// The card has left the session regardless.
    pub fn remove_current(
        &mut self,
        selection: &mut SelectionStore,
    ) -> Result<Option<i64>, SelectionError> {
        let Some(entry) = self.current() else {
            return Ok(None);
        };
        let id = entry.id;
        let name = entry.display_name();

        self.removed_ids.insert(id);
        let remaining = self.active_count();
        if self.cursor >= remaining {
            self.cursor = remaining.saturating_sub(1);
        }
        self.flipped = false;
        self.set_feedback(
            format!("\"{name}\" removed from session."),
            FeedbackKind::Info,
        );
        debug!(entry_id = id, remaining, "card removed from session");

        selection.remove(id)?;
        Ok(Some(id))
    }

    /// Toggles the current card's flag locally and describes the backend
    /// request needed to make it stick.
    ///
    /// Returns `None` when the session is empty.
    pub fn flag_current(&mut self) -> Option<FlagMutation> {
        let removed = &self.removed_ids;
        let entry = self
            .snapshot
            .iter_mut()
            .filter(|entry| !removed.contains(&entry.id))
            .nth(self.cursor)?;

        let previous = entry.flag;
        let requested = previous.toggled();
        entry.flag = requested;
        let mutation = FlagMutation {
            id: entry.id,
            previous,
            requested,
        };
        let name = entry.display_name();

        self.flipped = false;
        let action = if requested.is_flagged() {
            "flagged"
        } else {
            "unflagged"
        };
        self.set_feedback(format!("\"{name}\" {action}!"), FeedbackKind::Info);
        Some(mutation)
    }

    /// Applies the backend's answer to a flag request.
    ///
    /// On failure the snapshot entry goes back to the value it had before
    /// the toggle and an error feedback replaces the confirmation. Removed
    /// cards and the cursor are never touched. Returns true when a rollback
    /// happened.
    pub fn apply_flag_outcome(
        &mut self,
        outcome: &FlagOutcome,
        telemetry: &dyn TelemetrySink,
    ) -> bool {
        let Err(error) = &outcome.result else {
            return false;
        };
        let id = outcome.mutation.id;
        if let Some(entry) = self.snapshot.iter_mut().find(|entry| entry.id == id) {
            entry.flag = outcome.mutation.previous;
        }
        warn!(entry_id = id, error = %error, "flag update failed; reverted");
        telemetry.record(TelemetryEvent::FlagRolledBack { entry_id: id });
        self.set_feedback(format!("Error flagging item: {error}"), FeedbackKind::Error);
        true
    }

    /// Clears the feedback if it is still the message from `generation`.
    ///
    /// Returns true when the feedback was cleared.
    pub fn expire_feedback(&mut self, generation: u64) -> bool {
        let current = self
            .feedback
            .as_ref()
            .is_some_and(|feedback| feedback.generation == generation);
        if current {
            self.feedback = None;
        }
        current
    }

    fn reset_card(&mut self) {
        self.flipped = false;
        self.feedback = None;
    }

    fn set_feedback(&mut self, message: String, kind: FeedbackKind) {
        self.feedback_generation = self.feedback_generation.wrapping_add(1);
        self.feedback = Some(Feedback {
            message,
            kind,
            generation: self.feedback_generation,
        });
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
