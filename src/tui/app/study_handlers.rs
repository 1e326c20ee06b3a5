//! Flashcard session handlers.
//!
//! Flag toggles are optimistic: the session flips the card immediately and
//! a command persists the change in the background. Its
//! [`AppMsg::FlagPersisted`] answer either confirms the toggle or rolls it
//! back. Feedback lines expire after [`crate::tui::TuiTimings::feedback_ttl`].

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Cmd;
use tracing::{debug, warn};

use super::{ViewMode, VocabularyApp};
use crate::study::{FlagMutation, FlagOutcome, persist_flag};
use crate::tui::messages::AppMsg;
use crate::vocabulary::GatewayError;

impl VocabularyApp {
    /// Dispatches study session messages to their handlers.
    pub(super) fn handle_study_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::LeaveSession => return self.handle_leave_session(),
            AppMsg::FlagPersisted(outcome) => return self.handle_flag_persisted(outcome),
            _ => {}
        }
        let session = self.session.as_mut()?;
        match msg {
            AppMsg::PreviousCard => {
                session.previous();
                None
            }
            AppMsg::NextCard => {
                session.next();
                None
            }
            AppMsg::FlipCard => {
                session.flip();
                None
            }
            AppMsg::RemoveCard => self.handle_remove_card(),
            AppMsg::FlagCard => self.handle_flag_card(),
            AppMsg::FeedbackExpired { generation } => {
                session.expire_feedback(*generation);
                None
            }
            _ => None,
        }
    }

    /// Removes the current card from the session and the selection.
    fn handle_remove_card(&mut self) -> Option<Cmd> {
        let session = self.session.as_mut()?;
        if let Err(error) = session.remove_current(&mut self.selection) {
            self.report_selection_error(&error);
        }
        self.arm_feedback_expiry()
    }

    /// Flips the card's flag locally and persists it in the background.
    fn handle_flag_card(&mut self) -> Option<Cmd> {
        let mutation = self.session.as_mut()?.flag_current()?;
        debug!(entry_id = mutation.id, "flag change requested");
        self.flags_in_flight = self.flags_in_flight.saturating_add(1);
        Some(self.persist_flag_cmd(mutation))
    }

    fn persist_flag_cmd(&self, mutation: FlagMutation) -> Cmd {
        let gateway = self.gateway.as_ref().map(Arc::clone);
        Box::pin(async move {
            let outcome = match gateway {
                Some(backend) => persist_flag(backend.as_ref(), mutation).await,
                None => FlagOutcome {
                    mutation,
                    result: Err(GatewayError::Unavailable {
                        message: "no vocabulary backend configured".to_owned(),
                    }),
                },
            };
            Some(Box::new(AppMsg::FlagPersisted(outcome)) as Box<dyn Any + Send>)
        })
    }

    /// Confirms or rolls back a flag toggle, then schedules the feedback
    /// line to clear.
    ///
    /// An answer arriving after the session closed has no card to roll back.
    /// When it is the last one a closed session was waiting on, the table
    /// reloads instead.
    fn handle_flag_persisted(&mut self, outcome: &FlagOutcome) -> Option<Cmd> {
        self.flags_in_flight = self.flags_in_flight.saturating_sub(1);
        let Some(session) = self.session.as_mut() else {
            if let Err(error) = &outcome.result {
                warn!(
                    entry_id = outcome.mutation.id,
                    error = %error,
                    "flag update failed after the session closed"
                );
            }
            return self.refresh_when_flags_settled();
        };
        session.apply_flag_outcome(outcome, self.telemetry.as_ref());
        self.arm_feedback_expiry()
    }

    fn refresh_when_flags_settled(&mut self) -> Option<Cmd> {
        if self.flags_in_flight > 0 || !self.refresh_after_flags {
            return None;
        }
        self.refresh_after_flags = false;
        self.handle_refresh_requested()
    }

    /// Schedules the current feedback line to clear.
    ///
    /// Newer feedback bumps the generation, so an older timer never clears
    /// a message it was not armed for.
    fn arm_feedback_expiry(&self) -> Option<Cmd> {
        let generation = self.session.as_ref()?.feedback()?.generation;
        let ttl = self.timings.feedback_ttl;
        Some(Box::pin(async move {
            tokio::time::sleep(ttl).await;
            Some(Box::new(AppMsg::FeedbackExpired { generation }) as Box<dyn Any + Send>)
        }))
    }

    /// Closes the session and reloads the table so flag changes show.
    ///
    /// With flag requests still unanswered the reload waits for the last
    /// answer, so the fetch cannot read rows the backend has not written.
    fn handle_leave_session(&mut self) -> Option<Cmd> {
        self.session.take()?;
        self.view_mode = ViewMode::Table;
        if self.flags_in_flight > 0 {
            debug!(
                pending = self.flags_in_flight,
                "deferring reload until flag requests settle"
            );
            self.refresh_after_flags = true;
            return None;
        }
        self.refresh_after_flags = false;
        self.handle_refresh_requested()
    }
}
