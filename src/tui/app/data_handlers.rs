//! Entry loading and refresh handlers for the vocabulary TUI.
//!
//! Every refresh replaces the table's entry collection wholesale. Filters,
//! sort keys, and layout survive the reload; the cursor is clamped.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use bubbletea_rs::Cmd;
use tracing::{debug, warn};

use super::VocabularyApp;
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::AppMsg;
use crate::vocabulary::{Entry, GatewayError};

impl VocabularyApp {
    /// Dispatches data loading messages to their handlers.
    pub(super) fn handle_data_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::RefreshRequested => self.handle_refresh_requested(),
            AppMsg::EntriesLoaded {
                entries,
                latency_ms,
            } => {
                self.handle_entries_loaded(entries, *latency_ms);
                None
            }
            AppMsg::EntriesFailed(error_msg) => {
                self.handle_entries_failed(error_msg);
                None
            }
            _ => None,
        }
    }

    /// Starts a fetch unless one is already in flight.
    pub(super) fn handle_refresh_requested(&mut self) -> Option<Cmd> {
        if self.loading {
            debug!("refresh skipped; fetch already in flight");
            return None;
        }
        self.loading = true;
        self.status = None;
        Some(self.fetch_entries_cmd())
    }

    fn fetch_entries_cmd(&self) -> Cmd {
        let gateway = self.gateway.as_ref().map(Arc::clone);
        Box::pin(async move {
            let start = Instant::now();
            let result = match gateway {
                Some(backend) => backend.fetch_entries().await,
                None => Err(GatewayError::Unavailable {
                    message: "no vocabulary backend configured".to_owned(),
                }),
            };
            let msg = match result {
                Ok(entries) => AppMsg::EntriesLoaded {
                    entries,
                    latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                },
                Err(error) => AppMsg::EntriesFailed(error.to_string()),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    fn handle_entries_loaded(&mut self, entries: &[Entry], latency_ms: u64) {
        debug!(entry_count = entries.len(), latency_ms, "entries loaded");
        self.telemetry.record(TelemetryEvent::EntriesLoaded {
            entry_count: entries.len(),
            latency_ms,
        });
        self.table.replace_entries(entries.to_vec());
        self.sync_scroll();
        self.loading = false;
        self.status = None;
    }

    /// Empties the table so stale rows are never shown as current.
    fn handle_entries_failed(&mut self, error_msg: &str) {
        warn!(error = error_msg, "entry fetch failed");
        self.table.replace_entries(Vec::new());
        self.loading = false;
        self.status = Some(format!("Error loading vocabulary: {error_msg}"));
    }
}
