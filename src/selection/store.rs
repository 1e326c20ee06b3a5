//! Durable entry-selection mapping shared by the table and study views.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use super::persistence::{SelectionError, SelectionPersistence};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Which entries the user has marked, keyed by entry id.
///
/// Every mutation writes the whole mapping back to the backend before
/// returning, so the stored document is always the image of the last
/// mutation. Ids that no longer exist upstream are kept as they are.
pub struct SelectionStore {
    selected: BTreeSet<i64>,
    backend: Box<dyn SelectionPersistence>,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Loads the stored selection.
    ///
    /// A missing document yields an empty selection. An unreadable or
    /// malformed document also yields an empty selection; the problem is
    /// logged and reported to `telemetry` but never returned.
    pub fn load(backend: Box<dyn SelectionPersistence>, telemetry: &dyn TelemetrySink) -> Self {
        let selected = match backend.read() {
            Ok(None) => BTreeSet::new(),
            Ok(Some(document)) => parse_document(&document).unwrap_or_else(|reason| {
                recover(telemetry, &reason);
                BTreeSet::new()
            }),
            Err(error) => {
                recover(telemetry, &error.to_string());
                BTreeSet::new()
            }
        };
        Self { selected, backend }
    }

    /// Returns true when `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Marks `id` as selected or not.
    ///
    /// Deselecting removes the key, so setting the same value twice leaves
    /// the same document.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the write-through fails; the
    /// in-memory mapping has changed regardless.
    pub fn set_selected(&mut self, id: i64, selected: bool) -> Result<(), SelectionError> {
        apply(&mut self.selected, id, selected);
        self.persist()
    }

    /// Selects or deselects every id in `ids`; other ids are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the write-through fails.
    pub fn toggle_all<I>(&mut self, ids: I, selected: bool) -> Result<(), SelectionError>
    where
        I: IntoIterator<Item = i64>,
    {
        for id in ids {
            apply(&mut self.selected, id, selected);
        }
        self.persist()
    }

    /// Removes `id` from the selection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when the write-through fails.
    pub fn remove(&mut self, id: i64) -> Result<(), SelectionError> {
        self.selected.remove(&id);
        self.persist()
    }

    /// Selected ids in ascending order, including stale ones.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn persist(&mut self) -> Result<(), SelectionError> {
        let document = serialise(&self.selected)?;
        self.backend.write(&document).inspect_err(|error| {
            warn!(error = %error, "failed to persist selection");
        })
    }
}

fn apply(selected: &mut BTreeSet<i64>, id: i64, value: bool) {
    if value {
        selected.insert(id);
    } else {
        selected.remove(&id);
    }
}

fn recover(telemetry: &dyn TelemetrySink, reason: &str) {
    warn!(reason, "discarding unreadable selection");
    telemetry.record(TelemetryEvent::SelectionRecovered {
        reason: reason.to_owned(),
    });
}

fn serialise(selected: &BTreeSet<i64>) -> Result<String, SelectionError> {
    let image: serde_json::Map<String, Value> = selected
        .iter()
        .map(|id| (id.to_string(), Value::Bool(true)))
        .collect();
    serde_json::to_string(&image).map_err(|error| SelectionError::Serialise {
        message: error.to_string(),
    })
}

fn parse_document(document: &str) -> Result<BTreeSet<i64>, String> {
    let value: Value = serde_json::from_str(document).map_err(|error| error.to_string())?;
    let Value::Object(object) = value else {
        return Err("selection document is not a JSON object".to_owned());
    };

    let mut selected = BTreeSet::new();
    for (key, value) in object {
        match (key.parse::<i64>(), value) {
            (Ok(id), Value::Bool(true)) => {
                selected.insert(id);
            }
            (Ok(_), Value::Bool(false)) => {}
            (parsed, other) => {
                debug!(
                    key = %key,
                    value = %other,
                    valid_id = parsed.is_ok(),
                    "ignoring selection key"
                );
            }
        }
    }
    Ok(selected)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
