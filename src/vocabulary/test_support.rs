//! Test-support fixtures and an in-memory gateway for vocabulary flows.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::{Entry, FlagValue, GatewayError, ImportSummary, VocabularyGateway, parse_tsv};

/// Builds an unflagged entry whose English word is `english`.
#[must_use]
pub fn entry_with_id(id: i64, english: &str) -> Entry {
    Entry {
        id,
        english: Some(english.to_owned()),
        japanese: Some(format!("{english} (ja)")),
        chapter: 1,
        ..Entry::default()
    }
}

/// Builds entries with ids `1..=count` named `word1`, `word2`, ...
#[must_use]
pub fn create_entries(count: i64) -> Vec<Entry> {
    (1..=count)
        .map(|id| entry_with_id(id, &format!("word{id}")))
        .collect()
}

#[derive(Debug, Default)]
struct Script {
    entries: Vec<Entry>,
    fetch_error: Option<GatewayError>,
    flag_error: Option<GatewayError>,
    flag_calls: Vec<(i64, FlagValue)>,
}

/// Deterministic in-memory gateway used by unit and behavioural tests.
///
/// Clones share the same state, so a test can keep a handle while the code
/// under test owns another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGateway {
    script: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
    /// Creates a gateway serving `entries`.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let gateway = Self::default();
        gateway.with_script(|script| script.entries = entries);
        gateway
    }

    /// Makes every following fetch fail with `error`.
    pub fn fail_fetches(&self, error: GatewayError) {
        self.with_script(|script| script.fetch_error = Some(error));
    }

    /// Makes every following flag update fail with `error`.
    pub fn fail_flags(&self, error: GatewayError) {
        self.with_script(|script| script.flag_error = Some(error));
    }

    /// Lets flag updates succeed again.
    pub fn accept_flags(&self) {
        self.with_script(|script| script.flag_error = None);
    }

    /// Current stored entries.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.with_script(|script| script.entries.clone())
    }

    /// Every `set_flag` call received, in order.
    #[must_use]
    pub fn flag_calls(&self) -> Vec<(i64, FlagValue)> {
        self.with_script(|script| script.flag_calls.clone())
    }

    fn with_script<T>(&self, f: impl FnOnce(&mut Script) -> T) -> T {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut script)
    }
}

#[async_trait]
impl VocabularyGateway for ScriptedGateway {
    async fn fetch_entries(&self) -> Result<Vec<Entry>, GatewayError> {
        self.with_script(|script| {
            script
                .fetch_error
                .clone()
                .map_or_else(|| Ok(script.entries.clone()), Err)
        })
    }

    async fn set_flag(&self, id: i64, value: FlagValue) -> Result<(), GatewayError> {
        self.with_script(|script| {
            script.flag_calls.push((id, value));
            if let Some(error) = &script.flag_error {
                return Err(error.clone());
            }
            let entry = script
                .entries
                .iter_mut()
                .find(|entry| entry.id == id)
                .ok_or(GatewayError::EntryNotFound { id })?;
            entry.flag = value;
            Ok(())
        })
    }

    async fn import_entries(&self, tsv: &str) -> Result<ImportSummary, GatewayError> {
        let rows = parse_tsv(tsv)?;
        self.with_script(|script| {
            let mut next_id = script.entries.iter().map(|entry| entry.id).max().unwrap_or(0);
            for row in &rows {
                next_id = next_id.saturating_add(1);
                script.entries.push(Entry {
                    id: next_id,
                    english: row.english.clone(),
                    furigana: row.furigana.clone(),
                    japanese: row.japanese.clone(),
                    times_seen: row.times_seen,
                    recently_missed_percent: row.recently_missed_percent,
                    flag: row.flag,
                    public_notes: row.public_notes.clone(),
                    personal_notes: row.personal_notes.clone(),
                    book: row.book.clone(),
                    chapter: row.chapter,
                    section: row.section,
                    word_category: row.word_category.clone(),
                });
            }
            Ok(ImportSummary {
                inserted: rows.len(),
            })
        })
    }
}
