//! Vocabulary table backed by `SQLite`.
//!
//! [`VocabularyStore`] is the synchronous Diesel layer: every call opens its
//! own connection against the configured URL. [`SqliteVocabularyGateway`]
//! wraps it as a [`VocabularyGateway`], running each call on Tokio's blocking
//! pool so the TUI executor is never stalled by disk I/O.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::Connection;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use diesel::sqlite::SqliteConnection;
use tracing::warn;

use crate::vocabulary::{
    Entry, FlagValue, GatewayError, ImportSummary, NewEntry, VocabularyGateway, parse_tsv,
};

use super::PersistenceError;
use super::migrator::establish_connection;

const VOCABULARY_TABLE: &str = "vocabulary";

#[derive(Debug, QueryableByName)]
struct EntryRow {
    #[diesel(sql_type = BigInt)]
    vocab_id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    english: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    furigana: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    japanese: Option<String>,
    #[diesel(sql_type = BigInt)]
    times_seen: i64,
    #[diesel(sql_type = Double)]
    recently_missed_percent: f64,
    #[diesel(sql_type = BigInt)]
    flag: i64,
    #[diesel(sql_type = Nullable<Text>)]
    public_notes: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    personal_notes: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    book: Option<String>,
    #[diesel(sql_type = BigInt)]
    chapter: i64,
    #[diesel(sql_type = BigInt)]
    section: i64,
    #[diesel(sql_type = Nullable<Text>)]
    word_category: Option<String>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = PersistenceError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let flag = FlagValue::try_from(row.flag).map_err(|message| {
            PersistenceError::QueryFailed {
                message: format!("entry {}: {message}", row.vocab_id),
            }
        })?;

        Ok(Self {
            id: row.vocab_id,
            english: row.english,
            furigana: row.furigana,
            japanese: row.japanese,
            times_seen: row.times_seen,
            recently_missed_percent: row.recently_missed_percent,
            flag,
            public_notes: row.public_notes,
            personal_notes: row.personal_notes,
            book: row.book,
            chapter: row.chapter,
            section: row.section,
            word_category: row.word_category,
        })
    }
}

/// SQLite-backed access to the `vocabulary` table.
#[derive(Debug, Clone)]
pub struct VocabularyStore {
    database_url: String,
}

impl VocabularyStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    /// Returns every entry ordered by identity.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, or a stored row is invalid.
    pub fn list(&self) -> Result<Vec<Entry>, PersistenceError> {
        let mut connection = establish_connection(&self.database_url)?;

        let rows: Vec<EntryRow> = sql_query(
            "SELECT vocab_id, english, furigana, japanese, times_seen, \
             recently_missed_percent, flag, public_notes, personal_notes, book, chapter, \
             section, word_category \
             FROM vocabulary ORDER BY vocab_id;",
        )
        .load(&mut connection)
        .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        rows.into_iter().map(Entry::try_from).collect()
    }

    /// Stores `value` as the flag of entry `id`.
    ///
    /// Returns `false` when no entry has that identity.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn set_flag(&self, id: i64, value: FlagValue) -> Result<bool, PersistenceError> {
        let mut connection = establish_connection(&self.database_url)?;

        let affected = sql_query(
            "UPDATE vocabulary SET flag = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE vocab_id = ?;",
        )
        .bind::<BigInt, _>(value.as_i64())
        .bind::<BigInt, _>(id)
        .execute(&mut connection)
        .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        Ok(affected > 0)
    }

    /// Inserts every row in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or any insert
    /// fails; in that case nothing is written.
    pub fn insert_all(&self, rows: &[NewEntry]) -> Result<usize, PersistenceError> {
        let mut connection = establish_connection(&self.database_url)?;

        let result = connection.transaction::<_, diesel::result::Error, _>(|transaction| {
            for row in rows {
                insert_row(transaction, row)?;
            }
            Ok(rows.len())
        });

        result.map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    fn vocabulary_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(VOCABULARY_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::vocabulary_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

fn insert_row(
    connection: &mut SqliteConnection,
    row: &NewEntry,
) -> Result<(), diesel::result::Error> {
    sql_query(
        "INSERT INTO vocabulary \
         (english, furigana, japanese, times_seen, recently_missed_percent, flag, \
          public_notes, personal_notes, book, chapter, section, word_category) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);",
    )
    .bind::<Nullable<Text>, _>(row.english.as_deref())
    .bind::<Nullable<Text>, _>(row.furigana.as_deref())
    .bind::<Nullable<Text>, _>(row.japanese.as_deref())
    .bind::<BigInt, _>(row.times_seen)
    .bind::<Double, _>(row.recently_missed_percent)
    .bind::<BigInt, _>(row.flag.as_i64())
    .bind::<Nullable<Text>, _>(row.public_notes.as_deref())
    .bind::<Nullable<Text>, _>(row.personal_notes.as_deref())
    .bind::<Nullable<Text>, _>(row.book.as_deref())
    .bind::<BigInt, _>(row.chapter)
    .bind::<BigInt, _>(row.section)
    .bind::<Nullable<Text>, _>(row.word_category.as_deref())
    .execute(connection)
    .map(drop)
}

/// [`VocabularyGateway`] over a [`VocabularyStore`].
#[derive(Debug, Clone)]
pub struct SqliteVocabularyGateway {
    store: Arc<VocabularyStore>,
}

impl SqliteVocabularyGateway {
    /// Builds a gateway for the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        Ok(Self {
            store: Arc::new(VocabularyStore::new(database_url)?),
        })
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, GatewayError>
    where
        T: Send + 'static,
        F: FnOnce(&VocabularyStore) -> Result<T, GatewayError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || operation(&store)).await {
            Ok(result) => result,
            Err(error) => Err(GatewayError::Unavailable {
                message: format!("task join error: {error}"),
            }),
        }
    }
}

#[async_trait]
impl VocabularyGateway for SqliteVocabularyGateway {
    async fn fetch_entries(&self) -> Result<Vec<Entry>, GatewayError> {
        self.run_blocking(|store| store.list().map_err(GatewayError::from))
            .await
    }

    async fn set_flag(&self, id: i64, value: FlagValue) -> Result<(), GatewayError> {
        let updated = self
            .run_blocking(move |store| store.set_flag(id, value).map_err(GatewayError::from))
            .await?;
        if updated {
            Ok(())
        } else {
            warn!(entry_id = id, "flag update matched no vocabulary entry");
            Err(GatewayError::EntryNotFound { id })
        }
    }

    async fn import_entries(&self, tsv: &str) -> Result<ImportSummary, GatewayError> {
        let rows = parse_tsv(tsv)?;
        let inserted = self
            .run_blocking(move |store| store.insert_all(&rows).map_err(GatewayError::from))
            .await?;
        Ok(ImportSummary { inserted })
    }
}
