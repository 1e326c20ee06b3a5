//! Unit tests for configuration loading and precedence.

use std::time::Duration;

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::{OperationMode, TangochoConfig};
use crate::persistence::PersistenceError;

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

fn build_config_from_layers(layers: &[(&str, Value)]) -> TangochoConfig {
    let mut composer = MergeComposer::new();
    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }
    TangochoConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"database_url": "default.db"})), ("file", json!({"database_url": "file.db"}))],
    "database_url",
    "file.db",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"selection_path": "file.json"})), ("environment", json!({"selection_path": "env.json"}))],
    "selection_path",
    "env.json",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"import_tsv": "env.tsv"})), ("cli", json!({"import_tsv": "cli.tsv"}))],
    "import_tsv",
    "cli.tsv",
    "CLI should override environment"
)]
fn layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "database_url" => config.database_url.as_deref(),
        "selection_path" => config.selection_path.as_deref(),
        "import_tsv" => config.import_tsv.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn timer_defaults_apply_when_unset() {
    let config = TangochoConfig::default();

    let timings = config.tui_timings();

    assert_eq!(timings.filter_debounce, Duration::from_millis(300));
    assert_eq!(timings.feedback_ttl, Duration::from_millis(1500));
}

#[rstest]
fn timer_overrides_are_loaded_from_file() {
    let config = build_config_from_layers(&[(
        "file",
        json!({"filter_debounce_ms": 50, "feedback_ttl_ms": 200}),
    )]);

    let timings = config.tui_timings();

    assert_eq!(timings.filter_debounce, Duration::from_millis(50));
    assert_eq!(timings.feedback_ttl, Duration::from_millis(200));
}

#[rstest]
#[case::tui_by_default(json!({}), OperationMode::StudyTui)]
#[case::import(json!({"import_tsv": "words.tsv"}), OperationMode::ImportTsv)]
#[case::migrate(json!({"migrate_db": true}), OperationMode::MigrateDatabase)]
#[case::migrate_wins_over_import(
    json!({"migrate_db": true, "import_tsv": "words.tsv"}),
    OperationMode::MigrateDatabase
)]
fn operation_mode_follows_flags(#[case] cli: Value, #[case] expected: OperationMode) {
    let config = build_config_from_layers(&[("cli", cli)]);

    assert_eq!(config.operation_mode(), expected);
}

#[rstest]
#[case::missing(None, Err(PersistenceError::MissingDatabaseUrl))]
#[case::blank(Some("  "), Err(PersistenceError::BlankDatabaseUrl))]
#[case::present(Some("vocab.sqlite"), Ok("vocab.sqlite"))]
fn database_url_is_validated(
    #[case] database_url: Option<&str>,
    #[case] expected: Result<&str, PersistenceError>,
) {
    let config = TangochoConfig {
        database_url: database_url.map(ToOwned::to_owned),
        ..TangochoConfig::default()
    };

    assert_eq!(config.require_database_url(), expected);
}

#[rstest]
fn configured_selection_path_wins_over_default() {
    let config = TangochoConfig {
        selection_path: Some("/tmp/picked.json".to_owned()),
        ..TangochoConfig::default()
    };

    let path = config
        .resolve_selection_path()
        .expect("configured path should resolve");

    assert_eq!(path.as_str(), "/tmp/picked.json");
}
