use std::path::{Path, PathBuf};

use clap::Parser;
use ddx_cli::cli::{Cli, Commands, ConfigAction};
use ddx_cli::commands::execute;
use ddx_cli::config::EngineConfig;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const ANSWER_KEY: &str = r#"[
    {"diagnosis": "Myocardial Infarction", "tier": "most_likely", "vindicate_category": "V",
     "is_common": true, "is_cant_miss": true, "aliases": ["MI", "Heart Attack"]},
    {"diagnosis": "Pericarditis", "tier": "moderate", "vindicate_category": "I",
     "aliases": ["mi"]}
]"#;

fn run(command: Commands, dir: &Path) -> eyre::Result<Value> {
    execute(command, &EngineConfig::default(), &dir.join("config.json"))
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn cli_command_tree_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn global_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ddx",
        "compare",
        "--answer-key",
        "key.json",
        "--submission",
        "dx.json",
        "--exact-only",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Compare { exact_only: true, .. }));
}

#[test]
fn compare_reports_result_and_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Compare {
        answer_key: write(dir.path(), "key.json", ANSWER_KEY),
        submission: write(
            dir.path(),
            "dx.json",
            r#"[{"diagnosis": "Acute MI syndrome", "sort_order": 0}]"#,
        ),
        exact_only: false,
    };

    let output = run(command, dir.path()).unwrap();

    assert_eq!(
        output["fuzzy_matched"],
        json!([{"student": "Acute MI syndrome", "matched_to": "Myocardial Infarction"}])
    );
    assert_eq!(
        output["alias_collisions"],
        json!([{"alias": "mi", "kept": "Myocardial Infarction", "ignored": "Pericarditis"}])
    );
}

#[test]
fn config_can_disable_fuzzy_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Compare {
        answer_key: write(dir.path(), "key.json", ANSWER_KEY),
        submission: write(
            dir.path(),
            "dx.json",
            r#"[{"diagnosis": "Acute MI syndrome", "sort_order": 0}]"#,
        ),
        exact_only: false,
    };
    let mut config = EngineConfig::default();
    config.matching.fuzzy_fallback = false;

    let output = execute(command, &config, &dir.path().join("config.json")).unwrap();
    assert_eq!(output["unmatched"], json!(["Acute MI syndrome"]));
}

#[test]
fn osce_scores_door_prep_and_soap() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Osce {
        answer_key: write(dir.path(), "key.json", ANSWER_KEY),
        door_prep: write(
            dir.path(),
            "door.json",
            r#"{"diagnoses": [{"diagnosis": "MI", "historyQuestions": ["Onset?", "Radiation?"]}]}"#,
        ),
        soap: write(
            dir.path(),
            "soap.json",
            r#"{"diagnoses": [{"diagnosis": "Heart attack", "supportingEvidence": ["HR 92"]}]}"#,
        ),
        reference: None,
    };

    let output = run(command, dir.path()).unwrap();
    assert_eq!(output["correctDiagnosisIncluded"], json!(true));
    assert_eq!(output["totalQuestions"], json!(2));
    assert_eq!(output["evidenceMapped"], json!(1));
}

#[test]
fn bulletize_returns_null_for_unusable_case() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Bulletize {
        case: write(dir.path(), "case.json", r#"{"title": "Chest pain"}"#),
    };

    let output = run(command, dir.path()).unwrap();
    assert_eq!(output, Value::Null);
}

#[test]
fn findings_lists_case_findings() {
    let dir = tempfile::tempdir().unwrap();
    let command = Commands::Findings {
        case: write(
            dir.path(),
            "case.json",
            r#"{"physical_exam": {"vitals": {"pulse": {"HR": 92, "BP": "128/78"}}}}"#,
        ),
    };

    let output = run(command, dir.path()).unwrap();
    assert_eq!(output, json!(["pulse: HR: 92", "BP: 128/78"]));
}

#[test]
fn unreadable_input_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let command = Commands::Bulletize {
        case: missing.clone(),
    };

    let err = run(command, dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains(&missing.display().to_string()));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let init = || Commands::Config {
        action: ConfigAction::Init { force: false },
    };
    execute(init(), &EngineConfig::default(), &path).unwrap();
    assert!(path.exists());
    assert!(execute(init(), &EngineConfig::default(), &path).is_err());

    let forced = Commands::Config {
        action: ConfigAction::Init { force: true },
    };
    assert!(execute(forced, &EngineConfig::default(), &path).is_ok());
}
