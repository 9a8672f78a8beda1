use std::path::Path;

use ddx_casetext::bulletize::bulletize_case;
use ddx_casetext::findings::extract_case_findings;
use ddx_core::models::answer_key::{parse_answer_key, AnswerKeyEntry};
use ddx_core::models::diagnosis::Differential;
use ddx_core::models::osce::{DoorPrep, SoapNote};
use ddx_matching::{compare_osce, compare_with};
use eyre::WrapErr;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::cli::{Commands, ConfigAction};
use crate::config::{save_config, EngineConfig};

/// Run a command and return the JSON document to print.
pub fn execute(
    command: Commands,
    config: &EngineConfig,
    config_path: &Path,
) -> eyre::Result<Value> {
    match command {
        Commands::Compare {
            answer_key,
            submission,
            exact_only,
        } => {
            let answer_key = load_answer_key(&answer_key)?;
            let differential = Differential::from_json(&read_file(&submission)?)
                .wrap_err_with(|| format!("invalid submission in {}", submission.display()))?;

            let mut options = config.matching.compare_options();
            if exact_only {
                options.fuzzy_fallback = false;
            }

            let result = compare_with(differential.entries(), &answer_key, options);
            Ok(serde_json::to_value(result)?)
        }
        Commands::Osce {
            answer_key,
            door_prep,
            soap,
            reference,
        } => {
            let answer_key = load_answer_key(&answer_key)?;
            let door_prep: DoorPrep = read_json(&door_prep)?;
            let soap: SoapNote = read_json(&soap)?;
            let result = compare_osce(&door_prep, &soap, &answer_key, reference.as_deref());
            Ok(serde_json::to_value(result)?)
        }
        Commands::Bulletize { case } => {
            let case: Value = read_json(&case)?;
            match bulletize_case(&case) {
                Some(bullets) => Ok(serde_json::to_value(bullets)?),
                None => {
                    warn!("case has no usable history or exam fields");
                    Ok(Value::Null)
                }
            }
        }
        Commands::Findings { case } => {
            let case: Value = read_json(&case)?;
            let findings = bulletize_case(&case)
                .map(|bullets| extract_case_findings(&bullets, config.findings))
                .unwrap_or_default();
            Ok(json!(findings))
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => Ok(json!({
                "path": config_path.display().to_string(),
                "config": config,
            })),
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                let config = EngineConfig::default();
                save_config(&config, config_path)?;
                info!(path = %config_path.display(), "config initialized");
                Ok(json!({
                    "path": config_path.display().to_string(),
                    "config": config,
                }))
            }
        },
    }
}

fn load_answer_key(path: &Path) -> eyre::Result<Vec<AnswerKeyEntry>> {
    parse_answer_key(&read_file(path)?)
        .wrap_err_with(|| format!("invalid answer key in {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    serde_json::from_str(&read_file(path)?)
        .wrap_err_with(|| format!("invalid JSON in {}", path.display()))
}

fn read_file(path: &Path) -> eyre::Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
