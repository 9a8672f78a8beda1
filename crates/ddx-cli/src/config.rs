use std::path::{Path, PathBuf};

use ddx_casetext::findings::FindingLimits;
use ddx_matching::CompareOptions;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// Highest `config_version` this build reads.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "current_version")]
    pub config_version: u32,
    #[serde(default)]
    pub matching: MatchSettings,
    #[serde(default)]
    pub findings: FindingLimits,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            matching: MatchSettings::default(),
            findings: FindingLimits::default(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Substring fallback for the differential comparator. The OSCE
    /// comparator is always exact-only.
    #[serde(default = "default_true")]
    pub fuzzy_fallback: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            fuzzy_fallback: true,
        }
    }
}

impl MatchSettings {
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            fuzzy_fallback: self.fuzzy_fallback,
        }
    }
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("ddx").join("config.json"))
}

/// Where the effective config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: EngineConfig,
    pub source: ConfigSource,
}

/// Read the config at `path`. A missing file means built-in defaults; a
/// file may set any subset of sections and the rest keep their defaults.
pub fn load_config(path: &Path) -> eyre::Result<LoadedConfig> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: EngineConfig::default(),
            source: ConfigSource::Defaults,
        });
    }

    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config at {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("invalid JSON in config at {}", path.display()))?;

    check_version(&raw)?;

    let config: EngineConfig = serde_json::from_value(raw)
        .wrap_err_with(|| format!("invalid config at {}", path.display()))?;
    validate(&config)?;

    Ok(LoadedConfig {
        config,
        source: ConfigSource::File,
    })
}

/// Refuse files written by a newer ddx. Versions that do not fit in a `u32`
/// count as newer.
fn check_version(raw: &serde_json::Value) -> eyre::Result<()> {
    let Some(version) = raw.get("config_version") else {
        return Ok(());
    };
    let version = version
        .as_u64()
        .ok_or_else(|| eyre::eyre!("config_version must be a non-negative integer"))?;

    match u32::try_from(version) {
        Ok(v) if v <= CURRENT_VERSION => Ok(()),
        _ => Err(eyre::eyre!(
            "config_version {version} is not supported; ddx reads up to version {CURRENT_VERSION}"
        )),
    }
}

fn validate(config: &EngineConfig) -> eyre::Result<()> {
    let limits = config.findings;
    if limits.min_len > limits.max_len {
        return Err(eyre::eyre!(
            "findings.min_len ({}) exceeds findings.max_len ({})",
            limits.min_len,
            limits.max_len
        ));
    }
    Ok(())
}

/// Write `config` to `path`, creating parent directories. The file is
/// staged next to its destination and renamed over it, so readers never
/// see a partial document.
pub fn save_config(config: &EngineConfig, path: &Path) -> eyre::Result<()> {
    validate(config)?;

    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create {}", dir.display()))?;

    let document = EngineConfig {
        config_version: CURRENT_VERSION,
        ..*config
    };
    let staged = path.with_extension("json.tmp");
    std::fs::write(&staged, serde_json::to_string_pretty(&document)?)
        .wrap_err_with(|| format!("failed to write {}", staged.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&staged, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&staged, path)
        .wrap_err_with(|| format!("failed to move config into {}", path.display()))?;
    Ok(())
}
