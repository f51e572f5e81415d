//! CLI runtime configuration.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// How the final match state is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("{key}={value:?} is not valid: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Configuration for one headless run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Combat config TOML; built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    /// Input script RON; the bundled demo fight when unset.
    pub script_path: Option<PathBuf>,
    /// Hard stop in ticks; one full round when unset.
    pub max_ticks: Option<u64>,
    /// Keep advancing rounds until the match is decided.
    pub full_match: bool,
    pub output: OutputFormat,
    /// Also write logs to `fight.log` in this directory.
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FIGHT_CONFIG` - Combat config TOML path (default: built-in balance)
    /// - `FIGHT_SCRIPT` - Input script RON path (default: bundled demo)
    /// - `FIGHT_MAX_TICKS` - Tick limit (default: one round, or every round with `FIGHT_FULL_MATCH`)
    /// - `FIGHT_FULL_MATCH` - Play rounds until the match is decided (default: false)
    /// - `FIGHT_OUTPUT` - `text` or `json` (default: text)
    /// - `FIGHT_LOG_DIR` - Directory for a log file (default: stderr only)
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EnvError> {
        let mut config = Self {
            config_path: lookup("FIGHT_CONFIG").map(PathBuf::from),
            script_path: lookup("FIGHT_SCRIPT").map(PathBuf::from),
            log_dir: lookup("FIGHT_LOG_DIR").map(PathBuf::from),
            ..Self::default()
        };

        if let Some(ticks) = parse_var::<u64>(&lookup, "FIGHT_MAX_TICKS", "a tick count")? {
            config.max_ticks = Some(ticks.max(1));
        }

        if let Some(full) = parse_var::<bool>(&lookup, "FIGHT_FULL_MATCH", "true or false")? {
            config.full_match = full;
        }

        if let Some(output) = parse_var::<OutputFormat>(&lookup, "FIGHT_OUTPUT", "text or json")? {
            config.output = output;
        }

        Ok(config)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
) -> Result<Option<T>, EnvError>
where
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| EnvError::Invalid {
            key,
            value,
            expected,
        })
}
