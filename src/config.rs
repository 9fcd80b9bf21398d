use std::env;
use std::str::FromStr;

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_PROGRESS_INTERVAL, ProofOfWork};
use crate::error::{LedgerError, Result};

/// How the chain is printed by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(LedgerError::Config(format!(
                "LEDGER_OUTPUT must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: usize,
    pub progress_interval: u64,
    pub max_attempts: Option<u64>,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_attempts: None,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            difficulty: parse_var(&lookup, "LEDGER_DIFFICULTY")?.unwrap_or(defaults.difficulty),
            progress_interval: parse_var(&lookup, "LEDGER_PROGRESS_INTERVAL")?
                .unwrap_or(defaults.progress_interval),
            max_attempts: parse_var(&lookup, "LEDGER_MAX_ATTEMPTS")?,
            output: parse_var(&lookup, "LEDGER_OUTPUT")?.unwrap_or(defaults.output),
        })
    }

    pub fn proof_of_work(&self) -> Result<ProofOfWork> {
        Ok(ProofOfWork::new(self.difficulty)?
            .with_progress_interval(self.progress_interval)
            .with_max_attempts(self.max_attempts))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LedgerError::Config(format!("{key} has invalid value `{raw}`"))),
    }
}
