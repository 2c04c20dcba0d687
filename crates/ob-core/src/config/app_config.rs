//! # Configuration DTO / 配置 DTO
//!
//! Maps a parsed TOML document onto [`AppConfig`]. Missing keys take the
//! documented defaults; a key that is present with the wrong type is an error
//! naming the key.

use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use crate::account::AccountCreationFailureKind;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How the wizard submits the finished record.
    pub submission: SubmissionConfig,

    /// Behaviour of the simulated account backend.
    pub simulation: SimulationConfig,
}

/// Submission policy for the account-creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Upper bound for a single attempt.
    pub timeout_ms: u64,
    /// Attempts including the first one. `0` is treated as `1`.
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_backoff_ms`.
    pub retry_backoff_ms: u64,
}

/// Simulated backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed latency of every simulated call.
    pub latency_ms: u64,
    /// Fail every call with this kind, if set.
    pub force_failure: Option<AccountCreationFailureKind>,
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl SimulationConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: 2_000,
            force_failure: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create AppConfig from a TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = AppConfig::default();
        let submission = toml_value.get("submission");
        let simulation = toml_value.get("simulation");

        let force_failure = match read_str(simulation, "simulation", "force_failure")?
            .map(str::trim)
        {
            None | Some("") => None,
            Some(kind) => Some(
                kind.parse::<AccountCreationFailureKind>()
                    .map_err(|e| anyhow!(e))
                    .context("Invalid [simulation].force_failure")?,
            ),
        };

        let max_attempts = match read_u64(submission, "submission", "max_attempts")? {
            Some(value) => u32::try_from(value).map_err(|_| {
                anyhow!("[submission].max_attempts must be at most {}, got {value}", u32::MAX)
            })?,
            None => defaults.submission.max_attempts,
        };

        Ok(Self {
            submission: SubmissionConfig {
                timeout_ms: read_u64(submission, "submission", "timeout_ms")?
                    .unwrap_or(defaults.submission.timeout_ms),
                max_attempts,
                retry_backoff_ms: read_u64(submission, "submission", "retry_backoff_ms")?
                    .unwrap_or(defaults.submission.retry_backoff_ms),
            },
            simulation: SimulationConfig {
                latency_ms: read_u64(simulation, "simulation", "latency_ms")?
                    .unwrap_or(defaults.simulation.latency_ms),
                force_failure,
            },
        })
    }
}

/// Non-negative integer at `[section].key`, or `None` when the key is absent.
fn read_u64(
    table: Option<&toml::Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<u64>> {
    let Some(value) = table.and_then(|t| t.get(key)) else {
        return Ok(None);
    };
    match value.as_integer().map(u64::try_from) {
        Some(Ok(number)) => Ok(Some(number)),
        Some(Err(_)) => bail!("[{section}].{key} must not be negative, got {value}"),
        None => bail!(
            "[{section}].{key} must be a non-negative integer, got {}",
            value.type_str()
        ),
    }
}

/// String at `[section].key`, or `None` when the key is absent.
fn read_str<'a>(
    table: Option<&'a toml::Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<&'a str>> {
    match table.and_then(|t| t.get(key)) {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            anyhow!("[{section}].{key} must be a string, got {}", value.type_str())
        }),
    }
}
