//! Restart configuration and `key=value` settings parsing.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Settings key for the number of instances restarted together.
pub const KEY_BATCH_SIZE: &str = "rollingInstanceCount";
/// Settings key for the finish-wait budget in minutes.
pub const KEY_FINISH_TIMEOUT: &str = "restartTimeoutMinutes";

pub const DEFAULT_BATCH_SIZE: u32 = 1;
pub const DEFAULT_FINISH_TIMEOUT_MINUTES: u32 = 3;
/// Fixed budget for the platform to start tearing an instance down.
pub const INITIATE_TIMEOUT_MINUTES: u32 = 2;

/// Poll attempts granted per minute of budget (one every five seconds).
pub const TICKS_PER_MINUTE: u32 = 12;

// ── Config ───────────────────────────────────────────────────────────────────

/// Immutable settings for one rolling restart run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartConfig {
    /// Instances restarted together before waiting.
    pub batch_size: u32,
    /// Minutes a batch may take to report running again.
    pub finish_timeout_minutes: u32,
    /// Minutes the platform may take to begin a restart.
    pub initiate_timeout_minutes: u32,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            finish_timeout_minutes: DEFAULT_FINISH_TIMEOUT_MINUTES,
            initiate_timeout_minutes: INITIATE_TIMEOUT_MINUTES,
        }
    }
}

impl RestartConfig {
    /// Parse trailing `key=value` arguments on top of the defaults.
    ///
    /// Recognized keys must carry a positive integer. Unrecognized keys are
    /// ignored. A key given twice keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a recognized key whose value is
    /// missing, not an integer, or zero.
    pub fn from_settings<S: AsRef<str>>(settings: &[S]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for setting in settings {
            let (key, value) = split_setting(setting.as_ref());
            match key {
                KEY_BATCH_SIZE => config.batch_size = parse_positive(key, value)?,
                KEY_FINISH_TIMEOUT => config.finish_timeout_minutes = parse_positive(key, value)?,
                _ => tracing::debug!(setting = setting.as_ref(), "ignoring unrecognized setting"),
            }
        }
        Ok(config)
    }

    /// Poll attempts allowed while waiting for a restart to begin.
    #[must_use]
    pub fn initiate_attempts(&self) -> u32 {
        self.initiate_timeout_minutes.saturating_mul(TICKS_PER_MINUTE)
    }

    /// Poll attempts allowed while waiting for a batch to come back.
    #[must_use]
    pub fn finish_attempts(&self) -> u32 {
        self.finish_timeout_minutes.saturating_mul(TICKS_PER_MINUTE)
    }
}

/// Split on the first `=`. A bare word has no value.
fn split_setting(setting: &str) -> (&str, Option<&str>) {
    match setting.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (setting, None),
    }
}

/// Any positive integer is accepted; values past `u32::MAX` are clamped.
fn parse_positive(key: &str, value: Option<&str>) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.unwrap_or_default().to_string(),
    };
    let parsed: u64 = value.ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    if parsed < 1 {
        return Err(invalid());
    }
    Ok(u32::try_from(parsed).unwrap_or(u32::MAX))
}
