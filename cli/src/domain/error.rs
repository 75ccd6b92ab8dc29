//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Usage errors ──────────────────────────────────────────────────────────────

/// Errors raised while turning invocation arguments into a `RestartConfig`.
///
/// No platform call is made once one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("APP_NAME is required.")]
    MissingAppName,

    #[error("Parameter {key} should be a valid positive/non-zero integer")]
    InvalidValue { key: String, value: String },
}

// ── Precondition errors ───────────────────────────────────────────────────────

/// The application is not in a shape that allows a rolling restart to begin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error(
        "Application is not stable right now (state \"{state}\", requested {desired}, running {running}). Please try again later"
    )]
    Unstable {
        state: String,
        desired: u32,
        running: u32,
    },

    #[error(
        "Parameter rollingInstanceCount({batch_size}) cannot be greater than total application instances({desired})"
    )]
    BatchTooLarge { batch_size: u32, desired: u32 },
}

// ── Restart errors ────────────────────────────────────────────────────────────

/// Which bounded wait ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    /// Waiting for the platform to start tearing an instance down.
    Initiate,
    /// Waiting for the batch to report running again.
    Finish,
}

impl std::fmt::Display for WaitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiate => f.write_str("initiated"),
            Self::Finish => f.write_str("finished"),
        }
    }
}

/// Every way a rolling restart run can abort. All variants are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestartError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("Failed to query application '{app}': {detail}")]
    PlatformQuery { app: String, detail: String },

    #[error(
        "Instance restart could not be {phase} in given time (batch {batch}, {attempts} attempts). Cannot continue. Exiting."
    )]
    TimeoutExhausted {
        phase: WaitPhase,
        batch: usize,
        attempts: u32,
    },
}

impl RestartError {
    /// Build a `PlatformQuery` error from any adapter failure, keeping the
    /// whole context chain in the message.
    pub fn platform(app: &str, err: &anyhow::Error) -> Self {
        Self::PlatformQuery {
            app: app.to_string(),
            detail: format!("{err:#}"),
        }
    }
}
