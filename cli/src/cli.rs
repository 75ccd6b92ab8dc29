//! CLI argument parsing with clap derive

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, AppFlags, OutputFlags, PlatformFlags};
use crate::commands;
use crate::infra::cf::DEFAULT_CF_BINARY;
use crate::infra::command_runner::DEFAULT_CMD_TIMEOUT;

/// Restarts an application by rolling one or more instances at a time so the
/// application stays available during the restart
#[derive(Parser, Debug)]
#[command(
    name = "rolling-restart",
    version,
    after_help = "Examples:\n  rolling-restart my-app\n  rolling-restart my-app rollingInstanceCount=2 restartTimeoutMinutes=5"
)]
pub struct Cli {
    /// Suppress progress output (failures are still printed)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (a set `NO_COLOR` does the same)
    #[arg(long)]
    pub no_color: bool,

    /// Cloud Foundry CLI binary used to reach the platform
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CF_BINARY)]
    pub cf_binary: String,

    /// Seconds before a single cf invocation is killed
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_CMD_TIMEOUT.as_secs())]
    pub command_timeout_secs: u64,

    #[command(flatten)]
    pub restart: commands::rolling_restart::RestartArgs,
}

impl Cli {
    /// Flags for building the `AppContext`.
    #[must_use]
    pub fn app_flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
            },
            platform: PlatformFlags {
                cf_binary: self.cf_binary.clone(),
                command_timeout: Duration::from_secs(self.command_timeout_secs),
            },
        }
    }

    /// Execute the rolling restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid or the restart aborts.
    pub async fn run(&self, app: &AppContext) -> Result<()> {
        commands::rolling_restart::run(&self.restart, app).await
    }
}
