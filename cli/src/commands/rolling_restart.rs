//! `rolling-restart APP_NAME [key=value ...]`: restart instances in batches.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::rolling_restart::{RestartSummary, RollingRestart};
use crate::domain::{ConfigError, RestartConfig};

/// Arguments for the rolling restart.
#[derive(Args, Default, Debug)]
pub struct RestartArgs {
    /// Name of the application which needs a restart
    #[arg(value_name = "APP_NAME")]
    pub app_name: Option<String>,

    /// Settings as key=value: rollingInstanceCount=n (instances restarted at a
    /// time), restartTimeoutMinutes=n (minutes to wait for a batch to restart)
    #[arg(value_name = "KEY=VALUE")]
    pub settings: Vec<String>,
}

impl RestartArgs {
    /// Validate the application name and settings without touching the platform.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a missing name or an invalid setting value.
    pub fn resolve(&self) -> Result<(&str, RestartConfig), ConfigError> {
        let name = self
            .app_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(ConfigError::MissingAppName)?;
        let config = RestartConfig::from_settings(&self.settings)?;
        Ok((name, config))
    }
}

/// Run the rolling restart.
///
/// # Errors
///
/// Returns an error on invalid arguments, failed preconditions, platform
/// failures, or an exhausted wait.
pub async fn run(args: &RestartArgs, app: &AppContext) -> Result<()> {
    let (name, config) = args.resolve()?;
    tracing::info!(
        app = name,
        batch_size = config.batch_size,
        finish_timeout_minutes = config.finish_timeout_minutes,
        "starting rolling restart"
    );

    let reporter = app.terminal_reporter();
    let summary = RollingRestart::new(&app.platform, &reporter, name, config)
        .run()
        .await?;
    print_completion(&summary, app);
    Ok(())
}

fn print_completion(summary: &RestartSummary, app: &AppContext) {
    app.output.success(&format!(
        "Rolling restart of {} completed: {} instance(s) in {} batch(es)",
        summary.app, summary.instances, summary.batches
    ));
}
