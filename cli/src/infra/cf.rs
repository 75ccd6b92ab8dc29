//! Infrastructure implementation of the platform ports.
//!
//! `CfCli<R>` routes every platform call through the `cf` command-line client
//! via a `CommandRunner`. The application descriptor comes from one
//! `cf curl /v2/apps/<guid>/summary` call, which carries the state, the
//! desired count, and the running count of the same snapshot.

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::{ApplicationInspector, CommandRunner, PlatformCommands};
use crate::domain::AppDescriptor;
use crate::infra::command_runner::TokioCommandRunner;

/// Default name of the Cloud Foundry CLI binary.
pub const DEFAULT_CF_BINARY: &str = "cf";

/// The subset of `/v2/apps/<guid>/summary` the restart needs.
#[derive(Debug, Deserialize)]
struct AppSummary {
    state: String,
    instances: u32,
    #[serde(default)]
    running_instances: Option<u32>,
}

/// Error body returned by the Cloud Controller.
#[derive(Debug, Deserialize)]
struct ControllerError {
    error_code: String,
    #[serde(default)]
    description: String,
}

/// Infrastructure adapter that drives the platform through the `cf` CLI.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct CfCli<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> CfCli<R> {
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }

    /// Run `cf <args>` and fail on a non-zero exit status.
    async fn cf(&self, args: &[&str]) -> Result<Output> {
        let output = self
            .runner
            .run(&self.binary, args)
            .await
            .with_context(|| format!("cf {}", args.join(" ")))?;
        if !output.status.success() {
            anyhow::bail!("cf {} failed: {}", args.join(" "), failure_text(&output));
        }
        Ok(output)
    }
}

impl CfCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner(binary: &str, timeout: Duration) -> Self {
        Self::new(TokioCommandRunner::new(timeout), binary)
    }
}

impl<R: CommandRunner> ApplicationInspector for CfCli<R> {
    async fn get_application(&self, name: &str) -> Result<AppDescriptor> {
        let guid_output = self.cf(&["app", name, "--guid"]).await?;
        let guid = stdout_lines(&guid_output)
            .into_iter()
            .map(|l| l.trim().to_string())
            .find(|l| !l.is_empty())
            .with_context(|| format!("cf app {name} --guid returned no GUID"))?;

        let path = format!("/v2/apps/{guid}/summary");
        let summary = self.cf(&["curl", &path]).await?;
        parse_summary(&summary.stdout).with_context(|| format!("reading summary of app {name}"))
    }
}

impl<R: CommandRunner> PlatformCommands for CfCli<R> {
    async fn issue_command(&self, args: &[&str]) -> Result<Vec<String>> {
        tracing::debug!(?args, "issuing cf command");
        let output = self.cf(args).await?;
        Ok(stdout_lines(&output))
    }
}

/// Decode an app summary body into a descriptor.
///
/// # Errors
///
/// Returns an error for invalid JSON, a Cloud Controller error body, or a
/// body missing `state` or `instances`.
pub fn parse_summary(body: &[u8]) -> Result<AppDescriptor> {
    let value: serde_json::Value =
        serde_json::from_slice(body).context("invalid JSON from cf curl")?;
    if let Ok(err) = serde_json::from_value::<ControllerError>(value.clone()) {
        anyhow::bail!("{}: {}", err.error_code, err.description);
    }
    let summary: AppSummary =
        serde_json::from_value(value).context("unexpected app summary shape")?;
    Ok(AppDescriptor {
        state: summary.state,
        instance_count: summary.instances,
        running_instances: summary.running_instances.unwrap_or(0),
    })
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Trimmed stderr, or stdout when the CLI wrote its error there.
fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    let text = text.trim();
    if text.is_empty() {
        format!("exit status {}", output.status)
    } else {
        text.to_string()
    }
}
