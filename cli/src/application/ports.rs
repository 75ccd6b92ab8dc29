//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::AppDescriptor;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Platform Ports ────────────────────────────────────────────────────────────

/// The platform's single "get application" operation.
#[allow(async_fn_in_trait)]
pub trait ApplicationInspector {
    /// Fetch state, desired count, and running count in one call.
    async fn get_application(&self, name: &str) -> Result<AppDescriptor>;
}

/// Free-form platform commands: instance restarts and the instance listing.
#[allow(async_fn_in_trait)]
pub trait PlatformCommands {
    /// Issue a command and return its output split into lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not run or was rejected.
    async fn issue_command(&self, args: &[&str]) -> Result<Vec<String>>;
}

/// Composite trait: everything the rolling restart needs from the platform.
pub trait Platform: ApplicationInspector + PlatformCommands {}

/// Blanket implementation: any type implementing both sub-traits is a `Platform`.
impl<T> Platform for T where T: ApplicationInspector + PlatformCommands {}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a verbatim block of platform output.
    fn detail(&self, text: &str);
}
