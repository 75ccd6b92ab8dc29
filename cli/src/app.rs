//! Application context: unified state passed to the command handler.

use std::time::Duration;

use crate::infra::cf::CfCli;
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Platform client flags.
pub struct PlatformFlags {
    /// Path or name of the `cf` binary.
    pub cf_binary: String,
    /// Upper bound for a single `cf` invocation.
    pub command_timeout: Duration,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    pub platform: PlatformFlags,
}

/// Unified application context passed to the command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Platform client backed by the `cf` CLI.
    pub platform: CfCli<TokioCommandRunner>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            platform: CfCli::default_runner(
                &flags.platform.cf_binary,
                flags.platform.command_timeout,
            ),
        }
    }

    /// Progress reporter writing to this context's terminal.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
