//! rolling-restart - restart application instances without downtime

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use rolling_restart::app::AppContext;
use rolling_restart::cli::Cli;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; operator output owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors share exit code 1 with every other failure.
            print!("{e}");
            std::process::exit(1);
        }
    };
    let app = AppContext::new(&cli.app_flags());
    if let Err(e) = cli.run(&app).await {
        app.output.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
