//! Bridge CLI entry point.
//!
//! Everything after the binary name is forwarded verbatim to the skill
//! CLI, including `--help`-shaped arguments, so clap's own help and
//! version interception are disabled.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use t2s_bridge::execute_command;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Text2Speech bridge - forwards arguments to the skill CLI.
#[derive(Debug, Parser)]
#[command(name = "t2s")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments forwarded verbatim to the skill CLI.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by the `RUST_LOG` environment variable;
/// default is INFO. Logs go to stderr so they never mix into the
/// relayed stdout stream.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("t2s_bridge=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    tracing::debug!("Forwarding {} argument(s) to the skill CLI", cli.args.len());

    match execute_command(&cli.args) {
        Ok(result) => match result.exit_code {
            Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
            // Killed by signal
            None => ExitCode::from(1),
        },
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}
