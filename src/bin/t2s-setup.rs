//! Standalone setup entry point.
//!
//! Performs the same probe-then-install logic as the bridge, decoupled
//! from command execution, so packaging flows can prepare the skill ahead
//! of first use.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use t2s_bridge::runtime::Runtime;
use t2s_bridge::{install, probe};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the Text2Speech skill package for the bridge.
#[derive(Debug, Parser)]
#[command(name = "t2s-setup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Skill package directory (overrides auto-detection)
    #[arg(long, env = "T2S_SKILL_DIR")]
    skill_dir: Option<PathBuf>,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("t2s_bridge=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("t2s_bridge=info"))
    };

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
    init_tracing(cli.debug);

    let mut runtime = Runtime::resolve();
    if let Some(dir) = cli.skill_dir {
        runtime = runtime.with_skill_dir(dir);
    }

    if probe::check_installed(&runtime) {
        if !cli.quiet {
            println!(
                "{} Text2Speech skill already installed.",
                style("✓").green()
            );
        }
        return ExitCode::SUCCESS;
    }

    if !cli.quiet {
        println!(
            "Installing Text2Speech skill from {}...",
            runtime.skill_dir.display()
        );
    }

    match install::install(&runtime) {
        Ok(()) => {
            if !cli.quiet {
                println!("{} Text2Speech skill installed.", style("✓").green());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            ExitCode::from(1)
        }
    }
}
