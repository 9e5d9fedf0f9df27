//! # ism-policy entry point
//!
//! Parses flags, initialises logging on stderr and writes the policy
//! document to stdout.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ism_cli::{run_generate, GenerateArgs, Invocation};
use ism_core::SystemClock;

/// Generate an index state management policy for session indices.
///
/// Indices start hot and, unless a stage age is 0, move through snapshot,
/// cold (read-only), closed and delete as they age.
#[derive(Parser, Debug)]
#[command(name = "ism-policy", about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Takes no value; omit the flag for quiet output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    generate: GenerateArgs,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let invocation = Invocation::capture(cli.verbose);
    tracing::debug!(
        argv = ?std::env::args().skip(1).collect::<Vec<_>>(),
        args = ?cli.generate,
        working_dir = %invocation.working_dir.display(),
        "ism-policy starting"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_generate(&cli.generate, &invocation, &SystemClock, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            if invocation.verbosity > 0 {
                tracing::error!("{e:?}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::from(1)
        }
    }
}
