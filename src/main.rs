//! `pricer` binary: prices a market log from stdin.
//!
//! Quote lines go to stdout, diagnostics to stderr. Structured logging is
//! off unless `RUST_LOG` is set. The exit code is the last non-success
//! status observed during the replay, or zero.

use clap::Parser;
use clap::error::ErrorKind;
use pricer_rs::{PricerError, STREAM_BUFFER_SIZE, run};
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays a limit-order log and prints quote changes for a fixed share
/// target.
#[derive(Parser)]
#[command(name = "pricer", version, about)]
struct Cli {
    /// Number of shares to price on each side of the book.
    #[arg(value_parser = clap::value_parser!(u64).range(1..=(i32::MAX as u64 - 1)))]
    target_shares: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let printed_help =
                matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = err.print();
            return if printed_help {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(PricerError::InvalidCmdLine.exit_code())
            };
        }
    };

    let started = Instant::now();
    let input = BufReader::with_capacity(STREAM_BUFFER_SIZE, io::stdin().lock());
    let out = BufWriter::with_capacity(STREAM_BUFFER_SIZE, io::stdout().lock());
    let status = run(cli.target_shares, input, out, io::stderr());
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        target_shares = cli.target_shares,
        "replay complete"
    );

    match status {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            if failure.is_fatal() {
                // Recoverable kinds were already written while streaming.
                eprintln!("{failure}");
            }
            ExitCode::from(failure.exit_code())
        }
    }
}
