use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use splitaln::aligner::scoring::SimpleScore;
use splitaln::io::load_sequence;
use splitaln::io::report::{write_json, write_positions, write_verbose};
use splitaln::split::SplitAligner;

mod cli;

use cli::{CliArgs, OutputType};

/// Log to stderr. `RUST_LOG` takes precedence over the level derived from `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(filter_layer);

    Registry::default().with(stderr_log).init();
}

fn run(args: &CliArgs) -> Result<()> {
    let scoring = SimpleScore::from_costs(args.match_score, args.mismatch, args.gap);
    scoring.validate()?;

    let reference = load_sequence(&args.reference)
        .with_context(|| format!("Could not load reference from {}", args.reference.display()))?;
    let read = load_sequence(&args.read)
        .with_context(|| format!("Could not load read from {}", args.read.display()))?;

    info!("Split-aligning {} ({} bp) to {} ({} bp)...",
        read.name(), read.len(), reference.name(), reference.len());

    let split = SplitAligner::new(scoring).align(&reference, &read);

    info!("Done. Combined score: {}", split.result.score);

    let mut writer = BufWriter::new(io::stdout().lock());
    match args.output_type {
        OutputType::Plain => {
            write_positions(&mut writer, &split.result)?;

            if args.verbose > 0 {
                write_verbose(&mut writer, &reference, &read, &split)?;
            }
        },
        OutputType::Json => {
            write_json(&mut writer, &reference, &read, &split.result)?;

            // Keep stdout a single JSON document
            if args.verbose > 0 {
                write_verbose(&mut io::stderr().lock(), &reference, &read, &split)?;
            }
        },
    }

    writer.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    // Parse errors exit with 1, help and version requests with 0
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();

            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
