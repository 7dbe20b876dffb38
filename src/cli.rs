use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// The output formats supported by splitaln
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputType {
    /// The three split positions, one per line
    Plain,

    /// A single JSON object with positions, score and sequence names
    Json,
}

/// Locate the breakpoint of a read spanning a structural variant by split-aligning it
/// to a reference.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Reference sequence in FASTA format (optionally gzipped). Only the first record is used.
    #[arg(short, long)]
    #[clap(help_heading = "Inputs")]
    pub reference: PathBuf,

    /// Read sequence in FASTA format (optionally gzipped). Only the first record is used.
    #[arg(short = 'q', long)]
    #[clap(help_heading = "Inputs")]
    pub read: PathBuf,

    /// Output file type.
    #[arg(value_enum, short = 'O', long, default_value = "plain")]
    #[clap(help_heading = "Outputs")]
    pub output_type: OutputType,

    /// Give verbose output: print both alignments and the sequence parts around the
    /// breakpoint. Use multiple times to increase the log level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    #[clap(help_heading = "Outputs")]
    pub verbose: u8,

    /// Score for matching bases
    #[arg(short = 'M', long, default_value = "1")]
    #[clap(help_heading = "Scoring")]
    pub match_score: u8,

    /// Penalty for mismatching bases
    #[arg(short = 'n', long, default_value = "1")]
    #[clap(help_heading = "Scoring")]
    pub mismatch: u8,

    /// Penalty per gap position
    #[arg(short = 'g', long, default_value = "1")]
    #[clap(help_heading = "Scoring")]
    pub gap: u8,
}
