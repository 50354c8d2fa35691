// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Clipping — border removal for archival newspaper scans.
//
// Entry point. Initialises logging, parses the command line, and dispatches to
// the remove/detect commands.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clipping_core::{BorderMode, parse_threshold};

/// Remove microfilm edges and page margins from newspaper scans, producing a
/// tightly cropped PNG with a transparent background.
#[derive(Parser, Debug)]
#[command(name = "clipping")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    clipping remove scan.jpg                        Auto-detect, remove both borders
    clipping remove scan.jpg -o out.png -m black    Black film edge only
    clipping remove scan.jpg --white 200            Explicit white cut-off
    clipping detect scan.jpg                        Print detected thresholds as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove borders and write a transparent PNG.
    Remove {
        /// Input scan (JPEG, PNG, TIFF, ...)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PNG path (defaults to `<INPUT>-clipped.png`)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Which border tones to erase: black, white, or both
        #[arg(short, long, default_value_t = BorderMode::Both)]
        mode: BorderMode,

        /// Maximum R/G/B counted as border black (omit to auto-detect)
        #[arg(long, value_parser = threshold_arg)]
        black: Option<u8>,

        /// Minimum R/G/B counted as border white (omit to auto-detect)
        #[arg(long, value_parser = threshold_arg)]
        white: Option<u8>,

        /// JSON file overriding the tuning constants
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the thresholds auto-detection would choose, without processing.
    Detect {
        /// Input scan (JPEG, PNG, TIFF, ...)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// JSON file overriding the tuning constants
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Accept any leading integer and clamp it into `[0, 255]`.
fn threshold_arg(raw: &str) -> Result<u8, String> {
    parse_threshold(raw).ok_or_else(|| format!("expected an integer threshold, got {raw:?}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Remove {
            input,
            output,
            mode,
            black,
            white,
            config,
        } => commands::RemoveArgs {
            input,
            output,
            mode,
            black,
            white,
            config,
        }
        .run()
        .and_then(|report| commands::print_json(&report)),
        Command::Detect { input, config } => {
            commands::detect(&input, config.as_deref()).and_then(|t| commands::print_json(&t))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "clipping failed");
            ExitCode::FAILURE
        }
    }
}
