// src/main.rs

//! Command-line front end for the textgrid encoder.
//!
//! Reads one document per input file (or a single document from stdin),
//! encodes each into a fixed-width grid of character codes, pads the
//! batch to a common height, and prints the result as JSON.

use anyhow::Context;
use log::info;
use std::io::Read;
use std::path::PathBuf;

use textgrid::config::GridConfig;
use textgrid::grid::{collate, encode, Grid, GridRequest};
use textgrid::LogDiagnostics;

const USAGE: &str = "Usage: textgrid [--config FILE] [--width N] [--rows N] [FILE...]";

/// Parsed command-line arguments.
struct CliArgs {
    config: Option<PathBuf>,
    width: Option<usize>,
    max_rows: Option<usize>,
    inputs: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = CliArgs {
        config: None,
        width: None,
        max_rows: None,
        inputs: Vec::new(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().context("--config requires a file argument")?;
                args.config = Some(PathBuf::from(value));
            }
            "--width" => {
                let value = iter.next().context("--width requires a value")?;
                args.width = Some(value.parse().context("--width must be an integer")?);
            }
            "--rows" => {
                let value = iter.next().context("--rows requires a value")?;
                args.max_rows = Some(value.parse().context("--rows must be an integer")?);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                anyhow::bail!("Unknown flag '{}'. {}", other, USAGE);
            }
            other => args.inputs.push(PathBuf::from(other)),
        }
    }
    Ok(args)
}

/// Reads the documents to encode: one per file, or one from stdin when
/// no files were given.
fn read_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    if paths.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        return Ok(vec![text]);
    }
    paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => GridConfig::load_or_default(path),
        None => GridConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(rows) = args.max_rows {
        config.max_rows = rows;
    }
    // Dimension mistakes on the command line are user errors, caught here
    // before they could ever reach the encoder's contract checks.
    anyhow::ensure!(config.width > 0, "--width must be positive");
    anyhow::ensure!(config.max_rows > 0, "--rows must be positive");

    info!(
        "Encoding with width {} and up to {} rows",
        config.width, config.max_rows
    );

    let texts = read_inputs(&args.inputs)?;

    let diag = LogDiagnostics;
    let grids: Vec<Grid> = texts
        .iter()
        .map(|text| {
            encode(
                &GridRequest {
                    text,
                    width: config.width,
                    max_rows: config.max_rows,
                },
                &diag,
            )
        })
        .collect();

    let batch = collate(grids, &diag);

    serde_json::to_writer(std::io::stdout().lock(), &batch)
        .context("Failed to write grids to stdout")?;
    println!();

    info!("Encoded {} document(s)", batch.len());
    Ok(())
}
