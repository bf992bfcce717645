//! Fluid snapshot tool.
//!
//! Reads stylesheets from disk, extracts their fluid declarations and prints the
//! clone tree together with its breakpoint batches as JSON.

use anyhow::{Context as _, Result, anyhow, bail};
use css::config::parse_width;
use css::{PipelineConfig, TextDocument, TextSheet, snapshot};
use log::warn;
use serde_json::{to_writer, to_writer_pretty};
use std::env;
use std::fs::read_to_string;
use std::io::{Write as _, stderr, stdout};
use std::path::PathBuf;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Fluid property file overriding `FLUID_PROPERTIES`.
    properties: Option<PathBuf>,
    /// Baseline width overriding `FLUID_BASELINE_WIDTH`.
    baseline: Option<u32>,
    /// Pretty-print the JSON output.
    pretty: bool,
    /// Stylesheets in document order.
    files: Vec<PathBuf>,
}

/// Print usage information to stderr.
fn print_usage() {
    drop(writeln!(
        stderr(),
        "Usage:\n  fluid_snapshot [--properties <PATH>] [--baseline <PX>] [--pretty] <FILE.css>..."
    ));
}

/// Parse command line arguments (without the program name).
///
/// # Errors
/// Returns an error for unknown flags, flags missing their value, or when no
/// stylesheet is given.
fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--properties" => {
                let path = args
                    .get(index + 1)
                    .ok_or_else(|| anyhow!("--properties requires a path"))?;
                options.properties = Some(PathBuf::from(path));
                index += 2;
            }
            "--baseline" => {
                let width = args
                    .get(index + 1)
                    .ok_or_else(|| anyhow!("--baseline requires a width"))?;
                options.baseline = Some(parse_width(width)?);
                index += 2;
            }
            "--pretty" => {
                options.pretty = true;
                index += 1;
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            file => {
                options.files.push(PathBuf::from(file));
                index += 1;
            }
        }
    }
    if options.files.is_empty() {
        bail!("no stylesheet given");
    }
    Ok(options)
}

/// Resolve the pipeline configuration: environment first, flags override.
///
/// # Errors
/// Returns an error when the environment or the property file is invalid.
fn load_config(options: &Options) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::from_env()?;
    if let Some(path) = &options.properties {
        config = config.with_properties_file(path)?;
    }
    if let Some(width) = options.baseline {
        config = config.with_baseline_width(width);
    }
    Ok(config)
}

/// Load each file as one stylesheet; unreadable files become unavailable sheets.
fn load_document(files: &[PathBuf]) -> TextDocument {
    let mut document = TextDocument::new();
    for path in files {
        let location = path.display().to_string();
        match read_to_string(path) {
            Ok(css) => document.push(TextSheet::parse_at(location, &css)),
            Err(error) => {
                warn!("cannot read {location}: {error}");
                document.push_unavailable(location, error.to_string());
            }
        }
    }
    document
}

/// Snapshot `files` and write the JSON to stdout.
///
/// # Errors
/// Returns an error if configuration, extraction or output fails.
fn run(options: &Options) -> Result<()> {
    let config = load_config(options)?;
    let document = load_document(&options.files);
    let result = snapshot(&document, &config)?;
    let mut out = stdout().lock();
    if options.pretty {
        to_writer_pretty(&mut out, &result)?;
    } else {
        to_writer(&mut out, &result)?;
    }
    writeln!(out).context("failed to write snapshot")?;
    Ok(())
}

/// Main entry point for the `fluid_snapshot` CLI tool.
///
/// # Errors
/// Returns an error if argument parsing or the snapshot fails.
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args).inspect_err(|_| print_usage())?;
    run(&options)
}
