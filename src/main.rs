//! cornerpin - corner-pin distortion solver for CSS matrix3d transforms
//!
//! Builds a distortion from a configuration file plus command-line
//! overrides, applies the requested corner manipulations, and prints the
//! resulting CSS transform string (or a JSON report).

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cornerpin::{Config, Distortion, Edge, GeometryError, Matrix3d, OffsetSpec};

/// Corner-pin distortion solver producing CSS matrix3d transforms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "cornerpin.toml")]
    config: PathBuf,

    /// Rectangle width (overrides config)
    #[arg(long)]
    width: Option<f64>,

    /// Rectangle height (overrides config)
    #[arg(long)]
    height: Option<f64>,

    /// Transform origin x, e.g. "10px" or "50%" (overrides config)
    #[arg(long)]
    origin_x: Option<String>,

    /// Transform origin y, e.g. "10px" or "50%" (overrides config)
    #[arg(long)]
    origin_y: Option<String>,

    /// Shift all corners by X and Y
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    translate: Option<Vec<f64>>,

    /// Scale all corners about their centroid
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,

    /// Fake a perspective tilt: edge (top/left/bottom/right) and amount
    #[arg(long, num_args = 2, value_names = ["EDGE", "AMOUNT"])]
    perspective: Option<Vec<String>>,

    /// Emit a JSON report instead of the bare style string
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Report emitted by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    width: f64,
    height: f64,
    matrix: &'a Matrix3d,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<GeometryError>,
    style: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; diagnostics go to stderr so the style string on
    // stdout stays clean for piping.
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    info!("cornerpin v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_or_create(&args.config)?;

    // CLI overrides on top of the config file
    if let Some(width) = args.width {
        config.rect.width = width;
    }
    if let Some(height) = args.height {
        config.rect.height = height;
    }
    if let Some(raw) = &args.origin_x {
        config.rect.origin.x = raw
            .parse::<OffsetSpec>()
            .with_context(|| format!("Invalid --origin-x {raw:?}"))?;
    }
    if let Some(raw) = &args.origin_y {
        config.rect.origin.y = raw
            .parse::<OffsetSpec>()
            .with_context(|| format!("Invalid --origin-y {raw:?}"))?;
    }

    let mut distortion = config.to_distortion();
    apply_mutations(&mut distortion, &args)?;

    if args.json {
        let report = Report {
            width: distortion.width(),
            height: distortion.height(),
            matrix: distortion.matrix(),
            valid: distortion.is_valid(),
            error: distortion.error(),
            style: distortion.style(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", distortion.style());
    }

    Ok(())
}

/// Apply the corner manipulations requested on the command line, in the
/// order translate, scale, perspective.
fn apply_mutations(distortion: &mut Distortion, args: &Args) -> Result<()> {
    if let Some(shift) = &args.translate {
        distortion.translate(shift[0], shift[1]);
    }
    if let Some(factor) = args.scale {
        distortion.scale(factor);
    }
    if let Some(perspective) = &args.perspective {
        let edge: Edge = perspective[0].parse()?;
        let amount: f64 = perspective[1]
            .parse()
            .with_context(|| format!("Invalid perspective amount {:?}", perspective[1]))?;
        distortion.force_perspective(edge, amount);
    }
    Ok(())
}
