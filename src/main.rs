//! ltek-footprint: KiCad footprint generator for Harwin LTek connectors
//!
//! Builds one `.kicad_mod` footprint per invocation from the connector
//! parameters given on the command line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use ltek_footprint::config::{self, Config};
use ltek_footprint::footprint::{ConnectorSpec, RowTwoPlacement};
use ltek_footprint::kicad;
use ltek_footprint::Error;

/// KiCad footprint generator for Harwin LTek connectors.
///
/// Writes `Harwin_LTek-Male_{PINS}.kicad_mod` to the output directory.
#[derive(Parser, Debug)]
#[command(name = "ltek-footprint")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total number of pins across all rows
    #[arg(short, long, default_value_t = 2)]
    pins: u32,

    /// Number of rows (1 or 2)
    #[arg(short, long, default_value_t = 1)]
    rows: u32,

    /// Pin pitch in mm [default: from config, else 2.00]
    #[arg(long)]
    pitch: Option<f64>,

    /// Right-angle part instead of vertical
    #[arg(long)]
    right_angle: bool,

    /// Omit the strain relief clips
    #[arg(long)]
    no_strain_relief: bool,

    /// SMD pads instead of through-hole pins
    #[arg(long)]
    smd: bool,

    /// Placement of the second row [default: from config, else reference]
    #[arg(long, value_enum)]
    row_two: Option<RowTwoArg>,

    /// Output directory [default: from config, else current directory]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Print the footprint to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Overwrite an existing footprint file
    #[arg(short, long)]
    force: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Second-row placement as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RowTwoArg {
    /// Legacy output: every row-two pad at (0, pitch)
    Reference,
    /// Row-two pads directly below their row-one partners
    Aligned,
}

impl From<RowTwoArg> for RowTwoPlacement {
    fn from(arg: RowTwoArg) -> Self {
        match arg {
            RowTwoArg::Reference => Self::Reference,
            RowTwoArg::Aligned => Self::Aligned,
        }
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the connector spec from the config with CLI overrides applied.
fn connector_spec(args: &Args, cfg: &Config) -> Result<ConnectorSpec, Error> {
    let mut builder = cfg
        .spec_builder()
        .pins(args.pins)
        .rows(args.rows)
        .vertical(!args.right_angle)
        .strain_relief(!args.no_strain_relief)
        .surface_mount(args.smd);

    if let Some(pitch) = args.pitch {
        builder = builder.pitch(pitch);
    }
    if let Some(row_two) = args.row_two {
        builder = builder.row_two(row_two.into());
    }

    builder.build().map_err(Error::from)
}

/// Generates the footprint and writes it out.
fn run(args: &Args, cfg: &Config) -> Result<(), Error> {
    let spec = connector_spec(args, cfg)?;
    let document = ltek_footprint::generate(&spec, cfg)?;
    let text = document.render();

    if args.stdout {
        print!("{text}");
        return Ok(());
    }

    let dir = args
        .output
        .as_deref()
        .or(cfg.output.directory.as_deref())
        .unwrap_or_else(|| Path::new("."));
    let path = kicad::footprint_path(dir, &document.name);
    kicad::write_footprint_file(&path, &text, args.force || cfg.output.overwrite)?;

    info!(
        name = %document.name,
        pads = document.pads.len(),
        path = %path.display(),
        "Footprint generated"
    );
    Ok(())
}

/// Entry point for the ltek-footprint generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if let Some(default_path) = config::default_config_path() {
                eprintln!("\nDefault config location: {}", default_path.display());
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Footprint generation failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
