//! Lens Cascade CLI
//!
//! Runs single-system propagations and magnification sweeps from a TOML
//! configuration file, command-line flags, or both.

use clap::{Args, Parser, Subcommand, ValueEnum};
use lens_cascade::{
    config::FileConfig,
    metrics::{MetricsRegistry, MetricsSnapshot},
    presentation::{save_grid_csv, write_grid_csv, GridTable, Heatmap, SaturationCap, SystemReport},
};
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "lens-cascade", version, about = "Thin-lens cascade propagation and sweeps")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics after the run
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Propagate an object through one lens system
    Propagate(PropagateArgs),
    /// Map total magnification over object distance and uniform gap
    Sweep(SweepArgs),
}

#[derive(Debug, Args)]
struct LensArgs {
    /// Object height (cm)
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// Focal lengths in path order, comma separated (cm)
    #[arg(long = "lenses", value_delimiter = ',', allow_negative_numbers = true)]
    lenses: Vec<f64>,
}

#[derive(Debug, Args)]
struct PropagateArgs {
    #[command(flatten)]
    lens: LensArgs,

    /// Object distance then inter-lens gaps, comma separated (cm)
    #[arg(long = "gaps", value_delimiter = ',', allow_negative_numbers = true)]
    gaps: Vec<f64>,

    /// Decimals in printed values
    #[arg(long)]
    decimals: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Heatmap,
    Csv,
}

#[derive(Debug, Args)]
struct SweepArgs {
    #[command(flatten)]
    lens: LensArgs,

    /// Initial object distances, comma separated (cm)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    distances: Vec<f64>,

    /// Uniform inter-lens gaps, comma separated (cm)
    #[arg(long = "spacings", value_delimiter = ',', allow_negative_numbers = true)]
    spacings: Vec<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Magnitude at which values display as saturated
    #[arg(long)]
    threshold: Option<f64>,

    /// Write CSV to this file instead of stdout (csv format only)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Evaluate cells on a single thread
    #[arg(long)]
    sequential: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<FileConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(FileConfig::from_file(path)?),
        None => Ok(FileConfig::default()),
    }
}

fn apply_lens_args(config: &mut FileConfig, args: &LensArgs) {
    if let Some(height) = args.height {
        config.system.object_height = height;
    }
    if !args.lenses.is_empty() {
        config.system.focal_lengths = args.lenses.clone();
    }
}

fn run_propagate(
    mut config: FileConfig,
    args: PropagateArgs,
    registry: &MetricsRegistry,
) -> Result<(), Box<dyn Error>> {
    apply_lens_args(&mut config, &args.lens);
    if !args.gaps.is_empty() {
        config.system.gaps = args.gaps;
    }
    if let Some(decimals) = args.decimals {
        config.display.decimals = decimals;
    }

    let system = config.system.lens_system()?;
    let result = system.propagate(config.system.object_height, &config.system.gaps)?;

    if result.degenerate_stages() > 0 {
        warn!(
            stages = result.degenerate_stages(),
            "Degenerate conjugates present; infinities are sentinels"
        );
    }

    println!(
        "{}",
        SystemReport::new(&result).with_decimals(config.display.decimals)
    );
    registry.record(&MetricsSnapshot::from_system(&result));
    Ok(())
}

fn run_sweep(
    mut config: FileConfig,
    args: SweepArgs,
    registry: &MetricsRegistry,
) -> Result<(), Box<dyn Error>> {
    apply_lens_args(&mut config, &args.lens);
    if !args.distances.is_empty() {
        config.sweep.distances = args.distances.into();
    }
    if !args.spacings.is_empty() {
        config.sweep.gaps = args.spacings.into();
    }
    if let Some(threshold) = args.threshold {
        config.display.saturation_threshold = threshold;
    }
    if args.sequential {
        config.sweep.parallel = false;
    }
    config.display.validate()?;

    let system = config.system.lens_system()?;
    let (distances, gaps) = config.sweep.axes()?;
    let analyzer = config.sweep.analyzer(system, config.system.object_height);
    let grid = analyzer.run(&distances, &gaps)?;

    let cap: SaturationCap = config.display.cap();
    match args.format {
        OutputFormat::Table => println!(
            "{}",
            GridTable::new(&grid)
                .with_cap(cap)
                .with_decimals(config.display.decimals)
        ),
        OutputFormat::Heatmap => {
            let heatmap = Heatmap::new(cap, config.display.gradient, config.display.bands);
            println!("{}", heatmap.render_ansi(&grid));
        }
        OutputFormat::Csv => match args.output {
            Some(path) => save_grid_csv(&grid, path)?,
            None => write_grid_csv(&grid, std::io::stdout().lock())?,
        },
    }

    if let Some((lo, hi)) = grid.extremes() {
        info!(min = lo, max = hi, "Finite magnification range");
    }
    registry.record(&MetricsSnapshot::from_grid(
        &grid,
        analyzer.system().len(),
        &cap,
    ));
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;
    let registry = MetricsRegistry::new()?;

    match cli.command {
        Command::Propagate(args) => run_propagate(config, args, &registry)?,
        Command::Sweep(args) => run_sweep(config, args, &registry)?,
    }

    if cli.metrics {
        print!("{}", registry.encode()?);
    }
    Ok(())
}

/// Log filter from `RUST_LOG`-style directives, defaulting to `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() {
    // Initialize logging
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();
    info!("Lens Cascade v{}", lens_cascade::VERSION);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
