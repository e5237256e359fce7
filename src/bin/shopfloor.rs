//! Console front end for the line simulator.
//!
//! Takes the shift duration and shift count, builds the reference
//! five-stage line (or a line from a config file), runs one simulation,
//! and prints the results block. Progress lines render through `tracing`.

use anyhow::Context;
use clap::Parser;

use shopfloor::{ProductionLine, SimConfig, TraceObserver};

#[derive(Parser, Debug)]
#[command(name = "shopfloor", about = "Discrete-event manufacturing line simulator")]
struct Cli {
    /// Shift duration in hours
    #[arg(long, default_value_t = 8)]
    shift_hours: u32,

    /// Number of back-to-back shifts
    #[arg(long, default_value_t = 1)]
    shifts: u32,

    /// Line configuration file (.yaml, .yml, or .json); defaults to the
    /// built-in five-stage line
    #[arg(long)]
    config: Option<String>,

    /// Base RNG seed (stage i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_file(path).with_context(|| format!("loading {path}"))?,
        None => SimConfig::default(),
    };

    config.shift.duration_hours = cli.shift_hours;
    config.shift.count = cli.shifts;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate().context("invalid configuration")?;

    shopfloor::init_logging(&config.log_level);

    let mut line = ProductionLine::new(&config, Box::new(TraceObserver));
    let stats = line.run();

    stats
        .write_summary(std::io::stdout().lock())
        .context("writing summary")?;

    if let Some(path) = cli.stats_out {
        stats
            .to_json_file(&path)
            .with_context(|| format!("writing {path}"))?;
    }

    Ok(())
}
