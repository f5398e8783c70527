use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use snapzone_data::ordering::ReorderStrategy;

use self::{
    grid::GridArg, markers::MarkersArg, sample::SampleArg, sort::SortArg, stats::StatsArg,
};

mod grid;
mod markers;
mod sample;
mod sort;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// What to do with the dataset
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute dataset-wide statistics
    Stats(#[clap(flatten)] StatsArg),
    /// Show one projected sample
    Sample(#[clap(flatten)] SampleArg),
    /// Show the physical and active marker orders
    Markers(#[clap(flatten)] MarkersArg),
    /// List plant identifiers in sorted row order
    Sort(#[clap(flatten)] SortArg),
    /// Compute a near-square grid for laying out samples
    Grid(#[clap(flatten)] GridArg),
}

/// Options shared by every command that reads a dataset.
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Survey table in CSV format
    pub(crate) csv: PathBuf,
    #[clap(flatten)]
    pub(crate) load: LoadArg,
}

/// How the survey table is read and interpreted.
#[derive(Debug, Clone, Args)]
pub(crate) struct LoadArg {
    /// JSON file overriding the default column schema
    #[arg(long)]
    pub(crate) schema: Option<PathBuf>,
    /// Field delimiter of the CSV table
    #[arg(long, default_value_t = ',')]
    pub(crate) delimiter: char,
}

/// Active marker order applied before projecting samples.
#[derive(Debug, Clone, Args)]
pub(crate) struct OrderingArg {
    /// Reorder strategy, by name or index
    /// (`default`, `color_start`, `color_middle`, `color_end`, `alnum`)
    #[arg(long, default_value = "default")]
    pub(crate) strategy: ReorderStrategy,
    /// Number of markers to keep; non-positive keeps all
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub(crate) limit: i64,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_micros()
        .init();

    match args.mode {
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Sample(arg) => sample::run(&arg)?,
        Mode::Markers(arg) => markers::run(&arg)?,
        Mode::Sort(arg) => sort::run(&arg)?,
        Mode::Grid(arg) => grid::run(&arg)?,
    }
    Ok(())
}
