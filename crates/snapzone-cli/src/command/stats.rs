use std::path::PathBuf;

use snapzone_data::statistics::Statistics;

use crate::{
    command::{DatasetArg, OrderingArg},
    report::{ReportHeader, StatsReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    #[clap(flatten)]
    pub(crate) dataset: DatasetArg,
    #[clap(flatten)]
    ordering: OrderingArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let StatsArg {
        dataset: dataset_arg,
        ordering,
        output,
    } = arg;

    let mut dataset = util::open_dataset(dataset_arg)?;
    dataset.reorder_markers(ordering.strategy, ordering.limit)?;

    eprintln!("Computing statistics...");
    let statistics = dataset.statistics()?;
    print_summary(&statistics);

    let report = StatsReport {
        header: ReportHeader::new(dataset_arg.csv.clone()),
        strategy: ordering.strategy.to_string(),
        markers: dataset.active_markers()?.to_vec(),
        statistics,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}

fn print_summary(stats: &Statistics) {
    eprintln!("Samples: {}", stats.sample_count);
    eprintln!("Distinct marker readings: {}", stats.marker_values.len());
    for (name, range) in [("red", &stats.red_range), ("yellow", &stats.yellow_range)] {
        match (range.min, range.max, range.avg) {
            (Some(min), Some(max), Some(avg)) => eprintln!(
                "  {name:<6} n={:<6} min={min:.3} max={max:.3} avg={avg:.3}",
                range.count
            ),
            _ => eprintln!("  {name:<6} n=0"),
        }
    }
    for (category, ranges) in &stats.per_category {
        eprintln!("  {:<11} n={}", category.label(), ranges.red.count);
    }
}
