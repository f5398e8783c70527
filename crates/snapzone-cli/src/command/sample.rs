use std::path::PathBuf;

use snapzone_data::sort::SortKey;

use crate::{
    command::{DatasetArg, OrderingArg},
    report::{ReportHeader, SampleReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Row index after sorting
    index: usize,
    /// Sort rows before picking the sample (id, time, location, color)
    #[arg(long)]
    sort_by: Option<SortKey>,
    #[clap(flatten)]
    ordering: OrderingArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SampleArg) -> anyhow::Result<()> {
    let SampleArg {
        dataset: dataset_arg,
        index,
        sort_by,
        ordering,
        output,
    } = arg;

    let mut dataset = util::open_dataset(dataset_arg)?;
    if let Some(key) = sort_by {
        dataset.sort_rows(*key)?;
    }
    dataset.reorder_markers(ordering.strategy, ordering.limit)?;

    let report = SampleReport {
        header: ReportHeader::new(dataset_arg.csv.clone()),
        index: *index,
        sort_by: sort_by.map(|key| key.to_string()),
        sample: dataset.sample(*index)?,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}
