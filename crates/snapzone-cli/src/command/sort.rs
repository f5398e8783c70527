use std::path::PathBuf;

use snapzone_data::sort::SortKey;

use crate::{
    command::DatasetArg,
    report::{ReportHeader, SortReport},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SortArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Sort key, by name or index (id, time, location, color)
    #[arg(long, default_value = "id")]
    by: SortKey,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SortArg) -> anyhow::Result<()> {
    let SortArg {
        dataset: dataset_arg,
        by,
        output,
    } = arg;

    let mut dataset = util::open_dataset(dataset_arg)?;
    dataset.sort_rows(*by)?;

    let id_column = &dataset.schema().id_column;
    let ids = dataset
        .table()?
        .rows()
        .iter()
        .map(|row| row.get(id_column).unwrap_or_default().to_owned())
        .collect();

    let report = SortReport {
        header: ReportHeader::new(dataset_arg.csv.clone()),
        sort_by: by.to_string(),
        ids,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}
