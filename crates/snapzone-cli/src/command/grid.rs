use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    command::LoadArg,
    report::GridReport,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GridArg {
    /// Number of items to lay out
    #[arg(required_unless_present = "csv", conflicts_with = "csv")]
    items: Option<u64>,
    /// Use the sample count of this CSV table instead
    #[arg(long)]
    csv: Option<PathBuf>,
    #[clap(flatten)]
    pub(crate) load: LoadArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GridArg) -> anyhow::Result<()> {
    let items = match (&arg.items, &arg.csv) {
        (Some(items), _) => *items,
        (None, Some(csv)) => {
            let dataset = util::load_dataset(csv, &arg.load)?;
            u64::try_from(dataset.num_samples()?)?
        }
        (None, None) => anyhow::bail!("Either an item count or --csv is required"),
    };

    let (rows, columns) = snapzone_layout::rectangle(items)
        .with_context(|| format!("Failed to compute a grid for {items} items"))?;
    eprintln!("{items} items fit a {rows} x {columns} grid");

    let report = GridReport {
        items,
        rows,
        columns,
        spare: rows * columns - items,
    };
    Output::save_json(&report, arg.output.clone())?;

    Ok(())
}
