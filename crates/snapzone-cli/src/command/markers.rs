use std::path::PathBuf;

use crate::{
    command::{DatasetArg, OrderingArg},
    report::{ColorLinkedMarker, MarkersReport, ReportHeader},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MarkersArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    pub(crate) ordering: OrderingArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MarkersArg) -> anyhow::Result<()> {
    let MarkersArg {
        dataset: dataset_arg,
        ordering,
        output,
    } = arg;

    let mut dataset = util::open_dataset(dataset_arg)?;
    dataset.reorder_markers(ordering.strategy, ordering.limit)?;

    let positions = dataset.color_linked_positions()?;
    let color_linked = dataset
        .schema()
        .color_linked_markers
        .iter()
        .zip(positions)
        .map(|(name, position)| ColorLinkedMarker {
            name: name.clone(),
            position,
        })
        .collect::<Vec<_>>();
    for marker in color_linked.iter().filter(|m| m.position.is_none()) {
        log::warn!("color-linked marker {} is not in the active order", marker.name);
    }

    let report = MarkersReport {
        header: ReportHeader::new(dataset_arg.csv.clone()),
        strategy: ordering.strategy.to_string(),
        original: dataset.marker_names()?.to_vec(),
        active: dataset.active_markers()?.to_vec(),
        color_linked,
    };
    Output::save_json(&report, output.clone())?;

    Ok(())
}
