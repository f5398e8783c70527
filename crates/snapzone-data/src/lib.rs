//! Sample projection and dataset statistics for the hybrid-zone survey table
//!
//! This crate turns the raw survey table (one row per plant: survival flags,
//! marker calls, color scores, geolocation) into structured samples and
//! dataset-wide statistics.
//!
//! # Overview
//!
//! 1. **Load** ([`dataset::Dataset::load`]): an ingestion layer implementing
//!    [`table::TableLoader`] hands over a [`table::Table`]
//! 2. **Order markers** ([`ordering::SnpOrdering`]): the physical marker block
//!    is captured once; reorder strategies rearrange the active order
//! 3. **Sort rows** ([`sort::sort_rows`]): by identifier, first year alive,
//!    easting or phenotype category
//! 4. **Project** ([`sample::Sample::project`]): one row into a sample
//! 5. **Aggregate** ([`statistics::Statistics::compute`]): pooled frequency
//!    tables and range summaries over every sample
//!
//! Column names and positions come from [`schema::Schema`].
//!
//! # Numeric fields
//!
//! Numeric columns are parsed leniently into
//! [`Reading`](snapzone_stats::reading::Reading)s. Blank or malformed values
//! are not errors; they surface as `NotANumber`, are skipped by ranges and
//! are counted as their own key by frequency tables.
//!
//! # Examples
//!
//! ```
//! use snapzone_data::{
//!     dataset::Dataset, ordering::ReorderStrategy, schema::Schema, sort::SortKey, table::Table,
//! };
//!
//! let schema = Schema {
//!     marker_block: (1, 2),
//!     ..Schema::default()
//! };
//! let mut dataset = Dataset::new(schema);
//! dataset.set_table(Table::from_records(
//!     ["PlantID_final", "s2", "s1", "Red_final"],
//!     [
//!         vec!["B".into(), "0".into(), "1".into(), "0.5".into()],
//!         vec!["A".into(), "2".into(), "NA".into(), "x".into()],
//!     ],
//! ));
//!
//! dataset.sort_rows(SortKey::Id)?;
//! dataset.reorder_markers(ReorderStrategy::Alnum, 0)?;
//!
//! let sample = dataset.sample(0)?;
//! assert_eq!(sample.id, "A");
//! assert_eq!(sample.markers[0].name, "s1");
//!
//! let stats = dataset.statistics()?;
//! assert_eq!(stats.red_range.count, 1);
//! # Ok::<(), snapzone_data::DataError>(())
//! ```

pub use snapzone_stats::reading::Reading;

pub mod dataset;
pub mod ordering;
pub mod sample;
pub mod schema;
pub mod signal;
pub mod sort;
pub mod statistics;
pub mod table;

#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum DataError {
    #[display("{caller}: data not loaded")]
    NotLoaded { caller: String },
    #[display("sample index {index} out of range for {len} samples")]
    RowOutOfRange { index: usize, len: usize },
}
