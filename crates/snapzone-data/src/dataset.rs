//! The loaded dataset and everything consumers may ask of it.
//!
//! [`Dataset`] owns the table, the marker ordering and the load signal for
//! one dataset. Every operation that reads the table checks that a table has
//! been loaded and fails with [`DataError::NotLoaded`], naming the
//! operation, if not. [`Dataset::is_loaded`] is the non-failing check.
//!
//! Row sorting and marker reordering mutate the dataset in place and take
//! `&mut self`; concurrent readers must be serialized by the owner.
//!
//! ```
//! use snapzone_data::{dataset::Dataset, schema::Schema, table::Table};
//!
//! let mut dataset = Dataset::new(Schema::default());
//! assert!(!dataset.is_loaded());
//! let err = dataset.num_samples().unwrap_err();
//! assert_eq!(err.to_string(), "num_samples: data not loaded");
//!
//! dataset.set_table(Table::from_records(["PlantID_final"], [vec!["P1".into()]]));
//! assert_eq!(dataset.num_samples().unwrap(), 1);
//! assert_eq!(dataset.sample(0).unwrap().id, "P1");
//! ```

use std::path::Path;

use crate::{
    DataError,
    ordering::{ReorderStrategy, SnpOrdering},
    sample::Sample,
    schema::{COLOR_LINKED_COUNT, Schema},
    signal::{LoadSignal, LoadWaiter},
    sort::{self, SortKey},
    statistics::Statistics,
    table::{Table, TableLoader},
};

#[derive(Debug, Default)]
pub struct Dataset {
    schema: Schema,
    loaded: Option<Loaded>,
    signal: LoadSignal,
}

#[derive(Debug)]
struct Loaded {
    table: Table,
    ordering: SnpOrdering,
}

impl Dataset {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            loaded: None,
            signal: LoadSignal::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Loads a table through `loader`, replacing any previous one.
    ///
    /// The previous table is dropped before loading starts, so a failed load
    /// leaves the dataset unloaded.
    pub fn load<L>(&mut self, loader: &L, path: &Path) -> Result<&Table, L::Error>
    where
        L: TableLoader,
    {
        log::info!("loading data {}", path.display());
        self.loaded = None;
        self.signal.rearm();
        let table = loader.load(path)?;
        log::info!(
            "loading data done: {} samples, {} columns",
            table.len(),
            table.columns().len()
        );
        Ok(self.set_table(table))
    }

    /// Installs an already ingested table and signals readiness.
    pub fn set_table(&mut self, table: Table) -> &Table {
        self.signal.rearm();
        let ordering = SnpOrdering::from_table(&table, &self.schema);
        log::debug!(
            "captured {} markers from the table header",
            ordering.original_order().len()
        );
        let loaded = self.loaded.insert(Loaded { table, ordering });
        self.signal.fire();
        &loaded.table
    }

    /// Returns a waiter that is released once a table is loaded.
    ///
    /// If a table is already loaded the waiter is ready immediately.
    #[must_use]
    pub fn loaded(&self) -> LoadWaiter {
        self.signal.subscribe()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Fails with [`DataError::NotLoaded`] naming `caller` if no table is
    /// loaded.
    pub fn check_loaded(&self, caller: &str) -> Result<(), DataError> {
        self.get(caller).map(|_| ())
    }

    fn get(&self, caller: &str) -> Result<&Loaded, DataError> {
        self.loaded.as_ref().ok_or_else(|| DataError::NotLoaded {
            caller: caller.to_owned(),
        })
    }

    fn get_mut(&mut self, caller: &str) -> Result<&mut Loaded, DataError> {
        self.loaded.as_mut().ok_or_else(|| DataError::NotLoaded {
            caller: caller.to_owned(),
        })
    }

    pub fn table(&self) -> Result<&Table, DataError> {
        Ok(&self.get("table")?.table)
    }

    /// Direct table access. Replacing rows does not touch the marker
    /// ordering, which follows the header.
    pub fn table_mut(&mut self) -> Result<&mut Table, DataError> {
        Ok(&mut self.get_mut("table_mut")?.table)
    }

    pub fn num_samples(&self) -> Result<usize, DataError> {
        Ok(self.get("num_samples")?.table.len())
    }

    /// Marker names in physical column order.
    pub fn marker_names(&self) -> Result<&[String], DataError> {
        Ok(self.get("marker_names")?.ordering.original_order())
    }

    /// Marker names in the order samples are projected with.
    pub fn active_markers(&self) -> Result<&[String], DataError> {
        Ok(self.get("active_markers")?.ordering.active_order())
    }

    pub fn color_linked_positions(
        &self,
    ) -> Result<[Option<usize>; COLOR_LINKED_COUNT], DataError> {
        Ok(self
            .get("color_linked_positions")?
            .ordering
            .color_linked_positions())
    }

    /// Projects the row at `index` in the current row order.
    pub fn sample(&self, index: usize) -> Result<Sample, DataError> {
        let loaded = self.get("sample")?;
        let row = loaded
            .table
            .row(index)
            .ok_or(DataError::RowOutOfRange {
                index,
                len: loaded.table.len(),
            })?;
        Ok(Sample::project(
            row,
            &self.schema,
            loaded.ordering.active_order(),
        ))
    }

    pub fn statistics(&self) -> Result<Statistics, DataError> {
        let loaded = self.get("statistics")?;
        Ok(Statistics::compute(
            &loaded.table,
            &self.schema,
            loaded.ordering.active_order(),
        ))
    }

    pub fn sort_rows(&mut self, key: SortKey) -> Result<(), DataError> {
        let schema = &self.schema;
        let loaded = self
            .loaded
            .as_mut()
            .ok_or_else(|| DataError::NotLoaded {
                caller: "sort_rows".to_owned(),
            })?;
        sort::sort_rows(&mut loaded.table, schema, key);
        Ok(())
    }

    pub fn reorder_markers(
        &mut self,
        strategy: ReorderStrategy,
        limit: i64,
    ) -> Result<(), DataError> {
        self.get_mut("reorder_markers")?
            .ordering
            .reorder(strategy, limit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf, thread};

    use super::*;
    use crate::{Reading, schema::PhenoCategory};

    struct MemoryLoader(Vec<Vec<&'static str>>);

    impl TableLoader for MemoryLoader {
        type Error = io::Error;

        fn load(&self, _path: &Path) -> Result<Table, Self::Error> {
            let mut rows = self.0.iter();
            let header = rows
                .next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "empty"))?;
            Ok(Table::from_records(
                header.iter().copied(),
                rows.map(|r| r.iter().map(|v| (*v).to_owned()).collect()),
            ))
        }
    }

    fn schema() -> Schema {
        Schema {
            years: vec![2009, 2010],
            marker_block: (2, 4),
            color_linked_markers: ["m3", "x2", "x3", "x4", "x5", "x6"].map(str::to_owned),
            ..Schema::default()
        }
    }

    fn loader() -> MemoryLoader {
        MemoryLoader(vec![
            vec![
                "PlantID_final",
                "phenoCat_final",
                "m1",
                "m2",
                "m3",
                "AliveRec_2009",
                "AliveRec_2010",
                "Red_final",
                "Yellow_final",
            ],
            vec!["P2", "FR", "0", "1", "2", "0", "1", "2.0", "0.1"],
            vec!["P1", "Y", "2", "1", "0", "1", "1", "0.0", "3.0"],
            vec!["P3", "W", "1", "1", "1", "0", "0", "0.0", "0.0"],
        ])
    }

    fn loaded_dataset() -> Dataset {
        let mut dataset = Dataset::new(schema());
        dataset.load(&loader(), &PathBuf::from("memory")).unwrap();
        dataset
    }

    #[test]
    fn test_not_loaded_names_caller() {
        let mut dataset = Dataset::new(schema());
        assert!(!dataset.is_loaded());

        let checks = [
            ("table", dataset.table().map(|_| ()).unwrap_err()),
            ("table_mut", dataset.table_mut().map(|_| ()).unwrap_err()),
            ("num_samples", dataset.num_samples().map(|_| ()).unwrap_err()),
            ("marker_names", dataset.marker_names().map(|_| ()).unwrap_err()),
            ("sample", dataset.sample(0).map(|_| ()).unwrap_err()),
            ("statistics", dataset.statistics().map(|_| ()).unwrap_err()),
            ("get_stats", dataset.check_loaded("get_stats").unwrap_err()),
        ];
        for (caller, err) in checks {
            assert!(err.is_not_loaded());
            assert!(err.to_string().contains(caller), "{err}");
        }

        let err = dataset.sort_rows(SortKey::Time).unwrap_err();
        assert_eq!(err.to_string(), "sort_rows: data not loaded");
        let err = dataset
            .reorder_markers(ReorderStrategy::Alnum, 0)
            .unwrap_err();
        assert_eq!(err.to_string(), "reorder_markers: data not loaded");
    }

    #[test]
    fn test_query_surface() {
        let dataset = loaded_dataset();
        assert!(dataset.is_loaded());
        dataset.check_loaded("test").unwrap();
        assert_eq!(dataset.num_samples().unwrap(), 3);
        assert_eq!(dataset.marker_names().unwrap(), ["m1", "m2", "m3"]);
        assert_eq!(
            dataset.color_linked_positions().unwrap(),
            [Some(2), None, None, None, None, None]
        );

        let sample = dataset.sample(1).unwrap();
        assert_eq!(sample.id, "P1");
        assert_eq!(sample.years_alive, [2009, 2010]);
        assert_eq!(sample.color.known_category(), Some(PhenoCategory::Yellow));

        let err = dataset.sample(3).unwrap_err();
        assert!(err.is_row_out_of_range());

        let stats = dataset.statistics().unwrap();
        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.marker_values.iter().map(|(_, c)| c).sum::<u64>(), 9);
    }

    #[test]
    fn test_sort_and_reorder_affect_samples() {
        let mut dataset = loaded_dataset();

        dataset.sort_rows(SortKey::Id).unwrap();
        assert_eq!(dataset.sample(0).unwrap().id, "P1");
        dataset.sort_rows(SortKey::Time).unwrap();
        let order = (0..3)
            .map(|i| dataset.sample(i).unwrap().id)
            .collect::<Vec<_>>();
        assert_eq!(order, ["P1", "P2", "P3"]);

        dataset
            .reorder_markers(ReorderStrategy::ColorStart, 0)
            .unwrap();
        assert_eq!(dataset.color_linked_positions().unwrap()[0], Some(0));
        let sample = dataset.sample(0).unwrap();
        assert_eq!(sample.markers[0].name, "m3");
        // no limit: both plain markers follow the six color-linked names
        let names = sample
            .markers
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["m3", "x2", "x3", "x4", "x5", "x6", "m1", "m2"]);
        // x2..x6 are not in the table
        assert!(!sample.markers[1].value.is_number());
        assert_eq!(sample.marker("m1"), Some(Reading::Number(2.0)));
        // physical order is unaffected
        assert_eq!(dataset.marker_names().unwrap(), ["m1", "m2", "m3"]);
    }

    #[test]
    fn test_failed_load_leaves_dataset_unloaded() {
        let mut dataset = loaded_dataset();
        let result = dataset.load(&MemoryLoader(vec![]), Path::new("broken"));
        assert!(result.is_err());
        assert!(!dataset.is_loaded());
        assert!(!dataset.loaded().is_ready());
    }

    #[test]
    fn test_waiter_released_by_load() {
        let mut dataset = Dataset::new(schema());
        let waiter = dataset.loaded();
        let handle = thread::spawn(move || waiter.wait());
        dataset.load(&loader(), Path::new("memory")).unwrap();
        handle.join().unwrap();
        assert!(dataset.loaded().is_ready());
    }
}
