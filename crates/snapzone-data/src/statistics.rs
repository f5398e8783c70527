//! Dataset-wide distributions and ranges.
//!
//! [`Statistics::compute`] projects every row once and feeds the sample into
//! a fixed set of collectors:
//!
//! - **Pooled frequency tables**: marker readings (all markers of all
//!   samples in one table), red and yellow scores, phenotype categories
//! - **Ranges**: red and yellow scores (non-negative values only) and the
//!   five geolocation fields (unbounded)
//! - **Per-category ranges**: red and yellow ranges for each known
//!   phenotype category, fed only by samples with both scores non-negative
//!
//! Readings that are not a number never enter a range, but they are counted
//! in the frequency tables under their own key. All tables are sorted by key
//! when the report is built.

use std::collections::BTreeMap;

use serde::Serialize;
use snapzone_stats::{
    frequency::FrequencyTable,
    range::{RangeAccumulator, RangeSummary},
    reading::Reading,
};

use crate::{
    sample::Sample,
    schema::{PhenoCategory, Schema},
    table::Table,
};

/// Aggregate report over all samples of a table.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub sample_count: usize,
    /// Occurrences of each marker reading, pooled across markers.
    pub marker_values: Vec<(Reading, u64)>,
    pub red_values: Vec<(Reading, u64)>,
    pub yellow_values: Vec<(Reading, u64)>,
    /// Occurrences of each recorded category code, known or not.
    pub category_values: Vec<(String, u64)>,
    pub red_range: RangeSummary,
    pub yellow_range: RangeSummary,
    pub lat_range: RangeSummary,
    pub long_range: RangeSummary,
    pub altitude_range: RangeSummary,
    pub easting_range: RangeSummary,
    pub northing_range: RangeSummary,
    /// Red and yellow ranges per known category.
    pub per_category: BTreeMap<PhenoCategory, CategoryRanges>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryRanges {
    pub red: RangeSummary,
    pub yellow: RangeSummary,
}

impl Statistics {
    /// Computes the report in a single pass over all rows of `table`.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapzone_data::{schema::Schema, statistics::Statistics, table::Table};
    /// use snapzone_stats::reading::Reading;
    ///
    /// let table = Table::from_records(
    ///     ["PlantID_final", "phenoCat_final", "Red_final", "Yellow_final"],
    ///     [
    ///         vec!["P1".into(), "Y".into(), "0".into(), "4".into()],
    ///         vec!["P2".into(), "FR".into(), "5".into(), "-1".into()],
    ///     ],
    /// );
    /// let stats = Statistics::compute(&table, &Schema::default(), &[]);
    ///
    /// assert_eq!(stats.red_range.count, 2);
    /// assert_eq!(stats.yellow_range.count, 1);
    /// assert_eq!(stats.red_values, [(Reading::Number(0.0), 1), (Reading::Number(5.0), 1)]);
    /// ```
    #[must_use]
    pub fn compute(table: &Table, schema: &Schema, active_order: &[String]) -> Self {
        let mut aggregator = Aggregator::default();
        for row in table.rows() {
            aggregator.add(&Sample::project(row, schema, active_order));
        }
        let stats = aggregator.finish();
        log::debug!(
            "computed statistics over {} samples: {} distinct marker values, {} categories",
            stats.sample_count,
            stats.marker_values.len(),
            stats.category_values.len()
        );
        stats
    }
}

#[derive(Debug)]
struct Aggregator {
    sample_count: usize,
    marker_values: FrequencyTable<Reading>,
    red_values: FrequencyTable<Reading>,
    yellow_values: FrequencyTable<Reading>,
    category_values: FrequencyTable<String>,
    red_range: RangeAccumulator,
    yellow_range: RangeAccumulator,
    lat_range: RangeAccumulator,
    long_range: RangeAccumulator,
    altitude_range: RangeAccumulator,
    easting_range: RangeAccumulator,
    northing_range: RangeAccumulator,
    per_category: [(RangeAccumulator, RangeAccumulator); 6],
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            sample_count: 0,
            marker_values: FrequencyTable::new(),
            red_values: FrequencyTable::new(),
            yellow_values: FrequencyTable::new(),
            category_values: FrequencyTable::new(),
            red_range: RangeAccumulator::at_least(0.0),
            yellow_range: RangeAccumulator::at_least(0.0),
            lat_range: RangeAccumulator::unbounded(),
            long_range: RangeAccumulator::unbounded(),
            altitude_range: RangeAccumulator::unbounded(),
            easting_range: RangeAccumulator::unbounded(),
            northing_range: RangeAccumulator::unbounded(),
            per_category: Default::default(),
        }
    }
}

impl Aggregator {
    fn add(&mut self, sample: &Sample) {
        let color = &sample.color;
        let geo = &sample.geolocation;

        self.sample_count += 1;
        self.marker_values
            .extend(sample.markers.iter().map(|m| m.value));
        self.red_values.add(color.red);
        self.yellow_values.add(color.yellow);
        self.category_values.add(color.category.clone());

        self.red_range.add(color.red);
        self.yellow_range.add(color.yellow);
        self.lat_range.add(geo.lat);
        self.long_range.add(geo.long);
        self.altitude_range.add(geo.altitude);
        self.easting_range.add(geo.easting);
        self.northing_range.add(geo.northing);

        if let Some(category) = color.known_category()
            && color.red.is_at_least(0.0)
            && color.yellow.is_at_least(0.0)
        {
            let (red, yellow) = &mut self.per_category[category.rank()];
            red.add(color.red);
            yellow.add(color.yellow);
        }
    }

    fn finish(&self) -> Statistics {
        let per_category = PhenoCategory::ALL
            .into_iter()
            .map(|category| {
                let (red, yellow) = &self.per_category[category.rank()];
                let ranges = CategoryRanges {
                    red: red.summary(),
                    yellow: yellow.summary(),
                };
                (category, ranges)
            })
            .collect();

        Statistics {
            sample_count: self.sample_count,
            marker_values: self.marker_values.sorted(),
            red_values: self.red_values.sorted(),
            yellow_values: self.yellow_values.sorted(),
            category_values: self.category_values.sorted(),
            red_range: self.red_range.summary(),
            yellow_range: self.yellow_range.summary(),
            lat_range: self.lat_range.summary(),
            long_range: self.long_range.summary(),
            altitude_range: self.altitude_range.summary(),
            easting_range: self.easting_range.summary(),
            northing_range: self.northing_range.summary(),
            per_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [&str; 11] = [
        "PlantID_final",
        "phenoCat_final",
        "m1",
        "m2",
        "Red_final",
        "Yellow_final",
        "Latitude",
        "Longitude",
        "Altitude",
        "Easting",
        "Northing",
    ];

    fn table(records: &[[&str; 11]]) -> Table {
        Table::from_records(
            COLUMNS,
            records
                .iter()
                .map(|r| r.iter().map(|v| (*v).to_owned()).collect()),
        )
    }

    fn markers() -> Vec<String> {
        vec!["m1".to_owned(), "m2".to_owned()]
    }

    #[test]
    fn test_identical_rows_count_everywhere() {
        let records = (0..25)
            .map(|_| {
                [
                    "P", "WR", "0", "2", "1.5", "0.5", "42.3", "2.1", "1100", "431000",
                    "4690000",
                ]
            })
            .collect::<Vec<_>>();
        let stats = Statistics::compute(&table(&records), &Schema::default(), &markers());

        assert_eq!(stats.sample_count, 25);
        for range in [
            stats.red_range,
            stats.yellow_range,
            stats.lat_range,
            stats.long_range,
            stats.altitude_range,
            stats.easting_range,
            stats.northing_range,
        ] {
            assert_eq!(range.count, 25);
        }
        assert_eq!(stats.red_values.iter().map(|(_, c)| c).sum::<u64>(), 25);
        assert_eq!(
            stats.marker_values,
            [(Reading::Number(0.0), 25), (Reading::Number(2.0), 25)]
        );
        assert_eq!(stats.category_values, [("WR".to_owned(), 25)]);

        let weak_red = stats.per_category[&PhenoCategory::WeakRed];
        assert_eq!(weak_red.red.count, 25);
        assert_eq!(weak_red.yellow.avg, Some(0.5));
        assert_eq!(stats.per_category[&PhenoCategory::Yellow].red.count, 0);
        assert_eq!(stats.per_category.len(), 6);
    }

    #[test]
    fn test_negative_scores_excluded_from_ranges() {
        let stats = Statistics::compute(
            &table(&[
                ["a", "Y", "0", "0", "-1", "3", "1", "1", "1", "1", "1"],
                ["b", "Y", "0", "0", "2", "4", "1", "1", "1", "1", "1"],
                ["c", "Y", "0", "0", "6", "NA", "1", "1", "1", "1", "1"],
            ]),
            &Schema::default(),
            &markers(),
        );

        assert_eq!(stats.red_range.count, 2);
        assert_eq!(stats.red_range.min, Some(2.0));
        assert_eq!(stats.red_range.avg, Some(4.0));
        assert_eq!(stats.yellow_range.count, 2);
        // only "b" has both scores non-negative
        let yellow = stats.per_category[&PhenoCategory::Yellow];
        assert_eq!(yellow.red.count, 1);
        assert_eq!(yellow.red.max, Some(2.0));
        assert_eq!(yellow.yellow.min, Some(4.0));
        // every score is still counted in the frequency tables
        assert_eq!(stats.yellow_values.last(), Some(&(Reading::NotANumber, 1)));
        assert_eq!(stats.red_values.first(), Some(&(Reading::Number(-1.0), 1)));
    }

    #[test]
    fn test_geolocation_unbounded_and_unknown_categories() {
        let stats = Statistics::compute(
            &table(&[
                ["a", "?", "1", "x", "1", "1", "-3.5", "-70", "-10", "5", "5"],
                ["b", "", "1", "1", "1", "1", "2.5", "", "20", "5", "5"],
            ]),
            &Schema::default(),
            &markers(),
        );

        assert_eq!(stats.lat_range.min, Some(-3.5));
        assert_eq!(stats.lat_range.avg, Some(-0.5));
        assert_eq!(stats.long_range.count, 1);
        assert_eq!(stats.altitude_range.max, Some(20.0));
        assert_eq!(
            stats.category_values,
            [(String::new(), 1), ("?".to_owned(), 1)]
        );
        assert!(
            stats
                .per_category
                .values()
                .all(|r| r.red.count == 0 && r.yellow.count == 0)
        );
        assert_eq!(
            stats.marker_values,
            [(Reading::Number(1.0), 3), (Reading::NotANumber, 1)]
        );
    }

    #[test]
    fn test_empty_table() {
        let stats = Statistics::compute(&Table::new(COLUMNS), &Schema::default(), &markers());
        assert_eq!(stats.sample_count, 0);
        assert!(stats.marker_values.is_empty());
        assert_eq!(stats.red_range.avg, None);
        assert_eq!(stats.per_category.len(), 6);
    }

    #[test]
    fn test_serializes_to_json() {
        let stats = Statistics::compute(
            &table(&[["a", "W", "1", "NA", "1", "1", "1", "1", "1", "1", "1"]]),
            &Schema::default(),
            &markers(),
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["marker_values"][1][0], "NaN");
        assert_eq!(json["per_category"]["W"]["red"]["count"], 1);
        assert_eq!(json["per_category"]["Y"]["red"]["min"], serde_json::Value::Null);
    }
}
