//! In-place reordering of the table rows.

use std::{convert::Infallible, fmt, str::FromStr};

use snapzone_stats::reading::Reading;

use crate::{
    ordering::{selector_index, selector_name},
    schema::{PhenoCategory, Schema},
    table::{Row, Table},
};

/// Row sort order for [`sort_rows`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Plant identifier, lexicographic.
    #[default]
    Id,
    /// First survey year the plant was recorded alive.
    Time,
    /// Raw easting field, lexicographic.
    Location,
    /// Phenotype category in canonical category order.
    Color,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Id, Self::Time, Self::Location, Self::Color];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Time => "time",
            Self::Location => "location",
            Self::Color => "color",
        }
    }

    /// Selects a key by position; out-of-range indices wrap around.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        selector_index(&Self::ALL, index)
    }

    /// Selects a key by name or numeric index; anything else selects
    /// [`SortKey::Id`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        selector_name(&Self::ALL, name, Self::name)
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reorders the rows of `table` by `key`.
///
/// The sort is unstable. Rows without a usable key sort last for
/// [`SortKey::Time`] and [`SortKey::Color`]; for the text keys a missing
/// field sorts first.
///
/// [`SortKey::Location`] compares the raw easting text, not its numeric
/// value, so eastings of different digit counts do not sort numerically.
///
/// # Examples
///
/// ```
/// use snapzone_data::{schema::Schema, sort::{SortKey, sort_rows}, table::Table};
///
/// let mut table = Table::from_records(
///     ["PlantID_final", "phenoCat_final"],
///     [
///         vec!["P2".into(), "W".into()],
///         vec!["P1".into(), "Y".into()],
///         vec!["P3".into(), "??".into()],
///     ],
/// );
/// sort_rows(&mut table, &Schema::default(), SortKey::Color);
/// let ids = table.rows().iter().map(|r| r.get("PlantID_final").unwrap()).collect::<Vec<_>>();
/// assert_eq!(ids, ["P1", "P2", "P3"]);
/// ```
pub fn sort_rows(table: &mut Table, schema: &Schema, key: SortKey) {
    match key {
        SortKey::Id => sort_by_text(table, &schema.id_column),
        SortKey::Location => sort_by_text(table, &schema.geolocation.easting),
        SortKey::Color => {
            let column = &schema.category_column;
            table
                .rows_mut()
                .sort_unstable_by_key(|row| category_rank(row, column));
        }
        SortKey::Time => {
            let alive_positions = schema
                .years
                .iter()
                .map(|&year| {
                    let column = schema.alive_column(year);
                    let position = table.header().position(&column);
                    if position.is_none() {
                        log::warn!("survival column {column} not found");
                    }
                    position
                })
                .collect::<Vec<_>>();
            table
                .rows_mut()
                .sort_unstable_by_key(|row| first_alive_index(row, &alive_positions));
        }
    }
    log::debug!("sorted {} rows by {key}", table.len());
}

fn sort_by_text(table: &mut Table, column: &str) {
    table
        .rows_mut()
        .sort_unstable_by(|a, b| a.get(column).cmp(&b.get(column)));
}

/// Unknown categories rank after the six known ones.
fn category_rank(row: &Row, column: &str) -> usize {
    row.get(column)
        .and_then(PhenoCategory::from_code)
        .map_or(PhenoCategory::ALL.len(), PhenoCategory::rank)
}

/// Index of the first survey year flagged alive; rows never flagged alive
/// rank after every year.
fn first_alive_index(row: &Row, alive_positions: &[Option<usize>]) -> usize {
    alive_positions
        .iter()
        .position(|position| {
            position
                .and_then(|p| row.get_index(p))
                .is_some_and(|raw| Reading::parse(raw).is_exactly(1.0))
        })
        .unwrap_or(alive_positions.len())
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const COLUMNS: [&str; 6] = [
        "PlantID_final",
        "phenoCat_final",
        "Easting",
        "AliveRec_2009",
        "AliveRec_2010",
        "AliveRec_2011",
    ];

    fn schema() -> Schema {
        Schema {
            years: vec![2009, 2010, 2011],
            ..Schema::default()
        }
    }

    fn table(records: &[[&str; 6]]) -> Table {
        Table::from_records(
            COLUMNS,
            records
                .iter()
                .map(|r| r.iter().map(|v| (*v).to_owned()).collect()),
        )
    }

    fn ids(table: &Table) -> Vec<&str> {
        table
            .rows()
            .iter()
            .map(|r| r.get("PlantID_final").unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sort_by_id() {
        let mut t = table(&[
            ["c", "Y", "1", "0", "0", "0"],
            ["a", "Y", "1", "0", "0", "0"],
            ["b", "Y", "1", "0", "0", "0"],
        ]);
        sort_rows(&mut t, &schema(), SortKey::Id);
        assert_eq!(ids(&t), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_time_first_year_before_last_year() {
        let mut t = table(&[
            ["never", "Y", "0", "0", "0", "0"],
            ["last", "Y", "0", "0", "0", "1"],
            ["first", "Y", "0", "1", "0", "0"],
            ["middle", "Y", "0", "0", "1", "1"],
        ]);
        sort_rows(&mut t, &schema(), SortKey::Time);
        assert_eq!(ids(&t), ["first", "middle", "last", "never"]);
    }

    #[test]
    fn test_sort_by_color_unknown_last() {
        let mut t = table(&[
            ["w", "W", "0", "0", "0", "0"],
            ["unknown", "X", "0", "0", "0", "0"],
            ["fr", "FR", "0", "0", "0", "0"],
            ["y", "Y", "0", "0", "0", "0"],
            ["wo", "WO", "0", "0", "0", "0"],
        ]);
        sort_rows(&mut t, &schema(), SortKey::Color);
        assert_eq!(ids(&t), ["y", "fr", "wo", "w", "unknown"]);
    }

    #[test]
    fn test_sort_by_location_is_textual() {
        let mut t = table(&[
            ["a", "Y", "9", "0", "0", "0"],
            ["b", "Y", "10", "0", "0", "0"],
            ["c", "Y", "100", "0", "0", "0"],
        ]);
        sort_rows(&mut t, &schema(), SortKey::Location);
        assert_eq!(ids(&t), ["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_a_permutation() {
        let mut records = (0..50)
            .map(|i| {
                let id = format!("p{i:02}");
                let cat = PhenoCategory::ALL[i % 6].code().to_owned();
                [id, cat, format!("{}", 400 + i % 7), "0".into(), "1".into(), "0".into()]
            })
            .collect::<Vec<_>>();
        let mut rng = Pcg64Mcg::new(42);
        records.shuffle(&mut rng);
        let mut t = Table::from_records(COLUMNS, records.iter().map(|r| r.to_vec()));

        for key in SortKey::ALL {
            sort_rows(&mut t, &schema(), key);
            let mut seen = ids(&t);
            seen.sort_unstable();
            let expected = (0..50).map(|i| format!("p{i:02}")).collect::<Vec<_>>();
            assert_eq!(seen, expected, "{key}");
        }
    }

    #[test]
    fn test_missing_survival_columns_sort_last() {
        let mut t = Table::from_records(
            ["PlantID_final"],
            [vec!["b".to_owned()], vec!["a".to_owned()]],
        );
        sort_rows(&mut t, &schema(), SortKey::Time);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_key_selectors() {
        assert_eq!(SortKey::from_name("location"), SortKey::Location);
        assert_eq!(SortKey::from_name(""), SortKey::Id);
        assert_eq!(SortKey::from_name("weight"), SortKey::Id);
        assert_eq!(SortKey::from_name("5"), SortKey::Time);
        assert_eq!(SortKey::from_index(3), SortKey::Color);
        assert_eq!(SortKey::from_index(-4), SortKey::Id);
    }
}
