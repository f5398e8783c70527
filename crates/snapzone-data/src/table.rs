//! In-memory sample table handed over by the ingestion layer.
//!
//! The core never parses files itself. An ingestion collaborator (the CLI
//! reads CSV) implements [`TableLoader`] and produces a [`Table`]: ordered
//! column names plus ordered rows of raw string fields.
//!
//! Every [`Row`] shares the table's [`Header`], so fields can be read both by
//! column name and by physical column position.
//!
//! ```
//! use snapzone_data::table::Table;
//!
//! let table = Table::from_records(
//!     ["PlantID_final", "Red_final"],
//!     [vec!["P1".into(), "0.4".into()], vec!["P2".into()]],
//! );
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows()[0].get("Red_final"), Some("0.4"));
//! assert_eq!(table.rows()[0].get_index(0), Some("P1"));
//! // short records have missing fields
//! assert_eq!(table.rows()[1].get("Red_final"), None);
//! ```

use std::{collections::HashMap, path::Path, sync::Arc};

/// Ordered column names with a name lookup.
///
/// When a name occurs more than once, lookups resolve to the first column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Self { names, positions }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One table row: raw field values in physical column order.
#[derive(Debug, Clone)]
pub struct Row {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Row {
    /// Field value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.get_index(self.header.position(column)?)
    }

    /// Field value by physical column position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A rectangular table of named columns and ordered rows.
///
/// The column set is fixed once built; the row order is not, see
/// [`sort_rows`](crate::sort::sort_rows).
#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Arc<Header>,
    rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = columns.into_iter().map(Into::into).collect();
        Self {
            header: Arc::new(Header::new(names)),
            rows: vec![],
        }
    }

    #[must_use]
    pub fn from_records<I, S, R>(columns: I, records: R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let mut table = Self::new(columns);
        for record in records {
            table.push_record(record);
        }
        table
    }

    /// Appends a row. Records may be shorter or longer than the header.
    pub fn push_record(&mut self, values: Vec<String>) {
        self.rows.push(Row {
            header: Arc::clone(&self.header),
            values,
        });
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        self.header.names()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the row sequence, for in-place reordering.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Source of tables, implemented by the ingestion layer.
pub trait TableLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, path: &Path) -> Result<Table, Self::Error>;
}
