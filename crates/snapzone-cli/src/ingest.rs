//! CSV ingestion for the survey table.

use std::{fs::File, io, path::Path};

use snapzone_data::table::{Table, TableLoader};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum IngestError {
    #[display("failed to open file")]
    Open { source: io::Error },
    #[display("failed to read CSV")]
    Csv { source: csv::Error },
    #[display("missing header row")]
    MissingHeader,
}

/// Reads a header row plus records into a [`Table`].
///
/// Records may have fewer or more fields than the header. Fields are kept
/// verbatim; numeric parsing happens later, on projection.
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn builder(self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter);
        builder
    }

    pub fn read<R>(self, reader: R) -> Result<Table, IngestError>
    where
        R: io::Read,
    {
        read_table(self.builder().from_reader(reader))
    }
}

impl TableLoader for CsvLoader {
    type Error = IngestError;

    fn load(&self, path: &Path) -> Result<Table, Self::Error> {
        let file = File::open(path).map_err(|source| IngestError::Open { source })?;
        self.read(io::BufReader::new(file))
    }
}

fn read_table<R>(mut reader: csv::Reader<R>) -> Result<Table, IngestError>
where
    R: io::Read,
{
    let header = reader
        .headers()
        .map_err(|source| IngestError::Csv { source })?;
    if header.is_empty() {
        return Err(IngestError::MissingHeader);
    }
    let mut table = Table::new(header.iter());

    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv { source })?;
        table.push_record(record.iter().map(str::to_owned).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use snapzone_data::{dataset::Dataset, schema::Schema};

    use super::*;

    const SURVEY: &str = "\
PlantID_final,phenoCat_final,Red_final,Yellow_final
P1,Y,0.0,3.5
P2,\"FR\",2.5,NA
P3,W
";

    #[test]
    fn test_reads_header_and_records() {
        let table = CsvLoader::new().read(SURVEY.as_bytes()).unwrap();
        assert_eq!(
            table.columns(),
            ["PlantID_final", "phenoCat_final", "Red_final", "Yellow_final"]
        );
        assert_eq!(table.len(), 3);

        let p2 = table.row(1).unwrap();
        assert_eq!(p2.get("phenoCat_final"), Some("FR"));
        assert_eq!(p2.get("Yellow_final"), Some("NA"));

        // short records are kept, missing fields read as absent
        let p3 = table.row(2).unwrap();
        assert_eq!(p3.get("Red_final"), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let table = CsvLoader::new()
            .with_delimiter(b';')
            .read("a;b\n1;2\n".as_bytes())
            .unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.row(0).unwrap().get("b"), Some("2"));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = CsvLoader::new().read(&b""[..]).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader));
    }

    #[test]
    fn test_missing_file() {
        let mut dataset = Dataset::new(Schema::default());
        let err = dataset
            .load(&CsvLoader::new(), Path::new("/nonexistent/survey.csv"))
            .unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
        assert!(!dataset.is_loaded());
    }

    #[test]
    fn test_feeds_dataset() {
        let mut dataset = Dataset::new(Schema::default());
        dataset.set_table(CsvLoader::new().read(SURVEY.as_bytes()).unwrap());
        let stats = dataset.statistics().unwrap();
        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.red_range.count, 2);
        assert_eq!(stats.yellow_range.max, Some(3.5));
    }
}
