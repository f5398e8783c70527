use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use snapzone_data::{dataset::Dataset, schema::Schema};

use crate::{
    command::{DatasetArg, LoadArg},
    ingest::CsvLoader,
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a column schema override from a JSON file
///
/// Fields missing from the file keep their default values.
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_schema_file<P>(path: P) -> anyhow::Result<Schema>
where
    P: AsRef<Path>,
{
    read_json_file("schema", path)
}

/// Build a dataset from the command line options and load its CSV table
///
/// # Errors
///
/// Returns error if the schema file or the CSV table cannot be read
pub fn open_dataset(arg: &DatasetArg) -> anyhow::Result<Dataset> {
    load_dataset(&arg.csv, &arg.load)
}

/// Load the CSV table at `csv` with the given schema and delimiter options
///
/// # Errors
///
/// Returns error if the schema file or the CSV table cannot be read
pub fn load_dataset(csv: &Path, arg: &LoadArg) -> anyhow::Result<Dataset> {
    let schema = match &arg.schema {
        Some(path) => read_schema_file(path)?,
        None => Schema::default(),
    };
    let delimiter = u8::try_from(arg.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be an ASCII character: {:?}", arg.delimiter))?;
    let loader = CsvLoader::new().with_delimiter(delimiter);

    let mut dataset = Dataset::new(schema);
    dataset
        .load(&loader, csv)
        .with_context(|| format!("Failed to load survey table: {}", csv.display()))?;

    Ok(dataset)
}
