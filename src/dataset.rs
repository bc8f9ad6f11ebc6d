use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};
use crate::medicine::{MedicineRecord, REQUIRED_COLUMNS};

/// The full medicine table, loaded once at startup and never mutated
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    origin: PathBuf,
    records: Vec<MedicineRecord>,
}

/// Load the dataset from a CSV file on disk
///
/// # Arguments
/// * `path` - Path to a CSV file whose header names at least
///   `Medicine, Price, Dosage, Quantity, Category`
///
/// # Returns
/// * `Result<Dataset>` - The loaded rows in file order
///
/// # Errors
/// * `DashboardError::Io` if the file is missing or unreadable
/// * `DashboardError::Schema` if any required column is absent
/// * `DashboardError::Parse` if a row holds a value of the wrong type
///
/// # Examples
/// ```no_run
/// use medicine_dashboard::dataset::load_dataset;
///
/// match load_dataset("medicine_data.csv") {
///     Ok(data) => println!("Loaded {} medicines", data.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Dataset::from_reader(file, path)
}

impl Dataset {
    /// Parse CSV content from any reader
    ///
    /// `origin` is only used to label errors and log lines.
    pub fn from_reader<R: Read>(reader: R, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(|e| read_error(&origin, e))?;
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::Schema {
                path: origin,
                missing,
            });
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<MedicineRecord>() {
            let record = row.map_err(|e| read_error(&origin, e))?;
            records.push(record);
        }

        log::debug!("parsed {} records from {}", records.len(), origin.display());
        Ok(Dataset { origin, records })
    }

    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<MedicineRecord>) -> Self {
        Dataset {
            origin: PathBuf::from("<memory>"),
            records,
        }
    }

    pub fn records(&self) -> &[MedicineRecord] {
        &self.records
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest and highest price in the table, `None` when it has no rows
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        price_bounds(&self.records)
    }

    /// Category names in the order they first appear
    pub fn distinct_categories(&self) -> Vec<String> {
        distinct_categories(&self.records)
    }
}

/// Lowest and highest price over a slice of records
pub fn price_bounds(records: &[MedicineRecord]) -> Option<(f64, f64)> {
    records.iter().fold(None, |bounds, record| match bounds {
        None => Some((record.price, record.price)),
        Some((min, max)) => Some((min.min(record.price), max.max(record.price))),
    })
}

/// Distinct categories over a sequence of records, first-seen order
pub fn distinct_categories<'a>(
    records: impl IntoIterator<Item = &'a MedicineRecord>,
) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.iter().any(|c| c == &record.category) {
            seen.push(record.category.clone());
        }
    }
    seen
}

fn read_error(origin: &Path, source: csv::Error) -> DashboardError {
    let path = origin.to_path_buf();
    if !source.is_io_error() {
        let line = source.position().map(|p| p.line()).unwrap_or(0);
        return DashboardError::Parse { path, line, source };
    }
    match source.into_kind() {
        csv::ErrorKind::Io(source) => DashboardError::Io { path, source },
        other => DashboardError::Io {
            path,
            source: std::io::Error::other(format!("{other:?}")),
        },
    }
}
