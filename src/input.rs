//! Loading piece lists from two-column CSV files or JSON job documents.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CutError, Result};
use crate::types::{CutJob, integral_u32};

pub const DEFAULT_LENGTH_COLUMN: &str = "Length";
pub const DEFAULT_DEMAND_COLUMN: &str = "Quantity";

/// Names of the CSV columns holding the lengths and the quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub length: String,
    pub demand: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH_COLUMN.to_string(),
            demand: DEFAULT_DEMAND_COLUMN.to_string(),
        }
    }
}

impl Columns {
    pub fn new(length: impl Into<String>, demand: impl Into<String>) -> Self {
        Self {
            length: length.into(),
            demand: demand.into(),
        }
    }
}

/// Parallel length and demand lists read from a table.
///
/// `demand` is `None` when the table has no demand column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTable {
    pub piece_lengths: Vec<u32>,
    pub demand: Option<Vec<u32>>,
}

impl PieceTable {
    pub fn into_job(self, raw_length: u32) -> CutJob {
        CutJob::new(raw_length, self.piece_lengths, self.demand)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(CutError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

pub fn read_csv<R: Read>(reader: R, columns: &Columns) -> Result<PieceTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let length_idx = headers
        .iter()
        .position(|h| h == columns.length)
        .ok_or_else(|| CutError::MissingColumn {
            column: columns.length.clone(),
        })?;
    let demand_idx = headers.iter().position(|h| h == columns.demand);
    if demand_idx.is_none() {
        tracing::warn!(column = %columns.demand, "demand column not found");
    }

    let mut piece_lengths = Vec::new();
    let mut demand = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        piece_lengths.push(parse_cell(&record, length_idx, row, &columns.length)?);
        if let Some(idx) = demand_idx {
            demand.push(parse_cell(&record, idx, row, &columns.demand)?);
        }
    }

    tracing::debug!(rows = piece_lengths.len(), "read piece table");
    Ok(PieceTable {
        piece_lengths,
        demand: demand_idx.map(|_| demand),
    })
}

fn parse_cell(record: &csv::StringRecord, idx: usize, row: usize, column: &str) -> Result<u32> {
    let value = record.get(idx).unwrap_or_default();
    value
        .parse::<f64>()
        .ok()
        .and_then(integral_u32)
        .ok_or_else(|| CutError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

pub fn read_json<R: Read>(reader: R) -> Result<CutJob> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_csv(path: &Path, columns: &Columns) -> Result<PieceTable> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file), columns)
}

pub fn load_json(path: &Path) -> Result<CutJob> {
    let file = File::open(path)?;
    read_json(BufReader::new(file))
}

/// Loads a job from `path`.
///
/// CSV tables carry no stock length, so `raw_length` must be given for them.
/// For JSON documents a given `raw_length` replaces the one in the file.
pub fn load_job(path: &Path, raw_length: Option<u32>, columns: &Columns) -> Result<CutJob> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => {
            let raw_length = raw_length.ok_or(CutError::InvalidRawLength)?;
            Ok(load_csv(path, columns)?.into_job(raw_length))
        }
        InputFormat::Json => {
            let job = load_json(path)?;
            Ok(match raw_length {
                Some(r) => job.with_raw_length(r),
                None => job,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_read_csv_default_columns() {
        let data = "Length,Quantity\n2800,1\n1050,3\n";
        let table = read_csv(data.as_bytes(), &Columns::default()).unwrap();
        assert_eq!(table.piece_lengths, vec![2800, 1050]);
        assert_eq!(table.demand, Some(vec![1, 3]));
    }

    #[test]
    fn test_read_csv_custom_columns_and_order() {
        let data = "Ref,Unidades,Longitud\nA, 2 ,3580.0\nB,1,700\n";
        let table = read_csv(data.as_bytes(), &Columns::new("Longitud", "Unidades")).unwrap();
        assert_eq!(table.piece_lengths, vec![3580, 700]);
        assert_eq!(table.demand, Some(vec![2, 1]));
    }

    #[test]
    fn test_read_csv_without_demand_column() {
        let data = "Length\n400\n300\n";
        let table = read_csv(data.as_bytes(), &Columns::default()).unwrap();
        assert_eq!(table.piece_lengths, vec![400, 300]);
        assert_eq!(table.demand, None);
    }

    #[test]
    fn test_read_csv_missing_length_column() {
        let data = "Size,Quantity\n400,1\n";
        let err = read_csv(data.as_bytes(), &Columns::default()).unwrap_err();
        assert!(matches!(err, CutError::MissingColumn { column } if column == "Length"));
    }

    #[test]
    fn test_read_csv_invalid_value_reports_row() {
        let data = "Length,Quantity\n400,1\n300,two\n";
        let err = read_csv(data.as_bytes(), &Columns::default()).unwrap_err();
        match err {
            CutError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Quantity");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_csv_rejects_fractional_length() {
        let data = "Length,Quantity\n400.5,1\n";
        let err = read_csv(data.as_bytes(), &Columns::default()).unwrap_err();
        assert!(matches!(err, CutError::InvalidValue { row: 1, .. }));
    }

    #[test]
    fn test_read_json_job() {
        let data = r#"{"raw_length": 10, "piece_lengths": [6, 5, 4, 3]}"#;
        let job = read_json(data.as_bytes()).unwrap();
        assert_eq!(job, CutJob::new(10, vec![6, 5, 4, 3], None));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("cuts.CSV")).unwrap(),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Path::new("job.json")).unwrap(),
            InputFormat::Json
        );
        assert!(InputFormat::from_path(Path::new("cuts.xlsx")).is_err());
    }

    #[test]
    fn test_load_job_csv_requires_raw_length() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Length,Quantity\n5,2").unwrap();

        let err = load_job(file.path(), None, &Columns::default()).unwrap_err();
        assert!(matches!(err, CutError::InvalidRawLength));

        let job = load_job(file.path(), Some(10), &Columns::default()).unwrap();
        assert_eq!(job, CutJob::new(10, vec![5], Some(vec![2])));
    }

    #[test]
    fn test_load_job_json_raw_length_override() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"raw_length": 10, "piece_lengths": [4], "demand": [3]}}"#).unwrap();

        let job = load_job(file.path(), None, &Columns::default()).unwrap();
        assert_eq!(job.raw_length, 10);
        let job = load_job(file.path(), Some(12), &Columns::default()).unwrap();
        assert_eq!(job.raw_length, 12);
    }
}
