use std::io::Read;
use std::path::Path;

use crate::error::{RakottError, Result};

/// Reads a column of f64 values from a CSV file by column name, skipping invalid/missing values.
pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>> {
    let rdr = csv::Reader::from_path(path)?;
    read_named_column(rdr, column)
}

/// Reads a column of f64 values from a CSV file by column index, skipping invalid/missing values.
pub fn read_csv_column_by_index<P: AsRef<Path>>(path: P, col_index: usize) -> Result<Vec<f64>> {
    let rdr = csv::Reader::from_path(path)?;
    read_indexed_column(rdr, col_index)
}

/// Same as [`read_csv_column`] for any reader holding CSV data with a header row.
pub fn read_column_from_reader<R: Read>(reader: R, column: &str) -> Result<Vec<f64>> {
    read_named_column(csv::Reader::from_reader(reader), column)
}

fn read_named_column<R: Read>(mut rdr: csv::Reader<R>, column: &str) -> Result<Vec<f64>> {
    let col_index = rdr
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| RakottError::UnknownColumn(column.to_string()))?;
    read_indexed_column(rdr, col_index)
}

fn read_indexed_column<R: Read>(mut rdr: csv::Reader<R>, col_index: usize) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(val) = record.get(col_index).and_then(|f| f.trim().parse::<f64>().ok()) {
            values.push(val);
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "t,signal,label\n0,1.5,a\n1,,b\n2,2.5,c\n3,oops,d\n4, 4.0 ,e\n";

    #[test]
    fn test_reads_named_column_skipping_bad_fields() {
        let values = read_column_from_reader(DATA.as_bytes(), "signal").unwrap();
        assert_eq!(values, vec![1.5, 2.5, 4.0]);
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            read_column_from_reader(DATA.as_bytes(), "missing"),
            Err(RakottError::UnknownColumn(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_reads_by_index() {
        let rdr = csv::Reader::from_reader(DATA.as_bytes());
        let values = read_indexed_column(rdr, 0).unwrap();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_csv_column_by_index("/nonexistent/rakott.csv", 0),
            Err(RakottError::Csv(_))
        ));
    }
}
