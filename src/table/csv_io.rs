//! CSV readers and writers for every tabular artifact.
//!
//! Indexed tables use the pandas layout: the first header cell is empty and
//! the first column holds the index label. Absent integers are empty cells.

use super::schema::{
    Gas, GasMeasurement, GasSeries, GasTable, MaxGasEntry, MaxGasTable, PeriodBucket, Transfer,
};
use crate::utils::config::{COL_GAS_MINT, COL_GAS_VERIFY, COL_MAX_GAS_MINT, COL_MAX_GAS_VERIFY};
use crate::utils::error::TableError;
use csv::StringRecord;
use log::{debug, info, warn};
use std::path::Path;

/// Read one named gas column of a raw (non-indexed) measurement file,
/// in row order
pub fn read_raw_gas(path: impl AsRef<Path>, column: &str) -> Result<Vec<Option<Gas>>, TableError> {
    let path = path.as_ref();
    debug!("Reading raw '{}' column from: {}", column, path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let position = column_position(reader.headers()?, column)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        values.push(parse_gas_cell(&record, position, column)?);
    }

    debug!("Read {} raw rows", values.len());
    Ok(values)
}

/// Read a merged or complete gas table
pub fn read_gas_table(path: impl AsRef<Path>) -> Result<GasTable, TableError> {
    let path = path.as_ref();
    debug!("Reading gas table from: {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mint_pos = column_position(&headers, COL_GAS_MINT)?;
    let verify_pos = column_position(&headers, COL_GAS_VERIFY)?;

    let mut table = GasTable::new();
    for record in reader.records() {
        let record = record?;
        let n = parse_index_cell(&record)?;
        let row = GasMeasurement::new(
            parse_gas_cell(&record, mint_pos, COL_GAS_MINT)?,
            parse_gas_cell(&record, verify_pos, COL_GAS_VERIFY)?,
        );
        table.insert(n, row);
    }

    debug!("Gas table loaded: {} rows", table.len());
    Ok(table)
}

/// Write a merged or complete gas table
pub fn write_gas_table(table: &GasTable, path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    info!("Writing gas table to: {}", path.display());
    prepare_output_path(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", COL_GAS_MINT, COL_GAS_VERIFY])?;
    for (n, row) in table.iter() {
        writer.write_record([n.to_string(), format_gas(row.gas_mint), format_gas(row.gas_verify)])?;
    }
    writer.flush()?;

    info!("Gas table written successfully ({} bytes)", calculate_file_size(path));
    Ok(())
}

/// Read one gas column of an indexed table as a sparse series.
///
/// Rows whose cell is empty are skipped.
pub fn read_gas_series(path: impl AsRef<Path>, column: &str) -> Result<GasSeries, TableError> {
    let path = path.as_ref();
    debug!("Reading '{}' series from: {}", column, path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let position = column_position(reader.headers()?, column)?;

    let mut series = GasSeries::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let index = parse_index_cell(&record)?;
        match parse_gas_cell(&record, position, column)? {
            Some(gas) => series.insert(index, gas),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} empty '{}' cells in {}", skipped, column, path.display());
    }

    Ok(series)
}

/// Read the max-gas table
pub fn read_max_gas_table(path: impl AsRef<Path>) -> Result<MaxGasTable, TableError> {
    let path = path.as_ref();
    debug!("Reading max gas table from: {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mint_pos = column_position(&headers, COL_MAX_GAS_MINT)?;
    let verify_pos = column_position(&headers, COL_MAX_GAS_VERIFY)?;

    let mut table = MaxGasTable::default();
    for record in reader.records() {
        let record = record?;
        let index = parse_index_cell(&record)?;
        table.insert(
            index,
            MaxGasEntry {
                max_gas_mint: parse_gas_cell(&record, mint_pos, COL_MAX_GAS_MINT)?,
                max_gas_verify: parse_gas_cell(&record, verify_pos, COL_MAX_GAS_VERIFY)?,
            },
        );
    }

    Ok(table)
}

/// Write the max-gas table
pub fn write_max_gas_table(table: &MaxGasTable, path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    info!("Writing max gas table to: {}", path.display());
    prepare_output_path(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", COL_MAX_GAS_MINT, COL_MAX_GAS_VERIFY])?;
    for (index, entry) in table.iter() {
        writer.write_record([
            index.to_string(),
            format_gas(entry.max_gas_mint),
            format_gas(entry.max_gas_verify),
        ])?;
    }
    writer.flush()?;

    info!("Max gas table written successfully ({} bytes)", calculate_file_size(path));
    Ok(())
}

/// Read a transfer log (`fromId`, `toId`, `timestamp`; extra columns ignored)
pub fn read_transfers(path: impl AsRef<Path>) -> Result<Vec<Transfer>, TableError> {
    let path = path.as_ref();
    debug!("Reading transfers from: {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let transfers = reader
        .deserialize()
        .collect::<Result<Vec<Transfer>, csv::Error>>()?;

    debug!("Read {} transfers", transfers.len());
    Ok(transfers)
}

/// Read a collection-gas table
pub fn read_period_buckets(path: impl AsRef<Path>) -> Result<Vec<PeriodBucket>, TableError> {
    let path = path.as_ref();
    debug!("Reading collection gas from: {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let buckets = reader
        .deserialize()
        .collect::<Result<Vec<PeriodBucket>, csv::Error>>()?;

    Ok(buckets)
}

/// Write a collection-gas table
pub fn write_period_buckets(buckets: &[PeriodBucket], path: impl AsRef<Path>) -> Result<(), TableError> {
    let path = path.as_ref();
    info!("Writing collection gas to: {}", path.display());
    prepare_output_path(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for bucket in buckets {
        writer.serialize(bucket)?;
    }
    writer.flush()?;

    info!("Collection gas written successfully ({} periods, {} bytes)",
          buckets.len(),
          calculate_file_size(path));
    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - shared by every writer and by commands for early checks
pub fn validate_path(path: &Path) -> Result<(), TableError> {
    if path.as_os_str().is_empty() {
        return Err(TableError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(TableError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(ext) = path.extension() {
        if ext != "csv" {
            debug!("Warning: File does not have .csv extension: {}", path.display());
        }
    }

    Ok(())
}

/// Validate the path and create missing parent directories
fn prepare_output_path(path: &Path) -> Result<(), TableError> {
    validate_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                TableError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn column_position(headers: &StringRecord, column: &str) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| TableError::MissingColumn(column.to_string()))
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn parse_index_cell(record: &StringRecord) -> Result<u64, TableError> {
    let raw = record.get(0).unwrap_or("").trim();
    raw.parse::<u64>().map_err(|_| TableError::InvalidCell {
        column: "index".to_string(),
        value: raw.to_string(),
        line: record_line(record),
    })
}

/// Parse a nullable integer cell. Integral floats (`123.0`) are accepted
/// because pandas writes them for columns that held NaN.
fn parse_gas_cell(record: &StringRecord, position: usize, column: &str) -> Result<Option<Gas>, TableError> {
    let raw = record.get(position).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(gas) = raw.parse::<Gas>() {
        return Ok(Some(gas));
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(Some(value as Gas)),
        Ok(value) if value.is_nan() => Ok(None),
        _ => Err(TableError::InvalidCell {
            column: column.to_string(),
            value: raw.to_string(),
            line: record_line(record),
        }),
    }
}

fn format_gas(gas: Option<Gas>) -> String {
    gas.map(|g| g.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_gas_table_uses_pandas_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("gas.csv");

        let table: GasTable = [
            (1, GasMeasurement::new(Some(100), Some(7))),
            (2, GasMeasurement::new(Some(120), None)),
        ]
        .into_iter()
        .collect();

        write_gas_table(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, ",gas_mint,gas_verify\n1,100,7\n2,120,\n");
        assert_eq!(read_gas_table(&path).unwrap(), table);
    }

    #[test]
    fn test_raw_gas_accepts_float_cells_and_extra_columns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("raw_verify.csv");
        fs::write(&path, "n,gas_verify\n1,3100.0\n2,\n3,3300\n").unwrap();

        let values = read_raw_gas(&path, COL_GAS_VERIFY).unwrap();
        assert_eq!(values, vec![Some(3100), None, Some(3300)]);
    }

    #[test]
    fn test_missing_column() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("raw_mint.csv");
        fs::write(&path, "gas\n1\n").unwrap();

        let result = read_raw_gas(&path, COL_GAS_MINT);
        assert!(matches!(result, Err(TableError::MissingColumn(c)) if c == "gas_mint"));
    }

    #[test]
    fn test_invalid_cell() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("gas.csv");
        fs::write(&path, ",gas_mint,gas_verify\n1,abc,\n").unwrap();

        assert!(matches!(read_gas_table(&path), Err(TableError::InvalidCell { .. })));
    }

    #[test]
    fn test_gas_series_skips_empty_cells() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("max_verify.csv");
        fs::write(&path, ",gas_verify\n1,50\n2,\n3,70\n").unwrap();

        let series = read_gas_series(&path, COL_GAS_VERIFY).unwrap();
        assert_eq!(series.keys().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(series.get(3), Some(70));
    }

    #[test]
    fn test_transfers_ignore_extra_columns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("transfers.csv");
        fs::write(&path, "txHash,fromId,toId,timestamp\n0xaa,0,5,1600000000\n0xbb,5,6,1600000100\n").unwrap();

        let transfers = read_transfers(&path).unwrap();
        assert_eq!(
            transfers,
            vec![Transfer::new(0, 5, 1_600_000_000), Transfer::new(5, 6, 1_600_000_100)]
        );
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/collection_gas.csv");

        write_period_buckets(&[PeriodBucket::default()], &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
