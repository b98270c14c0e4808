//! Reader for headered CSV/TSV tables.
//!
//! The header row names the attributes. Column types are inferred from the
//! cells: a column whose every value parses as a number is numeric, any
//! other column is nominal with values in first-appearance order.
use std::path::Path;

use crate::dataset::{Attribute, AttributeKind, Dataset};
use crate::error::ArborError;

pub fn read_delimited(
    path: &Path,
    delimiter: u8,
    class_index: Option<usize>,
) -> Result<Dataset, ArborError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            ArborError::DataFormat(format!("failed to read {}: {}", path.display(), e))
        })?;

    let names: Vec<String> = reader
        .headers()
        .map_err(|e| ArborError::DataFormat(format!("{}: bad header: {}", path.display(), e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if names.is_empty() {
        return Err(ArborError::DataFormat(format!(
            "{}: header row declares no columns",
            path.display()
        )));
    }

    let mut records: Vec<Vec<String>> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            ArborError::DataFormat(format!("{}: record {}: {}", path.display(), i + 1, e))
        })?;
        if record.len() != names.len() {
            return Err(ArborError::DataFormat(format!(
                "{}: record {}: expected {} fields, found {}",
                path.display(),
                i + 1,
                names.len(),
                record.len()
            )));
        }
        records.push(record.iter().map(|c| c.to_string()).collect());
    }

    // Infer a type per column, then encode cells.
    let mut attributes = Vec::with_capacity(names.len());
    for (c, name) in names.iter().enumerate() {
        let numeric = records.iter().all(|r| r[c].parse::<f64>().is_ok());
        let kind = if numeric && !records.is_empty() {
            AttributeKind::Numeric
        } else {
            let mut values: Vec<String> = Vec::new();
            for record in &records {
                if !values.contains(&record[c]) {
                    values.push(record[c].clone());
                }
            }
            AttributeKind::Nominal(values)
        };
        attributes.push(Attribute {
            name: name.clone(),
            kind,
        });
    }

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let mut row = Vec::with_capacity(record.len());
        for (cell, attribute) in record.iter().zip(&attributes) {
            let value = match &attribute.kind {
                AttributeKind::Numeric => cell.parse::<f64>().map_err(|_| {
                    ArborError::DataFormat(format!(
                        "'{}' is not numeric for column '{}'",
                        cell, attribute.name
                    ))
                })?,
                // Values were collected from these same records, so the
                // lookup cannot miss.
                AttributeKind::Nominal(values) => {
                    values.iter().position(|v| v == cell).unwrap_or(0) as f64
                }
            };
            row.push(value);
        }
        rows.push(row);
    }

    let relation = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    Dataset::new(relation, attributes, rows, class_index)
}
