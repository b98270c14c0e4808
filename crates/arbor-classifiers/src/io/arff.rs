//! Reader for the ARFF attribute-relation file format.
//!
//! Supports the subset the pipeline's indexing stage emits: `%` comments,
//! `@relation`, `@attribute <name> numeric|real|integer|{v1, v2, ...}` and a
//! comma-separated `@data` section. Directives are case-insensitive.
//! `string`/`date` attributes and `?` missing values are rejected; no
//! imputation or coercion happens beyond what the header declares.
use std::fs;
use std::path::Path;

use crate::dataset::{Attribute, AttributeKind, Dataset};
use crate::error::ArborError;

pub fn read_arff(path: &Path, class_index: Option<usize>) -> Result<Dataset, ArborError> {
    let text = fs::read_to_string(path).map_err(|e| {
        ArborError::DataFormat(format!("failed to read {}: {}", path.display(), e))
    })?;

    let mut relation = String::new();
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut in_data = false;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if !in_data {
            let lower = line.to_lowercase();
            if let Some(rest) = strip_directive(line, &lower, "@relation") {
                relation = rest.to_string();
            } else if let Some(rest) = strip_directive(line, &lower, "@attribute") {
                attributes.push(parse_attribute(rest, lineno + 1)?);
            } else if lower == "@data" {
                if attributes.is_empty() {
                    return Err(ArborError::DataFormat(
                        "@data section before any @attribute declaration".to_string(),
                    ));
                }
                in_data = true;
            } else {
                return Err(ArborError::DataFormat(format!(
                    "line {}: unrecognized header line: {}",
                    lineno + 1,
                    line
                )));
            }
            continue;
        }

        rows.push(parse_row(line, &attributes, lineno + 1)?);
    }

    if !in_data {
        return Err(ArborError::DataFormat(
            "missing @data section".to_string(),
        ));
    }

    Dataset::new(&relation, attributes, rows, class_index)
}

fn strip_directive<'a>(line: &'a str, lower: &str, directive: &str) -> Option<&'a str> {
    if lower.starts_with(directive) {
        let rest = line[directive.len()..].trim();
        (!rest.is_empty()).then_some(rest)
    } else {
        None
    }
}

fn parse_attribute(decl: &str, lineno: usize) -> Result<Attribute, ArborError> {
    let (name, kind_decl) = decl.split_once(char::is_whitespace).ok_or_else(|| {
        ArborError::DataFormat(format!(
            "line {}: attribute declaration needs a name and a type: {}",
            lineno, decl
        ))
    })?;
    let kind_decl = kind_decl.trim();

    let kind = if kind_decl.starts_with('{') && kind_decl.ends_with('}') {
        let values: Vec<String> = kind_decl[1..kind_decl.len() - 1]
            .split(',')
            .map(|v| v.trim().to_string())
            .collect();
        if values.iter().any(|v| v.is_empty()) {
            return Err(ArborError::DataFormat(format!(
                "line {}: nominal attribute '{}' declares an empty value",
                lineno, name
            )));
        }
        AttributeKind::Nominal(values)
    } else {
        match kind_decl.to_lowercase().as_str() {
            "numeric" | "real" | "integer" => AttributeKind::Numeric,
            other => {
                return Err(ArborError::DataFormat(format!(
                    "line {}: unsupported attribute type '{}' for '{}'",
                    lineno, other, name
                )))
            }
        }
    };

    Ok(Attribute {
        name: name.to_string(),
        kind,
    })
}

fn parse_row(line: &str, attributes: &[Attribute], lineno: usize) -> Result<Vec<f64>, ArborError> {
    let cells: Vec<&str> = line.split(',').map(|c| c.trim()).collect();
    if cells.len() != attributes.len() {
        return Err(ArborError::DataFormat(format!(
            "line {}: expected {} values, found {}",
            lineno,
            attributes.len(),
            cells.len()
        )));
    }

    let mut row = Vec::with_capacity(cells.len());
    for (cell, attribute) in cells.iter().zip(attributes) {
        if *cell == "?" {
            return Err(ArborError::DataFormat(format!(
                "line {}: missing value for attribute '{}' is not supported",
                lineno, attribute.name
            )));
        }
        let value = match &attribute.kind {
            AttributeKind::Numeric => cell.parse::<f64>().map_err(|_| {
                ArborError::DataFormat(format!(
                    "line {}: '{}' is not numeric for attribute '{}'",
                    lineno, cell, attribute.name
                ))
            })?,
            AttributeKind::Nominal(values) => values
                .iter()
                .position(|v| v == cell)
                .ok_or_else(|| {
                    ArborError::DataFormat(format!(
                        "line {}: '{}' is not a declared value of attribute '{}'",
                        lineno, cell, attribute.name
                    ))
                })? as f64,
        };
        row.push(value);
    }
    Ok(row)
}
