//! In-memory tabular dataset model.
//!
//! A [`Dataset`] is an ordered sequence of fixed-length rows over typed
//! attributes, with one attribute designated as the class. It is constructed
//! once by a loader (see [`crate::io`]) or programmatically, and is immutable
//! afterward.
use serde::{Deserialize, Serialize};

use crate::error::ArborError;

/// Declared type of one attribute column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    Numeric,
    /// Finite set of known values; cell values are stored as the 0-based
    /// index into this list, in declaration order.
    Nominal(Vec<String>),
}

/// One named, typed column of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn numeric(name: &str) -> Self {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Numeric,
        }
    }

    pub fn nominal(name: &str, values: &[&str]) -> Self {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Nominal(values.iter().map(|v| v.to_string()).collect()),
        }
    }
}

/// Compact per-feature shape descriptor carried inside fitted models.
/// Nominal features record their arity (number of declared values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    Numeric,
    Nominal(usize),
}

/// Ordered rows of encoded attribute values with one designated class column.
///
/// Nominal values are encoded as their declaration-order index; consistency
/// of that ordering between train and test data is the caller's obligation.
#[derive(Debug, Clone)]
pub struct Dataset {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: usize,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    /// Build a dataset from already-encoded rows.
    ///
    /// When `class_index` is `None` the last attribute is the class — a
    /// structural default, not a heuristic. Rows must all have exactly one
    /// value per attribute, and nominal cells must be integral indices into
    /// the attribute's declared value list.
    pub fn new(
        relation: &str,
        attributes: Vec<Attribute>,
        rows: Vec<Vec<f64>>,
        class_index: Option<usize>,
    ) -> Result<Self, ArborError> {
        if attributes.is_empty() {
            return Err(ArborError::DataFormat(
                "dataset declares no attributes".to_string(),
            ));
        }
        let class_index = class_index.unwrap_or(attributes.len() - 1);
        if class_index >= attributes.len() {
            return Err(ArborError::DataFormat(format!(
                "class index {} out of range for {} attributes",
                class_index,
                attributes.len()
            )));
        }
        for (r, row) in rows.iter().enumerate() {
            if row.len() != attributes.len() {
                return Err(ArborError::DataFormat(format!(
                    "row {} has {} values, expected {}",
                    r + 1,
                    row.len(),
                    attributes.len()
                )));
            }
            for (c, attribute) in attributes.iter().enumerate() {
                if let AttributeKind::Nominal(values) = &attribute.kind {
                    let v = row[c];
                    if v.fract() != 0.0 || v < 0.0 || (v as usize) >= values.len() {
                        return Err(ArborError::DataFormat(format!(
                            "row {} column '{}': {} is not a valid nominal index",
                            r + 1,
                            attribute.name,
                            v
                        )));
                    }
                }
            }
        }
        Ok(Dataset {
            relation: relation.to_string(),
            attributes,
            class_index,
            rows,
        })
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> &Attribute {
        &self.attributes[self.class_index]
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Number of feature columns (all attributes except the class).
    pub fn num_features(&self) -> usize {
        self.attributes.len() - 1
    }

    /// Number of declared class values, or `None` when the class attribute
    /// is numeric (unusable for classification).
    pub fn num_classes(&self) -> Option<usize> {
        match &self.attributes[self.class_index].kind {
            AttributeKind::Nominal(values) => Some(values.len()),
            AttributeKind::Numeric => None,
        }
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// Feature values of one row, in attribute order, class column excluded.
    pub fn features(&self, index: usize) -> Vec<f64> {
        self.rows[index]
            .iter()
            .enumerate()
            .filter_map(|(c, &v)| (c != self.class_index).then_some(v))
            .collect()
    }

    /// Class value index of one row. Only meaningful for a nominal class.
    pub fn class_of(&self, index: usize) -> usize {
        self.rows[index][self.class_index] as usize
    }

    /// Shape descriptors for the feature columns, class column excluded.
    pub fn feature_kinds(&self) -> Vec<FeatureKind> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(c, _)| *c != self.class_index)
            .map(|(_, attribute)| match &attribute.kind {
                AttributeKind::Numeric => FeatureKind::Numeric,
                AttributeKind::Nominal(values) => FeatureKind::Nominal(values.len()),
            })
            .collect()
    }

    /// Split the dataset into feature rows and class indices for fitting.
    ///
    /// Fails with a training error when the dataset is degenerate: empty, or
    /// its class attribute is numeric.
    pub fn supervised(&self) -> Result<(Vec<Vec<f64>>, Vec<usize>), ArborError> {
        if self.rows.is_empty() {
            return Err(ArborError::Training(
                "dataset contains no rows".to_string(),
            ));
        }
        if self.num_classes().is_none() {
            return Err(ArborError::Training(format!(
                "class attribute '{}' must be nominal",
                self.class_attribute().name
            )));
        }
        let x: Vec<Vec<f64>> = (0..self.num_rows()).map(|i| self.features(i)).collect();
        let y: Vec<usize> = (0..self.num_rows()).map(|i| self.class_of(i)).collect();
        Ok((x, y))
    }
}
