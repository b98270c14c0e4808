//! Dataset readers. The file extension selects the reader: `.arff` for the
//! attribute-relation format, `.csv`/`.tsv` for delimited tables.
pub mod arff;
pub mod delimited;

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::ArborError;

/// Read a dataset, assigning the last attribute as the class column when the
/// caller does not designate one.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, ArborError> {
    load_dataset_with_class_index(path, None)
}

/// Read a dataset with an explicit class column override.
pub fn load_dataset_with_class_index<P: AsRef<Path>>(
    path: P,
    class_index: Option<usize>,
) -> Result<Dataset, ArborError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match extension.as_deref() {
        Some("arff") => arff::read_arff(path, class_index),
        Some("csv") => delimited::read_delimited(path, b',', class_index),
        Some("tsv") => delimited::read_delimited(path, b'\t', class_index),
        _ => Err(ArborError::DataFormat(format!(
            "unsupported dataset extension (expected .arff, .csv or .tsv): {}",
            path.display()
        ))),
    }
}
