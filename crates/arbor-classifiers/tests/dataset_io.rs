//! Integration tests for the dataset model and the ARFF/CSV readers.

use std::io::Write;

use arbor_classifiers::dataset::AttributeKind;
use arbor_classifiers::error::ArborError;
use arbor_classifiers::io::{load_dataset, load_dataset_with_class_index};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

const SMALL_ARFF: &str = "\
% generated by the indexing stage
@RELATION wsd

@ATTRIBUTE f1 NUMERIC
@ATTRIBUTE f2 NUMERIC
@ATTRIBUTE class {1, 2, 3}

@DATA
0.5, 1.25, 1
2.0, -3.0, 2
4.5, 0.0, 3
1.0, 1.0, 1
";

// ---------------------------------------------------------------------------
// ARFF reader
// ---------------------------------------------------------------------------

#[test]
fn arff_assigns_last_column_as_class_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "train.arff", SMALL_ARFF);

    let data = load_dataset(&path).unwrap();
    assert_eq!(data.relation(), "wsd");
    assert_eq!(data.class_index(), 2);
    assert_eq!(data.num_classes(), Some(3));
    assert_eq!(data.num_features(), 2);
}

#[test]
fn arff_preserves_row_and_attribute_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "train.arff", SMALL_ARFF);

    let data = load_dataset(&path).unwrap();
    let names: Vec<&str> = data.attributes().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["f1", "f2", "class"]);

    assert_eq!(data.num_rows(), 4);
    assert_eq!(data.row(0), &[0.5, 1.25, 0.0]);
    assert_eq!(data.row(1), &[2.0, -3.0, 1.0]);
    assert_eq!(data.row(2), &[4.5, 0.0, 2.0]);
    assert_eq!(data.class_of(3), 0);
    assert_eq!(data.features(1), vec![2.0, -3.0]);
}

#[test]
fn arff_explicit_class_index_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "train.arff", SMALL_ARFF);

    let data = load_dataset_with_class_index(&path, Some(0)).unwrap();
    assert_eq!(data.class_index(), 0);
    // f1 is numeric, so it cannot serve as a classification target.
    assert_eq!(data.num_classes(), None);
}

#[test]
fn arff_rejects_wrong_column_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.arff",
        "@relation r\n@attribute f1 numeric\n@attribute class {a, b}\n@data\n1.0\n",
    );
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

#[test]
fn arff_rejects_undeclared_nominal_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.arff",
        "@relation r\n@attribute f1 numeric\n@attribute class {a, b}\n@data\n1.0, c\n",
    );
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

#[test]
fn arff_rejects_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.arff",
        "@relation r\n@attribute f1 numeric\n@attribute class {a, b}\n@data\n?, a\n",
    );
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

#[test]
fn arff_rejects_file_without_data_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.arff", "@relation r\n@attribute f1 numeric\n");
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

#[test]
fn arff_rejects_unsupported_attribute_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "bad.arff",
        "@relation r\n@attribute note string\n@data\nhello\n",
    );
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

// ---------------------------------------------------------------------------
// Delimited reader
// ---------------------------------------------------------------------------

#[test]
fn csv_infers_numeric_and_nominal_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "train.csv",
        "f1,f2,label\n0.5,1.0,yes\n1.5,2.0,no\n2.5,3.0,yes\n",
    );

    let data = load_dataset(&path).unwrap();
    assert_eq!(data.class_index(), 2);
    assert_eq!(data.attributes()[0].kind, AttributeKind::Numeric);
    assert_eq!(data.attributes()[1].kind, AttributeKind::Numeric);
    match &data.attributes()[2].kind {
        AttributeKind::Nominal(values) => assert_eq!(values, &["yes", "no"]),
        other => panic!("expected nominal label column, got {:?}", other),
    }
    // Nominal values are encoded in first-appearance order.
    assert_eq!(data.class_of(0), 0);
    assert_eq!(data.class_of(1), 1);
    assert_eq!(data.class_of(2), 0);
}

#[test]
fn tsv_uses_tab_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "train.tsv", "f1\tlabel\n1.0\ta\n2.0\tb\n");

    let data = load_dataset(&path).unwrap();
    assert_eq!(data.num_rows(), 2);
    assert_eq!(data.num_classes(), Some(2));
}

#[test]
fn unsupported_extension_is_a_data_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "train.txt", "whatever");
    assert!(matches!(
        load_dataset(&path),
        Err(ArborError::DataFormat(_))
    ));
}

#[test]
fn unreadable_file_is_a_data_format_error() {
    assert!(matches!(
        load_dataset("/nonexistent/path/train.arff"),
        Err(ArborError::DataFormat(_))
    ));
}
