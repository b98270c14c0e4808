use anyhow::Result;
use std::path::PathBuf;

/// Check that a dataset path carries a supported extension and exists.
pub fn validate_dataset_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("arff") | Some("csv") | Some("tsv") => {}
        _ => anyhow::bail!(
            "File must have an .arff, .csv or .tsv extension: {}",
            path
        ),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_existing_arff_csv_tsv() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.arff", "b.csv", "c.tsv"] {
            let path = dir.path().join(name);
            std::fs::File::create(&path).unwrap();
            assert!(validate_dataset_file(path.to_str().unwrap()).is_ok());
        }
    }

    #[test]
    fn rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::File::create(&path).unwrap();
        assert!(validate_dataset_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_missing_file() {
        assert!(validate_dataset_file("/nonexistent/data.arff").is_err());
    }
}
