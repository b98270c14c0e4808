use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use crate::learn::util::validate_dataset_file;

/// One training invocation: fit a classifier on a labeled dataset and
/// serialize the fitted model.
#[derive(Debug, Clone, Serialize)]
pub struct TrainJob {
    pub train_data: PathBuf,
    pub model_output: PathBuf,
    /// Classifier name; `None` selects the fixed default.
    pub classifier: Option<String>,
    /// Whitespace-tokenized option string for the classifier.
    pub options: Option<String>,
}

impl TrainJob {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let train_data: &PathBuf = matches.get_one("train_data").unwrap();
        validate_dataset_file(&train_data.to_string_lossy())?;

        Ok(TrainJob {
            train_data: train_data.clone(),
            model_output: matches.get_one::<PathBuf>("model_output").unwrap().clone(),
            classifier: matches.get_one::<String>("classifier").cloned(),
            options: matches.get_one::<String>("options").cloned(),
        })
    }
}

/// One evaluation invocation: restore a fitted model, predict every row of a
/// test dataset, and write the encoded prediction blocks.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateJob {
    pub model: PathBuf,
    pub test_data: PathBuf,
    pub output: PathBuf,
}

impl EvaluateJob {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let test_data: &PathBuf = matches.get_one("test_data").unwrap();
        validate_dataset_file(&test_data.to_string_lossy())?;

        Ok(EvaluateJob {
            model: matches.get_one::<PathBuf>("model").unwrap().clone(),
            test_data: test_data.clone(),
            output: matches.get_one::<PathBuf>("output").unwrap().clone(),
        })
    }
}
