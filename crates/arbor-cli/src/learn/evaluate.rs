use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

use arbor_classifiers::error::ArborError;
use arbor_classifiers::io::load_dataset;
use arbor_classifiers::models::classifier_trait::Classifier;
use arbor_classifiers::store::load_model;

use crate::learn::input::EvaluateJob;
use crate::learn::output::write_prediction_block;

/// Restore a fitted model, predict every test row in input order, and write
/// one encoded block per row into a freshly-created output file.
///
/// Fail-fast: the first row whose prediction fails aborts the whole run so
/// that row indices never silently desynchronize against the external
/// scorer. A failed run can leave a partially-written output file; cleaning
/// that up is the caller's responsibility.
pub fn run_evaluation(job: &EvaluateJob) -> Result<()> {
    let model = load_model(&job.model)?;
    log::info!("Restored {} classifier from {:?}", model.kind(), job.model);

    let data = load_dataset(&job.test_data)
        .with_context(|| format!("failed to load test data {:?}", job.test_data))?;
    // The class column of the test file is ignored for prediction; its
    // declared value count sizes the output blocks.
    let number_of_classes = data.num_classes().ok_or_else(|| {
        ArborError::Evaluation(format!(
            "class attribute '{}' of the test data must be nominal",
            data.class_attribute().name
        ))
    })?;
    log::info!(
        "Evaluating {} rows with {} classes from {:?}",
        data.num_rows(),
        number_of_classes,
        job.test_data
    );

    let file = File::create(&job.output)
        .with_context(|| format!("failed to create output file {:?}", job.output))?;
    let mut writer = BufWriter::new(file);

    for i in 0..data.num_rows() {
        let predicted = model.predict(&data.features(i))?;
        write_prediction_block(&mut writer, number_of_classes, predicted)?;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} prediction blocks to {:?}",
        data.num_rows(),
        job.output
    );
    Ok(())
}
