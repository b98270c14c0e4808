use anyhow::{Context, Result};

use arbor_classifiers::config::ClassifierConfig;
use arbor_classifiers::io::load_dataset;
use arbor_classifiers::models::classifier_trait::Classifier;
use arbor_classifiers::models::factory;
use arbor_classifiers::store::save_model;

use crate::learn::input::TrainJob;

/// Fit a classifier on the full training dataset and persist it.
///
/// The model file is written only after a successful fit, so a failed run
/// leaves no partial model artifact behind.
pub fn run_training(job: &TrainJob) -> Result<()> {
    let data = load_dataset(&job.train_data)
        .with_context(|| format!("failed to load training data {:?}", job.train_data))?;
    log::info!(
        "Loaded {} training rows with {} attributes from {:?}",
        data.num_rows(),
        data.num_attributes(),
        job.train_data
    );

    let config = ClassifierConfig::resolve(
        job.classifier.as_deref().unwrap_or(""),
        job.options.as_deref().unwrap_or(""),
    )?;
    let mut model = factory::build_model(&config);
    log::info!("Fitting {} classifier", model.kind());

    let start_time = std::time::Instant::now();
    model.fit(&data)?;
    log::info!("Training completed in {:?}", start_time.elapsed());

    save_model(model.as_ref(), &job.model_output)?;
    log::info!("Model saved to {:?}", job.model_output);
    Ok(())
}
