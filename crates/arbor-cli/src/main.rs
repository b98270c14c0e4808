use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use arbor_cli::learn::evaluate;
use arbor_cli::learn::input::{EvaluateJob, TrainJob};
use arbor_cli::learn::train;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("ARBOR_LOG", "error,arbor=info"))
        .init();

    let matches = Command::new("arbor")
        .version(clap::crate_version!())
        .about("Train a classifier on labeled tabular data and emit scorer-ready predictions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Fit a classifier on a labeled dataset and serialize the model")
                .arg(
                    Arg::new("train_data")
                        .help("Path to the training dataset (.arff, .csv or .tsv)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("model_output")
                        .short('o')
                        .long("model-output")
                        .help("File path the fitted model will be written to")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("classifier")
                        .short('c')
                        .long("classifier")
                        .help(
                            "Classifier to train (decision_tree, naive_bayes). \
                             Defaults to a pruned decision tree.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("options")
                        .long("options")
                        .help(
                            "Option string for the classifier, e.g. \"-C 0.25 -M 2\". \
                             Ignored when no classifier is named.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("test")
                .about("Predict every row of a test dataset with a serialized model")
                .arg(
                    Arg::new("model")
                        .help("Path to the serialized model produced by `train`")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("test_data")
                        .help("Path to the test dataset (.arff, .csv or .tsv)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Path the encoded prediction blocks will be written to")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("test", sub_m)) => handle_test(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let job = TrainJob::from_arguments(matches)?;
    log::info!("[arbor::train] {:?} -> {:?}", job.train_data, job.model_output);
    log::debug!(
        "[arbor::train] job: {}",
        serde_json::to_string_pretty(&job).unwrap_or_default()
    );

    match train::run_training(&job) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_test(matches: &ArgMatches) -> Result<()> {
    let job = EvaluateJob::from_arguments(matches)?;
    log::info!("[arbor::test] {:?} on {:?}", job.model, job.test_data);
    log::debug!(
        "[arbor::test] job: {}",
        serde_json::to_string_pretty(&job).unwrap_or_default()
    );

    match evaluate::run_evaluation(&job) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
