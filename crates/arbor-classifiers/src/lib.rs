//! arbor-classifiers: supervised classification building blocks for the
//! arbor command-line pipeline.
//!
//! This crate provides the tabular dataset model and its ARFF/CSV readers,
//! classifier configuration and name-based resolution, the classifier
//! implementations themselves (decision tree, naive bayes), and opaque
//! serialization of fitted models.
//!
//! The design favors small, testable modules: every failure is surfaced as
//! a typed [`error::ArborError`] and propagated, never recovered internally.
pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod models;
pub mod store;
