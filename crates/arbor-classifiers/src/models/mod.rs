pub mod decision_tree;
pub mod naive_bayes;

pub mod classifier_trait;
pub mod factory;
