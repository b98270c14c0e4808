//! C4.5-style decision tree learner, the pipeline's default classifier.
//!
//! Top-down induction by information gain with binary midpoint splits on
//! numeric features and multiway splits on nominal features, a minimum
//! instance count per leaf, and pessimistic subtree-replacement pruning
//! controlled by a confidence factor.
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::{DEFAULT_CONFIDENCE_FACTOR, DEFAULT_MIN_LEAF};
use crate::dataset::{Dataset, FeatureKind};
use crate::error::ArborError;
use crate::models::classifier_trait::Classifier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    confidence_factor: f32,
    min_leaf: usize,
    pruned: bool,
    feature_kinds: Vec<FeatureKind>,
    n_classes: usize,
    root: Option<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    majority: usize,
    population: f64,
    misclassified: f64,
    split: Option<Split>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Split {
    Numeric {
        feature: usize,
        threshold: f64,
        below: Box<Node>,
        above: Box<Node>,
    },
    Nominal {
        feature: usize,
        branches: Vec<Node>,
    },
}

impl DecisionTreeClassifier {
    pub const KIND: &'static str = "decision_tree";

    pub fn new(confidence_factor: f32, min_leaf: usize, pruned: bool) -> Self {
        DecisionTreeClassifier {
            confidence_factor,
            min_leaf,
            pruned,
            feature_kinds: Vec::new(),
            n_classes: 0,
            root: None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, count_leaves)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_FACTOR, DEFAULT_MIN_LEAF, true)
    }
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, data: &Dataset) -> Result<(), ArborError> {
        let (x, y) = data.supervised()?;
        let n_classes = data.num_classes().ok_or_else(|| {
            ArborError::Training("class attribute must be nominal".to_string())
        })?;
        let kinds = data.feature_kinds();
        let min_leaf = self.min_leaf.max(1);

        let indices: Vec<usize> = (0..x.len()).collect();
        let mut root = build(&x, &y, indices, n_classes, min_leaf, &kinds);
        if self.pruned {
            let before = count_leaves(&root);
            prune(&mut root, upper_z(self.confidence_factor));
            log::debug!(
                "decision tree pruned from {} to {} leaves",
                before,
                count_leaves(&root)
            );
        } else {
            log::debug!("decision tree grown with {} leaves", count_leaves(&root));
        }

        self.feature_kinds = kinds;
        self.n_classes = n_classes;
        self.root = Some(root);
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<usize, ArborError> {
        let root = self.root.as_ref().ok_or_else(|| {
            ArborError::Evaluation("decision tree has not been fit".to_string())
        })?;
        if features.len() != self.feature_kinds.len() {
            return Err(ArborError::Evaluation(format!(
                "row has {} features but the model was fit with {}",
                features.len(),
                self.feature_kinds.len()
            )));
        }

        let mut node = root;
        loop {
            match &node.split {
                None => return Ok(node.majority),
                Some(Split::Numeric {
                    feature,
                    threshold,
                    below,
                    above,
                }) => {
                    node = if features[*feature] <= *threshold {
                        below
                    } else {
                        above
                    };
                }
                Some(Split::Nominal { feature, branches }) => {
                    let value = features[*feature];
                    let branch = if value.is_finite() && value >= 0.0 {
                        branches.get(value as usize)
                    } else {
                        None
                    };
                    match branch {
                        Some(child) => node = child,
                        // Unseen nominal index: fall back to the node majority.
                        None => return Ok(node.majority),
                    }
                }
            }
        }
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn export(&self) -> Result<serde_json::Value, ArborError> {
        serde_json::to_value(self).map_err(|e| ArborError::Io(e.to_string()))
    }
}

fn class_counts(y: &[usize], indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[y[i]] += 1;
    }
    counts
}

fn majority_of(counts: &[usize]) -> (usize, usize) {
    counts
        .iter()
        .copied()
        .enumerate()
        .max_by_key(|&(_, count)| count)
        .unwrap_or((0, 0))
}

fn entropy(counts: &[usize], total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

enum CandidateSplit {
    Numeric {
        feature: usize,
        threshold: f64,
        below: Vec<usize>,
        above: Vec<usize>,
    },
    Nominal {
        feature: usize,
        groups: Vec<Vec<usize>>,
    },
}

fn build(
    x: &[Vec<f64>],
    y: &[usize],
    indices: Vec<usize>,
    n_classes: usize,
    min_leaf: usize,
    kinds: &[FeatureKind],
) -> Node {
    let counts = class_counts(y, &indices, n_classes);
    let (majority, majority_count) = majority_of(&counts);
    let population = indices.len() as f64;
    let misclassified = population - majority_count as f64;
    let mut node = Node {
        majority,
        population,
        misclassified,
        split: None,
    };

    if misclassified == 0.0 || indices.len() < 2 * min_leaf {
        return node;
    }

    let parent_entropy = entropy(&counts, population);
    if let Some(candidate) = best_split(x, y, &indices, n_classes, min_leaf, kinds, parent_entropy)
    {
        node.split = Some(match candidate {
            CandidateSplit::Numeric {
                feature,
                threshold,
                below,
                above,
            } => Split::Numeric {
                feature,
                threshold,
                below: Box::new(build(x, y, below, n_classes, min_leaf, kinds)),
                above: Box::new(build(x, y, above, n_classes, min_leaf, kinds)),
            },
            CandidateSplit::Nominal { feature, groups } => Split::Nominal {
                feature,
                branches: groups
                    .into_iter()
                    .map(|group| {
                        if group.is_empty() {
                            // Empty branch: inherit the parent majority.
                            Node {
                                majority,
                                population: 0.0,
                                misclassified: 0.0,
                                split: None,
                            }
                        } else {
                            build(x, y, group, n_classes, min_leaf, kinds)
                        }
                    })
                    .collect(),
            },
        });
    }
    node
}

fn best_split(
    x: &[Vec<f64>],
    y: &[usize],
    indices: &[usize],
    n_classes: usize,
    min_leaf: usize,
    kinds: &[FeatureKind],
    parent_entropy: f64,
) -> Option<CandidateSplit> {
    let total = indices.len() as f64;
    let mut best: Option<(f64, CandidateSplit)> = None;

    for (feature, kind) in kinds.iter().enumerate() {
        let candidate = match kind {
            FeatureKind::Numeric => {
                numeric_split(x, y, indices, feature, n_classes, min_leaf, parent_entropy)
            }
            FeatureKind::Nominal(arity) => nominal_split(
                x,
                y,
                indices,
                feature,
                *arity,
                n_classes,
                min_leaf,
                parent_entropy,
                total,
            ),
        };
        if let Some((gain, split)) = candidate {
            if best.as_ref().map_or(true, |(best_gain, _)| gain > *best_gain) {
                best = Some((gain, split));
            }
        }
    }

    best.and_then(|(gain, split)| (gain > 1e-10).then_some(split))
}

fn numeric_split(
    x: &[Vec<f64>],
    y: &[usize],
    indices: &[usize],
    feature: usize,
    n_classes: usize,
    min_leaf: usize,
    parent_entropy: f64,
) -> Option<(f64, CandidateSplit)> {
    let mut ordered: Vec<usize> = indices.to_vec();
    ordered.sort_by(|&a, &b| {
        x[a][feature]
            .partial_cmp(&x[b][feature])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total = ordered.len();
    let total_counts = class_counts(y, &ordered, n_classes);
    let mut left_counts = vec![0usize; n_classes];
    let mut best: Option<(f64, usize)> = None; // (gain, split point)

    for i in 1..total {
        left_counts[y[ordered[i - 1]]] += 1;
        if x[ordered[i]][feature] <= x[ordered[i - 1]][feature] {
            continue;
        }
        if i < min_leaf || total - i < min_leaf {
            continue;
        }
        let right_counts: Vec<usize> = total_counts
            .iter()
            .zip(&left_counts)
            .map(|(&t, &l)| t - l)
            .collect();
        let left_total = i as f64;
        let right_total = (total - i) as f64;
        let gain = parent_entropy
            - left_total / total as f64 * entropy(&left_counts, left_total)
            - right_total / total as f64 * entropy(&right_counts, right_total);
        if best.map_or(true, |(best_gain, _)| gain > best_gain) {
            best = Some((gain, i));
        }
    }

    best.map(|(gain, at)| {
        let threshold = (x[ordered[at - 1]][feature] + x[ordered[at]][feature]) / 2.0;
        let (below, above) = ordered.split_at(at);
        (
            gain,
            CandidateSplit::Numeric {
                feature,
                threshold,
                below: below.to_vec(),
                above: above.to_vec(),
            },
        )
    })
}

#[allow(clippy::too_many_arguments)]
fn nominal_split(
    x: &[Vec<f64>],
    y: &[usize],
    indices: &[usize],
    feature: usize,
    arity: usize,
    n_classes: usize,
    min_leaf: usize,
    parent_entropy: f64,
    total: f64,
) -> Option<(f64, CandidateSplit)> {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); arity];
    for &i in indices {
        let value = x[i][feature];
        if value.is_finite() && value >= 0.0 && (value as usize) < arity {
            groups[value as usize].push(i);
        } else {
            return None;
        }
    }

    // Require at least two usable branches.
    if groups.iter().filter(|g| g.len() >= min_leaf).count() < 2 {
        return None;
    }

    let children_entropy: f64 = groups
        .iter()
        .map(|group| {
            let counts = class_counts(y, group, n_classes);
            group.len() as f64 / total * entropy(&counts, group.len() as f64)
        })
        .sum();

    Some((
        parent_entropy - children_entropy,
        CandidateSplit::Nominal { feature, groups },
    ))
}

/// z-quantile of the standard normal for the pruning confidence level.
fn upper_z(confidence_factor: f32) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(1.0 - confidence_factor as f64))
        .unwrap_or(0.674_489_75)
}

/// Pessimistic (upper confidence bound) error count for a leaf covering
/// `n` instances of which `e` are misclassified.
fn pessimistic_errors(n: f64, e: f64, z: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }
    let f = e / n;
    let z2 = z * z;
    let spread = (f / n - f * f / n + z2 / (4.0 * n * n)).max(0.0).sqrt();
    n * ((f + z2 / (2.0 * n) + z * spread) / (1.0 + z2 / n))
}

fn subtree_errors(node: &Node, z: f64) -> f64 {
    match &node.split {
        None => pessimistic_errors(node.population, node.misclassified, z),
        Some(Split::Numeric { below, above, .. }) => {
            subtree_errors(below, z) + subtree_errors(above, z)
        }
        Some(Split::Nominal { branches, .. }) => {
            branches.iter().map(|b| subtree_errors(b, z)).sum()
        }
    }
}

/// Bottom-up subtree replacement: collapse a split whenever the pessimistic
/// error of a single leaf is no worse than the sum over its subtree.
fn prune(node: &mut Node, z: f64) {
    match node.split.as_mut() {
        None => return,
        Some(Split::Numeric { below, above, .. }) => {
            prune(below, z);
            prune(above, z);
        }
        Some(Split::Nominal { branches, .. }) => {
            for branch in branches.iter_mut() {
                prune(branch, z);
            }
        }
    }
    let as_subtree = subtree_errors(node, z);
    let as_leaf = pessimistic_errors(node.population, node.misclassified, z);
    if as_leaf <= as_subtree + 0.1 {
        node.split = None;
    }
}

fn count_leaves(node: &Node) -> usize {
    match &node.split {
        None => 1,
        Some(Split::Numeric { below, above, .. }) => count_leaves(below) + count_leaves(above),
        Some(Split::Nominal { branches, .. }) => branches.iter().map(count_leaves).sum(),
    }
}
