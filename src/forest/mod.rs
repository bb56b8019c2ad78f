//! Random forest classifier.
//!
//! A bagged ensemble of [`DecisionTree`]s. Every tree is grown on a bootstrap
//! sample of the training rows and examines `sqrt(n_features)` randomly drawn
//! features per split. Prediction averages the per-tree class probabilities
//! and takes the most probable class; ties go to the lower class index.
//!
//! Training is fully determined by [`ForestParams::seed`].

pub mod tree;

use crate::features::{FeatureVector, Label};
use ndarray::ArrayView2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub use tree::{DecisionTree, Node, TreeParams};

/// The prediction capability of a fitted model.
pub trait Classifier {
    /// Predict the label of a single feature row.
    fn predict_row(&self, row: &[f64]) -> Label;

    fn predict(&self, features: &FeatureVector) -> Label {
        self.predict_row(features.as_slice())
    }

    /// Predict every row of a feature matrix.
    fn predict_rows(&self, x: ArrayView2<f64>) -> Vec<Label> {
        x.outer_iter()
            .map(|row| self.predict_row(&row.to_vec()))
            .collect()
    }
}

/// Random forest hyperparameters.
#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Candidate features per split; `None` means `sqrt(n_features)`
    pub max_features: Option<usize>,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit a forest on every row of `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` and `y` have different numbers of rows.
    pub fn fit(x: ArrayView2<f64>, y: &[Label], params: &ForestParams) -> Self {
        debug_assert_eq!(x.nrows(), y.len(), "features and labels must have same length");

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let max_features = params
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt() as usize)
            .clamp(1, n_features.max(1));
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split.max(2),
            min_samples_leaf: params.min_samples_leaf.max(1),
            max_features,
        };

        let mut seeder = ChaCha8Rng::seed_from_u64(params.seed);
        let trees = (0..params.n_trees.max(1))
            .map(|_| {
                let mut rng = ChaCha8Rng::seed_from_u64(seeder.gen());
                let indices: Vec<usize> = if params.bootstrap && n_samples > 0 {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                DecisionTree::fit(x, y, indices, tree_params, &mut rng)
            })
            .collect();

        RandomForest { n_features, trees }
    }

    /// Mean class probabilities across all trees.
    pub fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let p = tree.predict_proba(row);
            sum[0] += p[0];
            sum[1] += p[1];
        }
        let n = self.trees.len().max(1) as f64;
        [sum[0] / n, sum[1] / n]
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Structural check used when loading a persisted forest.
    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty() && self.trees.iter().all(|t| t.is_well_formed(self.n_features))
    }
}

impl Classifier for RandomForest {
    fn predict_row(&self, row: &[f64]) -> Label {
        let proba = self.predict_proba(row);
        if proba[1] > proba[0] {
            Label::Extrovert
        } else {
            Label::Introvert
        }
    }
}
