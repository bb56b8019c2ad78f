//! CART decision tree with Gini impurity.
//!
//! Trees are stored as a flat node vector; node 0 is the root. Split nodes
//! send a sample left when `value <= threshold`.

use crate::features::Label;
use ndarray::ArrayView2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const NUM_CLASSES: usize = 2;

/// A node in a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Internal split node
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Leaf node holding class probabilities
    Leaf { proba: [f64; NUM_CLASSES] },
}

impl Node {
    fn leaf(counts: [usize; NUM_CLASSES]) -> Self {
        let total: usize = counts.iter().sum();
        let proba = if total > 0 {
            [
                counts[0] as f64 / total as f64,
                counts[1] as f64 / total as f64,
            ]
        } else {
            [0.0; NUM_CLASSES]
        };
        Node::Leaf { proba }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Candidate features examined per split
    pub max_features: usize,
}

/// Best split found for a node.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Training inputs shared by every recursive call.
struct GrowContext<'a> {
    x: ArrayView2<'a, f64>,
    y: &'a [Label],
    params: TreeParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x` listed in `indices`.
    ///
    /// `indices` may contain duplicates (bootstrap samples); each occurrence
    /// counts as one sample.
    pub fn fit<R: Rng>(
        x: ArrayView2<f64>,
        y: &[Label],
        indices: Vec<usize>,
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let ctx = GrowContext {
            x: x.view(),
            y,
            params,
        };
        let mut tree = DecisionTree { nodes: Vec::new() };
        tree.grow(&ctx, indices, 0, rng);
        tree
    }

    fn grow<R: Rng>(
        &mut self,
        ctx: &GrowContext,
        indices: Vec<usize>,
        depth: usize,
        rng: &mut R,
    ) -> usize {
        let counts = class_counts(ctx.y, &indices);
        let id = self.nodes.len();

        let depth_reached = ctx.params.max_depth.is_some_and(|max| depth >= max);
        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth_reached || indices.len() < ctx.params.min_samples_split {
            self.nodes.push(Node::leaf(counts));
            return id;
        }

        let split = match best_split(ctx, &indices, &counts, rng) {
            Some(split) => split,
            None => {
                self.nodes.push(Node::leaf(counts));
                return id;
            }
        };

        // Reserve the slot, children are appended after it.
        self.nodes.push(Node::leaf(counts));

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| ctx.x[[i, split.feature]] <= split.threshold);

        let left = self.grow(ctx, left_idx, depth + 1, rng);
        let right = self.grow(ctx, right_idx, depth + 1, rng);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Class probabilities for one row.
    pub fn predict_proba(&self, row: &[f64]) -> [f64; NUM_CLASSES] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Check that every split references an existing feature and two nodes
    /// stored after it. Children always follow their parent, so this also
    /// rules out cycles.
    pub(crate) fn is_well_formed(&self, n_features: usize) -> bool {
        let n_nodes = self.nodes.len();
        n_nodes > 0
            && self.nodes.iter().enumerate().all(|(idx, node)| match node {
                Node::Leaf { .. } => true,
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < n_features
                        && (idx + 1..n_nodes).contains(left)
                        && (idx + 1..n_nodes).contains(right)
                }
            })
    }
}

fn class_counts(y: &[Label], indices: &[usize]) -> [usize; NUM_CLASSES] {
    let mut counts = [0usize; NUM_CLASSES];
    for &i in indices {
        counts[y[i].index()] += 1;
    }
    counts
}

fn gini(counts: &[usize; NUM_CLASSES], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Search a random subset of features for the lowest weighted child impurity.
///
/// Features beyond the first `max_features` are only examined when none of the
/// drawn ones admits a valid split.
fn best_split<R: Rng>(
    ctx: &GrowContext,
    indices: &[usize],
    counts: &[usize; NUM_CLASSES],
    rng: &mut R,
) -> Option<SplitCandidate> {
    let n_features = ctx.x.ncols();
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    for (visited, &feature) in features.iter().enumerate() {
        if visited >= ctx.params.max_features && best.is_some() {
            break;
        }
        if let Some(candidate) = best_split_on_feature(ctx, indices, counts, feature) {
            if best.map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
    }
    best
}

fn best_split_on_feature(
    ctx: &GrowContext,
    indices: &[usize],
    counts: &[usize; NUM_CLASSES],
    feature: usize,
) -> Option<SplitCandidate> {
    let mut sorted: Vec<(f64, Label)> = indices
        .iter()
        .map(|&i| (ctx.x[[i, feature]], ctx.y[i]))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = sorted.len();
    let min_leaf = ctx.params.min_samples_leaf.max(1);
    let mut left = [0usize; NUM_CLASSES];
    let mut best: Option<SplitCandidate> = None;

    for pos in 0..total.saturating_sub(1) {
        left[sorted[pos].1.index()] += 1;
        let (value, next) = (sorted[pos].0, sorted[pos + 1].0);
        if value == next {
            continue;
        }
        let n_left = pos + 1;
        let n_right = total - n_left;
        if n_left < min_leaf || n_right < min_leaf {
            continue;
        }

        let right = [counts[0] - left[0], counts[1] - left[1]];
        let impurity = (n_left as f64 * gini(&left, n_left)
            + n_right as f64 * gini(&right, n_right))
            / total as f64;

        if best.map_or(true, |b| impurity < b.impurity) {
            let mut threshold = (value + next) / 2.0;
            if threshold >= next {
                threshold = value;
            }
            best = Some(SplitCandidate {
                feature,
                threshold,
                impurity,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: 2,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(&[5, 0], 5), 0.0);
        assert!((gini(&[5, 5], 10) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0, 0], 0), 0.0);
    }

    #[test]
    fn test_separable_data_is_fit_exactly() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [8.0, 1.0], [9.0, 1.0]];
        let y = vec![
            Label::Introvert,
            Label::Introvert,
            Label::Extrovert,
            Label::Extrovert,
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tree = DecisionTree::fit(x.view(), &y, (0..4).collect(), params(), &mut rng);

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_proba(&[1.5, 0.0]), [1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[8.5, 1.0]), [0.0, 1.0]);
        assert!(tree.is_well_formed(2));
    }

    #[test]
    fn test_pure_node_is_single_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = vec![Label::Extrovert; 3];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), &y, vec![0, 1, 2], params(), &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert!(tree.nodes[0].is_leaf());
    }

    #[test]
    fn test_constant_features_yield_leaf() {
        let x = array![[3.0, 3.0], [3.0, 3.0]];
        let y = vec![Label::Introvert, Label::Extrovert];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let tree = DecisionTree::fit(x.view(), &y, vec![0, 1], params(), &mut rng);
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_proba(&[3.0, 3.0]), [0.5, 0.5]);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = vec![
            Label::Introvert,
            Label::Extrovert,
            Label::Introvert,
            Label::Extrovert,
            Label::Introvert,
            Label::Extrovert,
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let limited = TreeParams {
            max_depth: Some(1),
            ..params()
        };
        let tree = DecisionTree::fit(x.view(), &y, (0..6).collect(), limited, &mut rng);
        assert!(tree.depth() <= 1);
    }

    #[test]
    fn test_threshold_between_integer_values() {
        let x = array![[4.0], [5.0]];
        let y = vec![Label::Introvert, Label::Extrovert];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let tree = DecisionTree::fit(x.view(), &y, vec![0, 1], params(), &mut rng);
        match &tree.nodes[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, 4.5),
            Node::Leaf { .. } => panic!("expected a split"),
        }
    }

    #[test]
    fn test_self_referencing_split_is_rejected() {
        let looping = DecisionTree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 100.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(!looping.is_well_formed(1));

        let backwards = DecisionTree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { proba: [1.0, 0.0] },
                Node::Split {
                    feature: 0,
                    threshold: 2.0,
                    left: 1,
                    right: 0,
                },
            ],
        };
        assert!(!backwards.is_well_formed(1));
    }
}
