//! CART decision trees: a gini-split classifier with probability leaves and
//! a variance-split regressor used as the forest base learner.

use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
pub struct TreeSettings {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

enum ClassNode {
    Leaf {
        probabilities: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<ClassNode>,
        right: Box<ClassNode>,
    },
}

pub struct ClassificationTree {
    root: ClassNode,
}

impl ClassificationTree {
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        settings: TreeSettings,
    ) -> Self {
        let indices: Vec<usize> = (0..rows.len()).collect();
        Self {
            root: grow_class_node(rows, labels, n_classes, indices, 0, settings),
        }
    }

    /// Per-class probabilities from the leaf this row falls into.
    pub fn predict_proba(&self, row: &[f64]) -> &[f64] {
        let mut node = &self.root;
        loop {
            match node {
                ClassNode::Leaf { probabilities } => return probabilities,
                ClassNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn grow_class_node(
    rows: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
    indices: Vec<usize>,
    depth: usize,
    settings: TreeSettings,
) -> ClassNode {
    let total = indices.len();
    let mut counts = vec![0usize; n_classes];
    for &i in &indices {
        counts[labels[i]] += 1;
    }

    let leaf = |counts: &[usize]| ClassNode::Leaf {
        probabilities: counts.iter().map(|&c| c as f64 / total as f64).collect(),
    };

    let node_gini = gini(&counts, total);
    if depth >= settings.max_depth || total < settings.min_samples_split || node_gini == 0.0 {
        return leaf(&counts);
    }

    let Some((feature, threshold)) = best_class_split(rows, labels, n_classes, &indices) else {
        return leaf(&counts);
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| rows[i][feature] <= threshold);

    ClassNode::Split {
        feature,
        threshold,
        left: Box::new(grow_class_node(rows, labels, n_classes, left, depth + 1, settings)),
        right: Box::new(grow_class_node(
            rows,
            labels,
            n_classes,
            right,
            depth + 1,
            settings,
        )),
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let t = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / t;
            p * p
        })
        .sum::<f64>()
}

/// Minimum weighted-gini split over all features; `None` when every feature
/// is constant across the node.
fn best_class_split(
    rows: &[Vec<f64>],
    labels: &[usize],
    n_classes: usize,
    indices: &[usize],
) -> Option<(usize, f64)> {
    let total = indices.len();
    let n_features = rows[indices[0]].len();
    let mut best: Option<(usize, f64, f64)> = None;
    let mut order: Vec<usize> = Vec::with_capacity(total);

    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_counts = vec![0usize; n_classes];
        let mut right_counts = vec![0usize; n_classes];
        for &i in &order {
            right_counts[labels[i]] += 1;
        }

        for cut in 0..total - 1 {
            let index = order[cut];
            left_counts[labels[index]] += 1;
            right_counts[labels[index]] -= 1;

            let here = rows[index][feature];
            let next = rows[order[cut + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = cut + 1;
            let n_right = total - n_left;
            let weighted = (n_left as f64 * gini(&left_counts, n_left)
                + n_right as f64 * gini(&right_counts, n_right))
                / total as f64;

            let bar = best.map_or(f64::INFINITY, |(_, _, score)| score);
            if weighted < bar {
                best = Some((feature, (here + next) / 2.0, weighted));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

enum RegNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<RegNode>,
        right: Box<RegNode>,
    },
}

pub struct RegressionTree {
    root: RegNode,
}

impl RegressionTree {
    /// Fits on the given subset of row indices, so a forest can hand each
    /// tree its own bootstrap sample without copying the matrix.
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        indices: Vec<usize>,
        settings: TreeSettings,
    ) -> Self {
        Self {
            root: grow_reg_node(rows, targets, indices, 0, settings),
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                RegNode::Leaf { value } => return *value,
                RegNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn grow_reg_node(
    rows: &[Vec<f64>],
    targets: &[f64],
    indices: Vec<usize>,
    depth: usize,
    settings: TreeSettings,
) -> RegNode {
    let total = indices.len();
    let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let sum_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();
    let mean = sum / total as f64;
    let sse = sum_sq - sum * sum / total as f64;

    if depth >= settings.max_depth || total < settings.min_samples_split || sse <= 1e-9 {
        return RegNode::Leaf { value: mean };
    }

    let Some((feature, threshold)) = best_reg_split(rows, targets, &indices) else {
        return RegNode::Leaf { value: mean };
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| rows[i][feature] <= threshold);

    RegNode::Split {
        feature,
        threshold,
        left: Box::new(grow_reg_node(rows, targets, left, depth + 1, settings)),
        right: Box::new(grow_reg_node(rows, targets, right, depth + 1, settings)),
    }
}

/// Minimum summed-squared-error split over all features.
fn best_reg_split(rows: &[Vec<f64>], targets: &[f64], indices: &[usize]) -> Option<(usize, f64)> {
    let total = indices.len();
    let n_features = rows[indices[0]].len();

    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut best: Option<(usize, f64, f64)> = None;
    let mut order: Vec<usize> = Vec::with_capacity(total);

    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_by(|&a, &b| {
            rows[a][feature]
                .partial_cmp(&rows[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for cut in 0..total - 1 {
            let index = order[cut];
            let y = targets[index];
            left_sum += y;
            left_sq += y * y;

            let here = rows[index][feature];
            let next = rows[order[cut + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = (cut + 1) as f64;
            let n_right = (total - cut - 1) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);

            let bar = best.map_or(f64::INFINITY, |(_, _, score)| score);
            if sse < bar {
                best = Some((feature, (here + next) / 2.0, sse));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
