//! Gradient-boosted regression trees evaluated on the logit scale.

use cardiorisk_core::{Classifier, ModelError};
use serde::Deserialize;

use crate::{check_feature_names, sigmoid, LoadError};

/// One node of a regression tree, stored in a flat array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go to `yes` when `x[feature] < threshold`, to `no` otherwise, and to
    /// `missing` (or `yes` when unset) when the value is NaN.
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        #[serde(default)]
        missing: Option<usize>,
    },
    Leaf { leaf: f64 },
}

/// A single tree; node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<(), LoadError> {
        if self.nodes.is_empty() {
            return Err(LoadError::invalid(format!("tree {} has no nodes", tree_idx)));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } if !leaf.is_finite() => {
                    return Err(LoadError::invalid(format!(
                        "tree {} node {}: leaf value is not finite",
                        tree_idx, i
                    )));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split { feature, threshold, yes, no, missing } => {
                    if *feature >= n_features {
                        return Err(LoadError::invalid(format!(
                            "tree {} node {}: feature {} out of range for {} features",
                            tree_idx, i, feature, n_features
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(LoadError::invalid(format!(
                            "tree {} node {}: threshold is NaN",
                            tree_idx, i
                        )));
                    }
                    // Children must point forward so every walk terminates.
                    for child in [Some(*yes), Some(*no), *missing].into_iter().flatten() {
                        if child <= i || child >= self.nodes.len() {
                            return Err(LoadError::invalid(format!(
                                "tree {} node {}: child index {} is invalid",
                                tree_idx, i, child
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Walks the tree for one row and returns the leaf value.
    fn leaf_value(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut idx = 0;
        loop {
            let node = self.nodes.get(idx).ok_or_else(|| {
                ModelError::Inference(format!("tree node {} does not exist", idx))
            })?;
            match node {
                TreeNode::Leaf { leaf } => return Ok(*leaf),
                TreeNode::Split { feature, threshold, yes, no, missing } => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        ModelError::Inference(format!("feature {} does not exist", feature))
                    })?;
                    let next = if value.is_nan() {
                        (*missing).unwrap_or(*yes)
                    } else if value < *threshold {
                        *yes
                    } else {
                        *no
                    };
                    if next <= idx {
                        return Err(ModelError::Inference(format!(
                            "tree node {} points back to {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
            }
        }
    }
}

/// Additive tree ensemble for binary classification.
///
/// `p = sigmoid(logit(base_score) + Σ leaf_value(tree, x))`
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    n_features: usize,
    #[serde(default = "default_base_score")]
    base_score: f64,
    trees: Vec<Tree>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

fn default_base_score() -> f64 {
    0.5
}

impl TreeEnsemble {
    pub fn new(n_features: usize, base_score: f64, trees: Vec<Tree>) -> Result<Self, LoadError> {
        let model = Self { n_features, base_score, trees, feature_names: None };
        model.validate()?;
        Ok(model)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub(crate) fn validate(&self) -> Result<(), LoadError> {
        if self.n_features == 0 {
            return Err(LoadError::invalid("tree ensemble declares zero features"));
        }
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err(LoadError::invalid(format!(
                "base_score {} must be strictly between 0 and 1",
                self.base_score
            )));
        }
        if self.trees.is_empty() {
            return Err(LoadError::invalid("tree ensemble has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        check_feature_names(self.feature_names.as_ref(), self.n_features)
    }

    fn base_margin(&self) -> f64 {
        (self.base_score / (1.0 - self.base_score)).ln()
    }
}

impl Classifier for TreeEnsemble {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let mut margin = self.base_margin();
        for tree in &self.trees {
            margin += tree.leaf_value(features)?;
        }
        let p = sigmoid(margin);

        if !p.is_finite() {
            return Err(ModelError::NonFinite(p));
        }
        Ok(p)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn kind(&self) -> &'static str {
        "gradient_boosted_trees"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelArtifact;

    fn stump(feature: usize, threshold: f64, yes: f64, no: f64) -> Tree {
        Tree::new(vec![
            TreeNode::Split { feature, threshold, yes: 1, no: 2, missing: None },
            TreeNode::Leaf { leaf: yes },
            TreeNode::Leaf { leaf: no },
        ])
    }

    #[test]
    fn test_split_goes_yes_below_threshold() {
        let model = TreeEnsemble::new(1, 0.5, vec![stump(0, 10.0, -2.0, 2.0)]).unwrap();
        let low = model.predict_proba(&[9.9]).unwrap();
        let high = model.predict_proba(&[10.0]).unwrap();
        assert!((low - sigmoid(-2.0)).abs() < 1e-12);
        assert!((high - sigmoid(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_value_branch() {
        let tree = Tree::new(vec![
            TreeNode::Split { feature: 0, threshold: 1.0, yes: 1, no: 2, missing: Some(2) },
            TreeNode::Leaf { leaf: -1.0 },
            TreeNode::Leaf { leaf: 1.0 },
        ]);
        let model = TreeEnsemble::new(1, 0.5, vec![tree]).unwrap();
        assert!((model.predict_proba(&[f64::NAN]).unwrap() - sigmoid(1.0)).abs() < 1e-12);

        // Without an explicit branch NaN follows `yes`.
        let model = TreeEnsemble::new(1, 0.5, vec![stump(0, 1.0, -1.0, 1.0)]).unwrap();
        assert!((model.predict_proba(&[f64::NAN]).unwrap() - sigmoid(-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_trees_are_summed_on_top_of_base_score() {
        let model = TreeEnsemble::new(
            2,
            0.25,
            vec![stump(0, 50.0, 0.1, 0.4), stump(1, 0.5, -0.3, 0.6)],
        )
        .unwrap();
        let p = model.predict_proba(&[63.0, 1.0]).unwrap();
        let expected = sigmoid((0.25f64 / 0.75).ln() + 0.4 + 0.6);
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let model = TreeEnsemble::new(13, 0.5, vec![stump(0, 1.0, 0.0, 0.0)]).unwrap();
        let err = model.predict_proba(&[0.0; 5]).unwrap_err();
        assert_eq!(err, ModelError::ShapeMismatch { expected: 13, actual: 5 });
    }

    #[test]
    fn test_rejects_backward_child() {
        let tree = Tree::new(vec![
            TreeNode::Leaf { leaf: 0.0 },
            TreeNode::Split { feature: 0, threshold: 1.0, yes: 0, no: 2, missing: None },
            TreeNode::Leaf { leaf: 0.0 },
        ]);
        let err = TreeEnsemble::new(1, 0.5, vec![tree]).unwrap_err();
        assert!(err.to_string().contains("child index 0"));
    }

    #[test]
    fn test_rejects_feature_out_of_range() {
        let err = TreeEnsemble::new(2, 0.5, vec![stump(2, 1.0, 0.0, 0.0)]).unwrap_err();
        assert!(err.to_string().contains("feature 2 out of range"));
    }

    #[test]
    fn test_rejects_bad_base_score() {
        assert!(TreeEnsemble::new(1, 0.0, vec![stump(0, 1.0, 0.0, 0.0)]).is_err());
        assert!(TreeEnsemble::new(1, 1.0, vec![stump(0, 1.0, 0.0, 0.0)]).is_err());
        assert!(TreeEnsemble::new(1, 0.5, vec![]).is_err());
        assert!(TreeEnsemble::new(1, 0.5, vec![Tree::new(vec![])]).is_err());
    }

    #[test]
    fn test_parses_from_json() {
        let artifact = ModelArtifact::from_json(
            r#"{
                "kind": "gradient_boosted_trees",
                "n_features": 2,
                "trees": [
                    { "nodes": [
                        { "feature": 1, "threshold": 0.5, "yes": 1, "no": 2 },
                        { "leaf": -0.5 },
                        { "leaf": 0.5 }
                    ] }
                ]
            }"#,
        )
        .unwrap();
        let ModelArtifact::GradientBoostedTrees(model) = artifact else {
            panic!("expected tree ensemble");
        };
        assert_eq!(model.tree_count(), 1);
        assert!((model.predict_proba(&[0.0, 1.0]).unwrap() - sigmoid(0.5)).abs() < 1e-12);
    }
}
