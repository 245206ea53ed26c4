//! Random forest of flattened decision trees.
//!
//! Trees use the array layout of the training library: node `i` is a leaf when
//! `children_left[i] == -1`; otherwise a sample goes left when
//! `x[feature[i]] <= threshold[i]`. `value[i]` at a leaf is P(high risk).

use super::logistic::validate_threshold;
use super::{DEFAULT_THRESHOLD, Prediction};
use crate::error::MlError;
use crate::features::{FEATURE_COUNT, FeatureVector};
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

/// One fitted decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    /// A single-leaf tree that always returns `probability`.
    pub fn constant(probability: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![LEAF],
            threshold: vec![0.0],
            value: vec![probability],
        }
    }

    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Structural checks. Children must point forward so every walk terminates.
    pub fn validate(&self) -> Result<(), MlError> {
        let n = self.node_count();
        if n == 0 {
            return Err(MlError::invalid_model("tree has no nodes"));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err(MlError::invalid_model(
                "tree arrays have mismatched lengths",
            ));
        }

        for node in 0..n {
            if self.is_leaf(node) {
                let p = self.value[node];
                if !(0.0..=1.0).contains(&p) {
                    return Err(MlError::invalid_model(format!(
                        "leaf {node} value {p} is not a probability"
                    )));
                }
                continue;
            }
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(MlError::invalid_model(format!(
                        "node {node} has invalid child {child}"
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= FEATURE_COUNT as i64 {
                return Err(MlError::invalid_model(format!(
                    "node {node} splits on unknown feature {feature}"
                )));
            }
            if !self.threshold[node].is_finite() {
                return Err(MlError::invalid_model(format!(
                    "node {node} threshold is not finite"
                )));
            }
        }
        Ok(())
    }

    /// Walk the tree and return the leaf probability.
    ///
    /// Every array access is checked, so a tree that skipped [`validate`](Self::validate)
    /// yields an inference error rather than a panic.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, MlError> {
        let x = features.as_slice();
        let mut node = 0usize;
        for _ in 0..self.node_count() {
            let missing = || MlError::inference(format!("node {node} is missing from the tree"));
            let left = *self.children_left.get(node).ok_or_else(missing)?;
            if left == LEAF {
                let p = *self.value.get(node).ok_or_else(missing)?;
                if !p.is_finite() {
                    return Err(MlError::inference(format!(
                        "leaf {node} value is not finite"
                    )));
                }
                return Ok(p);
            }
            let right = *self.children_right.get(node).ok_or_else(missing)?;
            let split = *self.threshold.get(node).ok_or_else(missing)?;
            let feature = self
                .feature
                .get(node)
                .and_then(|f| usize::try_from(*f).ok())
                .ok_or_else(|| MlError::inference(format!("node {node} has no split feature")))?;
            let value = *x
                .get(feature)
                .ok_or_else(|| MlError::inference(format!("feature {feature} out of range")))?;
            let next = if value <= split { left } else { right };
            node = usize::try_from(next)
                .ok()
                .filter(|n| *n < self.node_count())
                .ok_or_else(|| MlError::inference(format!("node {node} has no child {next}")))?;
        }
        Err(MlError::inference("tree walk did not reach a leaf"))
    }
}

/// Mean of the trees' leaf probabilities, thresholded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), MlError> {
        if self.trees.is_empty() {
            return Err(MlError::invalid_model("random forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| MlError::invalid_model(format!("tree {i}: {e}")))?;
        }
        validate_threshold(self.threshold)
    }

    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, MlError> {
        if self.trees.is_empty() {
            return Err(MlError::inference("random forest has no trees"));
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_proba(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, MlError> {
        let p = self.predict_proba(features)?;
        Ok(Prediction::from_probability(p, self.threshold))
    }
}
