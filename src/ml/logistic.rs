// ============================================================
// Layer 5: Logistic Regression
// ============================================================
// L2-regularised binary logistic regression fitted by
// linfa-logistic (L-BFGS) on dense TF-IDF rows (spam = true):
//
//   min_w  Σ log(1 + exp(−yᵢ (wᵀxᵢ + b))) + (α/2)‖w‖²,  α = 1/C
//
// The fitted coefficients and intercept are copied out of the
// linfa model; only those numbers are persisted, and scoring
// runs on sparse rows without linfa.
//
// Unlike LinearSvc this model has a probability interface:
// P(spam | x) = σ(wᵀx + b). linfa treats the larger of the two
// target values as the positive class, and true > false.
//
// Reference: linfa-logistic documentation (LogisticRegression)

use anyhow::{Context, Result};
use linfa::traits::Fit;
use linfa::Dataset;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::message::Label;
use crate::ml::sparse::{dense_matrix, SparseVector};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    pub c:        f64,
    pub tol:      f64,
    pub max_iter: u64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self { c: 1.0, tol: 1e-4, max_iter: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub bias:    f64,
}

/// Numerically stable logistic function
pub fn sigmoid(t: f64) -> f64 {
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    pub fn fit(
        x:          &[SparseVector],
        y:          &[Label],
        n_features: usize,
        params:     &LogisticRegressionParams,
    ) -> Result<Self> {
        let n = x.len().min(y.len());
        let records: Array2<f64>  = dense_matrix(&x[..n], n_features);
        let targets: Array1<bool> = y.iter().take(n).map(|l| l.is_spam()).collect();
        let dataset = Dataset::new(records, targets);

        let fitted = linfa_logistic::LogisticRegression::default()
            .alpha(1.0 / params.c)
            .gradient_tolerance(params.tol)
            .max_iterations(params.max_iter)
            .fit(&dataset)
            .context("LogisticRegression training failed")?;

        let weights = fitted.params().to_vec();
        let bias    = fitted.intercept();
        tracing::debug!("LogisticRegression fitted on {} samples, intercept = {:.4}", n, bias);

        Ok(Self { weights, bias })
    }

    pub fn decision_function(&self, x: &SparseVector) -> f64 {
        x.dot(&self.weights) + self.bias
    }

    /// P(spam | x)
    pub fn predict_proba(&self, x: &SparseVector) -> f64 {
        sigmoid(self.decision_function(x))
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        if self.decision_function(x) > 0.0 { Label::Spam } else { Label::Ham }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_learns_separable_problem() {
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(0, 0.9), (2, 0.4)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
            SparseVector::from_pairs(vec![(1, 0.9), (2, 0.4)]),
        ];
        let y = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham];
        let model = LogisticRegression::fit(&x, &y, 3, &LogisticRegressionParams { c: 10.0, ..Default::default() })
            .unwrap();

        assert!(model.predict_proba(&x[0]) > 0.5);
        assert!(model.predict_proba(&x[2]) < 0.5);
        assert_eq!(model.predict(&x[1]), Label::Spam);
        assert_eq!(model.predict(&x[3]), Label::Ham);
    }

    #[test]
    fn test_spam_is_the_positive_class() {
        // feature 1 only appears on spam rows
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
        ];
        let y = vec![Label::Ham, Label::Ham, Label::Spam, Label::Spam];
        let model = LogisticRegression::fit(&x, &y, 2, &LogisticRegressionParams::default()).unwrap();
        assert!(model.weights[1] > 0.0);
        assert!(model.weights[0] < 0.0);
        assert!(model.predict_proba(&x[2]) > model.predict_proba(&x[0]));
    }

    #[test]
    fn test_probabilities_are_in_unit_interval() {
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
        ];
        let y = vec![Label::Spam, Label::Ham];
        let model = LogisticRegression::fit(&x, &y, 2, &LogisticRegressionParams::default()).unwrap();
        let p = model.predict_proba(&SparseVector::default());
        assert!(p > 0.0 && p < 1.0);
    }
}
