// ============================================================
// Layer 5: Linear Support Vector Classifier
// ============================================================
// C-SVC with a linear kernel, fitted by linfa-svm's SMO solver
// on dense TF-IDF rows (spam = true):
//
//   min_w  ½‖w‖² + C Σ max(0, 1 − yᵢ (wᵀxᵢ + b))
//
// With a linear kernel the fitted decision is a plain
// hyperplane, f(x) = wᵀx − ρ. After the fit the hyperplane is
// read back one unit vector at a time (wⱼ = f(eⱼ) + ρ) and
// kept as a dense weight vector plus bias b = −ρ. Only those
// numbers are persisted, and scoring runs on sparse rows
// without linfa.
//
// The model has no probability interface; it exposes the raw
// decision score wᵀx + b.
//
// Reference: linfa-svm documentation (Svm, SvmParams)
//            Platt (1998) Sequential Minimal Optimization

use anyhow::{Context, Result};
use linfa::traits::Fit;
use linfa::Dataset;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::message::Label;
use crate::ml::sparse::{dense_matrix, SparseVector};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSvcParams {
    pub c:   f64,
    /// SMO stopping tolerance
    pub eps: f64,
}

impl Default for LinearSvcParams {
    fn default() -> Self {
        Self { c: 1.0, eps: 1e-3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvc {
    pub weights: Vec<f64>,
    pub bias:    f64,
}

impl LinearSvc {
    pub fn fit(
        x:          &[SparseVector],
        y:          &[Label],
        n_features: usize,
        params:     &LinearSvcParams,
    ) -> Result<Self> {
        let n = x.len().min(y.len());
        let records: Array2<f64>  = dense_matrix(&x[..n], n_features);
        let targets: Array1<bool> = y.iter().take(n).map(|l| l.is_spam()).collect();
        let dataset = Dataset::new(records, targets);

        let svm = Svm::<f64, bool>::params()
            .pos_neg_weights(params.c, params.c)
            .eps(params.eps)
            .linear_kernel()
            .fit(&dataset)
            .context("LinearSVC training failed")?;
        tracing::debug!("LinearSvc fitted on {} samples, rho = {:.4}", n, svm.rho);

        // ── Read the hyperplane back as dense weights ─────────────────────────
        let mut unit = Array1::<f64>::zeros(n_features);
        let mut weights = Vec::with_capacity(n_features);
        for j in 0..n_features {
            unit[j] = 1.0;
            weights.push(svm.weighted_sum(&unit));
            unit[j] = 0.0;
        }

        Ok(Self { weights, bias: -svm.rho })
    }

    /// Signed distance to the separating hyperplane (positive = spam)
    pub fn decision_function(&self, x: &SparseVector) -> f64 {
        x.dot(&self.weights) + self.bias
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        if self.decision_function(x) > 0.0 { Label::Spam } else { Label::Ham }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> (Vec<SparseVector>, Vec<Label>) {
        // feature 0 marks spam, feature 1 marks ham
        let x = vec![
            SparseVector::from_pairs(vec![(0, 1.0)]),
            SparseVector::from_pairs(vec![(0, 0.8), (2, 0.6)]),
            SparseVector::from_pairs(vec![(1, 1.0)]),
            SparseVector::from_pairs(vec![(1, 0.6), (2, 0.8)]),
        ];
        let y = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham];
        (x, y)
    }

    #[test]
    fn test_separates_linearly_separable_data() {
        let (x, y) = toy();
        let model  = LinearSvc::fit(&x, &y, 3, &LinearSvcParams::default()).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(model.predict(xi), *yi);
        }
    }

    #[test]
    fn test_decision_sign_matches_prediction() {
        let (x, y) = toy();
        let model  = LinearSvc::fit(&x, &y, 3, &LinearSvcParams::default()).unwrap();
        assert_eq!(model.weights.len(), 3);
        assert!(model.weights[0] > model.weights[1]);
        assert!(model.decision_function(&x[0]) > 0.0);
        assert!(model.decision_function(&x[2]) < 0.0);
    }

    #[test]
    fn test_training_is_deterministic() {
        let (x, y) = toy();
        let a = LinearSvc::fit(&x, &y, 3, &LinearSvcParams::default()).unwrap();
        let b = LinearSvc::fit(&x, &y, 3, &LinearSvcParams::default()).unwrap();
        assert_eq!(a, b);
    }
}
