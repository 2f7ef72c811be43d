// ============================================================
// Layer 5: Evaluation Metrics
// ============================================================
// Binary classification metrics on the held-out test split,
// with spam as the positive class.
//
//   accuracy   (tp + tn) / n
//   precision  tp / (tp + fp)          0.0 when nothing is predicted spam
//   recall     tp / (tp + fn)          0.0 when there is no spam
//   f1         2·P·R / (P + R)         0.0 when P + R = 0
//
// Ranking metrics use a continuous spam score per message:
//
//   ROC-AUC  probability that a random spam scores higher than a
//            random ham (Mann–Whitney U, ties count one half)
//   PR-AUC   average precision: Σ (Rₖ − Rₖ₋₁) Pₖ over the
//            distinct score thresholds, highest first
//
// Reference: Fawcett (2006) An introduction to ROC analysis
//            Davis & Goadrich (2006) Precision-Recall and ROC curves

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::message::Label;

/// 2×2 table of true vs predicted counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tn: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tp: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[Label], y_pred: &[Label]) -> Self {
        let mut cm = Self::default();
        for (t, p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (Label::Ham,  Label::Ham)  => cm.tn  += 1,
                (Label::Ham,  Label::Spam) => cm.fp  += 1,
                (Label::Spam, Label::Ham)  => cm.fn_ += 1,
                (Label::Spam, Label::Spam) => cm.tp  += 1,
            }
        }
        cm
    }

    /// Rows are true labels, columns predicted labels, ham first.
    pub fn to_rows(&self) -> [[usize; 2]; 2] {
        [[self.tn, self.fp], [self.fn_, self.tp]]
    }

    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn class_counts(y_true: &[Label]) -> (usize, usize) {
    let pos = y_true.iter().filter(|l| l.is_spam()).count();
    (pos, y_true.len() - pos)
}

/// Area under the ROC curve.
pub fn roc_auc(y_true: &[Label], scores: &[f64]) -> Result<f64> {
    if y_true.len() != scores.len() {
        bail!("roc_auc: {} labels but {} scores", y_true.len(), scores.len());
    }
    let (n_pos, n_neg) = class_counts(y_true);
    if n_pos == 0 || n_neg == 0 {
        bail!("roc_auc is undefined when only one class is present in y_true");
    }

    // Average ranks (1-based) over tied scores
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(l, _)| l.is_spam())
        .map(|(_, r)| r)
        .sum();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Ok((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

/// Average precision, the step-wise area under the PR curve.
pub fn average_precision(y_true: &[Label], scores: &[f64]) -> Result<f64> {
    if y_true.len() != scores.len() {
        bail!("average_precision: {} labels but {} scores", y_true.len(), scores.len());
    }
    let (n_pos, _) = class_counts(y_true);
    if n_pos == 0 {
        bail!("average_precision is undefined without positive samples");
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let (mut tp, mut fp) = (0usize, 0usize);
    let mut prev_recall  = 0.0;
    let mut ap           = 0.0;

    let mut i = 0;
    while i < order.len() {
        // Consume one threshold: every sample tied at this score
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            if y_true[order[i]].is_spam() { tp += 1 } else { fp += 1 }
            i += 1;
        }
        let precision = tp as f64 / (tp + fp) as f64;
        let recall    = tp as f64 / n_pos as f64;
        ap += (recall - prev_recall) * precision;
        prev_recall = recall;
    }
    Ok(ap)
}
