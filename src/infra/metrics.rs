// ============================================================
// Layer 6: Metrics Report
// ============================================================
// Writes one JSON metrics document per training run.
//
// Example (phase 2):
//   {
//     "accuracy": 0.9838,
//     "precision": 0.9921,
//     "recall": 0.8859,
//     "f1": 0.9360,
//     "roc_auc": 0.9903,
//     "pr_auc": 0.9712,
//     "confusion_matrix": [[965, 1], [17, 132]],
//     "n_train": 4457,
//     "n_test": 1115
//   }
//
// The baseline report has the same fields minus roc_auc and
// pr_auc. Confusion-matrix rows are true labels, columns are
// predicted labels, ham first.
//
// Reports are never modified after writing. Phase 2 reads the
// baseline report back only to print a comparison.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::checkpoint::ensure_parent_dir;
use crate::ml::evaluation::{average_precision, roc_auc};
use crate::ml::trainer::TestPredictions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy:  f64,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,

    /// Phase 2 only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roc_auc: Option<f64>,

    /// Phase 2 only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_auc: Option<f64>,

    pub confusion_matrix: [[usize; 2]; 2],
    pub n_train:          usize,
    pub n_test:           usize,
}

impl MetricsReport {
    /// Build the report from test-split predictions.
    /// With `ranking` set, ROC-AUC and PR-AUC are computed from
    /// the per-message spam scores.
    pub fn from_predictions(preds: &TestPredictions, n_train: usize, ranking: bool) -> Result<Self> {
        let cm = preds.confusion_matrix();

        let (roc, pr) = if ranking {
            (
                Some(roc_auc(&preds.y_true, &preds.scores)?),
                Some(average_precision(&preds.y_true, &preds.scores)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            accuracy:         cm.accuracy(),
            precision:        cm.precision(),
            recall:           cm.recall(),
            f1:               cm.f1(),
            roc_auc:          roc,
            pr_auc:           pr,
            confusion_matrix: cm.to_rows(),
            n_train,
            n_test:           preds.y_true.len(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write metrics to '{}'", path.display()))?;
        tracing::debug!("Saved metrics to '{}'", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read metrics from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Before/after table for two reports, e.g. baseline vs phase 2.
pub fn format_comparison(title: &str, before: &MetricsReport, after: &MetricsReport) -> String {
    fn opt(v: Option<f64>) -> String {
        v.map(|x| format!("{x:.4}")).unwrap_or_else(|| "nan".to_string())
    }

    let mut out = String::new();
    let _ = writeln!(out, "Comparison ({title}):");
    let rows = [
        ("accuracy",  Some(before.accuracy),  Some(after.accuracy)),
        ("precision", Some(before.precision), Some(after.precision)),
        ("recall",    Some(before.recall),    Some(after.recall)),
        ("f1",        Some(before.f1),        Some(after.f1)),
        ("roc_auc",   before.roc_auc,         after.roc_auc),
        ("pr_auc",    before.pr_auc,          after.pr_auc),
    ];
    for (name, b, a) in rows {
        let _ = writeln!(out, "{:<10} {} -> {}", format!("{name}:"), opt(b), opt(a));
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::Label::{Ham, Spam};

    fn preds() -> TestPredictions {
        TestPredictions {
            y_true: vec![Ham, Ham, Spam, Spam],
            y_pred: vec![Ham, Spam, Spam, Spam],
            scores: vec![0.1, 0.6, 0.7, 0.9],
        }
    }

    #[test]
    fn test_baseline_report_omits_ranking_metrics() {
        let report = MetricsReport::from_predictions(&preds(), 16, false).unwrap();
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert!(json.get("roc_auc").is_none());
        assert_eq!(json["confusion_matrix"], serde_json::json!([[1, 1], [0, 2]]));
        assert_eq!(json["n_test"], 4);
    }

    #[test]
    fn test_phase2_report_has_ranking_metrics() {
        let report = MetricsReport::from_predictions(&preds(), 16, true).unwrap();
        assert_eq!(report.roc_auc, Some(1.0));
        assert_eq!(report.pr_auc, Some(1.0));
    }

    #[test]
    fn test_save_and_load() {
        let dir    = tempfile::tempdir().unwrap();
        let path   = dir.path().join("reports/m.json");
        let report = MetricsReport::from_predictions(&preds(), 16, true).unwrap();
        report.save(&path).unwrap();
        assert_eq!(MetricsReport::load(&path).unwrap(), report);
    }

    #[test]
    fn test_comparison_prints_nan_for_missing_baseline_auc() {
        let before = MetricsReport::from_predictions(&preds(), 16, false).unwrap();
        let after  = MetricsReport::from_predictions(&preds(), 16, true).unwrap();
        let text   = format_comparison("baseline vs phase2", &before, &after);
        assert!(text.contains("accuracy:  0.7500 -> 0.7500"));
        assert!(text.contains("roc_auc:   nan -> 1.0000"));
    }
}
