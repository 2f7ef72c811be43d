// ============================================================
// Layer 2: TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Check the CSV exists             (exit 2 if not)
//   Step 2: Load complete rows               (Layer 4 - data)
//   Step 3: Stratified train/test split      (Layer 4 - data)
//   Step 4: Fit vectorizer + classifier      (Layer 5 - ml)
//   Step 5: Predict the test split, metrics  (Layer 5 - ml)
//   Step 6: Save artifact and report         (Layer 6 - infra)
//   Step 7: Phase 2 only: compare with the baseline report
//
// The baseline and phase-2 runs share this workflow. They
// differ in the classifier, the default output paths, and
// whether ranking metrics (ROC-AUC, PR-AUC) are computed.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvLoader, splitter::stratified_split};
use crate::domain::error::PipelineError;
use crate::domain::message::LabeledMessage;
use crate::domain::traits::DatasetSource;
use crate::infra::{
    checkpoint::save_artifact,
    metrics::{format_comparison, MetricsReport},
    optional::try_or_none,
};
use crate::ml::model::{ClassifierKind, TrainedArtifact};
use crate::ml::trainer::{fit_artifact, predict_split, FitOptions};
use crate::ml::vectorizer::DEFAULT_MAX_FEATURES;

use super::fetch_use_case::DEFAULT_DATASET_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Linear SVM (or nearest centroid), classification metrics only
    Baseline,
    /// Logistic regression with ROC-AUC / PR-AUC and a comparison
    Phase2,
}

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub phase:        Phase,
    pub data_path:    PathBuf,
    pub output_model: PathBuf,
    pub metrics_path: PathBuf,
    pub test_size:    f64,
    pub seed:         u64,
    pub max_features: usize,
    pub classifier:   ClassifierKind,

    /// Report printed against in phase 2; ignored for the baseline.
    pub baseline_metrics: Option<PathBuf>,
}

impl TrainConfig {
    pub fn baseline() -> Self {
        Self {
            phase:            Phase::Baseline,
            data_path:        PathBuf::from(DEFAULT_DATASET_PATH),
            output_model:     PathBuf::from("phase1/models/baseline_svm.json"),
            metrics_path:     PathBuf::from("phase1/reports/phase1_metrics.json"),
            test_size:        0.2,
            seed:             42,
            max_features:     DEFAULT_MAX_FEATURES,
            classifier:       ClassifierKind::LinearSvc,
            baseline_metrics: None,
        }
    }

    pub fn phase2() -> Self {
        Self {
            phase:            Phase::Phase2,
            output_model:     PathBuf::from("phase1/models/phase2_logreg.json"),
            metrics_path:     PathBuf::from("phase1/reports/phase2_metrics.json"),
            classifier:       ClassifierKind::LogisticRegression,
            baseline_metrics: Some(PathBuf::from("phase1/reports/phase1_metrics.json")),
            ..Self::baseline()
        }
    }

    fn fit_options(&self) -> FitOptions {
        FitOptions {
            classifier:   self.classifier,
            max_features: self.max_features,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// What one run produced, before anything is written.
pub struct TrainOutcome {
    pub artifact: TrainedArtifact,
    pub report:   MetricsReport,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Steps 2-5 on an already loaded dataset.
    pub fn train_on(&self, messages: Vec<LabeledMessage>) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 3: Stratified split ──────────────────────────────────────────
        let (train, test) = stratified_split(messages, |m| m.label, cfg.test_size, cfg.seed)
            .context("Cannot split dataset")?;
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 4: Fit on the training split only ────────────────────────────
        let artifact = fit_artifact(&train, &cfg.fit_options())?;

        // ── Step 5: Evaluate on the held-out split ────────────────────────────
        let predictions = predict_split(&artifact, &test);
        let ranking     = cfg.phase == Phase::Phase2;
        let report      = MetricsReport::from_predictions(&predictions, train.len(), ranking)?;
        tracing::info!(
            "Test accuracy {:.4}, precision {:.4}, recall {:.4}, f1 {:.4}",
            report.accuracy, report.precision, report.recall, report.f1,
        );

        Ok(TrainOutcome { artifact, report })
    }

    /// Steps 1-5: load the CSV and train, without writing files.
    pub fn train_and_eval(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Fail before any work if the input is missing ──────────────
        if !cfg.data_path.exists() {
            return Err(PipelineError::DatasetMissing(cfg.data_path.clone()).into());
        }

        // ── Step 2: Load ──────────────────────────────────────────────────────
        let dataset = CsvLoader::new(&cfg.data_path).load_all()?;
        self.train_on(dataset.messages)
    }

    /// Full run: train, save both outputs, print the comparison.
    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg     = &self.config;
        let outcome = self.train_and_eval()?;

        // ── Step 6: Persist ───────────────────────────────────────────────────
        save_artifact(&cfg.output_model, &outcome.artifact)?;
        match cfg.phase {
            Phase::Baseline => println!("Saved model+vectorizer to {}", cfg.output_model.display()),
            Phase::Phase2   => println!("Saved phase2 model to {}", cfg.output_model.display()),
        }

        outcome.report.save(&cfg.metrics_path)?;
        match cfg.phase {
            Phase::Baseline => println!("Saved metrics to {}", cfg.metrics_path.display()),
            Phase::Phase2   => println!("Saved phase2 metrics to {}", cfg.metrics_path.display()),
        }

        // ── Step 7: Comparison, skipped silently if the baseline is absent ────
        if cfg.phase == Phase::Phase2 {
            let baseline = cfg
                .baseline_metrics
                .as_deref()
                .filter(|p| p.exists())
                .and_then(|p| try_or_none("baseline metrics", || MetricsReport::load(p)));
            if let Some(before) = baseline {
                println!();
                print!(
                    "{}",
                    format_comparison("Phase1 SVM vs Phase2 LogisticRegression", &before, &outcome.report)
                );
            }
        }

        Ok(outcome)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::exit_code_for;
    use crate::domain::message::Label;

    fn corpus(ham: usize, spam: usize) -> Vec<LabeledMessage> {
        let mut v = Vec::new();
        for i in 0..ham {
            v.push(LabeledMessage::new(format!("see you at lunch meeting office day{i}"), Label::Ham));
        }
        for i in 0..spam {
            v.push(LabeledMessage::new(format!("win free cash prize claim now code{i}"), Label::Spam));
        }
        v
    }

    #[test]
    fn test_phase_defaults() {
        let base = TrainConfig::baseline();
        let p2   = TrainConfig::phase2();
        assert_eq!(base.classifier, ClassifierKind::LinearSvc);
        assert_eq!(p2.classifier, ClassifierKind::LogisticRegression);
        assert_eq!(p2.data_path, base.data_path);
        assert_eq!(p2.test_size, 0.2);
        assert!(base.baseline_metrics.is_none());
    }

    #[test]
    fn test_train_on_reports_split_sizes() {
        let outcome = TrainUseCase::new(TrainConfig::phase2()).train_on(corpus(100, 20)).unwrap();
        assert_eq!(outcome.report.n_train, 96);
        assert_eq!(outcome.report.n_test, 24);
        assert!(outcome.report.roc_auc.is_some());
    }

    #[test]
    fn test_baseline_has_no_ranking_metrics() {
        let outcome = TrainUseCase::new(TrainConfig::baseline()).train_on(corpus(30, 10)).unwrap();
        assert!(outcome.report.roc_auc.is_none());
        assert!(outcome.report.pr_auc.is_none());
    }

    #[test]
    fn test_missing_csv_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { data_path: dir.path().join("none.csv"), ..TrainConfig::baseline() };
        let err = TrainUseCase::new(cfg).execute().err().unwrap();
        assert_eq!(exit_code_for(&err), 2);
    }
}
