// ============================================================
// Layer 2: Demo Application
// ============================================================
// Everything the interactive page and `spam-lab predict` need,
// without any HTTP:
//
//   find_model_path     first candidate that exists
//   load_model          artifact → (model, optional vectorizer)
//   load_dataset_stats  label → count for the sidebar
//   DemoApp             model resolved once at startup, then scores
//                       text; stats are re-read on every call
//
// The page fails soft. A missing or unreadable artifact means
// "no model", a missing dataset means "no stats", and neither
// stops the server from starting.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::loader::CsvLoader;
use crate::infra::{checkpoint::load_artifact, optional::try_or_none};
use crate::ml::inferencer::{Inferencer, Prediction, ScoringError};
use crate::ml::model::Classifier;
use crate::ml::vectorizer::TfidfVectorizer;

use super::fetch_use_case::DEFAULT_DATASET_PATH;

pub const DEFAULT_SAMPLE_TEXT: &str = "Congratulations! You have won a prize. Call now to claim.";

pub const NO_MODEL_MESSAGE: &str =
    "No model available. Ensure the model artifact is present in the web or phase1 models directory.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Searched in order; the first existing path wins.
    pub candidates:   Vec<PathBuf>,
    pub dataset_path: PathBuf,
}

impl DemoConfig {
    /// Bundled web models first, then the training outputs.
    pub fn default_candidates() -> Vec<PathBuf> {
        [
            "web/models/phase2_logreg.json",
            "web/models/baseline_svm.json",
            "phase1/models/phase2_logreg.json",
            "phase1/models/baseline_svm.json",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            candidates:   Self::default_candidates(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

pub fn find_model_path(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.exists()).cloned()
}

pub fn load_model(path: &Path) -> Result<(Classifier, Option<TfidfVectorizer>)> {
    load_artifact(path)
}

/// Label counts for the dataset, or None when it is absent or
/// unreadable.
pub fn load_dataset_stats(path: &Path) -> Option<BTreeMap<String, usize>> {
    if !path.exists() {
        return None;
    }
    try_or_none("dataset stats", || CsvLoader::new(path).label_counts())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DemoError {
    #[error("No model available. Ensure the model artifact is present in the web or phase1 models directory.")]
    NoModel,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// The loaded model (if any) plus where the sidebar stats live.
pub struct DemoApp {
    inferencer:   Option<Inferencer>,
    model_path:   Option<PathBuf>,
    dataset_path: Option<PathBuf>,
}

impl DemoApp {
    /// Resolve and load the model. Never fails: problems are
    /// logged and leave the app without a model.
    pub fn from_config(config: &DemoConfig) -> Self {
        let model_path = find_model_path(&config.candidates);

        let inferencer = match &model_path {
            Some(path) => match load_model(path) {
                Ok((model, vectorizer)) => {
                    tracing::info!(
                        "Loaded {} from '{}'",
                        model.kind().display_name(),
                        path.display()
                    );
                    Some(Inferencer::new(model, vectorizer))
                }
                Err(e) => {
                    tracing::error!("Failed to load model: {e:#}");
                    None
                }
            },
            None => {
                tracing::warn!("No model artifact found in {} candidate paths", config.candidates.len());
                None
            }
        };

        Self {
            inferencer,
            model_path,
            dataset_path: Some(config.dataset_path.clone()),
        }
    }

    /// App around an already built inferencer.
    pub fn with_inferencer(inferencer: Option<Inferencer>, dataset_path: Option<PathBuf>) -> Self {
        Self { inferencer, model_path: None, dataset_path }
    }

    pub fn has_model(&self) -> bool {
        self.inferencer.is_some()
    }

    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    /// Reads the dataset file on each call, so a dataset fetched
    /// after startup shows up without a restart.
    pub fn dataset_stats(&self) -> Option<BTreeMap<String, usize>> {
        load_dataset_stats(self.dataset_path.as_deref()?)
    }

    pub fn predict(&self, text: &str) -> Result<Prediction, DemoError> {
        let inferencer = self.inferencer.as_ref().ok_or(DemoError::NoModel)?;
        Ok(inferencer.predict_text(text)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let a   = dir.path().join("a.json");
        let b   = dir.path().join("b.json");
        let c   = dir.path().join("c.json");
        fs::write(&b, "{}").unwrap();
        fs::write(&c, "{}").unwrap();

        assert_eq!(find_model_path(&[a.clone(), b.clone(), c.clone()]), Some(b));
        assert_eq!(find_model_path(&[a]), None);
    }

    #[test]
    fn test_default_candidate_order() {
        let c = DemoConfig::default_candidates();
        assert_eq!(c[0], PathBuf::from("web/models/phase2_logreg.json"));
        assert_eq!(c[3], PathBuf::from("phase1/models/baseline_svm.json"));
    }

    #[test]
    fn test_dataset_stats() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("sms.csv");
        fs::write(&path, "ham,a\nspam,b\nham,c\n,orphan\n").unwrap();

        let stats = load_dataset_stats(&path).unwrap();
        assert_eq!(stats.get("ham"), Some(&2));
        assert_eq!(stats.get("spam"), Some(&1));
        assert_eq!(stats.len(), 2);
        assert!(load_dataset_stats(&dir.path().join("missing.csv")).is_none());
    }

    #[test]
    fn test_no_model_app() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DemoConfig {
            candidates:   vec![dir.path().join("x.json")],
            dataset_path: dir.path().join("y.csv"),
        };
        let app = DemoApp::from_config(&cfg);
        assert!(!app.has_model());
        assert!(app.dataset_stats().is_none());
        assert_eq!(app.predict("hello"), Err(DemoError::NoModel));
    }

    #[test]
    fn test_corrupt_artifact_behaves_as_no_model() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        fs::write(&path, "not json").unwrap();
        let cfg = DemoConfig { candidates: vec![path.clone()], dataset_path: dir.path().join("y.csv") };

        let app = DemoApp::from_config(&cfg);
        assert!(!app.has_model());
        assert_eq!(app.model_path(), Some(path.as_path()));
    }

    #[test]
    fn test_dataset_fetched_after_startup_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DemoConfig {
            candidates:   vec![dir.path().join("x.json")],
            dataset_path: dir.path().join("sms.csv"),
        };
        let app = DemoApp::from_config(&cfg);
        assert!(app.dataset_stats().is_none());

        fs::write(&cfg.dataset_path, "ham,a
spam,b
").unwrap();
        let stats = app.dataset_stats().unwrap();
        assert_eq!(stats.get("spam"), Some(&1));
    }
}
