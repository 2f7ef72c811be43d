// ============================================================
// Layer 5: Classifier and Artifact Types
// ============================================================
// A trained artifact bundles the fitted TF-IDF vectorizer with
// the fitted classifier. It is written once per training run
// and read back by the bundler, the demo page and the smoke
// test.
//
// On disk the artifact is JSON in one of two shapes:
//
//   {"model": {"kind": "logistic_regression", ...},
//    "vectorizer": {...}}                          ← bundle
//
//   {"kind": "linear_svc", ...}                    ← bare model
//
// Bare models come from older runs that saved only the
// classifier. They load without a vectorizer.
//
// Scoring capability
//   Each classifier variant offers a different way to turn a
//   feature vector into a confidence:
//     LogisticRegression → probability of spam
//     LinearSvc          → decision score (margin)
//     NearestCentroid    → hard label only
//   ScoreCapability names these three cases so callers can
//   resolve them once when the model is loaded.

use serde::{Deserialize, Serialize};

use crate::domain::message::Label;
use crate::ml::linear_svc::LinearSvc;
use crate::ml::logistic::{sigmoid, LogisticRegression};
use crate::ml::nearest_centroid::NearestCentroid;
use crate::ml::sparse::SparseVector;
use crate::ml::vectorizer::TfidfVectorizer;

/// Which classifier a trainer should fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    LinearSvc,
    LogisticRegression,
    NearestCentroid,
}

impl ClassifierKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ClassifierKind::LinearSvc          => "LinearSVC",
            ClassifierKind::LogisticRegression => "LogisticRegression",
            ClassifierKind::NearestCentroid    => "NearestCentroid",
        }
    }
}

/// How a classifier can express confidence in its prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCapability {
    /// Calibrated P(spam | x)
    Probability,
    /// Unbounded margin; shown through a sigmoid for display
    DecisionScore,
    /// Only the predicted label is available
    LabelOnly,
}

impl ScoreCapability {
    /// Spam confidence in [0, 1] for an already predicted label.
    /// DecisionScore goes through a sigmoid; LabelOnly maps the
    /// label to 0.0 or 1.0.
    pub fn score(self, model: &Classifier, x: &SparseVector, label: Label) -> f64 {
        let resolved = match self {
            ScoreCapability::Probability   => model.predict_proba(x),
            ScoreCapability::DecisionScore => model.decision_function(x).map(sigmoid),
            ScoreCapability::LabelOnly     => None,
        };
        resolved.unwrap_or_else(|| f64::from(label.code()))
    }
}

/// A fitted binary text classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LinearSvc(LinearSvc),
    LogisticRegression(LogisticRegression),
    NearestCentroid(NearestCentroid),
}

impl Classifier {
    pub fn kind(&self) -> ClassifierKind {
        match self {
            Classifier::LinearSvc(_)          => ClassifierKind::LinearSvc,
            Classifier::LogisticRegression(_) => ClassifierKind::LogisticRegression,
            Classifier::NearestCentroid(_)    => ClassifierKind::NearestCentroid,
        }
    }

    pub fn capability(&self) -> ScoreCapability {
        match self {
            Classifier::LogisticRegression(_) => ScoreCapability::Probability,
            Classifier::LinearSvc(_)          => ScoreCapability::DecisionScore,
            Classifier::NearestCentroid(_)    => ScoreCapability::LabelOnly,
        }
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        match self {
            Classifier::LinearSvc(m)          => m.predict(x),
            Classifier::LogisticRegression(m) => m.predict(x),
            Classifier::NearestCentroid(m)    => m.predict(x),
        }
    }

    /// P(spam | x) when the model has a probability interface.
    pub fn predict_proba(&self, x: &SparseVector) -> Option<f64> {
        match self {
            Classifier::LogisticRegression(m) => Some(m.predict_proba(x)),
            _ => None,
        }
    }

    /// Raw margin when the model has a decision score.
    pub fn decision_function(&self, x: &SparseVector) -> Option<f64> {
        match self {
            Classifier::LinearSvc(m)          => Some(m.decision_function(x)),
            Classifier::LogisticRegression(m) => Some(m.decision_function(x)),
            Classifier::NearestCentroid(_)    => None,
        }
    }
}

/// Fitted vectorizer + classifier, persisted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact {
    pub model:      Classifier,
    pub vectorizer: TfidfVectorizer,
}

impl TrainedArtifact {
    pub fn predict_text(&self, text: &str) -> Label {
        self.model.predict(&self.vectorizer.transform(text))
    }
}

/// Every artifact shape accepted when loading.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArtifactFile {
    Bundle(TrainedArtifact),
    Bare(Classifier),
}

impl ArtifactFile {
    /// Split into the model and, for bundles, its vectorizer.
    pub fn into_parts(self) -> (Classifier, Option<TfidfVectorizer>) {
        match self {
            ArtifactFile::Bundle(a) => (a.model, Some(a.vectorizer)),
            ArtifactFile::Bare(m)   => (m, None),
        }
    }
}
