// ============================================================
// Layer 5: Training and Evaluation
// ============================================================
// Fits the vectorizer on the training text, transforms the
// training set with it, fits the requested classifier, and
// scores the test split with the same fitted vectorizer.
//
// The test text never reaches TfidfVectorizer::fit, so the
// vocabulary and idf weights only reflect training data.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::domain::message::{Label, LabeledMessage};
use crate::ml::evaluation::ConfusionMatrix;
use crate::ml::linear_svc::{LinearSvc, LinearSvcParams};
use crate::ml::logistic::{LogisticRegression, LogisticRegressionParams};
use crate::ml::model::{Classifier, ClassifierKind, TrainedArtifact};
use crate::ml::nearest_centroid::NearestCentroid;
use crate::ml::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOptions {
    pub classifier:   ClassifierKind,
    pub max_features: usize,
}

/// Fit vectorizer + classifier on the training split.
pub fn fit_artifact(train: &[LabeledMessage], options: &FitOptions) -> Result<TrainedArtifact> {
    let texts: Vec<&str>   = train.iter().map(|m| m.text.as_str()).collect();
    let labels: Vec<Label> = train.iter().map(|m| m.label).collect();

    // ── Step 1: Vocabulary and idf from training text only ────────────────────
    let vectorizer = TfidfVectorizer::fit(&texts, options.max_features, Preprocessor::new())
        .context("Cannot fit TF-IDF vectorizer")?;
    let x = vectorizer.transform_all(&texts);
    let n_features = vectorizer.n_features();
    tracing::info!("Vectorised {} training messages into {} features", x.len(), n_features);

    // ── Step 2: Linear classifier on the transformed rows ─────────────────────
    let model = match options.classifier {
        ClassifierKind::LinearSvc => {
            let params = LinearSvcParams::default();
            Classifier::LinearSvc(LinearSvc::fit(&x, &labels, n_features, &params)?)
        }
        ClassifierKind::LogisticRegression => {
            let params = LogisticRegressionParams::default();
            Classifier::LogisticRegression(LogisticRegression::fit(&x, &labels, n_features, &params)?)
        }
        ClassifierKind::NearestCentroid => {
            Classifier::NearestCentroid(NearestCentroid::fit(&x, &labels, n_features)?)
        }
    };
    tracing::info!("Fitted {}", options.classifier.display_name());

    Ok(TrainedArtifact { model, vectorizer })
}

/// Per-message outputs on the test split.
#[derive(Debug, Clone, PartialEq)]
pub struct TestPredictions {
    pub y_true: Vec<Label>,
    pub y_pred: Vec<Label>,
    /// Spam confidence per message, see ScoreCapability::score
    pub scores: Vec<f64>,
}

impl TestPredictions {
    pub fn confusion_matrix(&self) -> ConfusionMatrix {
        ConfusionMatrix::from_predictions(&self.y_true, &self.y_pred)
    }
}

/// Run the fitted artifact over the test split.
pub fn predict_split(artifact: &TrainedArtifact, test: &[LabeledMessage]) -> TestPredictions {
    let capability = artifact.model.capability();
    let mut out = TestPredictions {
        y_true: Vec::with_capacity(test.len()),
        y_pred: Vec::with_capacity(test.len()),
        scores: Vec::with_capacity(test.len()),
    };
    for message in test {
        let x = artifact.vectorizer.transform(&message.text);
        let label = artifact.model.predict(&x);
        out.y_true.push(message.label);
        out.y_pred.push(label);
        out.scores.push(capability.score(&artifact.model, &x, label));
    }
    out
}
