// ============================================================
// Layer 5: Inferencer
// ============================================================
// Scores free text with a loaded model.
//
// The scoring path is chosen once, when the Inferencer is
// built, from the classifier's ScoreCapability:
//
//   Probability    → P(spam | x) from the model
//   DecisionScore  → sigmoid(margin), a display-only
//                    pseudo-probability in (0, 1)
//   LabelOnly      → the predicted label as 0.0 / 1.0
//
// The hard label always comes from the model's own predict.
//
// A bare-model artifact has no vectorizer. Raw text cannot be
// fed to a linear model, so scoring returns
// ScoringError::MissingVectorizer instead of guessing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::message::Label;
use crate::ml::model::{Classifier, ScoreCapability};
use crate::ml::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("the loaded model has no vectorizer, so raw text cannot be scored")]
    MissingVectorizer,
}

/// Label plus the confidence shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label:       Label,
    pub probability: f64,
}

impl Prediction {
    /// "spam" or "ham"
    pub fn label_str(&self) -> &'static str {
        self.label.as_str()
    }
}

pub struct Inferencer {
    model:      Classifier,
    vectorizer: Option<TfidfVectorizer>,
    capability: ScoreCapability,
}

impl Inferencer {
    pub fn new(model: Classifier, vectorizer: Option<TfidfVectorizer>) -> Self {
        let capability = model.capability();
        tracing::debug!(
            "Inferencer ready: {} ({:?}, vectorizer: {})",
            model.kind().display_name(),
            capability,
            vectorizer.is_some(),
        );
        Self { model, vectorizer, capability }
    }

    pub fn capability(&self) -> ScoreCapability {
        self.capability
    }

    /// Classify one message and return its label and confidence.
    pub fn predict_text(&self, text: &str) -> Result<Prediction, ScoringError> {
        let vectorizer = self.vectorizer.as_ref().ok_or(ScoringError::MissingVectorizer)?;
        let x = vectorizer.transform(text);

        let label       = self.model.predict(&x);
        let probability = self.capability.score(&self.model, &x, label);
        Ok(Prediction { label, probability })
    }
}
