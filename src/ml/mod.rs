// ============================================================
// Layer 5: ML / Model Layer
// ============================================================
// All feature extraction, model fitting and scoring lives
// here. No other layer knows how a model computes its output.
//
//   sparse.rs            sorted (index, value) feature rows
//   vectorizer.rs        TF-IDF fit/transform
//   linear_svc.rs        linfa-svm linear SVM (margin only)
//   logistic.rs          linfa-logistic regression (probabilities)
//   nearest_centroid.rs  label-only baseline
//   model.rs             Classifier enum, artifact shapes
//   trainer.rs           fit on train split, predict test split
//   evaluation.rs        accuracy/P/R/F1, ROC-AUC, PR-AUC
//   inferencer.rs        score free text with a loaded model

pub mod evaluation;
pub mod inferencer;
pub mod linear_svc;
pub mod logistic;
pub mod model;
pub mod nearest_centroid;
pub mod sparse;
pub mod trainer;
pub mod vectorizer;
