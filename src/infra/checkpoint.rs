// ============================================================
// Layer 6: Artifact Store
// ============================================================
// Saves and restores trained artifacts as JSON files.
//
// What gets saved per training run:
//   {"model": {...}, "vectorizer": {...}}
//
// Loading accepts that bundle shape and the older bare-model
// shape (a classifier without its vectorizer); see
// ml::model::ArtifactFile.
//
// File naming convention (defaults):
//   phase1/models/baseline_svm.json     ← train-baseline
//   phase1/models/phase2_logreg.json    ← train-phase2
//   web/models/phase2_logreg.json       ← bundle
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ml::model::{ArtifactFile, Classifier, TrainedArtifact};
use crate::ml::vectorizer::TfidfVectorizer;

/// Create the parent directory of `path`, like `mkdir -p`.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write the artifact, replacing any previous file.
pub fn save_artifact(path: &Path, artifact: &TrainedArtifact) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Cannot create artifact '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, artifact)
        .with_context(|| format!("Cannot serialise artifact to '{}'", path.display()))?;
    writer.flush()?;

    tracing::debug!("Saved artifact to '{}'", path.display());
    Ok(())
}

/// Read an artifact in either shape.
/// Returns the model and, for bundles, its vectorizer.
pub fn load_artifact(path: &Path) -> Result<(Classifier, Option<TfidfVectorizer>)> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open artifact '{}'", path.display()))?;
    let parsed: ArtifactFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("'{}' is not a model artifact", path.display()))?;

    let (model, vectorizer) = parsed.into_parts();
    if vectorizer.is_none() {
        tracing::warn!(
            "'{}' holds a bare {} without a vectorizer",
            path.display(),
            model.kind().display_name(),
        );
    }
    Ok((model, vectorizer))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocessor::Preprocessor;
    use crate::ml::linear_svc::LinearSvc;

    fn artifact() -> TrainedArtifact {
        TrainedArtifact {
            model:      Classifier::LinearSvc(LinearSvc { weights: vec![0.5, -0.5], bias: 0.1 }),
            vectorizer: TfidfVectorizer::fit(&["win cash", "see you"], 10, Preprocessor::keep_stop_words())
                .unwrap(),
        }
    }

    #[test]
    fn test_save_creates_directories_and_loads_back() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/models/a.json");
        save_artifact(&path, &artifact()).unwrap();

        let (model, vectorizer) = load_artifact(&path).unwrap();
        assert_eq!(model, artifact().model);
        assert_eq!(vectorizer, Some(artifact().vectorizer));
    }

    #[test]
    fn test_bare_model_file_has_no_vectorizer() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.json");
        fs::write(&path, serde_json::to_string(&artifact().model).unwrap()).unwrap();

        let (_, vectorizer) = load_artifact(&path).unwrap();
        assert!(vectorizer.is_none());
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.json");
        fs::write(&path, "{\"hello\": 1}").unwrap();
        assert!(load_artifact(&path).is_err());
    }
}
