// ============================================================
// Layer 2: BundleUseCase
// ============================================================
// Copies the phase-2 artifact into the web models directory so
// the demo server finds it first.
//
//   source missing            → SourceArtifactMissing (exit 2),
//                               destination left untouched
//   mkdir or copy failure     → CopyFailed (exit 3)
//
// Running it twice gives the same result.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub source:      PathBuf,
    pub destination: PathBuf,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            source:      PathBuf::from("phase1/models/phase2_logreg.json"),
            destination: PathBuf::from("web/models/phase2_logreg.json"),
        }
    }
}

pub struct BundleUseCase {
    config: BundleConfig,
}

impl BundleUseCase {
    pub fn new(config: BundleConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let BundleConfig { source, destination } = &self.config;

        if !source.exists() {
            return Err(PipelineError::SourceArtifactMissing(source.clone()).into());
        }

        let copy_failed = |e: std::io::Error| PipelineError::CopyFailed {
            from:   source.clone(),
            to:     destination.clone(),
            source: e,
        };

        if let Some(dir) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(copy_failed)?;
        }
        let bytes = fs::copy(source, destination).map_err(copy_failed)?;

        tracing::debug!("Copied {bytes} bytes");
        println!("Copied {} -> {}", source.display(), destination.display());
        Ok(())
    }
}
