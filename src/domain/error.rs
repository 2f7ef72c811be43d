// ============================================================
// Layer 3: Pipeline Errors and Exit Codes
// ============================================================
// Batch commands fail fast and report a distinct exit status
// per failure class:
//
//   2  missing input (dataset, source artifact) or download failure
//   3  read-back failure after a download, or a failed copy
//   1  anything else
//
// Failures that need a specific status are PipelineError
// variants. Everything else stays an anyhow::Error and maps to 1.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The training CSV does not exist.
    #[error("Data file not found: {}", .0.display())]
    DatasetMissing(PathBuf),

    /// The remote dataset could not be downloaded or written.
    #[error("Failed to download dataset from {url}: {source}")]
    DownloadFailed {
        url:    String,
        #[source]
        source: anyhow::Error,
    },

    /// The downloaded file exists but could not be read back.
    #[error("Downloaded file present but failed to read/inspect {}: {source}", path.display())]
    InspectFailed {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundler's source artifact does not exist.
    #[error("Source model not found: {}", .0.display())]
    SourceArtifactMissing(PathBuf),

    /// The bundler could not create the destination or copy the file.
    #[error("Failed to copy model {} -> {}: {source}", from.display(), to.display())]
    CopyFailed {
        from:   PathBuf,
        to:     PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::DatasetMissing(_)        => 2,
            PipelineError::DownloadFailed { .. }    => 2,
            PipelineError::SourceArtifactMissing(_) => 2,
            PipelineError::InspectFailed { .. }     => 3,
            PipelineError::CopyFailed { .. }        => 3,
        }
    }
}

/// Map a top-level error to the process exit status.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
        .map(PipelineError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_dataset_missing_maps_to_two() {
        let err = anyhow::Error::new(PipelineError::DatasetMissing("x.csv".into()));
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn test_code_survives_added_context() {
        let inner: Result<(), PipelineError> = Err(PipelineError::CopyFailed {
            from:   "a".into(),
            to:     "b".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        });
        let err = inner.context("bundling").unwrap_err();
        assert_eq!(exit_code_for(&err), 3);
    }

    #[test]
    fn test_other_errors_map_to_one() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), 1);
    }
}
