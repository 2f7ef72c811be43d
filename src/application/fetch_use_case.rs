// ============================================================
// Layer 2: FetchUseCase
// ============================================================
// Downloads the raw dataset and prints a quick sanity check:
//
//   Step 1: Create the output directory     (Layer 6 - infra)
//   Step 2: Download and write verbatim     (RemoteSource)
//   Step 3: Re-read, count non-empty lines, tally the label
//           before the first comma of each line
//
// Step 1 or 2 failing is DownloadFailed (exit 2). Step 3
// failing is InspectFailed (exit 3).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::traits::RemoteSource;
use crate::infra::checkpoint::ensure_parent_dir;

pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/PacktPublishing/Hands-On-Artificial-Intelligence-for-Cybersecurity/refs/heads/master/Chapter03/datasets/sms_spam_no_header.csv";

pub const DEFAULT_DATASET_PATH: &str = "data/sms_spam_no_header.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub url:    String,
    pub output: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url:    DEFAULT_DATASET_URL.to_string(),
            output: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

/// Line count and label histogram of a downloaded file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSummary {
    pub non_empty_lines: usize,
    /// (label, count) in first-seen order
    pub counts: Vec<(String, usize)>,
}

/// Tally the trimmed token before the first comma of each
/// non-empty line.
pub fn summarize_labels(content: &str) -> LabelSummary {
    let mut summary = LabelSummary::default();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        summary.non_empty_lines += 1;
        let label = line.split(',').next().unwrap_or_default().trim();
        match summary.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None         => summary.counts.push((label.to_string(), 1)),
        }
    }
    summary
}

pub struct FetchUseCase<S: RemoteSource> {
    config: FetchConfig,
    source: S,
}

impl<S: RemoteSource> FetchUseCase<S> {
    pub fn new(config: FetchConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn execute(&self) -> Result<LabelSummary> {
        let cfg = &self.config;
        println!("Downloading {} -> {}", cfg.url, cfg.output.display());

        // ── Steps 1-2: mkdir + download ───────────────────────────────────────
        self.download().map_err(|source| PipelineError::DownloadFailed {
            url: cfg.url.clone(),
            source,
        })?;

        // ── Step 3: sanity check ──────────────────────────────────────────────
        let summary = inspect(&cfg.output)?;
        println!(
            "Downloaded {} non-empty lines to {}",
            summary.non_empty_lines,
            cfg.output.display()
        );
        println!("Label distribution:");
        for (label, count) in &summary.counts {
            println!("  {label}: {count}");
        }
        Ok(summary)
    }

    fn download(&self) -> Result<()> {
        ensure_parent_dir(&self.config.output)?;
        let bytes = self.source.fetch(&self.config.url)?;
        fs::write(&self.config.output, &bytes)
            .with_context(|| format!("Cannot write '{}'", self.config.output.display()))?;
        tracing::info!("Wrote {} bytes to '{}'", bytes.len(), self.config.output.display());
        Ok(())
    }
}

fn inspect(path: &Path) -> Result<LabelSummary, PipelineError> {
    let bytes = fs::read(path).map_err(|source| PipelineError::InspectFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(summarize_labels(&String::from_utf8_lossy(&bytes)))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::exit_code_for;

    struct InMemory(&'static str);

    impl RemoteSource for InMemory {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct Offline;

    impl RemoteSource for Offline {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            anyhow::bail!("no route to {url}")
        }
    }

    fn config(dir: &Path) -> FetchConfig {
        FetchConfig { url: "http://example.invalid/sms.csv".into(), output: dir.join("data/sms.csv") }
    }

    #[test]
    fn test_summary_keeps_first_seen_order() {
        let s = summarize_labels("spam,win\nham,hi\n\n  \nspam,again\n ham ,x\n");
        assert_eq!(s.non_empty_lines, 4);
        assert_eq!(s.counts, vec![("spam".to_string(), 2), ("ham".to_string(), 2)]);
    }

    #[test]
    fn test_fetch_writes_file_verbatim() {
        let dir  = tempfile::tempdir().unwrap();
        let body = "ham,hello there\nspam,WIN now\n";
        let summary = FetchUseCase::new(config(dir.path()), InMemory(body)).execute().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("data/sms.csv")).unwrap(), body);
        assert_eq!(summary.non_empty_lines, 2);
    }

    #[test]
    fn test_download_failure_exits_two() {
        let dir = tempfile::tempdir().unwrap();
        let err = FetchUseCase::new(config(dir.path()), Offline).execute().unwrap_err();
        assert_eq!(exit_code_for(&err), 2);
    }

    #[test]
    fn test_inspect_failure_exits_three() {
        let dir = tempfile::tempdir().unwrap();
        let err = inspect(&dir.path().join("gone.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
