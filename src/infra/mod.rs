// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// File and network concerns shared by several use cases:
//
//   checkpoint.rs  saving and loading model artifacts (JSON)
//   metrics.rs     per-run metrics report and comparison text
//   downloader.rs  blocking HTTP fetch of the dataset
//   optional.rs    reads that may fail without failing the run
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod checkpoint;

/// HTTP dataset download
pub mod downloader;

/// Metrics JSON report
pub mod metrics;

/// Soft-failing reads
pub mod optional;
