// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The application layer talks to its data sources through
// these traits, so tests can swap the CSV file or the HTTP
// download for an in-memory implementation.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::message::LabeledMessage;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce labeled messages for training.
///
/// Implementations:
///   - CsvLoader → reads the headerless label,text CSV
pub trait DatasetSource {
    /// Load every complete example. Incomplete rows are dropped,
    /// never returned.
    fn load_all(&self) -> Result<LoadedDataset>;
}

/// Result of loading a dataset: the complete rows plus how
/// many raw rows were discarded on the way.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub messages: Vec<LabeledMessage>,
    pub dropped:  usize,
}

// ─── RemoteSource ─────────────────────────────────────────────────────────────
/// Anything that can retrieve the raw bytes behind a URL.
///
/// Implementations:
///   - HttpDownloader → blocking reqwest client
pub trait RemoteSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
