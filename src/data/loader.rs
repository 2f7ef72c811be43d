// ============================================================
// Layer 4: Dataset Loader
// ============================================================
// Reads the headerless SMS spam CSV using the csv crate.
//
// File format:
//   ham,Go until jurong point, crazy.. Available only in bugis
//   spam,"Free entry in 2 a wkly comp to win FA Cup final tkts"
//
//   - column 1 is the label ("ham" or "spam")
//   - column 2 is the message text
//   - there is no header row
//   - the file is Latin-1 encoded, so every byte maps to the
//     Unicode code point with the same value
//
// Some messages contain unquoted commas. Those rows have more
// than two fields; the extra fields are joined back into the
// text with ','.
//
// Rows with an empty label or text, and rows whose label is not
// one of the two classes, are dropped before training.
//
// Reference: csv crate documentation (ReaderBuilder, ByteRecord)
//            Rust Book §9 (Error Handling)

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::message::{Label, LabeledMessage};
use crate::domain::traits::{DatasetSource, LoadedDataset};

/// One CSV row before validation. `None` marks a missing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub label: Option<String>,
    pub text:  Option<String>,
}

/// Loads the labeled dataset from a CSV file on disk.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every row without validating labels.
    pub fn raw_rows(&self) -> Result<Vec<RawRow>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;
        parse_rows(file)
            .with_context(|| format!("Cannot parse dataset '{}'", self.path.display()))
    }

    /// Count rows per label value. Rows without a label are skipped.
    pub fn label_counts(&self) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for row in self.raw_rows()? {
            if let Some(label) = row.label {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

impl DatasetSource for CsvLoader {
    fn load_all(&self) -> Result<LoadedDataset> {
        let rows = self.raw_rows()?;
        let dataset = complete_rows(rows);

        tracing::info!(
            "Loaded {} complete rows from '{}' ({} dropped)",
            dataset.messages.len(),
            self.path.display(),
            dataset.dropped,
        );
        Ok(dataset)
    }
}

/// Parse headerless label,text CSV from any reader.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record {}", line + 1))?;

        let label = record.get(0).and_then(non_empty_field);
        let text = if record.len() > 1 {
            let joined = record.iter().skip(1).map(decode_latin1).collect::<Vec<_>>().join(",");
            (!joined.is_empty()).then_some(joined)
        } else {
            None
        };

        rows.push(RawRow { label, text });
    }
    Ok(rows)
}

/// Keep rows that have both fields and a known label.
pub fn complete_rows(rows: Vec<RawRow>) -> LoadedDataset {
    let mut dataset = LoadedDataset::default();
    let mut unknown = 0usize;

    for row in rows {
        match (row.label, row.text) {
            (Some(label), Some(text)) => match label.parse::<Label>() {
                Ok(label) => dataset.messages.push(LabeledMessage::new(text, label)),
                Err(e) => {
                    tracing::debug!("Dropping row: {e}");
                    unknown += 1;
                    dataset.dropped += 1;
                }
            },
            _ => dataset.dropped += 1,
        }
    }

    if unknown > 0 {
        tracing::warn!("Dropped {} rows with an unknown label", unknown);
    }
    dataset
}

/// Latin-1 maps each byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// An empty field counts as missing.
fn non_empty_field(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(decode_latin1(bytes))
    }
}
