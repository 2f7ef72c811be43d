// ============================================================
// Layer 5: TF-IDF Vectorizer
// ============================================================
// Maps a message to a fixed-length, L2-normalised vector of
// term-frequency × inverse-document-frequency weights.
//
// Fitting (training text only, so the test split never leaks
// into the vocabulary):
//   1. Tokenise every document with the Preprocessor
//   2. Count each term over the corpus and per document
//   3. Keep the `max_features` most frequent terms
//      (ties broken alphabetically), then index them
//      alphabetically
//   4. idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1
//
// Transforming:
//   tf-idf(t, d) = count(t, d) * idf(t), unknown terms ignored,
//   then the row is scaled to unit length.
//
// Reference: Manning, Raghavan & Schütze (2008) §6.2 tf-idf weighting

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::preprocessor::Preprocessor;
use crate::ml::sparse::SparseVector;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features:      usize,
    remove_stop_words: bool,
    /// term → column index
    vocabulary:        BTreeMap<String, usize>,
    /// idf weight per column
    idf:               Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf weights on `documents`.
    pub fn fit<S: AsRef<str>>(
        documents:    &[S],
        max_features: usize,
        preprocessor: Preprocessor,
    ) -> Result<Self> {
        if max_features == 0 {
            bail!("max_features must be at least 1");
        }

        // ── Step 1: Corpus and document frequencies ───────────────────────────
        let mut corpus_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq:    HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = preprocessor.tokenize(doc.as_ref());
            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                *corpus_freq.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        if corpus_freq.is_empty() {
            bail!("empty vocabulary; the training documents contain only stop words or no terms");
        }

        // ── Step 2: Keep the most frequent terms ──────────────────────────────
        let mut terms: Vec<(String, usize)> = corpus_freq.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(max_features);

        // ── Step 3: Alphabetical column order ─────────────────────────────────
        let mut kept: Vec<String> = terms.into_iter().map(|(t, _)| t).collect();
        kept.sort();

        let n_docs = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf        = Vec::with_capacity(kept.len());
        for (index, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        tracing::debug!("TF-IDF vocabulary: {} terms from {} documents", idf.len(), documents.len());

        Ok(Self {
            max_features,
            remove_stop_words: preprocessor.removes_stop_words(),
            vocabulary,
            idf,
        })
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    fn preprocessor(&self) -> Preprocessor {
        if self.remove_stop_words {
            Preprocessor::new()
        } else {
            Preprocessor::keep_stop_words()
        }
    }

    /// Vectorise one message.
    pub fn transform(&self, text: &str) -> SparseVector {
        let pairs: Vec<(usize, f64)> = self
            .preprocessor()
            .tokenize(text)
            .iter()
            .filter_map(|t| self.vocabulary.get(t).map(|&i| (i, self.idf[i])))
            .collect();

        // from_pairs sums repeated terms: count(t, d) * idf(t)
        let mut row = SparseVector::from_pairs(pairs);
        row.l2_normalize();
        row
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }
}
