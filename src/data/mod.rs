// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between the raw CSV file and the lists of
// messages the ML layer consumes:
//
//   sms_spam_no_header.csv
//       │
//       ▼
//   CsvLoader          → reads rows, drops incomplete ones
//       │
//       ▼
//   stratified_split   → seeded, class-balanced train/test split
//       │
//       ▼
//   Preprocessor       → lowercase terms without stop words
//                        (called by the TF-IDF vectorizer)
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads the headerless label,text CSV
pub mod loader;

/// Tokenises message text into terms
pub mod preprocessor;

/// Seeded stratified train/test split
pub mod splitter;

/// English stop-word list
pub mod stop_words;
