// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// One use case per pipeline stage. Each owns a serialisable
// config, calls into the data, ml and infra layers, and prints
// operator-facing results. No ML math here.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Dataset download + sanity check
pub mod fetch_use_case;

// Baseline and phase-2 training runs
pub mod train_use_case;

// Copy an artifact into the web models directory
pub mod bundle_use_case;

// Model resolution and scoring for the demo
pub mod demo_use_case;
