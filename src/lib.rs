// ============================================================
// sms-spam-lab: crate root
// ============================================================
// The pipeline is split into layers, outermost first:
//
//   cli/          Layer 1: argument parsing and dispatch
//   web/          Layer 1: the demo page served over HTTP
//   application/  Layer 2: one use case per pipeline stage
//   domain/       Layer 3: labels, messages, errors, traits
//   data/         Layer 4: CSV loading, tokenising, splitting
//   ml/           Layer 5: TF-IDF, linear models, evaluation
//   infra/        Layer 6: artifact/metrics files, HTTP download
//
// Reference: Rust Book §7 (Packages, Crates, and Modules)

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
pub mod web;
