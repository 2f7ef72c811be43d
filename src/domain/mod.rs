// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust types that define what the pipeline works on:
// labels, labeled messages, the error taxonomy, and the traits
// other layers implement.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO model code
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Exit-code carrying pipeline errors
pub mod error;

// Label enum and the labeled message type
pub mod message;

// Core abstractions (traits) that other layers implement
pub mod traits;
