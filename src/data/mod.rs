// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw .jsonl file and the scaled
// partitions the trial runner samples from:
//
//   poetry_id.jsonl
//       │
//       ▼
//   JsonlLoader       → Vec<Record>  (features + label)
//       │
//       ▼
//   DictVectorizer    → dense Array2<f64>, sorted columns
//       │
//       ▼
//   split_three_way   → train / validation / test partitions
//       │
//       ▼
//   StandardScaler    → fitted on train, applied to all three
//
// Each module is responsible for exactly one step.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads labelled records from newline-delimited JSON
pub mod loader;

/// Converts feature mappings into a fixed-column matrix
pub mod vectorizer;

/// Seeded train / validation / test splitting
pub mod splitter;

/// Zero-mean / unit-variance column scaling
pub mod scaler;
