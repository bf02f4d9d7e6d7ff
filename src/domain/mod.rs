// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits that name the concepts of
// a learning-curve experiment:
//
//   Record         — one labelled example straight off disk
//   Partition      — a named row subset (train / validation / test)
//   LearningCurve  — per-bucket accuracy lists and their aggregates
//
// Rules for this layer:
//   - NO file I/O
//   - NO plotting
//   - NO concrete classifier code (only the traits they implement)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One loaded example: feature mapping + boolean label
pub mod record;

// Train / validation / test partitions of the feature matrix
pub mod partition;

// Trial scores and their per-bucket aggregates
pub mod curve;

// Core abstractions (traits) that other layers implement
pub mod traits;
