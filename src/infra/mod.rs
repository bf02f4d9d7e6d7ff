// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting output concerns that don't belong to any
// business layer:
//
//   report.rs — renders the learning curve to PNG files
//               (shaded mean ± stddev line plot and a
//               per-bucket boxplot series) with plotters
//
// Nothing here computes statistics; it only draws what the
// trial runner already produced.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Learning-curve plot rendering
pub mod report;
