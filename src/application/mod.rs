// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (measuring a learning curve, or inspecting a
// dataset before doing so).
//
// Rules for this layer:
//   - No model math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The learning-curve workflow (and its run configuration)
pub mod curve_use_case;

// The dataset inspection workflow
pub mod inspect_use_case;
