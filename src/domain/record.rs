// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One input example: a mapping from feature name to feature
// value, plus the boolean label we are trying to predict.
//
// Records are immutable once loaded. The feature map is a
// BTreeMap so iteration order is always sorted by key, which
// keeps vectorisation reproducible run to run.
//
// Feature values are "self-describing" JSON:
//   number          → numeric column      "len"        = 12.0
//   bool            → numeric column      "has_rhyme"  = 1.0
//   string          → one-hot column      "genre=ode"  = 1.0
//   array of string → one one-hot column per element
//
// Reference: serde documentation (untagged enums)

use std::collections::BTreeMap;

use serde::Deserialize;

/// A single feature value as it appears in the input file.
///
/// `#[serde(untagged)]` lets serde pick the variant from the
/// JSON type itself, so `3.5`, `true`, `"ode"` and `["a","b"]`
/// all deserialise without any wrapper object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Tags(Vec<String>),
}

/// A labelled example: named features and a boolean label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Feature name → value, sorted by name
    pub features: BTreeMap<String, FeatureValue>,

    /// The class to predict
    pub label: bool,
}

impl Record {
    /// Create a new Record.
    ///
    /// Example:
    ///   let rec = Record::new(features, true);
    pub fn new(features: BTreeMap<String, FeatureValue>, label: bool) -> Self {
        Self { features, label }
    }
}

impl FeatureValue {
    /// Expand this value into `(column name, numeric value)` pairs
    /// using dictionary-vectorisation naming rules.
    pub fn columns(&self, key: &str) -> Vec<(String, f64)> {
        match self {
            FeatureValue::Number(v) => vec![(key.to_string(), *v)],
            FeatureValue::Flag(b)   => vec![(key.to_string(), if *b { 1.0 } else { 0.0 })],
            FeatureValue::Text(s)   => vec![(format!("{key}={s}"), 1.0)],
            FeatureValue::Tags(ts)  => ts
                .iter()
                .map(|t| (format!("{key}={t}"), 1.0))
                .collect(),
        }
    }
}
