// ============================================================
// Layer 4 — JSON Lines Loader
// ============================================================
// Loads labelled records from a newline-delimited JSON file.
//
// Each non-blank line is one self-describing object:
//
//   {"features": {"words": 112, "genre": "ode", ...}, "poetry": true, ...}
//
//   features  → BTreeMap<String, FeatureValue>   (field name configurable)
//   poetry    → bool label                       (field name configurable)
//
// Any other top-level fields are ignored.
//
// Failure policy: the loader is all-or-nothing. A missing file,
// an unreadable line, invalid JSON, a missing field or a label
// that isn't a boolean aborts the whole load with the line
// number in the error. Blank lines are skipped.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::domain::record::{FeatureValue, Record};
use crate::domain::traits::RecordSource;

/// Reads records from a `.jsonl` file.
/// Implements the RecordSource trait from Layer 3.
pub struct JsonlLoader {
    path:           PathBuf,
    features_field: String,
    label_field:    String,
}

impl JsonlLoader {
    /// Create a loader for `path` using the given field names.
    pub fn new(
        path:           impl Into<PathBuf>,
        features_field: impl Into<String>,
        label_field:    impl Into<String>,
    ) -> Self {
        Self {
            path:           path.into(),
            features_field: features_field.into(),
            label_field:    label_field.into(),
        }
    }

    /// Parse one line of JSON into a Record.
    fn parse_line(&self, line: &str) -> Result<Record> {
        let mut info: Value = serde_json::from_str(line).context("invalid JSON")?;

        let label = info
            .get(&self.label_field)
            .ok_or_else(|| anyhow!("missing label field '{}'", self.label_field))?
            .as_bool()
            .ok_or_else(|| anyhow!("label field '{}' is not a boolean", self.label_field))?;

        let features = info
            .get_mut(&self.features_field)
            .map(Value::take)
            .ok_or_else(|| anyhow!("missing features field '{}'", self.features_field))?;

        let features: BTreeMap<String, FeatureValue> = serde_json::from_value(features)
            .with_context(|| {
                format!(
                    "features field '{}' must map names to numbers, booleans, strings or string arrays",
                    self.features_field
                )
            })?;

        Ok(Record::new(features, label))
    }
}

impl RecordSource for JsonlLoader {
    fn load_all(&self) -> Result<Vec<Record>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let mut records = Vec::new();

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context(|| {
                format!("Cannot read line {} of '{}'", line_no, self.path.display())
            })?;

            if line.trim().is_empty() {
                tracing::debug!("Skipping blank line {}", line_no);
                continue;
            }

            let record = self.parse_line(&line).with_context(|| {
                format!("Malformed record on line {} of '{}'", line_no, self.path.display())
            })?;
            records.push(record);
        }

        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for l in lines {
            writeln!(f, "{l}").unwrap();
        }
        f
    }

    fn loader(f: &tempfile::NamedTempFile) -> JsonlLoader {
        JsonlLoader::new(f.path(), "features", "poetry")
    }

    #[test]
    fn test_loads_records_in_file_order() {
        let f = write_lines(&[
            r#"{"features": {"words": 10, "genre": "ode"}, "poetry": true, "id": "a"}"#,
            r#"{"features": {"words": 300}, "poetry": false}"#,
        ]);
        let recs = loader(&f).load_all().unwrap();

        assert_eq!(recs.len(), 2);
        assert!(recs[0].label);
        assert!(!recs[1].label);
        assert_eq!(recs[0].features["words"], FeatureValue::Number(10.0));
        assert_eq!(recs[0].features.len(), 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let f = write_lines(&[
            r#"{"features": {}, "poetry": true}"#,
            "",
            "   ",
            r#"{"features": {}, "poetry": false}"#,
        ]);
        assert_eq!(loader(&f).load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let l   = JsonlLoader::new("/definitely/not/here.jsonl", "features", "poetry");
        let err = l.load_all().unwrap_err();
        assert!(format!("{err:#}").contains("not/here.jsonl"));
    }

    #[test]
    fn test_invalid_json_reports_line_number() {
        let f = write_lines(&[
            r#"{"features": {}, "poetry": true}"#,
            "{not json",
        ]);
        let err = loader(&f).load_all().unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_non_boolean_label_is_fatal() {
        let f = write_lines(&[r#"{"features": {}, "poetry": "yes"}"#]);
        assert!(loader(&f).load_all().is_err());
    }

    #[test]
    fn test_nested_feature_object_is_fatal() {
        let f = write_lines(&[r#"{"features": {"a": {"b": 1}}, "poetry": true}"#]);
        assert!(loader(&f).load_all().is_err());
    }

    #[test]
    fn test_custom_field_names() {
        let f = write_lines(&[r#"{"x": {"n": 1.5}, "is_spam": false}"#]);
        let recs = JsonlLoader::new(f.path(), "x", "is_spam").load_all().unwrap();
        assert_eq!(recs.len(), 1);
        assert!(!recs[0].label);
    }
}
