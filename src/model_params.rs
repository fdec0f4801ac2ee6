//! RMI model-parameter artifact loader
//!
//! Model parameters are trained offline and handed to the library as a
//! small self-describing text document:
//!
//! ```text
//! branch_factor: 4
//! stage1: { slope: 0.0001, intercept: -2.5 }
//! stage2: [
//!   { slope: 0.01, intercept: 0.0, min_error: -3, max_error: 5 },
//! ]
//! ```
//!
//! The parser is line-oriented, keyed on the `branch_factor` / `stage1` /
//! `stage2` section markers, and tolerant of surrounding whitespace and
//! trailing commas. Field names are case-sensitive.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Stage-1 linear model mapping a key to a stage-2 sub-model index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageOneModel {
    pub slope: f64,
    pub intercept: f64,
}

/// Stage-2 linear model with the signed residual bounds observed on the
/// training keys (`min_error <= 0 <= max_error`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTwoModel {
    pub slope: f64,
    pub intercept: f64,
    pub min_error: i64,
    pub max_error: i64,
}

/// Fully parsed artifact contents.
#[derive(Debug, Clone, PartialEq)]
pub struct RmiParams {
    pub branch_factor: usize,
    pub stage1: StageOneModel,
    pub stage2: Vec<StageTwoModel>,
}

/// Read and parse an artifact file.
pub fn load_params(path: impl AsRef<Path>) -> Result<RmiParams> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let params = parse_params(&text)?;
    info!(
        branch_factor = params.branch_factor,
        path = %path.display(),
        "loaded RMI model parameters"
    );
    Ok(params)
}

/// Parse artifact text into `RmiParams`.
pub fn parse_params(text: &str) -> Result<RmiParams> {
    let mut branch_factor: Option<usize> = None;
    let mut stage1: Option<StageOneModel> = None;
    let mut stage2: Option<Vec<StageTwoModel>> = None;
    let mut in_stage2 = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if in_stage2 {
            if line.starts_with('{') {
                let fields = parse_record(line, line_no)?;
                let entry = StageTwoModel {
                    slope: take_f64(&fields, "slope", line_no)?,
                    intercept: take_f64(&fields, "intercept", line_no)?,
                    min_error: take_i64(&fields, "min_error", line_no)?,
                    max_error: take_i64(&fields, "max_error", line_no)?,
                };
                stage2
                    .as_mut()
                    .expect("stage2 vector exists while inside the section")
                    .push(entry);
            } else if line.trim_end_matches(',').trim() == "]" {
                in_stage2 = false;
            } else {
                return Err(malformed(line_no, "expected a stage2 record or `]`"));
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("branch_factor") {
            let value = section_body(rest, line_no)?.trim_end_matches(',').trim();
            let parsed = value
                .parse()
                .map_err(|_| malformed(line_no, "branch_factor is not an integer"))?;
            branch_factor = Some(parsed);
        } else if let Some(rest) = line.strip_prefix("stage1") {
            let body = section_body(rest, line_no)?;
            let fields = parse_record(body, line_no)?;
            stage1 = Some(StageOneModel {
                slope: take_f64(&fields, "slope", line_no)?,
                intercept: take_f64(&fields, "intercept", line_no)?,
            });
        } else if let Some(rest) = line.strip_prefix("stage2") {
            let body = section_body(rest, line_no)?;
            if body == "[]" {
                stage2 = Some(Vec::new());
            } else if body == "[" {
                stage2 = Some(Vec::new());
                in_stage2 = true;
            } else {
                return Err(malformed(line_no, "expected `[` to open the stage2 array"));
            }
        } else {
            return Err(malformed(line_no, "unrecognized line"));
        }
    }

    if in_stage2 {
        return Err(Error::ArtifactSchema("unterminated stage2 array".into()));
    }
    let branch_factor =
        branch_factor.ok_or_else(|| Error::ArtifactSchema("missing branch_factor".into()))?;
    let stage1 = stage1.ok_or_else(|| Error::ArtifactSchema("missing stage1 record".into()))?;
    let stage2 = stage2.ok_or_else(|| Error::ArtifactSchema("missing stage2 section".into()))?;

    if branch_factor == 0 {
        return Err(Error::ArtifactSchema("branch_factor must be at least 1".into()));
    }
    if stage2.len() != branch_factor {
        return Err(Error::ArtifactSchema(format!(
            "expected {} stage2 records, found {}",
            branch_factor,
            stage2.len()
        )));
    }
    for (i, model) in stage2.iter().enumerate() {
        if model.min_error > 0 || model.max_error < 0 {
            return Err(Error::ArtifactSchema(format!(
                "stage2 record {i} violates min_error <= 0 <= max_error"
            )));
        }
    }

    Ok(RmiParams {
        branch_factor,
        stage1,
        stage2,
    })
}

/// Everything after a section marker's `:`.
fn section_body(rest: &str, line_no: usize) -> Result<&str> {
    rest.trim_start()
        .strip_prefix(':')
        .map(str::trim)
        .ok_or_else(|| malformed(line_no, "expected `:` after section name"))
}

/// Split a `{ name: value, ... }` record into its fields.
fn parse_record(text: &str, line_no: usize) -> Result<Vec<(String, String)>> {
    let body = text.trim().trim_end_matches(',').trim();
    let body = body
        .strip_prefix('{')
        .and_then(|b| b.strip_suffix('}'))
        .ok_or_else(|| malformed(line_no, "record is not brace-delimited"))?;

    let mut fields = Vec::new();
    for piece in body.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            // trailing comma inside the record
            continue;
        }
        let (name, value) = piece
            .split_once(':')
            .ok_or_else(|| malformed(line_no, "field is not `name: value`"))?;
        fields.push((name.trim().to_string(), value.trim().to_string()));
    }
    Ok(fields)
}

fn take_f64(fields: &[(String, String)], name: &str, line_no: usize) -> Result<f64> {
    let (_, value) = fields
        .iter()
        .find(|(n, _)| n == name)
        .ok_or_else(|| malformed(line_no, &format!("missing field `{name}`")))?;
    value
        .parse()
        .map_err(|_| malformed(line_no, &format!("field `{name}` is not a number")))
}

fn take_i64(fields: &[(String, String)], name: &str, line_no: usize) -> Result<i64> {
    let (_, value) = fields
        .iter()
        .find(|(n, _)| n == name)
        .ok_or_else(|| malformed(line_no, &format!("missing field `{name}`")))?;
    value
        .parse()
        .map_err(|_| malformed(line_no, &format!("field `{name}` is not an integer")))
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::ArtifactFormat {
        line,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
branch_factor: 2
stage1: { slope: 0.5, intercept: -1.25 }
stage2: [
  { slope: 0.1, intercept: 0.0, min_error: -3, max_error: 5 },
  { slope: 0.2, intercept: 10.5, min_error: 0, max_error: 0 },
]
";

    #[test]
    fn test_parse_well_formed_artifact() {
        let params = parse_params(GOOD).unwrap();
        assert_eq!(params.branch_factor, 2);
        assert_eq!(params.stage1.slope, 0.5);
        assert_eq!(params.stage1.intercept, -1.25);
        assert_eq!(params.stage2.len(), 2);
        assert_eq!(params.stage2[0].min_error, -3);
        assert_eq!(params.stage2[1].intercept, 10.5);
    }

    #[test]
    fn test_tolerates_whitespace_and_trailing_commas() {
        let text = "
  branch_factor:   1  ,

  stage1:   {  slope:0.25 ,intercept: 2.0 , }
  stage2: [
      {slope: 1.0,intercept: 0.0, min_error: 0, max_error: 2,} ,
  ]
";
        let params = parse_params(text).unwrap();
        assert_eq!(params.branch_factor, 1);
        assert_eq!(params.stage1.slope, 0.25);
        assert_eq!(params.stage2[0].max_error, 2);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let text = "\
branch_factor: 1
stage1: { slope: 0.5 }
stage2: [
  { slope: 0.1, intercept: 0.0, min_error: 0, max_error: 0 },
]
";
        let err = parse_params(text).unwrap_err();
        assert!(matches!(err, Error::ArtifactFormat { line: 2, .. }));
    }

    #[test]
    fn test_record_count_must_match_branch_factor() {
        let text = "\
branch_factor: 3
stage1: { slope: 0.5, intercept: 0.0 }
stage2: [
  { slope: 0.1, intercept: 0.0, min_error: 0, max_error: 0 },
]
";
        let err = parse_params(text).unwrap_err();
        assert!(matches!(err, Error::ArtifactSchema(_)));
    }

    #[test]
    fn test_error_bounds_must_straddle_zero() {
        let text = "\
branch_factor: 1
stage1: { slope: 0.5, intercept: 0.0 }
stage2: [
  { slope: 0.1, intercept: 0.0, min_error: 2, max_error: 5 },
]
";
        let err = parse_params(text).unwrap_err();
        assert!(matches!(err, Error::ArtifactSchema(_)));
    }

    #[test]
    fn test_unterminated_stage2_array() {
        let text = "\
branch_factor: 1
stage1: { slope: 0.5, intercept: 0.0 }
stage2: [
  { slope: 0.1, intercept: 0.0, min_error: 0, max_error: 0 },
";
        let err = parse_params(text).unwrap_err();
        assert!(matches!(err, Error::ArtifactSchema(_)));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = load_params("/nonexistent/rmi-params.txt").unwrap_err();
        assert!(matches!(err, Error::ArtifactIo(_)));
    }

    #[test]
    fn test_load_from_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.txt");
        std::fs::write(&path, GOOD).unwrap();
        let params = load_params(&path).unwrap();
        assert_eq!(params.branch_factor, 2);
    }
}
