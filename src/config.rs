//! Scoring configuration
//!
//! Loaded from a JSON file or from environment variables, with defaults for
//! the common case: samples on rows, features on columns, log-transformed scores.

use crate::matrix::LabeledMatrix;
use crate::significance::{apply_fishers, apply_fishers_parallel, FisherScores};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a count matrix should be scored
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Axis holding samples (0 = rows, 1 = columns)
    pub sample_axis: usize,
    /// Axis holding features
    pub feature_axis: usize,
    /// Signed log10 scores instead of raw p-values
    pub logtransform: bool,
    /// CSV/DataFrame column holding row labels
    pub index_column: String,
    /// Score rows with Rayon
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sample_axis: 0,
            feature_axis: 1,
            logtransform: true,
            index_column: "label".to_string(),
            parallel: false,
        }
    }
}

impl ScoringConfig {
    /// Load configuration from a JSON file (missing fields take defaults)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scoring config JSON: {:?}", path))
    }

    /// Defaults overridden by `SAMPLE_AXIS`, `FEATURE_AXIS`, `LOGTRANSFORM`,
    /// `INDEX_COLUMN` and `PARALLEL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SAMPLE_AXIS") {
            config.sample_axis = value
                .parse()
                .with_context(|| format!("SAMPLE_AXIS is not an axis number: {}", value))?;
        }
        if let Some(value) = lookup("FEATURE_AXIS") {
            config.feature_axis = value
                .parse()
                .with_context(|| format!("FEATURE_AXIS is not an axis number: {}", value))?;
        }
        if let Some(value) = lookup("LOGTRANSFORM") {
            config.logtransform = parse_flag(&value)
                .with_context(|| format!("LOGTRANSFORM is not a boolean: {}", value))?;
        }
        if let Some(value) = lookup("INDEX_COLUMN") {
            config.index_column = value;
        }
        if let Some(value) = lookup("PARALLEL") {
            config.parallel = parse_flag(&value)
                .with_context(|| format!("PARALLEL is not a boolean: {}", value))?;
        }

        Ok(config)
    }

    /// Score `matrix` with this configuration
    pub fn score(&self, matrix: &LabeledMatrix) -> Result<FisherScores> {
        let scores = if self.parallel {
            apply_fishers_parallel(matrix, self.sample_axis, self.feature_axis, self.logtransform)?
        } else {
            apply_fishers(matrix, self.sample_axis, self.feature_axis, self.logtransform)?
        };
        Ok(scores)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("Unrecognized flag value '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!((config.sample_axis, config.feature_axis), (0, 1));
        assert!(config.logtransform);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"sample_axis": 1, "feature_axis": 0}"#).unwrap();
        assert_eq!(config.sample_axis, 1);
        assert_eq!(config.feature_axis, 0);
        assert_eq!(config.index_column, "label");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SAMPLE_AXIS", "1"),
            ("FEATURE_AXIS", "0"),
            ("LOGTRANSFORM", "false"),
            ("PARALLEL", "yes"),
        ]
        .into_iter()
        .collect();

        let config = ScoringConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.sample_axis, 1);
        assert_eq!(config.feature_axis, 0);
        assert!(!config.logtransform);
        assert!(config.parallel);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let result = ScoringConfig::from_lookup(|key| {
            (key == "LOGTRANSFORM").then(|| "maybe".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_score_rejects_invalid_axes() {
        let matrix = LabeledMatrix::from_rows(&["w1"], &["f1"], &[&[1.0]]).unwrap();
        let config = ScoringConfig {
            feature_axis: 0,
            ..ScoringConfig::default()
        };
        assert!(config.score(&matrix).is_err());
    }
}
