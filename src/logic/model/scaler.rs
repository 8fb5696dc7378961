//! Fitted standard scaler
//!
//! Per-column mean/variance normalization parameters, loaded from the
//! bundle's `scaler.json`. The scaler is the schema gatekeeper: a row
//! whose width or column names disagree with what the models were fit
//! on is a hard `SchemaMismatch`, never a silently padded default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::InferenceError;

/// Fitted `(x - mean) / scale` parameters with the fit-time column list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    /// Load from a JSON params file and sanity-check the shapes.
    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InferenceError::Model(format!("read {}: {}", path.display(), e)))?;
        let scaler: StandardScaler = serde_json::from_str(&raw)
            .map_err(|e| InferenceError::Model(format!("parse {}: {}", path.display(), e)))?;
        if scaler.columns.len() != scaler.mean.len() || scaler.mean.len() != scaler.scale.len() {
            return Err(InferenceError::Model(format!(
                "inconsistent scaler params in {}: {} columns, {} means, {} scales",
                path.display(),
                scaler.columns.len(),
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        Ok(scaler)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Verify the caller's layout against the fit-time schema.
    pub fn check_schema(&self, layout: &[&str]) -> Result<(), InferenceError> {
        if layout.len() != self.columns.len() {
            return Err(InferenceError::SchemaMismatch {
                expected: self.columns.len(),
                actual: layout.len(),
            });
        }
        for (i, (fit, ours)) in self.columns.iter().zip(layout.iter()).enumerate() {
            if fit != ours {
                log::error!("scaler column {} is '{}', extractor produces '{}'", i, fit, ours);
                return Err(InferenceError::SchemaMismatch {
                    expected: self.columns.len(),
                    actual: layout.len(),
                });
            }
        }
        Ok(())
    }

    /// Scale one row. The row width must match the fit schema exactly.
    pub fn transform(&self, layout: &[&str], row: &[f32]) -> Result<Vec<f32>, InferenceError> {
        self.check_schema(layout)?;
        if row.len() != self.columns.len() {
            return Err(InferenceError::SchemaMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| {
                // sklearn stores scale_ == 1.0 for zero-variance columns.
                let scale = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / scale
            })
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler(columns: &[&str]) -> StandardScaler {
        StandardScaler {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            mean: vec![1.0; columns.len()],
            scale: vec![2.0; columns.len()],
        }
    }

    #[test]
    fn test_transform() {
        let s = scaler(&["a", "b"]);
        let out = s.transform(&["a", "b"], &[3.0, 1.0]).unwrap();
        assert_eq!(out, vec![1.0, 0.0]);
    }

    #[test]
    fn test_transform_rejects_short_row() {
        let s = scaler(&["a", "b", "c"]);
        let err = s.transform(&["a", "b", "c"], &[1.0, 2.0]).unwrap_err();
        match err {
            InferenceError::SchemaMismatch { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected SchemaMismatch, got {}", other),
        }
    }

    #[test]
    fn test_transform_rejects_renamed_column() {
        let s = scaler(&["a", "b"]);
        assert!(matches!(
            s.transform(&["a", "x"], &[1.0, 2.0]),
            Err(InferenceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_transform_rejects_wrong_layout_width() {
        let s = scaler(&["a", "b"]);
        assert!(matches!(
            s.transform(&["a"], &[1.0]),
            Err(InferenceError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_variance_column_passes_through() {
        let mut s = scaler(&["a"]);
        s.scale[0] = 0.0;
        let out = s.transform(&["a"], &[5.0]).unwrap();
        assert_eq!(out, vec![4.0]);
    }

    #[test]
    fn test_nan_input_stays_nan() {
        let s = scaler(&["a"]);
        let out = s.transform(&["a"], &[f32::NAN]).unwrap();
        assert!(out[0].is_nan());
    }
}
