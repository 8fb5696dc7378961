//! Two-stage inference
//!
//! The stacking protocol both domains share:
//! 1. scale the raw row with the fitted scaler (schema-checked)
//! 2. run the sequence model for one auxiliary scalar
//! 3. concatenate scaled row + scalar
//! 4. run the tree ensemble for the binary class
//!
//! Errors here are returned, not swallowed; the detect layer is the one
//! boundary that converts them into an Unknown verdict.

use std::time::Instant;

use ndarray::{Array2, Array3};
use ort::session::Session;
use ort::value::{Tensor, Value};

use super::bundle::ModelBundle;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone)]
pub enum InferenceError {
    /// Feature row shape/order does not match the fitted schema.
    SchemaMismatch { expected: usize, actual: usize },
    /// Model artifact problem (missing, unreadable, bad output shape).
    Model(String),
    /// Non-finite values reached the ensemble stage.
    Numeric(String),
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::SchemaMismatch { expected, actual } => {
                write!(f, "schema mismatch: model expects {} columns, got {}", expected, actual)
            }
            InferenceError::Model(msg) => write!(f, "model error: {}", msg),
            InferenceError::Numeric(msg) => write!(f, "numeric error: {}", msg),
        }
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// PREDICTION OUTPUT
// ============================================================================

/// One stacked prediction.
#[derive(Debug, Clone)]
pub struct Inference {
    /// Binary class from the tree ensemble (0 or 1).
    pub class: i64,
    /// Auxiliary scalar the sequence model contributed.
    pub aux_score: f32,
    pub inference_time_us: u64,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Anything that maps an ordered feature row to a stacked prediction.
/// The production impl is `ModelBundle`; tests substitute stubs.
pub trait Classifier: Send + Sync {
    fn predict(&self, layout: &[&str], row: &[f32]) -> Result<Inference, InferenceError>;
}

// ============================================================================
// ONNX TWO-STAGE IMPLEMENTATION
// ============================================================================

impl Classifier for ModelBundle {
    fn predict(&self, layout: &[&str], row: &[f32]) -> Result<Inference, InferenceError> {
        let start = Instant::now();

        // Stage 1: scale (this is where SchemaMismatch surfaces).
        let scaled = self.scaler.transform(layout, row)?;
        let n = scaled.len();

        // Stage 2: sequence model -> one auxiliary scalar.
        let sequence_input = Array3::<f32>::from_shape_vec((1, n, 1), scaled.clone())
            .map_err(|e| InferenceError::Model(format!("sequence input shape: {}", e)))?;
        let aux_score = {
            let mut session = self.sequence.lock();
            run_f32(&mut session, Value::from_array(sequence_input)
                .map_err(|e| InferenceError::Model(format!("sequence tensor: {}", e)))?)?
        };

        // Stage 3: concatenate scaled features with the auxiliary scalar.
        let mut combined = scaled;
        combined.push(aux_score);
        if combined.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::Numeric(
                "non-finite value in combined feature row".to_string(),
            ));
        }

        // Stage 4: tree ensemble -> binary class.
        let ensemble_input = Array2::<f32>::from_shape_vec((1, n + 1), combined)
            .map_err(|e| InferenceError::Model(format!("ensemble input shape: {}", e)))?;
        let class = {
            let mut session = self.ensemble.lock();
            run_class(&mut session, Value::from_array(ensemble_input)
                .map_err(|e| InferenceError::Model(format!("ensemble tensor: {}", e)))?)?
        };

        Ok(Inference {
            class,
            aux_score,
            inference_time_us: start.elapsed().as_micros() as u64,
        })
    }
}

/// Run a session and pull the first f32 of its first output.
fn run_f32(session: &mut Session, input: Tensor<f32>) -> Result<f32, InferenceError> {
    let output_name = session
        .outputs
        .first()
        .map(|o| o.name.clone())
        .ok_or_else(|| InferenceError::Model("no output defined".to_string()))?;

    let outputs = session
        .run(ort::inputs![input])
        .map_err(|e| InferenceError::Model(format!("inference failed: {}", e)))?;

    let output = outputs
        .get(&output_name)
        .ok_or_else(|| InferenceError::Model("no output".to_string()))?;

    let (_, data) = output
        .try_extract_tensor::<f32>()
        .map_err(|e| InferenceError::Model(format!("extract error: {}", e)))?;

    data.first()
        .copied()
        .ok_or_else(|| InferenceError::Model("empty output tensor".to_string()))
}

/// Run a session and pull the binary class of its first output.
///
/// sklearn-style converters emit an i64 label tensor; some graphs emit
/// f32 scores instead, thresholded here at 0.5.
fn run_class(session: &mut Session, input: Tensor<f32>) -> Result<i64, InferenceError> {
    let output_name = session
        .outputs
        .first()
        .map(|o| o.name.clone())
        .ok_or_else(|| InferenceError::Model("no output defined".to_string()))?;

    let outputs = session
        .run(ort::inputs![input])
        .map_err(|e| InferenceError::Model(format!("inference failed: {}", e)))?;

    let output = outputs
        .get(&output_name)
        .ok_or_else(|| InferenceError::Model("no output".to_string()))?;

    if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
        return data
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Model("empty label tensor".to_string()));
    }

    let (_, data) = output
        .try_extract_tensor::<f32>()
        .map_err(|e| InferenceError::Model(format!("extract error: {}", e)))?;
    let score = data
        .first()
        .copied()
        .ok_or_else(|| InferenceError::Model("empty score tensor".to_string()))?;
    Ok(if score >= 0.5 { 1 } else { 0 })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InferenceError::SchemaMismatch { expected: 24, actual: 23 };
        assert!(err.to_string().contains("24"));
        assert!(err.to_string().contains("23"));
    }
}
