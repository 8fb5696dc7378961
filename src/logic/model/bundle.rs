//! Model artifact bundle
//!
//! One bundle per domain, loaded once at process start:
//! - `scaler.json`    fitted scaler params + fit-time column list
//! - `sequence.onnx`  sequence model (auxiliary scalar)
//! - `ensemble.onnx`  tree ensemble (binary class)
//!
//! Load failure is fatal to the caller: a process without its artifacts
//! cannot serve requests and must not pretend otherwise.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use ort::session::{builder::GraphOptimizationLevel, Session};

use super::scaler::StandardScaler;

pub const SCALER_FILE: &str = "scaler.json";
pub const SEQUENCE_FILE: &str = "sequence.onnx";
pub const ENSEMBLE_FILE: &str = "ensemble.onnx";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct ModelLoadError(pub String);

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelLoadError: {}", self.0)
    }
}

impl std::error::Error for ModelLoadError {}

// ============================================================================
// BUNDLE
// ============================================================================

/// Loaded artifacts for one domain. Sessions take `&mut` to run, so they
/// sit behind mutexes; the scaler params are plain read-only data.
#[derive(Debug)]
pub struct ModelBundle {
    pub scaler: StandardScaler,
    pub(crate) sequence: Mutex<Session>,
    pub(crate) ensemble: Mutex<Session>,
    pub dir: PathBuf,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelBundle {
    /// Load all three artifacts from a bundle directory.
    pub fn load(dir: &Path) -> Result<Self, ModelLoadError> {
        log::info!("Loading model bundle from {}", dir.display());

        let scaler_path = dir.join(SCALER_FILE);
        if !scaler_path.exists() {
            return Err(ModelLoadError(format!("missing {}", scaler_path.display())));
        }
        let scaler = StandardScaler::from_file(&scaler_path)
            .map_err(|e| ModelLoadError(e.to_string()))?;

        let sequence = load_session(&dir.join(SEQUENCE_FILE))?;
        let ensemble = load_session(&dir.join(ENSEMBLE_FILE))?;

        log::info!(
            "Model bundle loaded: {} columns, scaler + sequence + ensemble",
            scaler.n_columns()
        );

        Ok(Self {
            scaler,
            sequence: Mutex::new(sequence),
            ensemble: Mutex::new(ensemble),
            dir: dir.to_path_buf(),
            loaded_at: chrono::Utc::now(),
        })
    }
}

fn load_session(path: &Path) -> Result<Session, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError(format!("model not found: {}", path.display())));
    }
    Session::builder()
        .map_err(|e| ModelLoadError(format!("session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ModelLoadError(format!("optimization level: {}", e)))?
        .commit_from_file(path)
        .map_err(|e| ModelLoadError(format!("load {}: {}", path.display(), e)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_fails_on_missing_directory() {
        let err = ModelBundle::load(Path::new("/nonexistent/bundle")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_load_fails_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ModelBundle::load(dir.path()).is_err());
    }
}
