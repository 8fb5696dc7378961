//! Model Module - Stacked Inference
//!
//! - `scaler`    - fitted normalization params + schema gate
//! - `bundle`    - artifact loading (fatal on failure)
//! - `inference` - the two-stage predict protocol

pub mod bundle;
pub mod inference;
pub mod scaler;

pub use bundle::{ModelBundle, ModelLoadError};
pub use inference::{Classifier, Inference, InferenceError};
pub use scaler::StandardScaler;
