//! Logic Module - Extraction & Inference Engines
//!
//! - `features/` - URL and email feature extraction
//! - `model/`    - Stacked-model inference (scaler, ONNX sessions)
//! - `detect/`   - Verdicts, report assembly, orchestration
//! - `fetch`     - Page fetcher collaborator
//! - `store`     - Result sink collaborator
//! - `context`   - Explicit dependency container

pub mod context;
pub mod detect;
pub mod features;
pub mod fetch;
pub mod model;
pub mod store;
