//! Cough-Screen — TB risk screening from cough audio + age
//!
//! Single-shot inference component invoked once per request by the host
//! process. The pipeline:
//!
//! 1. **Audio** (`audio`): decode, resample to 22 050 Hz, normalize to 5 s.
//! 2. **Features** (`features`): log-mel spectrogram `(1,128,63,1)` and MFCC
//!    sequence `(1,63,42)` tensors.
//! 3. **Metadata** (`metadata`): standardized age in a zero-padded vector.
//! 4. **Binding** (`binder`): rank-based plan against the model's declared
//!    input shapes, resolved once at load.
//! 5. **Inference** (`model`): multi-input ONNX network via ort.
//! 6. **Decision** (`decision`): threshold ladder into a risk category.
//! 7. **Report** (`report`): one JSON line on stdout, success or error.
//!
//! The orchestrator (`runner`) absorbs every failure into the error report;
//! the host never sees a crash.

pub mod audio;
pub mod binder;
pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod metadata;
pub mod model;
pub mod report;
pub mod runner;

pub use config::ScreenConfig;
pub use error::{Result, ScreenError};
pub use report::Report;
