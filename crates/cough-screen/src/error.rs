//! Screening error types
//!
//! Every variant renders to the single-line error report the host process
//! parses (see `report`). The message strings for artifacts, audio and
//! argument failures are part of the host protocol and must stay stable.

use thiserror::Error;

/// Errors that can occur during a screening request
#[derive(Error, Debug)]
pub enum ScreenError {
    /// A required on-disk artifact (model or scaler) is absent.
    /// `kind` is the artifact's display name ("Model" / "Scaler").
    #[error("{kind} '{path}' hilang!")]
    MissingArtifact { kind: &'static str, path: String },

    #[error("File audio rusak/tidak terbaca: {0}")]
    AudioDecode(String),

    #[error("Scaler tidak valid: {0}")]
    ScalerLoad(String),

    #[error("Model gagal dimuat: {0}")]
    ModelLoad(String),

    /// Model declares an input the binding table has no feature for.
    /// Rank counts non-batch dimensions only.
    #[error("Model input #{index} has unsupported rank {rank} (expected 1, 2 or 3)")]
    UnsupportedInputRank { index: usize, rank: usize },

    #[error("Feature extraction failed: {0}")]
    Feature(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, ScreenError>;
