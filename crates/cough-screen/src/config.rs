//! Runtime configuration for a screening invocation
//!
//! Artifact paths default to the working directory (the host process sets
//! the cwd before spawning) and can be overridden via environment variables.
//! Diagnostic logging is configured at process entry in `main` — stdout is
//! reserved for the single result line, so all logging goes to stderr and
//! stays off unless `RUST_LOG` asks for it.

use std::env;
use std::path::PathBuf;

/// Default model artifact filename, relative to the working directory
pub const DEFAULT_MODEL_FILE: &str = "tb_multimodal_final.onnx";

/// Default scaler artifact filename, relative to the working directory
pub const DEFAULT_SCALER_FILE: &str = "age_scaler.json";

/// Environment variable overriding the model path
pub const MODEL_PATH_ENV: &str = "COUGH_SCREEN_MODEL";

/// Environment variable overriding the scaler path
pub const SCALER_PATH_ENV: &str = "COUGH_SCREEN_SCALER";

/// Resolved artifact locations for one invocation
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Serialized multi-input network (ONNX)
    pub model_path: PathBuf,
    /// Pre-fitted age standardization parameters (JSON)
    pub scaler_path: PathBuf,
}

impl ScreenConfig {
    /// Build a config from the environment, falling back to the defaults
    pub fn from_env() -> Self {
        Self {
            model_path: env::var_os(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_FILE)),
            scaler_path: env::var_os(SCALER_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SCALER_FILE)),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            scaler_path: PathBuf::from(DEFAULT_SCALER_FILE),
        }
    }
}
