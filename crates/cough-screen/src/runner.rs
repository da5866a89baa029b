//! Request orchestration
//!
//! Sequences artifact loading, feature extraction, metadata vectorization,
//! binding, inference and the decision, and absorbs every failure into the
//! uniform error report. Nothing past this boundary may panic the process
//! or write to stdout — the host always receives a single parseable line.

use std::path::Path;

use crate::config::ScreenConfig;
use crate::decision::{self, PredictionResult};
use crate::error::{Result, ScreenError};
use crate::features;
use crate::metadata::{self, AgeScaler};
use crate::model::RiskModel;
use crate::report::Report;

/// Run one screening request, converting any failure into an error report
pub fn run(audio_path: &str, raw_age: &str, config: &ScreenConfig) -> Report {
    match screen(audio_path, raw_age, config) {
        Ok(result) => {
            log::info!(
                "Screening complete: p={:.4} -> {}",
                result.probability,
                result.category.label()
            );
            Report::success(&result)
        }
        Err(err) => {
            log::error!("Screening failed: {}", err);
            Report::failure(&err)
        }
    }
}

/// The fallible screening pipeline
fn screen(audio_path: &str, raw_age: &str, config: &ScreenConfig) -> Result<PredictionResult> {
    ensure_artifact(&config.model_path, "Model")?;
    ensure_artifact(&config.scaler_path, "Scaler")?;

    let mut model = RiskModel::load(&config.model_path)?;
    let scaler = AgeScaler::load(&config.scaler_path)?;

    let features = features::extract(Path::new(audio_path))?;

    let meta = metadata::vectorize(raw_age, &scaler);
    if meta.age_defaulted {
        log::warn!(
            "Age '{}' did not parse; default {} substituted",
            raw_age,
            metadata::DEFAULT_AGE
        );
    }

    let probability = model.predict(&features, &meta)?;
    Ok(decision::decide(probability))
}

/// Check that a required artifact exists before attempting to load it
fn ensure_artifact(path: &Path, kind: &'static str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ScreenError::MissingArtifact {
            kind,
            path: path.display().to_string(),
        })
    }
}
