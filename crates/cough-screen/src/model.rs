//! ONNX model wrapper
//!
//! Loads the multi-input network with ort (ONNX Runtime), resolves the
//! binding plan from the session's declared input shapes, and runs a single
//! inference. The session is inference-only and created fresh per
//! invocation — no cross-request caching.

use std::path::Path;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::ValueType;

use crate::binder::{BindingPlan, InputSpec};
use crate::error::{Result, ScreenError};
use crate::features::AudioFeatures;
use crate::metadata::MetadataVector;

/// A loaded risk model with its resolved input binding plan
#[derive(Debug)]
pub struct RiskModel {
    session: Session,
    plan: BindingPlan,
}

impl RiskModel {
    /// Load the model and resolve its binding plan
    pub fn load(path: &Path) -> Result<Self> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(1))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| ScreenError::ModelLoad(e.to_string()))?;

        let specs = declared_inputs(&session);
        log::debug!("Model declares {} input(s)", specs.len());

        let plan = BindingPlan::resolve(&specs)?;
        Ok(Self { session, plan })
    }

    pub fn plan(&self) -> &BindingPlan {
        &self.plan
    }

    /// Run inference and return the positive-class probability.
    ///
    /// The first element of the model's first output is the probability.
    pub fn predict(&mut self, features: &AudioFeatures, meta: &MetadataVector) -> Result<f32> {
        let payload = self.plan.assemble(features, meta)?;

        let outputs = self
            .session
            .run(payload.as_slice())
            .map_err(|e| ScreenError::Inference(e.to_string()))?;

        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| ScreenError::Inference("model produced no output".to_string()))?;

        let (_shape, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| ScreenError::Inference(e.to_string()))?;

        data.first()
            .copied()
            .ok_or_else(|| ScreenError::Inference("model output is empty".to_string()))
    }
}

/// Read the declared input shapes from the session metadata
fn declared_inputs(session: &Session) -> Vec<InputSpec> {
    session
        .inputs()
        .iter()
        .map(|input| {
            let dims = match input.dtype() {
                ValueType::Tensor { shape, .. } => shape.iter().copied().collect(),
                other => {
                    // Non-tensor inputs have no rank; plan resolution rejects them
                    log::warn!("Model input '{}' is not a tensor: {:?}", input.name(), other);
                    Vec::new()
                }
            };
            InputSpec {
                name: input.name().to_string(),
                dims,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"not an onnx protobuf").unwrap();

        let err = RiskModel::load(&path).unwrap_err();
        assert!(matches!(err, ScreenError::ModelLoad(_)));
    }
}
