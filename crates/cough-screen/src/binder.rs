//! Input binding
//!
//! Maps precomputed feature tensors onto the model's declared inputs by
//! rank, not by name or position — the artifact's input order is not stable
//! across retraining/export. The mapping is resolved once at model load into
//! a fixed [`BindingPlan`] and reused for the request.

use ort::session::SessionInputValue;
use ort::value::Tensor;

use crate::error::{Result, ScreenError};
use crate::features::AudioFeatures;
use crate::metadata::{MetadataVector, META_WIDTH};

/// Feature families the binding table can serve, keyed by non-batch rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Rank 3: log-mel spectrogram `(128, 63, 1)` for the CNN branch
    Spectrogram,
    /// Rank 2: MFCC sequence `(63, 42)` for the LSTM branch
    Cepstral,
    /// Rank 1: demographic vector, width taken from the declared shape
    Metadata { width: usize },
}

/// One declared model input: name plus raw dimensions as reported by the
/// session metadata (dynamic dimensions are negative)
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub name: String,
    pub dims: Vec<i64>,
}

impl InputSpec {
    /// Dimensions with the batch axis stripped.
    ///
    /// A leading dynamic (-1) or size-1 dimension is the batch axis. Inputs
    /// exported with a fixed batch of 1 are handled the same as dynamic ones.
    fn feature_dims(&self) -> &[i64] {
        match self.dims.first() {
            Some(&d) if d < 0 || d == 1 => &self.dims[1..],
            _ => &self.dims,
        }
    }
}

/// Fixed mapping from the model's declared inputs to feature tensors
#[derive(Debug, Clone)]
pub struct BindingPlan {
    slots: Vec<FeatureKind>,
}

impl BindingPlan {
    /// Resolve a binding plan against the declared input list.
    ///
    /// Dispatch is purely by non-batch rank, so any permutation of the
    /// model's inputs resolves to the same per-slot assignment. An input of
    /// rank 0 or rank >= 4 has no feature to serve and fails resolution
    /// immediately, naming the offending input.
    pub fn resolve(specs: &[InputSpec]) -> Result<Self> {
        let mut slots = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let dims = spec.feature_dims();
            let kind = match dims.len() {
                3 => FeatureKind::Spectrogram,
                2 => FeatureKind::Cepstral,
                1 => {
                    // Dynamic width falls back to the default vector width
                    let width = usize::try_from(dims[0]).unwrap_or(META_WIDTH);
                    FeatureKind::Metadata { width }
                }
                rank => return Err(ScreenError::UnsupportedInputRank { index, rank }),
            };
            log::debug!(
                "Model input #{} '{}' dims {:?} -> {:?}",
                index,
                spec.name,
                spec.dims,
                kind
            );
            slots.push(kind);
        }

        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[FeatureKind] {
        &self.slots
    }

    /// Assemble the ordered payload for the session
    pub fn assemble(
        &self,
        features: &AudioFeatures,
        meta: &MetadataVector,
    ) -> Result<Vec<SessionInputValue<'static>>> {
        let mut payload = Vec::with_capacity(self.slots.len());

        for kind in &self.slots {
            let value: SessionInputValue = match *kind {
                FeatureKind::Spectrogram => Tensor::from_array(features.spectrogram.clone())
                    .map_err(|e| ScreenError::Inference(e.to_string()))?
                    .into(),
                FeatureKind::Cepstral => Tensor::from_array(features.cepstral.clone())
                    .map_err(|e| ScreenError::Inference(e.to_string()))?
                    .into(),
                FeatureKind::Metadata { width } => Tensor::from_array(meta.to_array(width))
                    .map_err(|e| ScreenError::Inference(e.to_string()))?
                    .into(),
            };
            payload.push(value);
        }

        Ok(payload)
    }
}
