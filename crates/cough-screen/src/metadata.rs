//! Demographic metadata vectorization
//!
//! The model's third input is a fixed-width feature vector of which only the
//! first slot (standardized age) is populated; the remaining slots are
//! reserved symptom flags that this component always reports as absent.
//!
//! Age arrives as a raw string from the host and is frequently missing or
//! malformed, so parse failure degrades to a default instead of erroring.
//! The substitution is surfaced on the result so the orchestrator can log it.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;

use crate::error::{Result, ScreenError};

/// Default demographic vector width: scaled age + 8 reserved symptom slots
pub const META_WIDTH: usize = 9;

/// Substituted when the raw age does not parse
pub const DEFAULT_AGE: f64 = 30.0;

/// Pre-fitted standardization parameters for the age feature.
///
/// Fitting happens offline during training; this only applies the transform
/// `(x - mean) / scale`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeScaler {
    mean: f64,
    scale: f64,
}

impl AgeScaler {
    /// Load scaler parameters from a JSON artifact
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ScreenError::ScalerLoad(e.to_string()))?;
        let scaler: AgeScaler =
            serde_json::from_str(&raw).map_err(|e| ScreenError::ScalerLoad(e.to_string()))?;

        if !scaler.mean.is_finite() || !scaler.scale.is_finite() || scaler.scale == 0.0 {
            return Err(ScreenError::ScalerLoad(format!(
                "degenerate parameters: mean={}, scale={}",
                scaler.mean, scaler.scale
            )));
        }
        Ok(scaler)
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }

    #[cfg(test)]
    pub fn new(mean: f64, scale: f64) -> Self {
        Self { mean, scale }
    }
}

/// Scaled demographic features for one request
#[derive(Debug, Clone, Copy)]
pub struct MetadataVector {
    scaled_age: f32,
    /// True when [`DEFAULT_AGE`] was substituted for an unparseable input
    pub age_defaulted: bool,
}

/// Parse and scale the raw age value.
///
/// Any parse failure (empty, non-numeric, non-finite) silently falls back to
/// [`DEFAULT_AGE`]; the fallback is flagged, never an error.
pub fn vectorize(raw_age: &str, scaler: &AgeScaler) -> MetadataVector {
    let (age, age_defaulted) = match raw_age.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => (v, false),
        _ => (DEFAULT_AGE, true),
    };

    MetadataVector {
        scaled_age: scaler.transform(age) as f32,
        age_defaulted,
    }
}

impl MetadataVector {
    /// Zero vector of the requested width with the scaled age at index 0.
    ///
    /// The width is negotiated against the model's declared rank-1 input at
    /// bind time; widths other than [`META_WIDTH`] keep only the age slot.
    pub fn to_array(&self, width: usize) -> Array2<f32> {
        let mut array = Array2::zeros((1, width.max(1)));
        array[[0, 0]] = self.scaled_age;
        array
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_age_is_scaled() {
        let scaler = AgeScaler::new(40.0, 10.0);
        let meta = vectorize("50", &scaler);
        assert!(!meta.age_defaulted);
        let array = meta.to_array(META_WIDTH);
        assert!((array[[0, 0]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_numeric_age_defaults_to_30() {
        let scaler = AgeScaler::new(40.0, 10.0);
        let meta = vectorize("abc", &scaler);
        assert!(meta.age_defaulted);
        // (30 - 40) / 10 = -1
        assert!((meta.to_array(META_WIDTH)[[0, 0]] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_and_whitespace_default() {
        let scaler = AgeScaler::new(0.0, 1.0);
        assert!(vectorize("", &scaler).age_defaulted);
        assert!(vectorize("   ", &scaler).age_defaulted);
        assert!(vectorize("NaN", &scaler).age_defaulted);
    }

    #[test]
    fn test_whitespace_padded_number_parses() {
        let scaler = AgeScaler::new(0.0, 1.0);
        let meta = vectorize(" 25 \n", &scaler);
        assert!(!meta.age_defaulted);
        assert!((meta.to_array(META_WIDTH)[[0, 0]] - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_nonzero_entry_at_index_0() {
        let scaler = AgeScaler::new(10.0, 5.0);
        let array = vectorize("35", &scaler).to_array(META_WIDTH);
        assert_eq!(array.dim(), (1, 9));
        assert!(array[[0, 0]] != 0.0);
        for i in 1..META_WIDTH {
            assert_eq!(array[[0, i]], 0.0);
        }
    }

    #[test]
    fn test_width_renegotiation_keeps_age_slot() {
        let scaler = AgeScaler::new(10.0, 5.0);
        let meta = vectorize("35", &scaler);
        let narrow = meta.to_array(4);
        assert_eq!(narrow.dim(), (1, 4));
        assert!((narrow[[0, 0]] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_scaler_load_rejects_zero_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("age_scaler.json");
        std::fs::write(&path, r#"{"mean": 40.0, "scale": 0.0}"#).unwrap();
        assert!(matches!(
            AgeScaler::load(&path),
            Err(ScreenError::ScalerLoad(_))
        ));
    }

    #[test]
    fn test_scaler_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("age_scaler.json");
        std::fs::write(&path, r#"{"mean": 41.5, "scale": 17.25}"#).unwrap();
        let scaler = AgeScaler::load(&path).unwrap();
        assert!((scaler.transform(41.5)).abs() < 1e-9);
    }
}
