//! Audio feature extraction
//!
//! Turns a normalized 5-second waveform into the two fixed-shape tensors the
//! multi-input model consumes:
//!
//! - **SpectrogramTensor** `(1, 128, 63, 1)`: log-mel spectrogram in dB
//!   relative to the clip peak, resized to 63 time frames, for the CNN branch.
//! - **CepstralTensor** `(1, 63, 42)`: 42 MFCCs resized to 63 frames and
//!   transposed time-major, for the LSTM branch.
//!
//! Both branches share one mel power spectrogram. Extraction is deterministic
//! for identical input bytes.

pub mod mel;
pub mod mfcc;
pub mod resize;
pub mod stft;

use std::path::Path;

use ndarray::{Array3, Array4, Axis};

use crate::audio;
use crate::error::Result;

/// Rank-4 CNN input: `(batch, mel bands, time frames, channel)`
pub type SpectrogramTensor = Array4<f32>;

/// Rank-3 LSTM input: `(batch, time steps, coefficients)`
pub type CepstralTensor = Array3<f32>;

/// Fixed time-frame count both tensors are resized to
pub const TIME_FRAMES: usize = 63;

/// Feature tensors for one request
#[derive(Debug, Clone)]
pub struct AudioFeatures {
    pub spectrogram: SpectrogramTensor,
    pub cepstral: CepstralTensor,
}

/// Extract feature tensors from an audio file.
///
/// Decodes, resamples and duration-normalizes the recording, then runs both
/// feature branches.
pub fn extract(path: &Path) -> Result<AudioFeatures> {
    let waveform = audio::load_waveform(path)?;
    from_waveform(&waveform)
}

/// Extract feature tensors from an already-normalized waveform
pub fn from_waveform(samples: &[f32]) -> Result<AudioFeatures> {
    let mel_power = mel::mel_spectrogram(samples)?;

    // CNN branch: dB relative to the clip peak, resized to (128, 63)
    let peak = mel_power.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let mel_db = mel::power_to_db(mel_power.clone(), peak);
    let resized = resize::resize(&mel_db, mel::N_MELS, TIME_FRAMES);
    let spectrogram = resized.insert_axis(Axis(2)).insert_axis(Axis(0));

    // LSTM branch: MFCCs resized to (42, 63), transposed time-major
    let coeffs = mfcc::mfcc_from_mel(&mel_power);
    let resized = resize::resize(&coeffs, mfcc::N_MFCC, TIME_FRAMES);
    let cepstral = resized
        .t()
        .as_standard_layout()
        .to_owned()
        .insert_axis(Axis(0));

    Ok(AudioFeatures {
        spectrogram,
        cepstral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CLIP_SAMPLES;

    fn sine_clip(freq: f32) -> Vec<f32> {
        (0..CLIP_SAMPLES)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / 22_050.0).sin() * 0.5)
            .collect()
    }

    #[test]
    fn test_tensor_shapes_for_silence() {
        let features = from_waveform(&vec![0.0; CLIP_SAMPLES]).unwrap();
        assert_eq!(features.spectrogram.dim(), (1, 128, 63, 1));
        assert_eq!(features.cepstral.dim(), (1, 63, 42));
    }

    #[test]
    fn test_tensor_shapes_for_signal() {
        let features = from_waveform(&sine_clip(440.0)).unwrap();
        assert_eq!(features.spectrogram.dim(), (1, 128, 63, 1));
        assert_eq!(features.cepstral.dim(), (1, 63, 42));
    }

    #[test]
    fn test_spectrogram_is_peak_normalized() {
        let features = from_waveform(&sine_clip(440.0)).unwrap();
        let max = features
            .spectrogram
            .iter()
            .fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let min = features
            .spectrogram
            .iter()
            .fold(f32::INFINITY, |a, &b| a.min(b));
        // dB re: peak with an 80 dB floor; resize cannot overshoot the range
        assert!(max <= 1e-3, "peak should sit at 0 dB, got {}", max);
        assert!(min >= -80.0 - 1e-3, "floor is -80 dB, got {}", min);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let clip = sine_clip(523.25);
        let a = from_waveform(&clip).unwrap();
        let b = from_waveform(&clip).unwrap();
        assert_eq!(a.spectrogram, b.spectrogram);
        assert_eq!(a.cepstral, b.cepstral);
    }

    #[test]
    fn test_cepstral_is_time_major() {
        // A waveform whose second half is silent: frame-level energy must
        // vary along the time axis (axis 1), not the coefficient axis.
        let mut clip = sine_clip(440.0);
        for s in clip.iter_mut().skip(CLIP_SAMPLES / 2) {
            *s = 0.0;
        }
        let features = from_waveform(&clip).unwrap();

        let c0_early = features.cepstral[[0, 5, 0]];
        let c0_late = features.cepstral[[0, 60, 0]];
        assert!(
            (c0_early - c0_late).abs() > 1.0,
            "energy coefficient should differ across time: {} vs {}",
            c0_early,
            c0_late
        );
    }
}
