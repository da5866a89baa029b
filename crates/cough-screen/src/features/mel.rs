//! Mel spectrogram computation
//!
//! 128-band mel spectrogram over the STFT power spectrum. The filterbank
//! uses the Slaney-style mel scale (linear below 1 kHz, logarithmic above)
//! with bandwidth normalization, matching the pipeline the model was
//! trained against.

use ndarray::Array2;

use super::stft;
use crate::audio::SAMPLE_RATE;
use crate::error::Result;

/// Number of mel bands
pub const N_MELS: usize = 128;

/// Dynamic-range floor below the reference, in dB
pub const TOP_DB: f32 = 80.0;

/// Compute the mel power spectrogram of a mono waveform.
///
/// Returns shape `(N_MELS, n_frames)`.
pub fn mel_spectrogram(samples: &[f32]) -> Result<Array2<f32>> {
    let power = stft::power_spectrogram(samples)?;
    let filterbank = mel_filterbank(N_MELS, stft::N_FFT, SAMPLE_RATE as f32);
    Ok(filterbank.dot(&power))
}

/// Convert a power spectrogram to dB relative to `reference`.
///
/// Values are floored at `TOP_DB` below the post-conversion peak. Passing the
/// spectrogram's own maximum as `reference` pins the peak at 0 dB, a per-clip
/// dynamic-range normalization.
pub fn power_to_db(mut spec: Array2<f32>, reference: f32) -> Array2<f32> {
    const AMIN: f32 = 1e-10;

    let ref_db = 10.0 * reference.max(AMIN).log10();
    spec.mapv_inplace(|v| 10.0 * v.max(AMIN).log10() - ref_db);

    let peak = spec.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let floor = peak - TOP_DB;
    spec.mapv_inplace(|v| v.max(floor));
    spec
}

/// Build a triangular mel filterbank, shape `(n_mels, n_fft / 2 + 1)`
pub fn mel_filterbank(n_mels: usize, n_fft: usize, sample_rate: f32) -> Array2<f32> {
    let n_bins = n_fft / 2 + 1;
    let f_max = sample_rate / 2.0;

    // Band edges evenly spaced on the mel scale, 0 Hz .. Nyquist
    let mel_min = hz_to_mel(0.0);
    let mel_max = hz_to_mel(f_max);
    let n_points = n_mels + 2;
    let hz_points: Vec<f32> = (0..n_points)
        .map(|i| mel_min + (mel_max - mel_min) * i as f32 / (n_points - 1) as f32)
        .map(mel_to_hz)
        .collect();

    let fft_freqs: Vec<f32> = (0..n_bins)
        .map(|k| k as f32 * sample_rate / n_fft as f32)
        .collect();

    let mut filterbank = Array2::zeros((n_mels, n_bins));
    for band in 0..n_mels {
        let lower = hz_points[band];
        let center = hz_points[band + 1];
        let upper = hz_points[band + 2];

        // Bandwidth normalization keeps per-band energy comparable
        let enorm = 2.0 / (upper - lower);

        for (k, &f) in fft_freqs.iter().enumerate() {
            let rising = (f - lower) / (center - lower);
            let falling = (upper - f) / (upper - center);
            let weight = rising.min(falling).max(0.0);
            filterbank[[band, k]] = weight * enorm;
        }
    }

    filterbank
}

/// Slaney mel scale: linear below 1 kHz, logarithmic above
fn hz_to_mel(hz: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = MIN_LOG_HZ / F_SP;
    const LOGSTEP: f32 = 0.068_751_78; // ln(6.4) / 27

    if hz < MIN_LOG_HZ {
        hz / F_SP
    } else {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / LOGSTEP
    }
}

fn mel_to_hz(mel: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = MIN_LOG_HZ / F_SP;
    const LOGSTEP: f32 = 0.068_751_78;

    if mel < MIN_LOG_MEL {
        mel * F_SP
    } else {
        MIN_LOG_HZ * (LOGSTEP * (mel - MIN_LOG_MEL)).exp()
    }
}
