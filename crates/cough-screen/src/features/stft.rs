//! Short-time Fourier transform
//!
//! Centered STFT with a periodic Hann window. Frames are zero-padded at the
//! clip edges so frame `t` is centered on sample `t * HOP_LENGTH`, giving
//! `1 + len / HOP_LENGTH` frames — 216 for the normalized 5-second clip.

use ndarray::Array2;
use realfft::RealFftPlanner;

use crate::error::{Result, ScreenError};

/// FFT size for analysis frames
pub const N_FFT: usize = 2048;

/// Hop between consecutive frames
pub const HOP_LENGTH: usize = 512;

/// Compute the power spectrogram of a mono waveform.
///
/// Returns shape `(N_FFT / 2 + 1, n_frames)`.
pub fn power_spectrogram(samples: &[f32]) -> Result<Array2<f32>> {
    let n_bins = N_FFT / 2 + 1;
    let n_frames = samples.len() / HOP_LENGTH + 1;
    let window = hann_window(N_FFT);

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(N_FFT);
    let mut frame = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();

    let half = (N_FFT / 2) as isize;
    let mut power = Array2::zeros((n_bins, n_frames));

    for t in 0..n_frames {
        let start = t as isize * HOP_LENGTH as isize - half;
        for (i, slot) in frame.iter_mut().enumerate() {
            let idx = start + i as isize;
            *slot = if idx >= 0 && (idx as usize) < samples.len() {
                samples[idx as usize] * window[i]
            } else {
                0.0
            };
        }

        fft.process(&mut frame, &mut spectrum)
            .map_err(|e| ScreenError::Feature(e.to_string()))?;

        for (k, c) in spectrum.iter().enumerate() {
            power[[k, t]] = c.re * c.re + c.im * c.im;
        }
    }

    Ok(power)
}

/// Periodic Hann window of the given size
fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / size as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}
