//! Mel-frequency cepstral coefficients
//!
//! Orthonormal DCT-II over the dB-scaled mel spectrogram. Unlike the CNN
//! branch, the dB conversion here is referenced to unit power rather than
//! the clip peak.

use ndarray::Array2;

use super::mel;

/// Number of cepstral coefficients retained
pub const N_MFCC: usize = 42;

/// Compute MFCCs from a mel power spectrogram.
///
/// Returns shape `(N_MFCC, n_frames)`.
pub fn mfcc_from_mel(mel_power: &Array2<f32>) -> Array2<f32> {
    let db = mel::power_to_db(mel_power.clone(), 1.0);
    let basis = dct2_basis(N_MFCC, db.nrows());
    basis.dot(&db)
}

/// Orthonormal DCT-II basis, shape `(n_out, n_in)`
fn dct2_basis(n_out: usize, n_in: usize) -> Array2<f32> {
    let norm0 = (1.0 / n_in as f32).sqrt();
    let norm = (2.0 / n_in as f32).sqrt();

    let mut basis = Array2::zeros((n_out, n_in));
    for k in 0..n_out {
        let scale = if k == 0 { norm0 } else { norm };
        for n in 0..n_in {
            let angle =
                std::f32::consts::PI * k as f32 * (2 * n + 1) as f32 / (2 * n_in) as f32;
            basis[[k, n]] = scale * angle.cos();
        }
    }
    basis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_rows_orthonormal() {
        let basis = dct2_basis(8, 8);
        for i in 0..8 {
            for j in 0..8 {
                let dot: f32 = basis.row(i).dot(&basis.row(j));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-5, "rows {} . {} = {}", i, j, dot);
            }
        }
    }

    #[test]
    fn test_dc_coefficient_of_constant_input() {
        // A constant column has all its energy in coefficient 0
        let input = Array2::from_elem((16, 3), 2.0f32);
        let basis = dct2_basis(4, 16);
        let out = basis.dot(&input);

        assert!((out[[0, 0]] - 2.0 * 16.0f32.sqrt()).abs() < 1e-4);
        for k in 1..4 {
            assert!(out[[k, 0]].abs() < 1e-4, "coefficient {} should vanish", k);
        }
    }

    #[test]
    fn test_mfcc_shape() {
        let mel_power = Array2::from_elem((mel::N_MELS, 216), 0.5f32);
        let coeffs = mfcc_from_mel(&mel_power);
        assert_eq!(coeffs.dim(), (N_MFCC, 216));
    }
}
