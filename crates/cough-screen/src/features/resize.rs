//! Anti-aliased 2-D resize
//!
//! Smooth resize used to bring variable-width feature matrices to the fixed
//! shapes the model expects: a separable Gaussian pre-filter on any axis
//! being downscaled (sigma = (factor - 1) / 2), then bilinear interpolation
//! with pixel-center alignment. Fully deterministic.

use ndarray::{Array2, Axis};

/// Resize `input` to `(out_rows, out_cols)`
pub fn resize(input: &Array2<f32>, out_rows: usize, out_cols: usize) -> Array2<f32> {
    let (in_rows, in_cols) = input.dim();
    if in_rows == out_rows && in_cols == out_cols {
        return input.clone();
    }

    let row_factor = in_rows as f32 / out_rows as f32;
    let col_factor = in_cols as f32 / out_cols as f32;

    let mut work = input.clone();
    if row_factor > 1.0 {
        blur_axis(&mut work, Axis(0), (row_factor - 1.0) / 2.0);
    }
    if col_factor > 1.0 {
        blur_axis(&mut work, Axis(1), (col_factor - 1.0) / 2.0);
    }

    let mut output = Array2::zeros((out_rows, out_cols));
    for r in 0..out_rows {
        let src_r = ((r as f32 + 0.5) * row_factor - 0.5).clamp(0.0, (in_rows - 1) as f32);
        let r0 = src_r.floor() as usize;
        let r1 = (r0 + 1).min(in_rows - 1);
        let fr = src_r - r0 as f32;

        for c in 0..out_cols {
            let src_c = ((c as f32 + 0.5) * col_factor - 0.5).clamp(0.0, (in_cols - 1) as f32);
            let c0 = src_c.floor() as usize;
            let c1 = (c0 + 1).min(in_cols - 1);
            let fc = src_c - c0 as f32;

            let top = work[[r0, c0]] * (1.0 - fc) + work[[r0, c1]] * fc;
            let bottom = work[[r1, c0]] * (1.0 - fc) + work[[r1, c1]] * fc;
            output[[r, c]] = top * (1.0 - fr) + bottom * fr;
        }
    }

    output
}

/// In-place separable Gaussian blur along one axis, clamping at the edges
fn blur_axis(data: &mut Array2<f32>, axis: Axis, sigma: f32) {
    let kernel = gaussian_kernel(sigma);
    if kernel.len() == 1 {
        return;
    }
    let radius = (kernel.len() / 2) as isize;

    for mut lane in data.lanes_mut(axis).into_iter() {
        let src: Vec<f32> = lane.iter().copied().collect();
        let len = src.len() as isize;
        for (i, slot) in lane.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (j, &w) in kernel.iter().enumerate() {
                let idx = (i as isize + j as isize - radius).clamp(0, len - 1);
                acc += w * src[idx as usize];
            }
            *slot = acc;
        }
    }
}

/// Normalized Gaussian kernel truncated at 4 sigma
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (4.0 * sigma).ceil() as i32;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-0.5 * (i as f32 / sigma).powi(2)).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}
