//! # Box Pre-filter
//!
//! A cheap low-pass filter applied before downscaling to limit aliasing, since
//! Burn's `interpolate` samples without an anti-aliasing kernel.

use burn::{prelude::*, tensor::module::avg_pool2d};

/// Smooths `[N, C, H, W]` input with a `size x size` box filter, keeping the
/// spatial extent. Border windows average only the pixels inside the image.
///
/// `size` is rounded up to the next odd value; `size <= 1` returns the input.
pub fn box_prefilter<B: Backend>(input: Tensor<B, 4>, size: usize) -> Tensor<B, 4> {
    if size <= 1 {
        return input;
    }
    let size = size | 1;
    let pad = size / 2;

    avg_pool2d(input, [size, size], [1, 1], [pad, pad], false)
}
