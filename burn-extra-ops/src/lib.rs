//! Additional operations for the Burn deep learning framework
//!
//! This crate provides the geometric tensor operations image reconstruction
//! pipelines need but that are not available in the core Burn framework:
//! circular shifts, exact quarter-turn rotations, spatial crops and a box
//! pre-filter for anti-aliased downscaling.

use burn::prelude::*;

mod crop;
mod filter;
mod roll;
mod rotate;

// Convenient re-exports
pub use crop::{crop, CropWindow};
pub use filter::box_prefilter;
pub use roll::roll;
pub use rotate::{reverse_dim, rot90};

/// Additional operations for Burn tensors
pub trait TensorExtraOps<B: Backend, const D: usize> {
    /// Circularly shift the two trailing (spatial) dimensions.
    fn roll_spatial(self, shift_h: i64, shift_w: i64) -> Self;

    /// Rotate the two trailing dimensions by `k` quarter turns.
    fn rot90(self, k: i32) -> Self;

    /// Extract a window from the two trailing dimensions.
    fn crop(self, window: CropWindow) -> Self;
}

impl<B: Backend, const D: usize> TensorExtraOps<B, D> for Tensor<B, D> {
    fn roll_spatial(self, shift_h: i64, shift_w: i64) -> Self {
        roll(self, &[shift_h, shift_w], &[D - 2, D - 1])
    }

    fn rot90(self, k: i32) -> Self {
        rotate::rot90(self, k)
    }

    fn crop(self, window: CropWindow) -> Self {
        crop::crop(self, window)
    }
}
