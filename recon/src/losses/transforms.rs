//! Equivariance transforms for the equivariant-imaging strategies.
//!
//! One random draw is made per call and applied to the whole batch.

use burn::prelude::*;
use burn_extra_ops::TensorExtraOps;
use log::debug;
use rand::Rng;

use crate::{
    config::{ScalingKind, ScalingTransformConfig, TransformKind},
    resize::resize_bicubic,
};

/// Shrink factors drawn by the scaling transform.
pub const SCALING_FACTORS: [f64; 2] = [0.5, 0.75];

/// Random rescaling by one of [`SCALING_FACTORS`].
#[derive(Debug, Clone)]
pub struct ScalingTransform {
    pub kind: ScalingKind,
    pub antialias: bool,
    /// Extents are kept multiples of this so the physics can resample them.
    pub ratio: usize,
}

impl ScalingTransformConfig {
    pub fn init(&self, ratio: usize) -> ScalingTransform {
        ScalingTransform {
            kind: self.kind.clone(),
            antialias: self.antialias,
            ratio: ratio.max(1),
        }
    }
}

impl ScalingTransform {
    pub fn apply<B: Backend>(&self, x: Tensor<B, 4>, factor: f64) -> Tensor<B, 4> {
        let [batch, channels, height, width] = x.dims();
        let scaled = |extent: usize| {
            let target = (extent as f64 * factor).round() as usize;
            ((target / self.ratio).max(1) * self.ratio).min(extent)
        };
        let (new_height, new_width) = (scaled(height), scaled(width));

        let resized = resize_bicubic(x, [new_height, new_width], self.antialias);
        match self.kind {
            ScalingKind::Resized => resized,
            ScalingKind::Padded => {
                let top = (height - new_height) / 2;
                let left = (width - new_width) / 2;
                Tensor::zeros([batch, channels, height, width], &resized.device()).slice_assign(
                    [
                        0..batch,
                        0..channels,
                        top..top + new_height,
                        left..left + new_width,
                    ],
                    resized,
                )
            }
        }
    }
}

/// A transform family, resolved once from [`TransformKind`].
#[derive(Debug, Clone)]
pub enum EquivarianceTransform {
    /// A random non-zero number of quarter turns.
    Rotate,
    /// A random circular shift of both spatial axes.
    Shift,
    /// The transforms applied in order.
    Combined(Vec<EquivarianceTransform>),
    Scaling(ScalingTransform),
}

impl EquivarianceTransform {
    pub fn from_kind(kind: &TransformKind, scaling: &ScalingTransformConfig, ratio: usize) -> Self {
        match kind {
            TransformKind::Rotations => Self::Rotate,
            TransformKind::Shifts => Self::Shift,
            TransformKind::RotationsShifts => Self::Combined(vec![Self::Rotate, Self::Shift]),
            TransformKind::ScalingTransforms => Self::Scaling(scaling.init(ratio)),
        }
    }

    /// Applies a freshly drawn instance of the transform to `x`.
    pub fn apply<B: Backend>(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut rng = rand::rng();
        match self {
            Self::Rotate => {
                let k = rng.random_range(1..4);
                debug!("Rotating by {k} quarter turns");
                x.rot90(k)
            }
            Self::Shift => {
                let [_, _, height, width] = x.dims();
                let shift_h = rng.random_range(0..height) as i64;
                let shift_w = rng.random_range(0..width) as i64;
                debug!("Shifting by ({shift_h}, {shift_w})");
                x.roll_spatial(shift_h, shift_w)
            }
            Self::Combined(transforms) => transforms
                .iter()
                .fold(x, |acc, transform| transform.apply(acc)),
            Self::Scaling(scaling) => {
                let factor = SCALING_FACTORS[rng.random_range(0..SCALING_FACTORS.len())];
                debug!("Scaling by {factor}");
                scaling.apply(x, factor)
            }
        }
    }
}
