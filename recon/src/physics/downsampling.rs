use burn::{
    prelude::*,
    tensor::{
        module::{avg_pool2d, interpolate},
        ops::{InterpolateMode, InterpolateOptions},
    },
};

use super::Physics;
use crate::config::Task;

/// Super-resolution degradation: box averaging over `ratio x ratio` blocks.
///
/// Trailing rows and columns that do not fill a whole block are dropped, so a
/// `[H, W]` image yields a `[H / ratio, W / ratio]` measurement.
#[derive(Debug, Clone)]
pub struct Downsampling {
    ratio: usize,
    sigma: f64,
}

impl Downsampling {
    /// # Panics
    ///
    /// Panics if `ratio` is zero.
    pub fn new(ratio: usize, sigma: f64) -> Self {
        assert!(ratio > 0, "Downsampling ratio must be positive");
        Self { ratio, sigma }
    }
}

impl<B: Backend> Physics<B> for Downsampling {
    fn task(&self) -> Task {
        Task::Sr
    }

    fn sigma(&self) -> f64 {
        self.sigma
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        if self.ratio == 1 {
            return x;
        }
        let r = self.ratio;
        avg_pool2d(x, [r, r], [r, r], [0, 0], true)
    }

    /// Nearest-neighbour upsampling back to image resolution.
    fn a_dagger(&self, y: Tensor<B, 4>) -> Tensor<B, 4> {
        if self.ratio == 1 {
            return y;
        }
        let [_, _, h, w] = y.dims();
        interpolate(
            y,
            [h * self.ratio, w * self.ratio],
            InterpolateOptions::new(InterpolateMode::Nearest),
        )
    }

    fn ratio(&self) -> usize {
        self.ratio
    }
}
