//! Degradation simulators.
//!
//! A [`Physics`] turns a clean batch `[N, C, H, W]` into a noisy measurement
//! and offers an approximate inverse. Seeded simulation draws its noise from a
//! local generator, so two calls with the same seed and input agree bit for bit
//! regardless of what other threads are doing.

mod blur;
mod denoising;
mod downsampling;
mod noise;

pub use blur::Blur;
pub use denoising::Denoising;
pub use downsampling::Downsampling;
pub use noise::{gaussian_noise, standard_normal};

use burn::prelude::*;

use crate::config::Task;

/// A forward degradation model `y = A(x) + n`, with `n` Gaussian.
pub trait Physics<B: Backend>: Send + Sync {
    /// The inverse problem this operator models.
    fn task(&self) -> Task;

    /// Noise standard deviation on the unit intensity scale.
    fn sigma(&self) -> f64;

    /// The noise-free operator `A`.
    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4>;

    /// An approximate inverse `A†` mapping measurements back to image space.
    fn a_dagger(&self, y: Tensor<B, 4>) -> Tensor<B, 4>;

    /// Simulates a measurement. With `Some(seed)` the noise is a pure function
    /// of the seed; with `None` it is freshly drawn.
    fn apply(&self, x: Tensor<B, 4>, seed: Option<u64>) -> Tensor<B, 4> {
        let y = self.forward(x);
        let noise = gaussian_noise(y.dims(), self.sigma(), seed, &y.device());
        y + noise
    }

    /// The explicit linear kernel `[1, 1, k, k]`, for convolutional operators.
    fn filter(&self) -> Option<Tensor<B, 4>> {
        None
    }

    /// Spatial resampling factor between image and measurement.
    fn ratio(&self) -> usize {
        1
    }
}
