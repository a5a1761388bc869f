use burn::{
    prelude::*,
    tensor::{
        module::{conv2d, conv_transpose2d},
        ops::{ConvOptions, ConvTransposeOptions},
    },
};

use super::Physics;
use crate::config::Task;

/// Deblurring degradation: per-channel convolution with `valid` padding.
///
/// A `k x k` kernel maps `[H, W]` to `[H - k + 1, W - k + 1]`; the transposed
/// convolution maps it back.
#[derive(Debug, Clone)]
pub struct Blur<B: Backend> {
    kernel: Tensor<B, 4>,
    sigma: f64,
}

impl<B: Backend> Blur<B> {
    /// Wraps an explicit `[k, k]` kernel.
    pub fn new(kernel: Tensor<B, 2>, sigma: f64) -> Self {
        Self {
            kernel: kernel.unsqueeze::<4>(),
            sigma,
        }
    }

    /// A normalised isotropic Gaussian kernel of odd `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is even or `std` is not positive.
    pub fn gaussian(size: usize, std: f64, sigma: f64, device: &B::Device) -> Self {
        assert!(size % 2 == 1, "Gaussian kernel size must be odd, got {size}");
        assert!(std > 0.0, "Gaussian kernel std must be positive, got {std}");

        let centre = (size / 2) as f64;
        let mut weights = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                let d2 = (i as f64 - centre).powi(2) + (j as f64 - centre).powi(2);
                weights.push((-d2 / (2.0 * std * std)).exp());
            }
        }
        let total: f64 = weights.iter().sum();
        let weights: Vec<f32> = weights.into_iter().map(|w| (w / total) as f32).collect();

        let kernel = Tensor::<B, 2>::from_data(TensorData::new(weights, [size, size]), device);
        Self::new(kernel, sigma)
    }

    fn grouped_weight(&self, channels: usize) -> Tensor<B, 4> {
        self.kernel.clone().repeat_dim(0, channels)
    }

    /// Side length of the kernel.
    pub fn kernel_size(&self) -> usize {
        let [_, _, kh, kw] = self.kernel.dims();
        kh.max(kw)
    }
}

impl<B: Backend> Physics<B> for Blur<B> {
    fn task(&self) -> Task {
        Task::Deblurring
    }

    fn sigma(&self) -> f64 {
        self.sigma
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let channels = x.dims()[1];
        let weight = self.grouped_weight(channels);
        conv2d(
            x,
            weight,
            None,
            ConvOptions::new([1, 1], [0, 0], [1, 1], channels),
        )
    }

    fn a_dagger(&self, y: Tensor<B, 4>) -> Tensor<B, 4> {
        let channels = y.dims()[1];
        let weight = self.grouped_weight(channels);
        conv_transpose2d(
            y,
            weight,
            None,
            ConvTransposeOptions::new([1, 1], [0, 0], [0, 0], [1, 1], channels),
        )
    }

    fn filter(&self) -> Option<Tensor<B, 4>> {
        Some(self.kernel.clone())
    }
}
