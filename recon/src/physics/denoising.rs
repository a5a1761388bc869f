use burn::prelude::*;

use super::Physics;
use crate::config::Task;

/// Identity operator; the measurement is the image plus noise.
#[derive(Debug, Clone)]
pub struct Denoising {
    sigma: f64,
}

impl Denoising {
    pub const fn new(sigma: f64) -> Self {
        Self { sigma }
    }
}

impl<B: Backend> Physics<B> for Denoising {
    fn task(&self) -> Task {
        Task::Denoising
    }

    fn sigma(&self) -> f64 {
        self.sigma
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        x
    }

    fn a_dagger(&self, y: Tensor<B, 4>) -> Tensor<B, 4> {
        y
    }
}
