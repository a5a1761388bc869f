use burn::{
    prelude::*,
    tensor::{Distribution, TensorData},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Standard normal samples of the given shape.
///
/// A seeded draw uses its own generator and never touches shared state.
pub fn standard_normal<B: Backend, const D: usize>(
    shape: [usize; D],
    seed: Option<u64>,
    device: &B::Device,
) -> Tensor<B, D> {
    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            let count: usize = shape.iter().product();
            let values: Vec<f32> = (0..count).map(|_| rng.sample(StandardNormal)).collect();
            Tensor::from_data(TensorData::new(values, shape), device)
        }
        None => Tensor::random(shape, Distribution::Normal(0.0, 1.0), device),
    }
}

/// Gaussian noise with standard deviation `sigma`.
pub fn gaussian_noise<B: Backend, const D: usize>(
    shape: [usize; D],
    sigma: f64,
    seed: Option<u64>,
    device: &B::Device,
) -> Tensor<B, D> {
    if sigma == 0.0 {
        return Tensor::zeros(shape, device);
    }
    standard_normal(shape, seed, device).mul_scalar(sigma)
}
