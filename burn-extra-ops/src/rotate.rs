//! # Quarter-turn Rotation
//!
//! Exact rotations by multiples of 90 degrees over the two trailing (spatial)
//! dimensions, built from index reversal and an axis swap so no interpolation
//! is involved.

use burn::{prelude::*, tensor::Int};

/// Reverses the order of elements along `dim`.
pub fn reverse_dim<B: Backend, const D: usize>(input: Tensor<B, D>, dim: usize) -> Tensor<B, D> {
    let size = input.dims()[dim];
    if size <= 1 {
        return input;
    }

    let indices = Tensor::<B, 1, Int>::arange(0..size as i64, &input.device())
        .mul_scalar(-1)
        .add_scalar(size as i64 - 1);
    input.select(dim, indices)
}

/// Rotates the two trailing dimensions counter-clockwise by `k` quarter turns.
///
/// Matches `torch.rot90(input, k, dims=(-2, -1))`; negative `k` rotates clockwise.
///
/// # Panics
///
/// Panics if `D < 2`.
pub fn rot90<B: Backend, const D: usize>(input: Tensor<B, D>, k: i32) -> Tensor<B, D> {
    assert!(D >= 2, "rot90 needs at least two dimensions, got {D}");
    let (h, w) = (D - 2, D - 1);

    match k.rem_euclid(4) {
        1 => reverse_dim(input, w).swap_dims(h, w),
        2 => reverse_dim(reverse_dim(input, h), w),
        3 => reverse_dim(input.swap_dims(h, w), w),
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use burn::tensor::{TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    fn grid() -> Tensor<TestBackend, 2> {
        Tensor::from_data([[1.0, 2.0], [3.0, 4.0]], &Default::default())
    }

    #[test]
    fn reverse_dim_flips_order() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 1>::from_data([0.0, 1.0, 2.0, 3.0], &device);

        reverse_dim(tensor, 0).into_data().assert_approx_eq::<f32>(
            &TensorData::from([3.0, 2.0, 1.0, 0.0]),
            Tolerance::default(),
        );
    }

    #[test]
    fn rot90_quarter_turn_matches_torch_convention() {
        rot90(grid(), 1).into_data().assert_approx_eq::<f32>(
            &TensorData::from([[2.0, 4.0], [1.0, 3.0]]),
            Tolerance::default(),
        );
        rot90(grid(), 2).into_data().assert_approx_eq::<f32>(
            &TensorData::from([[4.0, 3.0], [2.0, 1.0]]),
            Tolerance::default(),
        );
        rot90(grid(), 3).into_data().assert_approx_eq::<f32>(
            &TensorData::from([[3.0, 1.0], [4.0, 2.0]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn rot90_full_turn_is_identity() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::random(
            [1, 2, 3, 5],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );

        let rotated = (0..4).fold(tensor.clone(), |acc, _| rot90(acc, 1));

        rotated
            .into_data()
            .assert_approx_eq::<f32>(&tensor.into_data(), Tolerance::default());
    }

    #[test]
    fn rot90_swaps_spatial_extent() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 3>::zeros([3, 4, 7], &device);
        assert_eq!(rot90(tensor, -1).dims(), [3, 7, 4]);
    }
}
