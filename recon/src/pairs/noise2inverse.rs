use burn::{prelude::*, tensor::TensorData};

use crate::physics::Physics;

/// Splits one measurement into two independent half-measurements.
///
/// Pixels are partitioned by checkerboard parity. Each half keeps the other
/// half's pixels at zero and is rescaled by two so both carry the full signal
/// energy on average. The approximate inverse of the even half becomes the new
/// reference, the odd half the new measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noise2InverseSplit;

impl Noise2InverseSplit {
    /// Returns `(x, y)` built from the measurement batch `y`.
    pub fn apply<B: Backend>(
        &self,
        physics: &dyn Physics<B>,
        y: Tensor<B, 4>,
    ) -> (Tensor<B, 4>, Tensor<B, 4>) {
        let [_, _, height, width] = y.dims();
        let even = checkerboard::<B>(height, width, &y.device());
        let odd = even.clone().neg().add_scalar(1.0);

        let target_half = y.clone().mul(even).mul_scalar(2.0);
        let input_half = y.mul(odd).mul_scalar(2.0);

        (physics.a_dagger(target_half), input_half)
    }
}

/// `[1, 1, H, W]` mask equal to one where `row + col` is even.
fn checkerboard<B: Backend>(height: usize, width: usize, device: &B::Device) -> Tensor<B, 4> {
    let values: Vec<f32> = (0..height * width)
        .map(|i| if (i / width + i % width) % 2 == 0 { 1.0 } else { 0.0 })
        .collect();
    Tensor::from_data(TensorData::new(values, [1, 1, height, width]), device)
}

#[cfg(test)]
mod tests {
    use burn::tensor::{Distribution, Tolerance};

    use super::*;
    use crate::{
        physics::{Blur, Denoising, Downsampling},
        tests::TestBackend,
    };

    #[test]
    fn halves_partition_the_measurement() {
        let device = Default::default();
        let y = Tensor::<TestBackend, 4>::random([2, 3, 5, 6], Distribution::Default, &device);

        let (x, y_half) = Noise2InverseSplit.apply::<TestBackend>(&Denoising::new(0.0), y.clone());

        x.add(y_half)
            .div_scalar(2.0)
            .into_data()
            .assert_approx_eq::<f32>(&y.into_data(), Tolerance::default());
    }

    #[test]
    fn checkerboard_alternates() {
        let mask = checkerboard::<TestBackend>(2, 3, &Default::default());
        mask.into_data()
            .assert_eq(&TensorData::from([[[[1.0f32, 0.0, 1.0], [0.0, 1.0, 0.0]]]]), true);
    }

    #[test]
    fn super_resolution_split_keeps_ratio() {
        let device = Default::default();
        let y = Tensor::<TestBackend, 4>::random([1, 3, 8, 8], Distribution::Default, &device);

        let (x, y) = Noise2InverseSplit.apply::<TestBackend>(&Downsampling::new(2, 0.0), y);

        assert_eq!(x.dims(), [1, 3, 16, 16]);
        assert_eq!(y.dims(), [1, 3, 8, 8]);
    }

    #[test]
    fn deblurring_split_restores_image_extent() {
        let device = Default::default();
        let physics = Blur::<TestBackend>::gaussian(5, 1.0, 0.0, &device);
        let y = Tensor::<TestBackend, 4>::random([1, 1, 12, 12], Distribution::Default, &device);

        let (x, y) = Noise2InverseSplit.apply::<TestBackend>(&physics, y);

        assert_eq!(x.dims(), [1, 1, 16, 16]);
        assert_eq!(y.dims(), [1, 1, 12, 12]);
    }
}
