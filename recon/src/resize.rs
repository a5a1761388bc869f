//! Bicubic resampling shared by the ground-truth provider and the scaling
//! transform.

use burn::{
    prelude::*,
    tensor::{
        module::interpolate,
        ops::{InterpolateMode, InterpolateOptions},
    },
};
use burn_extra_ops::box_prefilter;

/// Resizes `[N, C, H, W]` input to `size` with a bicubic filter.
///
/// Returns the input untouched when it already has the requested extent. With
/// `antialias`, a box filter matching the shrink factor runs first.
pub fn resize_bicubic<B: Backend>(
    input: Tensor<B, 4>,
    size: [usize; 2],
    antialias: bool,
) -> Tensor<B, 4> {
    let [_, _, height, width] = input.dims();
    if [height, width] == size {
        return input;
    }

    let input = if antialias {
        box_prefilter(input, shrink_factor([height, width], size))
    } else {
        input
    };

    interpolate(
        input,
        size,
        InterpolateOptions::new(InterpolateMode::Bicubic),
    )
}

/// Integer box size covering the larger of the two shrink ratios. Any real
/// shrink yields at least 2; upscaling yields 1.
fn shrink_factor(from: [usize; 2], to: [usize; 2]) -> usize {
    from[0]
        .div_ceil(to[0].max(1))
        .max(from[1].div_ceil(to[1].max(1)))
}

#[cfg(test)]
mod tests {
    use burn::tensor::{Distribution, TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn resize_changes_extent() {
        let device = Default::default();
        let image =
            Tensor::<TestBackend, 4>::random([1, 3, 16, 12], Distribution::Default, &device);

        assert_eq!(resize_bicubic(image.clone(), [8, 6], true).dims(), [1, 3, 8, 6]);
        assert_eq!(resize_bicubic(image, [20, 24], false).dims(), [1, 3, 20, 24]);
    }

    #[test]
    fn resize_to_current_extent_is_identity() {
        let device = Default::default();
        let image =
            Tensor::<TestBackend, 4>::random([1, 3, 16, 12], Distribution::Default, &device);

        let once = resize_bicubic(image, [8, 8], true);
        let twice = resize_bicubic(once.clone(), [8, 8], true);

        twice.into_data().assert_eq(&once.into_data(), true);
    }

    #[test]
    fn resize_keeps_constant_images() {
        let device = Default::default();
        let image = Tensor::<TestBackend, 4>::ones([1, 1, 12, 12], &device).mul_scalar(0.5);

        resize_bicubic(image, [6, 6], true).into_data().assert_approx_eq::<f32>(
            &Tensor::<TestBackend, 4>::ones([1, 1, 6, 6], &device)
                .mul_scalar(0.5)
                .into_data(),
            Tolerance::default(),
        );
    }

    #[test]
    fn shrink_factor_rounds_up() {
        assert_eq!(shrink_factor([16, 16], [12, 12]), 2);
        assert_eq!(shrink_factor([16, 16], [8, 8]), 2);
        assert_eq!(shrink_factor([16, 12], [5, 12]), 4);
        assert_eq!(shrink_factor([8, 8], [16, 16]), 1);
    }

    #[test]
    fn fractional_shrink_is_smoothed() {
        let device = Default::default();
        let values = (0..16 * 16)
            .map(|i| ((i / 16 + i % 16) % 2) as f32)
            .collect::<Vec<_>>();
        let checkerboard = Tensor::<TestBackend, 4>::from_data(
            TensorData::new(values, [1, 1, 16, 16]),
            &device,
        );
        let contrast = |tensor: Tensor<TestBackend, 4>| {
            tensor.sub_scalar(0.5).abs().max().into_scalar()
        };

        let smoothed = contrast(resize_bicubic(checkerboard.clone(), [12, 12], true));
        let aliased = contrast(resize_bicubic(checkerboard, [12, 12], false));

        assert!(smoothed < 0.2, "anti-aliased contrast {smoothed}");
        assert!(aliased > 0.3, "plain contrast {aliased}");
    }
}
