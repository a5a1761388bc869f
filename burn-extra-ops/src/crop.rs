//! # Spatial Cropping
//!
//! Window extraction over the two trailing dimensions of a tensor.

use burn::prelude::*;

/// A rectangular window over the spatial dimensions `[.., H, W]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub top: usize,
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl CropWindow {
    pub const fn new(top: usize, left: usize, height: usize, width: usize) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    /// A window anchored at the top-left corner.
    pub const fn top_left(height: usize, width: usize) -> Self {
        Self::new(0, 0, height, width)
    }

    /// Scales every coordinate by an integer factor.
    pub const fn scaled(&self, factor: usize) -> Self {
        Self::new(
            self.top * factor,
            self.left * factor,
            self.height * factor,
            self.width * factor,
        )
    }

    /// Whether the window lies fully inside an `height x width` plane.
    pub const fn fits(&self, height: usize, width: usize) -> bool {
        self.top + self.height <= height && self.left + self.width <= width
    }
}

/// Extracts `window` from the two trailing dimensions of `input`.
///
/// # Panics
///
/// Panics if the window does not fit the spatial extent of `input`; callers
/// validate with [`CropWindow::fits`] first.
pub fn crop<B: Backend, const D: usize>(input: Tensor<B, D>, window: CropWindow) -> Tensor<B, D> {
    let dims = input.dims();
    assert!(
        window.fits(dims[D - 2], dims[D - 1]),
        "crop window {window:?} does not fit spatial extent {}x{}",
        dims[D - 2],
        dims[D - 1]
    );

    input
        .narrow(D - 2, window.top, window.height)
        .narrow(D - 1, window.left, window.width)
}

#[cfg(test)]
mod tests {
    use burn::tensor::{TensorData, Tolerance};

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn crop_extracts_requested_window() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 3>::from_data(
            [[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]]],
            &device,
        );

        let cropped = crop(tensor, CropWindow::new(1, 1, 2, 2));

        cropped.into_data().assert_approx_eq::<f32>(
            &TensorData::from([[[4.0, 5.0], [7.0, 8.0]]]),
            Tolerance::default(),
        );
    }

    #[test]
    fn scaled_window_multiplies_every_coordinate() {
        let window = CropWindow::new(1, 2, 3, 4).scaled(2);
        assert_eq!(window, CropWindow::new(2, 4, 6, 8));
    }

    #[test]
    fn fits_checks_both_axes() {
        let window = CropWindow::top_left(4, 4);
        assert!(window.fits(4, 4));
        assert!(!window.fits(3, 8));
        assert!(!CropWindow::new(1, 0, 4, 4).fits(4, 4));
    }

    #[test]
    #[should_panic = "does not fit spatial extent"]
    fn crop_outside_bounds_panics() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::zeros([1, 1, 4, 4], &device);
        let _ = crop(tensor, CropWindow::new(2, 2, 4, 4));
    }
}
