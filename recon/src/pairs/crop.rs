use burn::prelude::*;
use burn_extra_ops::{CropWindow, TensorExtraOps};
use log::debug;
use rand::Rng;

use crate::{
    config::CropLocation,
    error::{ReconError, ReconResult},
};

/// Crops a reference image and its measurement at matching locations.
///
/// The window is chosen in measurement coordinates and scaled by the
/// resampling ratio for the reference, so a `size x size` measurement crop
/// pairs with a `size * ratio` square of the reference. Used both when a
/// sample is built and when the loss re-crops a batch.
#[derive(Debug, Clone)]
pub struct CropPair {
    size: usize,
    location: CropLocation,
}

impl CropPair {
    pub const fn new(size: usize, location: CropLocation) -> Self {
        Self { size, location }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// The measurement window for a `[height, width]` measurement.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::CropOutOfBounds`] if the crop does not fit.
    pub fn window(&self, height: usize, width: usize) -> ReconResult<CropWindow> {
        let out_of_bounds = |top, left| ReconError::CropOutOfBounds {
            top,
            left,
            height: self.size,
            width: self.size,
            available_height: height,
            available_width: width,
        };

        let window = match self.location {
            CropLocation::Random => {
                if self.size > height || self.size > width {
                    return Err(out_of_bounds(0, 0));
                }
                let mut rng = rand::rng();
                let top = rng.random_range(0..=height - self.size);
                let left = rng.random_range(0..=width - self.size);
                CropWindow::new(top, left, self.size, self.size)
            }
            CropLocation::Fixed(top, left) => CropWindow::new(top, left, self.size, self.size),
        };

        if !window.fits(height, width) {
            return Err(out_of_bounds(window.top, window.left));
        }
        Ok(window)
    }

    /// Crops `x` (reference) and `y` (measurement) together.
    ///
    /// Works on single signals `[C, H, W]` and on batches `[N, C, H, W]`; a
    /// batch shares one window.
    ///
    /// # Errors
    ///
    /// Fails if either window falls outside its tensor.
    pub fn apply<B: Backend, const D: usize>(
        &self,
        x: Tensor<B, D>,
        y: Tensor<B, D>,
        ratio: usize,
    ) -> ReconResult<(Tensor<B, D>, Tensor<B, D>)> {
        let y_dims = y.dims();
        let window = self.window(y_dims[D - 2], y_dims[D - 1])?;
        let x_window = window.scaled(ratio);

        let x_dims = x.dims();
        let (x_height, x_width) = (x_dims[D - 2], x_dims[D - 1]);
        if !x_window.fits(x_height, x_width) {
            return Err(ReconError::CropOutOfBounds {
                top: x_window.top,
                left: x_window.left,
                height: x_window.height,
                width: x_window.width,
                available_height: x_height,
                available_width: x_width,
            });
        }

        debug!("Paired crop at {window:?} (ratio {ratio})");
        Ok((x.crop(x_window), y.crop(window)))
    }
}
