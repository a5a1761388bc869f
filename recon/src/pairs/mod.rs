//! # Pair Assembler
//!
//! Turns one clean image into the `(x, y)` pair a learning strategy trains
//! on: it picks the measurement seed, simulates the measurement, and splits,
//! crops or trims the result depending on purpose and method.

mod crop;
mod noise2inverse;

pub use crop::CropPair;
pub use noise2inverse::Noise2InverseSplit;

use std::sync::Arc;

use burn::prelude::*;
use burn_extra_ops::{CropWindow, TensorExtraOps};
use log::debug;

use crate::{
    config::{Purpose, Task},
    dataset::SamplePair,
    error::{ReconError, ReconResult},
    physics::Physics,
};

/// Seed shared by every evaluation sample when unique seeds are disabled.
pub const SHARED_SEED: u64 = 0;

/// Builds sample pairs from clean images.
pub struct PairAssembler<B: Backend> {
    physics: Arc<dyn Physics<B>>,
    purpose: Purpose,
    css: bool,
    noise2inverse: bool,
    unique_seeds: bool,
    crop: Option<CropPair>,
}

impl<B: Backend> PairAssembler<B> {
    /// An assembler with plain pairs, unique seeds and no crop.
    pub fn new(physics: Arc<dyn Physics<B>>, purpose: Purpose) -> Self {
        Self {
            physics,
            purpose,
            css: false,
            noise2inverse: false,
            unique_seeds: true,
            crop: None,
        }
    }

    /// Degrade the clean image once before the measurement is simulated.
    /// Only honoured for training.
    pub fn with_css(mut self, css: bool) -> Self {
        self.css = css;
        self
    }

    pub fn with_noise2inverse(mut self, noise2inverse: bool) -> Self {
        self.noise2inverse = noise2inverse;
        self
    }

    pub fn with_unique_seeds(mut self, unique_seeds: bool) -> Self {
        self.unique_seeds = unique_seeds;
        self
    }

    /// The training crop; evaluation pairs are never cropped this way.
    pub fn with_crop(mut self, crop: Option<CropPair>) -> Self {
        self.crop = crop;
        self
    }

    pub fn physics(&self) -> &Arc<dyn Physics<B>> {
        &self.physics
    }

    pub fn purpose(&self) -> &Purpose {
        &self.purpose
    }

    pub fn crop(&self) -> Option<&CropPair> {
        self.crop.as_ref()
    }

    /// The measurement seed for the sample identified by `sample_id`.
    ///
    /// Evaluation is deterministic; training draws fresh noise every call.
    pub fn seed(&self, sample_id: u64) -> Option<u64> {
        match self.purpose {
            Purpose::Test if self.unique_seeds => Some(sample_id),
            Purpose::Test => Some(SHARED_SEED),
            Purpose::Train => None,
        }
    }

    /// Builds the pair for a `[C, H, W]` clean image.
    ///
    /// # Errors
    ///
    /// Fails if a crop does not fit or the reference cannot be aligned with
    /// the measurement.
    pub fn build(&self, sample_id: u64, ground_truth: Tensor<B, 3>) -> ReconResult<SamplePair<B>> {
        let mut x = ground_truth.unsqueeze_dim::<4>(0);

        if self.css && self.purpose == Purpose::Train {
            x = self.physics.apply(x, None);
        }

        let seed = self.seed(sample_id);
        debug!("Sample {sample_id}: measurement seed {seed:?}");
        let y = self.physics.apply(x.clone(), seed);

        let (x, y) = match self.purpose {
            Purpose::Train => self.finish_train(x, y)?,
            Purpose::Test => self.finish_test(x, y)?,
        };

        Ok(SamplePair::new(x.squeeze(0), y.squeeze(0)))
    }

    fn finish_train(
        &self,
        x: Tensor<B, 4>,
        y: Tensor<B, 4>,
    ) -> ReconResult<(Tensor<B, 4>, Tensor<B, 4>)> {
        let (x, y) = if self.noise2inverse {
            Noise2InverseSplit.apply(self.physics.as_ref(), y)
        } else {
            (x, y)
        };

        match &self.crop {
            Some(crop) => crop.apply(x, y, self.physics.ratio()),
            None => Ok((x, y)),
        }
    }

    fn finish_test(
        &self,
        x: Tensor<B, 4>,
        mut y: Tensor<B, 4>,
    ) -> ReconResult<(Tensor<B, 4>, Tensor<B, 4>)> {
        if self.noise2inverse && self.physics.task() == Task::Deblurring {
            let [_, _, height, width] = y.dims();
            y = y.crop(CropWindow::top_left(height / 2 * 2, width / 2 * 2));
        }

        let (x_dims, y_dims) = (x.dims(), y.dims());
        if x_dims == y_dims {
            return Ok((x, y));
        }

        let ratio = self.physics.ratio();
        let window = CropWindow::top_left(y_dims[2] * ratio, y_dims[3] * ratio);
        if x_dims[1] != y_dims[1] || !window.fits(x_dims[2], x_dims[3]) {
            return Err(ReconError::shape_mismatch(
                [x_dims[0], y_dims[1], window.height, window.width],
                x_dims,
            ));
        }

        Ok((x.crop(window), y))
    }
}
