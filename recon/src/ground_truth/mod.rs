//! # Ground-Truth Provider
//!
//! Serves clean images by index from one of the configured backends, with an
//! optional bicubic resize and optional memoization.

mod backends;
mod cache;

pub use backends::{ct, div2k, image_to_data, urban100, GroundTruthBackend, ImageFolder, SingleImage};
pub use cache::GroundTruthCache;

use burn::prelude::*;
use log::{debug, info};

use crate::{
    config::{DatasetName, ExperimentConfig},
    error::ReconResult,
    resize::resize_bicubic,
};

/// Clean images on a chosen device.
pub struct GroundTruthDataset<B: Backend> {
    backend: Box<dyn GroundTruthBackend>,
    size: Option<[usize; 2]>,
    cache: Option<GroundTruthCache>,
    device: B::Device,
}

impl<B: Backend> GroundTruthDataset<B> {
    /// Opens the backend named by `config.dataset` for `split`.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the dataset cannot be found or decoded.
    pub fn new(
        config: &ExperimentConfig,
        split: &str,
        memoize: bool,
        device: &B::Device,
    ) -> ReconResult<Self> {
        let datasets_dir = &config.ground_truth.datasets_dir;
        let backend: Box<dyn GroundTruthBackend> = match config.dataset {
            DatasetName::Div2k => Box::new(div2k(datasets_dir, split)?),
            DatasetName::Urban100 => Box::new(urban100(datasets_dir, split)?),
            DatasetName::Ct => Box::new(ct(datasets_dir, split)?),
            DatasetName::SingleImage => Box::new(SingleImage::open(&config.single_image)?),
        };

        info!(
            "Ground truth: {} ({split}), {} images",
            config.dataset.as_str(),
            backend.len()
        );

        let capacity = config.ground_truth.cache_capacity;
        Ok(Self::from_backend(
            backend,
            config.ground_truth.size,
            memoize.then(|| GroundTruthCache::new(capacity)),
            device,
        ))
    }

    /// Wraps an already constructed backend.
    pub fn from_backend(
        backend: Box<dyn GroundTruthBackend>,
        size: Option<[usize; 2]>,
        cache: Option<GroundTruthCache>,
        device: &B::Device,
    ) -> Self {
        Self {
            backend,
            size,
            cache,
            device: device.clone(),
        }
    }

    /// The `[C, H, W]` image at `index`, resized if a size is configured.
    ///
    /// # Errors
    ///
    /// Propagates the backend error unchanged.
    pub fn get(&self, index: usize) -> ReconResult<Tensor<B, 3>> {
        if let Some(data) = self.cache.as_ref().and_then(|cache| cache.get(index)) {
            debug!("Ground truth {index} served from cache");
            return Ok(Tensor::from_data(data, &self.device));
        }

        let data = self.backend.get(index)?;
        let mut image = Tensor::<B, 3>::from_data(data, &self.device);
        if let Some(size) = self.size {
            image = resize_bicubic(image.unsqueeze_dim(0), size, true).squeeze(0);
        }

        if let Some(cache) = &self.cache {
            cache.insert(index, image.to_data());
        }

        Ok(image)
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// A stable identifier for `index`: the backend's, else the index itself.
    pub fn unique_id(&self, index: usize) -> u64 {
        self.backend.unique_id(index).unwrap_or(index as u64)
    }

    pub fn is_memoized(&self) -> bool {
        self.cache.is_some()
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }
}
