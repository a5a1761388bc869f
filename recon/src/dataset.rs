//! # Sample Dataset
//!
//! Index-addressable `(x, y)` pairs: ground truth from a
//! [`GroundTruthDataset`], shaped into pairs by a [`PairAssembler`].

use std::sync::Arc;

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    prelude::*,
};
use log::{error, info};

use crate::{
    config::{ExperimentConfig, Method, Purpose},
    error::ReconResult,
    ground_truth::GroundTruthDataset,
    pairs::{CropPair, PairAssembler},
    physics::Physics,
};

/// One training or evaluation sample.
#[derive(Debug, Clone)]
pub struct SamplePair<B: Backend> {
    /// Reference image `[C, H, W]`: ground truth, its css proxy, or the
    /// noise2inverse target.
    pub x: Tensor<B, 3>,
    /// Measurement `[C, H / r, W / r]` fed to the model.
    pub y: Tensor<B, 3>,
}

impl<B: Backend> SamplePair<B> {
    pub const fn new(x: Tensor<B, 3>, y: Tensor<B, 3>) -> Self {
        Self { x, y }
    }
}

/// A batch of sample pairs.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// Batched references `[N, C, H, W]`.
    pub x: Tensor<B, 4>,
    /// Batched measurements `[N, C, H / r, W / r]`.
    pub y: Tensor<B, 4>,
}

/// Stacks [`SamplePair`]s into a [`PairBatch`] on the requested device.
#[derive(Clone, Default)]
pub struct PairBatcher<B: Backend> {
    _phantom: std::marker::PhantomData<B>,
}

impl<B: Backend> PairBatcher<B> {
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<B: Backend> Batcher<B, SamplePair<B>, PairBatch<B>> for PairBatcher<B> {
    fn batch(&self, items: Vec<SamplePair<B>>, device: &B::Device) -> PairBatch<B> {
        let mut xs = Vec::with_capacity(items.len());
        let mut ys = Vec::with_capacity(items.len());

        for item in items {
            xs.push(item.x);
            ys.push(item.y);
        }

        PairBatch {
            x: Tensor::stack::<4>(xs, 0).to_device(device),
            y: Tensor::stack::<4>(ys, 0).to_device(device),
        }
    }
}

/// Ground truth composed with a pair assembler.
pub struct SampleDataset<B: Backend> {
    ground_truth: GroundTruthDataset<B>,
    assembler: PairAssembler<B>,
}

impl<B: Backend> SampleDataset<B> {
    pub const fn new(ground_truth: GroundTruthDataset<B>, assembler: PairAssembler<B>) -> Self {
        Self {
            ground_truth,
            assembler,
        }
    }

    /// The pair at `index`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures and crop or shape errors.
    pub fn try_get(&self, index: usize) -> ReconResult<SamplePair<B>> {
        let ground_truth = self.ground_truth.get(index)?;
        let sample_id = self.ground_truth.unique_id(index);
        self.assembler.build(sample_id, ground_truth)
    }

    pub fn ground_truth(&self) -> &GroundTruthDataset<B> {
        &self.ground_truth
    }

    pub fn assembler(&self) -> &PairAssembler<B> {
        &self.assembler
    }
}

impl<B: Backend> Dataset<SamplePair<B>> for SampleDataset<B> {
    fn get(&self, index: usize) -> Option<SamplePair<B>> {
        if index >= self.len() {
            return None;
        }
        // `None` ends the loader's epoch, so a bad sample must not map to it.
        let pair = self.try_get(index).unwrap_or_else(|err| {
            error!("Failed to build sample {index}: {err}");
            panic!("Failed to build sample {index}: {err}")
        });
        Some(pair)
    }

    fn len(&self) -> usize {
        self.ground_truth.len()
    }
}

/// Builds the dataset for `purpose` from the experiment blueprint.
///
/// Evaluation reads `config.split`, never memoizes and never pre-degrades, and
/// applies the noise2inverse fix-ups when `config.noise2inverse` is set.
/// Training reads the `train` split and derives css and noise2inverse from the
/// method.
///
/// # Errors
///
/// Fails on an invalid configuration or if the ground truth cannot be opened.
pub fn build_dataset<B: Backend>(
    config: &ExperimentConfig,
    purpose: Purpose,
    physics: Arc<dyn Physics<B>>,
    device: &B::Device,
) -> ReconResult<SampleDataset<B>> {
    config.validate()?;

    let (split, memoize, css, noise2inverse) = match purpose {
        Purpose::Test => (config.split.as_str(), false, false, config.noise2inverse),
        Purpose::Train => (
            "train",
            config.memoize_gt,
            config.method == Method::Css,
            config.method == Method::Noise2Inverse,
        ),
    };

    let ground_truth = GroundTruthDataset::new(config, split, memoize, device)?;

    let crop = (purpose == Purpose::Train && config.pairs.enabled)
        .then(|| CropPair::new(config.pairs.crop_size, config.pairs.crop_location.clone()));

    info!(
        "Sample dataset: {} purpose, method {}, css {css}, noise2inverse {noise2inverse}",
        purpose.as_str(),
        config.method.as_str()
    );

    let assembler = PairAssembler::new(physics, purpose)
        .with_css(css)
        .with_noise2inverse(noise2inverse)
        .with_unique_seeds(config.sample_dataset.unique_seeds)
        .with_crop(crop);

    Ok(SampleDataset::new(ground_truth, assembler))
}

#[cfg(test)]
mod tests {
    use burn::{
        data::dataloader::DataLoaderBuilder,
        tensor::{Distribution, TensorData},
    };

    use super::*;
    use crate::{
        error::GroundTruthError,
        ground_truth::GroundTruthBackend,
        physics::Denoising,
        tests::TestBackend,
    };

    struct Failing;

    impl GroundTruthBackend for Failing {
        fn get(&self, index: usize) -> Result<TensorData, GroundTruthError> {
            Err(GroundTruthError::IndexOutOfRange { index, len: 0 })
        }

        fn len(&self) -> usize {
            1
        }
    }

    #[test]
    fn batcher_stacks_pairs() {
        let device = Default::default();
        let pair = || {
            SamplePair::<TestBackend>::new(
                Tensor::random([3, 16, 16], Distribution::Default, &device),
                Tensor::random([3, 8, 8], Distribution::Default, &device),
            )
        };

        let batch = PairBatcher::<TestBackend>::new().batch(vec![pair(), pair(), pair()], &device);

        assert_eq!(batch.x.dims(), [3, 3, 16, 16]);
        assert_eq!(batch.y.dims(), [3, 3, 8, 8]);
    }

    /// Four constant images, the one at `bad` unreadable.
    struct FailingAt {
        bad: usize,
    }

    impl GroundTruthBackend for FailingAt {
        fn get(&self, index: usize) -> Result<TensorData, GroundTruthError> {
            if index == self.bad {
                return Err(GroundTruthError::IndexOutOfRange { index, len: 0 });
            }
            Ok(TensorData::new(vec![0.5f32; 64], [1, 8, 8]))
        }

        fn len(&self) -> usize {
            4
        }
    }

    fn dataset_over(backend: Box<dyn GroundTruthBackend>) -> SampleDataset<TestBackend> {
        let device = Default::default();
        let ground_truth = GroundTruthDataset::<TestBackend>::from_backend(backend, None, None, &device);
        let assembler = PairAssembler::new(Arc::new(Denoising::new(0.0)), Purpose::Test);
        SampleDataset::new(ground_truth, assembler)
    }

    #[test]
    fn try_get_reports_backend_errors() {
        let dataset = dataset_over(Box::new(Failing));

        assert_eq!(dataset.len(), 1);
        assert!(dataset.try_get(0).is_err());
        assert!(dataset.get(1).is_none());
    }

    #[test]
    #[should_panic(expected = "Failed to build sample 0")]
    fn get_panics_on_backend_errors() {
        let dataset = dataset_over(Box::new(Failing));
        let _ = dataset.get(0);
    }

    #[test]
    fn get_reads_past_good_samples() {
        let dataset = dataset_over(Box::new(FailingAt { bad: 4 }));

        assert!(dataset.get(3).is_some());
        assert!(dataset.get(4).is_none());
    }

    #[test]
    #[should_panic(expected = "Failed to build sample 1")]
    fn bad_sample_aborts_loader_epoch() {
        let dataset = dataset_over(Box::new(FailingAt { bad: 1 }));
        let dataloader = DataLoaderBuilder::new(PairBatcher::<TestBackend>::new())
            .batch_size(1)
            .build(dataset);

        // Without the panic the epoch would end after one batch.
        let _ = dataloader.iter().count();
    }
}
