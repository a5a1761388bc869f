//! Core configuration structures for the reconstruction pipeline.
//!
//! The blueprint is a tree of component options: each struct below configures
//! exactly one component and is read once at construction time.

use std::path::PathBuf;

use burn::prelude::*;

use super::enums::*;
use crate::error::{ReconError, ReconResult};

/// Top-level experiment blueprint.
///
/// Aggregates the per-component configurations together with the options
/// shared by several components (dataset, method, noise level).
#[derive(Config, Debug)]
pub struct ExperimentConfig {
    /// Which ground-truth backend to read.
    #[config(default = "DatasetName::Div2k")]
    pub dataset: DatasetName,
    /// The learning strategy.
    #[config(default = "Method::Proposed")]
    pub method: Method,
    /// Noise standard deviation on the 8-bit intensity scale.
    #[config(default = 5.0)]
    pub noise_level: f64,
    /// Split used for evaluation; training always reads `train`.
    #[config(default = "String::from(\"val\")")]
    pub split: String,
    /// Cache ground truth across epochs. Only honoured for training.
    #[config(default = false)]
    pub memoize_gt: bool,
    /// Apply the noise2inverse shape fix-ups when evaluating.
    #[config(default = false)]
    pub noise2inverse: bool,
    /// Ground-truth provider options.
    #[config(default = "GroundTruthConfig::new()")]
    pub ground_truth: GroundTruthConfig,
    /// Options of the `single_image` backend.
    #[config(default = "SingleImageConfig::new()")]
    pub single_image: SingleImageConfig,
    /// Dataset-time training crop.
    #[config(default = "PrepareTrainingPairsConfig::new()")]
    pub pairs: PrepareTrainingPairsConfig,
    /// Sample dataset options.
    #[config(default = "SampleDatasetConfig::new()")]
    pub sample_dataset: SampleDatasetConfig,
    /// Loss composer options.
    #[config(default = "LossConfig::new()")]
    pub loss: LossConfig,
    /// Risk-estimate options.
    #[config(default = "SureConfig::new()")]
    pub sure: SureConfig,
    /// Options of the proposed composition.
    #[config(default = "ProposedLossConfig::new()")]
    pub proposed: ProposedLossConfig,
    /// Options of the scaling equivariance transform.
    #[config(default = "ScalingTransformConfig::new()")]
    pub scaling: ScalingTransformConfig,
}

/// Ground-truth provider configuration.
#[derive(Config, Debug)]
pub struct GroundTruthConfig {
    /// Root directory holding the datasets.
    #[config(default = "PathBuf::from(\"datasets\")")]
    pub datasets_dir: PathBuf,
    /// Resize every image to `[height, width]` with a bicubic filter.
    #[config(default = "None")]
    pub size: Option<[usize; 2]>,
    /// Upper bound on memoized images; unbounded when `None`.
    #[config(default = "None")]
    pub cache_capacity: Option<usize>,
}

/// Configuration of the `single_image` backend.
#[derive(Config, Debug)]
pub struct SingleImageConfig {
    /// The image to serve.
    #[config(default = "PathBuf::from(\"image.png\")")]
    pub image_path: PathBuf,
    /// How many times the image is repeated, i.e. the dataset length.
    #[config(default = 1)]
    pub duplicates_count: usize,
}

/// Dataset-time paired crop.
#[derive(Config, Debug)]
pub struct PrepareTrainingPairsConfig {
    /// Crop training pairs at all; full images are returned otherwise.
    #[config(default = true)]
    pub enabled: bool,
    /// Crop size in measurement pixels.
    #[config(default = 48)]
    pub crop_size: usize,
    /// Crop placement.
    #[config(default = "CropLocation::Random")]
    pub crop_location: CropLocation,
}

/// Sample dataset configuration.
#[derive(Config, Debug)]
pub struct SampleDatasetConfig {
    /// Seed each evaluation measurement with the sample's unique id instead of
    /// a single shared seed.
    #[config(default = true)]
    pub unique_seeds: bool,
}

/// Loss composer configuration.
#[derive(Config, Debug)]
pub struct LossConfig {
    /// Re-crop the batch pair before evaluating the strategies.
    #[config(default = false)]
    pub crop_training_pairs: bool,
    /// Crop size in measurement pixels when re-cropping.
    #[config(default = 48)]
    pub crop_size: usize,
    /// Distance of the `supervised` method.
    #[config(default = "Metric::Mse")]
    pub metric: Metric,
}

/// Stein's unbiased risk estimate configuration.
#[derive(Config, Debug)]
pub struct SureConfig {
    /// Restrict the divergence to the margin-cropped region.
    #[config(default = false)]
    pub cropped_div: bool,
    /// Use the per-pixel averaged form of the estimate.
    #[config(default = false)]
    pub averaged_cst: bool,
    /// Explicit border margin in pixels. Requires `partial`.
    #[config(default = "None")]
    pub margin: Option<usize>,
    /// Exclude a border margin from the estimate.
    #[config(default = false)]
    pub partial: bool,
    /// Use a two pixel margin for super-resolution when `partial`.
    #[config(default = false)]
    pub partial_sr: bool,
    /// Finite-difference step of the Monte Carlo divergence.
    #[config(default = 0.01)]
    pub tau: f64,
}

/// Configuration of the proposed composition.
#[derive(Config, Debug)]
pub struct ProposedLossConfig {
    /// Keep the transformed reference out of the gradient computation.
    #[config(default = true)]
    pub stop_gradient: bool,
    /// Replace the risk estimate by another strategy.
    #[config(default = "None")]
    pub sure_alternative: Option<SureAlternative>,
    /// Weight of the equivariant-imaging term.
    #[config(default = 1.0)]
    pub alpha_tradeoff: f64,
    /// Transform family of the equivariant-imaging term.
    #[config(default = "TransformKind::Rotations")]
    pub transforms: TransformKind,
    /// Recorruption strength of the `r2r` alternative.
    #[config(default = 0.5)]
    pub recorruption_alpha: f64,
}

/// Scaling equivariance transform configuration.
#[derive(Config, Debug)]
pub struct ScalingTransformConfig {
    /// How the rescaled image is brought back to a usable extent.
    #[config(default = "ScalingKind::Padded")]
    pub kind: ScalingKind,
    /// Low-pass filter the image before shrinking it.
    #[config(default = false)]
    pub antialias: bool,
}

impl ExperimentConfig {
    /// Validate the configuration and return appropriate errors for invalid settings.
    ///
    /// # Errors
    ///
    /// Returns `Err(ReconError::InvalidConfiguration)` if any validation rule is violated.
    pub fn validate(&self) -> ReconResult<()> {
        if self.noise_level < 0.0 {
            return Err(ReconError::InvalidConfiguration {
                reason: format!("noise_level must be non-negative, got {}", self.noise_level),
            });
        }

        if self.pairs.crop_size == 0 || self.loss.crop_size == 0 {
            return Err(ReconError::InvalidConfiguration {
                reason: "crop sizes must be positive".to_string(),
            });
        }

        if self.dataset == DatasetName::SingleImage && self.single_image.duplicates_count == 0 {
            return Err(ReconError::InvalidConfiguration {
                reason: "single_image needs duplicates_count >= 1".to_string(),
            });
        }

        if let Some([height, width]) = self.ground_truth.size {
            if height == 0 || width == 0 {
                return Err(ReconError::InvalidConfiguration {
                    reason: format!("ground-truth size must be positive, got {height}x{width}"),
                });
            }
        }

        if self.ground_truth.cache_capacity == Some(0) {
            return Err(ReconError::InvalidConfiguration {
                reason: "cache_capacity must be positive when set".to_string(),
            });
        }

        if self.sure.margin.is_some() && !self.sure.partial {
            return Err(ReconError::InvalidConfiguration {
                reason: "an explicit SURE margin requires partial SURE".to_string(),
            });
        }

        if self.sure.tau <= 0.0 {
            return Err(ReconError::InvalidConfiguration {
                reason: format!("SURE tau must be positive, got {}", self.sure.tau),
            });
        }

        if self.proposed.alpha_tradeoff <= 0.0 || self.proposed.recorruption_alpha <= 0.0 {
            return Err(ReconError::InvalidConfiguration {
                reason: "alpha_tradeoff and recorruption_alpha must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Noise standard deviation on the unit intensity scale.
    pub fn sigma(&self) -> f64 {
        self.noise_level / 255.0
    }
}
