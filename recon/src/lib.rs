//! Sample construction and loss composition for learned image reconstruction.
//!
//! The crate sits between a source of clean images and a reconstruction model:
//!
//! - [`ground_truth`] serves clean images by index, optionally resized and
//!   memoized;
//! - [`physics`] simulates noisy measurements with reproducible seeding;
//! - [`pairs`] turns an image into the `(x, y)` pair a learning strategy
//!   needs, and [`dataset`] exposes those pairs through Burn's `Dataset`;
//! - [`losses`] composes supervised, SURE, equivariant-imaging and
//!   recorrupted-to-recorrupted strategies into one training loss.
//!
//! Everything is configured from an [`ExperimentConfig`] blueprint.
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use burn::backend::NdArray;
//! use burn::data::dataset::Dataset;
//! use recon_burn::{
//!     build_dataset, build_loss, physics::{Downsampling, Physics}, DatasetName, ExperimentConfig,
//!     Method, PairBatcher, Purpose, PseudoInverse,
//! };
//! use burn::data::dataloader::batcher::Batcher;
//!
//! type B = NdArray<f32>;
//!
//! # fn main() -> Result<(), recon_burn::ReconError> {
//! let device = Default::default();
//! let config = ExperimentConfig::new()
//!     .with_dataset(DatasetName::Urban100)
//!     .with_method(Method::Proposed);
//! let physics: Arc<dyn Physics<B>> = Arc::new(Downsampling::new(2, config.sigma()));
//!
//! let dataset = build_dataset(&config, Purpose::Train, physics.clone(), &device)?;
//! let loss = build_loss(&config, physics)?;
//!
//! let items = (0..4).filter_map(|i| dataset.get(i)).collect();
//! let batch = PairBatcher::<B>::new().batch(items, &device);
//! let value = loss.evaluate(batch.x, batch.y, &PseudoInverse)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod ground_truth;
pub mod losses;
pub mod model;
pub mod pairs;
pub mod physics;
mod resize;

pub use config::*;
pub use dataset::{build_dataset, PairBatch, PairBatcher, SampleDataset, SamplePair};
pub use error::{GroundTruthError, ReconError, ReconResult};
pub use ground_truth::GroundTruthDataset;
pub use losses::{build_loss, Estimator, Loss};
pub use model::{PseudoInverse, Reconstructor};
pub use pairs::{CropPair, PairAssembler};
pub use resize::resize_bicubic;

#[cfg(test)]
mod tests;
