//! Configuration module for the reconstruction pipeline.
//!
//! - `core`: the blueprint structures, one per configurable component
//! - `enums`: the closed enumerations replacing string discriminators

pub mod core;
pub mod enums;

pub use core::{
    ExperimentConfig, GroundTruthConfig, LossConfig, PrepareTrainingPairsConfig,
    ProposedLossConfig, SampleDatasetConfig, ScalingTransformConfig, SingleImageConfig,
    SureConfig,
};

pub use enums::{
    CropLocation, DatasetName, Method, Metric, Purpose, ScalingKind, SureAlternative, Task,
    TransformKind,
};
