//! Demos for the reconstruction sample pipeline.
//!
//! - `sample_test`: builds a sample dataset and reports pair shapes and batches
//! - `loss_probe`: evaluates the composed loss on a few training batches
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin sample_test -- --config experiment.json --purpose test --task sr --ratio 2
//! cargo run --bin loss_probe -- --config experiment.json --task deblurring --kernel-size 9
//! ```

pub mod backend;

use std::{path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use burn::prelude::*;
use clap::Args;
use recon_burn::{
    physics::{Blur, Denoising, Downsampling, Physics},
    ExperimentConfig, Task,
};

pub use backend::{create_device, get_backend_name, SelectedBackend, SelectedDevice};

/// Reads an experiment blueprint from JSON, or uses the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ExperimentConfig> {
    let config = match path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str::<ExperimentConfig>(&config_str)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => ExperimentConfig::new(),
    };

    config.validate().context("Invalid experiment configuration")?;
    Ok(config)
}

/// Command-line description of the degradation.
#[derive(Args, Debug, Clone)]
pub struct PhysicsArgs {
    /// Inverse problem: sr, deblurring or denoising
    #[arg(long, default_value = "sr")]
    pub task: String,

    /// Downsampling ratio for sr
    #[arg(long, default_value = "2")]
    pub ratio: usize,

    /// Gaussian kernel size for deblurring
    #[arg(long, default_value = "9")]
    pub kernel_size: usize,

    /// Gaussian kernel standard deviation for deblurring
    #[arg(long, default_value = "2.0")]
    pub kernel_std: f64,
}

impl PhysicsArgs {
    /// Builds the simulator with the blueprint's noise level.
    pub fn build<B: Backend>(
        &self,
        config: &ExperimentConfig,
        device: &B::Device,
    ) -> Result<Arc<dyn Physics<B>>> {
        let task: Task = self.task.parse()?;
        let sigma = config.sigma();

        let physics: Arc<dyn Physics<B>> = match task {
            Task::Sr => {
                if self.ratio == 0 {
                    bail!("Downsampling ratio must be positive");
                }
                Arc::new(Downsampling::new(self.ratio, sigma))
            }
            Task::Deblurring => {
                if self.kernel_size % 2 == 0 || self.kernel_std <= 0.0 {
                    bail!(
                        "Blur kernel needs an odd size and a positive std, got {} and {}",
                        self.kernel_size,
                        self.kernel_std
                    );
                }
                Arc::new(Blur::gaussian(self.kernel_size, self.kernel_std, sigma, device))
            }
            Task::Denoising => Arc::new(Denoising::new(sigma)),
            Task::Tomography => bail!("No tomography simulator is available in the demos"),
        };

        Ok(physics)
    }
}
