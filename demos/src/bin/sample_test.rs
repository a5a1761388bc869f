//! Sample Dataset Test
//!
//! Builds the sample dataset described by an experiment blueprint and reports
//! the shape and value range of its pairs. Useful for checking crop sizes and
//! resampling ratios before training.
//!
//! ## Usage
//!
//! ```bash
//! # Inspect evaluation pairs for x2 super-resolution
//! cargo run --bin sample_test -- --config experiment.json --purpose test
//!
//! # Inspect training batches for deblurring
//! cargo run --bin sample_test -- --config experiment.json --purpose train --task deblurring
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use burn::{
    data::dataloader::{DataLoaderBuilder, Dataset},
    prelude::*,
};
use clap::Parser;
use recon_burn::{build_dataset, PairBatcher, Purpose, SampleDataset};
use recon_demos::{create_device, get_backend_name, load_config, PhysicsArgs, SelectedBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset purpose (train/test)
    #[arg(long, default_value = "test")]
    purpose: String,

    /// Number of samples to inspect
    #[arg(long, default_value = "4")]
    num_samples: usize,

    /// Batch size for training batches
    #[arg(long, default_value = "4")]
    batch_size: usize,

    /// Number of workers for data loading
    #[arg(long, default_value = "2")]
    num_workers: usize,

    #[command(flatten)]
    physics: PhysicsArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let purpose: Purpose = args.purpose.parse()?;

    let device = create_device();
    println!("Using backend: {}", get_backend_name());

    let physics = args.physics.build::<SelectedBackend>(&config, &device)?;
    let dataset = build_dataset(&config, purpose.clone(), physics, &device)
        .context("Failed to create dataset")?;

    let assembler = dataset.assembler();
    let physics = assembler.physics();
    println!(
        "Physics: {} (ratio {}, sigma {:.5})",
        physics.task().as_str(),
        physics.ratio(),
        physics.sigma()
    );
    println!(
        "Dataset: {} with {} samples, purpose {}",
        config.dataset.as_str(),
        dataset.len(),
        assembler.purpose().as_str()
    );
    match assembler.crop() {
        Some(crop) => println!("Training crop: {0}x{0} measurement pixels", crop.size()),
        None => println!("Training crop: none"),
    }

    inspect_samples(&dataset, args.num_samples)?;

    // Evaluation images keep their native extent and cannot be stacked.
    if purpose == Purpose::Train {
        inspect_batches(dataset, args.batch_size, args.num_workers);
    }

    println!("Sample test completed successfully!");
    Ok(())
}

fn inspect_samples(dataset: &SampleDataset<SelectedBackend>, num_samples: usize) -> Result<()> {
    println!("\n=== Individual Samples ===");

    for i in 0..num_samples.min(dataset.len()) {
        let pair = dataset
            .try_get(i)
            .with_context(|| format!("Failed to build sample {i}"))?;

        println!("Sample {i} (id {}):", dataset.ground_truth().unique_id(i));
        println!("  x shape: {:?}", pair.x.dims());
        println!("  y shape: {:?}", pair.y.dims());

        let (min, max, mean) = tensor_stats(pair.y);
        println!("  y stats: min={min:.4}, max={max:.4}, mean={mean:.4}");
    }

    Ok(())
}

fn inspect_batches(dataset: SampleDataset<SelectedBackend>, batch_size: usize, num_workers: usize) {
    println!("\n=== Batches ===");

    let dataloader = DataLoaderBuilder::new(PairBatcher::<SelectedBackend>::new())
        .batch_size(batch_size)
        .shuffle(42)
        .num_workers(num_workers)
        .build(dataset);

    for (i, batch) in dataloader.iter().take(3).enumerate() {
        println!("Batch {}:", i + 1);
        println!("  x shape: {:?}", batch.x.dims());
        println!("  y shape: {:?}", batch.y.dims());
    }
}

fn tensor_stats<B: Backend>(tensor: Tensor<B, 3>) -> (f32, f32, f32) {
    use burn::tensor::cast::ToElement;

    let min = tensor.clone().min().into_scalar().to_f32();
    let max = tensor.clone().max().into_scalar().to_f32();
    let mean = tensor.mean().into_scalar().to_f32();
    (min, max, mean)
}
