//! Loss Probe
//!
//! Evaluates the loss composed for the blueprint's method on a few training
//! batches, using the pseudo-inverse of the physics in place of a trained
//! model. Useful for checking that a configuration builds and yields finite
//! values.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin loss_probe -- --config experiment.json --task sr --ratio 2
//! cargo run --bin loss_probe -- --method sure --task denoising --num-batches 5
//! ```

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use burn::{
    data::dataloader::{batcher::Batcher, Dataset},
    tensor::cast::ToElement,
};
use clap::Parser;
use log::info;
use recon_burn::{build_dataset, build_loss, Method, PairBatcher, PseudoInverse, Purpose};
use recon_demos::{create_device, get_backend_name, load_config, PhysicsArgs, SelectedBackend};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the training method
    #[arg(long)]
    method: Option<String>,

    /// Batch size
    #[arg(long, default_value = "4")]
    batch_size: usize,

    /// Number of batches to score
    #[arg(long, default_value = "3")]
    num_batches: usize,

    #[command(flatten)]
    physics: PhysicsArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(method) = &args.method {
        config.method = method.parse::<Method>()?;
    }
    ensure!(args.batch_size > 0, "Batch size must be greater than 0");

    let device = create_device();
    println!("Using backend: {}", get_backend_name());

    let physics = args.physics.build::<SelectedBackend>(&config, &device)?;
    let dataset = build_dataset(&config, Purpose::Train, physics.clone(), &device)
        .context("Failed to create training dataset")?;
    let loss = build_loss(&config, physics).context("Failed to build loss")?;

    println!(
        "Method {}: {} strategies, reconstructs before dispatch: {}",
        config.method.as_str(),
        loss.estimators().len(),
        loss.computes_x_net()
    );

    let batcher = PairBatcher::<SelectedBackend>::new();
    let indices: Vec<usize> = (0..dataset.len()).collect();

    for (i, chunk) in indices
        .chunks(args.batch_size)
        .take(args.num_batches)
        .enumerate()
    {
        let items = chunk
            .iter()
            .map(|&index| dataset.try_get(index))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to build batch {}", i + 1))?;
        let batch = batcher.batch(items, &device);
        info!("Batch {}: x {:?}, y {:?}", i + 1, batch.x.dims(), batch.y.dims());

        let value = loss
            .evaluate(batch.x, batch.y, &PseudoInverse)
            .with_context(|| format!("Failed to evaluate batch {}", i + 1))?
            .into_scalar()
            .to_f64();
        ensure!(value.is_finite(), "Loss of batch {} is not finite", i + 1);

        println!("Batch {}: loss = {value:.6}", i + 1);
    }

    println!("Loss probe completed successfully!");
    Ok(())
}
