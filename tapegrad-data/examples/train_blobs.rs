//! Trains a small linear → sigmoid → linear classifier on synthetic blobs.
//!
//! Run with `RUST_LOG=info cargo run -p tapegrad-data --example train_blobs`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use tapegrad_core::nn::{Linear, Sigmoid};
use tapegrad_core::{Module, Sequential, Tensor, TrainConfig, Trainer};
use tapegrad_data::{gaussian_blobs, BlobsConfig, DataLoader, RandomSampler, SequentialSampler};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let blobs = BlobsConfig {
        classes: 4,
        samples_per_class: 100,
        features: 2,
        spread: 0.8,
        seed: 42,
        ..BlobsConfig::default()
    };
    let train_set = gaussian_blobs(&blobs)?;
    let test_set = gaussian_blobs(&BlobsConfig { seed: 43, ..blobs.clone() })?;

    let mut train_loader = DataLoader::labeled(train_set, 32, RandomSampler::seeded(42), false)?;
    let mut test_loader = DataLoader::labeled(test_set, 64, SequentialSampler::new(), false)?;

    let mut rng = StdRng::seed_from_u64(42);
    let model = Sequential::new()
        .with(Linear::new(blobs.features, 16, true, &mut rng)?)
        .with(Sigmoid)
        .with(Linear::new(16, blobs.classes, true, &mut rng)?);

    let config = TrainConfig {
        epochs: 20,
        learning_rate: 0.5,
        momentum: 0.5,
        lr_step: Some((10, 0.5)),
        log_every: 5,
        ..TrainConfig::default()
    };
    let mut trainer = Trainer::new(model, config)?;

    println!("--- Training on {} batches per epoch ---", train_loader.num_batches());
    let reports = trainer.fit(&mut train_loader)?;
    for report in &reports {
        println!(
            "epoch {:>2}: mean loss {:.4} ({} batches)",
            report.epoch, report.mean_loss, report.batches
        );
    }

    let eval = trainer.evaluate(&mut test_loader)?;
    println!(
        "--- Held-out: loss {:.4}, accuracy {:.1}% over {} samples ---",
        eval.mean_loss,
        eval.accuracy * 100.0,
        eval.samples
    );

    let probe = Tensor::new(vec![blobs.center_distance, 0.0], vec![1, blobs.features])?;
    let proba = trainer.predict_proba(&probe)?;
    println!("P(class | {:?}) = {:?}", probe.data(), proba.data());

    let checkpoint = trainer.model().state_dict();
    for (name, value) in &checkpoint {
        println!("  {:<10} shape {:?}", name, value.shape());
    }
    Ok(())
}
