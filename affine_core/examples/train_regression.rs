//! Trains a small dense/relu stack on a toy linear regression task and
//! logs the per-iteration error.
//!
//! Run with: cargo run --example train_regression [config.toml]

use affine_core::{logging, DenseLayer, NetworkConfig, Tensor};
use anyhow::{Context, Result};

/// The function the network is asked to recover.
fn target_of(x0: f32, x1: f32) -> f32 {
    0.5 * x0 - 0.3 * x1 + 0.1
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => NetworkConfig::load_from_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => NetworkConfig::default(),
    };

    let mut network = config.build_network()?;
    println!(
        "network: {:?} stages, seed {}, learning rate {}",
        config.layer_sizes, config.seed, config.learning_rate
    );

    let samples: Vec<(Tensor, Tensor)> = [
        [0.0f32, 0.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [0.5, -0.5],
        [-0.5, 0.5],
    ]
    .iter()
    .map(|&[x0, x1]| -> Result<(Tensor, Tensor)> {
        let input = Tensor::from_vec(vec![x0, x1], 1, 2)?;
        let target = Tensor::from_vec(vec![target_of(x0, x1)], 1, 1)?;
        Ok((input, target))
    })
    .collect::<Result<_>>()?;

    let iterations = 500;
    let mut last_rmse = f32::INFINITY;

    for iteration in 0..iterations {
        let mut worst = 0.0f32;
        for (input, target) in &samples {
            let rmse = network.train_step(input, target, config.learning_rate)?;
            worst = worst.max(rmse);
        }
        last_rmse = worst;

        if iteration % 50 == 0 {
            logging::log_training_iteration(iteration, worst, config.learning_rate)?;
            println!("iteration {:4}: worst sample rmse {:.6}", iteration, worst);
        }
    }

    println!("final worst sample rmse after {} iterations: {:.6}", iterations, last_rmse);

    // Show what the trained stack predicts for each sample.
    for (input, target) in &samples {
        let prediction = network.forward(input)?;
        println!(
            "input [{} {}] -> predicted {:.4}, target {:.4}, rmse {:.6}",
            input[0],
            input[1],
            prediction[0],
            target[0],
            DenseLayer::rmse(&prediction, target)?
        );
    }

    Ok(())
}
