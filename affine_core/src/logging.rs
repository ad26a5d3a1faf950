use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::tensor::TensorStatistics;

fn log_dir() -> io::Result<()> {
    fs::create_dir_all("logs")
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct TensorLogEntry {
    pub context: String,
    pub mean: f32,
    pub variance: f32,
    pub min: f32,
    pub max: f32,
    pub timestamp_ms: u128,
}

pub fn log_tensor(context: &str, stats: &TensorStatistics) -> io::Result<()> {
    log_dir()?;
    let entry = TensorLogEntry {
        context: context.to_string(),
        mean: stats.mean,
        variance: stats.variance,
        min: stats.min,
        max: stats.max,
        timestamp_ms: timestamp_ms(),
    };
    append_json_line("logs/tensors.jsonl", &entry)
}

#[derive(Debug, Serialize)]
pub struct TrainingLogEntry {
    pub iteration: usize,
    pub rmse: f32,
    pub learning_rate: f32,
    pub timestamp_ms: u128,
}

pub fn log_training_iteration(iteration: usize, rmse: f32, learning_rate: f32) -> io::Result<()> {
    log_dir()?;
    let entry = TrainingLogEntry {
        iteration,
        rmse,
        learning_rate,
        timestamp_ms: timestamp_ms(),
    };
    append_json_line("logs/run.jsonl", &entry)
}
