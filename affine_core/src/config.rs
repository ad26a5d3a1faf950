//! Network configuration via TOML files.
//!
//! A `[network]` table describes the dense stack, the random seed, and the
//! learning rate; [`NetworkConfig::build_network`] turns it into a ready
//! layer sequence with a relu between consecutive dense layers.

use std::fmt;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::TensorResult;
use crate::neural::{DenseLayer, Network, ReluLayer};

/// Network configuration loaded from a TOML `[network]` table.
///
/// # Examples
///
/// ```
/// use affine_core::NetworkConfig;
///
/// let config = NetworkConfig::from_toml_str(
///     "[network]\nlayer_sizes = [2, 4, 1]\nseed = 7\nlearning_rate = 0.05\n",
/// )
/// .unwrap();
/// assert_eq!(config.layer_sizes, vec![2, 4, 1]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Feature counts per stage: input size, hidden sizes, output size
    pub layer_sizes: Vec<usize>,
    /// Random seed for deterministic weight initialization
    pub seed: u64,
    /// Learning rate for parameter updates
    pub learning_rate: f32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layer_sizes: vec![2, 4, 1],
            seed: 42,
            learning_rate: 0.01,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    network: NetworkConfig,
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error while reading configuration: {}", err),
            ConfigError::Parse(msg) => write!(f, "Failed to parse configuration: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl NetworkConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        file.network.validate()?;
        Ok(file.network)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.layer_sizes.len() < 2 {
            return Err(ConfigError::Invalid(
                "layer_sizes must name at least an input and an output size".to_string(),
            ));
        }
        if self.layer_sizes.iter().any(|&s| s == 0) {
            return Err(ConfigError::Invalid(
                "layer_sizes entries must be positive".to_string(),
            ));
        }
        if self.learning_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Builds the configured dense stack, seeded from `seed`, with a relu
    /// between consecutive dense layers (none after the last).
    pub fn build_network(&self) -> TensorResult<Network> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut network = Network::new();

        for (stage, pair) in self.layer_sizes.windows(2).enumerate() {
            network.add_layer(DenseLayer::new(pair[0], pair[1], &mut rng)?);
            if stage + 2 < self.layer_sizes.len() {
                network.add_layer(ReluLayer::new());
            }
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = NetworkConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = NetworkConfig::from_toml_str(
            "[network]\nlayer_sizes = [3, 8, 2]\nseed = 11\nlearning_rate = 0.1\n",
        )
        .unwrap();

        assert_eq!(config.layer_sizes, vec![3, 8, 2]);
        assert_eq!(config.seed, 11);
        assert!((config.learning_rate - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        let err = NetworkConfig::from_toml_str("layer_sizes = [3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_failures() {
        let single = NetworkConfig {
            layer_sizes: vec![3],
            ..Default::default()
        };
        assert!(matches!(single.validate(), Err(ConfigError::Invalid(_))));

        let zero = NetworkConfig {
            layer_sizes: vec![3, 0, 2],
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

        let bad_lr = NetworkConfig {
            learning_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad_lr.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_network_layer_count() {
        let config = NetworkConfig {
            layer_sizes: vec![3, 8, 4, 1],
            seed: 5,
            learning_rate: 0.01,
        };

        // Three dense stages with a relu after all but the last.
        let network = config.build_network().unwrap();
        assert_eq!(network.len(), 5);
    }

    #[test]
    fn test_build_network_is_deterministic() {
        let config = NetworkConfig::default();
        let mut a = config.build_network().unwrap();
        let mut b = config.build_network().unwrap();

        let input = crate::tensor::Tensor::from_vec(vec![0.3, -0.7], 1, 2).unwrap();
        assert_eq!(a.forward(&input).unwrap(), b.forward(&input).unwrap());
    }
}
