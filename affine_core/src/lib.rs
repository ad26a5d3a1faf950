//! # Affine Core
//!
//! A minimal feed-forward neural-network substrate built on a dense,
//! row-major 2-D tensor. The tensor carries the arithmetic, broadcasting,
//! reduction, and linear-algebra operations; the dense layer carries the
//! hand-written backpropagation chain for the affine transform.
//!
//! ## Quick Start
//!
//! ```rust
//! use affine_core::{DenseLayer, Tensor};
//!
//! // A deterministically initialized 3-input, 2-output affine layer.
//! let mut layer = DenseLayer::from_seed(3, 2, 42).unwrap();
//!
//! let input = Tensor::from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
//! let output = layer.forward(&input).unwrap();
//! assert_eq!(output.shape(), [1, 2]);
//!
//! // One hand-written gradient step against a target.
//! let target = Tensor::from_vec(vec![1.0, 0.0], 1, 2).unwrap();
//! let loss_gradient = DenseLayer::loss_gradient(&output, &target).unwrap();
//! layer.backward(&loss_gradient, &input).unwrap();
//! layer.update_parameters(0.01);
//! ```
//!
//! ## Core Modules
//!
//! - [`tensor`] - 2-D tensor type and its operations
//! - [`neural`] - dense layer, relu layer, and the network container
//! - [`config`] - network configuration via TOML
//! - [`logging`] - JSON line-delimited diagnostics

pub mod config;
pub mod error;
pub mod logging;
pub mod neural;
pub mod tensor;

pub use config::{ConfigError, NetworkConfig};
pub use error::{TensorError, TensorResult};
pub use neural::{DenseLayer, Layer, Network, ReluLayer};
pub use tensor::{Tensor, TensorStatistics};
