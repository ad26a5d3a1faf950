//! Neural network components built on the 2-D tensor substrate.
//!
//! This module provides the affine layer with its hand-written gradient
//! engine, the rectifying nonlinearity, the closed layer-variant set, and
//! the ordered network container that sequences them.

pub mod activation;
pub mod dense;
pub mod layer;
pub mod network;

pub use activation::ReluLayer;
pub use dense::DenseLayer;
pub use layer::Layer;
pub use network::Network;
