//! The closed set of layer variants dispatched through one
//! forward/backward interface.

use crate::error::TensorResult;
use crate::neural::activation::ReluLayer;
use crate::neural::dense::DenseLayer;
use crate::tensor::Tensor;

/// A network layer: either the learnable affine transform or the
/// rectifying nonlinearity.
///
/// Deliberately a closed enum rather than an open trait hierarchy — the
/// substrate supports exactly these two layer kinds, and every call site
/// dispatches with a `match`.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(DenseLayer),
    Relu(ReluLayer),
}

impl Layer {
    /// Forward pass through this layer.
    ///
    /// The relu variant caches its input here for its own backward pass.
    pub fn forward(&mut self, input: &Tensor) -> TensorResult<Tensor> {
        match self {
            Layer::Dense(dense) => dense.forward(input),
            Layer::Relu(relu) => Ok(relu.forward(input)),
        }
    }

    /// Backward pass through this layer.
    ///
    /// `forward_input` is the activation this layer consumed in the
    /// matching forward pass, supplied by the container; the relu variant
    /// consults its own cache instead.
    pub fn backward(
        &mut self,
        output_gradient: &Tensor,
        forward_input: &Tensor,
    ) -> TensorResult<Tensor> {
        match self {
            Layer::Dense(dense) => dense.backward(output_gradient, forward_input),
            Layer::Relu(relu) => relu.backward(output_gradient),
        }
    }

    /// Applies a gradient-descent step to learnable parameters; no-op for
    /// the relu variant.
    pub fn update_parameters(&mut self, learning_rate: f32) {
        if let Layer::Dense(dense) = self {
            dense.update_parameters(learning_rate);
        }
    }

    pub fn as_dense(&self) -> Option<&DenseLayer> {
        match self {
            Layer::Dense(dense) => Some(dense),
            Layer::Relu(_) => None,
        }
    }

    pub fn as_dense_mut(&mut self) -> Option<&mut DenseLayer> {
        match self {
            Layer::Dense(dense) => Some(dense),
            Layer::Relu(_) => None,
        }
    }
}

impl From<DenseLayer> for Layer {
    fn from(dense: DenseLayer) -> Self {
        Layer::Dense(dense)
    }
}

impl From<ReluLayer> for Layer {
    fn from(relu: ReluLayer) -> Self {
        Layer::Relu(relu)
    }
}
