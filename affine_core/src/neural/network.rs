//! Ordered layer container that sequences forward and backward passes.

use crate::error::TensorResult;
use crate::neural::dense::DenseLayer;
use crate::neural::layer::Layer;
use crate::tensor::Tensor;

/// An ordered sequence of layers with the bookkeeping the backward pass
/// needs.
///
/// The container — not the dense layer — is responsible for capturing each
/// layer's forward input and supplying it back to that layer's backward
/// call, in reverse order, threading every returned input gradient into the
/// preceding layer.
#[derive(Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
    forward_inputs: Vec<Tensor>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self {
            layers,
            forward_inputs: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer: impl Into<Layer>) {
        self.layers.push(layer.into());
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Forward pass: feeds `input` through every layer in order, capturing
    /// each layer's actual input for the matching backward pass.
    pub fn forward(&mut self, input: &Tensor) -> TensorResult<Tensor> {
        self.forward_inputs.clear();

        let mut activation = input.clone();
        for layer in &mut self.layers {
            self.forward_inputs.push(activation.clone());
            activation = layer.forward(&activation)?;
        }
        Ok(activation)
    }

    /// Backward pass: walks the layers in reverse, handing each its
    /// captured forward input and threading the returned input gradient
    /// into the preceding layer. Returns the gradient with respect to the
    /// network input.
    ///
    /// # Panics
    ///
    /// Panics if no forward pass has run yet (caller contract).
    pub fn backward(&mut self, loss_gradient: &Tensor) -> TensorResult<Tensor> {
        assert_eq!(
            self.forward_inputs.len(),
            self.layers.len(),
            "forward must be called before backward"
        );

        let inputs = &self.forward_inputs;
        let mut gradient = loss_gradient.clone();
        for (layer, input) in self.layers.iter_mut().zip(inputs.iter()).rev() {
            gradient = layer.backward(&gradient, input)?;
        }
        Ok(gradient)
    }

    /// Applies a gradient-descent step to every learnable layer.
    pub fn update_parameters(&mut self, learning_rate: f32) {
        for layer in &mut self.layers {
            layer.update_parameters(learning_rate);
        }
    }

    /// One full training step on a single input/target pair: forward, MSE
    /// loss gradient, backward, parameter update. Returns the RMSE of a
    /// fresh forward pass with the updated parameters.
    ///
    /// Deliberately a single step — epoch and batch orchestration belong to
    /// the caller.
    pub fn train_step(
        &mut self,
        input: &Tensor,
        target: &Tensor,
        learning_rate: f32,
    ) -> TensorResult<f32> {
        let output = self.forward(input)?;
        let loss_gradient = DenseLayer::loss_gradient(&output, target)?;
        self.backward(&loss_gradient)?;
        self.update_parameters(learning_rate);

        let refreshed = self.forward(input)?;
        DenseLayer::rmse(&refreshed, target)
    }
}
