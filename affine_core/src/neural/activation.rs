//! Rectifying nonlinearity over [`Tensor`].

use crate::error::{TensorError, TensorResult};
use crate::tensor::Tensor;

/// A rectified-linear activation layer: `max(0, x)` elementwise.
///
/// Carries no learnable parameters. The forward pass caches its input so
/// the backward pass can mask the incoming gradient — the dense layer never
/// caches on an activation's behalf.
#[derive(Debug, Clone, Default)]
pub struct ReluLayer {
    cached_input: Option<Tensor>,
}

impl ReluLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward pass: clamps negatives to zero, caching the input.
    pub fn forward(&mut self, input: &Tensor) -> Tensor {
        self.cached_input = Some(input.clone());
        let mut output = input.clone();
        output.apply(|v| v.max(0.0));
        output
    }

    /// Backward pass: passes the gradient through wherever the cached
    /// forward input was positive, zero elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeMismatch`] if the gradient's shape
    /// differs from the cached input's.
    ///
    /// # Panics
    ///
    /// Panics if no forward pass has run yet (caller contract).
    pub fn backward(&self, output_gradient: &Tensor) -> TensorResult<Tensor> {
        let input = self
            .cached_input
            .as_ref()
            .expect("forward must be called before backward");

        if output_gradient.shape() != input.shape() {
            return Err(TensorError::shape_mismatch(
                format!("{}x{}", input.rows(), input.cols()),
                format!("{}x{}", output_gradient.rows(), output_gradient.cols()),
                "relu backward",
            ));
        }

        let mut masked = output_gradient.clone();
        for (g, &x) in masked
            .as_mut_slice()
            .iter_mut()
            .zip(input.as_slice().iter())
        {
            if x <= 0.0 {
                *g = 0.0;
            }
        }
        Ok(masked)
    }
}
