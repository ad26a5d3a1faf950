//! The affine layer and its hand-written gradient engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{TensorError, TensorResult};
use crate::tensor::Tensor;

/// A fully-connected affine layer: `output = input · weights + bias`.
///
/// Owns its weight matrix `[n_inputs, n_outputs]`, bias row
/// `[1, n_outputs]`, and one gradient accumulator per parameter. The
/// accumulators are **overwritten** — not summed — by each backward pass,
/// and the parameters are mutated only by [`DenseLayer::update_parameters`].
///
/// The layer never caches its forward input; the caller supplies the
/// original input to [`DenseLayer::backward`] (an activation layer that
/// needs its input must cache it itself).
///
/// # Examples
///
/// ```
/// use affine_core::{DenseLayer, Tensor};
///
/// let layer = DenseLayer::from_seed(3, 2, 42).unwrap();
/// let input = Tensor::from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
/// let output = layer.forward(&input).unwrap();
/// assert_eq!(output.shape(), [1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Tensor,
    bias: Tensor,
    weight_grad: Tensor,
    bias_grad: Tensor,
}

impl DenseLayer {
    /// Creates a layer with weights drawn uniformly from `(-0.5, 0.5)` out
    /// of the injected random source, zero bias, and zero gradient
    /// accumulators.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if either count is zero.
    pub fn new<R: Rng + ?Sized>(
        n_inputs: usize,
        n_outputs: usize,
        rng: &mut R,
    ) -> TensorResult<Self> {
        let mut weights = Tensor::new(n_inputs, n_outputs)?;
        weights.apply(|_| rng.gen::<f32>() - 0.5);

        Ok(Self {
            weights,
            bias: Tensor::new(1, n_outputs)?,
            weight_grad: Tensor::new(n_inputs, n_outputs)?,
            bias_grad: Tensor::new(1, n_outputs)?,
        })
    }

    /// Creates a deterministically initialized layer from a seed value.
    ///
    /// The same seed always produces the same weights.
    pub fn from_seed(n_inputs: usize, n_outputs: usize, seed: u64) -> TensorResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(n_inputs, n_outputs, &mut rng)
    }

    /// Fills both gradient accumulators uniformly from `(-0.5, 0.5)`.
    ///
    /// Test-only affordance for exercising the update path with nonzero
    /// placeholder gradients; a real backward pass overwrites them.
    pub fn randomize_gradients<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weight_grad.apply(|_| rng.gen::<f32>() - 0.5);
        self.bias_grad.apply(|_| rng.gen::<f32>() - 0.5);
    }

    /// Number of input features this layer consumes.
    pub fn n_inputs(&self) -> usize {
        self.weights.rows()
    }

    /// Number of output features this layer produces.
    pub fn n_outputs(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Tensor {
        &self.weights
    }

    /// Mutable access to the weight matrix, for pinning parameters in tests
    /// and drivers. Callers must keep the `[n_inputs, n_outputs]` shape.
    pub fn weights_mut(&mut self) -> &mut Tensor {
        &mut self.weights
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// Mutable access to the bias row. Callers must keep the
    /// `[1, n_outputs]` shape.
    pub fn bias_mut(&mut self) -> &mut Tensor {
        &mut self.bias
    }

    /// The weight-gradient accumulator written by the latest backward pass.
    pub fn weight_gradient(&self) -> &Tensor {
        &self.weight_grad
    }

    /// The bias-gradient accumulator written by the latest backward pass.
    pub fn bias_gradient(&self) -> &Tensor {
        &self.bias_grad
    }

    /// Forward affine transform: `input.matmul(weights) + bias` broadcast
    /// over every sample row.
    ///
    /// Pure function of the input and the current parameters; mutates no
    /// layer state.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeMismatch`] unless
    /// `input.cols() == n_inputs`.
    pub fn forward(&self, input: &Tensor) -> TensorResult<Tensor> {
        if input.cols() != self.n_inputs() {
            return Err(TensorError::shape_mismatch(
                format!("{} input features", self.n_inputs()),
                format!("{} input features", input.cols()),
                "dense forward",
            ));
        }
        input.matmul(&self.weights)?.add_broadcast(&self.bias)
    }

    /// Derivative of mean-squared-error with respect to the prediction:
    /// `(predicted - target) * (2 / predicted.size())`.
    ///
    /// This is the seed value threaded backward through the network.
    pub fn loss_gradient(predicted: &Tensor, target: &Tensor) -> TensorResult<Tensor> {
        let diff = Tensor::subtract(predicted, target)?;
        Ok(diff.scale(2.0 / predicted.size() as f32))
    }

    /// Root-mean-squared error between prediction and target.
    ///
    /// Scalar diagnostic only; not part of the gradient path.
    pub fn rmse(predicted: &Tensor, target: &Tensor) -> TensorResult<f32> {
        let mut diff = Tensor::subtract(predicted, target)?;
        diff.apply(|x| x * x);
        Ok(diff.mean().sqrt())
    }

    /// Computes `input.transpose() · output_gradient` and overwrites the
    /// weight-gradient accumulator.
    pub fn compute_weight_gradient(
        &mut self,
        output_gradient: &Tensor,
        input: &Tensor,
    ) -> TensorResult<()> {
        self.check_output_gradient(output_gradient, "weight gradient")?;
        if input.cols() != self.n_inputs() {
            return Err(TensorError::shape_mismatch(
                format!("{} input features", self.n_inputs()),
                format!("{} input features", input.cols()),
                "weight gradient",
            ));
        }
        self.weight_grad = input.transpose().matmul(output_gradient)?;
        Ok(())
    }

    /// Computes the column-wise sum of the output gradient and overwrites
    /// the bias-gradient accumulator.
    pub fn compute_bias_gradient(&mut self, output_gradient: &Tensor) -> TensorResult<()> {
        self.check_output_gradient(output_gradient, "bias gradient")?;
        self.bias_grad = output_gradient.sum_rows();
        Ok(())
    }

    /// Computes `output_gradient · weights.transpose()`, the gradient with
    /// respect to this layer's input. This is the value propagated to the
    /// preceding layer.
    pub fn compute_input_gradient(&self, output_gradient: &Tensor) -> TensorResult<Tensor> {
        self.check_output_gradient(output_gradient, "input gradient")?;
        output_gradient.matmul(&self.weights.transpose())
    }

    /// Full backward pass for one `output_gradient`/`input` pair.
    ///
    /// Overwrites the bias and weight gradient accumulators from the
    /// caller-supplied `input` (the activation this layer consumed in the
    /// matching forward pass), then returns the propagated input gradient.
    /// All three gradients are computed from the same `output_gradient`;
    /// none is derived from another's result.
    pub fn backward(&mut self, output_gradient: &Tensor, input: &Tensor) -> TensorResult<Tensor> {
        self.compute_bias_gradient(output_gradient)?;
        self.compute_weight_gradient(output_gradient, input)?;
        self.compute_input_gradient(output_gradient)
    }

    /// Gradient-descent step: `weights -= weight_grad * lr`,
    /// `bias -= bias_grad * lr`, in place.
    ///
    /// Caller contract: only meaningful after a backward pass has populated
    /// the accumulators from the same gradient/input pair; stale or zero
    /// accumulators silently apply a wrong or no-op update.
    pub fn update_parameters(&mut self, learning_rate: f32) {
        let weight_step = self.weight_grad.scale(learning_rate);
        let bias_step = self.bias_grad.scale(learning_rate);

        self.weights
            .sub(&weight_step)
            .expect("weight gradient tracks weight shape");
        self.bias
            .sub(&bias_step)
            .expect("bias gradient tracks bias shape");
    }

    fn check_output_gradient(&self, output_gradient: &Tensor, context: &str) -> TensorResult<()> {
        if output_gradient.cols() != self.n_outputs() {
            return Err(TensorError::shape_mismatch(
                format!("{} output features", self.n_outputs()),
                format!("{} output features", output_gradient.cols()),
                context,
            ));
        }
        Ok(())
    }
}
