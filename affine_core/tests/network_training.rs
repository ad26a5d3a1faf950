//! Integration tests for the gradient engine: a numeric gradient check and
//! end-to-end descent through the network container.

use affine_core::{DenseLayer, Network, NetworkConfig, ReluLayer, Tensor};

fn tensor(data: &[f32], rows: usize, cols: usize) -> Tensor {
    Tensor::from_vec(data.to_vec(), rows, cols).unwrap()
}

/// Scalar loss used by the gradient check: the plain sum of the forward
/// output, whose derivative with respect to the output is all ones.
fn summed_forward(layer: &DenseLayer, input: &Tensor) -> f32 {
    layer.forward(input).unwrap().sum()
}

#[test]
fn input_gradient_matches_finite_differences() {
    let layer = DenseLayer::from_seed(3, 2, 7).unwrap();
    let input = tensor(&[0.5, -0.2, 0.8], 1, 3);

    let ones = Tensor::filled(1, 2, 1.0).unwrap();
    let analytic = layer.compute_input_gradient(&ones).unwrap();

    let h = 0.05f32;
    for j in 0..input.size() {
        let mut plus = input.clone();
        plus[j] += h;
        let mut minus = input.clone();
        minus[j] -= h;

        let numeric = (summed_forward(&layer, &plus) - summed_forward(&layer, &minus)) / (2.0 * h);
        assert!(
            (numeric - analytic[j]).abs() < 1e-3,
            "gradient check failed at {}: numeric {} vs analytic {}",
            j,
            numeric,
            analytic[j]
        );
    }
}

#[test]
fn repeated_steps_drive_error_down_on_single_example() {
    let mut layer = DenseLayer::from_seed(3, 2, 13).unwrap();
    let input = tensor(&[1.0, 2.0, 3.0], 1, 3);
    let target = tensor(&[0.5, -0.5], 1, 2);

    let initial = layer.forward(&input).unwrap();
    let rmse_initial = DenseLayer::rmse(&initial, &target).unwrap();

    let mut rmse_last = rmse_initial;
    for _ in 0..10 {
        let predicted = layer.forward(&input).unwrap();
        let gradient = DenseLayer::loss_gradient(&predicted, &target).unwrap();
        layer.backward(&gradient, &input).unwrap();
        layer.update_parameters(0.01);

        let refreshed = layer.forward(&input).unwrap();
        let rmse = DenseLayer::rmse(&refreshed, &target).unwrap();
        assert!(
            rmse < rmse_last,
            "error must shrink every step: {} vs {}",
            rmse,
            rmse_last
        );
        rmse_last = rmse;
    }

    assert!(rmse_last < rmse_initial);
}

#[test]
fn configured_linear_network_converges_on_regression() {
    // A single dense stage: plain linear regression, strictly convex.
    let config = NetworkConfig {
        layer_sizes: vec![2, 1],
        seed: 3,
        learning_rate: 0.05,
    };
    let mut network = config.build_network().unwrap();

    let samples = [
        ([0.0f32, 0.0], 0.1f32),
        ([1.0, 0.0], 0.6),
        ([0.0, 1.0], -0.2),
        ([1.0, 1.0], 0.3),
    ];

    let average_rmse = |network: &mut Network| -> f32 {
        let mut total = 0.0;
        for (x, y) in &samples {
            let input = tensor(&[x[0], x[1]], 1, 2);
            let target = tensor(&[*y], 1, 1);
            let predicted = network.forward(&input).unwrap();
            total += DenseLayer::rmse(&predicted, &target).unwrap();
        }
        total / samples.len() as f32
    };

    let before = average_rmse(&mut network);

    for _ in 0..200 {
        for (x, y) in &samples {
            let input = tensor(&[x[0], x[1]], 1, 2);
            let target = tensor(&[*y], 1, 1);
            network.train_step(&input, &target, config.learning_rate).unwrap();
        }
    }

    let after = average_rmse(&mut network);
    assert!(
        after < before,
        "training must reduce the average error: {} vs {}",
        after,
        before
    );
    assert!(after < 0.05, "linear target should be nearly recovered, got {}", after);
}

#[test]
fn relu_network_trains_without_diverging() {
    let mut network = Network::new();
    network.add_layer(DenseLayer::from_seed(2, 6, 17).unwrap());
    network.add_layer(ReluLayer::new());
    network.add_layer(DenseLayer::from_seed(6, 1, 18).unwrap());

    let input = tensor(&[0.4, -0.6], 1, 2);
    let target = tensor(&[0.2], 1, 1);

    let initial = network.forward(&input).unwrap();
    let rmse_before = DenseLayer::rmse(&initial, &target).unwrap();

    let mut rmse_after = rmse_before;
    for _ in 0..50 {
        rmse_after = network.train_step(&input, &target, 0.01).unwrap();
        assert!(rmse_after.is_finite());
    }

    assert!(rmse_after <= rmse_before);
}
