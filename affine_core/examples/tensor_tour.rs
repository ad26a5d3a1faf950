//! A tour of the tensor surface: construction, arithmetic, matrix
//! multiplication, and broadcasting.
//!
//! Run with: cargo run --example tensor_tour

use affine_core::{logging, Tensor};
use anyhow::Result;

fn main() -> Result<()> {
    let mut a = Tensor::filled(2, 3, 2.0)?;
    let b = Tensor::filled(2, 3, 3.0)?;

    println!("a =");
    a.print();
    println!("b =");
    b.print();

    a.add(&b)?;
    a.add_scalar(5.0);
    println!("a + b + 5 =");
    a.print();
    println!("sum: {}, mean: {}", a.sum(), a.mean());

    let lhs = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3)?;
    let rhs = Tensor::from_vec(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], 3, 2)?;
    let product = lhs.matmul(&rhs)?;
    println!("lhs · rhs =");
    product.print();

    let bias_row = Tensor::from_vec(vec![1.0, 2.0, 3.0], 1, 3)?;
    let shifted = lhs.add_broadcast(&bias_row)?;
    println!("lhs with bias row broadcast =");
    shifted.print();

    let transposed = product.transpose();
    println!("(lhs · rhs) transposed =");
    transposed.print();

    logging::log_tensor("tensor_tour/product", &product.statistics())?;
    logging::log_tensor("tensor_tour/shifted", &shifted.statistics())?;
    println!("statistics appended to logs/tensors.jsonl");

    Ok(())
}
