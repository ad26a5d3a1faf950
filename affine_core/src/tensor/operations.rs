//! Linear-algebra and reduction operations on [`Tensor`].
//!
//! All operations here produce a new tensor and leave their operands
//! unmodified; shape preconditions are checked before any allocation.

use crate::error::{TensorError, TensorResult};

use super::Tensor;

/// The four supported broadcast patterns for [`Tensor::add_broadcast`],
/// classified against the receiver's shape.
enum BroadcastPattern {
    /// `(1,1)`: add the single element everywhere
    Scalar,
    /// `(1,N)`: add entry `j` to every element of column `j`
    Row,
    /// `(M,1)`: add entry `i` to every element of row `i`
    Col,
    /// `(M,N)`: plain elementwise add
    Full,
}

fn classify(target: [usize; 2], operand: [usize; 2]) -> TensorResult<BroadcastPattern> {
    let [rows, cols] = target;
    let [m, n] = operand;

    // Priority order matters for degenerate targets such as (1, N): the
    // scalar pattern wins over row/col, row wins over full.
    if m == 1 && n == 1 {
        Ok(BroadcastPattern::Scalar)
    } else if m == 1 && n == cols {
        Ok(BroadcastPattern::Row)
    } else if m == rows && n == 1 {
        Ok(BroadcastPattern::Col)
    } else if m == rows && n == cols {
        Ok(BroadcastPattern::Full)
    } else {
        Err(TensorError::incompatible_broadcast(target, operand))
    }
}

impl Tensor {
    /// Matrix product `self · other` as a new `[self.rows, other.cols]`
    /// tensor.
    ///
    /// Standard triple-nested-loop dot product with the inner loop over the
    /// contraction index, so the floating-point summation order is the
    /// row-major one.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeMismatch`] unless
    /// `self.cols() == other.rows()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use affine_core::Tensor;
    ///
    /// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// let b = Tensor::from_vec(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], 3, 2).unwrap();
    /// let c = a.matmul(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    /// ```
    pub fn matmul(&self, other: &Tensor) -> TensorResult<Tensor> {
        if self.cols() != other.rows() {
            return Err(TensorError::shape_mismatch(
                format!("inner dimension {}", self.cols()),
                format!("inner dimension {}", other.rows()),
                "matmul",
            ));
        }

        let m = self.rows();
        let n = other.cols();
        let k = self.cols();

        let mut out = Tensor::new(m, n)?;
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..k {
                    sum += self[(i, p)] * other[(p, j)];
                }
                out[(i, j)] = sum;
            }
        }

        Ok(out)
    }

    /// Transposed copy of shape `[cols, rows]`.
    pub fn transpose(&self) -> Tensor {
        let rows = self.rows();
        let cols = self.cols();

        // Shape is nonzero by construction, so this cannot fail.
        let mut out = Tensor::new(cols, rows).expect("transpose of a valid shape is valid");
        for i in 0..rows {
            for j in 0..cols {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Column-wise sum over all rows, as a new `[1, cols]` tensor.
    ///
    /// Reduces a per-sample gradient batch down to a per-feature bias
    /// gradient.
    pub fn sum_rows(&self) -> Tensor {
        let rows = self.rows();
        let cols = self.cols();

        let mut out = Tensor::new(1, cols).expect("row sum of a valid shape is valid");
        for j in 0..cols {
            let mut s = 0.0f32;
            for i in 0..rows {
                s += self[(i, j)];
            }
            out[(0, j)] = s;
        }
        out
    }

    /// Broadcast addition of `other` onto `self`, as a new tensor of
    /// `self`'s shape.
    ///
    /// Exactly four operand shapes are supported, tried in this order
    /// against `(m, n)`: `(1,1)` scalar, `(1,N)` row vector, `(M,1)` column
    /// vector, `(M,N)` elementwise. The dispatch is deliberately closed:
    /// the only consumers are "add bias row to every sample row" and "add
    /// per-sample scalar loss gradient".
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IncompatibleBroadcast`] for any other operand
    /// shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use affine_core::Tensor;
    ///
    /// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// let row = Tensor::from_vec(vec![1.0, 2.0, 3.0], 1, 3).unwrap();
    /// let out = a.add_broadcast(&row).unwrap();
    /// assert_eq!(out.as_slice(), &[2.0, 4.0, 6.0, 5.0, 7.0, 9.0]);
    /// ```
    pub fn add_broadcast(&self, other: &Tensor) -> TensorResult<Tensor> {
        let pattern = classify(self.shape(), other.shape())?;

        let rows = self.rows();
        let cols = self.cols();
        let mut out = self.clone();

        for i in 0..rows {
            for j in 0..cols {
                let b = match pattern {
                    BroadcastPattern::Scalar => other[0],
                    BroadcastPattern::Row => other[j],
                    BroadcastPattern::Col => other[i],
                    BroadcastPattern::Full => other[(i, j)],
                };
                out[(i, j)] += b;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor(data: &[f32], rows: usize, cols: usize) -> Tensor {
        Tensor::from_vec(data.to_vec(), rows, cols).unwrap()
    }

    #[test]
    fn test_matmul_literal() {
        // A = 1 2 3 / 4 5 6, B = 7 8 / 9 10 / 11 12
        let a = tensor(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let b = tensor(&[7.0, 8.0, 9.0, 10.0, 11.0, 12.0], 3, 2);

        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), [2, 2]);
        assert_eq!(c[(0, 0)], 58.0);
        assert_eq!(c[(0, 1)], 64.0);
        assert_eq!(c[(1, 0)], 139.0);
        assert_eq!(c[(1, 1)], 154.0);
    }

    #[test]
    fn test_matmul_rejects_inner_mismatch() {
        let a = Tensor::new(2, 3).unwrap();
        let b = Tensor::new(2, 3).unwrap();
        let err = a.matmul(&b).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_transpose_literal_and_roundtrip() {
        let t = tensor(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let tt = t.transpose();

        assert_eq!(tt.shape(), [3, 2]);
        assert_eq!(tt[(0, 1)], 4.0);
        assert_eq!(tt[(2, 0)], 3.0);

        assert_eq!(tt.transpose(), t);
    }

    #[test]
    fn test_matmul_transpose_identity() {
        // (A·B)ᵀ == Bᵀ·Aᵀ
        let a = tensor(&[1.0, -2.0, 0.5, 3.0, 4.0, -1.0], 2, 3);
        let b = tensor(&[2.0, 1.0, 0.0, -1.0, 1.5, 2.5], 3, 2);

        let lhs = a.matmul(&b).unwrap().transpose();
        let rhs = b.transpose().matmul(&a.transpose()).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_sum_rows_of_ones() {
        let mut t = Tensor::new(5, 3).unwrap();
        t.ones();
        let s = t.sum_rows();
        assert_eq!(s.shape(), [1, 3]);
        assert_eq!(s.as_slice(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_broadcast_scalar_equals_add_scalar() {
        let a = tensor(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let s = tensor(&[10.0], 1, 1);

        let broadcast = a.add_broadcast(&s).unwrap();

        let mut scalar = a.clone();
        scalar.add_scalar(10.0);
        assert_eq!(broadcast, scalar);
    }

    #[test]
    fn test_broadcast_full_equals_elementwise_add() {
        let a = tensor(&[1.0, 2.0, 3.0, 4.0], 2, 2);
        let b = tensor(&[0.5, 1.5, 2.5, 3.5], 2, 2);

        let broadcast = a.add_broadcast(&b).unwrap();

        let mut elementwise = a.clone();
        elementwise.add(&b).unwrap();
        assert_eq!(broadcast, elementwise);
    }

    #[test]
    fn test_broadcast_row_and_col_literals() {
        let a = tensor(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);

        let row = tensor(&[1.0, 2.0, 3.0], 1, 3);
        let r = a.add_broadcast(&row).unwrap();
        assert_eq!(r.as_slice(), &[2.0, 4.0, 6.0, 5.0, 7.0, 9.0]);

        let col = tensor(&[10.0, 20.0], 2, 1);
        let c = a.add_broadcast(&col).unwrap();
        assert_eq!(c.as_slice(), &[11.0, 12.0, 13.0, 24.0, 25.0, 26.0]);
    }

    #[test]
    fn test_broadcast_rejects_unsupported_shape() {
        let a = Tensor::new(4, 3).unwrap();
        let b = Tensor::new(2, 2).unwrap();
        let err = a.add_broadcast(&b).unwrap_err();
        assert_eq!(err, TensorError::incompatible_broadcast([4, 3], [2, 2]));
    }

    #[test]
    fn test_broadcast_operands_unmodified() {
        let a = tensor(&[1.0, 2.0], 1, 2);
        let row = tensor(&[3.0, 4.0], 1, 2);
        let _ = a.add_broadcast(&row).unwrap();
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
        assert_eq!(row.as_slice(), &[3.0, 4.0]);
    }
}
