//! Reference algorithms written against [`MatrixLike`] alone.
//!
//! These are what [`Matmul`](super::Matmul) and [`Abs`](super::Abs) run
//! when an operand type does not supply its own kernel. They only use
//! checked `at`, so they work for any storage, at the cost of speed.

use strided_matrix_traits::{ScalarMul, SignedScalar};

use super::{abs_overflow, check_matmul_shape, Product};
use crate::dense::DenseMatrix;
use crate::layout::{Layout, Major};
use crate::matrix::MatrixLike;
use crate::Result;

/// `lhs * rhs` by the i-j-k triple loop, into a row-major result.
///
/// The element type is whatever `lhs(0, 0) * rhs(0, 0)` yields; each output
/// element is accumulated from zero.
pub fn matmul<L, R>(lhs: &L, rhs: &R) -> Result<DenseMatrix<Product<L::Elem, R::Elem>>>
where
    L: MatrixLike + ?Sized,
    R: MatrixLike + ?Sized,
    L::Elem: ScalarMul<R::Elem>,
    R::Elem: Copy,
{
    check_matmul_shape(lhs, rhs)?;
    let (m, k) = lhs.shape();
    let n = rhs.cols();

    let mut data = Vec::with_capacity(m * n);
    for i in 0..m {
        for j in 0..n {
            let mut acc: Product<L::Elem, R::Elem> = num_traits::zero();
            for p in 0..k {
                let a = *lhs.at(i, p)?;
                let b = *rhs.at(p, j)?;
                acc = acc + a.scalar_mul(b);
            }
            data.push(acc);
        }
    }
    Ok(DenseMatrix::from_parts(data, Layout::new(m, n, Major::Row)))
}

/// `|m(i, j)|` by sign test, into a row-major result.
pub fn abs<M>(m: &M) -> Result<DenseMatrix<M::Elem>>
where
    M: MatrixLike + ?Sized,
    M::Elem: SignedScalar,
{
    let (rows, cols) = m.shape();
    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let x = *m.at(i, j)?;
            data.push(x.checked_abs_by_sign().ok_or_else(|| abs_overflow(i, j))?);
        }
    }
    Ok(DenseMatrix::from_parts(data, Layout::new(rows, cols, Major::Row)))
}
