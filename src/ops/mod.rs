//! Matrix operations.
//!
//! Reductions ([`sum`], [`min`], [`max`]) are plain generic functions over
//! [`MatrixLike`]. Multiplication and elementwise absolute value are
//! customization points: [`Matmul`] and [`Abs`] carry the generic reference
//! algorithm as their provided method, and a type (or type pairing) opts in
//! by implementing the trait. An empty impl keeps the fallback; overriding
//! the method supplies a specialized kernel. Which one runs is fixed at
//! compile time by the operand types.
//!
//! ```
//! use strided_matrix::{DenseMatrix, Matmul, Matrix, MatrixLike};
//!
//! let a = DenseMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
//!
//! // Dense x Dense: specialized kernel
//! assert!(<DenseMatrix<i32> as Matmul>::SPECIALIZED);
//! let c = a.matmul(&a).unwrap();
//!
//! // Dense x Transposed: generic fallback, same answer shape
//! let d = a.matmul(&a.transposed()).unwrap();
//! assert_eq!(c.shape(), d.shape());
//! ```
//!
//! A downstream storage type takes part the same way:
//!
//! ```
//! use strided_matrix::{Abs, Matmul, MatrixLike, Result};
//!
//! struct Diagonal(Vec<i64>);
//!
//! impl MatrixLike for Diagonal {
//!     type Elem = i64;
//!     fn rows(&self) -> usize { self.0.len() }
//!     fn cols(&self) -> usize { self.0.len() }
//!     fn at(&self, i: usize, j: usize) -> Result<&i64> {
//!         static ZERO: i64 = 0;
//!         if i >= self.0.len() || j >= self.0.len() {
//!             return Err(strided_matrix::MatrixError::IndexOutOfBounds {
//!                 row: i, col: j, rows: self.0.len(), cols: self.0.len(),
//!             });
//!         }
//!         Ok(if i == j { &self.0[i] } else { &ZERO })
//!     }
//! }
//!
//! impl Abs for Diagonal {}   // fallback
//! impl Matmul for Diagonal {} // fallback
//!
//! let d = Diagonal(vec![-2, 3]);
//! assert_eq!(d.abs().unwrap()[(0, 0)], 2);
//! assert_eq!(d.matmul(&d).unwrap()[(1, 1)], 9);
//! ```

mod dense;
pub mod fallback;
mod operators;
pub mod reduce;

pub use reduce::{max, min, sum};

use strided_matrix_traits::{ScalarMul, SignedScalar};

use crate::dense::DenseMatrix;
use crate::matrix::MatrixLike;
use crate::{MatrixError, Result};

/// Element type of `lhs * rhs`.
pub type Product<L, R> = <L as ScalarMul<R>>::Output;

/// Matrix product customization point.
///
/// `Self * Rhs` for a given pairing resolves to this impl's `matmul`. The
/// provided body is [`fallback::matmul`]; override it to supply a kernel
/// and set [`SPECIALIZED`](Matmul::SPECIALIZED) accordingly.
pub trait Matmul<Rhs: MatrixLike + ?Sized = Self>: MatrixLike {
    /// Whether this pairing overrides the generic algorithm.
    const SPECIALIZED: bool = false;

    /// `self * rhs` as a new row-major matrix of shape `(self.rows(), rhs.cols())`.
    ///
    /// # Errors
    /// `MatmulShape` if `self.cols() != rhs.rows()`.
    fn matmul(&self, rhs: &Rhs) -> Result<DenseMatrix<Product<Self::Elem, Rhs::Elem>>>
    where
        Self::Elem: ScalarMul<Rhs::Elem>,
        Rhs::Elem: Copy,
    {
        log::trace!("matmul: generic fallback for {:?} * {:?}", self.shape(), rhs.shape());
        fallback::matmul(self, rhs)
    }
}

/// Elementwise absolute value customization point.
pub trait Abs: MatrixLike {
    /// Whether this type overrides the generic algorithm.
    const SPECIALIZED: bool = false;

    /// New matrix of the same shape holding `|a(i, j)|`.
    ///
    /// # Errors
    /// `AbsOverflow` if some `|a(i, j)|` is not representable, which for
    /// signed integers means the element is the type's minimum.
    fn abs(&self) -> Result<DenseMatrix<Self::Elem>>
    where
        Self::Elem: SignedScalar,
    {
        log::trace!("abs: generic fallback for {:?}", self.shape());
        fallback::abs(self)
    }
}

/// `lhs * rhs` through whichever kernel is registered for the pair.
pub fn matmul<L, R>(lhs: &L, rhs: &R) -> Result<DenseMatrix<Product<L::Elem, R::Elem>>>
where
    L: Matmul<R> + ?Sized,
    R: MatrixLike + ?Sized,
    L::Elem: ScalarMul<R::Elem>,
    R::Elem: Copy,
{
    lhs.matmul(rhs)
}

/// `|m|` elementwise through whichever kernel is registered for `M`.
pub fn abs<M>(m: &M) -> Result<DenseMatrix<M::Elem>>
where
    M: Abs + ?Sized,
    M::Elem: SignedScalar,
{
    m.abs()
}

pub(crate) fn abs_overflow(row: usize, col: usize) -> MatrixError {
    log::debug!("abs overflow at ({}, {})", row, col);
    MatrixError::AbsOverflow { row, col }
}

/// Inner dimensions of `lhs * rhs` must agree.
pub(crate) fn check_matmul_shape<L, R>(lhs: &L, rhs: &R) -> Result<()>
where
    L: MatrixLike + ?Sized,
    R: MatrixLike + ?Sized,
{
    if lhs.cols() != rhs.rows() {
        log::debug!("matmul shape mismatch: {:?} * {:?}", lhs.shape(), rhs.shape());
        return Err(MatrixError::MatmulShape {
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    Ok(())
}
