//! Dense matrices with zero-copy strided views.
//!
//! A matrix is addressed through one formula, `offset(i, j) = i * sr + j * sc`,
//! where the strides `(sr, sc)` follow from the storage [`Major`] order. Every
//! view in this crate (rows, columns, flattened vectors, transposes) is a
//! borrow of the owner's buffer plus a different set of strides, so none of
//! them copy and none of them can outlive the matrix they look into.
//!
//! # Core Types
//!
//! - [`DenseMatrix`]: the owning storage type (contiguous `Vec<T>`, row- or column-major)
//! - [`StridedSpan`] / [`StridedSpanMut`]: a borrowed run of elements at a fixed stride
//! - [`StridedIter`], [`LineIter`]: random-access cursors over spans and matrix lines
//! - [`FlatView`] / [`FlatViewMut`]: the whole matrix in logical row-major order
//! - [`Transposed`] / [`TransposedMut`]: zero-copy transposed adapters
//!
//! # Capability Contract
//!
//! - [`MatrixLike`]: `rows`, `cols`, checked `at`; enough for reductions and the
//!   generic multiply
//! - [`Matrix`] / [`MatrixMut`]: layout-aware matrices that hand out strided views
//!
//! # Operations
//!
//! - [`sum`], [`min`], [`max`]: reductions over any [`MatrixLike`]
//! - [`Matmul`], [`Abs`]: customization points. Each operand type pairing
//!   either keeps the generic fallback or supplies its own kernel; the choice
//!   is made at compile time. `DenseMatrix * DenseMatrix` uses an i-k-j
//!   kernel, everything else the reference triple loop.
//!
//! # Example
//!
//! ```rust
//! use strided_matrix::{DenseMatrix, Major, Matrix, Matmul};
//!
//! let a = DenseMatrix::from_rows([[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let b = DenseMatrix::from_rows_with_major([[5.0, 6.0], [7.0, 8.0]], Major::Col).unwrap();
//!
//! let c = a.matmul(&b).unwrap();
//! assert_eq!(c[(0, 0)], 19.0);
//! assert_eq!(c[(1, 1)], 50.0);
//!
//! // Zero-copy views
//! let col = b.col(1).unwrap();
//! assert_eq!(col.to_vec(), vec![6.0, 8.0]);
//! let bt = b.transposed();
//! assert_eq!(bt[(0, 1)], 7.0);
//!
//! // Flatten always walks the logical rows, whatever the storage order
//! assert_eq!(b.flatten().to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
//! ```

mod dense;
mod flat;
mod iter;
mod layout;
mod matrix;
pub mod ops;
mod span;
mod transposed;

pub use dense::DenseMatrix;
pub use flat::{FlatIter, FlatView, FlatViewMut};
pub use iter::{LineIter, StridedIter, StridedIterMut};
pub use layout::{Axis, Layout, Major};
pub use matrix::{Matrix, MatrixLike, MatrixMut};
pub use ops::{abs, matmul, max, min, sum, Abs, Matmul, Product};
pub use span::{StridedSpan, StridedSpanMut};
pub use transposed::{Transposed, TransposedMut};

pub use strided_matrix_traits::{Scalar, ScalarMul, SignedScalar};

/// Everything needed to call the matrix contract methods.
pub mod prelude {
    pub use crate::{
        Abs, Axis, DenseMatrix, Major, Matmul, Matrix, MatrixLike, MatrixMut, Scalar, ScalarMul,
        SignedScalar, StridedSpan, StridedSpanMut,
    };
}

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during matrix construction, view creation and operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A buffer's length does not match the requested shape.
    #[error("buffer of length {len} cannot hold a {rows}x{cols} matrix")]
    LengthMismatch { len: usize, rows: usize, cols: usize },

    /// A nested row list has a row whose width differs from the first row.
    #[error("row {row} has {len} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// `rows * cols` does not fit in `usize`.
    #[error("shape {rows}x{cols} overflows usize")]
    SizeOverflow { rows: usize, cols: usize },

    /// Inner dimensions of a matrix product disagree.
    #[error("matmul shape mismatch: {lhs:?} * {rhs:?}")]
    MatmulShape {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Element index outside the matrix.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Row or column index outside the matrix.
    #[error("{axis:?} {index} out of bounds, matrix has {count}")]
    LineOutOfBounds {
        axis: Axis,
        index: usize,
        count: usize,
    },

    /// Element index outside a span.
    #[error("index {index} out of bounds for span of length {len}")]
    SpanIndexOutOfBounds { index: usize, len: usize },

    /// `slice(pos, count)` reaches past the end of the span.
    #[error("slice {pos}..{pos}+{count} out of range for span of length {len}")]
    SliceOutOfRange { pos: usize, count: usize, len: usize },

    /// Zero stride is not allowed for a non-empty span.
    #[error("invalid stride 0 for span of length {len}")]
    ZeroStride { len: usize },

    /// A span would address elements past the end of its buffer.
    #[error("span of {len} elements at stride {stride} needs {needed} elements, buffer has {available}")]
    SpanOutOfBuffer {
        len: usize,
        stride: usize,
        needed: usize,
        available: usize,
    },

    /// Integer overflow while computing a span's extent.
    #[error("offset overflow while computing span extent")]
    OffsetOverflow,

    /// `|x|` of an element is not representable, e.g. `i32::MIN`.
    #[error("absolute value of the element at ({row}, {col}) overflows")]
    AbsOverflow { row: usize, col: usize },

    /// `min` / `max` of a matrix with no elements.
    #[error("cannot reduce an empty matrix")]
    EmptyReduction,
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
