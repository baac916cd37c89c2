//! Storage order and the 2-D addressing formula.

use crate::{MatrixError, Result};

/// Which logical axis is contiguous in the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Major {
    /// Consecutive columns of a row are adjacent (C order).
    #[default]
    Row,
    /// Consecutive rows of a column are adjacent (Fortran / Julia order).
    Col,
}

impl Major {
    /// The other order. A transposed view of row-major data is column-major.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Major::Row => Major::Col,
            Major::Col => Major::Row,
        }
    }

    /// `(row_stride, col_stride)` for a `rows x cols` matrix in this order.
    #[inline]
    pub fn strides(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Major::Row => (cols, 1),
            Major::Col => (1, rows),
        }
    }
}

/// A matrix axis, used to name rows versus columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

/// Shape plus strides of a matrix-like entity.
///
/// Strides are always derived from `(rows, cols, major)`; there is no way to
/// change one without recomputing the others. The only exception is
/// [`Layout::default`], the zeroed layout of an empty or taken-from matrix,
/// whose strides are both 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Layout {
    rows: usize,
    cols: usize,
    row_stride: usize,
    col_stride: usize,
    major: Major,
}

impl Layout {
    /// Layout of a `rows x cols` matrix stored in `major` order.
    pub fn new(rows: usize, cols: usize, major: Major) -> Self {
        let (row_stride, col_stride) = major.strides(rows, cols);
        Self {
            rows,
            cols,
            row_stride,
            col_stride,
            major,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Buffer distance between `(i, j)` and `(i + 1, j)`.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Buffer distance between `(i, j)` and `(i, j + 1)`.
    #[inline]
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    #[inline]
    pub fn strides(&self) -> (usize, usize) {
        (self.row_stride, self.col_stride)
    }

    #[inline]
    pub fn major(&self) -> Major {
        self.major
    }

    /// Number of logical elements, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Same shape, strides recomputed for `major`.
    pub fn with_major(&self, major: Major) -> Self {
        Self::new(self.rows, self.cols, major)
    }

    /// Rows and columns swapped, strides swapped with them.
    ///
    /// Equivalent to `Layout::new(cols, rows, major.flipped())` for any
    /// non-default layout.
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
            major: self.major.flipped(),
        }
    }

    /// `i * sr + j * sc`, without checking the indices.
    #[inline]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        i * self.row_stride + j * self.col_stride
    }

    /// `i * sr + j * sc`, or an error if `(i, j)` is outside the shape.
    #[inline]
    pub fn checked_offset(&self, i: usize, j: usize) -> Result<usize> {
        if i < self.rows && j < self.cols {
            Ok(self.offset(i, j))
        } else {
            Err(MatrixError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Offset of the `k`-th element in logical row-major order.
    #[inline]
    pub fn linear_offset(&self, k: usize) -> usize {
        self.offset(k / self.cols, k % self.cols)
    }

    /// Number of lines along `axis` (rows for `Axis::Row`).
    #[inline]
    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows,
            Axis::Col => self.cols,
        }
    }

    /// `(start, len, stride)` of row or column `index`.
    pub(crate) fn line(&self, axis: Axis, index: usize) -> Result<(usize, usize, usize)> {
        let count = self.count(axis);
        if index >= count {
            return Err(MatrixError::LineOutOfBounds { axis, index, count });
        }
        Ok(match axis {
            Axis::Row => (index * self.row_stride, self.cols, self.col_stride),
            Axis::Col => (index * self.col_stride, self.rows, self.row_stride),
        })
    }

    /// Stride at which the buffer reads in logical row-major order, if one exists.
    ///
    /// Empty layouts report 1. Single-row and single-column layouts always have one.
    pub(crate) fn row_major_stride(&self) -> Option<usize> {
        if self.is_empty() {
            Some(1)
        } else if self.rows == 1 {
            Some(self.col_stride)
        } else if self.cols == 1 {
            Some(self.row_stride)
        } else if self.col_stride == 1 && self.row_stride == self.cols {
            Some(1)
        } else {
            None
        }
    }
}
