//! Zero-copy transposed adapters.
//!
//! A transposed view owns nothing: it borrows a matrix and swaps the roles of
//! rows and columns. Its layout is the base layout with the dimensions and
//! strides swapped (and the major order flipped), so every derived view
//! (`row`, `col`, `flatten`) addresses the base buffer directly.

use crate::dense::DenseMatrix;
use crate::layout::{Layout, Major};
use crate::matrix::{Matrix, MatrixLike, MatrixMut};
use crate::ops::{Abs, Matmul};
use crate::{MatrixError, Result};

fn out_of_bounds(i: usize, j: usize, rows: usize, cols: usize) -> MatrixError {
    MatrixError::IndexOutOfBounds {
        row: i,
        col: j,
        rows,
        cols,
    }
}

// ============================================================================
// Transposed
// ============================================================================

/// Read-only transpose of a borrowed matrix.
///
/// `rows()`/`cols()` are swapped and `(i, j)` reads the base at `(j, i)`.
/// Transposing again gives back the base borrow itself.
///
/// # Example
/// ```
/// use strided_matrix::{DenseMatrix, Matrix, MatrixLike};
///
/// let m = DenseMatrix::from_rows([[1, 2, 3], [4, 5, 6]]).unwrap();
/// let t = m.transposed();
/// assert_eq!(t.shape(), (3, 2));
/// assert_eq!(t[(2, 1)], 6);
/// assert_eq!(t.row(0).unwrap().to_vec(), vec![1, 4]);
/// assert!(std::ptr::eq(t.transposed(), &m));
/// ```
#[derive(Debug)]
pub struct Transposed<'a, M: ?Sized> {
    base: &'a M,
}

impl<M: ?Sized> Clone for Transposed<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Transposed<'_, M> {}

impl<'a, M: ?Sized> Transposed<'a, M> {
    pub fn new(base: &'a M) -> Self {
        Self { base }
    }

    /// The matrix being viewed.
    #[inline]
    pub fn base(&self) -> &'a M {
        self.base
    }
}

impl<M: MatrixLike + ?Sized> MatrixLike for Transposed<'_, M> {
    type Elem = M::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.base.cols()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.base.rows()
    }

    fn at(&self, i: usize, j: usize) -> Result<&M::Elem> {
        // Report the error in this view's coordinates, not the base's
        if i >= self.rows() || j >= self.cols() {
            return Err(out_of_bounds(i, j, self.rows(), self.cols()));
        }
        self.base.at(j, i)
    }
}

impl<'a, M: Matrix + ?Sized> Matrix for Transposed<'a, M> {
    type Transpose<'b> = &'a M where Self: 'b;

    #[inline]
    fn layout(&self) -> Layout {
        self.base.layout().transposed()
    }

    #[inline]
    fn as_slice(&self) -> &[M::Elem] {
        self.base.as_slice()
    }

    fn transposed(&self) -> &'a M {
        self.base
    }
}

impl<M: ?Sized> PartialEq for Transposed<'_, M>
where
    M: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        *self.base == *other.base
    }
}

impl<M: MatrixLike + ?Sized> std::ops::Index<(usize, usize)> for Transposed<'_, M> {
    type Output = M::Elem;

    fn index(&self, (i, j): (usize, usize)) -> &M::Elem {
        match self.at(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

// ============================================================================
// TransposedMut
// ============================================================================

/// Mutable transpose: writes go straight through to the base matrix.
#[derive(Debug)]
pub struct TransposedMut<'a, M: ?Sized> {
    base: &'a mut M,
}

impl<'a, M: ?Sized> TransposedMut<'a, M> {
    pub fn new(base: &'a mut M) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &M {
        &*self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut M {
        &mut *self.base
    }

    /// Give up the view and return the base borrow.
    pub fn into_base(self) -> &'a mut M {
        self.base
    }

    /// Read-only view of the same transpose.
    pub fn as_transposed(&self) -> Transposed<'_, M> {
        Transposed::new(&*self.base)
    }
}

impl<M: MatrixLike + ?Sized> MatrixLike for TransposedMut<'_, M> {
    type Elem = M::Elem;

    #[inline]
    fn rows(&self) -> usize {
        self.base.cols()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.base.rows()
    }

    fn at(&self, i: usize, j: usize) -> Result<&M::Elem> {
        if i >= self.rows() || j >= self.cols() {
            return Err(out_of_bounds(i, j, self.rows(), self.cols()));
        }
        self.base.at(j, i)
    }
}

impl<M: Matrix + ?Sized> Matrix for TransposedMut<'_, M> {
    type Transpose<'b> = &'b M where Self: 'b;

    #[inline]
    fn layout(&self) -> Layout {
        self.base.layout().transposed()
    }

    #[inline]
    fn as_slice(&self) -> &[M::Elem] {
        self.base.as_slice()
    }

    fn transposed(&self) -> &M {
        &*self.base
    }
}

impl<M: MatrixMut + ?Sized> MatrixMut for TransposedMut<'_, M> {
    type TransposeMut<'b> = &'b mut M where Self: 'b;

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [M::Elem] {
        self.base.as_mut_slice()
    }

    /// Sets the base to the opposite order, so that this view ends up in `major`.
    fn set_major(&mut self, major: Major) {
        self.base.set_major(major.flipped());
    }

    fn transposed_mut(&mut self) -> &mut M {
        &mut *self.base
    }
}

impl<M: ?Sized> PartialEq for TransposedMut<'_, M>
where
    M: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        *self.base == *other.base
    }
}

impl<M: MatrixLike + ?Sized> std::ops::Index<(usize, usize)> for TransposedMut<'_, M> {
    type Output = M::Elem;

    fn index(&self, (i, j): (usize, usize)) -> &M::Elem {
        match self.at(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<M: MatrixMut + ?Sized> std::ops::IndexMut<(usize, usize)> for TransposedMut<'_, M> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut M::Elem {
        match self.at_mut(i, j) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

// ============================================================================
// Operation registrations
// ============================================================================

// Transposed operands have no kernel of their own: everything below takes
// the generic fallback.

impl<M: MatrixLike + ?Sized> Abs for Transposed<'_, M> {}

impl<M: MatrixLike + ?Sized> Abs for TransposedMut<'_, M> {}

impl<M, Rhs> Matmul<Rhs> for Transposed<'_, M>
where
    M: MatrixLike + ?Sized,
    Rhs: MatrixLike + ?Sized,
{
}

impl<M, Rhs> Matmul<Rhs> for TransposedMut<'_, M>
where
    M: MatrixLike + ?Sized,
    Rhs: MatrixLike + ?Sized,
{
}

impl<'a, T, M: MatrixLike + ?Sized> Matmul<Transposed<'a, M>> for DenseMatrix<T> {}

impl<'a, T, M: MatrixLike + ?Sized> Matmul<TransposedMut<'a, M>> for DenseMatrix<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(major: Major) -> DenseMatrix<i32> {
        DenseMatrix::from_rows_with_major([[1, 2, 3], [4, 5, 6]], major).unwrap()
    }

    #[test]
    fn test_transposed_values() {
        for major in [Major::Row, Major::Col] {
            let m = sample(major);
            let t = m.transposed();
            assert_eq!(t.shape(), (3, 2));
            for i in 0..3 {
                for j in 0..2 {
                    assert_eq!(t.at(i, j), m.at(j, i));
                }
            }
            assert_eq!(t.major(), major.flipped());
            assert_eq!(t.flatten().to_vec(), vec![1, 4, 2, 5, 3, 6]);
        }
    }

    #[test]
    fn test_transposed_lines_are_base_lines() {
        let m = sample(Major::Row);
        let t = m.transposed();
        assert_eq!(t.row(2).unwrap().to_vec(), m.col(2).unwrap().to_vec());
        assert_eq!(t.col(1).unwrap().to_vec(), m.row(1).unwrap().to_vec());
        assert_eq!(t.row(0).unwrap().stride(), m.col(0).unwrap().stride());
    }

    #[test]
    fn test_transposed_bounds_in_view_coordinates() {
        let m = sample(Major::Row);
        let t = m.transposed();
        assert_eq!(
            t.at(0, 2),
            Err(MatrixError::IndexOutOfBounds {
                row: 0,
                col: 2,
                rows: 3,
                cols: 2
            })
        );
    }

    #[test]
    fn test_double_transpose_is_base() {
        let m = sample(Major::Col);
        let t = m.transposed();
        let tt = t.transposed();
        assert!(std::ptr::eq(tt, &m));
        assert_eq!(t.transposed().layout(), m.layout());
    }

    #[test]
    fn test_transposed_equality_compares_bases() {
        let a = sample(Major::Row);
        let b = sample(Major::Row);
        let c = sample(Major::Col);
        assert_eq!(a.transposed(), b.transposed());
        assert_ne!(a.transposed(), c.transposed());
    }

    #[test]
    fn test_transposed_mut_writes_base() {
        let mut m = sample(Major::Row);
        {
            let mut t = m.transposed_mut();
            t[(2, 0)] = 30;
            *t.at_mut(0, 1).unwrap() = 40;
            t.row_mut(1).unwrap().fill(0);
        }
        assert_eq!(m.flatten().to_vec(), vec![1, 0, 30, 40, 0, 6]);
    }

    #[test]
    fn test_transposed_mut_involution() {
        let mut m = sample(Major::Row);
        let mut t = m.transposed_mut();
        let base = t.transposed_mut();
        base[(0, 0)] = -1;
        assert_eq!(t[(0, 0)], -1);
        assert_eq!(t.as_transposed().layout(), t.layout());
    }

    #[test]
    fn test_transposed_mut_set_major() {
        let mut m = sample(Major::Row);
        {
            let mut t = m.transposed_mut();
            t.set_major(Major::Row);
            assert_eq!(t.major(), Major::Row);
        }
        assert_eq!(m.major(), Major::Col);
    }
}
