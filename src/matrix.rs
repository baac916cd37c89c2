//! The capability contract every matrix-like type implements.
//!
//! Three tiers:
//!
//! - [`MatrixLike`]: shape plus checked element access. This is all the
//!   reductions and the fallback multiply / abs need, so downstream types
//!   with unusual storage can participate by implementing just this.
//! - [`Matrix`]: a layout over a borrowed buffer. Rows, columns, flattened
//!   views and transposes are derived from the layout without copying.
//! - [`MatrixMut`]: mutable access, including writable views and
//!   reinterpreting the storage order.
//!
//! `&M` and `&mut M` implement the same tiers as `M`. A borrowed matrix
//! transposes into a [`Transposed`] of its referent, and as the left operand
//! of a product it always takes the generic path.

use crate::dense::{gather, DenseMatrix};
use crate::flat::{FlatView, FlatViewMut};
use crate::iter::LineIter;
use crate::layout::{Axis, Layout, Major};
use crate::ops::{self, Abs, Matmul};
use crate::span::{StridedSpan, StridedSpanMut};
use crate::transposed::{Transposed, TransposedMut};
use crate::{MatrixError, Result, Scalar, SignedScalar};

/// Shape and checked element access.
pub trait MatrixLike {
    type Elem;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Element `(i, j)`, or `IndexOutOfBounds`.
    fn at(&self, i: usize, j: usize) -> Result<&Self::Elem>;

    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Number of logical elements.
    #[inline]
    fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Same shape and the same element at every `(i, j)`.
    ///
    /// Unlike `==` on [`DenseMatrix`], the storage order does not matter.
    fn elements_eq<Other>(&self, other: &Other) -> bool
    where
        Other: MatrixLike + ?Sized,
        Self::Elem: PartialEq<Other::Elem>,
    {
        if self.shape() != other.shape() {
            return false;
        }
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                match (self.at(i, j), other.at(i, j)) {
                    (Ok(a), Ok(b)) if a == b => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

/// A matrix backed by a strided buffer.
pub trait Matrix: MatrixLike + Abs {
    /// What [`transposed`](Matrix::transposed) returns. Transposing a
    /// transposed view yields a borrow of its base, never a nested adapter.
    /// The transpose can always be multiplied by `Self`, so `m^T * m` works
    /// for any `M: Matrix`.
    type Transpose<'b>: Matrix<Elem = Self::Elem> + Matmul<Self>
    where
        Self: 'b;

    fn layout(&self) -> Layout;

    /// The backing buffer, addressed through [`layout`](Matrix::layout).
    fn as_slice(&self) -> &[Self::Elem];

    fn transposed(&self) -> Self::Transpose<'_>;

    #[inline]
    fn major(&self) -> Major {
        self.layout().major()
    }

    /// `(row_stride, col_stride)`.
    #[inline]
    fn strides(&self) -> (usize, usize) {
        self.layout().strides()
    }

    /// Row `i` as a span starting at `i * sr` with stride `sc`.
    fn row(&self, i: usize) -> Result<StridedSpan<'_, Self::Elem>> {
        line(self.as_slice(), self.layout(), Axis::Row, i)
    }

    /// Column `j` as a span starting at `j * sc` with stride `sr`.
    fn col(&self, j: usize) -> Result<StridedSpan<'_, Self::Elem>> {
        line(self.as_slice(), self.layout(), Axis::Col, j)
    }

    /// Cursor over row `i`.
    fn row_iter(&self, i: usize) -> Result<LineIter<'_, Self::Elem>> {
        let layout = self.layout();
        layout.line(Axis::Row, i)?;
        Ok(LineIter::new(self.as_slice(), layout, Axis::Row, i))
    }

    /// Cursor over column `j`.
    fn col_iter(&self, j: usize) -> Result<LineIter<'_, Self::Elem>> {
        let layout = self.layout();
        layout.line(Axis::Col, j)?;
        Ok(LineIter::new(self.as_slice(), layout, Axis::Col, j))
    }

    /// All elements in logical row-major order.
    fn flatten(&self) -> FlatView<'_, Self::Elem> {
        FlatView::new(self.as_slice(), self.layout())
    }

    fn sum(&self) -> Self::Elem
    where
        Self::Elem: Scalar,
    {
        ops::reduce::sum_values(self.flatten().iter().copied())
    }

    /// Smallest element; `EmptyReduction` if there are none.
    fn min(&self) -> Result<Self::Elem>
    where
        Self::Elem: Copy + PartialOrd,
    {
        ops::reduce::min_value(self.flatten().iter().copied())
    }

    /// Largest element; `EmptyReduction` if there are none.
    fn max(&self) -> Result<Self::Elem>
    where
        Self::Elem: Copy + PartialOrd,
    {
        ops::reduce::max_value(self.flatten().iter().copied())
    }

    /// Owning copy with the same shape and storage order.
    fn to_dense(&self) -> DenseMatrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let layout = self.layout();
        let data = gather(self.as_slice(), layout, layout.major());
        DenseMatrix::from_parts(data, Layout::new(layout.rows(), layout.cols(), layout.major()))
    }
}

fn line<T>(data: &[T], layout: Layout, axis: Axis, index: usize) -> Result<StridedSpan<'_, T>> {
    let (start, len, stride) = layout.line(axis, index)?;
    StridedSpan::at_offset(data, start, len, stride)
}

fn line_mut<T>(
    data: &mut [T],
    layout: Layout,
    axis: Axis,
    index: usize,
) -> Result<StridedSpanMut<'_, T>> {
    let (start, len, stride) = layout.line(axis, index)?;
    StridedSpanMut::at_offset(data, start, len, stride)
}

/// A matrix whose elements and storage order can be changed in place.
pub trait MatrixMut: Matrix {
    type TransposeMut<'b>: MatrixMut<Elem = Self::Elem>
    where
        Self: 'b;

    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Reinterpret the buffer in `major` order: strides are recomputed,
    /// elements stay where they are.
    fn set_major(&mut self, major: Major);

    fn transposed_mut(&mut self) -> Self::TransposeMut<'_>;

    fn at_mut(&mut self, i: usize, j: usize) -> Result<&mut Self::Elem> {
        let layout = self.layout();
        let offset = layout.checked_offset(i, j)?;
        self.as_mut_slice()
            .get_mut(offset)
            .ok_or(MatrixError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: layout.rows(),
                cols: layout.cols(),
            })
    }

    fn row_mut(&mut self, i: usize) -> Result<StridedSpanMut<'_, Self::Elem>> {
        let layout = self.layout();
        line_mut(self.as_mut_slice(), layout, Axis::Row, i)
    }

    fn col_mut(&mut self, j: usize) -> Result<StridedSpanMut<'_, Self::Elem>> {
        let layout = self.layout();
        line_mut(self.as_mut_slice(), layout, Axis::Col, j)
    }

    fn flatten_mut(&mut self) -> FlatViewMut<'_, Self::Elem> {
        let layout = self.layout();
        FlatViewMut::new(self.as_mut_slice(), layout)
    }

    fn fill(&mut self, value: Self::Elem)
    where
        Self::Elem: Clone,
    {
        self.flatten_mut().fill(value);
    }
}

// ============================================================================
// Borrowed matrices
// ============================================================================

impl<M: MatrixLike + ?Sized> MatrixLike for &M {
    type Elem = M::Elem;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Result<&M::Elem> {
        (**self).at(i, j)
    }
}

impl<M: Abs + ?Sized> Abs for &M {
    const SPECIALIZED: bool = M::SPECIALIZED;

    fn abs(&self) -> Result<DenseMatrix<Self::Elem>>
    where
        Self::Elem: SignedScalar,
    {
        (**self).abs()
    }
}

// Pairings are registered on the referent types; a borrowed left operand
// multiplies anything through the generic algorithm.
impl<L: MatrixLike + ?Sized, R: MatrixLike + ?Sized> Matmul<R> for &L {}

impl<M: Matrix + ?Sized> Matrix for &M {
    type Transpose<'b> = Transposed<'b, M> where Self: 'b;

    #[inline]
    fn layout(&self) -> Layout {
        (**self).layout()
    }

    #[inline]
    fn as_slice(&self) -> &[M::Elem] {
        (**self).as_slice()
    }

    fn transposed(&self) -> Transposed<'_, M> {
        Transposed::new(&**self)
    }
}

impl<M: MatrixLike + ?Sized> MatrixLike for &mut M {
    type Elem = M::Elem;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Result<&M::Elem> {
        (**self).at(i, j)
    }
}

impl<M: Abs + ?Sized> Abs for &mut M {
    const SPECIALIZED: bool = M::SPECIALIZED;

    fn abs(&self) -> Result<DenseMatrix<Self::Elem>>
    where
        Self::Elem: SignedScalar,
    {
        (**self).abs()
    }
}

impl<L: MatrixLike + ?Sized, R: MatrixLike + ?Sized> Matmul<R> for &mut L {}

impl<M: Matrix + ?Sized> Matrix for &mut M {
    type Transpose<'b> = Transposed<'b, M> where Self: 'b;

    #[inline]
    fn layout(&self) -> Layout {
        (**self).layout()
    }

    #[inline]
    fn as_slice(&self) -> &[M::Elem] {
        (**self).as_slice()
    }

    fn transposed(&self) -> Transposed<'_, M> {
        Transposed::new(&**self)
    }
}

impl<M: MatrixMut + ?Sized> MatrixMut for &mut M {
    type TransposeMut<'b> = TransposedMut<'b, M> where Self: 'b;

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [M::Elem] {
        (**self).as_mut_slice()
    }

    fn set_major(&mut self, major: Major) {
        (**self).set_major(major)
    }

    fn transposed_mut(&mut self) -> TransposedMut<'_, M> {
        TransposedMut::new(&mut **self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(major: Major) -> DenseMatrix<i32> {
        DenseMatrix::from_rows_with_major([[1, 2, 3], [4, 5, 6]], major).unwrap()
    }

    // Generic over the contract only
    fn trace_like<M: Matrix<Elem = i32>>(m: &M) -> i32 {
        let n = m.rows().min(m.cols());
        (0..n).map(|k| *m.at(k, k).unwrap()).sum()
    }

    #[test]
    fn test_rows_and_cols_both_majors() {
        for major in [Major::Row, Major::Col] {
            let m = sample(major);
            assert_eq!(m.row(1).unwrap().to_vec(), vec![4, 5, 6]);
            assert_eq!(m.col(2).unwrap().to_vec(), vec![3, 6]);
            assert_eq!(m.row_iter(0).unwrap().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
            assert_eq!(m.col_iter(0).unwrap().copied().collect::<Vec<_>>(), vec![1, 4]);
            assert_eq!(m.flatten().to_vec(), vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_line_out_of_bounds() {
        let m = sample(Major::Row);
        assert_eq!(
            m.row(2).unwrap_err(),
            MatrixError::LineOutOfBounds {
                axis: Axis::Row,
                index: 2,
                count: 2
            }
        );
        assert!(m.col_iter(3).is_err());
    }

    #[test]
    fn test_row_strides_follow_layout() {
        let m = sample(Major::Col);
        let row = m.row(0).unwrap();
        assert_eq!(row.stride(), 2);
        let col = m.col(0).unwrap();
        assert!(col.is_contiguous());
    }

    #[test]
    fn test_reductions_via_contract() {
        let m = sample(Major::Col);
        assert_eq!(Matrix::sum(&m), 21);
        assert_eq!(Matrix::min(&m), Ok(1));
        assert_eq!(Matrix::max(&m), Ok(6));
    }

    #[test]
    fn test_borrowed_matrices_satisfy_contract() {
        let mut m = sample(Major::Row);
        assert_eq!(trace_like(&m), 6);
        assert_eq!(trace_like(&&m), 6);
        {
            let mut r = &mut m;
            *r.at_mut(1, 1).unwrap() = 50;
            assert_eq!(trace_like(&r), 51);
            r.set_major(Major::Col);
        }
        assert_eq!(m.major(), Major::Col);
    }

    #[test]
    fn test_mutable_lines() {
        let mut m = sample(Major::Col);
        m.row_mut(0).unwrap().fill(0);
        m.col_mut(2).unwrap().fill(9);
        assert_eq!(m.flatten().to_vec(), vec![0, 0, 9, 4, 5, 9]);
        m.fill(7);
        assert_eq!(m.sum(), 42);
    }

    #[test]
    fn test_to_dense_keeps_major() {
        let m = sample(Major::Col);
        let t = m.transposed().to_dense();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.major(), Major::Row);
        assert!(t.elements_eq(&m.transposed()));
        assert_eq!(m.to_dense(), m);
    }

    #[test]
    fn test_elements_eq_ignores_major() {
        let a = sample(Major::Row);
        let b = sample(Major::Col);
        assert_ne!(a, b);
        assert!(a.elements_eq(&b));
        let c = DenseMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
        assert!(!a.elements_eq(&c));
    }
}
