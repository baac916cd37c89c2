//! Owning matrix storage.

use num_traits::{One, Zero};

use crate::layout::{Layout, Major};
use crate::matrix::{Matrix, MatrixLike, MatrixMut};
use crate::span::{StridedSpan, StridedSpanMut};
use crate::transposed::{Transposed, TransposedMut};
use crate::{MatrixError, Result};

/// `rows * cols`, or `SizeOverflow`.
fn checked_len(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatrixError::SizeOverflow { rows, cols })
}

/// Logical `(i, j)` pairs in the storage order of `major`.
pub(crate) fn positions(
    rows: usize,
    cols: usize,
    major: Major,
) -> impl Iterator<Item = (usize, usize)> {
    let total = rows * cols;
    (0..total).map(move |p| match major {
        Major::Row => (p / cols, p % cols),
        Major::Col => (p % rows, p / rows),
    })
}

/// Copy the elements `src` addresses in `data` into a fresh buffer laid out
/// in `major` order.
pub(crate) fn gather<T: Clone>(data: &[T], src: Layout, major: Major) -> Vec<T> {
    positions(src.rows(), src.cols(), major)
        .map(|(i, j)| data[src.offset(i, j)].clone())
        .collect()
}

/// Move the elements of `data` (laid out by `src`) into `major` order.
fn relayout<T>(data: Vec<T>, src: Layout, major: Major) -> Vec<T> {
    if src.major() == major {
        return data;
    }
    let mut slots: Vec<Option<T>> = data.into_iter().map(Some).collect();
    positions(src.rows(), src.cols(), major)
        .filter_map(|(i, j)| slots[src.offset(i, j)].take())
        .collect()
}

/// Dense matrix over a contiguous `Vec<T>` in row- or column-major order.
///
/// The buffer always holds exactly `rows * cols` elements, and the layout's
/// strides always match its major order.
///
/// `==` compares the buffer and the full layout, so a row-major and a
/// column-major matrix holding the same logical values are *not* equal; use
/// [`MatrixLike::elements_eq`] for that.
///
/// # Example
/// ```
/// use strided_matrix::{DenseMatrix, Major, Matrix};
///
/// let m = DenseMatrix::from_vec_with_major(vec![1, 4, 2, 5, 3, 6], 2, 3, Major::Col).unwrap();
/// assert_eq!(m[(0, 2)], 3);
/// assert_eq!(m.row(1).unwrap().to_vec(), vec![4, 5, 6]);
/// assert_eq!(m.as_slice(), &[1, 4, 2, 5, 3, 6]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<T> {
    data: Vec<T>,
    layout: Layout,
}

impl<T> Default for DenseMatrix<T> {
    /// 0x0 with a zeroed layout, the state [`DenseMatrix::take`] leaves behind.
    fn default() -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::default(),
        }
    }
}

impl<T> DenseMatrix<T> {
    /// Trusts the caller that `data.len() == layout.len()`.
    pub(crate) fn from_parts(data: Vec<T>, layout: Layout) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Self { data, layout }
    }

    /// Row-major matrix over `data`.
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        Self::from_vec_with_major(data, rows, cols, Major::Row)
    }

    /// Matrix over `data`, which is already in `major` order.
    pub fn from_vec_with_major(
        data: Vec<T>,
        rows: usize,
        cols: usize,
        major: Major,
    ) -> Result<Self> {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            log::debug!("from_vec: {} elements for {}x{}", data.len(), rows, cols);
            return Err(MatrixError::LengthMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self::from_parts(data, Layout::new(rows, cols, major)))
    }

    /// Like [`from_vec_with_major`](Self::from_vec_with_major), copying `data`.
    pub fn from_slice(data: &[T], rows: usize, cols: usize, major: Major) -> Result<Self>
    where
        T: Clone,
    {
        let len = checked_len(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::LengthMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self::from_parts(data.to_vec(), Layout::new(rows, cols, major)))
    }

    /// Row-major matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self>
    where
        T: Zero + Clone,
    {
        Self::zeros_with_major(rows, cols, Major::Row)
    }

    pub fn zeros_with_major(rows: usize, cols: usize, major: Major) -> Result<Self>
    where
        T: Zero + Clone,
    {
        let len = checked_len(rows, cols)?;
        Ok(Self::from_parts(vec![T::zero(); len], Layout::new(rows, cols, major)))
    }

    /// Row-major matrix from nested rows.
    ///
    /// Every row must have as many elements as the first. An empty outer
    /// list gives a 0x0 matrix.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        Self::from_rows_with_major(rows, Major::Row)
    }

    /// Matrix from nested rows, stored in `major` order.
    ///
    /// The logical matrix is the same for every `major`; only the buffer differs.
    pub fn from_rows_with_major<I, R>(rows: I, major: Major) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut data = Vec::new();
        let mut nrows = 0;
        let mut ncols = 0;
        for (r, row) in rows.into_iter().enumerate() {
            let before = data.len();
            data.extend(row);
            let len = data.len() - before;
            if r == 0 {
                ncols = len;
            } else if len != ncols {
                log::debug!("from_rows: row {} has {} elements, expected {}", r, len, ncols);
                return Err(MatrixError::RaggedRows {
                    row: r,
                    len,
                    expected: ncols,
                });
            }
            nrows += 1;
        }
        let row_major = Layout::new(nrows, ncols, Major::Row);
        let data = relayout(data, row_major, major);
        Ok(Self::from_parts(data, Layout::new(nrows, ncols, major)))
    }

    /// Row-major matrix from a flat list of values in logical row-major order.
    pub fn from_flat<I>(values: I, rows: usize, cols: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_vec(values.into_iter().collect(), rows, cols)
    }

    /// Matrix whose `(i, j)` element is `f(i, j)`.
    ///
    /// `f` is called in storage order.
    pub fn from_fn<F>(rows: usize, cols: usize, major: Major, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        checked_len(rows, cols)?;
        let data = positions(rows, cols, major).map(|(i, j)| f(i, j)).collect();
        Ok(Self::from_parts(data, Layout::new(rows, cols, major)))
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Result<Self>
    where
        T: Zero + One,
    {
        Self::from_fn(n, n, Major::Row, |i, j| if i == j { T::one() } else { T::zero() })
    }

    /// Move the contents out, leaving an empty matrix with a zeroed layout.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// The backing buffer, in storage order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// The whole buffer as a contiguous span, in storage order.
    ///
    /// Compare [`Matrix::flatten`], which is always logical row-major.
    pub fn storage(&self) -> StridedSpan<'_, T> {
        StridedSpan::from(self.data.as_slice())
    }

    pub fn storage_mut(&mut self) -> StridedSpanMut<'_, T> {
        StridedSpanMut::from(self.data.as_mut_slice())
    }

    /// Copy with the same logical contents stored in `major` order.
    pub fn to_major(&self, major: Major) -> Self
    where
        T: Clone,
    {
        Self::from_parts(
            gather(&self.data, self.layout, major),
            self.layout.with_major(major),
        )
    }

    /// Physically re-layout into `major` order, keeping the logical contents.
    ///
    /// Compare [`MatrixMut::set_major`], which keeps the buffer and changes
    /// what it means.
    pub fn into_major(self, major: Major) -> Self {
        let layout = self.layout.with_major(major);
        Self::from_parts(relayout(self.data, self.layout, major), layout)
    }
}

impl<T> MatrixLike for DenseMatrix<T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.layout.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.layout.cols()
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> Result<&T> {
        let offset = self.layout.checked_offset(i, j)?;
        Ok(&self.data[offset])
    }
}

impl<T> Matrix for DenseMatrix<T> {
    type Transpose<'b> = Transposed<'b, Self> where Self: 'b;

    #[inline]
    fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn transposed(&self) -> Transposed<'_, Self> {
        Transposed::new(self)
    }
}

impl<T> MatrixMut for DenseMatrix<T> {
    type TransposeMut<'b> = TransposedMut<'b, Self> where Self: 'b;

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn set_major(&mut self, major: Major) {
        self.layout = self.layout.with_major(major);
    }

    fn transposed_mut(&mut self) -> TransposedMut<'_, Self> {
        TransposedMut::new(self)
    }
}

impl<T> std::ops::Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        match self.layout.checked_offset(i, j) {
            Ok(offset) => &self.data[offset],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        match self.layout.checked_offset(i, j) {
            Ok(offset) => &mut self.data[offset],
            Err(e) => panic!("{}", e),
        }
    }
}
