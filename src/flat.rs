//! One-dimensional views of a whole matrix in logical row-major order.
//!
//! Element `k` of a flattened `rows x cols` matrix is `(k / cols, k % cols)`,
//! regardless of how the buffer is laid out. When the storage happens to be
//! row-contiguous (row-major, a single row, or a single column) the view can
//! also be handed out as a plain [`StridedSpan`].

use std::iter::FusedIterator;

use crate::layout::Layout;
use crate::span::{StridedSpan, StridedSpanMut};
use crate::{MatrixError, Result};

fn flat_index_error(index: usize, len: usize) -> MatrixError {
    MatrixError::SpanIndexOutOfBounds { index, len }
}

// ============================================================================
// FlatView
// ============================================================================

/// Read-only flattened view.
pub struct FlatView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<T> Clone for FlatView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FlatView<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for FlatView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> FlatView<'a, T> {
    /// `data` must cover every offset of `layout` (guaranteed by the owning matrix).
    pub(crate) fn new(data: &'a [T], layout: Layout) -> Self {
        debug_assert!(
            layout.is_empty() || layout.offset(layout.rows() - 1, layout.cols() - 1) < data.len()
        );
        Self { data, layout }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Layout of the matrix being viewed.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn get(&self, k: usize) -> Option<&'a T> {
        if k < self.len() {
            self.data.get(self.layout.linear_offset(k))
        } else {
            None
        }
    }

    pub fn at(&self, k: usize) -> Result<&'a T> {
        self.get(k).ok_or_else(|| flat_index_error(k, self.len()))
    }

    pub fn iter(&self) -> FlatIter<'a, T> {
        FlatIter {
            data: self.data,
            layout: self.layout,
            pos: 0,
            end: self.len(),
        }
    }

    /// The same elements as a single strided span, if the storage allows it.
    ///
    /// Returns `None` for multi-row column-major storage, where logical
    /// row-major order has no single stride.
    pub fn as_span(&self) -> Option<StridedSpan<'a, T>> {
        let stride = self.layout.row_major_stride()?;
        StridedSpan::new(self.data, self.len(), stride).ok()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> std::ops::Index<usize> for FlatView<'_, T> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        match self.get(k) {
            Some(x) => x,
            None => panic!("{}", flat_index_error(k, self.len())),
        }
    }
}

impl<'a, T> IntoIterator for FlatView<'a, T> {
    type Item = &'a T;
    type IntoIter = FlatIter<'a, T>;

    fn into_iter(self) -> FlatIter<'a, T> {
        self.iter()
    }
}

/// Iterator over a [`FlatView`].
pub struct FlatIter<'a, T> {
    data: &'a [T],
    layout: Layout,
    pos: usize,
    end: usize,
}

impl<T> Clone for FlatIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            layout: self.layout,
            pos: self.pos,
            end: self.end,
        }
    }
}

impl<'a, T> Iterator for FlatIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.pos < self.end {
            let item = self.data.get(self.layout.linear_offset(self.pos));
            self.pos += 1;
            item
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl<'a, T> DoubleEndedIterator for FlatIter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.end > self.pos {
            self.end -= 1;
            self.data.get(self.layout.linear_offset(self.end))
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for FlatIter<'_, T> {}

impl<T> FusedIterator for FlatIter<'_, T> {}

// ============================================================================
// FlatViewMut
// ============================================================================

/// Mutable flattened view.
pub struct FlatViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

impl<T: std::fmt::Debug> std::fmt::Debug for FlatViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.as_flat(), f)
    }
}

impl<'a, T> FlatViewMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], layout: Layout) -> Self {
        debug_assert!(
            layout.is_empty() || layout.offset(layout.rows() - 1, layout.cols() - 1) < data.len()
        );
        Self { data, layout }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Read-only reborrow.
    pub fn as_flat(&self) -> FlatView<'_, T> {
        FlatView::new(&*self.data, self.layout)
    }

    #[inline]
    pub fn get(&self, k: usize) -> Option<&T> {
        if k < self.len() {
            self.data.get(self.layout.linear_offset(k))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, k: usize) -> Option<&mut T> {
        if k < self.len() {
            self.data.get_mut(self.layout.linear_offset(k))
        } else {
            None
        }
    }

    pub fn at(&self, k: usize) -> Result<&T> {
        let len = self.len();
        self.get(k).ok_or_else(|| flat_index_error(k, len))
    }

    pub fn at_mut(&mut self, k: usize) -> Result<&mut T> {
        let len = self.len();
        self.get_mut(k).ok_or_else(|| flat_index_error(k, len))
    }

    pub fn iter(&self) -> FlatIter<'_, T> {
        self.as_flat().iter()
    }

    /// Apply `f` to every element in logical row-major order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let layout = self.layout;
        for k in 0..layout.len() {
            f(&mut self.data[layout.linear_offset(k)]);
        }
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| *x = value.clone());
    }

    /// Mutable single-span form, when the storage is row-contiguous.
    pub fn as_span_mut(&mut self) -> Option<StridedSpanMut<'_, T>> {
        let stride = self.layout.row_major_stride()?;
        let len = self.len();
        StridedSpanMut::new(&mut *self.data, len, stride).ok()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_flat().to_vec()
    }
}

impl<T> std::ops::Index<usize> for FlatViewMut<'_, T> {
    type Output = T;

    fn index(&self, k: usize) -> &T {
        let len = self.len();
        match self.get(k) {
            Some(x) => x,
            None => panic!("{}", flat_index_error(k, len)),
        }
    }
}

impl<T> std::ops::IndexMut<usize> for FlatViewMut<'_, T> {
    fn index_mut(&mut self, k: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(k) {
            Some(x) => x,
            None => panic!("{}", flat_index_error(k, len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Major;

    #[test]
    fn test_flat_view_col_major_is_logical() {
        // 2x3 column-major: [[1, 2, 3], [4, 5, 6]]
        let data = [1, 4, 2, 5, 3, 6];
        let flat = FlatView::new(&data, Layout::new(2, 3, Major::Col));
        assert_eq!(flat.len(), 6);
        assert_eq!(flat.to_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(flat[4], 5);
        assert_eq!(flat.iter().rev().copied().collect::<Vec<_>>(), vec![6, 5, 4, 3, 2, 1]);
        assert!(flat.as_span().is_none());
        assert_eq!(
            flat.at(6),
            Err(MatrixError::SpanIndexOutOfBounds { index: 6, len: 6 })
        );
    }

    #[test]
    fn test_flat_view_as_span() {
        let data = [1, 2, 3, 4, 5, 6];
        let flat = FlatView::new(&data, Layout::new(2, 3, Major::Row));
        let span = flat.as_span().unwrap();
        assert!(span.is_contiguous());
        assert_eq!(span.to_vec(), vec![1, 2, 3, 4, 5, 6]);

        // Single row stored column-major still forms a span
        let row = FlatView::new(&data[..3], Layout::new(1, 3, Major::Col));
        assert_eq!(row.as_span().unwrap().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_flat_view_empty() {
        let data: [f64; 0] = [];
        let flat = FlatView::new(&data, Layout::new(0, 4, Major::Col));
        assert!(flat.is_empty());
        assert_eq!(flat.iter().next(), None);
        assert_eq!(flat.as_span().map(|s| s.len()), Some(0));
    }

    #[test]
    fn test_flat_view_mut_writes_in_logical_order() {
        let mut data = [0; 6];
        let mut flat = FlatViewMut::new(&mut data, Layout::new(2, 3, Major::Col));
        let mut next = 1;
        flat.for_each_mut(|x| {
            *x = next;
            next += 1;
        });
        flat[0] = 10;
        *flat.at_mut(5).unwrap() = 60;
        assert!(flat.as_span_mut().is_none());
        assert_eq!(data, [10, 4, 2, 5, 3, 60]);
    }

    #[test]
    fn test_flat_view_mut_fill() {
        let mut data = [0.0; 4];
        let mut flat = FlatViewMut::new(&mut data, Layout::new(2, 2, Major::Row));
        flat.fill(1.5);
        assert_eq!(flat.to_vec(), vec![1.5; 4]);
        flat.as_span_mut().unwrap().fill(2.0);
        assert_eq!(data, [2.0; 4]);
    }
}
