//! Borrowed one-dimensional strided views.
//!
//! A span is `(base, len, stride)` over someone else's buffer. The base is
//! kept as the tail slice `&buffer[base..]`, so every element access is an
//! ordinary bounds-checked slice index and the borrow checker ties the span's
//! lifetime to the owner. Extents are validated once, at construction.

use std::ops::{Index, IndexMut};

use crate::iter::{StridedIter, StridedIterMut};
use crate::{MatrixError, Result};

/// Validate that `len` elements at `stride` fit in a buffer of `available` elements.
pub(crate) fn validate_extent(available: usize, len: usize, stride: usize) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    if stride == 0 {
        return Err(MatrixError::ZeroStride { len });
    }
    let last = (len - 1)
        .checked_mul(stride)
        .ok_or(MatrixError::OffsetOverflow)?;
    if last >= available {
        return Err(MatrixError::SpanOutOfBuffer {
            len,
            stride,
            needed: last + 1,
            available,
        });
    }
    Ok(())
}

fn validate_slice(pos: usize, count: usize, len: usize) -> Result<()> {
    match pos.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(MatrixError::SliceOutOfRange { pos, count, len }),
    }
}

// ============================================================================
// StridedSpan
// ============================================================================

/// Immutable strided view of `len` elements.
///
/// Element `i` lives at `base + i * stride` in the owner's buffer.
///
/// # Example
/// ```
/// use strided_matrix::StridedSpan;
///
/// let data = [1, 2, 3, 4, 5, 6];
/// let evens = StridedSpan::new(&data, 3, 2).unwrap();
/// assert_eq!(evens.to_vec(), vec![1, 3, 5]);
/// assert_eq!(evens.slice(1, 2).unwrap().to_vec(), vec![3, 5]);
/// ```
pub struct StridedSpan<'a, T> {
    data: &'a [T],
    len: usize,
    stride: usize,
}

impl<T> Clone for StridedSpan<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StridedSpan<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for StridedSpan<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> StridedSpan<'a, T> {
    /// Create a span starting at `data[0]`.
    ///
    /// # Errors
    /// Returns an error if `len > 0` and the stride is 0, or if the last
    /// element would fall outside `data`.
    pub fn new(data: &'a [T], len: usize, stride: usize) -> Result<Self> {
        validate_extent(data.len(), len, stride)?;
        Ok(Self { data, len, stride })
    }

    /// A span that starts `start` elements into `data`.
    pub(crate) fn at_offset(
        data: &'a [T],
        start: usize,
        len: usize,
        stride: usize,
    ) -> Result<Self> {
        let tail = data.get(start..).unwrap_or(&[]);
        Self::new(tail, len, stride)
    }

    /// The span with no elements.
    pub fn empty() -> Self {
        Self {
            data: &[],
            len: 0,
            stride: 0,
        }
    }

    /// Pointer to the first element (dangling-but-valid for an empty buffer).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the elements are adjacent in memory.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.stride == 1
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&'a T> {
        if i < self.len {
            self.data.get(i * self.stride)
        } else {
            None
        }
    }

    /// Checked element access.
    pub fn at(&self, i: usize) -> Result<&'a T> {
        self.get(i).ok_or(MatrixError::SpanIndexOutOfBounds {
            index: i,
            len: self.len,
        })
    }

    /// Element access without the `i < len` check.
    ///
    /// # Safety
    /// `i` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> &'a T {
        self.data.get_unchecked(i * self.stride)
    }

    #[inline]
    pub fn front(&self) -> Option<&'a T> {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&'a T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Elements `pos..pos + count` of this span, same stride, same buffer.
    pub fn slice(&self, pos: usize, count: usize) -> Result<Self> {
        validate_slice(pos, count, self.len)?;
        if count == 0 {
            return Ok(Self {
                data: &[],
                len: 0,
                stride: self.stride,
            });
        }
        Ok(Self {
            data: &self.data[pos * self.stride..],
            len: count,
            stride: self.stride,
        })
    }

    /// The same base and length read at a different stride.
    pub fn with_stride(&self, stride: usize) -> Result<Self> {
        Self::new(self.data, self.len, stride)
    }

    #[inline]
    pub fn iter(&self) -> StridedIter<'a, T> {
        StridedIter::new(self.data, self.len, self.stride)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T> From<&'a [T]> for StridedSpan<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self {
            data,
            len: data.len(),
            stride: 1,
        }
    }
}

impl<T> Index<usize> for StridedSpan<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match self.get(i) {
            Some(v) => v,
            None => panic!("index {} out of bounds for span of length {}", i, self.len),
        }
    }
}

impl<'a, T> IntoIterator for StridedSpan<'a, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> StridedIter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &StridedSpan<'a, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> StridedIter<'a, T> {
        self.iter()
    }
}

// ============================================================================
// StridedSpanMut
// ============================================================================

/// Mutable strided view of `len` elements.
///
/// Holds the owner's buffer exclusively for `'a`, so no other view of the
/// same matrix can exist while it is alive.
pub struct StridedSpanMut<'a, T> {
    data: &'a mut [T],
    len: usize,
    stride: usize,
}

impl<T: std::fmt::Debug> std::fmt::Debug for StridedSpanMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_span().iter()).finish()
    }
}

impl<'a, T> StridedSpanMut<'a, T> {
    /// Create a mutable span starting at `data[0]`.
    ///
    /// # Errors
    /// Same conditions as [`StridedSpan::new`].
    pub fn new(data: &'a mut [T], len: usize, stride: usize) -> Result<Self> {
        validate_extent(data.len(), len, stride)?;
        Ok(Self { data, len, stride })
    }

    pub(crate) fn at_offset(
        data: &'a mut [T],
        start: usize,
        len: usize,
        stride: usize,
    ) -> Result<Self> {
        let tail = match data.get_mut(start..) {
            Some(tail) => tail,
            None => &mut [],
        };
        Self::new(tail, len, stride)
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.stride == 1
    }

    /// Reborrow as an immutable span.
    pub fn as_span(&self) -> StridedSpan<'_, T> {
        StridedSpan {
            data: &*self.data,
            len: self.len,
            stride: self.stride,
        }
    }

    /// Reborrow as a shorter-lived mutable span.
    pub fn reborrow(&mut self) -> StridedSpanMut<'_, T> {
        StridedSpanMut {
            data: &mut *self.data,
            len: self.len,
            stride: self.stride,
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        if i < self.len {
            self.data.get(i * self.stride)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if i < self.len {
            self.data.get_mut(i * self.stride)
        } else {
            None
        }
    }

    pub fn at(&self, i: usize) -> Result<&T> {
        let len = self.len;
        self.get(i)
            .ok_or(MatrixError::SpanIndexOutOfBounds { index: i, len })
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T> {
        let len = self.len;
        self.get_mut(i)
            .ok_or(MatrixError::SpanIndexOutOfBounds { index: i, len })
    }

    /// # Safety
    /// `i` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T {
        self.data.get_unchecked_mut(i * self.stride)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    /// Immutable sub-span `pos..pos + count`.
    pub fn slice(&self, pos: usize, count: usize) -> Result<StridedSpan<'_, T>> {
        self.as_span().slice(pos, count)
    }

    /// Mutable sub-span `pos..pos + count`, borrowing `self`.
    pub fn slice_mut(&mut self, pos: usize, count: usize) -> Result<StridedSpanMut<'_, T>> {
        self.reborrow().into_slice(pos, count)
    }

    /// Mutable sub-span `pos..pos + count`, consuming `self`.
    pub fn into_slice(self, pos: usize, count: usize) -> Result<StridedSpanMut<'a, T>> {
        let StridedSpanMut { data, len, stride } = self;
        validate_slice(pos, count, len)?;
        if count == 0 {
            return Ok(StridedSpanMut {
                data: &mut [],
                len: 0,
                stride,
            });
        }
        Ok(StridedSpanMut {
            data: &mut data[pos * stride..],
            len: count,
            stride,
        })
    }

    /// Immutable view of the same base and length at a different stride.
    pub fn with_stride(&self, stride: usize) -> Result<StridedSpan<'_, T>> {
        self.as_span().with_stride(stride)
    }

    /// Mutable view of the same base and length at a different stride.
    pub fn into_with_stride(self, stride: usize) -> Result<StridedSpanMut<'a, T>> {
        StridedSpanMut::new(self.data, self.len, stride)
    }

    pub fn iter(&self) -> StridedIter<'_, T> {
        self.as_span().iter()
    }

    pub fn iter_mut(&mut self) -> StridedIterMut<'_, T> {
        StridedIterMut::new(self.data, self.len, self.stride)
    }

    /// Overwrite every element of the span with `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for x in self.iter_mut() {
            *x = value.clone();
        }
    }

    /// Copy `src` element by element into this span.
    ///
    /// # Errors
    /// Returns [`MatrixError::LengthMismatch`] (as a `1 x n` shape) if the lengths differ.
    pub fn copy_from(&mut self, src: &StridedSpan<'_, T>) -> Result<()>
    where
        T: Clone,
    {
        if src.len() != self.len {
            return Err(MatrixError::LengthMismatch {
                len: src.len(),
                rows: 1,
                cols: self.len,
            });
        }
        for (dst, s) in self.iter_mut().zip(src.iter()) {
            *dst = s.clone();
        }
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_span().to_vec()
    }
}

impl<'a, T> From<&'a mut [T]> for StridedSpanMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self {
            data,
            len,
            stride: 1,
        }
    }
}

impl<T> Index<usize> for StridedSpanMut<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        let len = self.len;
        match self.get(i) {
            Some(v) => v,
            None => panic!("index {} out of bounds for span of length {}", i, len),
        }
    }
}

impl<T> IndexMut<usize> for StridedSpanMut<'_, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(i) {
            Some(v) => v,
            None => panic!("index {} out of bounds for span of length {}", i, len),
        }
    }
}

impl<'a, T> IntoIterator for StridedSpanMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = StridedIterMut<'a, T>;

    fn into_iter(self) -> StridedIterMut<'a, T> {
        StridedIterMut::new(self.data, self.len, self.stride)
    }
}
