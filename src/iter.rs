//! Strided cursors and iterators.
//!
//! [`StridedIter`] walks a span (`base + pos * stride`); [`LineIter`] walks
//! one row or column of a 2-D [`Layout`] (`idx * sr + pos * sc` or
//! `pos * sr + idx * sc`). Both are random-access cursors as well as
//! ordinary Rust iterators:
//!
//! - `inc` / `dec` move by one and return `&mut Self`
//! - `post_inc` / `post_dec` move by one and return the cursor as it was before the move
//! - `+=`, `-=`, `+`, `-` with an `isize` offset
//! - `a - b` is the signed distance between two cursors
//! - equality is structural: same buffer, same shape and stride, same position
//!
//! Cursors may sit anywhere in `0..=len`; dereferencing at `len` yields `None`.

use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::layout::{Axis, Layout};

fn shifted(pos: usize, n: isize) -> usize {
    match pos.checked_add_signed(n) {
        Some(p) => p,
        None => panic!("cursor moved out of range: {} + {}", pos, n),
    }
}

/// Cursor arithmetic shared by the random-access iterators.
///
/// Each type provides `pos`, `len`, `end` fields; `end` is the back bound used
/// by `Iterator` / `DoubleEndedIterator` and is left untouched by cursor moves.
macro_rules! impl_cursor {
    ($ty:ident) => {
        impl<'a, T> $ty<'a, T> {
            /// Current position.
            #[inline]
            pub fn position(&self) -> usize {
                self.pos
            }

            /// Total number of elements in the underlying line or span.
            #[inline]
            pub fn line_len(&self) -> usize {
                self.len
            }

            /// Element under the cursor, `None` at or past the end.
            #[inline]
            pub fn current(&self) -> Option<&'a T> {
                self.peek_at(0)
            }

            /// Element `n` steps from the cursor.
            pub fn peek_at(&self, n: isize) -> Option<&'a T> {
                let p = self.pos.checked_add_signed(n)?;
                if p < self.len {
                    self.data.get(self.offset_of(p))
                } else {
                    None
                }
            }

            /// Pre-increment.
            #[inline]
            pub fn inc(&mut self) -> &mut Self {
                self.pos = shifted(self.pos, 1);
                self
            }

            /// Pre-decrement.
            #[inline]
            pub fn dec(&mut self) -> &mut Self {
                self.pos = shifted(self.pos, -1);
                self
            }

            /// Post-increment: advances, returns the cursor as it was.
            #[inline]
            pub fn post_inc(&mut self) -> Self {
                let prior = self.clone();
                self.inc();
                prior
            }

            /// Post-decrement: retreats, returns the cursor as it was.
            #[inline]
            pub fn post_dec(&mut self) -> Self {
                let prior = self.clone();
                self.dec();
                prior
            }
        }

        impl<T> AddAssign<isize> for $ty<'_, T> {
            fn add_assign(&mut self, n: isize) {
                self.pos = shifted(self.pos, n);
            }
        }

        impl<T> SubAssign<isize> for $ty<'_, T> {
            fn sub_assign(&mut self, n: isize) {
                match n.checked_neg() {
                    Some(m) => self.pos = shifted(self.pos, m),
                    None => panic!("cursor offset {} cannot be negated", n),
                }
            }
        }

        impl<T> Add<isize> for $ty<'_, T> {
            type Output = Self;

            fn add(mut self, n: isize) -> Self {
                self += n;
                self
            }
        }

        impl<T> Sub<isize> for $ty<'_, T> {
            type Output = Self;

            fn sub(mut self, n: isize) -> Self {
                self -= n;
                self
            }
        }

        impl<T> Sub for $ty<'_, T> {
            type Output = isize;

            /// Signed distance `self.pos - other.pos`.
            fn sub(self, other: Self) -> isize {
                self.pos as isize - other.pos as isize
            }
        }

        impl<'a, T> Iterator for $ty<'a, T> {
            type Item = &'a T;

            #[inline]
            fn next(&mut self) -> Option<&'a T> {
                if self.pos < self.end {
                    let item = self.data.get(self.offset_of(self.pos));
                    self.pos += 1;
                    item
                } else {
                    None
                }
            }

            #[inline]
            fn size_hint(&self) -> (usize, Option<usize>) {
                let n = self.end.saturating_sub(self.pos);
                (n, Some(n))
            }

            fn nth(&mut self, n: usize) -> Option<&'a T> {
                match self.pos.checked_add(n) {
                    Some(p) if p < self.end => {
                        self.pos = p;
                        self.next()
                    }
                    _ => {
                        self.pos = self.pos.max(self.end);
                        None
                    }
                }
            }
        }

        impl<'a, T> DoubleEndedIterator for $ty<'a, T> {
            #[inline]
            fn next_back(&mut self) -> Option<&'a T> {
                if self.end > self.pos {
                    self.end -= 1;
                    self.data.get(self.offset_of(self.end))
                } else {
                    None
                }
            }
        }

        impl<T> ExactSizeIterator for $ty<'_, T> {}

        impl<T> FusedIterator for $ty<'_, T> {}
    };
}

// ============================================================================
// StridedIter
// ============================================================================

/// Random-access iterator over a [`StridedSpan`](crate::StridedSpan).
pub struct StridedIter<'a, T> {
    data: &'a [T],
    stride: usize,
    len: usize,
    pos: usize,
    end: usize,
}

impl<'a, T> StridedIter<'a, T> {
    /// `data` must hold `len` elements at `stride` (validated by the span).
    pub(crate) fn new(data: &'a [T], len: usize, stride: usize) -> Self {
        Self {
            data,
            stride,
            len,
            pos: 0,
            end: len,
        }
    }

    #[inline]
    fn offset_of(&self, pos: usize) -> usize {
        pos * self.stride
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl<T> Clone for StridedIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            stride: self.stride,
            len: self.len,
            pos: self.pos,
            end: self.end,
        }
    }
}

impl<T> std::fmt::Debug for StridedIter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedIter")
            .field("base", &self.data.as_ptr())
            .field("stride", &self.stride)
            .field("len", &self.len)
            .field("pos", &self.pos)
            .finish()
    }
}

impl<T> PartialEq for StridedIter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
            && self.stride == other.stride
            && self.len == other.len
            && self.pos == other.pos
    }
}

impl<T> Eq for StridedIter<'_, T> {}

impl_cursor!(StridedIter);

// ============================================================================
// LineIter
// ============================================================================

/// Random-access iterator over one row or column of a matrix layout.
///
/// Unlike [`StridedIter`] it keeps the full 2-D layout, so two line
/// iterators compare equal only when they walk the same line of the same
/// matrix shape.
pub struct LineIter<'a, T> {
    data: &'a [T],
    layout: Layout,
    axis: Axis,
    index: usize,
    len: usize,
    pos: usize,
    end: usize,
}

impl<'a, T> LineIter<'a, T> {
    /// `data` must cover `layout` and `index` must be in range (checked by callers).
    pub(crate) fn new(data: &'a [T], layout: Layout, axis: Axis, index: usize) -> Self {
        let len = match axis {
            Axis::Row => layout.cols(),
            Axis::Col => layout.rows(),
        };
        Self {
            data,
            layout,
            axis,
            index,
            len,
            pos: 0,
            end: len,
        }
    }

    #[inline]
    fn offset_of(&self, pos: usize) -> usize {
        let (sr, sc) = self.layout.strides();
        match self.axis {
            Axis::Row => self.index * sr + pos * sc,
            Axis::Col => pos * sr + self.index * sc,
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Which row or column this iterator walks.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl<T> Clone for LineIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            layout: self.layout,
            axis: self.axis,
            index: self.index,
            len: self.len,
            pos: self.pos,
            end: self.end,
        }
    }
}

impl<T> std::fmt::Debug for LineIter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineIter")
            .field("base", &self.data.as_ptr())
            .field("layout", &self.layout)
            .field("axis", &self.axis)
            .field("index", &self.index)
            .field("pos", &self.pos)
            .finish()
    }
}

impl<T> PartialEq for LineIter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
            && self.layout == other.layout
            && self.axis == other.axis
            && self.index == other.index
            && self.pos == other.pos
    }
}

impl<T> Eq for LineIter<'_, T> {}

impl_cursor!(LineIter);

// ============================================================================
// StridedIterMut
// ============================================================================

/// Mutable iterator over a [`StridedSpanMut`](crate::StridedSpanMut).
///
/// Forward and backward only: handing out two cursors into the same span
/// would alias `&mut T`.
#[derive(Debug)]
pub struct StridedIterMut<'a, T> {
    inner: std::iter::StepBy<std::slice::IterMut<'a, T>>,
}

impl<'a, T> StridedIterMut<'a, T> {
    /// `data` must hold `len` elements at `stride` (validated by the span).
    pub(crate) fn new(data: &'a mut [T], len: usize, stride: usize) -> Self {
        // Trim to exactly the extent so that step_by yields `len` items
        // and next_back starts at the last element.
        let extent = match len {
            0 => 0,
            n => (n - 1) * stride + 1,
        };
        Self {
            inner: data[..extent].iter_mut().step_by(stride.max(1)),
        }
    }
}

impl<'a, T> Iterator for StridedIterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for StridedIterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for StridedIterMut<'_, T> {}

impl<T> FusedIterator for StridedIterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Major;
    use crate::StridedSpan;

    #[test]
    fn test_strided_iter_forward_backward() {
        let data: Vec<i32> = (0..9).collect();
        let span = StridedSpan::new(&data, 3, 3).unwrap();
        assert_eq!(span.iter().copied().collect::<Vec<_>>(), vec![0, 3, 6]);
        assert_eq!(span.iter().rev().copied().collect::<Vec<_>>(), vec![6, 3, 0]);
        assert_eq!(span.iter().len(), 3);

        let mut it = span.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&6));
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_strided_iter_cursor_arithmetic() {
        let data: Vec<i32> = (0..10).collect();
        let span = StridedSpan::new(&data, 5, 2).unwrap();
        let begin = span.iter();
        let mut it = begin.clone();
        it += 3;
        assert_eq!(it.current(), Some(&6));
        assert_eq!(it.clone() - begin.clone(), 3);
        assert_eq!(begin.clone() - it.clone(), -3);
        it -= 1;
        assert_eq!(it.current(), Some(&4));
        assert_eq!(it.peek_at(-2), Some(&0));
        assert_eq!(it.peek_at(3), None);
        assert_eq!((it.clone() + 2).current(), Some(&8));
        assert_eq!((it.clone() - 2).current(), Some(&0));
        let end = begin.clone() + 5;
        assert_eq!(end.current(), None);
        assert_eq!(end - begin, 5);
    }

    #[test]
    fn test_post_increment_returns_prior_state() {
        let data = [1, 2, 3];
        let span = StridedSpan::from(&data[..]);
        let mut it = span.iter();
        let before = it.post_inc();
        assert_eq!(before.position(), 0);
        assert_eq!(before.current(), Some(&1));
        assert_eq!(it.current(), Some(&2));

        let before = it.post_dec();
        assert_eq!(before.current(), Some(&2));
        assert_eq!(it.current(), Some(&1));
        assert_eq!(before, span.iter() + 1);
    }

    #[test]
    fn test_inc_dec_chain() {
        let data = [1, 2, 3, 4];
        let span = StridedSpan::from(&data[..]);
        let mut it = span.iter();
        it.inc().inc().dec();
        assert_eq!(it.current(), Some(&2));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cursor_before_start_panics() {
        let data = [1, 2, 3];
        let mut it = StridedSpan::from(&data[..]).iter();
        it.dec();
    }

    #[test]
    fn test_strided_iter_structural_equality() {
        let a = [1, 2, 3, 4];
        let b = [1, 2, 3, 4];
        let sa = StridedSpan::from(&a[..]);
        let sb = StridedSpan::from(&b[..]);
        // Same values, same position, different buffers
        assert_ne!(sa.iter(), sb.iter());
        assert_eq!(sa.iter(), sa.iter());
        assert_ne!(sa.iter(), sa.iter() + 1);
        let narrow = StridedSpan::new(&a, 2, 2).unwrap();
        assert_ne!(sa.iter(), narrow.iter());
    }

    #[test]
    fn test_strided_iter_nth() {
        let data: Vec<i32> = (0..6).collect();
        let mut it = StridedSpan::from(&data[..]).iter();
        assert_eq!(it.nth(2), Some(&2));
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.nth(5), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_line_iter_row_and_col() {
        // 2x3 column-major: logical [[1, 2, 3], [4, 5, 6]]
        let data = [1, 4, 2, 5, 3, 6];
        let layout = Layout::new(2, 3, Major::Col);
        let row1 = LineIter::new(&data, layout, Axis::Row, 1);
        assert_eq!(row1.copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        let col2 = LineIter::new(&data, layout, Axis::Col, 2);
        assert_eq!(col2.clone().copied().collect::<Vec<_>>(), vec![3, 6]);
        assert_eq!(col2.rev().copied().collect::<Vec<_>>(), vec![6, 3]);
    }

    #[test]
    fn test_line_iter_equality_includes_shape() {
        let data = [0; 6];
        let wide = Layout::new(2, 3, Major::Row);
        let tall = Layout::new(3, 2, Major::Row);
        let a = LineIter::new(&data, wide, Axis::Row, 0);
        let b = LineIter::new(&data, tall, Axis::Row, 0);
        assert_ne!(a, b);
        assert_eq!(a, LineIter::new(&data, wide, Axis::Row, 0));
        assert_ne!(a, LineIter::new(&data, wide, Axis::Row, 1));
        assert_ne!(a, LineIter::new(&data, wide, Axis::Col, 0));
    }

    #[test]
    fn test_line_iter_cursor() {
        let data: Vec<i32> = (0..12).collect();
        let layout = Layout::new(3, 4, Major::Row);
        let mut it = LineIter::new(&data, layout, Axis::Col, 1);
        let prior = it.post_inc();
        assert_eq!(prior.current(), Some(&1));
        assert_eq!(it.current(), Some(&5));
        it += 1;
        assert_eq!(it.current(), Some(&9));
        assert_eq!(it.clone() - prior, 2);
        assert_eq!(it.len(), 1);
    }

    #[test]
    fn test_strided_iter_mut() {
        let mut data: Vec<i32> = (0..7).collect();
        let it = StridedIterMut::new(&mut data, 3, 3);
        assert_eq!(it.len(), 3);
        for x in it {
            *x *= 10;
        }
        assert_eq!(data, vec![0, 1, 2, 30, 4, 5, 60]);

        let mut it = StridedIterMut::new(&mut data, 2, 2);
        *it.next_back().unwrap() = -1;
        assert_eq!(data[2], -1);
    }
}
