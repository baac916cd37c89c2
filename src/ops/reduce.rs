//! Whole-matrix reductions.
//!
//! The free functions walk any [`MatrixLike`] in row-major order through
//! `at`; [`Matrix::sum`](crate::Matrix::sum) and friends feed the flattened
//! view into the same value helpers.

use strided_matrix_traits::Scalar;

use crate::matrix::MatrixLike;
use crate::{MatrixError, Result};

/// Sum starting from `T::zero()`.
pub fn sum_values<T, I>(values: I) -> T
where
    T: Scalar,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(T::zero(), |acc, x| acc + x)
}

/// Smallest value under `PartialOrd`; `EmptyReduction` if there are none.
///
/// A value replaces the current best only if it compares less, so values
/// that do not compare (NaN) never win unless they come first.
pub fn min_value<T, I>(values: I) -> Result<T>
where
    T: Copy + PartialOrd,
    I: IntoIterator<Item = T>,
{
    let mut it = values.into_iter();
    let first = it.next().ok_or(MatrixError::EmptyReduction)?;
    Ok(it.fold(first, |best, x| if x < best { x } else { best }))
}

/// Largest value under `PartialOrd`; `EmptyReduction` if there are none.
pub fn max_value<T, I>(values: I) -> Result<T>
where
    T: Copy + PartialOrd,
    I: IntoIterator<Item = T>,
{
    let mut it = values.into_iter();
    let first = it.next().ok_or(MatrixError::EmptyReduction)?;
    Ok(it.fold(first, |best, x| if x > best { x } else { best }))
}

/// Row-major walk of `m` by value.
fn elements<M>(m: &M) -> impl Iterator<Item = Result<M::Elem>> + '_
where
    M: MatrixLike + ?Sized,
    M::Elem: Copy,
{
    let cols = m.cols();
    (0..m.size()).map(move |k| m.at(k / cols, k % cols).copied())
}

/// Sum of all elements; zero for an empty matrix.
pub fn sum<M>(m: &M) -> Result<M::Elem>
where
    M: MatrixLike + ?Sized,
    M::Elem: Scalar,
{
    elements(m).try_fold(num_traits::zero(), |acc: M::Elem, x| Ok(acc + x?))
}

/// First element, then each later one that `replaces` the current best.
fn select<M, F>(m: &M, replaces: F) -> Result<M::Elem>
where
    M: MatrixLike + ?Sized,
    M::Elem: Copy,
    F: Fn(&M::Elem, &M::Elem) -> bool,
{
    let mut it = elements(m);
    let first = it.next().ok_or(MatrixError::EmptyReduction)??;
    it.try_fold(first, |best, x| {
        let x = x?;
        Ok(if replaces(&x, &best) { x } else { best })
    })
}

/// Smallest element.
///
/// # Errors
/// `EmptyReduction` if `m` has no elements.
pub fn min<M>(m: &M) -> Result<M::Elem>
where
    M: MatrixLike + ?Sized,
    M::Elem: Copy + PartialOrd,
{
    select(m, |x, best| x < best)
}

/// Largest element.
///
/// # Errors
/// `EmptyReduction` if `m` has no elements.
pub fn max<M>(m: &M) -> Result<M::Elem>
where
    M: MatrixLike + ?Sized,
    M::Elem: Copy + PartialOrd,
{
    select(m, |x, best| x > best)
}
