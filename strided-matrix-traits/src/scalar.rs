//! Scalar type bounds for matrix storage, reductions and multiplication.

/// Shared trait bounds for all element types usable with `matmul` and `sum`.
///
/// Only the semiring operations are required, so custom scalar types
/// (e.g., a tropical semiring) can be multiplied without implementing
/// ordering or negation.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + std::ops::Mul<Output = Self>
    + std::ops::Add<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> Scalar for T where
    T: Copy
        + Send
        + Sync
        + std::ops::Mul<Output = T>
        + std::ops::Add<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}

/// Scalars with a sign: ordered against zero, negatable and bounded.
///
/// Elementwise `abs` is computed as `if x < 0 { -x } else { x }` rather than
/// through a library absolute-value call. The bounds tell an asymmetric
/// range (two's-complement integers) from a symmetric one (floats), so the
/// one value whose negation overflows is caught before negating.
pub trait SignedScalar:
    Scalar + PartialOrd + std::ops::Neg<Output = Self> + num_traits::Bounded
{
    /// `|self|` by sign test and negation, or `None` if `-self` does not fit.
    #[inline]
    fn checked_abs_by_sign(self) -> Option<Self> {
        if self < Self::zero() {
            // min + max is zero only for a symmetric range
            let symmetric = (Self::min_value() + Self::max_value()).is_zero();
            if self == Self::min_value() && !symmetric {
                return None;
            }
            Some(-self)
        } else {
            Some(self)
        }
    }
}

impl<T> SignedScalar for T where
    T: Scalar + PartialOrd + std::ops::Neg<Output = T> + num_traits::Bounded
{
}

/// Element pairs whose product `Self * Rhs` is a [`Scalar`].
///
/// This is what a matrix product needs from its operands: the output
/// element type is whatever `lhs * rhs` yields, and it must be summable
/// from zero. Covered by a blanket impl over [`std::ops::Mul`].
pub trait ScalarMul<Rhs = Self>: Copy {
    type Output: Scalar;

    fn scalar_mul(self, rhs: Rhs) -> Self::Output;
}

impl<A, B, O> ScalarMul<B> for A
where
    A: Copy + std::ops::Mul<B, Output = O>,
    O: Scalar,
{
    type Output = O;

    #[inline]
    fn scalar_mul(self, rhs: B) -> O {
        self * rhs
    }
}
