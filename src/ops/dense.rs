//! Kernels specialized for [`DenseMatrix`] operands.

use strided_matrix_traits::{ScalarMul, SignedScalar};

use super::{abs_overflow, check_matmul_shape, Abs, Matmul, Product};
use crate::dense::{positions, DenseMatrix};
use crate::layout::{Layout, Major};
use crate::matrix::{Matrix, MatrixLike, MatrixMut};
use crate::Result;

/// i-k-j product: for each `a(i, p)`, scale row `p` of `rhs` into row `i`
/// of the output. The innermost loop walks one output row and one `rhs` row.
pub(crate) fn matmul_ikj<T, U>(
    lhs: &DenseMatrix<T>,
    rhs: &DenseMatrix<U>,
) -> Result<DenseMatrix<Product<T, U>>>
where
    T: ScalarMul<U>,
    U: Copy,
{
    check_matmul_shape(lhs, rhs)?;
    let m = lhs.rows();
    let n = rhs.cols();

    let mut data: Vec<Product<T, U>> = vec![num_traits::zero(); m * n];
    for (i, c_row) in data.chunks_exact_mut(n.max(1)).take(m).enumerate() {
        for (p, &a_ip) in lhs.row(i)?.iter().enumerate() {
            for (c_ij, &b_pj) in c_row.iter_mut().zip(rhs.row(p)?.iter()) {
                *c_ij = *c_ij + a_ip.scalar_mul(b_pj);
            }
        }
    }
    Ok(DenseMatrix::from_parts(data, Layout::new(m, n, Major::Row)))
}

impl<T, U> Matmul<DenseMatrix<U>> for DenseMatrix<T> {
    const SPECIALIZED: bool = true;

    fn matmul(&self, rhs: &DenseMatrix<U>) -> Result<DenseMatrix<Product<T, U>>>
    where
        T: ScalarMul<U>,
        U: Copy,
    {
        log::trace!("matmul: dense i-k-j kernel for {:?} * {:?}", self.shape(), rhs.shape());
        matmul_ikj(self, rhs)
    }
}

// A borrowed right operand uses whatever is registered for its referent.
impl<'r, T, M> Matmul<&'r M> for DenseMatrix<T>
where
    M: MatrixLike + ?Sized,
    DenseMatrix<T>: Matmul<M> + MatrixLike<Elem = T>,
{
    const SPECIALIZED: bool = <DenseMatrix<T> as Matmul<M>>::SPECIALIZED;

    fn matmul(&self, rhs: &&'r M) -> Result<DenseMatrix<Product<T, M::Elem>>>
    where
        T: ScalarMul<M::Elem>,
        M::Elem: Copy,
    {
        <DenseMatrix<T> as Matmul<M>>::matmul(self, *rhs)
    }
}

impl<T> Abs for DenseMatrix<T> {
    const SPECIALIZED: bool = true;

    /// Copies the matrix (same storage order) and negates the negative
    /// entries of the buffer in place. The buffer is walked in storage
    /// order, so an overflow is reported at the first offending element in
    /// that order.
    fn abs(&self) -> Result<DenseMatrix<T>>
    where
        T: SignedScalar,
    {
        log::trace!("abs: dense in-place kernel for {:?}", self.shape());
        let mut out = self.clone();
        let (rows, cols) = out.shape();
        let major = out.major();
        for ((i, j), x) in positions(rows, cols, major).zip(out.as_mut_slice()) {
            *x = (*x).checked_abs_by_sign().ok_or_else(|| abs_overflow(i, j))?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::fallback;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random(rng: &mut StdRng, rows: usize, cols: usize, major: Major) -> DenseMatrix<i64> {
        DenseMatrix::from_fn(rows, cols, major, |_, _| rng.gen_range(-9..=9)).unwrap()
    }

    #[test]
    fn test_ikj_matches_fallback() {
        let mut rng = StdRng::seed_from_u64(7);
        for (m, k, n) in [(1, 1, 1), (3, 4, 5), (6, 2, 3), (4, 4, 4)] {
            for ma in [Major::Row, Major::Col] {
                for mb in [Major::Row, Major::Col] {
                    let a = random(&mut rng, m, k, ma);
                    let b = random(&mut rng, k, n, mb);
                    let fast = matmul_ikj(&a, &b).unwrap();
                    let slow = fallback::matmul(&a, &b).unwrap();
                    assert_eq!(fast, slow);
                }
            }
        }
    }

    #[test]
    fn test_ikj_degenerate_shapes() {
        let a = DenseMatrix::<i32>::zeros(3, 0).unwrap();
        let b = DenseMatrix::<i32>::zeros(0, 2).unwrap();
        let c = matmul_ikj(&a, &b).unwrap();
        assert_eq!(c.shape(), (3, 2));
        assert_eq!(c.as_slice(), &[0; 6]);

        let a = DenseMatrix::<i32>::zeros(2, 3).unwrap();
        let b = DenseMatrix::<i32>::zeros(3, 0).unwrap();
        assert_eq!(matmul_ikj(&a, &b).unwrap().shape(), (2, 0));
    }

    #[test]
    fn test_dense_abs_keeps_storage_order() {
        let m = DenseMatrix::from_rows_with_major([[-1, 2], [-3, 0]], Major::Col).unwrap();
        let a = m.abs().unwrap();
        assert_eq!(a.major(), Major::Col);
        assert_eq!(a.as_slice(), &[1, 3, 2, 0]);
        assert!(a.elements_eq(&fallback::abs(&m).unwrap()));
    }

    #[test]
    fn test_abs_of_integer_minimum_is_an_error() {
        let m = DenseMatrix::from_rows_with_major([[1, i32::MIN], [-3, 4]], Major::Col).unwrap();
        let overflow = crate::MatrixError::AbsOverflow { row: 0, col: 1 };
        assert_eq!(m.abs(), Err(overflow.clone()));
        assert_eq!(fallback::abs(&m), Err(overflow));
        assert_eq!(
            crate::abs(&m.transposed()),
            Err(crate::MatrixError::AbsOverflow { row: 1, col: 0 })
        );
        let ok = DenseMatrix::from_rows([[i32::MIN + 1, -2]]).unwrap();
        assert_eq!(ok.abs().unwrap().as_slice(), &[i32::MAX, 2]);
    }

    #[test]
    fn test_dense_registrations_are_specialized() {
        assert!(<DenseMatrix<f64> as Matmul>::SPECIALIZED);
        assert!(<DenseMatrix<f64> as Abs>::SPECIALIZED);
        assert!(<&DenseMatrix<f64> as Abs>::SPECIALIZED);
    }

    #[test]
    fn test_borrowed_operands() {
        let a = DenseMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
        type View = crate::Transposed<'static, DenseMatrix<i32>>;
        assert!(<DenseMatrix<i32> as Matmul<&DenseMatrix<i32>>>::SPECIALIZED);
        assert!(!<DenseMatrix<i32> as Matmul<&View>>::SPECIALIZED);
        assert!(!<&DenseMatrix<i32> as Matmul>::SPECIALIZED);

        let c = crate::matmul(&a, &&a).unwrap();
        assert_eq!(c, a.matmul(&a).unwrap());
        assert_eq!(crate::matmul(&&a, &a).unwrap(), c);
        assert_eq!(crate::matmul(&&a, &&a).unwrap(), c);
    }
}
