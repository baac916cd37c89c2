//! `*` between matrices, defined through [`Matmul`].
//!
//! The operator panics on a shape mismatch; call `matmul` for the checked form.

use std::ops::Mul;

use strided_matrix_traits::ScalarMul;

use super::{Matmul, Product};
use crate::dense::DenseMatrix;
use crate::matrix::MatrixLike;
use crate::transposed::Transposed;
use crate::Result;

fn unwrap_product<T>(product: Result<DenseMatrix<T>>) -> DenseMatrix<T> {
    match product {
        Ok(c) => c,
        Err(e) => panic!("{}", e),
    }
}

impl<'a, 'b, T, Rhs> Mul<&'b Rhs> for &'a DenseMatrix<T>
where
    Rhs: MatrixLike + ?Sized,
    DenseMatrix<T>: Matmul<Rhs> + MatrixLike<Elem = T>,
    T: ScalarMul<Rhs::Elem>,
    Rhs::Elem: Copy,
{
    type Output = DenseMatrix<Product<T, Rhs::Elem>>;

    fn mul(self, rhs: &'b Rhs) -> Self::Output {
        unwrap_product(<DenseMatrix<T> as Matmul<Rhs>>::matmul(self, rhs))
    }
}

impl<T, U> Mul<DenseMatrix<U>> for DenseMatrix<T>
where
    T: ScalarMul<U>,
    U: Copy,
{
    type Output = DenseMatrix<Product<T, U>>;

    fn mul(self, rhs: DenseMatrix<U>) -> Self::Output {
        unwrap_product(<DenseMatrix<T> as Matmul<DenseMatrix<U>>>::matmul(&self, &rhs))
    }
}

impl<'a, 'b, M, Rhs> Mul<&'b Rhs> for Transposed<'a, M>
where
    M: MatrixLike + ?Sized,
    Rhs: MatrixLike + ?Sized,
    M::Elem: ScalarMul<Rhs::Elem>,
    Rhs::Elem: Copy,
{
    type Output = DenseMatrix<Product<M::Elem, Rhs::Elem>>;

    fn mul(self, rhs: &'b Rhs) -> Self::Output {
        unwrap_product(<Self as Matmul<Rhs>>::matmul(&self, rhs))
    }
}

#[cfg(test)]
mod tests {
    use crate::{DenseMatrix, Major, Matrix, MatrixLike};

    #[test]
    fn test_mul_operator_forms() {
        let a = DenseMatrix::from_rows([[1, 2], [3, 4]]).unwrap();
        let b = DenseMatrix::from_rows_with_major([[0, 1], [1, 0]], Major::Col).unwrap();
        let by_ref = &a * &b;
        assert_eq!(by_ref.flatten().to_vec(), vec![2, 1, 4, 3]);
        let by_value = a.clone() * b.clone();
        assert_eq!(by_value, by_ref);
        // Borrowed right operand keeps the dense kernel
        let by_double_ref = &a * &&b;
        assert_eq!(by_double_ref, by_ref);

        // A^T * A through the transposed view
        let ata = a.transposed() * &a;
        assert_eq!(ata.flatten().to_vec(), vec![10, 14, 14, 20]);
        // A * A^T
        let aat = &a * &a.transposed();
        assert!(aat.elements_eq(&DenseMatrix::from_rows([[5, 11], [11, 25]]).unwrap()));
    }

    #[test]
    #[should_panic(expected = "matmul shape mismatch")]
    fn test_mul_operator_panics_on_mismatch() {
        let a = DenseMatrix::<f64>::zeros(2, 3).unwrap();
        let _ = &a * &a;
    }
}
