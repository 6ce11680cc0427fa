use crate::{
    error::{Error, Result},
    params::Params,
};

use alloc::{vec, vec::Vec};
use zeroize::Zeroize;

/// An element of Z_q^{rows×cols} with q = 2^D ≤ 2^16, stored in row-major order
// INVARIANT: every entry is reduced mod 2^D. The public constructors reduce what they're given,
// and the arithmetic below works in u16 with wrapping, which is arithmetic mod 2^16, then masks
// down to D bits
#[derive(Eq, PartialEq, Debug, Clone, Zeroize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u16>,
}

/// Returns the number of entries in a rows×cols matrix, or `None` if its buffer couldn't be
/// allocated
pub(crate) fn checked_entries(rows: usize, cols: usize) -> Option<usize> {
    let count = rows.checked_mul(cols)?;
    if count > isize::MAX as usize / core::mem::size_of::<u16>() {
        return None;
    }
    Some(count)
}

/// Returns 2^log_q - 1. Only ever called with the D of a parameter set, so log_q ≤ 16
fn mask_for(log_q: usize) -> u16 {
    ((1u32 << log_q) - 1) as u16
}

impl Matrix {
    /// Wraps a row-major buffer, reducing every entry mod q. Fails if `data` doesn't hold exactly
    /// `rows·cols` entries
    pub fn from_vec(params: &Params, rows: usize, cols: usize, mut data: Vec<u16>) -> Result<Self> {
        if checked_entries(rows, cols) != Some(data.len()) {
            return Err(Error::DimensionMismatch {
                left: (rows, cols),
                right: (data.len(), 1),
            });
        }

        let mask = params.q_mask();
        data.iter_mut().for_each(|entry| *entry &= mask);
        Ok(Matrix { rows, cols, data })
    }

    /// Builds a matrix by calling `f(i, j)` for every entry, reducing each result mod q. Fails if
    /// the shape is too large to allocate
    pub fn from_fn(
        params: &Params,
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> u16,
    ) -> Result<Self> {
        if checked_entries(rows, cols).is_none() {
            return Err(Error::DimensionMismatch {
                left: (rows, cols),
                right: (usize::MAX, 1),
            });
        }

        let mask = params.q_mask();
        Ok(Matrix::tabulate(rows, cols, |i, j| f(i, j) & mask))
    }

    /// Makes the all-zero matrix of the given shape. Callers check the shape with
    /// [`checked_entries`] first
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0u16; rows * cols],
        }
    }

    /// Wraps a row-major buffer whose entries the caller has already reduced
    pub(crate) fn from_reduced(rows: usize, cols: usize, data: Vec<u16>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Matrix { rows, cols, data }
    }

    /// Builds a matrix by calling `f(i, j)` for every entry. `f` must return reduced values
    pub(crate) fn tabulate(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> u16) -> Self {
        let mut mat = Matrix::zeros(rows, cols);
        for (idx, entry) in mat.data.iter_mut().enumerate() {
            *entry = f(idx / cols, idx % cols);
        }
        mat
    }

    #[cfg(test)]
    pub(crate) fn rand(
        rng: &mut impl rand_core::CryptoRngCore,
        rows: usize,
        cols: usize,
        log_q: usize,
    ) -> Self {
        let mask = mask_for(log_q);
        Matrix::tabulate(rows, cols, |_, _| rng.next_u32() as u16 & mask)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the entry at row `i`, column `j`, or `None` if that's out of bounds
    pub fn get(&self, i: usize, j: usize) -> Option<u16> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Returns row `i`. Panics if out of bounds
    pub(crate) fn row(&self, i: usize) -> &[u16] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// All the entries in row-major order
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Masks every entry down to `log_q` bits
    pub(crate) fn reduce(&mut self, log_q: usize) {
        let mask = mask_for(log_q);
        for entry in self.data.iter_mut() {
            *entry &= mask;
        }
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    /// Multiplies two matrices mod 2^log_q
    pub(crate) fn mul(&self, other: &Matrix, log_q: usize) -> Result<Matrix> {
        if self.cols != other.rows || checked_entries(self.rows, other.cols).is_none() {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }

        let mut result = Matrix::zeros(self.rows, other.cols);
        if result.data.is_empty() {
            return Ok(result);
        }
        for i in 0..self.rows {
            let out_row = &mut result.data[i * other.cols..(i + 1) * other.cols];
            for (j, a) in self.row(i).iter().enumerate() {
                for (out, b) in out_row.iter_mut().zip(other.row(j)) {
                    // We can multiply and add with wrapping because everything is mod a power of 2
                    *out = out.wrapping_add(a.wrapping_mul(*b));
                }
            }
        }

        result.reduce(log_q);
        Ok(result)
    }

    /// Computes `self·other + addend` mod 2^log_q
    pub(crate) fn mul_add(&self, other: &Matrix, addend: &Matrix, log_q: usize) -> Result<Matrix> {
        let mut result = self.mul(other, log_q)?;
        result.check_same_shape(addend)?;
        for (out, e) in result.data.iter_mut().zip(addend.data.iter()) {
            *out = out.wrapping_add(*e);
        }

        result.reduce(log_q);
        Ok(result)
    }

    /// Adds two matrices mod 2^log_q
    pub(crate) fn add(&self, other: &Matrix, log_q: usize) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let mut result = self.clone();
        for (out, b) in result.data.iter_mut().zip(other.data.iter()) {
            *out = out.wrapping_add(*b);
        }

        result.reduce(log_q);
        Ok(result)
    }

    /// Subtracts `other` from this matrix mod 2^log_q
    pub(crate) fn sub(&self, other: &Matrix, log_q: usize) -> Result<Matrix> {
        self.check_same_shape(other)?;
        let mut result = self.clone();
        for (out, b) in result.data.iter_mut().zip(other.data.iter()) {
            *out = out.wrapping_sub(*b);
        }

        result.reduce(log_q);
        Ok(result)
    }

    /// Returns the matrix transpose
    #[cfg(test)]
    pub(crate) fn transpose(&self) -> Matrix {
        Matrix::tabulate(self.cols, self.rows, |i, j| self.data[j * self.cols + i])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        frodo::LatticeOps,
        params::{FRODO_1344, FRODO_640, FRODO_976},
    };

    const LOG_Q: usize = 15;

    // Checks that mul distributes over addition on the RHS
    #[test]
    fn distributivity() {
        let mut rng = rand::thread_rng();

        let mat = Matrix::rand(&mut rng, 4, 7, LOG_Q);
        let vec1 = Matrix::rand(&mut rng, 7, 3, LOG_Q);
        let vec2 = Matrix::rand(&mut rng, 7, 3, LOG_Q);

        let prod1 = mat.mul(&vec1.add(&vec2, LOG_Q).unwrap(), LOG_Q).unwrap();
        let prod2 = mat
            .mul(&vec1, LOG_Q)
            .unwrap()
            .add(&mat.mul(&vec2, LOG_Q).unwrap(), LOG_Q)
            .unwrap();
        assert_eq!(prod1, prod2);
    }

    // Checks that (AB)^T == B^T A^T
    #[test]
    fn transpose() {
        let mut rng = rand::thread_rng();

        let mat1 = Matrix::rand(&mut rng, 4, 7, LOG_Q);
        let mat2 = Matrix::rand(&mut rng, 7, 13, LOG_Q);
        let prod1 = mat1.mul(&mat2, LOG_Q).unwrap().transpose();
        let prod2 = mat2
            .transpose()
            .mul(&mat1.transpose(), LOG_Q)
            .unwrap();
        assert_eq!(prod1, prod2);
    }

    #[test]
    fn mul_add_matches_mul_then_add() {
        let mut rng = rand::thread_rng();

        let a = Matrix::rand(&mut rng, 8, 16, 16);
        let b = Matrix::rand(&mut rng, 16, 8, 16);
        let e = Matrix::rand(&mut rng, 8, 8, 16);
        let fused = a.mul_add(&b, &e, 16).unwrap();
        let separate = a.mul(&b, 16).unwrap().add(&e, 16).unwrap();
        assert_eq!(fused, separate);
    }

    #[test]
    fn sub_inverts_add() {
        let mut rng = rand::thread_rng();

        let a = Matrix::rand(&mut rng, 5, 9, LOG_Q);
        let b = Matrix::rand(&mut rng, 5, 9, LOG_Q);
        let sum = a.add(&b, LOG_Q).unwrap();
        assert_eq!(sum.sub(&b, LOG_Q).unwrap(), a);
    }

    // Every entry must land in [0, 2^D), even when the u16 arithmetic wraps
    #[test]
    fn results_are_reduced() {
        let max = (1u16 << LOG_Q) - 1;
        let a = Matrix::tabulate(3, 3, |_, _| max);
        let zero = Matrix::zeros(3, 3);

        // (2^15 - 1)^2 * 3 overflows u16 many times over
        let prod = a.mul(&a, LOG_Q).unwrap();
        let sum = a.add(&a, LOG_Q).unwrap();
        let diff = zero.sub(&a, LOG_Q).unwrap();
        let fused = a.mul_add(&a, &a, LOG_Q).unwrap();
        for mat in [&prod, &sum, &diff, &fused] {
            assert!(mat.as_slice().iter().all(|&x| x <= max));
        }

        // (-1)^2 * 3 = 3, -1 + -1 = -2, 0 - (-1) = 1
        assert!(prod.as_slice().iter().all(|&x| x == 3));
        assert!(sum.as_slice().iter().all(|&x| x == max - 1));
        assert!(diff.as_slice().iter().all(|&x| x == 1));
        assert!(fused.as_slice().iter().all(|&x| x == 2));
    }

    #[test]
    fn small_product() {
        let a = Matrix::from_vec(&FRODO_976, 2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = Matrix::from_vec(&FRODO_976, 3, 2, vec![7, 8, 9, 10, 11, 12]).unwrap();
        let prod = a.mul(&b, 16).unwrap();
        assert_eq!(prod.as_slice(), &[58, 64, 139, 154]);
    }

    #[test]
    fn dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let c = Matrix::zeros(3, 3);

        assert_eq!(
            a.mul(&b, LOG_Q),
            Err(Error::DimensionMismatch {
                left: (2, 3),
                right: (2, 3)
            })
        );
        assert!(matches!(
            a.add(&c, LOG_Q),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            a.sub(&c, LOG_Q),
            Err(Error::DimensionMismatch { .. })
        ));
        // The product is 2x3 but the addend is 3x3
        assert!(matches!(
            a.mul_add(&c, &c, LOG_Q),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Matrix::from_vec(&FRODO_640, 2, 2, vec![0; 3]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    // Entries given to the public constructors are taken mod q, so nothing outside Z_q gets in
    #[test]
    fn constructors_reduce() {
        let mat = Matrix::from_vec(&FRODO_640, 1, 2, vec![0xffff, 0x8001]).unwrap();
        assert_eq!(mat.as_slice(), &[0x7fff, 1]);

        let mat = Matrix::from_fn(&FRODO_640, 2, 2, |i, j| 0x8000 | (2 * i + j) as u16).unwrap();
        assert_eq!(mat.as_slice(), &[0, 1, 2, 3]);

        // D = 16 keeps everything
        let mat = Matrix::from_vec(&FRODO_1344, 1, 2, vec![0xffff, 0x8001]).unwrap();
        assert_eq!(mat.as_slice(), &[0xffff, 0x8001]);
    }

    // Shapes whose entry count doesn't fit in memory are errors, not panics
    #[test]
    fn oversized_shapes() {
        let huge = usize::MAX / 2 + 1;
        assert!(matches!(
            Matrix::from_vec(&FRODO_640, huge, 2, vec![]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Matrix::from_fn(&FRODO_640, huge, 4, |_, _| 0),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            Matrix::from_fn(&FRODO_640, usize::MAX / 2, 1, |_, _| 0),
            Err(Error::DimensionMismatch { .. })
        ));

        // Empty matrices with huge sides are fine on their own, but their product isn't
        let tall = Matrix::from_vec(&FRODO_640, usize::MAX, 0, vec![]).unwrap();
        let wide = Matrix::from_vec(&FRODO_640, 0, usize::MAX, vec![]).unwrap();
        assert!(matches!(
            FRODO_640.mul(&tall, &wide),
            Err(Error::DimensionMismatch { .. })
        ));
        assert_eq!(FRODO_640.mul(&wide, &tall).unwrap().shape(), (0, 0));
        let empty = Matrix::from_vec(&FRODO_640, 0, 0, vec![]).unwrap();
        assert_eq!(FRODO_640.mul(&tall, &empty).unwrap().shape(), (usize::MAX, 0));
    }

    #[test]
    fn get_is_checked() {
        let mat = Matrix::from_vec(&FRODO_640, 2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(mat.get(0, 0), Some(1));
        assert_eq!(mat.get(1, 2), Some(6));
        assert_eq!(mat.get(2, 0), None);
        assert_eq!(mat.get(0, 3), None);
        assert_eq!(mat.get(usize::MAX, usize::MAX), None);
    }
}
