//! The operations a FrodoPKE parameter set provides. The encryption scheme is written against this
//! trait alone, so adding a parameter set or a new error distribution doesn't touch it

use crate::{encode, error::Result, gen, matrix_arith::Matrix, params::Params, sample, ser};

use alloc::vec::Vec;

/// The primitive layer of FrodoPKE. All matrices are over Z_q for the implementor's q
pub trait LatticeOps {
    /// Encodes a `message_len()`-byte plaintext as an m̄×n̄ matrix
    fn encode(&self, msg: &[u8]) -> Result<Matrix>;

    /// Decodes an m̄×n̄ matrix into a `message_len()`-byte plaintext, rounding to the nearest
    /// codeword
    fn decode(&self, mat: &Matrix) -> Result<Vec<u8>>;

    /// Packs a matrix into D bits per entry, MSB first, row-major
    fn pack(&self, mat: &Matrix) -> Vec<u8>;

    /// Unpacks an n1×n2 matrix. Fails if `bytes` is shorter than `packed_len(n1, n2)`
    fn unpack(&self, bytes: &[u8], n1: usize, n2: usize) -> Result<Matrix>;

    /// Expands a public seed into the n×n matrix A
    fn gen(&self, seed: &[u8]) -> Result<Matrix>;

    /// Maps one uniform 16-bit word to a sample from the error distribution
    fn sample(&self, r: u16) -> u16;

    /// Samples an n1×n2 error matrix from `2·n1·n2` uniform bytes
    fn sample_matrix(&self, buf: &[u8], n1: usize, n2: usize) -> Result<Matrix>;

    /// Computes `a·b`
    fn mul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;

    /// Computes `a·b + e`
    fn mul_add(&self, a: &Matrix, b: &Matrix, e: &Matrix) -> Result<Matrix>;

    /// Computes `a + b`
    fn add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;

    /// Computes `a - b`
    fn sub(&self, a: &Matrix, b: &Matrix) -> Result<Matrix>;
}

impl LatticeOps for Params {
    fn encode(&self, msg: &[u8]) -> Result<Matrix> {
        encode::encode(self, msg)
    }

    fn decode(&self, mat: &Matrix) -> Result<Vec<u8>> {
        encode::decode(self, mat)
    }

    fn pack(&self, mat: &Matrix) -> Vec<u8> {
        ser::pack(self, mat)
    }

    fn unpack(&self, bytes: &[u8], n1: usize, n2: usize) -> Result<Matrix> {
        ser::unpack(self, bytes, n1, n2)
    }

    fn gen(&self, seed: &[u8]) -> Result<Matrix> {
        gen::gen_matrix_from_seed(self, seed)
    }

    fn sample(&self, r: u16) -> u16 {
        sample::sample(self, r)
    }

    fn sample_matrix(&self, buf: &[u8], n1: usize, n2: usize) -> Result<Matrix> {
        sample::sample_matrix(self, buf, n1, n2)
    }

    fn mul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.mul(b, self.log_q())
    }

    fn mul_add(&self, a: &Matrix, b: &Matrix, e: &Matrix) -> Result<Matrix> {
        a.mul_add(b, e, self.log_q())
    }

    fn add(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.add(b, self.log_q())
    }

    fn sub(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        a.sub(b, self.log_q())
    }
}
