use crate::{
    error::{Error, Result},
    matrix_arith::Matrix,
    params::{Params, Xof},
};

use alloc::vec;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

/// Absorbs all of `inputs` in order and squeezes `out.len()` bytes
fn squeeze_with<H: Default + Update + ExtendableOutput>(inputs: &[&[u8]], out: &mut [u8]) {
    let mut h = H::default();
    for input in inputs {
        h.update(input);
    }
    h.finalize_xof().read(out);
}

impl Xof {
    /// Hashes the concatenation of `inputs` and fills `out` with the XOF output
    pub(crate) fn squeeze(self, inputs: &[&[u8]], out: &mut [u8]) {
        match self {
            Xof::Shake128 => squeeze_with::<Shake128>(inputs, out),
            Xof::Shake256 => squeeze_with::<Shake256>(inputs, out),
        }
    }
}

/// Uses a public seed to generate the pseudorandom matrix A in Z_q^{n×n}. Row i is the XOF output
/// of `be16(i) || seed`, read as n big-endian u16s, each masked down to D bits
pub(crate) fn gen_matrix_from_seed(params: &Params, seed: &[u8]) -> Result<Matrix> {
    if seed.len() != params.seed_a_len() {
        tracing::debug!(
            params = params.name(),
            expected = params.seed_a_len(),
            actual = seed.len(),
            "matrix seed has the wrong length"
        );
        return Err(Error::InvalidSeedLength {
            expected: params.seed_a_len(),
            actual: seed.len(),
        });
    }

    let n = params.n();
    let mask = params.q_mask();
    let mut mat = Matrix::zeros(n, n);
    let mut buf = vec![0u8; 2 * n];

    // Rows are independent of each other. Each gets its own domain-separated XOF call
    for (i, row) in mat.as_mut_slice().chunks_exact_mut(n).enumerate() {
        // Fits since n ≤ 2^16 is checked when the parameter set is built
        let row_idx = (i as u16).to_be_bytes();
        params.xof().squeeze(&[&row_idx[..], seed], &mut buf);

        // Column j is made of output bytes 2j and 2j+1
        for (entry, pair) in row.iter_mut().zip(buf.chunks_exact(2)) {
            *entry = u16::from_be_bytes([pair[0], pair[1]]) & mask;
        }
    }

    Ok(mat)
}
