//! Sampling from the error distribution χ, by inversion of the parameter set's CDF table

use crate::{
    error::{Error, Result},
    matrix_arith::Matrix,
    params::Params,
};

use subtle::{Choice, ConditionallySelectable, ConstantTimeGreater};

// Algorithm 5, Frodo.Sample
/// Maps a uniform 16-bit word to a sample from χ. The low bit picks the sign and the other 15 bits
/// are inverted through the CDF table. The result is reduced mod q.
///
/// This runs in constant time: every table entry is compared, and the sign is applied by a
/// conditional select.
pub(crate) fn sample(params: &Params, r: u16) -> u16 {
    let prnd = r >> 1;
    let sign = Choice::from((r & 1) as u8);

    // The last table entry is 2^15 - 1, which prnd never exceeds, so skip it
    let table = params.cdf_table();
    let mut e = 0u16;
    for t in &table[..table.len() - 1] {
        e += prnd.ct_gt(t).unwrap_u8() as u16;
    }

    let neg_e = e.wrapping_neg();
    u16::conditional_select(&e, &neg_e, sign) & params.q_mask()
}

// Algorithm 6, Frodo.SampleMatrix
/// Samples an n1×n2 matrix from χ. `buf` MUST hold exactly one little-endian u16 per entry,
/// in row-major order
pub(crate) fn sample_matrix(params: &Params, buf: &[u8], n1: usize, n2: usize) -> Result<Matrix> {
    // An unrepresentable size can't match any buffer
    let expected = n1
        .checked_mul(n2)
        .and_then(|entries| entries.checked_mul(2))
        .unwrap_or(usize::MAX);
    if buf.len() != expected {
        tracing::debug!(
            params = params.name(),
            expected,
            actual = buf.len(),
            "sampler input has the wrong length"
        );
        return Err(Error::InvalidBufferLength {
            expected,
            actual: buf.len(),
        });
    }

    let mut mat = Matrix::zeros(n1, n2);
    for (entry, word) in mat.as_mut_slice().iter_mut().zip(buf.chunks_exact(2)) {
        *entry = sample(params, u16::from_le_bytes([word[0], word[1]]));
    }

    Ok(mat)
}
