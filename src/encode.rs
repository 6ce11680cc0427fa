//! Encoding of plaintext bits into the high-order bits of Z_q entries, and decoding by rounding

use crate::{
    error::{Error, Result},
    matrix_arith::Matrix,
    params::Params,
};

use alloc::{vec, vec::Vec};

/// Returns bit `idx` of the bitstring, reading each byte MSB first
fn get_bit(bytes: &[u8], idx: usize) -> u16 {
    ((bytes[idx / 8] >> (7 - idx % 8)) & 1) as u16
}

/// Sets bit `idx` of the bitstring, reading each byte MSB first
fn set_bit(bytes: &mut [u8], idx: usize) {
    bytes[idx / 8] |= 0x80 >> (idx % 8);
}

/// Encodes a `message_len()`-byte string as an m̄×n̄ matrix. Every entry takes B consecutive
/// bits of the message, the first of which becomes its least significant bit, and is scaled by
/// q/2^B = 2^(D-B)
pub(crate) fn encode(params: &Params, msg: &[u8]) -> Result<Matrix> {
    if msg.len() != params.message_len() {
        tracing::debug!(
            params = params.name(),
            expected = params.message_len(),
            actual = msg.len(),
            "plaintext has the wrong length"
        );
        return Err(Error::InvalidInputLength {
            expected: params.message_len(),
            actual: msg.len(),
        });
    }

    let b = params.extracted_bits();
    let shift = params.log_q() - b;
    Ok(Matrix::tabulate(params.m_bar(), params.n_bar(), |i, j| {
        let cell = i * params.n_bar() + j;
        let k = (0..b).fold(0u16, |k, l| k | get_bit(msg, cell * b + l) << l);
        k << shift
    }))
}

/// Decodes an m̄×n̄ matrix into a `message_len()`-byte string. Every entry c is mapped to
/// ⌊c·2^B/q⌉ mod 2^B, rounding halves up, and written back in the layout [`encode`] reads
pub(crate) fn decode(params: &Params, mat: &Matrix) -> Result<Vec<u8>> {
    let expected_shape = (params.m_bar(), params.n_bar());
    if mat.shape() != expected_shape {
        return Err(Error::DimensionMismatch {
            left: mat.shape(),
            right: expected_shape,
        });
    }

    let b = params.extracted_bits();
    let shift = params.log_q() - b;
    // Adding half of 2^(D-B) before truncating is what makes this round to nearest
    let half = (1u16 << shift) >> 1;
    let b_mask = ((1u32 << b) - 1) as u16;

    let mut msg = vec![0u8; params.message_len()];
    for (cell, &c) in mat.as_slice().iter().enumerate() {
        // The addition may wrap past 2^16 when D = 16. That only changes bits above B, which the
        // mask drops
        let k = ((c & params.q_mask()).wrapping_add(half) >> shift) & b_mask;
        for l in 0..b {
            if (k >> l) & 1 == 1 {
                set_bit(&mut msg, cell * b + l);
            }
        }
    }

    Ok(msg)
}
