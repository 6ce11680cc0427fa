//! This file implements bit-level serialization of matrix entries, and Pack/Unpack on top of it

use crate::{
    error::{Error, Result},
    matrix_arith::Matrix,
    params::Params,
};

use alloc::{vec, vec::Vec};

/// The number of bytes needed to hold `count` elements of `bits_per_elem` bits each
pub(crate) const fn serialized_len(count: usize, bits_per_elem: usize) -> usize {
    (count * bits_per_elem).div_ceil(8)
}

/// Returns the low `bits` bits of `x`
fn low_bits(x: u32, bits: usize) -> u32 {
    x & ((1u32 << bits) - 1)
}

/// Serializes the given u16 array into a bitstring. Every element of the array contributes its
/// low `bits_per_elem` bits (must be ≤ 16), most significant bit first. Elements are not byte
/// aligned. The final byte is zero-padded.
pub(crate) fn serialize(data: &[u16], out_buf: &mut [u8], bits_per_elem: usize) {
    debug_assert_eq!(out_buf.len(), serialized_len(data.len(), bits_per_elem));

    // Since we use OR to set the output bits, we must clear the buffer at the beginning
    out_buf.fill(0);

    let mut bit_idx = 0;
    while bit_idx < bits_per_elem * data.len() {
        let byte_idx = bit_idx / 8;
        let elem_idx = bit_idx / bits_per_elem;
        let bit_in_byte = bit_idx % 8;
        let bit_in_elem = bit_idx % bits_per_elem;

        // We can move either: 1) however many bits remain free in the byte, or 2) however many
        // unwritten bits remain in the element. Whichever is smaller.
        let free_in_byte = 8 - bit_in_byte;
        let left_in_elem = bits_per_elem - bit_in_elem;
        let just_wrote = core::cmp::min(free_in_byte, left_in_elem);

        // Take the top `just_wrote` of the unwritten bits of the element
        let chunk = low_bits(data[elem_idx] as u32, left_in_elem) >> (left_in_elem - just_wrote);
        // And put them at the top of the free bits of the byte
        out_buf[byte_idx] |= (chunk << (free_in_byte - just_wrote)) as u8;

        bit_idx += just_wrote;
    }
}

/// Deserializes a bitstring made by [`serialize`] into `count` elements of `bits_per_elem` bits
pub(crate) fn deserialize(bytes: &[u8], bits_per_elem: usize, count: usize) -> Vec<u16> {
    debug_assert!(bytes.len() >= serialized_len(count, bits_per_elem));

    let mut p = vec![0u16; count];
    let mut bit_idx = 0;
    while bit_idx < bits_per_elem * count {
        let byte_idx = bit_idx / 8;
        let elem_idx = bit_idx / bits_per_elem;
        let bit_in_byte = bit_idx % 8;
        let bit_in_elem = bit_idx % bits_per_elem;

        let unread_in_byte = 8 - bit_in_byte;
        let left_in_elem = bits_per_elem - bit_in_elem;
        let just_read = core::cmp::min(unread_in_byte, left_in_elem);

        // Take the top `just_read` of the unread bits of the byte
        let chunk =
            low_bits(bytes[byte_idx] as u32, unread_in_byte) >> (unread_in_byte - just_read);
        // And put them at the top of the unset bits of the element
        p[elem_idx] |= (chunk << (left_in_elem - just_read)) as u16;

        bit_idx += just_read;
    }

    p
}

/// Packs a matrix into a bitstring of D bits per entry, row-major
pub(crate) fn pack(params: &Params, mat: &Matrix) -> Vec<u8> {
    let mut out = vec![0u8; params.packed_len(mat.rows(), mat.cols())];
    serialize(mat.as_slice(), &mut out, params.log_q());
    out
}

/// Unpacks an n1×n2 matrix from a bitstring made by [`pack`]. Bytes past the packed length are
/// ignored
pub(crate) fn unpack(params: &Params, bytes: &[u8], n1: usize, n2: usize) -> Result<Matrix> {
    // A shape whose packed length overflows can't be satisfied by any buffer
    let expected = params.checked_packed_len(n1, n2).unwrap_or(usize::MAX);
    if bytes.len() < expected {
        tracing::debug!(expected, actual = bytes.len(), "packed matrix too short");
        return Err(Error::InvalidBufferLength {
            expected,
            actual: bytes.len(),
        });
    }

    // The buffer holds at least D bits per entry, so n1·n2 fits in a usize. Deserialized
    // entries have at most D bits, so they're already reduced
    let data = deserialize(&bytes[..expected], params.log_q(), n1 * n2);
    Ok(Matrix::from_reduced(n1, n2, data))
}
