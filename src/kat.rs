//! This module contains known-answer tests (KATs) for matrix generation

use crate::{frodo::LatticeOps, params::ALL_PARAMS};

use std::{string::String, vec::Vec};

use serde::{Deserialize, Deserializer};
use sha3::{Digest, Sha3_256};

/// Path of the JSON file holding the matrix generation vectors
const GEN_MATRIX_KAT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/kat/gen_matrix.json");

#[derive(Deserialize)]
struct GenMatrixVector {
    params: String,
    #[serde(deserialize_with = "bytes_from_hex")]
    seed: Vec<u8>,
    first_row_prefix: Vec<u16>,
    last_row_suffix: Vec<u16>,
    /// SHA3-256 of the whole matrix, each entry written as a big-endian u16, row-major
    #[serde(deserialize_with = "bytes_from_hex")]
    matrix_sha3_256: Vec<u8>,
}

// Tells serde how to deserialize bytes from the hex representation
fn bytes_from_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut hex_str = String::deserialize(deserializer)?;
    // Prepend a 0 if it's not even length
    if hex_str.len() % 2 == 1 {
        hex_str.insert(0, '0');
    }
    hex::decode(hex_str).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
}

#[test]
fn kat_gen_matrix() {
    let kat_json_file = std::fs::File::open(GEN_MATRIX_KAT).unwrap();
    let test_vectors = serde_json::from_reader::<_, Vec<GenMatrixVector>>(kat_json_file).unwrap();
    assert_eq!(test_vectors.len(), 2 * ALL_PARAMS.len());

    for tv in test_vectors {
        let params = ALL_PARAMS
            .iter()
            .find(|p| p.name() == tv.params)
            .expect("unknown parameter set in KAT file");
        let mat = params.gen(&tv.seed).unwrap();
        let n = params.n();

        assert_eq!(&mat.row(0)[..8], tv.first_row_prefix.as_slice());
        assert_eq!(&mat.row(n - 1)[n - 8..], tv.last_row_suffix.as_slice());

        let mut hasher = Sha3_256::new();
        for entry in mat.as_slice() {
            hasher.update(entry.to_be_bytes());
        }
        assert_eq!(
            hasher.finalize().as_slice(),
            tv.matrix_sha3_256.as_slice(),
            "{}: generated matrix does not match",
            tv.params
        );
    }
}
