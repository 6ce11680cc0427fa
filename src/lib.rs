//! The primitive layer of FrodoPKE, an encryption scheme based on plain Learning With Errors
#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

mod encode;
mod error;
mod frodo;
mod gen;
mod matrix_arith;
mod params;
mod pke;
mod sample;
mod ser;

#[cfg(test)]
mod kat;

pub use error::{Error, Result};
pub use frodo::LatticeOps;
pub use matrix_arith::Matrix;
pub use params::{Params, Xof, ALL_PARAMS, FRODO_1344, FRODO_640, FRODO_976};
pub use pke::{
    decrypt, encrypt, encrypt_deterministic, gen_keypair, gen_keypair_from_seeds, Ciphertext,
    PublicKey, SecretKey,
};
