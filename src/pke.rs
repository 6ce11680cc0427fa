//! This file implements the IND-CPA-secure FrodoPKE scheme on top of [`LatticeOps`]

use crate::{
    error::{Error, Result},
    frodo::LatticeOps,
    matrix_arith::Matrix,
    params::Params,
};

use alloc::{vec, vec::Vec};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Domain separator prepended to the secret seed during key generation
const KEYGEN_DOMAIN: u8 = 0x5f;
/// Domain separator prepended to the secret seed during encryption
const ENC_DOMAIN: u8 = 0x96;

/// A public key for FrodoPKE: the seed for A, and B = A·S + E
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    seed_a: Vec<u8>,
    b: Matrix,
}

/// A secret key for FrodoPKE: the n×n̄ matrix S. Wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    s: Matrix,
}

/// A FrodoPKE ciphertext (C1, C2)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    c1: Matrix,
    c2: Matrix,
}

impl PublicKey {
    pub fn seed_a(&self) -> &[u8] {
        &self.seed_a
    }

    pub fn matrix(&self) -> &Matrix {
        &self.b
    }

    /// Serializes this public key as `seed_a || Pack(B)`
    pub fn to_bytes(&self, params: &Params) -> Vec<u8> {
        let mut out = Vec::with_capacity(params.public_key_len());
        out.extend_from_slice(&self.seed_a);
        out.extend_from_slice(&params.pack(&self.b));
        out
    }

    /// Deserializes a public key. `bytes` MUST have length `params.public_key_len()`
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.public_key_len() {
            return Err(Error::InvalidBufferLength {
                expected: params.public_key_len(),
                actual: bytes.len(),
            });
        }

        let (seed_a, b_bytes) = bytes.split_at(params.seed_a_len());
        let b = params.unpack(b_bytes, params.n(), params.n_bar())?;
        Ok(PublicKey {
            seed_a: seed_a.to_vec(),
            b,
        })
    }
}

impl SecretKey {
    pub fn matrix(&self) -> &Matrix {
        &self.s
    }
}

impl Ciphertext {
    pub fn c1(&self) -> &Matrix {
        &self.c1
    }

    pub fn c2(&self) -> &Matrix {
        &self.c2
    }

    /// Serializes this ciphertext as `Pack(C1) || Pack(C2)`
    pub fn to_bytes(&self, params: &Params) -> Vec<u8> {
        let mut out = params.pack(&self.c1);
        out.extend_from_slice(&params.pack(&self.c2));
        out
    }

    /// Deserializes a ciphertext. `bytes` MUST have length `params.ciphertext_len()`
    pub fn from_bytes(params: &Params, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != params.ciphertext_len() {
            return Err(Error::InvalidBufferLength {
                expected: params.ciphertext_len(),
                actual: bytes.len(),
            });
        }

        let (c1_bytes, c2_bytes) = bytes.split_at(params.packed_len(params.m_bar(), params.n()));
        Ok(Ciphertext {
            c1: params.unpack(c1_bytes, params.m_bar(), params.n())?,
            c2: params.unpack(c2_bytes, params.m_bar(), params.n_bar())?,
        })
    }
}

/// Hashes `domain || seed_se` into `len` bytes of sampler input
fn expand_seed(
    params: &Params,
    domain: u8,
    seed_se: &[u8],
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if seed_se.len() != params.seed_se_len() {
        return Err(Error::InvalidSeedLength {
            expected: params.seed_se_len(),
            actual: seed_se.len(),
        });
    }

    let mut r = Zeroizing::new(vec![0u8; len]);
    params.xof().squeeze(&[&[domain][..], seed_se], &mut r);
    Ok(r)
}

// Algorithm 9, FrodoPKE.KeyGen
/// Generates a keypair, drawing the seeds for A and for (S, E) from `rng`
pub fn gen_keypair(
    params: &Params,
    rng: &mut impl CryptoRngCore,
) -> Result<(SecretKey, PublicKey)> {
    let mut seed_a = vec![0u8; params.seed_a_len()];
    let mut seed_se = Zeroizing::new(vec![0u8; params.seed_se_len()]);
    rng.fill_bytes(&mut seed_a);
    rng.fill_bytes(&mut seed_se);

    gen_keypair_from_seeds(params, &seed_a, &seed_se)
}

/// Deterministically generates a keypair from the seed for A and the seed for (S, E)
pub fn gen_keypair_from_seeds(
    params: &Params,
    seed_a: &[u8],
    seed_se: &[u8],
) -> Result<(SecretKey, PublicKey)> {
    tracing::debug!(params = params.name(), "generating keypair");
    let (n, n_bar) = (params.n(), params.n_bar());

    // One 16-bit sampler word per entry of S and of E
    let r = expand_seed(params, KEYGEN_DOMAIN, seed_se, 2 * 2 * n * n_bar)?;
    let (r1, r2) = r.split_at(2 * n * n_bar);

    let mat_a = params.gen(seed_a)?;
    let s = params.sample_matrix(r1, n, n_bar)?;
    let e = Zeroizing::new(params.sample_matrix(r2, n, n_bar)?);
    let b = params.mul_add(&mat_a, &s, &e)?;

    Ok((
        SecretKey { s },
        PublicKey {
            seed_a: seed_a.to_vec(),
            b,
        },
    ))
}

// Algorithm 10, FrodoPKE.Enc
/// Encrypts a `params.message_len()`-byte message, drawing the encryption seed from `rng`
pub fn encrypt(
    params: &Params,
    pk: &PublicKey,
    msg: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Ciphertext> {
    let mut seed_se = Zeroizing::new(vec![0u8; params.seed_se_len()]);
    rng.fill_bytes(&mut seed_se);

    encrypt_deterministic(params, pk, msg, &seed_se)
}

/// Encrypts a message with a given public key and encryption seed (`seed_se`)
pub fn encrypt_deterministic(
    params: &Params,
    pk: &PublicKey,
    msg: &[u8],
    seed_se: &[u8],
) -> Result<Ciphertext> {
    tracing::debug!(params = params.name(), "encrypting");
    let (n, m_bar, n_bar) = (params.n(), params.m_bar(), params.n_bar());

    // Check this before doing any of the expensive work
    let encoded = params.encode(msg)?;

    // One 16-bit sampler word per entry of S', E' and E''
    let r = expand_seed(
        params,
        ENC_DOMAIN,
        seed_se,
        2 * (2 * m_bar * n + m_bar * n_bar),
    )?;
    let (r1, rest) = r.split_at(2 * m_bar * n);
    let (r2, r3) = rest.split_at(2 * m_bar * n);

    let sprime = Zeroizing::new(params.sample_matrix(r1, m_bar, n)?);
    let eprime = Zeroizing::new(params.sample_matrix(r2, m_bar, n)?);
    let eprimeprime = Zeroizing::new(params.sample_matrix(r3, m_bar, n_bar)?);

    let mat_a = params.gen(&pk.seed_a)?;
    // C1 = S'A + E'
    let c1 = params.mul_add(&sprime, &mat_a, &eprime)?;
    // C2 = S'B + E'' + Encode(msg)
    let v = Zeroizing::new(params.mul_add(&sprime, &pk.b, &eprimeprime)?);
    let c2 = params.add(&v, &encoded)?;

    Ok(Ciphertext { c1, c2 })
}

// Algorithm 11, FrodoPKE.Dec
/// Decrypts a ciphertext using the given secret key. There is no integrity check: a ciphertext
/// made for a different key decrypts to garbage
pub fn decrypt(params: &Params, sk: &SecretKey, ct: &Ciphertext) -> Result<Vec<u8>> {
    // M = C2 - C1·S = Encode(msg) + S'E + E'' - E'S
    let c1s = Zeroizing::new(params.mul(&ct.c1, &sk.s)?);
    let m = Zeroizing::new(params.sub(&ct.c2, &c1s)?);
    params.decode(&m)
}
