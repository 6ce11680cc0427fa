//! Parameter sets for FrodoPKE. Every operation in this crate takes one of these explicitly

/// The extendable-output function used to expand seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Xof {
    Shake128,
    Shake256,
}

/// An instantiation of FrodoPKE. Values of this type are only ever built as the constants below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    name: &'static str,
    /// The main dimension n. Must be a multiple of 8
    n: usize,
    /// The bitlength D of the modulus q = 2^D
    log_q: usize,
    /// The number of message bits B carried by each matrix entry
    extracted_bits: usize,
    /// Rows of the short matrices on the encryption side
    m_bar: usize,
    /// Columns of the short matrices on the key generation side
    n_bar: usize,
    /// Byte length of the seed for the public matrix A
    seed_a_len: usize,
    /// Byte length of the seed for the secret and error matrices
    seed_se_len: usize,
    xof: Xof,
    /// Cumulative distribution table of the error distribution, in units of 2^-15
    cdf_table: &'static [u16],
}

const CDF_TABLE_640: [u16; 13] = [
    4643, 13363, 20579, 25843, 29227, 31145, 32103, 32525, 32689, 32745, 32762, 32766, 32767,
];
const CDF_TABLE_976: [u16; 11] = [
    5638, 15915, 23689, 28571, 31116, 32217, 32613, 32731, 32760, 32766, 32767,
];
const CDF_TABLE_1344: [u16; 7] = [9142, 23462, 30338, 32361, 32725, 32765, 32767];

pub const FRODO_640: Params = Params {
    name: "FrodoPKE-640",
    n: 640,
    log_q: 15,
    extracted_bits: 2,
    m_bar: 8,
    n_bar: 8,
    seed_a_len: 16,
    seed_se_len: 16,
    xof: Xof::Shake128,
    cdf_table: &CDF_TABLE_640,
};

pub const FRODO_976: Params = Params {
    name: "FrodoPKE-976",
    n: 976,
    log_q: 16,
    extracted_bits: 3,
    m_bar: 8,
    n_bar: 8,
    seed_a_len: 16,
    seed_se_len: 24,
    xof: Xof::Shake256,
    cdf_table: &CDF_TABLE_976,
};

pub const FRODO_1344: Params = Params {
    name: "FrodoPKE-1344",
    n: 1344,
    log_q: 16,
    extracted_bits: 4,
    m_bar: 8,
    n_bar: 8,
    seed_a_len: 16,
    seed_se_len: 32,
    xof: Xof::Shake256,
    cdf_table: &CDF_TABLE_1344,
};

/// All the standard parameter sets, smallest first
pub const ALL_PARAMS: [Params; 3] = [FRODO_640, FRODO_976, FRODO_1344];

// Reject inconsistent parameter sets at compile time
const _: () = assert!(FRODO_640.is_consistent());
const _: () = assert!(FRODO_976.is_consistent());
const _: () = assert!(FRODO_1344.is_consistent());

impl Params {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn n(&self) -> usize {
        self.n
    }

    pub const fn log_q(&self) -> usize {
        self.log_q
    }

    pub const fn extracted_bits(&self) -> usize {
        self.extracted_bits
    }

    pub const fn m_bar(&self) -> usize {
        self.m_bar
    }

    pub const fn n_bar(&self) -> usize {
        self.n_bar
    }

    pub const fn seed_a_len(&self) -> usize {
        self.seed_a_len
    }

    pub const fn seed_se_len(&self) -> usize {
        self.seed_se_len
    }

    pub const fn xof(&self) -> Xof {
        self.xof
    }

    pub const fn cdf_table(&self) -> &'static [u16] {
        self.cdf_table
    }

    /// The bitmask 2^D - 1. ANDing with this reduces a u16 mod q
    pub const fn q_mask(&self) -> u16 {
        ((1u32 << self.log_q) - 1) as u16
    }

    /// The number of bits l = B·m̄·n̄ in a plaintext
    pub const fn message_bits(&self) -> usize {
        self.extracted_bits * self.m_bar * self.n_bar
    }

    /// The byte length of a plaintext
    pub const fn message_len(&self) -> usize {
        self.message_bits().div_ceil(8)
    }

    /// The byte length of an n1×n2 matrix after packing. Saturates at `usize::MAX` for shapes no
    /// buffer could hold
    pub const fn packed_len(&self, n1: usize, n2: usize) -> usize {
        match self.checked_packed_len(n1, n2) {
            Some(len) => len,
            None => usize::MAX,
        }
    }

    /// The byte length of an n1×n2 matrix after packing, or `None` if the bit count overflows
    pub(crate) const fn checked_packed_len(&self, n1: usize, n2: usize) -> Option<usize> {
        let Some(entries) = n1.checked_mul(n2) else {
            return None;
        };
        match entries.checked_mul(self.log_q) {
            Some(bits) => Some(bits.div_ceil(8)),
            None => None,
        }
    }

    /// The byte length of a serialized public key, `seed_a || Pack(B)`
    pub const fn public_key_len(&self) -> usize {
        self.seed_a_len + self.packed_len(self.n, self.n_bar)
    }

    /// The byte length of a serialized ciphertext, `Pack(C1) || Pack(C2)`
    pub const fn ciphertext_len(&self) -> usize {
        self.packed_len(self.m_bar, self.n) + self.packed_len(self.m_bar, self.n_bar)
    }

    /// Checks the structural invariants every parameter set must satisfy
    const fn is_consistent(&self) -> bool {
        if self.n % 8 != 0 || self.n > u16::MAX as usize + 1 {
            return false;
        }
        if self.extracted_bits == 0 || self.extracted_bits > self.log_q || self.log_q > 16 {
            return false;
        }
        if self.m_bar == 0 || self.n_bar == 0 || self.seed_a_len == 0 || self.seed_se_len == 0 {
            return false;
        }

        // The CDF table must be strictly increasing and cover all of [0, 2^15)
        let table = self.cdf_table;
        if table.is_empty() || table[table.len() - 1] != (1 << 15) - 1 {
            return false;
        }
        let mut i = 1;
        while i < table.len() {
            if table[i] <= table[i - 1] {
                return false;
            }
            i += 1;
        }

        true
    }
}
