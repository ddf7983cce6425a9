use blake2::{
    digest::consts::{U16, U32},
    Blake2b, Blake2b512, Digest,
};
use crate::util::ser::{self, Binary};

/// A cryptographic hash. By defining this as an enum, the digest size always
/// travels along with the bytes.
///
/// Digest sizes are fixed at compile time, so building a hash can't fail.
#[derive(Clone, Debug, PartialEq)]
pub enum Hash {
    /// Blake2b 512bit hash
    Blake2b512(Binary<64>),

    /// Blake2b 256bit hash
    Blake2b256(Binary<32>),

    /// Blake2b 128bit hash. Only good for checksums.
    Blake2b128(Binary<16>),
}

impl Hash {
    /// Create a new blake2b (512 bit) hash from a message
    pub fn new_blake2b_512(message: &[u8]) -> Self {
        let mut hasher = Blake2b512::new();
        hasher.update(message);
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&hasher.finalize());
        Self::Blake2b512(Binary::new(arr))
    }

    /// Create a new blake2b (256 bit) hash from a message
    pub fn new_blake2b_256(message: &[u8]) -> Self {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(message);
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&hasher.finalize());
        Self::Blake2b256(Binary::new(arr))
    }

    /// Create a new blake2b (128 bit) hash from a message
    pub fn new_blake2b_128(message: &[u8]) -> Self {
        let mut hasher = Blake2b::<U16>::new();
        hasher.update(message);
        let mut arr = [0u8; 16];
        arr.copy_from_slice(&hasher.finalize());
        Self::Blake2b128(Binary::new(arr))
    }

    /// Return the byte slice representing this hash.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Blake2b512(bin) => bin.as_ref(),
            Self::Blake2b256(bin) => bin.as_ref(),
            Self::Blake2b128(bin) => bin.as_ref(),
        }
    }
}

impl std::fmt::Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ser::base64_encode(self.as_bytes()))
    }
}
