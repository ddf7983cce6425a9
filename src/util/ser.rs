//! Helpful serialization tools.
//!
//! Every token this crate hands out is a json record wrapped in standard
//! base64 so it can travel as an opaque string. Byte fields inside the record
//! are base64 strings themselves. Yes, that means binary data gets base64'd
//! twice, but that's what the existing tokens look like and we have to be able
//! to read them.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use std::ops::Deref;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub(crate) fn serialize<T: Serialize>(obj: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(obj).map_err(Error::SerializeJson)
}

pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Error::MalformedStructure)
}

/// Turn a record into an opaque token string.
pub fn encode<T: Serialize>(obj: &T) -> Result<String> {
    Ok(base64_encode(serialize(obj)?))
}

/// Turn an opaque token string back into a record.
///
/// Fails with [`Error::MalformedInput`] if the string isn't base64, and with
/// [`Error::MalformedStructure`] if what's inside isn't the record we asked
/// for (missing, extra, or mistyped fields all count).
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T> {
    let bytes = base64_decode(token)?;
    deserialize(&bytes)
}

/// Convert bytes to base64
pub fn base64_encode<T: AsRef<[u8]>>(bytes: T) -> String {
    STANDARD.encode(bytes.as_ref())
}

/// Convert base64 to bytes. Line breaks anywhere in the input are skipped, so
/// a token read out of a file or env var with a trailing newline still decodes.
pub fn base64_decode<T: AsRef<[u8]>>(bytes: T) -> Result<Vec<u8>> {
    let bytes = bytes.as_ref();
    let is_line_break = |b: &u8| *b == b'\r' || *b == b'\n';
    let decoded = if bytes.iter().any(is_line_break) {
        let stripped = bytes.iter().copied().filter(|b| !is_line_break(b)).collect::<Vec<_>>();
        STANDARD.decode(stripped)
    } else {
        STANDARD.decode(bytes)
    };
    decoded.map_err(Error::MalformedInput)
}

/// A default implementation for encoding an object to or from an opaque
/// token string.
pub trait SerdeToken: Serialize + DeserializeOwned {
    /// Encode this record as a token
    fn encode(&self) -> Result<String> {
        encode(self)
    }

    /// Decode a token into this record
    fn decode(token: &str) -> Result<Self> {
        decode(token)
    }
}

/// (De)serializes a byte vector as a base64 string.
pub(crate) mod human_bytes {
    use super::{base64_decode, base64_encode};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&base64_encode(bytes.as_slice()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = <String>::deserialize(deserializer)?;
        base64_decode(s).map_err(de::Error::custom)
    }
}

/// A fixed-length chunk of public binary data.
#[derive(Clone, PartialEq)]
pub struct Binary<const N: usize>([u8; N]);

impl<const N: usize> Binary<N> {
    pub fn new(data: [u8; N]) -> Self {
        Self(data)
    }
}

impl<const N: usize> Deref for Binary<N> {
    type Target = [u8; N];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Binary<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl<const N: usize> TryFrom<&[u8]> for Binary<N> {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        let arr: [u8; N] = slice.try_into().map_err(|_| Error::BadLength)?;
        Ok(Self(arr))
    }
}

impl<const N: usize> std::fmt::Debug for Binary<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Binary({})", base64_encode(&self.0[..]))
    }
}

/// A fixed-length chunk of secret binary data. Zeroed when dropped, compared
/// in constant time, and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BinarySecret<const N: usize>([u8; N]);

impl<const N: usize> BinarySecret<N> {
    pub fn new(data: [u8; N]) -> Self {
        Self(data)
    }

    /// Grab the secret bytes. Try not to hold onto them.
    pub fn expose_secret(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for BinarySecret<N> {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        let arr: [u8; N] = slice.try_into().map_err(|_| Error::BadLength)?;
        Ok(Self(arr))
    }
}

impl<const N: usize> PartialEq for BinarySecret<N> {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).unwrap_u8() == 1
    }
}

impl<const N: usize> std::fmt::Debug for BinarySecret<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinarySecret(<redacted>)")
    }
}
