//! The main error enum for the project lives here, and documents the various
//! conditions that can arise while issuing or reading identity tokens.

use thiserror::Error;

/// This is our error enum. It contains an entry for any part of the system in
/// which an expectation is not met or a problem occurs.
#[derive(Error, Debug)]
pub enum Error {
    /// A byte value has the wrong length for the operation it's being used in.
    #[error("value has the wrong length")]
    BadLength,

    /// Bad key.
    #[error("key is invalid")]
    CryptoBadKey,

    /// A key is missing from a crypto operation
    #[error("crypto key missing")]
    CryptoKeyMissing,

    /// A signature failed to verify.
    #[error("the given signature/public key/data combo does not verify")]
    CryptoSignatureVerificationFailed,

    /// The config YAML could not be read.
    #[error("config parse error")]
    ConfigYaml(#[from] serde_yaml::Error),

    /// One of the trustchain config fields is not valid base64, or decodes to
    /// something that can't be the value it claims to be.
    #[error("wrong {0} format, should be base64")]
    InvalidConfigEncoding(&'static str),

    /// An IO error
    #[error("io error {0:?}")]
    Io(#[from] std::io::Error),

    /// The outer text encoding of a token is not valid base64.
    #[error("token is not valid base64")]
    MalformedInput(#[source] base64::DecodeError),

    /// The decoded token payload doesn't match the expected record.
    #[error("token payload has the wrong structure: {0}")]
    MalformedStructure(#[source] serde_json::Error),

    /// An error while serializing a record to json.
    #[error("json serialization error")]
    SerializeJson(#[source] serde_json::Error),

    /// The identity targets something other than a user.
    #[error("unsupported identity target: {0}")]
    UnsupportedTarget(String),

    /// The checksum byte at the end of a user secret doesn't match the
    /// identifier hash it's supposed to be bound to.
    #[error("user secret checksum does not match")]
    UserSecretChecksumMismatch,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        // serde_json::Error et al are not eq-able, so compare what we print.
        format!("{:?}", self) == format!("{:?}", other)
    }
}

/// Wraps `std::result::Result` around our `Error` enum
pub type Result<T> = std::result::Result<T, Error>;
