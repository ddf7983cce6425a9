use crate::{
    error::{Error, Result},
    util::ser::{Binary, BinarySecret},
};
use rand::{CryptoRng, RngCore};
use std::ops::Deref;

/// A signature derived from a signing keypair.
#[derive(Debug, Clone, PartialEq)]
pub enum SignKeypairSignature {
    Ed25519(Binary<64>),
}

impl AsRef<[u8]> for SignKeypairSignature {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Ed25519(sig) => sig.as_ref(),
        }
    }
}

impl TryFrom<&[u8]> for SignKeypairSignature {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        Ok(Self::Ed25519(Binary::try_from(slice)?))
    }
}

/// An asymmetric signing keypair.
///
/// The secret half is the 32-byte ed25519 seed. When handing the secret key
/// to the outside world we use the common 64-byte `seed ‖ public` layout that
/// most ed25519 libraries (libsodium et al) expect.
#[derive(Debug, Clone)]
pub enum SignKeypair {
    /// Ed25519 signing keypair
    Ed25519 {
        public: Binary<32>,
        secret: Option<BinarySecret<32>>,
    },
}

impl SignKeypair {
    fn new_ed25519_from_secret(secret: ed25519_consensus::SigningKey) -> Self {
        let public = secret.verification_key();
        Self::Ed25519 {
            public: Binary::new(public.to_bytes()),
            secret: Some(BinarySecret::new(secret.to_bytes())),
        }
    }

    /// Create a new ed25519 keypair
    pub fn new_ed25519<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut randbuf = [0u8; 32];
        rng.fill_bytes(&mut randbuf);
        let secret = ed25519_consensus::SigningKey::from(randbuf);
        Self::new_ed25519_from_secret(secret)
    }

    /// Create a new ed25519 keypair from a cryptographic seed
    pub fn new_ed25519_from_bytes(secret_bytes: [u8; 32]) -> Self {
        let secret = ed25519_consensus::SigningKey::from(secret_bytes);
        Self::new_ed25519_from_secret(secret)
    }

    /// Load an ed25519 keypair from a 64-byte `seed ‖ public` secret key.
    ///
    /// The public half has to match the key derived from the seed, otherwise
    /// we'd happily sign things nobody can verify.
    pub fn new_ed25519_from_secret_key(secret_key: &[u8]) -> Result<Self> {
        if secret_key.len() != 64 {
            Err(Error::BadLength)?;
        }
        let seed: [u8; 32] = secret_key[0..32].try_into().map_err(|_| Error::BadLength)?;
        let keypair = Self::new_ed25519_from_bytes(seed);
        if keypair.public().as_ref() != &secret_key[32..] {
            Err(Error::CryptoBadKey)?;
        }
        Ok(keypair)
    }

    /// Grab the public key bytes.
    pub fn public(&self) -> &Binary<32> {
        match self {
            Self::Ed25519 { public, .. } => public,
        }
    }

    /// Export the secret key in the 64-byte `seed ‖ public` layout.
    pub fn secret_key(&self) -> Result<BinarySecret<64>> {
        match self {
            Self::Ed25519 {
                public,
                secret: Some(secret),
            } => {
                let mut bytes = [0u8; 64];
                bytes[0..32].copy_from_slice(secret.expose_secret());
                bytes[32..].copy_from_slice(public.deref());
                let exported = BinarySecret::new(bytes);
                zeroize::Zeroize::zeroize(&mut bytes);
                Ok(exported)
            }
            _ => Err(Error::CryptoKeyMissing),
        }
    }

    /// Sign a value, returning a detached signature.
    pub fn sign(&self, data: &[u8]) -> Result<SignKeypairSignature> {
        match self {
            Self::Ed25519 {
                secret: ref sec_maybe,
                ..
            } => {
                let sec = sec_maybe.as_ref().ok_or(Error::CryptoKeyMissing)?;
                let seckey = ed25519_consensus::SigningKey::from(*sec.expose_secret());
                let sig_obj = seckey.sign(data);
                Ok(SignKeypairSignature::Ed25519(Binary::new(sig_obj.to_bytes())))
            }
        }
    }

    /// Verify a value with a detached signature given the public key of the
    /// signer.
    pub fn verify(&self, signature: &SignKeypairSignature, data: &[u8]) -> Result<()> {
        SignKeypairPublic::from(self).verify(signature, data)
    }

    /// Whether or not we hold the secret half of this keypair.
    pub fn has_private(&self) -> bool {
        match self {
            Self::Ed25519 { secret: private_maybe, .. } => private_maybe.is_some(),
        }
    }
}

impl PartialEq for SignKeypair {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ed25519 { public: public1, .. }, Self::Ed25519 { public: public2, .. }) => public1 == public2,
        }
    }
}

/// An asymmetric signing public key.
#[derive(Debug, Clone, PartialEq)]
pub enum SignKeypairPublic {
    /// Ed25519 signing public key
    Ed25519(Binary<32>),
}

impl SignKeypairPublic {
    /// Verify a value with a detached signature given the public key of the
    /// signer.
    pub fn verify(&self, signature: &SignKeypairSignature, data: &[u8]) -> Result<()> {
        match (self, signature) {
            (Self::Ed25519(ref pubkey_bytes), SignKeypairSignature::Ed25519(ref sig_bytes)) => {
                let pubkey = ed25519_consensus::VerificationKey::try_from(*pubkey_bytes.deref())
                    .map_err(|_| Error::CryptoSignatureVerificationFailed)?;
                let sig = ed25519_consensus::Signature::from(*sig_bytes.deref());
                pubkey.verify(&sig, data).map_err(|_| Error::CryptoSignatureVerificationFailed)?;
                Ok(())
            }
        }
    }
}

impl AsRef<[u8]> for SignKeypairPublic {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Ed25519(pubkey) => pubkey.as_ref(),
        }
    }
}

impl TryFrom<&[u8]> for SignKeypairPublic {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        Ok(Self::Ed25519(Binary::try_from(slice)?))
    }
}

impl From<&SignKeypair> for SignKeypairPublic {
    fn from(kp: &SignKeypair) -> Self {
        match kp {
            SignKeypair::Ed25519 { public, .. } => Self::Ed25519(public.clone()),
        }
    }
}
