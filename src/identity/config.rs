//! Trustchain configuration. Apps hand us the trustchain's id and private key
//! as base64 strings, typically pulled out of a config file.

use crate::{
    crypto::base::{SignKeypair, SignKeypairPublic},
    error::{Error, Result},
    util::ser::{base64_decode, base64_encode},
};
use getset;
use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

/// The trustchain settings, as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, getset::Getters)]
#[getset(get = "pub")]
pub struct TrustchainConfig {
    /// Base64 of the 32-byte trustchain id.
    trustchain_id: String,
    /// Base64 of the 64-byte (`seed ‖ public`) trustchain signing key.
    trustchain_private_key: String,
}

impl TrustchainConfig {
    pub fn new<S: Into<String>, K: Into<String>>(trustchain_id: S, trustchain_private_key: K) -> Self {
        Self {
            trustchain_id: trustchain_id.into(),
            trustchain_private_key: trustchain_private_key.into(),
        }
    }

    /// Read a config from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Decode the text fields into a usable [`Trustchain`].
    pub fn decode(&self) -> Result<Trustchain> {
        let id = base64_decode(&self.trustchain_id)
            .map_err(|_| Error::InvalidConfigEncoding("trustchain_id"))?;
        let key_bytes = base64_decode(&self.trustchain_private_key)
            .map_err(|_| Error::InvalidConfigEncoding("trustchain_private_key"))?;
        let signing_key = SignKeypair::new_ed25519_from_secret_key(&key_bytes)
            .map_err(|_| Error::InvalidConfigEncoding("trustchain_private_key"))?;
        Ok(Trustchain { id, signing_key })
    }
}

/// A decoded trustchain: its id and the keypair that signs delegations.
#[derive(Debug, Clone, PartialEq, getset::Getters)]
#[getset(get = "pub")]
pub struct Trustchain {
    id: Vec<u8>,
    signing_key: SignKeypair,
}

impl Trustchain {
    /// Create a brand new trustchain with a random id and a fresh keypair.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut id = vec![0u8; 32];
        rng.fill_bytes(&mut id);
        let signing_key = SignKeypair::new_ed25519(rng);
        Self { id, signing_key }
    }

    /// The public key anyone can use to check this trustchain's delegations.
    pub fn public_key(&self) -> SignKeypairPublic {
        SignKeypairPublic::from(&self.signing_key)
    }

    /// Turn this trustchain back into its text config.
    pub fn to_config(&self) -> Result<TrustchainConfig> {
        let secret_key = self.signing_key.secret_key()?;
        Ok(TrustchainConfig::new(base64_encode(&self.id), base64_encode(secret_key.expose_secret())))
    }
}
