//! The identity module defines the data types and operations that issue and
//! read identity tokens.
//!
//! Issuing an identity goes like this:
//!
//! 1. The user id gets hashed together with the trustchain id
//! ([`hash_user_id`]).
//! 1. A random user secret is generated, with a checksum byte tying it to
//! that hash ([`UserSecret`]).
//! 1. A fresh ephemeral keypair is minted and the trustchain signs
//! `ephemeral_public_key ‖ hash` ([`Delegation`]).
//! 1. Everything gets packed into an [`Identity`] and encoded as an opaque
//! string.
//!
//! Nothing talks to a server, nothing is stored. Every call is a pure function
//! of its inputs plus whatever randomness it pulls from the rng.

pub mod config;
pub mod delegation;
pub mod identity;
pub mod legacy;
pub mod secret;
pub mod user_id;

pub use config::*;
pub use delegation::*;
pub use identity::*;
pub use legacy::*;
pub use secret::*;
pub use user_id::*;

use crate::{
    crypto::base::rng_chacha20,
    error::Result,
    util::ser::SerdeToken,
};
use rand::{CryptoRng, RngCore};
use tracing::debug;

/// Issue an encoded identity for `user_id` using a fresh OS-seeded rng.
pub fn create_identity(config: &TrustchainConfig, user_id: &str) -> Result<String> {
    create_identity_with_rng(&mut rng_chacha20(), config, user_id)
}

/// Issue an encoded identity for `user_id`, pulling randomness from the rng
/// you give us.
pub fn create_identity_with_rng<R: RngCore + CryptoRng>(rng: &mut R, config: &TrustchainConfig, user_id: &str) -> Result<String> {
    let trustchain = config.decode()?;
    let identity = Identity::create(rng, &trustchain, user_id)?;
    debug!(trustchain_id = %config.trustchain_id(), "issued identity");
    identity.encode()
}

/// Take an encoded identity and return its encoded public identity.
pub fn get_public_identity(encoded_identity: &str) -> Result<String> {
    let identity = Identity::decode(encoded_identity)?;
    identity.public_identity()?.encode()
}

/// Issue an old-style flat user token using a fresh OS-seeded rng.
pub fn create_user_token(config: &TrustchainConfig, user_id: &str) -> Result<String> {
    create_user_token_with_rng(&mut rng_chacha20(), config, user_id)
}

/// Issue an old-style flat user token, pulling randomness from the rng you
/// give us.
pub fn create_user_token_with_rng<R: RngCore + CryptoRng>(rng: &mut R, config: &TrustchainConfig, user_id: &str) -> Result<String> {
    let trustchain = config.decode()?;
    let token = DelegationToken::create(rng, &trustchain, user_id)?;
    debug!(trustchain_id = %config.trustchain_id(), "issued legacy user token");
    token.encode()
}
