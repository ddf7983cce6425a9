//! Delegation: the trustchain hands a user's authority over to a freshly
//! minted ephemeral keypair by signing `ephemeral_public_key ‖ hashed_user_id`.
//!
//! The ephemeral secret key goes to whoever holds the identity. That's the
//! whole point: the holder can later prove the trustchain vouched for it
//! without the trustchain key ever leaving the server that issued it.

use crate::{
    crypto::base::{SignKeypair, SignKeypairPublic, SignKeypairSignature},
    error::Result,
    identity::user_id::HashedUserId,
};
use getset;
use rand::{CryptoRng, RngCore};

/// An ephemeral keypair and the trustchain's signature vouching for it.
#[derive(Debug, Clone, getset::Getters)]
#[getset(get = "pub")]
pub struct Delegation {
    /// The keypair the user gets to keep.
    ephemeral_keypair: SignKeypair,
    /// The trustchain's signature over the ephemeral public key and the user.
    signature: SignKeypairSignature,
}

impl Delegation {
    /// Mint an ephemeral keypair and have the trustchain sign it over to the
    /// given user.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, hashed_user_id: &HashedUserId, trustchain_key: &SignKeypair) -> Result<Self> {
        let ephemeral_keypair = SignKeypair::new_ed25519(rng);
        let signed = signable(ephemeral_keypair.public().as_ref(), hashed_user_id.as_bytes());
        let signature = trustchain_key.sign(&signed)?;
        Ok(Self {
            ephemeral_keypair,
            signature,
        })
    }

    /// Check this delegation against the trustchain's public key.
    pub fn verify(&self, trustchain_public_key: &SignKeypairPublic, hashed_user_id: &HashedUserId) -> Result<()> {
        verify_delegation(
            trustchain_public_key,
            self.ephemeral_keypair.public().as_ref(),
            hashed_user_id.as_bytes(),
            self.signature.as_ref(),
        )
    }
}

/// The bytes the trustchain signs.
fn signable(ephemeral_public_key: &[u8], hashed_user_id: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(ephemeral_public_key.len() + hashed_user_id.len());
    buf.extend_from_slice(ephemeral_public_key);
    buf.extend_from_slice(hashed_user_id);
    buf
}

/// Verify a delegation signature from its raw parts.
///
/// The signature and ephemeral key have to be the right size (or you get
/// `BadLength`), and the signature has to come from the trustchain key over
/// exactly `ephemeral_public_key ‖ hashed_user_id`.
pub fn verify_delegation(
    trustchain_public_key: &SignKeypairPublic,
    ephemeral_public_key: &[u8],
    hashed_user_id: &[u8],
    signature: &[u8],
) -> Result<()> {
    SignKeypairPublic::try_from(ephemeral_public_key)?;
    crate::identity::user_id::check_length(hashed_user_id)?;
    let signature = SignKeypairSignature::try_from(signature)?;
    trustchain_public_key.verify(&signature, &signable(ephemeral_public_key, hashed_user_id))
}
