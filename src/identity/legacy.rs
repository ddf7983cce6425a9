//! The older, flat user token format.
//!
//! Before identities grew a trustchain id and a target, tokens were just the
//! delegation bits and the hashed user id. Plenty of those are still sitting
//! in client storage, so we can still issue them, read them, and upgrade them
//! into a proper [`Identity`].

use crate::{
    crypto::base::SignKeypairPublic,
    error::Result,
    identity::{
        config::Trustchain,
        delegation::{verify_delegation, Delegation},
        identity::Identity,
        secret::{verify_user_secret, UserSecret},
        user_id::hash_user_id,
    },
    util::ser::SerdeToken,
};
use getset;
use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A user token in the old flat format.
///
/// Field order is the wire order, don't shuffle it.
#[derive(Clone, PartialEq, Serialize, Deserialize, getset::Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub")]
pub struct DelegationToken {
    #[serde(with = "crate::util::ser::human_bytes")]
    delegation_signature: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    ephemeral_public_signature_key: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    ephemeral_private_signature_key: Vec<u8>,
    /// The hashed user id (what newer identities call `value`).
    #[serde(with = "crate::util::ser::human_bytes")]
    user_id: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    user_secret: Vec<u8>,
}

impl DelegationToken {
    /// Issue an old-style token for a user of the given trustchain.
    pub fn create<R: RngCore + CryptoRng>(rng: &mut R, trustchain: &Trustchain, user_id: &str) -> Result<Self> {
        let hashed_user_id = hash_user_id(trustchain.id(), user_id);
        let user_secret = UserSecret::new(rng, &hashed_user_id);
        let delegation = Delegation::new(rng, &hashed_user_id, trustchain.signing_key())?;
        let ephemeral_secret = delegation.ephemeral_keypair().secret_key()?;
        Ok(Self {
            delegation_signature: delegation.signature().as_ref().to_vec(),
            ephemeral_public_signature_key: delegation.ephemeral_keypair().public().as_ref().to_vec(),
            ephemeral_private_signature_key: ephemeral_secret.expose_secret().to_vec(),
            user_id: hashed_user_id.as_bytes().to_vec(),
            user_secret: user_secret.expose_secret().to_vec(),
        })
    }

    /// Old tokens don't know which trustchain they came from, so you have to
    /// tell us.
    pub fn upgrade(mut self, trustchain_id: &[u8]) -> Identity {
        Identity::from_raw_user(
            trustchain_id.to_vec(),
            std::mem::take(&mut self.user_id),
            std::mem::take(&mut self.delegation_signature),
            std::mem::take(&mut self.ephemeral_public_signature_key),
            std::mem::take(&mut self.ephemeral_private_signature_key),
            std::mem::take(&mut self.user_secret),
        )
    }

    /// Check the secret checksum and delegation signature.
    pub fn verify(&self, trustchain_public_key: &SignKeypairPublic) -> Result<()> {
        verify_user_secret(&self.user_secret, &self.user_id)?;
        verify_delegation(
            trustchain_public_key,
            &self.ephemeral_public_signature_key,
            &self.user_id,
            &self.delegation_signature,
        )
    }
}

impl SerdeToken for DelegationToken {}

impl Drop for DelegationToken {
    fn drop(&mut self) {
        self.ephemeral_private_signature_key.zeroize();
        self.user_secret.zeroize();
    }
}

impl std::fmt::Debug for DelegationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationToken")
            .field("delegation_signature", &self.delegation_signature)
            .field("ephemeral_public_signature_key", &self.ephemeral_public_signature_key)
            .field("ephemeral_private_signature_key", &format_args!("<redacted>"))
            .field("user_id", &self.user_id)
            .field("user_secret", &format_args!("<redacted>"))
            .finish()
    }
}
