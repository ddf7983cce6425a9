//! User secrets: 31 random bytes and a one-byte checksum that binds them to a
//! hashed user id.
//!
//! The checksum isn't there to keep anyone honest (one byte won't stop a
//! motivated forger). It catches secrets that got mangled in transit or
//! paired up with the wrong user.

use crate::{
    crypto::base::Hash,
    error::{Error, Result},
    identity::user_id::HashedUserId,
    util::ser::BinarySecret,
};
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// How many bytes a user secret has, checksum included.
pub const USER_SECRET_SIZE: usize = 32;

/// A random secret bound to a user by its last byte.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSecret(BinarySecret<USER_SECRET_SIZE>);

impl UserSecret {
    /// Generate a fresh secret for the given user.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, hashed_user_id: &HashedUserId) -> Self {
        let mut secret = [0u8; USER_SECRET_SIZE];
        rng.fill_bytes(&mut secret[..USER_SECRET_SIZE - 1]);
        secret[USER_SECRET_SIZE - 1] = checksum(&secret[..USER_SECRET_SIZE - 1], hashed_user_id.as_bytes());
        let user_secret = Self(BinarySecret::new(secret));
        secret.zeroize();
        user_secret
    }

    /// Check the secret still matches the user it was made for.
    pub fn verify(&self, hashed_user_id: &HashedUserId) -> Result<()> {
        verify_user_secret(self.expose_secret(), hashed_user_id.as_bytes())
    }

    pub fn expose_secret(&self) -> &[u8; USER_SECRET_SIZE] {
        self.0.expose_secret()
    }
}

impl TryFrom<&[u8]> for UserSecret {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        Ok(Self(BinarySecret::try_from(slice)?))
    }
}

fn checksum(random: &[u8], hashed_user_id: &[u8]) -> u8 {
    let mut buf = Vec::with_capacity(random.len() + hashed_user_id.len());
    buf.extend_from_slice(random);
    buf.extend_from_slice(hashed_user_id);
    let check = Hash::new_blake2b_128(&buf).as_bytes()[0];
    buf.zeroize();
    check
}

/// Recompute the checksum over the first 31 bytes of `secret` and the user's
/// hash, and compare it to the last byte.
pub fn verify_user_secret(secret: &[u8], hashed_user_id: &[u8]) -> Result<()> {
    if secret.len() != USER_SECRET_SIZE {
        Err(Error::BadLength)?;
    }
    let (random, check) = secret.split_at(USER_SECRET_SIZE - 1);
    let expected = checksum(random, hashed_user_id);
    if expected.ct_eq(&check[0]).unwrap_u8() != 1 {
        Err(Error::UserSecretChecksumMismatch)?;
    }
    Ok(())
}
