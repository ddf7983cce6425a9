//! Turns whatever string an app uses to name its users into the value that
//! actually goes into a token.

use crate::{
    crypto::base::Hash,
    error::{Error, Result},
    util::ser::Binary,
};

/// A user id hashed together with the id of the trustchain it lives in. The
/// same user id in two trustchains hashes to two unrelated values, and there's
/// no going back from the hash to the user id.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedUserId(Hash);

impl HashedUserId {
    /// Return the 32 hash bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<&[u8]> for HashedUserId {
    type Error = Error;
    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        Ok(Self(Hash::Blake2b256(Binary::try_from(slice)?)))
    }
}

impl std::fmt::Display for HashedUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash a user id into its trustchain. This is `blake2b_256(user_id ‖ trustchain_id)`,
/// and the order matters: every token ever issued depends on it.
pub fn hash_user_id(trustchain_id: &[u8], user_id: &str) -> HashedUserId {
    let mut buf = Vec::with_capacity(user_id.len() + trustchain_id.len());
    buf.extend_from_slice(user_id.as_bytes());
    buf.extend_from_slice(trustchain_id);
    HashedUserId(Hash::new_blake2b_256(&buf))
}

/// Make sure a byte value could have come out of [`hash_user_id`].
pub(crate) fn check_length(hashed_user_id: &[u8]) -> Result<()> {
    HashedUserId::try_from(hashed_user_id).map(|_| ())
}
