//! This module holds the identity records and the methods that build, check,
//! and project them.
//!
//! An [`Identity`] is the privileged record: it holds the user secret and the
//! ephemeral keypair the trustchain delegated to. A [`PublicIdentity`] is the
//! part of it that's safe to hand to other people so they can address the
//! user.

use crate::{
    crypto::base::SignKeypairPublic,
    error::{Error, Result},
    identity::{
        config::Trustchain,
        delegation::{verify_delegation, Delegation},
        secret::{verify_user_secret, UserSecret},
        user_id::{hash_user_id, HashedUserId},
    },
    util::ser::SerdeToken,
};
use getset;
use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use tracing::{trace, warn};
use zeroize::Zeroize;

/// The only identity target we know how to deal with.
pub const TARGET_USER: &str = "user";

/// A full identity. Created once, then owned by the end client.
///
/// Field order is the wire order, don't shuffle it.
#[derive(Clone, PartialEq, Serialize, Deserialize, getset::Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub")]
pub struct Identity {
    /// The trustchain this identity belongs to.
    #[serde(with = "crate::util::ser::human_bytes")]
    trustchain_id: Vec<u8>,
    /// What kind of thing this identity names. Always "user" for now.
    target: String,
    /// The hashed user id.
    #[serde(with = "crate::util::ser::human_bytes")]
    value: Vec<u8>,
    /// The trustchain's signature over `ephemeral_public_signature_key ‖ value`.
    #[serde(with = "crate::util::ser::human_bytes")]
    delegation_signature: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    ephemeral_public_signature_key: Vec<u8>,
    /// `seed ‖ public`. Yes, the secret key ships with the identity.
    #[serde(with = "crate::util::ser::human_bytes")]
    ephemeral_private_signature_key: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    user_secret: Vec<u8>,
}

impl Identity {
    /// Assemble an identity from its already-computed parts.
    pub fn from_parts(trustchain_id: &[u8], hashed_user_id: &HashedUserId, user_secret: &UserSecret, delegation: &Delegation) -> Result<Self> {
        let ephemeral_secret = delegation.ephemeral_keypair().secret_key()?;
        Ok(Self {
            trustchain_id: trustchain_id.to_vec(),
            target: TARGET_USER.into(),
            value: hashed_user_id.as_bytes().to_vec(),
            delegation_signature: delegation.signature().as_ref().to_vec(),
            ephemeral_public_signature_key: delegation.ephemeral_keypair().public().as_ref().to_vec(),
            ephemeral_private_signature_key: ephemeral_secret.expose_secret().to_vec(),
            user_secret: user_secret.expose_secret().to_vec(),
        })
    }

    /// Assemble a user identity from raw byte fields, as they come off an
    /// older token.
    pub(crate) fn from_raw_user(
        trustchain_id: Vec<u8>,
        value: Vec<u8>,
        delegation_signature: Vec<u8>,
        ephemeral_public_signature_key: Vec<u8>,
        ephemeral_private_signature_key: Vec<u8>,
        user_secret: Vec<u8>,
    ) -> Self {
        Self {
            trustchain_id,
            target: TARGET_USER.into(),
            value,
            delegation_signature,
            ephemeral_public_signature_key,
            ephemeral_private_signature_key,
            user_secret,
        }
    }

    /// Issue a new identity for a user of the given trustchain.
    pub fn create<R: RngCore + CryptoRng>(rng: &mut R, trustchain: &Trustchain, user_id: &str) -> Result<Self> {
        let hashed_user_id = hash_user_id(trustchain.id(), user_id);
        let user_secret = UserSecret::new(rng, &hashed_user_id);
        let delegation = Delegation::new(rng, &hashed_user_id, trustchain.signing_key())?;
        Self::from_parts(trustchain.id(), &hashed_user_id, &user_secret, &delegation)
    }

    /// Project the public part of this identity. Only user identities can be
    /// projected.
    pub fn public_identity(&self) -> Result<PublicIdentity> {
        if self.target != TARGET_USER {
            warn!(identity_target = %self.target, "refusing to project identity with unsupported target");
            Err(Error::UnsupportedTarget(self.target.clone()))?;
        }
        trace!("projecting public identity");
        Ok(PublicIdentity {
            target: self.target.clone(),
            trustchain_id: self.trustchain_id.clone(),
            value: self.value.clone(),
        })
    }

    /// Make sure this identity is one the given trustchain actually issued:
    /// the fields have the right sizes, the user secret checksum matches the
    /// user, and the delegation signature checks out.
    pub fn verify(&self, trustchain_public_key: &SignKeypairPublic) -> Result<()> {
        if self.target != TARGET_USER {
            Err(Error::UnsupportedTarget(self.target.clone()))?;
        }
        let res = verify_user_secret(&self.user_secret, &self.value).and_then(|_| {
            verify_delegation(
                trustchain_public_key,
                &self.ephemeral_public_signature_key,
                &self.value,
                &self.delegation_signature,
            )
        });
        if let Err(ref err) = res {
            warn!(error = %err, "identity failed verification");
        }
        res
    }
}

impl SerdeToken for Identity {}

impl Drop for Identity {
    fn drop(&mut self) {
        self.ephemeral_private_signature_key.zeroize();
        self.user_secret.zeroize();
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("trustchain_id", &self.trustchain_id)
            .field("target", &self.target)
            .field("value", &self.value)
            .field("delegation_signature", &self.delegation_signature)
            .field("ephemeral_public_signature_key", &self.ephemeral_public_signature_key)
            .field("ephemeral_private_signature_key", &format_args!("<redacted>"))
            .field("user_secret", &format_args!("<redacted>"))
            .finish()
    }
}

/// The shareable part of an [`Identity`].
///
/// Field order is the wire order, don't shuffle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, getset::Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub")]
pub struct PublicIdentity {
    target: String,
    #[serde(with = "crate::util::ser::human_bytes")]
    trustchain_id: Vec<u8>,
    #[serde(with = "crate::util::ser::human_bytes")]
    value: Vec<u8>,
}

impl SerdeToken for PublicIdentity {}

impl TryFrom<&Identity> for PublicIdentity {
    type Error = Error;
    fn try_from(identity: &Identity) -> std::result::Result<Self, Self::Error> {
        identity.public_identity()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        identity::config::TrustchainConfig,
        util::{
            ser::{base64_decode, base64_encode},
            test::FixedRng,
        },
    };

    pub(crate) const GOOD_IDENTITY: &str = "eyJ0cnVzdGNoYWluX2lkIjoidHBveHlOemgwaFU5RzJpOWFnTXZIeXlkK3BPNnpHQ2pPOUJmaHJDTGpkND0iLCJ0YXJnZXQiOiJ1c2VyIiwidmFsdWUiOiJSRGEwZXE0WE51ajV0VjdoZGFwak94aG1oZVRoNFFCRE5weTRTdnk5WG9rPSIsImRlbGVnYXRpb25fc2lnbmF0dXJlIjoiVTlXUW9sQ3ZSeWpUOG9SMlBRbWQxV1hOQ2kwcW1MMTJoTnJ0R2FiWVJFV2lyeTUya1d4MUFnWXprTHhINmdwbzNNaUE5cisremhubW9ZZEVKMCtKQ3c9PSIsImVwaGVtZXJhbF9wdWJsaWNfc2lnbmF0dXJlX2tleSI6IlhoM2kweERUcHIzSFh0QjJRNTE3UUt2M2F6TnpYTExYTWRKRFRTSDRiZDQ9IiwiZXBoZW1lcmFsX3ByaXZhdGVfc2lnbmF0dXJlX2tleSI6ImpFRFQ0d1FDYzFERndvZFhOUEhGQ2xuZFRQbkZ1Rm1YaEJ0K2lzS1U0WnBlSGVMVEVOT212Y2RlMEhaRG5YdEFxL2RyTTNOY3N0Y3gwa05OSWZodDNnPT0iLCJ1c2VyX3NlY3JldCI6IjdGU2YvbjBlNzZRVDNzMERrdmV0UlZWSmhYWkdFak94ajVFV0FGZXh2akk9In0=";
    pub(crate) const GOOD_PUBLIC_IDENTITY: &str = "eyJ0YXJnZXQiOiJ1c2VyIiwidHJ1c3RjaGFpbl9pZCI6InRwb3h5TnpoMGhVOUcyaTlhZ012SHl5ZCtwTzZ6R0NqTzlCZmhyQ0xqZDQ9IiwidmFsdWUiOiJSRGEwZXE0WE51ajV0VjdoZGFwak94aG1oZVRoNFFCRE5weTRTdnk5WG9rPSJ9";
    pub(crate) const TRUSTCHAIN_ID: &str = "tpoxyNzh0hU9G2i9agMvHyyd+pO6zGCjO9BfhrCLjd4=";
    pub(crate) const TRUSTCHAIN_PRIVATE_KEY: &str = "cTMoGGUKhwN47ypq4xAXAtVkNWeyUtMltQnYwJhxWYSvqjPVGmXd2wwa7y17QtPTZhn8bxb015CZC/e4ZI7+MQ==";
    pub(crate) const TRUSTCHAIN_PUBLIC_KEY: &str = "r6oz1Rpl3dsMGu8te0LT02YZ/G8W9NeQmQv3uGSO/jE=";
    pub(crate) const HASHED_USER_ID: &str = "RDa0eq4XNuj5tV7hdapjOxhmheTh4QBDNpy4Svy9Xok=";

    pub(crate) fn trustchain() -> Trustchain {
        TrustchainConfig::new(TRUSTCHAIN_ID, TRUSTCHAIN_PRIVATE_KEY).decode().unwrap()
    }

    pub(crate) fn trustchain_public_key() -> SignKeypairPublic {
        SignKeypairPublic::try_from(base64_decode(TRUSTCHAIN_PUBLIC_KEY).unwrap().as_slice()).unwrap()
    }

    #[test]
    fn identity_parses_known_token() {
        let identity = Identity::decode(GOOD_IDENTITY).unwrap();
        assert_eq!(base64_encode(identity.trustchain_id()), TRUSTCHAIN_ID);
        assert_eq!(identity.target(), TARGET_USER);
        assert_eq!(base64_encode(identity.value()), HASHED_USER_ID);
        assert_eq!(base64_encode(identity.user_secret()), "7FSf/n0e76QT3s0DkvetRVVJhXZGEjOxj5EWAFexvjI=");
        assert_eq!(base64_encode(identity.ephemeral_public_signature_key()), "Xh3i0xDTpr3HXtB2Q517QKv3azNzXLLXMdJDTSH4bd4=");
        assert_eq!(
            base64_encode(identity.ephemeral_private_signature_key()),
            "jEDT4wQCc1DFwodXNPHFClndTPnFuFmXhBt+isKU4ZpeHeLTENOmvcde0HZDnXtAq/drM3Ncstcx0kNNIfht3g=="
        );
        assert_eq!(
            base64_encode(identity.delegation_signature()),
            "U9WQolCvRyjT8oR2PQmd1WXNCi0qmL12hNrtGabYREWiry52kWx1AgYzkLxH6gpo3MiA9r++zhnmoYdEJ0+JCw=="
        );
        identity.verify(&trustchain_public_key()).unwrap();
        // and back again, byte for byte
        assert_eq!(identity.encode().unwrap(), GOOD_IDENTITY);
    }

    #[test]
    fn public_identity_parses_known_token() {
        let public = PublicIdentity::decode(GOOD_PUBLIC_IDENTITY).unwrap();
        assert_eq!(base64_encode(public.trustchain_id()), TRUSTCHAIN_ID);
        assert_eq!(public.target(), TARGET_USER);
        assert_eq!(base64_encode(public.value()), HASHED_USER_ID);
        assert_eq!(public.encode().unwrap(), GOOD_PUBLIC_IDENTITY);
    }

    #[test]
    fn identity_projects_known_public_identity() {
        let identity = Identity::decode(GOOD_IDENTITY).unwrap();
        let public = identity.public_identity().unwrap();
        assert_eq!(public.encode().unwrap(), GOOD_PUBLIC_IDENTITY);
        assert_eq!(PublicIdentity::try_from(&identity).unwrap(), public);
    }

    #[test]
    fn identity_known_vector() {
        let identity = Identity::create(&mut FixedRng(7), &trustchain(), "b_eich").unwrap();
        assert_eq!(base64_encode(identity.user_secret()), "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHB+E=");
        assert_eq!(
            identity.encode().unwrap(),
            "eyJ0cnVzdGNoYWluX2lkIjoidHBveHlOemgwaFU5RzJpOWFnTXZIeXlkK3BPNnpHQ2pPOUJmaHJDTGpkND0iLCJ0YXJnZXQiOiJ1c2VyIiwidmFsdWUiOiJSRGEwZXE0WE51ajV0VjdoZGFwak94aG1oZVRoNFFCRE5weTRTdnk5WG9rPSIsImRlbGVnYXRpb25fc2lnbmF0dXJlIjoiNXNtUGRwYUFueGhuREhIcXFIVjhpbFlrMXNKdE15bEJTdStyK2VPT3E2cDc5eTZxNUpLQUZ6YjFKNzJEN0JGN0pVMWl3eTdoeXRZdnowZk1BeGVnRHc9PSIsImVwaGVtZXJhbF9wdWJsaWNfc2lnbmF0dXJlX2tleSI6IjZrcHNZK0tjVWdxKzlWQjdFeTdGK1pWSGRxNit2bnVTUWg3cWFSUkcwaXc9IiwiZXBoZW1lcmFsX3ByaXZhdGVfc2lnbmF0dXJlX2tleSI6IkJ3Y0hCd2NIQndjSEJ3Y0hCd2NIQndjSEJ3Y0hCd2NIQndjSEJ3Y0hCd2ZxU214ajRweFNDcjcxVUhzVExzWDVsVWQycnI2K2U1SkNIdXBwRkViU0xBPT0iLCJ1c2VyX3NlY3JldCI6IkJ3Y0hCd2NIQndjSEJ3Y0hCd2NIQndjSEJ3Y0hCd2NIQndjSEJ3Y0hCK0U9In0="
        );
        identity.verify(&trustchain_public_key()).unwrap();
    }

    #[test]
    fn identity_create_verify() {
        let mut rng = crate::util::test::rng();
        let identity = Identity::create(&mut rng, &trustchain(), "b_eich").unwrap();
        assert_eq!(identity.value().len(), 32);
        assert_eq!(identity.user_secret().len(), 32);
        assert_eq!(identity.ephemeral_public_signature_key().len(), 32);
        assert_eq!(identity.ephemeral_private_signature_key().len(), 64);
        assert_eq!(identity.delegation_signature().len(), 64);
        assert_eq!(base64_encode(identity.value()), HASHED_USER_ID);
        identity.verify(&trustchain_public_key()).unwrap();

        // the ephemeral key we hand out has to be a real keypair
        let ephemeral = crate::crypto::base::SignKeypair::new_ed25519_from_secret_key(identity.ephemeral_private_signature_key()).unwrap();
        assert_eq!(ephemeral.public().as_ref(), identity.ephemeral_public_signature_key().as_slice());

        let other = Trustchain::generate(&mut rng);
        assert_eq!(identity.verify(&other.public_key()), Err(Error::CryptoSignatureVerificationFailed));
    }

    #[test]
    fn identity_verify_catches_tampering() {
        let mut rng = crate::util::test::rng();
        let identity = Identity::create(&mut rng, &trustchain(), "b_eich").unwrap();

        let mut modded = identity.clone();
        modded.user_secret[3] ^= 0x01;
        assert_eq!(modded.verify(&trustchain_public_key()), Err(Error::UserSecretChecksumMismatch));

        let mut modded = identity.clone();
        modded.delegation_signature[10] ^= 0x01;
        assert_eq!(modded.verify(&trustchain_public_key()), Err(Error::CryptoSignatureVerificationFailed));

        let mut modded = identity.clone();
        modded.ephemeral_public_signature_key[0] ^= 0x01;
        assert_eq!(modded.verify(&trustchain_public_key()), Err(Error::CryptoSignatureVerificationFailed));

        let mut modded = identity.clone();
        modded.user_secret.pop();
        assert_eq!(modded.verify(&trustchain_public_key()), Err(Error::BadLength));

        let mut modded = identity.clone();
        modded.target = "group".into();
        assert_eq!(modded.verify(&trustchain_public_key()), Err(Error::UnsupportedTarget("group".into())));
    }

    #[test]
    fn identity_debug_hides_secrets() {
        let identity = Identity::decode(GOOD_IDENTITY).unwrap();
        let debug = format!("{:?}", identity);
        assert!(!debug.contains(&format!("{:?}", identity.user_secret())));
        assert!(!debug.contains(&format!("{:?}", identity.ephemeral_private_signature_key())));
        assert!(!debug.contains("236, 84, 159"));
        assert!(!debug.contains("140, 64, 211"));
        assert!(debug.contains("ephemeral_private_signature_key: <redacted>"));
        assert!(debug.contains("user_secret: <redacted>"));
        assert!(debug.contains(&format!("{:?}", identity.value())));
    }

    #[test]
    fn identity_rejects_other_targets() {
        let mut identity = Identity::decode(GOOD_IDENTITY).unwrap();
        identity.target = "email".into();
        assert_eq!(identity.public_identity().err(), Some(Error::UnsupportedTarget("email".into())));
        identity.target = "User".into();
        assert_eq!(identity.public_identity().err(), Some(Error::UnsupportedTarget("User".into())));
    }

    #[test]
    fn identity_round_trips_empty_fields() {
        let identity = Identity {
            trustchain_id: vec![],
            target: String::new(),
            value: vec![],
            delegation_signature: vec![],
            ephemeral_public_signature_key: vec![],
            ephemeral_private_signature_key: vec![],
            user_secret: vec![],
        };
        let encoded = identity.encode().unwrap();
        assert_eq!(Identity::decode(&encoded).unwrap(), identity);

        let public = PublicIdentity {
            target: TARGET_USER.into(),
            trustchain_id: vec![],
            value: vec![0],
        };
        let encoded = public.encode().unwrap();
        assert_eq!(PublicIdentity::decode(&encoded).unwrap(), public);
    }

    #[test]
    fn identity_decode_mismatched_records() {
        // a public identity is not an identity
        let res = Identity::decode(GOOD_PUBLIC_IDENTITY);
        assert!(matches!(res, Err(Error::MalformedStructure(_))));
        // and an identity has too many fields to be a public identity
        let res = PublicIdentity::decode(GOOD_IDENTITY);
        assert!(matches!(res, Err(Error::MalformedStructure(_))));
        let res = Identity::decode("eyJ0cnVzdGNoYWluX2lkIjoi!!!");
        assert!(matches!(res, Err(Error::MalformedInput(_))));
    }
}
