//! Trustchain identity tokens.
//!
//! A trustchain is an application's root of trust: a random 32-byte id plus
//! an ed25519 signing keypair that lives on the application's server. When a
//! user signs up, the server issues them an *identity*, an opaque string that
//! carries:
//!
//! - the user's id, hashed together with the trustchain id so it can't be
//! read back out,
//! - a random user secret with a checksum byte binding it to that hash,
//! - a freshly minted ephemeral keypair, and the trustchain's signature
//! delegating the user to it.
//!
//! The identity is private and goes to the user's own device. From it you can
//! project a *public identity*, which is safe to share with anyone who needs
//! to address that user.
//!
//! ```rust,no_run
//! use trustchain_identity::{create_identity, get_public_identity, TrustchainConfig};
//!
//! let config = TrustchainConfig::from_file("trustchain.yaml").unwrap();
//! let identity = create_identity(&config, "user@example.io").unwrap();
//! let public_identity = get_public_identity(&identity).unwrap();
//! ```
//!
//! Every operation here is a pure function of its inputs and the rng. Nothing
//! touches the network or disk (except config loading, if you ask for it), so
//! you can call any of this from as many threads as you like.

pub mod error;
pub mod util;
pub mod crypto;
pub mod identity;

pub use error::{Error, Result};
pub use identity::{
    create_identity,
    create_identity_with_rng,
    create_user_token,
    create_user_token_with_rng,
    get_public_identity,
    DelegationToken,
    Identity,
    PublicIdentity,
    Trustchain,
    TrustchainConfig,
};
pub use util::ser::SerdeToken;
