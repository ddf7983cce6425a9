//! The crypto module contains our cryptographic primitives for hashing,
//! key generation, and signing.

pub mod base;
