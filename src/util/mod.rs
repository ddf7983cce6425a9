//! Odds and ends: the token codec, byte wrappers, and test helpers.

pub mod ser;
