//! Salt generation and password digests for credkit.
//!
//! - [`SaltStrategy`] produces a fresh salt string per credential change
//! - [`DigestAlgorithm`] turns (plaintext, salt) into a hex digest
//! - [`KdfParams`] tunes the Argon2id digest
//!
//! Digests are one-way: nothing here can recover a plaintext.

mod digest;
mod error;
mod key;
mod salt;

pub use digest::{DigestAlgorithm, constant_time_eq};
pub use error::{CryptoError, CryptoResult};
pub use key::{KEY_SIZE, KdfParams};
pub use salt::{SALT_SIZE, Salt, SaltStrategy};
