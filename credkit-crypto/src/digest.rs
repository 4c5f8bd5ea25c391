//! Password digests.
//!
//! A digest is a keyed one-way hash of a plaintext, keyed by the record's
//! salt and rendered as lowercase hex. An empty or absent plaintext always
//! digests to `""` so that clearing a credential stores nothing.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{KEY_SIZE, KdfParams};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// The keyed hash used to derive stored digests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// HMAC-SHA1 keyed by the salt. Matches digests already stored by
    /// existing user records.
    #[default]
    HmacSha1,
    /// HMAC-SHA256 keyed by the salt.
    HmacSha256,
    /// Argon2id over the plaintext, salted with SHA-256 of the salt string.
    Argon2id(KdfParams),
}

impl DigestAlgorithm {
    /// Digests `plaintext` with `salt`.
    ///
    /// Deterministic for identical inputs. Returns `""` without hashing
    /// when `plaintext` is `None` or empty.
    pub fn digest(&self, plaintext: Option<&str>, salt: &str) -> CryptoResult<String> {
        let plaintext = match plaintext {
            Some(p) if !p.is_empty() => p,
            _ => return Ok(String::new()),
        };
        match self {
            DigestAlgorithm::HmacSha1 => keyed_hex::<Hmac<Sha1>>(salt, plaintext),
            DigestAlgorithm::HmacSha256 => keyed_hex::<Hmac<Sha256>>(salt, plaintext),
            DigestAlgorithm::Argon2id(params) => argon2_hex(params, salt, plaintext),
        }
    }

    /// Checks parameters that can fail at digest time.
    pub fn validate(&self) -> CryptoResult<()> {
        match self {
            DigestAlgorithm::Argon2id(params) => params.validate(),
            DigestAlgorithm::HmacSha1 | DigestAlgorithm::HmacSha256 => Ok(()),
        }
    }

    /// Whether `candidate` digests to `expected` under `salt`. The final
    /// comparison runs in constant time.
    pub fn verify(
        &self,
        candidate: Option<&str>,
        salt: &str,
        expected: &str,
    ) -> CryptoResult<bool> {
        let actual = self.digest(candidate, salt)?;
        Ok(constant_time_eq(&actual, expected))
    }
}

/// Constant-time string equality.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn keyed_hex<M: Mac + KeyInit>(key: &str, message: &str) -> CryptoResult<String> {
    let mut mac = <M as Mac>::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    Mac::update(&mut mac, message.as_bytes());
    Ok(hex::encode(Mac::finalize(mac).into_bytes()))
}

fn argon2_hex(params: &KdfParams, salt: &str, plaintext: &str) -> CryptoResult<String> {
    use sha2::Digest as _;

    // Argon2 rejects salts shorter than 8 bytes; numeric salts can be that short.
    let salt_bytes = Sha256::digest(salt.as_bytes());
    let mut out = [0u8; KEY_SIZE];
    params
        .hasher()?
        .hash_password_into(plaintext.as_bytes(), &salt_bytes, &mut out)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(hex::encode(out))
}
