//! Per-credential salts.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Size of random salts in bytes.
pub const SALT_SIZE: usize = 16;

/// How new salts are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltStrategy {
    /// `round(now_millis * uniform[0, 1))` as a decimal string. Differs
    /// across calls in practice but is predictable; kept for records that
    /// expect numeric salts.
    TimeRandom,
    /// [`SALT_SIZE`] bytes from the OS CSPRNG, hex encoded.
    #[default]
    OsRandom,
}

impl SaltStrategy {
    /// Produces a new, non-empty salt string.
    pub fn make_salt(self) -> String {
        match self {
            SaltStrategy::TimeRandom => time_random_salt(),
            SaltStrategy::OsRandom => Salt::random().to_hex(),
        }
    }
}

fn time_random_salt() -> String {
    let now = chrono::Utc::now().timestamp_millis() as f64;
    let factor: f64 = rand::random();
    format!("{}", (now * factor).round() as u64)
}

/// Random salt bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Salt {
    bytes: [u8; SALT_SIZE],
}

impl Salt {
    /// Generates a random salt.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Lowercase hex rendering, the form stored on records.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}
