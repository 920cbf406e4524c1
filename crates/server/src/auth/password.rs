//! Password hashing and verification.
//!
//! PBKDF2-HMAC-SHA512 with a per-admin random salt. Hash and salt are stored
//! hex-encoded in separate columns, and the parameters here must keep
//! verifying hashes produced by earlier deployments, so they are fixed.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;

/// PBKDF2 iteration count.
const ITERATIONS: u32 = 120_000;
/// Derived key length in bytes.
const KEY_LEN: usize = 64;
/// Salt length in bytes (stored hex-encoded, 32 chars).
const SALT_LEN: usize = 16;

/// Generate a fresh random salt, hex-encoded.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Derive the hex-encoded hash of `password` under `salt`.
///
/// The salt is fed to the KDF as its stored (hex string) form, matching the
/// values already persisted by earlier deployments.
#[must_use]
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), ITERATIONS, &mut out);
    hex::encode(out)
}

/// Verify a supplied password against stored credentials.
///
/// Prefers the hash+salt pair; falls back to the legacy plaintext column for
/// rows that have not been migrated yet.
#[must_use]
pub fn verify_password(
    password: &str,
    hash: Option<&str>,
    salt: Option<&str>,
    legacy_plaintext: Option<&str>,
) -> bool {
    if let (Some(hash), Some(salt)) = (hash, salt) {
        return hash_password(password, salt) == hash;
    }

    legacy_plaintext.is_some_and(|plain| plain == password)
}
