//! Content hashing for change detection (SHA-256, lowercase hex).

use sha2::{Digest, Sha256};

/// Compute SHA-256 of `bytes` and return the digest as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}
