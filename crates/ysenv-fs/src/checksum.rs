//! SHA-256 content digests
//!
//! The short form names content-addressed files: the same content always
//! maps to the same file name.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of string content.
pub fn content_digest_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// First `len` hex characters of the content's SHA-256.
pub fn short_content_digest(content: &str, len: usize) -> String {
    let mut hex = content_digest_hex(content);
    hex.truncate(len);
    hex
}
