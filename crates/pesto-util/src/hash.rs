use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of a byte slice, returning a lowercase hex string.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// The first `len` hex digits of the SHA-256 of `text`, for naming
/// directories after arbitrary strings.
pub fn short_digest(text: &str, len: usize) -> String {
    let mut digest = sha256_bytes(text.as_bytes());
    digest.truncate(len);
    digest
}
