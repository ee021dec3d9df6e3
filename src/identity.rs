// src/identity.rs

//! Content identity for archived updates.
//!
//! An update is identified by a digest of its timestamp and title, so a
//! re-crawl of the same logical entry maps to the same id regardless of
//! body edits on the remote side.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept; 128 bits is plenty for accidental
/// collision resistance over a news archive.
const ID_BYTES: usize = 16;

/// Derive the stable identifier for an update.
///
/// Canonical composition: SHA-256 over the UTF-8 bytes of `timestamp`
/// followed by the UTF-8 bytes of `title`, truncated to 16 bytes and
/// lowercase hex-encoded. Total over all inputs, including empty strings.
pub fn update_id(timestamp: &str, title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(title.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..ID_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = update_id("2026-08-01", "Release Notes");
        let b = update_id("2026-08-01", "Release Notes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sensitive_to_each_field() {
        let base = update_id("2026-08-01", "Release Notes");
        assert_ne!(base, update_id("2026-08-02", "Release Notes"));
        assert_ne!(base, update_id("2026-08-01", "Release notes"));
    }

    #[test]
    fn test_empty_inputs_produce_value() {
        let id = update_id("", "");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_shape() {
        let id = update_id("2026-08-01", "Hotfix");
        assert_eq!(id.len(), 32);
        assert_eq!(id, id.to_lowercase());
    }
}
