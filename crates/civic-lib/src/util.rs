//! ID generation.
//!
//! IDs are `<prefix>-<base36>` where the suffix is a truncated SHA-256 over
//! the entry content, a nanosecond timestamp and a nonce. The `exists`
//! closure lets the caller reject collisions, so two entries created in the
//! same tick still get distinct IDs.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Prefix for issue IDs.
pub const ISSUE_PREFIX: &str = "iss";

/// Prefix for comment IDs.
pub const COMMENT_PREFIX: &str = "cmt";

const MIN_HASH_LENGTH: usize = 4;
const MAX_HASH_LENGTH: usize = 8;
const NONCES_PER_LENGTH: u32 = 10;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a unique ID with the given prefix.
///
/// `content` is any text that distinguishes the entry (title, comment body);
/// `count` is the number of existing entries and drives the suffix length.
pub fn generate_id<F>(
    prefix: &str,
    content: &str,
    created_at: DateTime<Utc>,
    count: usize,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let nanos = created_at.timestamp_nanos_opt().unwrap_or_default();
    let mut nonce = 0u32;

    for length in optimal_hash_length(count)..=MAX_HASH_LENGTH {
        for _ in 0..NONCES_PER_LENGTH {
            let id = format!("{prefix}-{}", digest_suffix(content, nanos, nonce, length));
            nonce += 1;
            if !exists(&id) {
                return id;
            }
        }
    }

    // Every short form is taken; keep the widest suffix and walk the nonce.
    loop {
        let id = format!(
            "{prefix}-{}",
            digest_suffix(content, nanos, nonce, MAX_HASH_LENGTH)
        );
        if !exists(&id) {
            return id;
        }
        nonce = nonce.wrapping_add(1);
    }
}

/// Smallest suffix length keeping the birthday-collision probability
/// under 25% for `count` entries.
#[allow(clippy::cast_precision_loss)]
fn optimal_hash_length(count: usize) -> usize {
    let n = count as f64;
    // 36^MIN_HASH_LENGTH
    let mut space = 36_f64.powi(4);
    for length in MIN_HASH_LENGTH..=MAX_HASH_LENGTH {
        if 1.0 - (-n * n / (2.0 * space)).exp() < 0.25 {
            return length;
        }
        space *= 36.0;
    }
    MAX_HASH_LENGTH
}

/// `length` base36 digits taken from SHA-256(content, nanos, nonce).
#[allow(clippy::cast_possible_truncation)]
fn digest_suffix(content: &str, nanos: i64, nonce: u32, length: usize) -> String {
    let digest = Sha256::new()
        .chain_update(content.as_bytes())
        .chain_update(nanos.to_le_bytes())
        .chain_update(nonce.to_le_bytes())
        .finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    let mut value = u128::from_le_bytes(bytes);

    let mut suffix = String::with_capacity(length);
    for _ in 0..length {
        suffix.push(char::from(BASE36[(value % 36) as usize]));
        value /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id(ISSUE_PREFIX, "Pothole", Utc::now(), 0, |_| false);
        assert!(id.starts_with("iss-"));
        assert_eq!(id.len(), "iss-".len() + MIN_HASH_LENGTH);
        assert!(
            id["iss-".len()..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_same_tick_same_content_is_disambiguated() {
        let mut generated = HashSet::new();
        let now = Utc::now();
        for _ in 0..50 {
            let id = generate_id(COMMENT_PREFIX, "+1", now, generated.len(), |id| {
                generated.contains(id)
            });
            assert!(generated.insert(id), "duplicate id generated");
        }
    }

    #[test]
    fn test_length_grows_with_count() {
        assert_eq!(optimal_hash_length(0), MIN_HASH_LENGTH);
        assert!(optimal_hash_length(100_000) > MIN_HASH_LENGTH);
    }

    #[test]
    fn test_suffix_is_deterministic_per_nonce() {
        let a = digest_suffix("Pothole", 42, 0, 6);
        assert_eq!(a, digest_suffix("Pothole", 42, 0, 6));
        assert_ne!(a, digest_suffix("Pothole", 42, 1, 6));
        assert_eq!(a.len(), 6);
    }
}
