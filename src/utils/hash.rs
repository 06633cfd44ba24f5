//! Hashing helpers.
//!
//! `compute` is a fast FxHash used for change detection (config reload).
//! `fingerprint` is a content hash for cache-busting file names, stable across
//! builds and platforms.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Length of fingerprints in hex characters.
pub const FINGERPRINT_LEN: usize = 8;

/// BLAKE3 content hash as a short hex fingerprint (e.g. `a1b2c3d4`).
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let hash = blake3::hash(data.as_ref());
    hex::encode(&hash.as_bytes()[..FINGERPRINT_LEN / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_detects_change() {
        assert_eq!(compute("title = 'a'"), compute("title = 'a'"));
        assert_ne!(compute("title = 'a'"), compute("title = 'b'"));
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = fingerprint("body { margin: 0 }");
        assert_eq!(fp.len(), FINGERPRINT_LEN);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fingerprint("body { margin: 0 }"));
        assert_ne!(fp, fingerprint("body { margin: 1px }"));
    }
}
