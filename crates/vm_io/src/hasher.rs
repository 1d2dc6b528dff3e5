//! Content-addressing hash. Deliberately MD5, not a security primitive —
//! the filename segment only needs to be a cheap, stable fingerprint of the
//! file's bytes (see SPEC_FULL.md §4.3 / spec.md §9).

use md5::{Digest, Md5};

/// Lowercase 32-hex MD5 digest of `bytes`.
pub fn md5_hex(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// `true` iff `s` is a lowercase 32-hex string (the shape of both a voter
/// code and a filename hash segment).
pub fn is_hex32(s: &str) -> bool {
    s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // md5("") == d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn deterministic() {
        assert_eq!(md5_hex(b"ballot"), md5_hex(b"ballot"));
        assert_ne!(md5_hex(b"ballot"), md5_hex(b"Ballot"));
    }
}
