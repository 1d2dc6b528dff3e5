//! `verify_integrity` (spec.md §4.2.4): every read from disk is checked
//! against the hash segment embedded in its own filename.

use crate::filenames::hash_segment;
use crate::hasher::md5_hex;
use crate::IoError;

pub fn verify_integrity(name: &str, bytes: &[u8]) -> Result<(), IoError> {
    let expected = hash_segment(name)
        .ok_or_else(|| IoError::Storage(format!("cannot parse hash segment out of {name:?}")))?;
    let actual = md5_hex(bytes);
    if actual != expected {
        return Err(IoError::Integrity {
            name: name.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_when_hash_is_correct() {
        let body = b"ballot contents";
        let hash = md5_hex(body);
        let name = format!("ballot.000001.blank.{hash}.json");
        assert!(verify_integrity(&name, body).is_ok());
    }

    #[test]
    fn fails_on_mismatch() {
        let name = "ballot.000001.blank.deadbeefdeadbeefdeadbeefdeadbeef.json";
        let err = verify_integrity(name, b"tampered").unwrap_err();
        assert!(matches!(err, IoError::Integrity { .. }));
    }
}
