//! The five filename grammars of spec.md §6, compiled once.

use once_cell::sync::Lazy;
use regex::Regex;
use vm_core::{BallotNumber, Stage};

pub static BLANK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ballot\.\d+\.blank\.[A-Za-z0-9_-]+\.json$").unwrap());
pub static ENCRYPTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ballot\.\d+\.encrypted\.[A-Za-z0-9_-]+\.json$").unwrap());
pub static DECRYPTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ballot\.\d+\.decrypted\.[A-Za-z0-9_-]+\.json$").unwrap());
pub static SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ballot\.\d+\.encrypted\.[A-Za-z0-9_-]+\.signature$").unwrap());
pub static VOTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{32}\.json$").unwrap());

/// Build `ballot.NNNNNN.<stage>.<hash>.<ext>`. `stage` drives the filename
/// segment (Blank and Voting both render `blank`); `ext` is `json` for
/// blank/decrypted ballots, `json` for encrypted ciphertext (despite not
/// being JSON — spec.md §6), or `signature` for detached signatures.
pub fn ballot_filename(number: BallotNumber, stage: Stage, hash: &str, ext: &str) -> String {
    format!("ballot.{}.{}.{}.{}", number.padded(), stage.filename_segment(), hash, ext)
}

/// The 4th dot-delimited field of a ballot/signature filename — the
/// content hash segment that `verify_integrity` checks against.
pub fn hash_segment(filename: &str) -> Option<&str> {
    filename.split('.').nth(3)
}

/// The ballot sequence number (2nd dot-delimited field), parsed as `u32`.
pub fn ballot_number(filename: &str) -> Option<BallotNumber> {
    filename.split('.').nth(1)?.parse().ok()
}
