//! Newtypes shared across the workspace: voter codes, ballot numbers, and
//! the ballot lifecycle stage.

use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn is_lower_hex_len(s: &str, n: usize) -> bool {
    s.len() == n && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// 32-hex lowercase digest of an opaque voter id (see `vm_io::hasher`).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoterCode(String);

impl VoterCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VoterCode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_lower_hex_len(s, 32) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidVoterCode(s.to_string()))
        }
    }
}

/// 1-based ballot sequence number; renders zero-padded to six digits in
/// filenames (`ballot.NNNNNN.<stage>.<hash>.json`).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BallotNumber(pub u32);

impl BallotNumber {
    /// Zero-padded six-digit rendering used in filenames.
    pub fn padded(&self) -> String {
        format!("{:06}", self.0)
    }
}

impl fmt::Display for BallotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BallotNumber {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(BallotNumber)
            .map_err(|_| CoreError::InvalidFilename(s.to_string()))
    }
}

/// Ballot lifecycle stage, encoded both in the filename segment and in the
/// containing directory name (spec §4.2.1).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stage {
    Blank,
    Voting,
    Encrypted,
    Decrypted,
}

impl Stage {
    /// Filename segment — note `Voting` reuses `blank` (spec §3: "voting-stage
    /// ballots reuse the blank filename in a different directory").
    pub fn filename_segment(&self) -> &'static str {
        match self {
            Stage::Blank | Stage::Voting => "blank",
            Stage::Encrypted => "encrypted",
            Stage::Decrypted => "decrypted",
        }
    }

    /// Directory name under the workdir.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Stage::Blank => "blank_ballots",
            Stage::Voting => "voting_ballots",
            Stage::Encrypted => "encrypted_ballots",
            Stage::Decrypted => "decrypted_ballots",
        }
    }
}
