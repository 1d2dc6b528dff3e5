//! On-disk JSON shapes (spec.md §6).

use serde::{Deserialize, Serialize};

/// Body of a blank or decrypted ballot file. `metadata` defaults to `null`
/// when absent, matching the original's `metadata=None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    pub number: u32,
    pub creation_timestamp: String,
    pub uuid: String,
    pub preference: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// `voters/<voter_code>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub voter_code: String,
    pub voted: bool,
}

/// `candidates.json` — a bare JSON array of labels, not an object; callers
/// serialize/deserialize `Vec<String>` directly rather than through this
/// type. Kept as a documentation anchor for the shape.
pub type Candidates = Vec<String>;
