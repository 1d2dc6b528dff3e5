//! vm_io — storage primitives for the evote engine: byte-stable canonical
//! JSON, MD5 content-addressing, the five filename grammars, the on-disk
//! JSON shapes, and atomic file writes. No workflow semantics live here;
//! see `vm_workflow` for the ballot lifecycle built on top of this crate.

#![forbid(unsafe_code)]

pub mod canonical_json;
pub mod filenames;
pub mod hasher;
pub mod integrity;
pub mod model;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("integrity check failed for {name}: expected hash {expected}, got {actual}")]
    Integrity {
        name: String,
        expected: String,
        actual: String,
    },
}

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_json_bytes, write_canonical_bytes, write_canonical_file};
    pub use crate::filenames::{ballot_filename, ballot_number, hash_segment};
    pub use crate::hasher::{is_hex32, md5_hex};
    pub use crate::integrity::verify_integrity;
    pub use crate::model::{Ballot, Candidates, VoterRecord};
    pub use crate::IoError;
}
