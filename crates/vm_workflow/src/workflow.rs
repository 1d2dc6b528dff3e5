use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use vm_core::{BallotNumber, BallotRng, Clock, RandomUuidSource, Stage, SystemClock, UuidSource, VoterCode};
use vm_crypto::KeyProvider;
use vm_io::canonical_json::{to_canonical_json_bytes, write_canonical_bytes, write_canonical_file};
use vm_io::filenames::{ballot_filename, ballot_number, BLANK_RE, DECRYPTED_RE, ENCRYPTED_RE};
use vm_io::hasher::md5_hex;
use vm_io::integrity::verify_integrity;
use vm_io::model::{Ballot, VoterRecord};
use vm_io::IoError;

use crate::errors::WorkflowError;
use crate::layout::*;
use crate::lock::VoterLock;

/// The content-addressed ballot lifecycle, parameterized over an encryptor
/// (holds the election public key) and a signer (holds the signing private
/// key) — mirroring spec.md §4.2's `encryption_public_key` /
/// `signing_private_key` parameters. `workdir` is exclusively owned by one
/// `Workflow` value at a time per process (spec.md §3).
pub struct Workflow<E, S>
where
    E: KeyProvider,
    S: KeyProvider,
{
    workdir: PathBuf,
    encryptor: E,
    signer: S,
    clock: Arc<dyn Clock>,
    uuid_source: Arc<dyn UuidSource>,
}

/// What `commit_vote` has actually done so far, so a failure anywhere in
/// the protocol can be undone to exactly that point (spec.md §4.2.3).
#[derive(Default, Clone)]
struct CastState {
    voting_name: Option<String>,
    encrypted_name: Option<String>,
}

impl<E, S> Workflow<E, S>
where
    E: KeyProvider,
    S: KeyProvider,
{
    pub fn new(workdir: impl Into<PathBuf>, encryptor: E, signer: S) -> Self {
        Self {
            workdir: workdir.into(),
            encryptor,
            signer,
            clock: Arc::new(SystemClock),
            uuid_source: Arc::new(RandomUuidSource),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_uuid_source(mut self, uuid_source: Arc<dyn UuidSource>) -> Self {
        self.uuid_source = uuid_source;
        self
    }

    fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.workdir.join(rel)
    }

    fn voter_path(&self, code: &VoterCode) -> PathBuf {
        self.path(VOTERS_DIR).join(format!("{code}.json"))
    }

    fn voter_lock_path(&self, code: &VoterCode) -> PathBuf {
        self.path(VOTERS_DIR).join(format!("{code}.json.lock"))
    }

    fn read_voter(&self, code: &VoterCode) -> Result<VoterRecord, WorkflowError> {
        let path = self.voter_path(code);
        if !path.exists() {
            return Err(WorkflowError::NotRegistered);
        }
        let bytes = fs::read(&path).map_err(IoError::from)?;
        Ok(serde_json::from_slice(&bytes).map_err(IoError::from)?)
    }

    /// Create the six subdirectories. Fails if any already exists.
    #[tracing::instrument(skip(self))]
    pub fn setup(&self) -> Result<(), WorkflowError> {
        for dir in SUBDIRS {
            if let Err(err) = fs::create_dir(self.path(dir)) {
                if err.kind() == std::io::ErrorKind::AlreadyExists {
                    return Err(WorkflowError::AlreadySetUp);
                }
                return Err(IoError::from(err).into());
            }
        }
        tracing::info!(workdir = %self.workdir.display(), "workflow initialized");
        Ok(())
    }

    /// Write `candidates.json`. Idempotent via overwrite — callers must
    /// call at most once per election (spec.md §4.2.2).
    #[tracing::instrument(skip(self, candidates))]
    pub fn register_candidates(&self, candidates: &[String]) -> Result<(), WorkflowError> {
        write_canonical_file(&self.path(CANDIDATES_FILE), &candidates.to_vec())?;
        tracing::info!(count = candidates.len(), "candidates registered");
        Ok(())
    }

    /// Derive `voter_code = MD5(voter_id)`, write `voters/<code>.json` with
    /// `voted=false`. Overwriting an existing voter silently resets their
    /// voted state (spec.md §4.2.2) — callers must not register twice.
    #[tracing::instrument(skip(self, voter_id))]
    pub fn register_voter(&self, voter_id: &str) -> Result<VoterCode, WorkflowError> {
        let code = voter_code_for(voter_id);
        let record = VoterRecord {
            voter_code: code.to_string(),
            voted: false,
        };
        write_canonical_file(&self.voter_path(&code), &record)?;
        tracing::info!(voter_code = %code, "voter registered");
        Ok(code)
    }

    /// Write `number` blank ballots numbered `start..start+number`.
    #[tracing::instrument(skip(self, metadata))]
    pub fn create_ballots(
        &self,
        number: u32,
        start: u32,
        metadata: Option<Value>,
    ) -> Result<(), WorkflowError> {
        for seq in start..start + number {
            let ballot = Ballot {
                number: seq,
                creation_timestamp: self.clock.now_utc_string(),
                uuid: self.uuid_source.new_uuid().to_string(),
                preference: Vec::new(),
                metadata: metadata.clone().unwrap_or(Value::Null),
            };
            let bytes = to_canonical_json_bytes(&ballot)?;
            let hash = md5_hex(&bytes);
            let name = ballot_filename(BallotNumber(seq), Stage::Blank, &hash, "json");
            write_canonical_bytes(&self.path(BLANK_DIR).join(&name), &bytes)?;
        }
        tracing::info!(number, start, "ballots created");
        Ok(())
    }

    /// Uniformly sample one blank ballot, atomically move it into
    /// `voting_ballots`, read it back, and verify its integrity.
    #[tracing::instrument(skip(self))]
    pub fn pick_random_ballot(&self) -> Result<(String, Ballot), WorkflowError> {
        let blank_dir = self.path(BLANK_DIR);
        let mut names: Vec<String> = fs::read_dir(&blank_dir)
            .map_err(IoError::from)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| BLANK_RE.is_match(name))
            .collect();
        names.sort();

        let mut rng = BallotRng::new();
        let idx = rng.choose_index(names.len()).ok_or(WorkflowError::NoBallotsAvailable)?;
        let name = names.swap_remove(idx);

        let from = blank_dir.join(&name);
        let to = self.path(VOTING_DIR).join(&name);
        fs::rename(&from, &to).map_err(IoError::from)?;

        let bytes = fs::read(&to).map_err(IoError::from)?;
        verify_integrity(&name, &bytes)?;
        let ballot: Ballot = serde_json::from_slice(&bytes).map_err(IoError::from)?;
        Ok((name, ballot))
    }

    /// The cast-vote transaction (spec.md §4.2.3): either all of (ballot
    /// encrypted+signed, blank file removed, voter marked voted) commit, or
    /// none do. `AlreadyVoted` is returned before any state is touched and
    /// bypasses rollback entirely.
    #[tracing::instrument(skip(self, preference))]
    pub fn cast_vote(
        &self,
        voter_id: &str,
        preference: &[String],
    ) -> Result<(String, Vec<u8>, Vec<u8>), WorkflowError> {
        let code = voter_code_for(voter_id);
        let _lock = VoterLock::acquire(&self.voter_lock_path(&code))?;

        if !self.path(CANDIDATES_FILE).exists() {
            return Err(WorkflowError::Storage(IoError::Storage(
                "candidates.json is missing".to_string(),
            )));
        }
        let mut voter = self.read_voter(&code)?;
        if voter.voted {
            return Err(WorkflowError::AlreadyVoted);
        }

        match self.commit_vote(&code, preference) {
            Ok(result) => Ok(result),
            Err((err, state)) => {
                tracing::warn!(voter_code = %code, error = %err, "cast_vote failed, rolling back");
                self.rollback(&state);
                voter.voted = false;
                let _ = write_canonical_file(&self.voter_path(&code), &voter);
                Err(err)
            }
        }
    }

    fn commit_vote(
        &self,
        code: &VoterCode,
        preference: &[String],
    ) -> Result<(String, Vec<u8>, Vec<u8>), (WorkflowError, CastState)> {
        let mut state = CastState::default();

        // a. Pick a random blank ballot: moves blank -> voting.
        let (voting_name, mut ballot) = self.pick_random_ballot().map_err(|e| (e, state.clone()))?;
        state.voting_name = Some(voting_name.clone());

        // b. Set the preference.
        ballot.preference = preference.to_vec();

        // c. Serialize, encrypt, hash, write the encrypted file.
        let plaintext = to_canonical_json_bytes(&ballot).map_err(|e| (e.into(), state.clone()))?;
        let ciphertext = self.encryptor.encrypt(&plaintext).map_err(|e| (e.into(), state.clone()))?;
        let hash = md5_hex(&ciphertext);
        let encrypted_name = ballot_filename(BallotNumber(ballot.number), Stage::Encrypted, &hash, "json");
        write_canonical_bytes(&self.path(ENCRYPTED_DIR).join(&encrypted_name), &ciphertext)
            .map_err(|e| (e.into(), state.clone()))?;
        state.encrypted_name = Some(encrypted_name.clone());

        // d. Sign the ciphertext, write the detached signature.
        let signature = self.signer.sign(&ciphertext).map_err(|e| (e.into(), state.clone()))?;
        let signature_name = ballot_filename(BallotNumber(ballot.number), Stage::Encrypted, &hash, "signature");
        write_canonical_bytes(&self.path(SIGNATURES_DIR).join(&signature_name), &signature)
            .map_err(|e| (e.into(), state.clone()))?;

        // e. Delete the voting-stage file.
        fs::remove_file(self.path(VOTING_DIR).join(&voting_name))
            .map_err(|e| (WorkflowError::from(IoError::from(e)), state.clone()))?;
        state.voting_name = None;

        // f. Mark the voter as having voted.
        let record = VoterRecord {
            voter_code: code.to_string(),
            voted: true,
        };
        write_canonical_file(&self.voter_path(code), &record).map_err(|e| (e.into(), state.clone()))?;

        // g.
        Ok((encrypted_name, plaintext, signature))
    }

    /// Undo exactly as much of the commit protocol as happened. Never
    /// touches the signature file — the original's exception handler
    /// doesn't either (SPEC_FULL.md §4.4 / §9).
    fn rollback(&self, state: &CastState) {
        if let Some(voting_name) = &state.voting_name {
            let from = self.path(VOTING_DIR).join(voting_name);
            if from.exists() {
                let to = self.path(BLANK_DIR).join(voting_name);
                let _ = fs::rename(&from, &to);
            }
        }
        if let Some(encrypted_name) = &state.encrypted_name {
            let _ = fs::remove_file(self.path(ENCRYPTED_DIR).join(encrypted_name));
        }
    }

    /// For each file in `encrypted_ballots`: verify, decrypt with the
    /// supplied key, and write the plaintext to `decrypted_ballots`.
    /// Individual failures abort the call (spec.md §4.2.2).
    #[tracing::instrument(skip(self, decryption_key))]
    pub fn decrypt_ballots<D: KeyProvider>(&self, decryption_key: &D) -> Result<(), WorkflowError> {
        let dir = self.path(ENCRYPTED_DIR);
        let mut names: Vec<String> = fs::read_dir(&dir)
            .map_err(IoError::from)?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| ENCRYPTED_RE.is_match(name))
            .collect();
        names.sort();

        for name in names {
            let ciphertext = fs::read(dir.join(&name)).map_err(IoError::from)?;
            verify_integrity(&name, &ciphertext)?;
            let plaintext = decryption_key.decrypt(&ciphertext)?;
            let hash = md5_hex(&plaintext);
            let number = ballot_number(&name)
                .ok_or_else(|| IoError::Storage(format!("cannot parse ballot number from {name}")))?;
            let decrypted_name = ballot_filename(number, Stage::Decrypted, &hash, "json");
            write_canonical_bytes(&self.path(DECRYPTED_DIR).join(&decrypted_name), &plaintext)?;
        }
        tracing::info!("ballots decrypted");
        Ok(())
    }

    /// Read every file in `decrypted_ballots`, extract `preference`, and
    /// pass the resulting list to `alg`.
    #[tracing::instrument(skip(self, alg))]
    pub fn count_votes<T>(
        &self,
        alg: impl FnOnce(&[Vec<String>]) -> Result<T, vm_algo::AlgoError>,
    ) -> Result<T, WorkflowError> {
        let dir = self.path(DECRYPTED_DIR);
        let mut names: Vec<String> = fs::read_dir(&dir)
            .map_err(IoError::from)?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| DECRYPTED_RE.is_match(name))
            .collect();
        names.sort();

        let mut preferences = Vec::with_capacity(names.len());
        for name in names {
            let bytes = fs::read(dir.join(&name)).map_err(IoError::from)?;
            verify_integrity(&name, &bytes)?;
            let ballot: Ballot = serde_json::from_slice(&bytes).map_err(IoError::from)?;
            preferences.push(ballot.preference);
        }
        Ok(alg(&preferences)?)
    }
}

fn voter_code_for(voter_id: &str) -> VoterCode {
    md5_hex(voter_id.as_bytes())
        .parse()
        .expect("md5 digest is always 32 lowercase hex characters")
}
