use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workdir is already set up")]
    AlreadySetUp,

    #[error("voter is not registered")]
    NotRegistered,

    #[error("voter has already voted")]
    AlreadyVoted,

    #[error("no blank ballots available")]
    NoBallotsAvailable,

    /// An on-disk hash mismatch (spec.md §7 `IntegrityError`) — always
    /// fatal at the call level, kept distinct from [`WorkflowError::Storage`]
    /// so callers can tell a corrupt file apart from a plain I/O failure.
    #[error("integrity check failed for {name}: expected hash {expected}, got {actual}")]
    Integrity {
        name: String,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Storage(vm_io::IoError),

    #[error(transparent)]
    Crypto(#[from] vm_crypto::CryptoError),

    #[error(transparent)]
    Algo(#[from] vm_algo::AlgoError),
}

impl From<vm_io::IoError> for WorkflowError {
    fn from(err: vm_io::IoError) -> Self {
        match err {
            vm_io::IoError::Integrity { name, expected, actual } => {
                WorkflowError::Integrity { name, expected, actual }
            }
            other => WorkflowError::Storage(other),
        }
    }
}
