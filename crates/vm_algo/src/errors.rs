use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlgoError {
    #[error("preference contains a repeated candidate: {0:?}")]
    InvalidPreference(Vec<String>),

    #[error("unsupported borda mode: {0:?}")]
    InvalidMode(String),
}
