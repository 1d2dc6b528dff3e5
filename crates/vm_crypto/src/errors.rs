use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGen(String),

    #[error("PEM (de)serialization failed: {0}")]
    Pem(String),

    #[error("encryption failed: {0}")]
    Encrypt(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("signing failed: {0}")]
    Sign(String),

    #[error("signature verification failed: {0}")]
    Verify(String),
}
