use crate::errors::CryptoError;

/// The cryptography collaborator `vm_workflow` is generic over. Mirrors the
/// external `HumanRSA`-style helper of the original workflow: one object
/// that can hand out PEM material, encrypt/decrypt, and sign/verify.
///
/// `Workflow` only ever calls the public-key half (`encrypt`, `public_pem`)
/// through its encryptor parameter and the private-key half (`sign`,
/// `private_pem`) through its signer parameter — `decrypt` is invoked
/// directly by callers of `decrypt_ballots`, not by `Workflow` itself.
pub trait KeyProvider: Sized {
    /// Generate a fresh keypair.
    fn generate() -> Result<Self, CryptoError>;

    /// Reconstruct a provider from PEM-encoded public and private keys.
    fn from_pem(public_pem: &[u8], private_pem: &[u8]) -> Result<Self, CryptoError>;

    fn public_pem(&self) -> Result<Vec<u8>, CryptoError>;
    fn private_pem(&self) -> Result<Vec<u8>, CryptoError>;

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;
}
