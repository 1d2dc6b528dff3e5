//! The one concrete `KeyProvider`: RSA-2048 with OAEP(SHA-256) encryption
//! and PSS(SHA-256) signatures, PKCS#8 PEM for key material. This is what
//! lets `vm_workflow`'s cast-vote transaction be exercised end to end
//! without a real HSM or external key service standing in.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};

use crate::errors::CryptoError;
use crate::provider::KeyProvider;

const KEY_BITS: usize = 2048;

#[derive(Clone)]
pub struct RsaKeyProvider {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl RsaKeyProvider {
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }
}

impl KeyProvider for RsaKeyProvider {
    fn generate() -> Result<Self, CryptoError> {
        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, KEY_BITS)
            .map_err(|e| CryptoError::KeyGen(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(Self { private_key, public_key })
    }

    fn from_pem(public_pem: &[u8], private_pem: &[u8]) -> Result<Self, CryptoError> {
        let public_str = std::str::from_utf8(public_pem).map_err(|e| CryptoError::Pem(e.to_string()))?;
        let private_str =
            std::str::from_utf8(private_pem).map_err(|e| CryptoError::Pem(e.to_string()))?;
        let public_key =
            RsaPublicKey::from_public_key_pem(public_str).map_err(|e| CryptoError::Pem(e.to_string()))?;
        let private_key = RsaPrivateKey::from_pkcs8_pem(private_str)
            .map_err(|e| CryptoError::Pem(e.to_string()))?;
        Ok(Self { private_key, public_key })
    }

    fn public_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map(|s| s.into_bytes())
            .map_err(|e| CryptoError::Pem(e.to_string()))
    }

    fn private_pem(&self) -> Result<Vec<u8>, CryptoError> {
        self.private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map(|zeroizing| zeroizing.as_bytes().to_vec())
            .map_err(|e| CryptoError::Pem(e.to_string()))
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut rng = OsRng;
        self.public_key
            .encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| CryptoError::Encrypt(e.to_string()))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.private_key
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|e| CryptoError::Decrypt(e.to_string()))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut rng = OsRng;
        let signing_key = rsa::pss::SigningKey::<Sha256>::new(self.private_key.clone());
        let signature = signing_key.try_sign_with_rng(&mut rng, message).map_err(|e| CryptoError::Sign(e.to_string()))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let verifying_key = rsa::pss::VerifyingKey::<Sha256>::new(self.public_key.clone());
        let signature = rsa::pss::Signature::try_from(signature)
            .map_err(|e| CryptoError::Verify(e.to_string()))?;
        Ok(verifying_key.verify(message, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_encrypt_decrypt() {
        let provider = RsaKeyProvider::generate().unwrap();
        let plaintext = b"ballot preference payload";
        let ciphertext = provider.encrypt(plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        let decrypted = provider.decrypt(&ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn round_trips_sign_verify() {
        let provider = RsaKeyProvider::generate().unwrap();
        let message = b"serialized ciphertext bytes";
        let signature = provider.sign(message).unwrap();
        assert!(provider.verify(message, &signature).unwrap());
        assert!(!provider.verify(b"tampered", &signature).unwrap());
    }

    #[test]
    fn round_trips_through_pem() {
        let original = RsaKeyProvider::generate().unwrap();
        let public_pem = original.public_pem().unwrap();
        let private_pem = original.private_pem().unwrap();
        let restored = RsaKeyProvider::from_pem(&public_pem, &private_pem).unwrap();

        let plaintext = b"round trip through pem";
        let ciphertext = original.encrypt(plaintext).unwrap();
        assert_eq!(restored.decrypt(&ciphertext).unwrap(), plaintext);
    }
}
