// Path: crates/jam-crypto/src/ed25519.rs
//! Ed25519 signing and verification, used for dispute judgments, culprits,
//! and faults (spec §3, §4.3).

use crate::error::CryptoError;
use dcrypt::sign::eddsa;

/// An Ed25519 key pair.
#[derive(Clone)]
pub struct Ed25519KeyPair {
    public_key: eddsa::Ed25519PublicKey,
    secret_key: eddsa::Ed25519SecretKey,
}

impl Ed25519KeyPair {
    /// Generates a fresh key pair from OS randomness.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::rngs::OsRng;
        let (public_key, secret_key) = eddsa::Ed25519::keypair(&mut rng)
            .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
        Ok(Self { public_key, secret_key })
    }

    /// Reconstructs a key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, CryptoError> {
        let secret_key = eddsa::Ed25519SecretKey::from_seed(seed)
            .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
        let public_key = secret_key
            .public_key()
            .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
        Ok(Self { public_key, secret_key })
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        let bytes = self.public_key.to_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(bytes.as_ref());
        out
    }

    /// Signs `message`, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; 64], CryptoError> {
        let signature = eddsa::Ed25519::sign(message, &self.secret_key)
            .map_err(|e| CryptoError::OperationFailed(format!("{e:?}")))?;
        let bytes = signature.to_bytes();
        let mut out = [0u8; 64];
        out.copy_from_slice(bytes.as_ref());
        Ok(out)
    }
}

/// Verifies a raw 64-byte Ed25519 signature against a raw 32-byte public key.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> Result<(), CryptoError> {
    let key = eddsa::Ed25519PublicKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidKey(format!("{e:?}")))?;
    let sig = eddsa::Ed25519Signature::from_bytes(signature)
        .map_err(|e| CryptoError::InvalidSignature(format!("{e:?}")))?;
    eddsa::Ed25519::verify(message, &sig, &key).map_err(|_| CryptoError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_sign_and_verify() {
        let pair = Ed25519KeyPair::from_seed(&[7u8; 32]).expect("key pair from seed");
        let message = b"jam_valid\x01\x02\x03";
        let signature = pair.sign(message).expect("sign");
        let public = pair.public_key_bytes();
        assert!(verify(&public, message, &signature).is_ok());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let pair = Ed25519KeyPair::from_seed(&[9u8; 32]).expect("key pair from seed");
        let signature = pair.sign(b"jam_valid_target").expect("sign");
        let public = pair.public_key_bytes();
        assert!(verify(&public, b"jam_invalid_target", &signature).is_err());
    }

    #[test]
    fn same_seed_derives_same_public_key() {
        let a = Ed25519KeyPair::from_seed(&[3u8; 32]).expect("key pair a");
        let b = Ed25519KeyPair::from_seed(&[3u8; 32]).expect("key pair b");
        assert_eq!(a.public_key_bytes(), b.public_key_bytes());
    }
}
