//! RSA key pair generation and public key exchange format
//!
//! The receiver generates a fresh pair for every exchange. Only the public
//! half ever leaves the process, encoded as DER SubjectPublicKeyInfo so it
//! interoperates with any X.509 tooling.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, SecretShareError};

/// Default modulus size in bits
pub const RSA_BITS: usize = 2048;

/// Smallest modulus accepted for generated or imported keys
pub const MIN_RSA_BITS: usize = 2048;

/// Largest modulus accepted; the DER importer refuses anything bigger
pub const MAX_RSA_BITS: usize = 4096;

/// Private half of a receiver key pair
///
/// The underlying key zeroizes its limbs when dropped.
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &(self.0.size() * 8))
            .field("data", &"[REDACTED]")
            .finish()
    }
}

/// Public half of a receiver key pair, safe to copy and publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    /// DER SubjectPublicKeyInfo encoding
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let document = self
            .0
            .to_public_key_der()
            .map_err(|e| SecretShareError::KeyFormat(e.to_string()))?;
        Ok(document.as_bytes().to_vec())
    }

    /// Parse a DER SubjectPublicKeyInfo holding an RSA key
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| SecretShareError::KeyFormat(e.to_string()))?;

        let key = Self(key);
        if key.bits() < MIN_RSA_BITS {
            return Err(SecretShareError::KeyFormat(format!(
                "{}-bit key is too weak (minimum {})",
                key.bits(),
                MIN_RSA_BITS
            )));
        }
        if key.bits() > MAX_RSA_BITS {
            return Err(SecretShareError::KeyFormat(format!(
                "{}-bit key is too large (maximum {})",
                key.bits(),
                MAX_RSA_BITS
            )));
        }
        Ok(key)
    }

    /// SHA-256 of the DER encoding, as colon-separated hex
    ///
    /// Both parties can read this aloud to confirm the key was not swapped
    /// in transit.
    pub fn fingerprint(&self) -> Result<String> {
        let digest = Sha256::digest(self.to_der()?);
        let pairs: Vec<String> = digest.iter().map(|b| hex::encode([*b])).collect();
        Ok(pairs.join(":"))
    }
}

/// An RSA key pair owned by one receiver session
#[derive(Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair with the default modulus size
    pub fn generate() -> Result<Self> {
        Self::generate_with_bits(RSA_BITS)
    }

    /// Generate a new random key pair with an explicit modulus size
    pub fn generate_with_bits(bits: usize) -> Result<Self> {
        if bits < MIN_RSA_BITS {
            return Err(SecretShareError::KeyGeneration(format!(
                "{}-bit modulus requested, minimum is {}",
                bits, MIN_RSA_BITS
            )));
        }
        if bits > MAX_RSA_BITS {
            return Err(SecretShareError::KeyGeneration(format!(
                "{}-bit modulus requested, maximum is {}",
                bits, MAX_RSA_BITS
            )));
        }

        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| SecretShareError::KeyGeneration(e.to_string()))?;
        let public = RsaPublicKey::from(&private);

        debug!(bits, "generated RSA key pair");

        Ok(Self {
            private: PrivateKey(private),
            public: PublicKey(public),
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Split into (private, public)
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private, self.public)
    }
}

/// Generate a new key pair with the default modulus size
pub fn generate_keypair() -> Result<KeyPair> {
    KeyPair::generate()
}

/// Export a public key to its transport bytes
pub fn export_public(key: &PublicKey) -> Result<Vec<u8>> {
    key.to_der()
}

/// Import a public key from its transport bytes
pub fn import_public(der: &[u8]) -> Result<PublicKey> {
    PublicKey::from_der(der)
}
