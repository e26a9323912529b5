//! Cryptographic core of secret-share
//!
//! This module provides:
//! - RSA key pairs for the receiver, exchanged as DER SubjectPublicKeyInfo
//! - The versioned `ssv1` wire envelope
//! - Hybrid encryption: RSA-OAEP(SHA-256) key wrapping + AES-256-GCM
//! - Secure memory handling with automatic zeroing

pub mod envelope;
pub mod hybrid;
mod keys;
mod secure_bytes;

pub use envelope::{Envelope, NONCE_LEN, VERSION_FAMILY, VERSION_TAG};
pub use hybrid::{decrypt, encrypt, KEY_LEN, TAG_LEN};
pub use keys::{
    export_public, generate_keypair, import_public, KeyPair, PrivateKey, PublicKey, MAX_RSA_BITS,
    MIN_RSA_BITS, RSA_BITS,
};
pub use secure_bytes::SecureBytes;
