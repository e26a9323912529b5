//! Hybrid encryption: RSA-OAEP key wrapping + AES-256-GCM
//!
//! Every message gets its own random AES key and nonce. The AES key is
//! wrapped under the recipient's RSA key (OAEP, SHA-256 for both the hash
//! and MGF1, empty label) and the secret itself is sealed with AES-256-GCM
//! without associated data. The result is framed by [`super::envelope`].
//!
//! Output: `[ssv1][key_len:4][wrapped_key][nonce:12][ciphertext][tag:16]`

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::Oaep;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use super::envelope::{self, NONCE_LEN, VERSION_TAG};
use super::keys::{PrivateKey, PublicKey};
use super::SecureBytes;
use crate::error::{Result, SecretShareError};

/// Message key length (256 bits)
pub const KEY_LEN: usize = 32;

/// Authentication tag length (128 bits)
pub const TAG_LEN: usize = 16;

fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| SecretShareError::Encryption(format!("random source unavailable: {}", e)))
}

/// Encrypt `plaintext` so only the holder of the matching private key can read it
pub fn encrypt(public_key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    fill_random(&mut key[..])?;

    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;

    let wrapped_key = public_key
        .as_rsa()
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &key[..])
        .map_err(|e| SecretShareError::Encryption(format!("key wrapping failed: {}", e)))?;

    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| SecretShareError::Encryption(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| SecretShareError::Encryption(e.to_string()))?;

    let sealed = envelope::encode(VERSION_TAG, &wrapped_key, &nonce, &ciphertext);

    debug!(
        plaintext_len = plaintext.len(),
        wrapped_key_len = wrapped_key.len(),
        envelope_len = sealed.len(),
        "sealed envelope"
    );

    Ok(sealed)
}

/// Decrypt an envelope produced by [`encrypt`]
///
/// # Errors
/// - `UnsupportedVersion` / `MalformedEnvelope` if the framing is wrong
/// - `KeyUnwrap` if the message key cannot be recovered with `private_key`
/// - `Authentication` if the ciphertext or nonce fails verification
pub fn decrypt(private_key: &PrivateKey, data: &[u8]) -> Result<SecureBytes> {
    let envelope = envelope::decode(data)?;

    debug!(
        wrapped_key_len = envelope.wrapped_key.len(),
        ciphertext_len = envelope.ciphertext.len(),
        "opening envelope"
    );

    let key = Zeroizing::new(
        private_key
            .as_rsa()
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), envelope.wrapped_key)
            .map_err(|_| SecretShareError::KeyUnwrap)?,
    );

    if key.len() != KEY_LEN {
        return Err(SecretShareError::KeyUnwrap);
    }

    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| SecretShareError::KeyUnwrap)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), envelope.ciphertext)
        .map_err(|_| SecretShareError::Authentication)?;

    Ok(SecureBytes::new(plaintext))
}
