//! Versioned wire envelope for one encrypted secret
//!
//! Layout:
//! [4 bytes: version tag "ssv1"]
//! [4 bytes: wrapped key length (u32 BE)]
//! [N bytes: wrapped key]
//! [12 bytes: nonce]
//! [M bytes: ciphertext + authentication tag]

use crate::error::{Result, SecretShareError};

/// Version tag written by this release
pub const VERSION_TAG: &[u8; VERSION_LEN] = b"ssv1";

/// Prefix shared by every version tag of this format family
pub const VERSION_FAMILY: &[u8; 3] = b"ssv";

pub const VERSION_LEN: usize = 4;

/// Size of the wrapped key length field
pub const LENGTH_FIELD_LEN: usize = 4;

/// AEAD nonce length (96 bits)
pub const NONCE_LEN: usize = 12;

/// Smallest possible envelope: header, empty wrapped key, nonce
pub const MIN_ENVELOPE_LEN: usize = VERSION_LEN + LENGTH_FIELD_LEN + NONCE_LEN;

/// A decoded envelope borrowing from the input buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<'a> {
    pub version: [u8; VERSION_LEN],
    pub wrapped_key: &'a [u8],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
}

/// Append `value` as a 4-byte big-endian integer
fn put_u32_be(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Split a 4-byte big-endian integer off the front of `bytes`
fn take_u32_be(bytes: &[u8]) -> Option<(u32, &[u8])> {
    if bytes.len() < LENGTH_FIELD_LEN {
        return None;
    }
    let (field, rest) = bytes.split_at(LENGTH_FIELD_LEN);
    let field: [u8; LENGTH_FIELD_LEN] = field.try_into().ok()?;
    Some((u32::from_be_bytes(field), rest))
}

/// Serialize the envelope fields
///
/// # Panics
/// If `wrapped_key` is longer than `u32::MAX` bytes, which no supported
/// asymmetric scheme can produce.
pub fn encode(
    version: &[u8; VERSION_LEN],
    wrapped_key: &[u8],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    assert!(
        wrapped_key.len() <= u32::MAX as usize,
        "wrapped key does not fit the length field"
    );

    let mut out = Vec::with_capacity(MIN_ENVELOPE_LEN + wrapped_key.len() + ciphertext.len());
    out.extend_from_slice(version);
    put_u32_be(&mut out, wrapped_key.len() as u32);
    out.extend_from_slice(wrapped_key);
    out.extend_from_slice(nonce);
    out.extend_from_slice(ciphertext);
    out
}

/// Parse an envelope, validating every length before slicing
pub fn decode(bytes: &[u8]) -> Result<Envelope<'_>> {
    if bytes.len() < VERSION_LEN {
        return Err(SecretShareError::MalformedEnvelope("too short for a version tag"));
    }
    let (tag, rest) = bytes.split_at(VERSION_LEN);

    if tag != VERSION_TAG {
        if tag.starts_with(VERSION_FAMILY) {
            return Err(SecretShareError::UnsupportedVersion(
                String::from_utf8_lossy(tag).into_owned(),
            ));
        }
        return Err(SecretShareError::MalformedEnvelope("unknown version tag"));
    }

    let (key_len, rest) = take_u32_be(rest)
        .ok_or(SecretShareError::MalformedEnvelope("missing wrapped key length"))?;

    let key_len = usize::try_from(key_len)
        .map_err(|_| SecretShareError::MalformedEnvelope("wrapped key length out of range"))?;
    let needed = key_len
        .checked_add(NONCE_LEN)
        .ok_or(SecretShareError::MalformedEnvelope("wrapped key length out of range"))?;
    if rest.len() < needed {
        return Err(SecretShareError::MalformedEnvelope(
            "wrapped key length exceeds envelope size",
        ));
    }

    let (wrapped_key, rest) = rest.split_at(key_len);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let mut version = [0u8; VERSION_LEN];
    version.copy_from_slice(tag);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(nonce);

    Ok(Envelope {
        version,
        wrapped_key,
        nonce: nonce_bytes,
        ciphertext,
    })
}
