use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecretShareError>;

#[derive(Debug, Error)]
pub enum SecretShareError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid public key: {0}")]
    KeyFormat(String),

    #[error("Invalid encrypted data format: {0}")]
    MalformedEnvelope(&'static str),

    #[error("This data was produced by a newer version of secret-share (format '{0}') - please upgrade")]
    UnsupportedVersion(String),

    #[error("Could not recover the message key: wrong key pair or corrupted data")]
    KeyUnwrap,

    #[error("Decryption failed: data was tampered with or encrypted for someone else")]
    Authentication,

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Session error: {0}")]
    Session(&'static str),

    #[error("Nothing found between the tags")]
    MissingContent,

    #[error("Invalid Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SecretShareError {
    /// True when the input came from a newer, incompatible release
    pub fn is_upgrade_required(&self) -> bool {
        matches!(self, Self::UnsupportedVersion(_))
    }
}
