//! Sender and receiver roles of one secret exchange

use tracing::debug;

use crate::crypto::{self, KeyPair, PrivateKey, PublicKey, SecureBytes};
use crate::error::{Result, SecretShareError};

/// The party receiving a secret: owns a fresh key pair for one exchange
#[derive(Debug)]
pub struct ReceiverSession {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
}

impl ReceiverSession {
    /// Start an exchange with a newly generated key pair
    pub fn new() -> Result<Self> {
        let (private_key, public_key) = KeyPair::generate()?.into_parts();
        debug!("receiver session created");

        Ok(Self {
            private_key: Some(private_key),
            public_key,
        })
    }

    /// The key to hand to the sender
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Decrypt an envelope addressed to this session
    pub fn decrypt(&self, envelope: &[u8]) -> Result<SecureBytes> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(SecretShareError::Session("no private key"))?;

        crypto::decrypt(private_key, envelope)
    }

    /// End the exchange: the private key is wiped and later decrypts fail
    pub fn close(&mut self) {
        if self.private_key.take().is_some() {
            debug!("receiver session closed, private key dropped");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.private_key.is_none()
    }
}

/// The party sending a secret to the holder of `recipient`
#[derive(Debug, Clone, Default)]
pub struct SenderSession {
    recipient: Option<PublicKey>,
}

impl SenderSession {
    /// Accepts a `PublicKey` or `None`; never fails
    pub fn new(recipient: impl Into<Option<PublicKey>>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    pub fn recipient(&self) -> Option<&PublicKey> {
        self.recipient.as_ref()
    }

    /// Encrypt one secret; every call uses a fresh message key and nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let recipient = self
            .recipient
            .as_ref()
            .ok_or(SecretShareError::Session("no recipient key"))?;

        crypto::encrypt(recipient, plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_sender_exchange() {
        let receiver = ReceiverSession::new().unwrap();
        let sender = SenderSession::new(receiver.public_key().clone());

        let sealed = sender.encrypt(b"correct horse battery staple").unwrap();
        let opened = receiver.decrypt(&sealed).unwrap();

        assert_eq!(opened.as_str(), Some("correct horse battery staple"));
    }

    #[test]
    fn test_sender_without_recipient() {
        let sender = SenderSession::new(None);
        assert!(sender.recipient().is_none());

        match sender.encrypt(b"secret") {
            Err(SecretShareError::Session(msg)) => assert_eq!(msg, "no recipient key"),
            other => panic!("expected Session error, got {:?}", other),
        }

        assert!(SenderSession::default().encrypt(b"secret").is_err());
    }

    #[test]
    fn test_closed_receiver_cannot_decrypt() {
        let mut receiver = ReceiverSession::new().unwrap();
        let sealed = SenderSession::new(receiver.public_key().clone())
            .encrypt(b"one time")
            .unwrap();

        assert!(!receiver.is_closed());
        receiver.close();
        assert!(receiver.is_closed());

        match receiver.decrypt(&sealed) {
            Err(SecretShareError::Session(msg)) => assert_eq!(msg, "no private key"),
            other => panic!("expected Session error, got {:?}", other),
        }

        // Public half stays available for display
        assert_eq!(receiver.public_key().bits(), crypto::RSA_BITS);
    }

    #[test]
    fn test_sender_encrypts_many_secrets() {
        let receiver = ReceiverSession::new().unwrap();
        let sender = SenderSession::new(receiver.public_key().clone());

        let secrets: [&[u8]; 3] = [b"first", b"", b"third"];
        for secret in secrets {
            let sealed = sender.encrypt(secret).unwrap();
            assert_eq!(&*receiver.decrypt(&sealed).unwrap(), secret);
        }
    }
}
