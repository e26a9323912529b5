//! secret-share - one-time secret sharing over untrusted text channels
//!
//! This crate lets two people exchange a single secret through chat or
//! email without a pre-shared key:
//! - The receiver generates a fresh RSA key pair and publishes the public half
//! - The sender wraps a random AES-256 key under it (RSA-OAEP) and seals the
//!   secret with AES-256-GCM inside a versioned `ssv1` envelope
//! - Both artifacts travel as tagged Base64 text that survives copy and paste
//! - Private keys and decrypted secrets are wiped from memory when dropped

pub mod armor;
pub mod cli;
pub mod crypto;
pub mod error;
pub mod session;

pub use error::{Result, SecretShareError};
pub use session::{ReceiverSession, SenderSession};
