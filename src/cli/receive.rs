//! Receiving side: publish a one-time key, then open the reply

use std::io::{self, Write};

use colored::Colorize;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::armor::{self, SECRET_TAG};
use crate::crypto::SecureBytes;
use crate::error::Result;
use crate::session::ReceiverSession;

use super::{
    is_quit, offer_clipboard, print_error, print_info, print_message, prompt_armored, Options,
};

pub fn run(options: &Options) -> Result<()> {
    print_info("Generating a one-time key pair...");
    let mut session = ReceiverSession::new()?;

    let armored_key = armor::format_public_key(session.public_key())?;
    let fingerprint = session.public_key().fingerprint()?;
    info!(%fingerprint, "receiver key ready");

    print_info("Here's your new public key:");
    print_message(&armored_key);
    println!();
    println!("{} {}", "Fingerprint:".dimmed(), fingerprint.dimmed());

    if offer_clipboard(options, &armored_key) {
        print_info("Copied to clipboard.");
    }

    let secret = loop {
        let input = prompt_armored(
            "Send the key above to the person who wants to share a secret with you. \
             When they reply with the encrypted secret, enter it here: ",
            SECRET_TAG,
        )?;

        if is_quit(&input) {
            print_message("Quitting secret-share");
            return Ok(());
        }

        match armor::parse_secret(&input).and_then(|envelope| session.decrypt(&envelope)) {
            Ok(secret) => break secret,
            Err(e) if e.is_upgrade_required() => print_error(&e.to_string()),
            Err(e) => {
                debug!(error = %e, "could not open pasted secret");
                print_error("Could not extract secret from input.");
                print_message(
                    "Ensure you are pasting the exact encrypted secret from the sender. \
                     It should be a string wrapped in tags like '<secret_share_secret>'.",
                );
            }
        }
    };

    // One exchange per key pair
    session.close();

    println!();
    write_secret(&mut io::stdout().lock(), &secret)?;

    Ok(())
}

/// Print the opened secret straight from its buffer, without an owned copy
fn write_secret<W: Write>(out: &mut W, secret: &SecureBytes) -> io::Result<()> {
    match secret.as_str() {
        Some(text) => writeln!(out, "{} {}", "✔ Here's your secret:".green(), text),
        None => {
            let shown = Zeroizing::new(String::from_utf8_lossy(secret).into_owned());
            writeln!(
                out,
                "{} {}",
                "✔ Here's your secret (not valid UTF-8, shown lossily):".green(),
                shown.as_str()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_secret_text() {
        let mut out = Vec::new();
        write_secret(&mut out, &SecureBytes::from(b"p@ssw0rd".to_vec())).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Here's your secret:"));
        assert!(printed.trim_end().ends_with("p@ssw0rd"));
    }

    #[test]
    fn test_write_secret_binary() {
        let mut out = Vec::new();
        write_secret(&mut out, &SecureBytes::from(vec![b'a', 0xFF, b'b'])).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("shown lossily"));
        assert!(printed.contains("a\u{FFFD}b"));
    }
}
