//! Sending side: read the receiver's key, encrypt one secret for it

use colored::Colorize;
use tracing::debug;

use crate::armor::{self, KEY_TAG};
use crate::crypto::PublicKey;
use crate::error::Result;
use crate::session::SenderSession;

use super::{
    is_quit, offer_clipboard, print_error, print_info, print_message, print_success,
    prompt_armored, prompt_secret, Options,
};

/// Ask for the receiver's key until it parses; `None` means the operator quit
fn prompt_recipient() -> Result<Option<PublicKey>> {
    loop {
        let input = prompt_armored(
            "Enter the key from the other person. \
             It should be a string wrapped in <secret_share_key> tags: ",
            KEY_TAG,
        )?;

        if is_quit(&input) {
            return Ok(None);
        }

        match armor::parse_public_key(&input) {
            Ok(key) => return Ok(Some(key)),
            Err(e) if e.is_upgrade_required() => print_error(&e.to_string()),
            Err(e) => {
                debug!(error = %e, "could not parse pasted key");
                print_error("Could not extract public key from input.");
                print_message(
                    "Ensure you are pasting the exact key from the receiver. \
                     It should be a string wrapped in tags like '<secret_share_key>'.",
                );
            }
        }
    }
}

pub fn run(options: &Options) -> Result<()> {
    let Some(recipient) = prompt_recipient()? else {
        print_message("Quitting secret-share");
        return Ok(());
    };

    println!();
    println!(
        "{} {}",
        "Key fingerprint:".dimmed(),
        recipient.fingerprint()?.dimmed()
    );
    println!("{}", "Check it matches what the receiver sees if you can.".dimmed());

    let session = SenderSession::new(recipient);

    let secret = loop {
        let secret = prompt_secret("Enter the secret you want to share: ")?;
        if is_quit(&secret) {
            print_message("Quitting secret-share");
            return Ok(());
        }
        if secret.is_empty() {
            print_error("The secret is empty. Type it again (or 'q' to quit).");
            continue;
        }
        break secret;
    };

    let envelope = session.encrypt(secret.as_bytes())?;
    let armored = armor::format_secret(&envelope);

    print_success("Here's the secret encrypted so only they can decrypt it:");
    print_message(&armored);

    if offer_clipboard(options, &armored) {
        print_info(
            "Copied to clipboard. Send this secret back to the person who shared their key with you.",
        );
    } else {
        print_info("Send this secret back to the person who shared their key with you.");
    }

    Ok(())
}
