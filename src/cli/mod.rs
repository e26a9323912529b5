//! Interactive commands and terminal helpers

pub mod clipboard;
pub mod receive;
pub mod send;

use std::io::{self, BufRead, Write};

use colored::Colorize;
use zeroize::Zeroizing;

use crate::error::{Result, SecretShareError};

pub const TITLE_CARD: &str = r"
           ▄▖        ▗ ▄▖▌
           ▚ █▌▛▘▛▘█▌▜▘▚ ▛▌▀▌▛▘█▌
           ▄▌▙▖▙▖▌ ▙▖▐▖▄▌▌▌█▌▌ ▙▖

      Secure One Time Secret Sharing";

/// Settings shared by the send and receive flows
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Copy armored output to the system clipboard
    pub clipboard: bool,
}

/// Which side of the exchange the operator is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

/// Words that abort the current prompt
pub fn is_quit(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "q" | "quit" | "[q]" | "exit"
    )
}

pub fn parse_role(input: &str) -> Option<Role> {
    match input.trim().to_lowercase().as_str() {
        "s" | "[s]" | "send" | "sender" => Some(Role::Sender),
        "r" | "[r]" | "receive" | "receiver" | "recv" => Some(Role::Receiver),
        _ => None,
    }
}

pub fn print_header(message: &str) {
    println!("{}", message.cyan().bold());
}

pub fn print_message(message: &str) {
    println!();
    println!("{}", message);
}

pub fn print_info(message: &str) {
    println!();
    println!("{}", format!("ℹ {}", message).yellow());
}

pub fn print_success(message: &str) {
    println!();
    println!("{}", format!("✔ {}", message).green());
}

pub fn print_error(message: &str) {
    println!();
    println!("{} {}", "✖ Error:".red().bold(), message.red());
}

fn show_prompt(prompt: &str) -> Result<()> {
    println!();
    print!("{}", format!("❯ {}", prompt).green());
    io::stdout().flush()?;
    Ok(())
}

/// Read pasted armor, following it across line breaks until the tag closes
///
/// Reading stops after a single line unless that line opened `<tag>`
/// without closing it; then it continues to the first line holding `</`
/// or an empty line.
pub fn read_armored<R: BufRead>(reader: &mut R, tag: &str) -> Result<String> {
    let open = format!("<{}>", tag);
    let mut collected = String::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            if collected.trim().is_empty() {
                return Err(SecretShareError::Cancelled);
            }
            break;
        }

        let blank = line.trim().is_empty();
        collected.push_str(&line);

        let unterminated = collected.contains(&open) && !collected.contains("</");
        if !unterminated || blank {
            break;
        }
    }

    Ok(collected.trim().to_string())
}

/// Prompt for armored text on stdin
pub fn prompt_armored(prompt: &str, tag: &str) -> Result<String> {
    show_prompt(prompt)?;
    read_armored(&mut io::stdin().lock(), tag)
}

/// Prompt for a short answer on stdin
pub fn prompt_line(prompt: &str) -> Result<String> {
    show_prompt(prompt)?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(SecretShareError::Cancelled);
    }
    Ok(input.trim().to_string())
}

/// Prompt for a secret without echoing it
pub fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    println!();
    let secret = rpassword::prompt_password(format!("❯ {}", prompt).green().to_string())?;
    Ok(Zeroizing::new(secret))
}

/// Ask until the operator names a role; `None` means they quit
pub fn prompt_role() -> Result<Option<Role>> {
    loop {
        let input = prompt_line("Are you [s]ending or [r]eceiving a secret? ")?;
        if is_quit(&input) {
            return Ok(None);
        }

        match parse_role(&input) {
            Some(role) => return Ok(Some(role)),
            None => print_error(
                "Invalid input. Please enter 's' for sending or 'r' for receiving (or 'q' to quit).",
            ),
        }
    }
}

/// Best-effort copy; failure only changes the message shown
pub fn offer_clipboard(options: &Options, text: &str) -> bool {
    if !options.clipboard {
        return false;
    }

    match clipboard::set_clipboard(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "clipboard unavailable");
            false
        }
    }
}
