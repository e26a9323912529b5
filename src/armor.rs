//! Text armor for pasting keys and secrets through chat or email
//!
//! Keys travel as `<secret_share_key>ssv1BASE64</secret_share_key>` and
//! encrypted secrets as `<secret_share_secret>BASE64</secret_share_secret>`.
//! Reading is forgiving: people paste with surrounding chatter, drop an
//! angle bracket, or lose part of a tag.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::{import_public, PublicKey, VERSION_FAMILY, VERSION_TAG};
use crate::error::{Result, SecretShareError};

pub const KEY_TAG: &str = "secret_share_key";
pub const SECRET_TAG: &str = "secret_share_secret";

fn wrap(tag: &str, body: &str) -> String {
    format!("<{tag}>{body}</{tag}>")
}

/// Armor a public key for display; the Base64 body carries the version tag
pub fn format_public_key(key: &PublicKey) -> Result<String> {
    let der = key.to_der()?;
    let version = String::from_utf8_lossy(VERSION_TAG);
    Ok(wrap(KEY_TAG, &format!("{}{}", version, STANDARD.encode(der))))
}

/// Armor an encrypted envelope for display
pub fn format_secret(envelope: &[u8]) -> String {
    wrap(SECRET_TAG, &STANDARD.encode(envelope))
}

/// Pull the content out of a (possibly damaged) `<tag>...</tag>` pair
pub fn extract_tag_content<'a>(input: &'a str, tag: &str) -> &'a str {
    let mut s = input.trim();

    // Plain content, nothing to strip
    if !s.contains(['<', '>']) {
        return s;
    }

    let open = format!("<{tag}>");
    let open_unclosed = format!("<{tag}");
    let close = format!("</{tag}>");
    let close_unopened = format!("/{tag}");

    // Tail
    let first_gt = s.find('>');
    let tail = s
        .find(&close)
        .or_else(|| s.find("</"))
        .or_else(|| s.find(&close_unopened))
        .or_else(|| match (s.rfind('<'), first_gt) {
            (Some(lt), Some(gt)) if lt > gt => Some(lt),
            _ => None,
        });
    if let Some(end) = tail {
        s = &s[..end];
    }

    // Head: opening tag, then first `>`, then a bare `<tag`
    if let Some(start) = s.find(&open) {
        s = &s[start + open.len()..];
    } else if let Some(gt) = s.find('>') {
        s = &s[gt + 1..];
    } else if let Some(start) = s.find(&open_unclosed) {
        s = &s[start + open_unclosed.len()..];
    }

    s.trim()
}

/// Base64-decode, tolerating line breaks and spaces added by the channel
fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(SecretShareError::MissingContent);
    }
    Ok(STANDARD.decode(compact)?)
}

/// Parse a pasted, armored public key
pub fn parse_public_key(input: &str) -> Result<PublicKey> {
    let content = extract_tag_content(input, KEY_TAG);
    if content.is_empty() {
        return Err(SecretShareError::MissingContent);
    }

    let body = if content.as_bytes().starts_with(VERSION_TAG) {
        &content[VERSION_TAG.len()..]
    } else if content.as_bytes().starts_with(VERSION_FAMILY) {
        let tag: String = content.chars().take(VERSION_TAG.len()).collect();
        return Err(SecretShareError::UnsupportedVersion(tag));
    } else {
        return Err(SecretShareError::KeyFormat(
            "missing version tag, expected the key to start with ssv1".into(),
        ));
    };

    import_public(&decode_base64(body)?)
}

/// Parse a pasted, armored encrypted secret into envelope bytes
pub fn parse_secret(input: &str) -> Result<Vec<u8>> {
    decode_base64(extract_tag_content(input, SECRET_TAG))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ReceiverSession, SenderSession};

    fn key(input: &str) -> &str {
        extract_tag_content(input, KEY_TAG)
    }

    fn secret(input: &str) -> &str {
        extract_tag_content(input, SECRET_TAG)
    }

    #[test]
    fn test_format_secret() {
        assert_eq!(format_secret(b"hi"), "<secret_share_secret>aGk=</secret_share_secret>");
        assert_eq!(format_secret(b""), "<secret_share_secret></secret_share_secret>");
    }

    #[test]
    fn test_extract_well_formed() {
        assert_eq!(key("<secret_share_key>TEST_KEY_CONTENT</secret_share_key>"), "TEST_KEY_CONTENT");
        assert_eq!(
            secret("<secret_share_secret>TEST_SECRET_CONTENT</secret_share_secret>"),
            "TEST_SECRET_CONTENT"
        );
    }

    #[test]
    fn test_extract_plain_content() {
        assert_eq!(key("TEST_KEY_CONTENT"), "TEST_KEY_CONTENT");
        assert_eq!(secret("  TEST_SECRET_CONTENT \n"), "TEST_SECRET_CONTENT");
        assert_eq!(key(""), "");
        assert_eq!(key("   "), "");
    }

    #[test]
    fn test_extract_missing_brackets() {
        let cases = [
            "secret_share_key>TEST_KEY_CONTENT</secret_share_key>",
            "<secret_share_key>TEST_KEY_CONTENT</secret_share_key",
            "secret_share_key>TEST_KEY_CONTENT</secret_share_key",
            "<secret_share_keyTEST_KEY_CONTENT</secret_share_key>",
            "<secret_share_key>TEST_KEY_CONTENT/secret_share_key>",
        ];
        for case in cases {
            assert_eq!(key(case), "TEST_KEY_CONTENT", "input: {}", case);
        }

        assert_eq!(
            secret("secret_share_secret>TEST_SECRET_CONTENT<secret_share_secret"),
            "TEST_SECRET_CONTENT"
        );
    }

    #[test]
    fn test_extract_surrounding_text() {
        assert_eq!(
            key("  <secret_share_key>  TEST_KEY_CONTENT  </secret_share_key>  "),
            "TEST_KEY_CONTENT"
        );
        assert_eq!(
            key("Some extra data <secret_share_key>TEST_KEY_CONTENT</secret_share_key> More extra data"),
            "TEST_KEY_CONTENT"
        );
        assert_eq!(
            secret("Extra stuff <secret_share_secret>TEST_SECRET_CONTENT</secret_share_secret> Even more stuff"),
            "TEST_SECRET_CONTENT"
        );
        assert_eq!(
            key("Extra data secret_share_key>TEST_KEY_CONTENT</secret_share_key More data"),
            "TEST_KEY_CONTENT"
        );
    }

    #[test]
    fn test_extract_partial_tags() {
        let cases = [
            "cret_share_key>TEST_KEY_CONTENT</secret_share_key>",
            "<secret_share_key>TEST_KEY_CONTENT</secret_share_sec",
            "cret_share_key>TEST_KEY_CONTENT</secret_share_sec",
            "<secret_share_key>TEST_KEY_CONTENT</secret_share>",
        ];
        for case in cases {
            assert_eq!(key(case), "TEST_KEY_CONTENT", "input: {}", case);
        }
    }

    #[test]
    fn test_extract_head_prefers_bracket_over_bare_tag() {
        // Stray space keeps the opening tag from matching; cut after its `>`
        assert_eq!(
            key("<secret_share_key >TEST_KEY_CONTENT</secret_share_key>"),
            "TEST_KEY_CONTENT"
        );
        assert_eq!(
            key("<secret_share_key x>TEST_KEY_CONTENT</secret_share_key>"),
            "TEST_KEY_CONTENT"
        );
    }

    #[test]
    fn test_parse_secret() {
        let armored = format_secret(b"\x00\x01envelope");
        assert_eq!(parse_secret(&armored).unwrap(), b"\x00\x01envelope");

        // Line-wrapped by a mail client
        let wrapped = "<secret_share_secret>AAFl\nbnZl bG9w\r\nZQ==</secret_share_secret>";
        assert_eq!(parse_secret(wrapped).unwrap(), b"\x00\x01envelope");
    }

    #[test]
    fn test_parse_secret_errors() {
        assert!(matches!(
            parse_secret("<secret_share_secret></secret_share_secret>"),
            Err(SecretShareError::MissingContent)
        ));
        assert!(matches!(
            parse_secret("<secret_share_secret>not*base64</secret_share_secret>"),
            Err(SecretShareError::Base64(_))
        ));
    }

    #[test]
    fn test_public_key_version_gate() {
        assert!(matches!(
            parse_public_key("<secret_share_key>ssv2AAAA</secret_share_key>"),
            Err(SecretShareError::UnsupportedVersion(tag)) if tag == "ssv2"
        ));
        assert!(matches!(
            parse_public_key("<secret_share_key>MIIBIjAN</secret_share_key>"),
            Err(SecretShareError::KeyFormat(_))
        ));
        assert!(matches!(
            parse_public_key("<secret_share_key></secret_share_key>"),
            Err(SecretShareError::MissingContent)
        ));
        assert!(matches!(
            parse_public_key("<secret_share_key>ssv1</secret_share_key>"),
            Err(SecretShareError::MissingContent)
        ));
    }

    #[test]
    fn test_full_exchange_through_text() {
        let receiver = ReceiverSession::new().unwrap();
        let key_text = format_public_key(receiver.public_key()).unwrap();
        assert!(key_text.starts_with("<secret_share_key>ssv1MII"));

        // Sender pastes the key with some chat noise around it
        let pasted = format!("here you go: {key_text} thanks");
        let recipient = parse_public_key(&pasted).unwrap();
        assert_eq!(&recipient, receiver.public_key());

        let secret_text = format_secret(&SenderSession::new(recipient).encrypt(b"p@ssw0rd").unwrap());
        let opened = receiver.decrypt(&parse_secret(&secret_text).unwrap()).unwrap();

        assert_eq!(opened.as_str(), Some("p@ssw0rd"));
    }
}
