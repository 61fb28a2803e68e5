//! Secret redaction for logged command lines.

use regex::Regex;
use std::borrow::Cow;

/// Replacement text for hidden secrets.
pub const REDACTED: &str = "REDACTED";

/// Hides the secret part of every match of `pattern` in `text`.
///
/// Capture groups 1 and 2 are kept and everything between them is replaced
/// with [`REDACTED`]. A pattern without two groups hides the whole match.
pub fn redact<'a>(pattern: &Regex, text: &'a str) -> Cow<'a, str> {
    pattern.replace_all(text, |caps: &regex::Captures<'_>| {
        match (caps.get(1), caps.get(2)) {
            (Some(head), Some(tail)) => format!("{}{REDACTED}{}", head.as_str(), tail.as_str()),
            (Some(head), None) => format!("{}{REDACTED}", head.as_str()),
            _ => REDACTED.to_string(),
        }
    })
}

/// Replaces every `prefix` + `secret` token in `text` with `prefix` +
/// [`REDACTED`].
///
/// Catches secrets the pattern misses, e.g. after a user name outside `\w`
/// or a password spanning lines. An empty `secret` leaves `text` unchanged.
pub fn mask_token<'a>(text: &'a str, prefix: &str, secret: &str) -> Cow<'a, str> {
    if secret.is_empty() {
        return Cow::Borrowed(text);
    }
    let token = format!("{prefix}{secret}");
    if text.contains(&token) {
        Cow::Owned(text.replace(&token, &format!("{prefix}{REDACTED}")))
    } else {
        Cow::Borrowed(text)
    }
}
