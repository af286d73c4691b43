use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[allow(clippy::unwrap_used)]
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z0-9._%+-]+)(@[A-Za-z0-9.-]+\.[A-Za-z]{1,})\b").unwrap());

/// Three base64url segments separated by dots: a compact JWS.
#[allow(clippy::unwrap_used)]
static JWT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

/// Mask emails (first character of the local part, then `***`, full domain)
/// and session tokens before they reach a log line.
pub fn redact(input: &str) -> String {
    let tokens_masked = JWT.replace_all(input, "[REDACTED_TOKEN]");
    EMAIL
        .replace_all(&tokens_masked, |caps: &Captures| {
            let first = caps[1].chars().next().map(String::from).unwrap_or_default();
            format!("{first}***{}", &caps[2])
        })
        .into_owned()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
