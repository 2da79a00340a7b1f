//! PII redaction for log fields.
//!
//! Account emails and opaque credentials never reach logs in the clear; the
//! [`Redacted`] wrapper applies masking at format time.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9+/._-]{16,}={0,2}\b").unwrap()
});

/// Redacts sensitive information from a string.
///
/// Emails keep the first character of the local part and the full domain;
/// base64/JWT-like runs of 16+ characters collapse to `[REDACTED_TOKEN]`.
/// Emails are processed first so their domains are not mistaken for tokens.
pub fn redact(input: &str) -> String {
    let email_redacted = EMAIL_REGEX.replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                format!("{}***{}", &full_match[..1], &full_match[at_pos..])
            }
            Some(at_pos) => full_match[at_pos..].to_string(),
            None => full_match.to_string(),
        }
    });

    TOKEN_REGEX
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that automatically redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_emails() {
        assert_eq!(redact("coach@lions.test"), "c***@lions.test");
        assert_eq!(redact("a@y.z"), "a***@y.z");
        assert_eq!(
            redact("Contact coach@lions.test or admin@league.test"),
            "Contact c***@lions.test or a***@league.test"
        );
    }

    #[test]
    fn redacts_token_like_runs() {
        assert_eq!(
            redact("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "[REDACTED_TOKEN]"
        );
        // Short identifiers survive.
        assert_eq!(redact("sub-1234"), "sub-1234");
    }

    #[test]
    fn redacted_wrapper_masks_display_and_debug() {
        let wrapped = Redacted("coach@lions.test");
        assert_eq!(format!("{wrapped}"), "c***@lions.test");
        assert_eq!(format!("{wrapped:?}"), "c***@lions.test");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(redact("hello world"), "hello world");
        assert_eq!(redact(""), "");
    }
}
