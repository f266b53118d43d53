//! Inbound field sanitization.
//!
//! Truncation is character-based, so multi-byte text is never cut mid code
//! point.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum stored user-agent length, in characters.
pub const MAX_USER_AGENT_CHARS: usize = 180;

/// Maximum stored token length, in characters.
pub const MAX_TOKEN_CHARS: usize = 100;

/// Placeholder stored when the user-agent header was absent.
pub const ABSENT_USER_AGENT: &str = "-";

/// Everything a filtered token is not allowed to contain.
static TOKEN_REJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\-._ ]").unwrap());

/// Truncate to at most `max` characters without splitting a code point.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Normalize a user-agent header value.
///
/// Present values are truncated to [`MAX_USER_AGENT_CHARS`]; an absent
/// header becomes [`ABSENT_USER_AGENT`]. An empty header stays empty.
pub fn clean_user_agent(raw: Option<&str>) -> String {
    match raw {
        Some(ua) => truncate_chars(ua, MAX_USER_AGENT_CHARS).to_string(),
        None => ABSENT_USER_AGENT.to_string(),
    }
}

/// Clean a single-token credential under the filtering policy: trim,
/// truncate to [`MAX_TOKEN_CHARS`], then strip every character outside
/// `[A-Za-z0-9\-._ ]`. Truncation runs before the strip, so the stored
/// value can be shorter than the cap but never longer.
pub fn filter_token(raw: &str) -> String {
    let trimmed = truncate_chars(raw.trim(), MAX_TOKEN_CHARS);
    TOKEN_REJECT.replace_all(trimmed, "").into_owned()
}
