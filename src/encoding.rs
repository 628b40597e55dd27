//! Header encoding helpers
//!
//! Arbitrary UTF-8 text placed in a header value (Subject, From display name)
//! is wrapped in a MIME encoded-word with a Base64 payload.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Local};

/// Wrap UTF-8 text in a MIME encoded-word (`=?UTF-8?B?...?=`).
///
/// # Examples
///
/// ```
/// use mailflow::encoded_word;
///
/// assert_eq!(encoded_word("Hi"), "=?UTF-8?B?SGk=?=");
/// ```
pub fn encoded_word(text: &str) -> String {
	format!("=?UTF-8?B?{}?=", STANDARD.encode(text.as_bytes()))
}

/// Format a timestamp for the Date header (RFC 2822).
pub fn rfc2822_date(moment: DateTime<Local>) -> String {
	moment.to_rfc2822()
}
