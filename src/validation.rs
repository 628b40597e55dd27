//! Email address and header validation
//!
//! Addresses are checked against a pragmatic subset of RFC 5321/5322 with
//! IDNA handling for international domains. Header names and values are
//! checked to prevent header injection through user-supplied text.

use crate::{MailError, MailResult};

/// Maximum total length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the local part of an address.
const MAX_LOCAL_LENGTH: usize = 64;

/// Validate an email address.
///
/// # Examples
///
/// ```
/// use mailflow::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("not-an-email").is_err());
/// ```
pub fn validate_email(address: &str) -> MailResult<()> {
	if address.is_empty() {
		return Err(MailError::InvalidAddress("empty address".to_string()));
	}

	if address.len() > MAX_EMAIL_LENGTH {
		return Err(MailError::InvalidAddress(format!(
			"address exceeds {MAX_EMAIL_LENGTH} characters"
		)));
	}

	if address.chars().any(|c| c.is_whitespace() || c.is_control()) {
		return Err(MailError::InvalidAddress(address.to_string()));
	}

	let Some((local, domain)) = address.rsplit_once('@') else {
		return Err(MailError::InvalidAddress(address.to_string()));
	};

	if local.is_empty() || local.len() > MAX_LOCAL_LENGTH || local.contains('@') {
		return Err(MailError::InvalidAddress(address.to_string()));
	}

	if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
		return Err(MailError::InvalidAddress(address.to_string()));
	}

	validate_domain(domain).map_err(|_| MailError::InvalidAddress(address.to_string()))
}

fn validate_domain(domain: &str) -> Result<(), ()> {
	if domain.is_empty() {
		return Err(());
	}

	let ascii = idna::domain_to_ascii(domain).map_err(|_| ())?;

	if ascii.is_empty() || !ascii.contains('.') || ascii.starts_with('.') || ascii.ends_with('.') {
		return Err(());
	}

	Ok(())
}

/// Reject header values that would allow injecting additional headers.
pub fn check_header_injection(value: &str) -> MailResult<()> {
	if value.contains('\r') || value.contains('\n') || value.contains('\0') {
		return Err(MailError::HeaderInjection(value.to_string()));
	}

	Ok(())
}

/// Validate a header field name (RFC 2822: printable ASCII except colon).
pub fn validate_header_name(name: &str) -> MailResult<()> {
	if name.is_empty() {
		return Err(MailError::InvalidHeader("empty header name".to_string()));
	}

	if !name.chars().all(|c| ('!'..='~').contains(&c) && c != ':') {
		return Err(MailError::InvalidHeader(name.to_string()));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("user@example.com")]
	#[case("first.last@sub.example.org")]
	#[case("u+tag@example.co.uk")]
	fn accepts_valid_addresses(#[case] address: &str) {
		assert!(validate_email(address).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("not-an-email")]
	#[case("@example.com")]
	#[case("user@")]
	#[case("user@@example.com")]
	#[case("us er@example.com")]
	#[case("user@nodot")]
	#[case(".user@example.com")]
	#[case("user..name@example.com")]
	fn rejects_invalid_addresses(#[case] address: &str) {
		assert!(matches!(
			validate_email(address),
			Err(MailError::InvalidAddress(_))
		));
	}

	#[rstest]
	fn accepts_international_domains() {
		assert!(validate_email("user@bücher.example").is_ok());
	}

	#[rstest]
	fn rejects_overlong_address() {
		let address = format!("user@{}.com", "a".repeat(MAX_EMAIL_LENGTH));
		assert!(validate_email(&address).is_err());
	}

	#[rstest]
	#[case("Subject with\r\ninjected: header")]
	#[case("null\0byte")]
	fn detects_header_injection(#[case] value: &str) {
		assert!(matches!(
			check_header_injection(value),
			Err(MailError::HeaderInjection(_))
		));
	}

	#[rstest]
	fn clean_value_passes_injection_check() {
		assert!(check_header_injection("An ordinary subject, ASCII only").is_ok());
	}

	#[rstest]
	#[case("X-Custom-Header")]
	#[case("Reply-To")]
	fn accepts_valid_header_names(#[case] name: &str) {
		assert!(validate_header_name(name).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("Bad:Name")]
	#[case("With Space")]
	fn rejects_invalid_header_names(#[case] name: &str) {
		assert!(matches!(
			validate_header_name(name),
			Err(MailError::InvalidHeader(_))
		));
	}
}
