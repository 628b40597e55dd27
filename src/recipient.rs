//! Recipients and coercion of caller-supplied receiver values
//!
//! A receiver can be anything implementing [`Recipient`], or a plain address
//! string, or a `(display name, address)` pair. Plain entries are coerced
//! into [`Contact`] values; a string that fails address validation aborts
//! the whole send call.

use crate::{MailError, MailResult};
use crate::validation::validate_email;

/// An addressable, subscription-aware destination for mail.
///
/// Callers may implement this for their own model types; the sender only
/// needs the address, an optional display name, and the subscription flag
/// for a given template.
pub trait Recipient: Send + Sync {
	fn email(&self) -> &str;

	fn display_name(&self) -> Option<&str> {
		None
	}

	/// Whether this receiver is subscribed to the given template/topic.
	fn is_subscribed_to(&self, _template: &str) -> bool {
		true
	}
}

/// An owned recipient with an address and an optional display name.
///
/// Always subscribed; use a custom [`Recipient`] implementation to model
/// opt-outs.
///
/// # Examples
///
/// ```
/// use mailflow::{Contact, Recipient};
///
/// let contact = Contact::named("Alice", "alice@example.com");
/// assert_eq!(contact.email(), "alice@example.com");
/// assert_eq!(contact.display_name(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
	email: String,
	name: Option<String>,
}

impl Contact {
	/// A contact from a bare address, with no display name.
	pub fn new(email: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			name: None,
		}
	}

	/// A contact with a display name.
	pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			name: Some(name.into()),
		}
	}
}

impl Recipient for Contact {
	fn email(&self) -> &str {
		&self.email
	}

	fn display_name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

/// One caller-supplied receiver entry, before coercion.
pub enum RecipientEntry {
	/// A bare address string; no display name.
	Address(String),

	/// A keyed entry: display name plus address.
	Named { name: String, email: String },

	/// A caller-provided recipient value, used as-is.
	Custom(Box<dyn Recipient>),
}

impl RecipientEntry {
	/// Coerce this entry into a usable recipient, validating plain
	/// addresses. An invalid string is a hard failure.
	pub fn into_recipient(self) -> MailResult<Box<dyn Recipient>> {
		match self {
			RecipientEntry::Address(email) => {
				validate_email(&email)?;
				Ok(Box::new(Contact::new(email)))
			}
			RecipientEntry::Named { name, email } => {
				validate_email(&email)?;
				if name.is_empty() {
					return Err(MailError::InvalidRecipient(format!(
						"empty display name for {email}"
					)));
				}
				Ok(Box::new(Contact::named(name, email)))
			}
			RecipientEntry::Custom(recipient) => {
				if recipient.email().is_empty() {
					return Err(MailError::InvalidRecipient(
						"recipient has no email address".to_string(),
					));
				}
				Ok(recipient)
			}
		}
	}
}

impl From<&str> for RecipientEntry {
	fn from(email: &str) -> Self {
		RecipientEntry::Address(email.to_string())
	}
}

impl From<String> for RecipientEntry {
	fn from(email: String) -> Self {
		RecipientEntry::Address(email)
	}
}

impl From<(&str, &str)> for RecipientEntry {
	fn from((name, email): (&str, &str)) -> Self {
		RecipientEntry::Named {
			name: name.to_string(),
			email: email.to_string(),
		}
	}
}

impl From<(String, String)> for RecipientEntry {
	fn from((name, email): (String, String)) -> Self {
		RecipientEntry::Named { name, email }
	}
}

impl From<Contact> for RecipientEntry {
	fn from(contact: Contact) -> Self {
		RecipientEntry::Custom(Box::new(contact))
	}
}

impl From<Box<dyn Recipient>> for RecipientEntry {
	fn from(recipient: Box<dyn Recipient>) -> Self {
		RecipientEntry::Custom(recipient)
	}
}
