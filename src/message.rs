//! Mail payload value
//!
//! A [`Message`] is one fully rendered, addressed, header-complete unit of
//! mail. It is immutable after construction and is either delivered through
//! a backend or handed to a queue, then discarded.

use chrono::Local;

use crate::MailResult;
use crate::backends::MailBackend;
use crate::encoding::{encoded_word, rfc2822_date};
use crate::headers::Headers;
use crate::queue::{MailQueue, QueueAck};
use crate::recipient::Recipient;
use crate::validation::{check_header_injection, validate_header_name};

/// Content-Type every message declares unless explicitly overridden.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// One addressed, rendered, header-complete mail payload.
///
/// Headers are the merge of a base set (To, Subject, Date, Content-Type,
/// MIME-Version) with caller-supplied overrides; the override wins on key
/// collision.
///
/// # Examples
///
/// ```
/// use mailflow::{Contact, Message};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let receiver = Contact::named("Alice", "alice@example.com");
/// let message = Message::new(&receiver, "Hi", "<p>Hi!</p>", None)?;
///
/// assert_eq!(message.headers().get("To"), Some("Alice <alice@example.com>"));
/// assert_eq!(
///     message.headers().get("Content-Type"),
///     Some("text/html; charset=UTF-8")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Message {
	to_email: String,
	subject: String,
	content: String,
	headers: Headers,
}

impl Message {
	/// Build a message for one receiver, merging the base header set with
	/// caller overrides.
	///
	/// The To header is synthesized as `"<display-or-address> <<email>>"`;
	/// a receiver without a display name repeats the address. Subject and
	/// override values are checked for header injection.
	pub fn new(
		recipient: &dyn Recipient,
		subject: impl Into<String>,
		content: impl Into<String>,
		overrides: Option<Headers>,
	) -> MailResult<Self> {
		let subject = subject.into();
		let content = content.into();

		check_header_injection(&subject)?;

		let overrides = overrides.unwrap_or_default();
		for (name, value) in overrides.iter() {
			validate_header_name(name)?;
			check_header_injection(value)?;
		}

		// The To header is synthesized from recipient-supplied text, so it
		// gets the same injection check as the caller-supplied values
		let email = recipient.email().to_string();
		check_header_injection(&email)?;

		let display = recipient.display_name().unwrap_or(&email);
		check_header_injection(display)?;

		let base: Headers = [
			("To", format!("{display} <{email}>")),
			("Subject", subject.clone()),
			("Date", rfc2822_date(Local::now())),
			("Content-Type", HTML_CONTENT_TYPE.to_string()),
			("MIME-Version", "1.0".to_string()),
		]
		.into_iter()
		.collect();

		Ok(Self {
			to_email: email,
			subject,
			content,
			headers: base.merge(overrides),
		})
	}

	/// The receiver's bare email address.
	pub fn to_email(&self) -> &str {
		&self.to_email
	}

	pub fn subject(&self) -> &str {
		&self.subject
	}

	/// The subject as a MIME encoded-word, as handed to transports.
	pub fn encoded_subject(&self) -> String {
		encoded_word(&self.subject)
	}

	/// The rendered HTML body.
	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn headers(&self) -> &Headers {
		&self.headers
	}

	/// Serialize headers as `Key: Value` lines joined by CRLF, in insertion
	/// order.
	pub fn render_headers(&self) -> String {
		self.headers.to_wire()
	}

	/// The full wire form: header block, blank line, body.
	pub fn to_wire(&self) -> String {
		format!("{}\r\n\r\n{}", self.render_headers(), self.content)
	}

	/// Deliver synchronously through the given backend.
	///
	/// `Ok(false)` reports an ordinary transport failure; `Err` is reserved
	/// for programmer-error conditions.
	pub async fn send(&self, backend: &dyn MailBackend) -> MailResult<bool> {
		backend.deliver(self).await
	}

	/// Hand the fully rendered message to an asynchronous delivery queue.
	///
	/// The returned ack confirms acceptance by the queue, not delivery.
	pub fn enqueue(&self, queue: &dyn MailQueue) -> MailResult<QueueAck> {
		queue.enqueue(self.clone())
	}
}
