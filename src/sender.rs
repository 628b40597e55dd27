//! Mail dispatcher
//!
//! The [`Sender`] resolves a backend by identifier, generates common
//! headers, renders a templated body per receiver, and delegates each
//! message to the backend's transport call. The aggregate result of a send
//! is the logical AND over all attempted deliveries; a richer per-receiver
//! report is available through [`Sender::send_report`].

use chrono::Local;
use tracing::debug;

use crate::MailResult;
use crate::backends::{MailBackend, backend_factory};
use crate::config::MailConfig;
use crate::encoding::{encoded_word, rfc2822_date};
use crate::headers::Headers;
use crate::message::{HTML_CONTENT_TYPE, Message};
use crate::recipient::{Recipient, RecipientEntry};
use crate::templates::{TemplateContext, TemplateRegistry};

/// Outcome of one receiver within a send call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
	/// The backend accepted the message.
	Delivered,

	/// The backend reported an ordinary transport failure.
	Failed,

	/// The receiver was not subscribed to the template; nothing attempted.
	Skipped,
}

/// Per-receiver outcomes of one send call.
#[derive(Debug, Clone, Default)]
pub struct SendReport {
	outcomes: Vec<(String, DeliveryStatus)>,
}

impl SendReport {
	fn push(&mut self, email: &str, status: DeliveryStatus) {
		self.outcomes.push((email.to_string(), status));
	}

	/// `(email, status)` per receiver, in iteration order.
	pub fn outcomes(&self) -> &[(String, DeliveryStatus)] {
		&self.outcomes
	}

	/// True iff no attempted delivery failed. Vacuously true when nothing
	/// was attempted.
	pub fn all_ok(&self) -> bool {
		self.outcomes
			.iter()
			.all(|(_, status)| *status != DeliveryStatus::Failed)
	}

	/// Number of receivers actually handed to the backend.
	pub fn attempted(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|(_, status)| *status != DeliveryStatus::Skipped)
			.count()
	}

	pub fn delivered(&self) -> usize {
		self.count(DeliveryStatus::Delivered)
	}

	pub fn skipped(&self) -> usize {
		self.count(DeliveryStatus::Skipped)
	}

	fn count(&self, wanted: DeliveryStatus) -> usize {
		self.outcomes
			.iter()
			.filter(|(_, status)| *status == wanted)
			.count()
	}
}

/// The component resolving and driving a mail backend.
///
/// Configuration is passed in explicitly; there is no hidden process-wide
/// default beyond [`MailConfig`]'s own defaults.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use mailflow::{MailConfig, Sender, TemplateContext, TemplateRegistry};
///
/// let mut templates = TemplateRegistry::new();
/// templates.insert("welcome", "<p>Welcome!</p>");
///
/// let sender = Sender::factory(Some("memory"), MailConfig::default(), templates)?;
/// let ok = sender
///     .send_one("user@example.com", "welcome", TemplateContext::new(), None, None, true)
///     .await?;
/// assert!(ok);
/// # Ok(())
/// # }
/// ```
pub struct Sender {
	config: MailConfig,
	backend: Box<dyn MailBackend>,
	templates: TemplateRegistry,
}

impl Sender {
	/// Resolve the named backend and build a sender around it.
	///
	/// `None` resolves the configured default identifier. Unknown
	/// identifiers fail with [`MailError::UnknownBackend`].
	///
	/// [`MailError::UnknownBackend`]: crate::MailError::UnknownBackend
	pub fn factory(
		name: Option<&str>,
		config: MailConfig,
		templates: TemplateRegistry,
	) -> MailResult<Self> {
		let backend = backend_factory(name, &config)?;

		Ok(Self {
			config,
			backend,
			templates,
		})
	}

	/// Build a sender around a caller-provided backend.
	pub fn with_backend(
		config: MailConfig,
		backend: Box<dyn MailBackend>,
		templates: TemplateRegistry,
	) -> Self {
		Self {
			config,
			backend,
			templates,
		}
	}

	pub fn config(&self) -> &MailConfig {
		&self.config
	}

	/// Dotted-path configuration lookup, see [`MailConfig::get`].
	pub fn config_get(&self, path: &str) -> Option<serde_json::Value> {
		self.config.get(path)
	}

	pub fn templates(&self) -> &TemplateRegistry {
		&self.templates
	}

	/// The common headers every outgoing message starts from: From with an
	/// encoded display name, Date, Content-Type, MIME-Version.
	pub fn generate_headers(&self) -> Headers {
		[
			(
				"From",
				format!(
					"{} <{}>",
					encoded_word(&self.config.from.name),
					self.config.from.email
				),
			),
			("Date", rfc2822_date(Local::now())),
			("Content-Type", HTML_CONTENT_TYPE.to_string()),
			("MIME-Version", "1.0".to_string()),
		]
		.into_iter()
		.collect()
	}

	/// Render the body for one receiver: the receiver is injected into the
	/// context, then the named template is composed with the layout pieces.
	pub fn generate_content(
		&self,
		recipient: &dyn Recipient,
		template: &str,
		context: &TemplateContext,
	) -> MailResult<String> {
		let mut context = context.clone();
		context.insert(
			"receiver_email".to_string(),
			recipient.email().to_string().into(),
		);
		context.insert(
			"receiver_name".to_string(),
			recipient
				.display_name()
				.unwrap_or_else(|| recipient.email())
				.to_string()
				.into(),
		);

		self.templates.render_body(template, &context)
	}

	/// Dispatch the named template to every receiver.
	///
	/// Returns true iff every attempted delivery succeeded; vacuously true
	/// for an empty or fully-skipped receiver set. An invalid receiver
	/// aborts the whole call with an error before any further transport
	/// calls.
	pub async fn send<I, E>(
		&self,
		receivers: I,
		template: &str,
		context: TemplateContext,
		subject: Option<&str>,
		headers: Option<Headers>,
		check_subscription: bool,
	) -> MailResult<bool>
	where
		I: IntoIterator<Item = E>,
		E: Into<RecipientEntry>,
	{
		let report = self
			.send_report(receivers, template, context, subject, headers, check_subscription)
			.await?;

		Ok(report.all_ok())
	}

	/// Dispatch to a single receiver.
	pub async fn send_one(
		&self,
		receiver: impl Into<RecipientEntry>,
		template: &str,
		context: TemplateContext,
		subject: Option<&str>,
		headers: Option<Headers>,
		check_subscription: bool,
	) -> MailResult<bool> {
		self.send(
			std::iter::once(receiver.into()),
			template,
			context,
			subject,
			headers,
			check_subscription,
		)
		.await
	}

	/// Like [`Sender::send`], but reporting the per-receiver outcomes.
	///
	/// For each receiver: coerce to a recipient (an invalid bare address
	/// aborts the whole batch), skip it when unsubscribed, merge the
	/// generated headers with the caller's overrides (caller wins), render
	/// the content, and hand one message to the backend.
	pub async fn send_report<I, E>(
		&self,
		receivers: I,
		template: &str,
		context: TemplateContext,
		subject: Option<&str>,
		headers: Option<Headers>,
		check_subscription: bool,
	) -> MailResult<SendReport>
	where
		I: IntoIterator<Item = E>,
		E: Into<RecipientEntry>,
	{
		let subject = match subject {
			Some(subject) => subject.to_string(),
			None => self.config.subject.clone(),
		};
		let overrides = headers.unwrap_or_default();

		let mut report = SendReport::default();

		for entry in receivers {
			let recipient = entry.into().into_recipient()?;

			if check_subscription && !recipient.is_subscribed_to(template) {
				debug!(to = %recipient.email(), %template, "receiver not subscribed, skipping");
				report.push(recipient.email(), DeliveryStatus::Skipped);
				continue;
			}

			let merged = self.generate_headers().merge(overrides.clone());
			let content = self.generate_content(recipient.as_ref(), template, &context)?;

			let message =
				Message::new(recipient.as_ref(), subject.clone(), content, Some(merged))?;

			let status = if message.send(self.backend.as_ref()).await? {
				DeliveryStatus::Delivered
			} else {
				DeliveryStatus::Failed
			};
			report.push(recipient.email(), status);
		}

		Ok(report)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backends::MemoryBackend;
	use rstest::rstest;

	fn sender_with_memory() -> (Sender, MemoryBackend) {
		let backend = MemoryBackend::new();
		let mut templates = TemplateRegistry::new();
		templates.insert("welcome", "<p>Hello {{receiver_email}}</p>");

		let sender = Sender::with_backend(
			MailConfig::default(),
			Box::new(backend.clone()),
			templates,
		);

		(sender, backend)
	}

	#[rstest]
	fn generated_headers_include_encoded_from() {
		// Arrange
		let (sender, _) = sender_with_memory();

		// Act
		let headers = sender.generate_headers();

		// Assert
		let from = headers.get("From").unwrap();
		assert!(from.starts_with("=?UTF-8?B?"));
		assert!(from.ends_with("<webmaster@localhost>"));
		assert_eq!(headers.get("MIME-Version"), Some("1.0"));
	}

	#[rstest]
	fn config_lookup_passes_through() {
		let (sender, _) = sender_with_memory();

		assert_eq!(
			sender.config_get("from.email"),
			Some(serde_json::json!("webmaster@localhost"))
		);
	}

	#[tokio::test]
	async fn content_injects_the_receiver() {
		// Arrange
		let (sender, _) = sender_with_memory();
		let recipient = crate::Contact::new("user@example.com");

		// Act
		let content = sender
			.generate_content(&recipient, "welcome", &TemplateContext::new())
			.unwrap();

		// Assert
		assert_eq!(content, "<p>Hello user@example.com</p>");
	}
}
