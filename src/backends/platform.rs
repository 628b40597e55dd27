//! Platform mail backend ("imap")
//!
//! Submits each message directly to the platform mail transport over SMTP,
//! the way the host's built-in mail function would. No asynchronous option;
//! delivery happens within the call.

use std::str::FromStr;

use async_trait::async_trait;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, warn};

use crate::{MailError, MailResult};
use crate::backends::MailBackend;
use crate::config::{FromIdentity, SmtpSettings};
use crate::message::Message;

/// Backend submitting to the platform mail transport (SMTP).
pub struct PlatformMailBackend {
	settings: SmtpSettings,
	from: FromIdentity,
}

impl PlatformMailBackend {
	pub fn new(settings: SmtpSettings, from: FromIdentity) -> Self {
		Self { settings, from }
	}

	/// The transport builds lazily inside `deliver`: lettre's pooled tokio
	/// transport must be constructed and dropped within a running runtime,
	/// and the factory is a plain synchronous call.
	fn transport(&self) -> AsyncSmtpTransport<Tokio1Executor> {
		let mut builder =
			AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.settings.host.as_str())
				.port(self.settings.port);

		if let (Some(username), Some(password)) =
			(&self.settings.username, &self.settings.password)
		{
			builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
		}

		builder.build()
	}

	fn mailbox(name: Option<&str>, email: &str) -> MailResult<Mailbox> {
		let address = Address::from_str(email)
			.map_err(|err| MailError::InvalidAddress(format!("{email}: {err}")))?;

		Ok(Mailbox::new(name.map(str::to_string), address))
	}
}

#[async_trait]
impl MailBackend for PlatformMailBackend {
	async fn deliver(&self, message: &Message) -> MailResult<bool> {
		let from = Self::mailbox(Some(&self.from.name), &self.from.email)?;
		let to = Self::mailbox(None, message.to_email())?;

		// A malformed message is a programmer error, not a transport failure
		let email = lettre::Message::builder()
			.from(from)
			.to(to)
			.subject(message.subject())
			.singlepart(SinglePart::html(message.content().to_string()))
			.map_err(|err| MailError::Transport(err.to_string()))?;

		match self.transport().send(email).await {
			Ok(response) => {
				debug!(to = %message.to_email(), "platform transport accepted message");
				Ok(response.is_positive())
			}
			Err(err) => {
				warn!(to = %message.to_email(), error = %err, "platform transport failure");
				Ok(false)
			}
		}
	}
}
