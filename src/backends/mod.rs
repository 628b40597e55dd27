//! Sending backends
//!
//! Each backend fulfills the single [`MailBackend::deliver`] capability.
//! Backends are resolved by string identifier through [`backend_factory`];
//! there is no dependency among them.

mod console;
mod file;
mod memory;
mod platform;
mod sendmail;

use async_trait::async_trait;

pub use console::ConsoleBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use platform::PlatformMailBackend;
pub use sendmail::SendmailBackend;

use crate::{MailError, MailResult};
use crate::config::MailConfig;
use crate::message::Message;

/// A concrete mail transport.
#[async_trait]
pub trait MailBackend: Send + Sync {
	/// Perform the transport call for one message.
	///
	/// `Ok(true)` means the transport accepted the message, `Ok(false)` an
	/// ordinary transport failure. `Err` is reserved for programmer-error
	/// conditions such as a malformed message.
	async fn deliver(&self, message: &Message) -> MailResult<bool>;
}

/// Resolve a backend by identifier.
///
/// Identifiers are matched case-insensitively. `None` resolves to the
/// configured default, itself defaulting to `"sendmail"`. An unknown
/// identifier is a [`MailError::UnknownBackend`].
///
/// # Examples
///
/// ```
/// use mailflow::{MailConfig, backend_factory};
///
/// let config = MailConfig::default();
///
/// assert!(backend_factory(Some("console"), &config).is_ok());
/// assert!(backend_factory(Some("carrier-pigeon"), &config).is_err());
/// ```
pub fn backend_factory(
	name: Option<&str>,
	config: &MailConfig,
) -> MailResult<Box<dyn MailBackend>> {
	let name = name.unwrap_or(&config.backend);

	match name.to_ascii_lowercase().as_str() {
		"sendmail" => Ok(Box::new(SendmailBackend::new(config.sendmail.clone()))),
		"imap" => Ok(Box::new(PlatformMailBackend::new(
			config.smtp.clone(),
			config.from.clone(),
		))),
		"console" => Ok(Box::new(ConsoleBackend)),
		"memory" => Ok(Box::new(MemoryBackend::new())),
		"file" => {
			let path = config
				.file_path
				.clone()
				.ok_or_else(|| MailError::MissingField("file_path".to_string()))?;
			Ok(Box::new(FileBackend::new(path)))
		}
		_ => Err(MailError::UnknownBackend(name.to_string())),
	}
}
