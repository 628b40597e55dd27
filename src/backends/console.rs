//! Console backend
//!
//! Development backend that prints each message to stdout instead of
//! sending it.

use async_trait::async_trait;
use tracing::debug;

use crate::MailResult;
use crate::backends::MailBackend;
use crate::message::Message;

/// Backend printing messages to the console.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use mailflow::{ConsoleBackend, Contact, MailBackend, Message};
///
/// let receiver = Contact::new("user@example.com");
/// let message = Message::new(&receiver, "Hi", "<p>Hi!</p>", None)?;
///
/// assert!(ConsoleBackend.deliver(&message).await?);
/// # Ok(())
/// # }
/// ```
pub struct ConsoleBackend;

#[async_trait]
impl MailBackend for ConsoleBackend {
	async fn deliver(&self, message: &Message) -> MailResult<bool> {
		println!("{}", message.to_wire());
		println!("{}", "-".repeat(78));

		debug!(to = %message.to_email(), "printed message to console");
		Ok(true)
	}
}
