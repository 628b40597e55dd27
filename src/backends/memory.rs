//! In-memory backend for testing
//!
//! Stores delivered messages in memory without sending them, so tests can
//! assert on exactly what would have gone out.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::MailResult;
use crate::backends::MailBackend;
use crate::message::Message;

/// Backend storing messages in memory.
///
/// Cloning shares the underlying store, so a test can keep a handle while
/// the sender owns the backend.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use mailflow::{Contact, MailBackend, MemoryBackend, Message};
///
/// let backend = MemoryBackend::new();
/// let receiver = Contact::new("user@example.com");
///
/// backend
///     .deliver(&Message::new(&receiver, "Hi", "<p>Hi!</p>", None)?)
///     .await?;
///
/// assert_eq!(backend.count(), 1);
/// assert_eq!(backend.sent()[0].subject(), "Hi");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MemoryBackend {
	messages: Arc<RwLock<Vec<Message>>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// All messages delivered so far, in order.
	pub fn sent(&self) -> Vec<Message> {
		self.messages.read().clone()
	}

	pub fn count(&self) -> usize {
		self.messages.read().len()
	}

	pub fn clear(&self) {
		self.messages.write().clear();
	}

	/// Messages addressed to the given email.
	pub fn sent_to(&self, email: &str) -> Vec<Message> {
		self.messages
			.read()
			.iter()
			.filter(|message| message.to_email() == email)
			.cloned()
			.collect()
	}
}

#[async_trait]
impl MailBackend for MemoryBackend {
	async fn deliver(&self, message: &Message) -> MailResult<bool> {
		self.messages.write().push(message.clone());
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::recipient::Contact;

	fn message(to: &str, subject: &str) -> Message {
		Message::new(&Contact::new(to), subject, "<p></p>", None).unwrap()
	}

	#[tokio::test]
	async fn stores_and_filters_messages() {
		let backend = MemoryBackend::new();

		backend.deliver(&message("a@example.com", "one")).await.unwrap();
		backend.deliver(&message("b@example.com", "two")).await.unwrap();

		assert_eq!(backend.count(), 2);
		assert_eq!(backend.sent_to("a@example.com").len(), 1);
		assert_eq!(backend.sent_to("c@example.com").len(), 0);
	}

	#[tokio::test]
	async fn clear_empties_the_store() {
		let backend = MemoryBackend::new();
		backend.deliver(&message("a@example.com", "one")).await.unwrap();

		backend.clear();

		assert_eq!(backend.count(), 0);
	}

	#[tokio::test]
	async fn clones_share_the_store() {
		let backend = MemoryBackend::new();
		let handle = backend.clone();

		backend.deliver(&message("a@example.com", "one")).await.unwrap();

		assert_eq!(handle.count(), 1);
	}
}
