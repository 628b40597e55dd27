//! Asynchronous delivery hand-off
//!
//! A [`MailQueue`] accepts ownership of a fully rendered [`Message`] and
//! acknowledges acceptance, not delivery. Whoever consumes the queue is
//! responsible for the actual transport.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::{MailError, MailResult};
use crate::message::Message;

/// Acknowledgement that a queue accepted a message.
///
/// Carries the queue-local sequence number of the accepted message. Says
/// nothing about eventual delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueAck {
	pub sequence: u64,
}

/// A delivery queue accepting fully rendered messages.
pub trait MailQueue: Send + Sync {
	/// Take ownership of the message; the ack confirms acceptance only.
	fn enqueue(&self, message: Message) -> MailResult<QueueAck>;
}

/// Unbounded in-process queue.
///
/// # Examples
///
/// ```
/// use mailflow::{Contact, InMemoryQueue, MailQueue, Message};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = InMemoryQueue::new();
/// let receiver = Contact::new("user@example.com");
///
/// let ack = queue.enqueue(Message::new(&receiver, "Hi", "<p></p>", None)?)?;
/// assert_eq!(ack.sequence, 1);
/// assert_eq!(queue.drain().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct InMemoryQueue {
	tx: mpsc::UnboundedSender<Message>,
	rx: Mutex<mpsc::UnboundedReceiver<Message>>,
	accepted: Mutex<u64>,
}

impl InMemoryQueue {
	pub fn new() -> Self {
		let (tx, rx) = mpsc::unbounded_channel();

		Self {
			tx,
			rx: Mutex::new(rx),
			accepted: Mutex::new(0),
		}
	}

	/// Remove and return every queued message, in acceptance order.
	pub fn drain(&self) -> Vec<Message> {
		let mut rx = self.rx.lock();
		let mut drained = Vec::new();

		while let Ok(message) = rx.try_recv() {
			drained.push(message);
		}

		drained
	}

	/// Close the queue; further enqueues are rejected.
	pub fn close(&self) {
		self.rx.lock().close();
	}
}

impl Default for InMemoryQueue {
	fn default() -> Self {
		Self::new()
	}
}

impl MailQueue for InMemoryQueue {
	fn enqueue(&self, message: Message) -> MailResult<QueueAck> {
		// The counter lock is held across the channel send so the ack
		// sequence matches the message's position in acceptance order
		let mut accepted = self.accepted.lock();

		self.tx
			.send(message)
			.map_err(|_| MailError::Queue("queue is closed".to_string()))?;
		*accepted += 1;

		Ok(QueueAck {
			sequence: *accepted,
		})
	}
}
