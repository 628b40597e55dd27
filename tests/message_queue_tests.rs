//! Message delivery and queue hand-off integration tests
//!
//! Tests the two delivery paths of a rendered message: synchronous delivery
//! through a backend and asynchronous hand-off to a queue.

use mailflow::{Contact, InMemoryQueue, MailError, MemoryBackend, Message};
use rstest::rstest;

fn message(subject: &str) -> Message {
	let receiver = Contact::named("Alice", "alice@example.com");
	Message::new(&receiver, subject, "<p>body</p>", None).unwrap()
}

/// Test: synchronous send delivers through the backend
#[rstest]
#[tokio::test]
async fn sync_send_reaches_the_backend() {
	// Arrange
	let backend = MemoryBackend::new();
	let message = message("Sync");

	// Act
	let ok = message.send(&backend).await.unwrap();

	// Assert
	assert!(ok);
	assert_eq!(backend.count(), 1);
	assert_eq!(backend.sent()[0].subject(), "Sync");
}

/// Test: queued send acknowledges acceptance, not delivery
#[rstest]
fn enqueue_returns_acceptance_ack() {
	// Arrange
	let queue = InMemoryQueue::new();

	// Act
	let ack = message("Queued").enqueue(&queue).unwrap();

	// Assert
	assert_eq!(ack.sequence, 1);

	let pending = queue.drain();
	assert_eq!(pending.len(), 1);
	assert_eq!(pending[0].subject(), "Queued");
}

/// Test: the queue preserves the fully rendered message
#[rstest]
fn queue_carries_the_rendered_payload() {
	// Arrange
	let queue = InMemoryQueue::new();
	message("Payload").enqueue(&queue).unwrap();

	// Act
	let pending = queue.drain();

	// Assert
	let wire = pending[0].to_wire();
	assert!(wire.contains("To: Alice <alice@example.com>"));
	assert!(wire.contains("Content-Type: text/html; charset=UTF-8"));
	assert!(wire.ends_with("<p>body</p>"));
}

/// Test: a closed queue refuses new messages
#[rstest]
fn closed_queue_refuses_messages() {
	// Arrange
	let queue = InMemoryQueue::new();
	queue.close();

	// Act
	let result = message("Late").enqueue(&queue);

	// Assert
	assert!(matches!(result, Err(MailError::Queue(_))));
}

/// Test: a consumer can drain messages enqueued by several producers
#[rstest]
fn drain_returns_everything_in_order() {
	// Arrange
	let queue = InMemoryQueue::new();
	for subject in ["one", "two", "three"] {
		message(subject).enqueue(&queue).unwrap();
	}

	// Act
	let pending = queue.drain();

	// Assert
	let subjects: Vec<_> = pending.iter().map(Message::subject).collect();
	assert_eq!(subjects, ["one", "two", "three"]);
}
