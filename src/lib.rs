//! # Mailflow
//!
//! Template-driven mail dispatch with pluggable sending backends.
//!
//! ## Features
//!
//! ### Sender
//! - **Backend factory**: resolve a backend by identifier ("sendmail", "imap",
//!   "console", "memory", "file") from explicit configuration
//! - **Header generation**: From/Date/Content-Type/MIME-Version with MIME
//!   encoded-word display names
//! - **Layout templates**: a named body template wrapped by layout header and
//!   footer pieces, rendered per receiver
//! - **Subscription checks**: receivers that opted out of a template are
//!   skipped, never failed
//!
//! ### Message
//! - **Merged headers**: base To/Subject/Date/Content-Type/MIME-Version set
//!   merged with caller overrides, override wins
//! - **Wire serialization**: `Key: Value` pairs joined by CRLF in insertion
//!   order
//! - **Sync or queued delivery**: deliver through a backend, or hand the
//!   rendered message to a [`MailQueue`] and get an acceptance ack
//!
//! ## Examples
//!
//! ### Dispatch to a list of receivers
//!
//! ```
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mailflow::{MailConfig, Sender, TemplateContext, TemplateRegistry};
//!
//! let mut templates = TemplateRegistry::new();
//! templates.insert("welcome", "<p>Welcome, {{receiver_email}}!</p>");
//!
//! let sender = Sender::factory(Some("memory"), MailConfig::default(), templates)?;
//!
//! let ok = sender
//!     .send(
//!         vec!["alice@example.com", "bob@example.com"],
//!         "welcome",
//!         TemplateContext::new(),
//!         Some("Welcome!"),
//!         None,
//!         true,
//!     )
//!     .await?;
//! assert!(ok);
//! # Ok(())
//! # }
//! ```
//!
//! ### Queue a single rendered message
//!
//! ```
//! use mailflow::{Contact, InMemoryQueue, Message};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let receiver = Contact::new("user@example.com");
//! let message = Message::new(&receiver, "Hi", "<p>Hi!</p>", None)?;
//!
//! let queue = InMemoryQueue::new();
//! let ack = message.enqueue(&queue)?;
//! assert_eq!(ack.sequence, 1);
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod encoding;
pub mod headers;
pub mod message;
pub mod queue;
pub mod recipient;
pub mod sender;
pub mod templates;
pub mod validation;

use thiserror::Error;

pub use backends::{
	ConsoleBackend, FileBackend, MailBackend, MemoryBackend, PlatformMailBackend,
	SendmailBackend, backend_factory,
};
pub use config::{MailConfig, SmtpSettings};
pub use encoding::{encoded_word, rfc2822_date};
pub use headers::Headers;
pub use message::Message;
pub use queue::{InMemoryQueue, MailQueue, QueueAck};
pub use recipient::{Contact, Recipient, RecipientEntry};
pub use sender::{DeliveryStatus, SendReport, Sender};
pub use templates::{TemplateContext, TemplateRegistry, render_template};
pub use validation::MAX_EMAIL_LENGTH;

#[derive(Debug, Error)]
pub enum MailError {
	#[error("Unknown mail backend: {0}")]
	UnknownBackend(String),

	#[error("Invalid email address: {0}")]
	InvalidAddress(String),

	#[error("Invalid recipient: {0}")]
	InvalidRecipient(String),

	#[error("Missing required configuration: {0}")]
	MissingField(String),

	#[error("Invalid header: {0}")]
	InvalidHeader(String),

	#[error("Header injection attempt detected: {0}")]
	HeaderInjection(String),

	#[error("Template error: {0}")]
	Template(String),

	#[error("Transport error: {0}")]
	Transport(String),

	#[error("Queue error: {0}")]
	Queue(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type MailResult<T> = std::result::Result<T, MailError>;
