//! File backend
//!
//! Writes each message to its own file in a configured directory, for
//! inspection during development.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::MailResult;
use crate::backends::MailBackend;
use crate::message::Message;

/// Backend saving one `.eml` file per message.
///
/// The directory is created on first delivery. Filenames combine a
/// timestamp with a per-backend counter to stay collision-free within one
/// process.
pub struct FileBackend {
	directory: PathBuf,
	counter: AtomicU64,
}

impl FileBackend {
	pub fn new(directory: PathBuf) -> Self {
		Self {
			directory,
			counter: AtomicU64::new(0),
		}
	}

	pub fn directory(&self) -> &PathBuf {
		&self.directory
	}

	fn next_filename(&self) -> String {
		let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
		let n = self.counter.fetch_add(1, Ordering::SeqCst);

		format!("{stamp}-{n}.eml")
	}
}

#[async_trait]
impl MailBackend for FileBackend {
	async fn deliver(&self, message: &Message) -> MailResult<bool> {
		tokio::fs::create_dir_all(&self.directory).await?;

		let path = self.directory.join(self.next_filename());
		tokio::fs::write(&path, message.to_wire()).await?;

		debug!(to = %message.to_email(), path = %path.display(), "wrote message to file");
		Ok(true)
	}
}
