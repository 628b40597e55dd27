//! Sendmail backend
//!
//! Pipes the wire form of a message through an external sendmail-compatible
//! program. This is the process-wide default backend.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::MailResult;
use crate::backends::MailBackend;
use crate::config::SendmailSettings;
use crate::message::Message;

/// Backend invoking the local sendmail binary.
///
/// The message's full wire form (headers, blank line, body) is written to
/// the program's stdin; recipients are taken from the To header via the
/// configured `-t` flag.
pub struct SendmailBackend {
	settings: SendmailSettings,
}

impl SendmailBackend {
	pub fn new(settings: SendmailSettings) -> Self {
		Self { settings }
	}
}

#[async_trait]
impl MailBackend for SendmailBackend {
	async fn deliver(&self, message: &Message) -> MailResult<bool> {
		let mut child = match Command::new(&self.settings.command)
			.args(&self.settings.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
		{
			Ok(child) => child,
			Err(err) => {
				warn!(
					command = %self.settings.command.display(),
					error = %err,
					"failed to spawn sendmail"
				);
				return Ok(false);
			}
		};

		if let Some(mut stdin) = child.stdin.take() {
			if let Err(err) = stdin.write_all(message.to_wire().as_bytes()).await {
				warn!(error = %err, "failed to write message to sendmail stdin");
				return Ok(false);
			}
			// Close stdin so the program sees EOF
			drop(stdin);
		}

		match child.wait().await {
			Ok(status) if status.success() => {
				debug!(to = %message.to_email(), "sendmail accepted message");
				Ok(true)
			}
			Ok(status) => {
				warn!(to = %message.to_email(), %status, "sendmail rejected message");
				Ok(false)
			}
			Err(err) => {
				warn!(error = %err, "failed to wait for sendmail");
				Ok(false)
			}
		}
	}
}
