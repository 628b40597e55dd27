//! Mail configuration
//!
//! A read-only snapshot passed explicitly into [`Sender::factory`]. There is
//! no hidden process-wide default; the caller owns the configuration and
//! hands it to the sender it builds.
//!
//! [`Sender::factory`]: crate::Sender::factory

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Identifier of the default backend when none is configured.
pub const DEFAULT_BACKEND: &str = "sendmail";

/// Process-wide mail configuration, read-only after load.
///
/// # Examples
///
/// ```
/// use mailflow::MailConfig;
///
/// let config = MailConfig::default();
/// assert_eq!(config.backend, "sendmail");
/// assert_eq!(
///     config.get("from.email").unwrap(),
///     serde_json::json!("webmaster@localhost")
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
	/// Default backend identifier used when the factory is given no name
	pub backend: String,

	/// Sender identity placed in the From header
	pub from: FromIdentity,

	/// Default subject used when a send call provides none
	pub subject: String,

	/// Sendmail binary invocation for the sendmail backend
	pub sendmail: SendmailSettings,

	/// Platform mail transport (SMTP submission) for the imap backend
	pub smtp: SmtpSettings,

	/// Directory for the file backend; required when backend is "file"
	pub file_path: Option<PathBuf>,
}

impl Default for MailConfig {
	fn default() -> Self {
		Self {
			backend: DEFAULT_BACKEND.to_string(),
			from: FromIdentity::default(),
			subject: String::new(),
			sendmail: SendmailSettings::default(),
			smtp: SmtpSettings::default(),
			file_path: None,
		}
	}
}

impl MailConfig {
	/// Dotted-path lookup into the configuration mapping.
	///
	/// `get("from.email")` resolves nested fields; an unknown path yields
	/// `None`.
	pub fn get(&self, path: &str) -> Option<serde_json::Value> {
		let mut current = self.as_value();

		for segment in path.split('.') {
			current = current.get(segment)?.clone();
		}

		Some(current)
	}

	/// Dotted-path lookup with a fallback default.
	pub fn get_or(&self, path: &str, default: serde_json::Value) -> serde_json::Value {
		self.get(path).unwrap_or(default)
	}

	/// The entire configuration as one mapping.
	pub fn as_value(&self) -> serde_json::Value {
		serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
	}

	/// Load configuration from `MAILFLOW_*` environment variables, starting
	/// from the defaults.
	pub fn from_env() -> Self {
		let mut config = Self::default();

		if let Ok(backend) = std::env::var("MAILFLOW_BACKEND") {
			config.backend = backend;
		}
		if let Ok(name) = std::env::var("MAILFLOW_FROM_NAME") {
			config.from.name = name;
		}
		if let Ok(email) = std::env::var("MAILFLOW_FROM_EMAIL") {
			config.from.email = email;
		}
		if let Ok(subject) = std::env::var("MAILFLOW_SUBJECT") {
			config.subject = subject;
		}
		if let Ok(command) = std::env::var("MAILFLOW_SENDMAIL_COMMAND") {
			config.sendmail.command = PathBuf::from(command);
		}
		if let Ok(host) = std::env::var("MAILFLOW_SMTP_HOST") {
			config.smtp.host = host;
		}
		if let Ok(port) = std::env::var("MAILFLOW_SMTP_PORT") {
			if let Ok(port) = port.parse() {
				config.smtp.port = port;
			}
		}
		if let Ok(username) = std::env::var("MAILFLOW_SMTP_USERNAME") {
			config.smtp.username = Some(username);
		}
		if let Ok(password) = std::env::var("MAILFLOW_SMTP_PASSWORD") {
			config.smtp.password = Some(password);
		}
		if let Ok(path) = std::env::var("MAILFLOW_FILE_PATH") {
			config.file_path = Some(PathBuf::from(path));
		}

		config
	}
}

/// The identity placed in the From header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FromIdentity {
	pub name: String,
	pub email: String,
}

impl Default for FromIdentity {
	fn default() -> Self {
		Self {
			name: "Webmaster".to_string(),
			email: "webmaster@localhost".to_string(),
		}
	}
}

/// Invocation of the local sendmail-compatible binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SendmailSettings {
	pub command: PathBuf,
	pub args: Vec<String>,
}

impl Default for SendmailSettings {
	fn default() -> Self {
		Self {
			command: PathBuf::from("/usr/sbin/sendmail"),
			// -t: take recipients from the message headers, -i: ignore lone dots
			args: vec!["-t".to_string(), "-i".to_string()],
		}
	}
}

/// Platform mail transport settings (SMTP submission).
///
/// The password is zeroized when the settings are dropped. Defaults are
/// declared per field: the type implements `Drop` through `ZeroizeOnDrop`,
/// so the deserializer must not move fields out of a default instance.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SmtpSettings {
	#[serde(default = "default_smtp_host")]
	pub host: String,
	#[serde(default = "default_smtp_port")]
	pub port: u16,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub password: Option<String>,
}

fn default_smtp_host() -> String {
	"localhost".to_string()
}

fn default_smtp_port() -> u16 {
	25
}

impl Default for SmtpSettings {
	fn default() -> Self {
		Self {
			host: default_smtp_host(),
			port: default_smtp_port(),
			username: None,
			password: None,
		}
	}
}

impl fmt::Debug for SmtpSettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SmtpSettings")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("username", &self.username)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}
