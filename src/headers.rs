//! Ordered header map
//!
//! Header fields keep their insertion order; serialization emits literal
//! `Key: Value` pairs joined by CRLF. Merging is right-biased: an override
//! replaces the value of an existing key in place, new keys are appended.

use std::fmt;

/// An ordered string-to-string header mapping.
///
/// # Examples
///
/// ```
/// use mailflow::Headers;
///
/// let mut headers = Headers::new();
/// headers.insert("To", "A <a@x.com>");
/// headers.insert("Subject", "Hi");
///
/// assert_eq!(headers.to_wire(), "To: A <a@x.com>\r\nSubject: Hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
	entries: Vec<(String, String)>,
}

impl Headers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a header field, replacing an existing value in place.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();

		match self.entries.iter_mut().find(|(key, _)| *key == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Look up a header value by exact field name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Merge `overrides` into this map; on key collision the override wins
	/// while the field keeps its original position.
	pub fn merge(mut self, overrides: Headers) -> Headers {
		for (name, value) in overrides.entries {
			self.insert(name, value);
		}

		self
	}

	/// Serialize as `Key: Value` lines joined by CRLF, in insertion order.
	pub fn to_wire(&self) -> String {
		self.entries
			.iter()
			.map(|(name, value)| format!("{name}: {value}"))
			.collect::<Vec<_>>()
			.join("\r\n")
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl fmt::Display for Headers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_wire())
	}
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		let mut headers = Headers::new();
		for (name, value) in iter {
			headers.insert(name, value);
		}
		headers
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn preserves_insertion_order() {
		// Arrange
		let headers: Headers = [("B", "2"), ("A", "1"), ("C", "3")].into_iter().collect();

		// Assert
		assert_eq!(headers.to_wire(), "B: 2\r\nA: 1\r\nC: 3");
	}

	#[rstest]
	fn merge_is_right_biased() {
		// Arrange
		let base: Headers = [("Content-Type", "text/html; charset=UTF-8"), ("X-One", "a")]
			.into_iter()
			.collect();
		let overrides: Headers = [("Content-Type", "text/plain"), ("X-Two", "b")]
			.into_iter()
			.collect();

		// Act
		let merged = base.merge(overrides);

		// Assert
		assert_eq!(merged.get("Content-Type"), Some("text/plain"));
		assert_eq!(merged.get("X-One"), Some("a"));
		assert_eq!(merged.get("X-Two"), Some("b"));
	}

	#[rstest]
	fn overridden_key_keeps_position() {
		// Arrange
		let base: Headers = [("A", "1"), ("B", "2")].into_iter().collect();
		let overrides: Headers = [("A", "changed")].into_iter().collect();

		// Act
		let merged = base.merge(overrides);

		// Assert
		assert_eq!(merged.to_wire(), "A: changed\r\nB: 2");
	}

	#[rstest]
	fn insert_replaces_existing() {
		let mut headers = Headers::new();
		headers.insert("Subject", "first");
		headers.insert("Subject", "second");

		assert_eq!(headers.len(), 1);
		assert_eq!(headers.get("Subject"), Some("second"));
	}

	#[rstest]
	fn empty_headers_serialize_to_empty_string() {
		assert_eq!(Headers::new().to_wire(), "");
	}
}
