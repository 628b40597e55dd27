//! Template rendering for mail bodies
//!
//! A registry of named template sources with simple `{{key}}` substitution.
//! Rendering a body template composes a three-part layout: a `layout/header`
//! piece, the named body, and a `layout/footer` piece, optionally stitched
//! through a `layout/template` wrapper. Substituted values are HTML-escaped.

use crate::{MailError, MailResult};
use std::collections::HashMap;

/// Name of the optional layout piece rendered before the body.
pub const LAYOUT_HEADER: &str = "layout/header";

/// Name of the optional layout piece rendered after the body.
pub const LAYOUT_FOOTER: &str = "layout/footer";

/// Name of the optional outer wrapper; may reference `{{header}}`,
/// `{{content}}` and `{{footer}}`.
pub const LAYOUT_TEMPLATE: &str = "layout/template";

/// Context for template rendering.
pub type TemplateContext = HashMap<String, serde_json::Value>;

/// Render a template string with context using simple string replacement.
///
/// Replaces `{{key}}` with the corresponding value from the context. When
/// `html_escape` is true, dynamic values are HTML-escaped.
///
/// # Examples
///
/// ```
/// use mailflow::{TemplateContext, render_template};
///
/// let mut context = TemplateContext::new();
/// context.insert("name".to_string(), "Alice".into());
///
/// let result = render_template("Hello {{name}}!", &context, false).unwrap();
/// assert_eq!(result, "Hello Alice!");
/// ```
pub fn render_template(
	template: &str,
	context: &TemplateContext,
	html_escape: bool,
) -> MailResult<String> {
	let mut result = template.to_string();

	for (key, value) in context {
		let placeholder = format!("{{{{{key}}}}}");
		let raw = match value {
			serde_json::Value::String(s) => s.clone(),
			serde_json::Value::Number(n) => n.to_string(),
			serde_json::Value::Bool(b) => b.to_string(),
			serde_json::Value::Null => String::new(),
			_ => value.to_string(),
		};
		let replacement = if html_escape { escape_html(&raw) } else { raw };

		result = result.replace(&placeholder, &replacement);
	}

	Ok(result)
}

fn escape_html(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());

	for c in raw.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}

	escaped
}

/// A named store of template sources with layout composition.
///
/// # Examples
///
/// ```
/// use mailflow::{TemplateContext, TemplateRegistry};
///
/// let mut templates = TemplateRegistry::new();
/// templates.insert("layout/header", "<html><body>");
/// templates.insert("welcome", "<p>Hello {{name}}</p>");
/// templates.insert("layout/footer", "</body></html>");
///
/// let mut context = TemplateContext::new();
/// context.insert("name".to_string(), "Alice".into());
///
/// let html = templates.render_body("welcome", &context).unwrap();
/// assert_eq!(html, "<html><body><p>Hello Alice</p></body></html>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
	templates: HashMap<String, String>,
}

impl TemplateRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a template source under a name.
	pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
		self.templates.insert(name.into(), source.into());
	}

	/// Look up a template source.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.templates.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.templates.contains_key(name)
	}

	/// Render the named body template wrapped in the layout pieces.
	///
	/// The body template must exist; layout pieces render as empty when
	/// absent. Context values substituted into the templates are
	/// HTML-escaped; the already-rendered layout parts are not.
	pub fn render_body(&self, name: &str, context: &TemplateContext) -> MailResult<String> {
		let body = self
			.templates
			.get(name)
			.ok_or_else(|| MailError::Template(format!("no such template: {name}")))?;

		let header = self.render_piece(LAYOUT_HEADER, context)?;
		let content = render_template(body, context, true)?;
		let footer = self.render_piece(LAYOUT_FOOTER, context)?;

		match self.templates.get(LAYOUT_TEMPLATE) {
			Some(wrapper) => {
				let mut parts = TemplateContext::new();
				parts.insert("header".to_string(), header.into());
				parts.insert("content".to_string(), content.into());
				parts.insert("footer".to_string(), footer.into());

				// Parts are already rendered HTML; substitute them raw, then
				// fill any remaining context placeholders escaped.
				let stitched = render_template(wrapper, &parts, false)?;
				render_template(&stitched, context, true)
			}
			None => Ok(format!("{header}{content}{footer}")),
		}
	}

	fn render_piece(&self, name: &str, context: &TemplateContext) -> MailResult<String> {
		match self.templates.get(name) {
			Some(source) => render_template(source, context, true),
			None => Ok(String::new()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn render_template_substitutes_values() {
		// Arrange
		let mut context = TemplateContext::new();
		context.insert("name".to_string(), "Alice".into());
		context.insert("age".to_string(), 30.into());

		// Act
		let result =
			render_template("Hello {{name}}, you are {{age}} years old.", &context, false)
				.unwrap();

		// Assert
		assert_eq!(result, "Hello Alice, you are 30 years old.");
	}

	#[rstest]
	fn render_template_escapes_html_values() {
		// Arrange
		let mut context = TemplateContext::new();
		context.insert("name".to_string(), "<script>alert('xss')</script>".into());

		// Act
		let result = render_template("<p>Hello {{name}}</p>", &context, true).unwrap();

		// Assert
		assert_eq!(
			result,
			"<p>Hello &lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;</p>"
		);
	}

	#[rstest]
	fn render_template_leaves_unknown_placeholders() {
		let context = TemplateContext::new();

		let result = render_template("Hello {{name}}", &context, false).unwrap();

		assert_eq!(result, "Hello {{name}}");
	}

	#[rstest]
	fn missing_body_template_is_an_error() {
		let templates = TemplateRegistry::new();

		let result = templates.render_body("welcome", &TemplateContext::new());

		assert!(matches!(result, Err(MailError::Template(_))));
	}

	#[rstest]
	fn body_renders_without_layout_pieces() {
		// Arrange
		let mut templates = TemplateRegistry::new();
		templates.insert("welcome", "<p>Welcome</p>");

		// Act
		let html = templates
			.render_body("welcome", &TemplateContext::new())
			.unwrap();

		// Assert
		assert_eq!(html, "<p>Welcome</p>");
	}

	#[rstest]
	fn layout_wrapper_stitches_parts() {
		// Arrange
		let mut templates = TemplateRegistry::new();
		templates.insert(LAYOUT_TEMPLATE, "<html>{{header}}{{content}}{{footer}}</html>");
		templates.insert(LAYOUT_HEADER, "<h1>{{site}}</h1>");
		templates.insert("welcome", "<p>Hello {{name}}</p>");
		templates.insert(LAYOUT_FOOTER, "<small>bye</small>");

		let mut context = TemplateContext::new();
		context.insert("site".to_string(), "Example".into());
		context.insert("name".to_string(), "Alice".into());

		// Act
		let html = templates.render_body("welcome", &context).unwrap();

		// Assert
		assert_eq!(
			html,
			"<html><h1>Example</h1><p>Hello Alice</p><small>bye</small></html>"
		);
	}

	#[rstest]
	fn layout_parts_are_not_double_escaped() {
		// Arrange
		let mut templates = TemplateRegistry::new();
		templates.insert(LAYOUT_TEMPLATE, "{{content}}");
		templates.insert("welcome", "<p>{{name}}</p>");

		let mut context = TemplateContext::new();
		context.insert("name".to_string(), "A & B".into());

		// Act
		let html = templates.render_body("welcome", &context).unwrap();

		// Assert
		assert_eq!(html, "<p>A &amp; B</p>");
	}
}
