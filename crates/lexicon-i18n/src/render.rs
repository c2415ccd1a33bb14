//! Message renderer
//!
//! Binds a selected template to the caller's argument. Only the binding a
//! translated string needs is supported:
//!
//! - `{{ . }}` prints the whole argument;
//! - `{{ .Count }}` prints the plural count when the argument is numeric;
//! - `{{ .Field.Nested }}` walks map keys, record fields and record accessors;
//! - `{{/* comment */}}` prints nothing;
//! - `{{-` and `-}}` trim surrounding whitespace.

use crate::count::{COUNT_FIELD, resolve_count};
use crate::error::RenderError;
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static ACTION: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?s)\{\{(-\s)?(.*?)(\s-)?\}\}").expect("Invalid action regex pattern")
});

/// Data a template is rendered against
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
	dot: &'a Value,
	count: Option<i64>,
}

impl<'a> RenderContext<'a> {
	/// Build a context for `argument`
	///
	/// Numeric arguments additionally expose their plural count as `.Count`.
	pub fn new(argument: &'a Value) -> Self {
		let count = match argument.deref_all() {
			Value::Int(_) | Value::Float(_) => Some(resolve_count(argument)),
			_ => None,
		};
		Self {
			dot: argument,
			count,
		}
	}

	/// The raw argument, printed by `{{ . }}`
	pub fn dot(&self) -> &'a Value {
		self.dot
	}

	/// The synthesized count, when the argument is numeric
	pub fn count(&self) -> Option<i64> {
		self.count
	}

	fn resolve(&self, path: &str) -> Result<Value, RenderError> {
		let mut segments = path.split('.');
		let Some(first) = segments.next() else {
			return Ok(self.dot.clone());
		};

		let mut current = match (first, self.count) {
			(COUNT_FIELD, Some(count)) => Value::Int(count),
			_ => lookup(self.dot, first).ok_or_else(|| missing(path))?,
		};
		for segment in segments {
			current = lookup(&current, segment).ok_or_else(|| missing(path))?;
		}
		Ok(current)
	}
}

/// Render `template` against `context`
///
/// # Example
/// ```
/// use lexicon_i18n::{RenderContext, Value, render};
///
/// let argument = Value::Int(21);
/// let context = RenderContext::new(&argument);
/// assert_eq!(render("{{ .Count }} minutes to read", &context).unwrap(), "21 minutes to read");
/// assert_eq!(render("{{ . }} minutes to read", &context).unwrap(), "21 minutes to read");
/// ```
pub fn render(template: &str, context: &RenderContext<'_>) -> Result<String, RenderError> {
	if !template.contains("{{") {
		return Ok(template.to_string());
	}

	let mut output = String::with_capacity(template.len());
	let mut last = 0;

	for captures in ACTION.captures_iter(template) {
		let Some(whole) = captures.get(0) else {
			continue;
		};

		let mut literal = &template[last..whole.start()];
		if captures.get(1).is_some() {
			literal = literal.trim_end();
		}
		check_literal(literal)?;
		output.push_str(literal);

		let action = captures.get(2).map_or("", |m| m.as_str()).trim();
		output.push_str(&evaluate(action, context)?);

		last = whole.end();
		if captures.get(3).is_some() {
			last += template[last..].len() - template[last..].trim_start().len();
		}
	}

	let tail = &template[last..];
	check_literal(tail)?;
	output.push_str(tail);
	Ok(output)
}

fn evaluate(action: &str, context: &RenderContext<'_>) -> Result<String, RenderError> {
	if action.starts_with("/*") && action.ends_with("*/") {
		return Ok(String::new());
	}
	if action == "." {
		return Ok(context.dot().to_string());
	}
	match action.strip_prefix('.') {
		Some(path) if is_field_path(path) => Ok(context.resolve(path)?.to_string()),
		_ => Err(RenderError::Syntax {
			message: format!("unsupported action `{{{{ {} }}}}`", action),
		}),
	}
}

fn is_field_path(path: &str) -> bool {
	path.split('.').all(|segment| {
		let mut chars = segment.chars();
		chars
			.next()
			.is_some_and(|c| c.is_alphabetic() || c == '_')
			&& chars.all(|c| c.is_alphanumeric() || c == '_')
	})
}

fn check_literal(literal: &str) -> Result<(), RenderError> {
	if literal.contains("{{") {
		return Err(RenderError::Syntax {
			message: "unclosed action".to_string(),
		});
	}
	Ok(())
}

/// Look up one path segment; map keys and field names are exact
fn lookup(value: &Value, name: &str) -> Option<Value> {
	match value {
		Value::Map(map) => map.get(name).cloned(),
		Value::Record(record) => record.field(name).or_else(|| record.call(name)),
		Value::Ref(inner) => lookup(inner, name),
		_ => None,
	}
}

fn missing(path: &str) -> RenderError {
	RenderError::MissingField {
		path: format!(".{}", path),
	}
}
