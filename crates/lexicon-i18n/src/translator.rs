//! Per-language translation entry point

use crate::bundle::{Bundle, Lookup, LookupSource};
use crate::count::resolve_count;
use crate::error::{I18nError, Result};
use crate::language::LanguageTag;
use crate::plural::{PluralCategory, category_for};
use crate::render::{RenderContext, render};
use crate::value::Value;
use std::sync::Arc;

/// Prefix of the text returned for untranslated ids in placeholder mode
pub const PLACEHOLDER_PREFIX: &str = "[i18n] ";

/// Where the returned text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
	/// Rendered from the requested language
	Current,
	/// Rendered from the default language
	Default,
	/// No catalog could supply the id; the text is a placeholder or empty
	Missing,
}

/// A translated string with its lookup outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
	pub text: String,
	pub status: TranslationStatus,
}

impl Translation {
	/// Whether the requested language itself lacked the id
	pub fn is_untranslated(&self) -> bool {
		self.status != TranslationStatus::Current
	}
}

/// Translates message ids for one language
///
/// Cheap to clone and safe to share between threads; all state lives in
/// the shared, immutable [`Bundle`].
///
/// # Example
/// ```
/// use lexicon_i18n::{BundleBuilder, CatalogFormat, Translator, Value};
/// use std::sync::Arc;
///
/// let mut builder = BundleBuilder::new("en");
/// builder
///     .add_source(
///         "en",
///         CatalogFormat::Toml,
///         b"[readingTime]\none = \"One minute to read\"\nother = \"{{ .Count }} minutes to read\"",
///     )
///     .unwrap();
/// let bundle = Arc::new(builder.build());
///
/// let translator = Translator::new(bundle, "en");
/// assert_eq!(translator.translate("readingTime", &Value::Int(1)).unwrap(), "One minute to read");
/// assert_eq!(translator.translate("readingTime", &Value::Int(21)).unwrap(), "21 minutes to read");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
	bundle: Arc<Bundle>,
	language: LanguageTag,
	placeholders: bool,
}

impl Translator {
	pub fn new(bundle: Arc<Bundle>, language: impl Into<LanguageTag>) -> Self {
		Self {
			bundle,
			language: language.into(),
			placeholders: false,
		}
	}

	/// Return `"[i18n] <id>"` instead of falling back when the language
	/// lacks a translation
	pub fn with_placeholders(mut self, enabled: bool) -> Self {
		self.placeholders = enabled;
		self
	}

	pub fn language(&self) -> &LanguageTag {
		&self.language
	}

	pub fn placeholders_enabled(&self) -> bool {
		self.placeholders
	}

	/// Translate `id`, returning only the text
	pub fn translate(&self, id: &str, argument: &Value) -> Result<String> {
		self.translate_detailed(id, argument).map(|t| t.text)
	}

	/// Translate `id` and report which catalog answered
	///
	/// Only render errors are returned as `Err`; a missing id yields a
	/// [`TranslationStatus::Missing`] result.
	pub fn translate_detailed(&self, id: &str, argument: &Value) -> Result<Translation> {
		let count = resolve_count(argument);
		let category = category_for(&self.language, count);

		let selected = self
			.bundle
			.lookup(&self.language, id)
			.and_then(|lookup| self.select(lookup, id, category));

		match selected {
			Some((template, LookupSource::Current)) => Ok(Translation {
				text: self.render(id, template, argument)?,
				status: TranslationStatus::Current,
			}),
			_ if self.placeholders => Ok(Translation {
				text: placeholder(id),
				status: if selected.is_some() {
					TranslationStatus::Default
				} else {
					TranslationStatus::Missing
				},
			}),
			Some((template, LookupSource::Default)) => Ok(Translation {
				text: self.render(id, template, argument)?,
				status: TranslationStatus::Default,
			}),
			None => Ok(Translation {
				text: String::new(),
				status: TranslationStatus::Missing,
			}),
		}
	}

	/// Pick the template for `category`, trying the default language when
	/// the current definition has no usable form
	fn select<'b>(
		&'b self,
		lookup: Lookup<'b>,
		id: &str,
		category: PluralCategory,
	) -> Option<(&'b str, LookupSource)> {
		match lookup.definition.select(category) {
			Some(template) => Some((template, lookup.source)),
			None if lookup.source == LookupSource::Current => self
				.bundle
				.lookup_default(id)
				.and_then(|fallback| {
					fallback
						.definition
						.select(category)
						.map(|template| (template, LookupSource::Default))
				}),
			None => None,
		}
	}

	fn render(&self, id: &str, template: &str, argument: &Value) -> Result<String> {
		render(template, &RenderContext::new(argument)).map_err(|source| I18nError::Render {
			id: id.to_string(),
			source,
		})
	}
}

/// The placeholder text for an untranslated id
pub fn placeholder(id: &str) -> String {
	format!("{}{}", PLACEHOLDER_PREFIX, id)
}
