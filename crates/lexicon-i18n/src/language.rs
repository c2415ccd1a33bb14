//! Normalized language tags

use crate::I18nError;
use std::fmt;

/// A case-insensitive language identifier such as `es`, `pt-br` or `klingon`
///
/// Tags are stored lower-cased, so two tags compare equal iff their
/// lower-cased forms match.
///
/// # Example
/// ```
/// use lexicon_i18n::LanguageTag;
///
/// assert_eq!(LanguageTag::new("pt-BR"), LanguageTag::new("pt-br"));
/// assert_eq!(LanguageTag::new("pt-BR").primary(), "pt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(String);

impl LanguageTag {
	/// Create a tag from any string, lower-casing it
	pub fn new(tag: impl AsRef<str>) -> Self {
		Self(tag.as_ref().trim().to_lowercase())
	}

	/// Create a tag, rejecting empty input and characters other than
	/// alphanumerics, `-` and `_`
	pub fn parse(tag: &str) -> Result<Self, I18nError> {
		let trimmed = tag.trim();
		if trimmed.is_empty() {
			return Err(I18nError::InvalidLanguageTag(
				"language tag cannot be empty".to_string(),
			));
		}

		if !trimmed
			.chars()
			.all(|c| c.is_alphanumeric() || c == '-' || c == '_')
		{
			return Err(I18nError::InvalidLanguageTag(trimmed.to_string()));
		}

		Ok(Self::new(trimmed))
	}

	/// The normalized tag
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The primary language subtag (`pt` for `pt-br`)
	pub fn primary(&self) -> &str {
		self.0.split(['-', '_']).next().unwrap_or(&self.0)
	}
}

impl fmt::Display for LanguageTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for LanguageTag {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for LanguageTag {
	fn from(tag: &str) -> Self {
		Self::new(tag)
	}
}

impl From<String> for LanguageTag {
	fn from(tag: String) -> Self {
		Self::new(tag)
	}
}

impl From<&LanguageTag> for LanguageTag {
	fn from(tag: &LanguageTag) -> Self {
		tag.clone()
	}
}
