//! Translation settings
//!
//! These are the already-resolved configuration values the surrounding build
//! reads from its site configuration. Keys use the `camelCase` spelling of
//! site config files, and unknown keys are ignored so a whole config file can
//! be passed in.

use crate::error::Result;
use crate::language::LanguageTag;
use serde::{Deserialize, Serialize};

/// Settings consumed by the translation layer
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nSettings {
	/// Language whose catalog backs every other language
	#[serde(default = "default_content_language")]
	pub default_content_language: String,

	/// Return `"[i18n] <id>"` for untranslated ids instead of falling back
	#[serde(default)]
	pub enable_missing_translation_placeholders: bool,

	/// Log a warning for every untranslated id
	#[serde(default)]
	pub log_i18n_warnings: bool,
}

fn default_content_language() -> String {
	"en".to_string()
}

impl Default for I18nSettings {
	fn default() -> Self {
		Self {
			default_content_language: default_content_language(),
			enable_missing_translation_placeholders: false,
			log_i18n_warnings: false,
		}
	}
}

impl I18nSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings out of a TOML site configuration
	///
	/// # Example
	/// ```
	/// use lexicon_i18n::I18nSettings;
	///
	/// let settings = I18nSettings::from_toml_str(
	///     "title = \"My Site\"\ndefaultContentLanguage = \"nn\"\nenableMissingTranslationPlaceholders = true",
	/// )
	/// .unwrap();
	///
	/// assert_eq!(settings.default_language().as_str(), "nn");
	/// assert!(settings.enable_missing_translation_placeholders);
	/// assert!(!settings.log_i18n_warnings);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	pub fn with_default_content_language(mut self, language: impl Into<String>) -> Self {
		self.default_content_language = language.into();
		self
	}

	pub fn with_placeholders(mut self, enabled: bool) -> Self {
		self.enable_missing_translation_placeholders = enabled;
		self
	}

	pub fn with_warnings(mut self, enabled: bool) -> Self {
		self.log_i18n_warnings = enabled;
		self
	}

	/// The default content language as a tag
	pub fn default_language(&self) -> LanguageTag {
		LanguageTag::new(&self.default_content_language)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::I18nError;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = I18nSettings::default();

		assert_eq!(settings.default_content_language, "en");
		assert!(!settings.enable_missing_translation_placeholders);
		assert!(!settings.log_i18n_warnings);
	}

	#[rstest]
	fn test_empty_config_uses_defaults() {
		assert_eq!(I18nSettings::from_toml_str("").unwrap(), I18nSettings::default());
	}

	#[rstest]
	fn test_log_warnings_key() {
		let settings = I18nSettings::from_toml_str("logI18nWarnings = true").unwrap();

		assert!(settings.log_i18n_warnings);
	}

	#[rstest]
	fn test_wrong_type_is_settings_error() {
		let result = I18nSettings::from_toml_str("enableMissingTranslationPlaceholders = \"yes\"");

		assert!(matches!(result, Err(I18nError::Settings(_))));
	}

	#[rstest]
	fn test_builder_methods() {
		let settings = I18nSettings::new()
			.with_default_content_language("ES")
			.with_placeholders(true)
			.with_warnings(true);

		assert_eq!(settings.default_language().as_str(), "es");
		assert!(settings.enable_missing_translation_placeholders);
		assert!(settings.log_i18n_warnings);
	}
}
