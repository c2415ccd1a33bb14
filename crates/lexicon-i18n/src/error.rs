//! Error types for catalog loading and message rendering

/// Errors raised while rendering a selected message template
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
	#[error("field `{path}` cannot be resolved against the argument")]
	MissingField { path: String },

	#[error("template syntax error: {message}")]
	Syntax { message: String },
}

/// Errors produced by the i18n core
///
/// A missing translation is never an error; it is reported through
/// [`crate::TranslationStatus::Missing`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
	#[error("malformed catalog for language '{language}': {message}")]
	MalformedCatalog { language: String, message: String },

	#[error("unsupported catalog format: {0}")]
	UnsupportedFormat(String),

	#[error("invalid language tag: {0}")]
	InvalidLanguageTag(String),

	#[error("failed to render message '{id}': {source}")]
	Render {
		id: String,
		#[source]
		source: RenderError,
	},

	#[error("invalid i18n settings: {0}")]
	Settings(#[from] toml::de::Error),
}

impl I18nError {
	pub(crate) fn malformed(language: impl Into<String>, message: impl Into<String>) -> Self {
		Self::MalformedCatalog {
			language: language.into(),
			message: message.into(),
		}
	}
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, I18nError>;
