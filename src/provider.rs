//! Translation provider
//!
//! This module provides the `TranslationProvider`, which loads per-language
//! catalog files from disk into a shared bundle and hands out translation
//! functions for templates.

use lexicon_i18n::{
	Bundle, BundleBuilder, CatalogFormat, I18nError, I18nSettings, LanguageTag, Translator, Value,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading catalogs from disk
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	I18n(#[from] I18nError),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Loads catalogs and builds translators for every language
///
/// A language whose catalog cannot be read or parsed is logged and left
/// out; every other language still loads. Languages without a catalog translate from
/// the default language.
#[derive(Debug, Clone)]
pub struct TranslationProvider {
	bundle: Arc<Bundle>,
	settings: I18nSettings,
}

impl TranslationProvider {
	/// Load every `<lang>.<ext>` catalog file in `dir`
	///
	/// A missing directory yields a provider with no catalogs.
	pub fn from_dir(settings: I18nSettings, dir: impl AsRef<Path>) -> ProviderResult<Self> {
		Self::from_dirs(settings, [dir])
	}

	/// Load catalogs from several directories
	///
	/// Directories are listed in priority order: an id defined for a
	/// language in an earlier directory shadows the same id in later ones,
	/// the way a project's catalogs override a theme's.
	pub fn from_dirs<I, P>(settings: I18nSettings, dirs: I) -> ProviderResult<Self>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut builder = BundleBuilder::new(settings.default_language());

		for dir in dirs {
			for (language, format, path) in discover(dir.as_ref())? {
				let Some(bytes) = read_or_warn(&path) else {
					continue;
				};
				add_or_warn(&mut builder, language, format, &bytes);
			}
		}

		Ok(Self::new(settings, builder.build()))
	}

	/// Build a provider from in-memory catalog sources
	pub fn from_sources<I, L, B>(settings: I18nSettings, sources: I) -> Self
	where
		I: IntoIterator<Item = (L, CatalogFormat, B)>,
		L: Into<LanguageTag>,
		B: AsRef<[u8]>,
	{
		let mut builder = BundleBuilder::new(settings.default_language());
		for (language, format, bytes) in sources {
			add_or_warn(&mut builder, language.into(), format, bytes.as_ref());
		}
		Self::new(settings, builder.build())
	}

	pub fn new(settings: I18nSettings, bundle: Bundle) -> Self {
		Self {
			bundle: Arc::new(bundle),
			settings,
		}
	}

	pub fn bundle(&self) -> &Arc<Bundle> {
		&self.bundle
	}

	pub fn settings(&self) -> &I18nSettings {
		&self.settings
	}

	/// Languages with a loaded catalog, sorted
	pub fn languages(&self) -> Vec<&LanguageTag> {
		self.bundle.languages()
	}

	/// A translator for `language` configured from the settings
	pub fn translator(&self, language: impl Into<LanguageTag>) -> Translator {
		Translator::new(Arc::clone(&self.bundle), language)
			.with_placeholders(self.settings.enable_missing_translation_placeholders)
	}

	/// The template-facing translation function for `language`
	///
	/// Never fails. Untranslated ids are logged when `log_i18n_warnings` is
	/// set, and a template that cannot be rendered is logged and yields an
	/// empty string.
	///
	/// # Example
	/// ```
	/// use lexicon::provider::TranslationProvider;
	/// use lexicon::{CatalogFormat, I18nSettings, Value};
	///
	/// let provider = TranslationProvider::from_sources(
	///     I18nSettings::default(),
	///     [("en", CatalogFormat::Toml, "[hello]\nother = \"Hello, World!\"")],
	/// );
	/// let t = provider.func("es");
	///
	/// assert_eq!(t("hello", &Value::Nil), "Hello, World!");
	/// assert_eq!(t("missing", &Value::Nil), "");
	/// ```
	pub fn func(
		&self,
		language: impl Into<LanguageTag>,
	) -> impl Fn(&str, &Value) -> String + Send + Sync + 'static {
		let translator = self.translator(language);
		let log_warnings = self.settings.log_i18n_warnings;

		move |id: &str, argument: &Value| match translator.translate_detailed(id, argument) {
			Ok(translation) => {
				if log_warnings && translation.is_untranslated() {
					let lang = translator.language();
					tracing::warn!(
						target: "i18n",
						lang = %lang,
						id = %id,
						"i18n|MISSING_TRANSLATION|{}|{}",
						lang,
						id
					);
				}
				translation.text
			}
			Err(e) => {
				tracing::warn!(target: "i18n", "Failed to translate {}: {}", id, e);
				String::new()
			}
		}
	}
}

fn add_or_warn(builder: &mut BundleBuilder, language: LanguageTag, format: CatalogFormat, bytes: &[u8]) {
	if let Err(e) = builder.add_source(language.clone(), format, bytes) {
		tracing::warn!("Failed to load translations for {}: {}", language, e);
	}
}

fn read_or_warn(path: &Path) -> Option<Vec<u8>> {
	match std::fs::read(path) {
		Ok(bytes) => Some(bytes),
		Err(e) => {
			tracing::warn!("Failed to read {}: {}", path.display(), e);
			None
		}
	}
}

/// Catalog files in `dir`, sorted by path
fn discover(dir: &Path) -> ProviderResult<Vec<(LanguageTag, CatalogFormat, PathBuf)>> {
	if !dir.exists() {
		tracing::debug!("Translation directory does not exist: {}", dir.display());
		return Ok(Vec::new());
	}

	let mut paths = std::fs::read_dir(dir)
		.map_err(|e| {
			std::io::Error::new(e.kind(), format!("Failed to read translation directory: {}", e))
		})?
		.map(|entry| entry.map(|entry| entry.path()))
		.collect::<Result<Vec<_>, _>>()?;
	paths.sort();

	let mut files = Vec::new();
	for path in paths {
		if !path.is_file() {
			continue;
		}
		let (Some(stem), Some(extension)) = (
			path.file_stem().and_then(|s| s.to_str()),
			path.extension().and_then(|s| s.to_str()),
		) else {
			continue;
		};

		let format = match CatalogFormat::from_extension(extension) {
			Ok(format) => format,
			Err(_) => {
				tracing::debug!("Skipping non-catalog file: {}", path.display());
				continue;
			}
		};
		let language = match LanguageTag::parse(stem) {
			Ok(language) => language,
			Err(e) => {
				tracing::warn!("Skipping {}: {}", path.display(), e);
				continue;
			}
		};
		files.push((language, format, path));
	}

	tracing::debug!("Discovered {} translation files in {}", files.len(), dir.display());
	Ok(files)
}
