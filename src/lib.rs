//! # Lexicon
//!
//! Multilingual message resolution for static site builds.
//!
//! Lexicon translates message ids into per-language, correctly pluralized
//! text. The core engine lives in [`lexicon_i18n`] and is re-exported here;
//! this crate adds the parts that touch the outside world, loading catalog
//! files from disk and logging untranslated ids.
//!
//! ## Catalogs
//!
//! One file per language, named after the language tag (`en.toml`,
//! `pt-br.yaml`, `nn.json`):
//!
//! ```toml
//! [readingTime]
//! one = "One minute to read"
//! other = "{{ .Count }} minutes to read"
//!
//! [menu]
//! home = "Home"
//! ```
//!
//! ## Quick Example
//!
//! ```
//! use lexicon::prelude::*;
//!
//! let settings = I18nSettings::from_toml_str("defaultContentLanguage = \"en\"").unwrap();
//! let provider = TranslationProvider::from_sources(
//!     settings,
//!     [
//!         ("en", CatalogFormat::Toml, "[readingTime]\none = \"One minute to read\"\nother = \"{{ .Count }} minutes to read\"\n[menu]\nhome = \"Home\""),
//!         ("nn", CatalogFormat::Toml, "[readingTime]\none = \"Eitt minutt\"\nother = \"{{ .Count }} minutt\""),
//!     ],
//! );
//!
//! let t = provider.func("nn");
//! assert_eq!(t("readingTime", &Value::Int(1)), "Eitt minutt");
//! assert_eq!(t("readingTime", &Value::Int(5)), "5 minutt");
//! assert_eq!(t("menu.home", &Value::Nil), "Home");
//! ```

pub mod provider;

pub use lexicon_i18n as i18n;

pub use lexicon_i18n::{
	Bundle, BundleBuilder, Catalog, CatalogFormat, I18nError, I18nSettings, LanguageTag,
	MessageDefinition, PluralCategory, Record, RenderError, SerializedRecord, Translation,
	TranslationStatus, Translator, Value,
};
pub use provider::{ProviderError, ProviderResult, TranslationProvider};

pub mod prelude {
	pub use crate::{
		CatalogFormat, I18nSettings, LanguageTag, Record, TranslationProvider, Translator, Value,
	};
}
