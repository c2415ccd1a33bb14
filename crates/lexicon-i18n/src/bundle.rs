//! Bundle store
//!
//! Holds one catalog per language plus the default language, and answers
//! lookups with a two-level fallback: the requested language first, the
//! default language second.

use crate::catalog::{Catalog, MessageDefinition};
use crate::error::Result;
use crate::language::LanguageTag;
use crate::parser::{CatalogFormat, parse_catalog};
use std::collections::HashMap;

/// Which catalog answered a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
	/// The requested language's own catalog
	Current,
	/// The default language's catalog
	Default,
}

/// A successful lookup
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
	pub definition: &'a MessageDefinition,
	pub source: LookupSource,
}

/// The immutable set of catalogs for every configured language
///
/// Built once through [`BundleBuilder`] and then shared read-only, usually
/// behind an `Arc`, by any number of translating threads.
///
/// # Example
/// ```
/// use lexicon_i18n::{BundleBuilder, CatalogFormat, LookupSource};
///
/// let mut builder = BundleBuilder::new("en");
/// builder.add_source("en", CatalogFormat::Toml, b"[hello]\nother = \"Hello, World!\"").unwrap();
/// builder.add_source("es", CatalogFormat::Toml, b"[goodbye]\nother = \"Adios\"").unwrap();
/// let bundle = builder.build();
///
/// let lookup = bundle.lookup(&"es".into(), "hello").unwrap();
/// assert_eq!(lookup.source, LookupSource::Default);
/// assert!(bundle.lookup(&"es".into(), "missing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Bundle {
	default_language: LanguageTag,
	catalogs: HashMap<LanguageTag, Catalog>,
}

impl Bundle {
	pub fn default_language(&self) -> &LanguageTag {
		&self.default_language
	}

	/// The catalog registered for `language`
	pub fn catalog(&self, language: &LanguageTag) -> Option<&Catalog> {
		self.catalogs.get(language)
	}

	pub fn has_language(&self, language: &LanguageTag) -> bool {
		self.catalogs.contains_key(language)
	}

	/// Loaded languages, sorted
	pub fn languages(&self) -> Vec<&LanguageTag> {
		let mut languages: Vec<_> = self.catalogs.keys().collect();
		languages.sort();
		languages
	}

	/// Find `id` for `language`, falling back to the default language
	pub fn lookup(&self, language: &LanguageTag, id: &str) -> Option<Lookup<'_>> {
		self.lookup_current(language, id)
			.or_else(|| self.lookup_default(id))
	}

	/// Find `id` in the catalog of `language` only
	pub fn lookup_current(&self, language: &LanguageTag, id: &str) -> Option<Lookup<'_>> {
		self.catalogs
			.get(language)
			.and_then(|catalog| catalog.get(id))
			.map(|definition| Lookup {
				definition,
				source: LookupSource::Current,
			})
	}

	/// Find `id` in the default language's catalog
	pub fn lookup_default(&self, id: &str) -> Option<Lookup<'_>> {
		self.catalogs
			.get(&self.default_language)
			.and_then(|catalog| catalog.get(id))
			.map(|definition| Lookup {
				definition,
				source: LookupSource::Default,
			})
	}
}

/// Assembles a [`Bundle`] from catalog sources
///
/// Sources for the same language are merged; ids from earlier sources win.
/// A source that fails to parse is rejected on its own and leaves the
/// builder usable for every other language.
#[derive(Debug, Clone)]
pub struct BundleBuilder {
	default_language: LanguageTag,
	catalogs: HashMap<LanguageTag, Catalog>,
}

impl BundleBuilder {
	pub fn new(default_language: impl Into<LanguageTag>) -> Self {
		Self {
			default_language: default_language.into(),
			catalogs: HashMap::new(),
		}
	}

	/// Parse raw catalog bytes and merge them into the language's catalog
	pub fn add_source(
		&mut self,
		language: impl Into<LanguageTag>,
		format: CatalogFormat,
		bytes: &[u8],
	) -> Result<&mut Self> {
		let catalog = parse_catalog(language, format, bytes)?;
		Ok(self.add_catalog(catalog))
	}

	/// Merge an already-built catalog
	pub fn add_catalog(&mut self, catalog: Catalog) -> &mut Self {
		match self.catalogs.get_mut(catalog.language()) {
			Some(existing) => existing.merge_missing(catalog),
			None => {
				self.catalogs.insert(catalog.language().clone(), catalog);
			}
		}
		self
	}

	pub fn build(self) -> Bundle {
		Bundle {
			default_language: self.default_language,
			catalogs: self.catalogs,
		}
	}
}
