//! # Lexicon i18n
//!
//! Per-language message resolution and pluralization.
//!
//! Given a message id, a language and an optional argument, a [`Translator`]
//! returns the localized, correctly pluralized string. Two fallback axes are
//! kept apart:
//!
//! - **text**: a message missing from a language's catalog is taken from the
//!   default language's catalog;
//! - **grammar**: a language without registered plural rules pluralizes like
//!   English while still using its own text.
//!
//! The crate performs no filesystem I/O; catalogs arrive as bytes.
//!
//! ## Example
//!
//! ```
//! use lexicon_i18n::{BundleBuilder, CatalogFormat, Translator, Value};
//! use std::sync::Arc;
//!
//! let mut builder = BundleBuilder::new("en");
//! builder
//!     .add_source("en", CatalogFormat::Toml, b"[readingTime]\none = \"one minute read\"\nother = \"{{.Count}} minutes read\"")
//!     .unwrap();
//! builder
//!     .add_source("klingon", CatalogFormat::Toml, b"[readingTime]\none = \"eitt minutt med lesing\"\nother = \"{{ .Count }} minuttar lesing\"")
//!     .unwrap();
//! let bundle = Arc::new(builder.build());
//!
//! let klingon = Translator::new(bundle, "klingon");
//! assert_eq!(klingon.translate("readingTime", &Value::Int(3)).unwrap(), "3 minuttar lesing");
//! ```

pub mod bundle;
pub mod catalog;
pub mod count;
pub mod error;
pub mod language;
pub mod parser;
pub mod plural;
pub mod render;
pub mod settings;
pub mod translator;
pub mod value;

pub use bundle::{Bundle, BundleBuilder, Lookup, LookupSource};
pub use catalog::{Catalog, MessageDefinition};
pub use count::{COUNT_FIELD, resolve_count};
pub use error::{I18nError, RenderError, Result};
pub use language::LanguageTag;
pub use parser::{CatalogFormat, parse, parse_catalog};
pub use plural::{PluralCategory, PluralRule, category_for, has_rule, rule_for};
pub use render::{RenderContext, render};
pub use settings::I18nSettings;
pub use translator::{PLACEHOLDER_PREFIX, Translation, TranslationStatus, Translator, placeholder};
pub use value::{Record, SerializedRecord, Value};
