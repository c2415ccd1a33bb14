//! Catalog parser
//!
//! Turns one language's raw catalog bytes into a [`Catalog`]. TOML, YAML and
//! JSON sources share one data model:
//!
//! - a string value is a flat message;
//! - a table holding any reserved message key (`one`, `other`, `description`,
//!   ...) is a single message with plural forms;
//! - any other table nests message ids, joined with `.`;
//! - a top-level list of `{ id, translation }` objects is the legacy form.
//!
//! A quoted key such as `"shop_nextPage.one"` is a single literal id, while
//! the bare dotted key `foo.one` is the table `foo` with the form `one`.

use crate::catalog::{Catalog, MessageDefinition};
use crate::error::{I18nError, Result};
use crate::language::LanguageTag;
use crate::plural::PluralCategory;
use std::collections::BTreeMap;
use std::fmt;

/// Keys that mark a table as a message rather than a namespace
const RESERVED_KEYS: &[&str] = &[
	"id",
	"description",
	"hash",
	"leftdelim",
	"rightdelim",
	"translation",
	"zero",
	"one",
	"two",
	"few",
	"many",
	"other",
];

/// Source format of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFormat {
	Toml,
	Yaml,
	Json,
}

impl CatalogFormat {
	/// Determine the format from a file extension, without the leading dot
	pub fn from_extension(extension: &str) -> Result<Self> {
		match extension.to_ascii_lowercase().as_str() {
			"toml" => Ok(Self::Toml),
			"yaml" | "yml" => Ok(Self::Yaml),
			"json" => Ok(Self::Json),
			other => Err(I18nError::UnsupportedFormat(other.to_string())),
		}
	}

	pub fn extension(&self) -> &'static str {
		match self {
			Self::Toml => "toml",
			Self::Yaml => "yaml",
			Self::Json => "json",
		}
	}
}

impl fmt::Display for CatalogFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

/// Format-independent view of a decoded source
enum Node {
	Null,
	String(String),
	Table(Vec<(String, Node)>),
	List(Vec<Node>),
	Other(&'static str),
}

impl Node {
	fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::String(_) => "string",
			Self::Table(_) => "table",
			Self::List(_) => "array",
			Self::Other(kind) => kind,
		}
	}
}

/// Parse a TOML catalog
///
/// # Example
/// ```
/// use lexicon_i18n::{MessageDefinition, PluralCategory, parse};
///
/// let catalog = parse("en", b"[readingTime]\none = \"One minute\"\nother = \"Many\"").unwrap();
/// let definition = catalog.get("readingTime").unwrap();
/// assert_eq!(definition.select(PluralCategory::One), Some("One minute"));
///
/// assert!(parse("en", b"").unwrap().is_empty());
/// ```
pub fn parse(language: impl Into<LanguageTag>, bytes: &[u8]) -> Result<Catalog> {
	parse_catalog(language, CatalogFormat::Toml, bytes)
}

/// Parse a catalog in the given format
///
/// Empty or whitespace-only input yields an empty catalog.
pub fn parse_catalog(
	language: impl Into<LanguageTag>,
	format: CatalogFormat,
	bytes: &[u8],
) -> Result<Catalog> {
	let language = language.into();
	let mut catalog = Catalog::new(language.clone());
	let malformed = |message: String| I18nError::malformed(language.as_str(), message);

	let text = std::str::from_utf8(bytes)
		.map_err(|e| malformed(format!("catalog is not valid UTF-8: {}", e)))?;
	if text.trim().is_empty() {
		return Ok(catalog);
	}

	match decode(format, text).map_err(malformed)? {
		Node::Null => {}
		Node::Table(entries) => collect_messages(&mut catalog, None, entries)?,
		Node::List(items) => collect_message_list(&mut catalog, items)?,
		other => {
			return Err(malformed(format!(
				"expected a table of messages, found {}",
				other.kind()
			)));
		}
	}

	Ok(catalog)
}

fn decode(format: CatalogFormat, text: &str) -> std::result::Result<Node, String> {
	match format {
		CatalogFormat::Toml => toml::from_str::<toml::Table>(text)
			.map(|table| Node::from(toml::Value::Table(table)))
			.map_err(|e| format!("invalid TOML: {}", e)),
		CatalogFormat::Yaml => serde_yaml::from_str::<serde_yaml::Value>(text)
			.map_err(|e| format!("invalid YAML: {}", e))
			.and_then(Node::try_from),
		CatalogFormat::Json => serde_json::from_str::<serde_json::Value>(text)
			.map(Node::from)
			.map_err(|e| format!("invalid JSON: {}", e)),
	}
}

fn collect_messages(
	catalog: &mut Catalog,
	prefix: Option<&str>,
	entries: Vec<(String, Node)>,
) -> Result<()> {
	for (key, node) in entries {
		let id = match prefix {
			Some(prefix) => format!("{}.{}", prefix, key),
			None => key,
		};

		match node {
			Node::String(text) => catalog.insert(id, MessageDefinition::Flat(text)),
			Node::Table(fields) if is_message(&fields) => {
				match message_from_fields(catalog.language(), &id, fields)? {
					Some(definition) => catalog.insert(id, definition),
					None => tracing::debug!(
						language = %catalog.language(),
						id = %id,
						"skipping message without translation"
					),
				}
			}
			Node::Table(fields) => collect_messages(catalog, Some(&id), fields)?,
			other => {
				return Err(I18nError::malformed(
					catalog.language().as_str(),
					format!("message '{}' has unsupported value type {}", id, other.kind()),
				));
			}
		}
	}
	Ok(())
}

fn collect_message_list(catalog: &mut Catalog, items: Vec<Node>) -> Result<()> {
	for (index, item) in items.into_iter().enumerate() {
		let fields = match item {
			Node::Table(fields) => fields,
			other => {
				return Err(I18nError::malformed(
					catalog.language().as_str(),
					format!("list entry {} is a {}, expected a table", index, other.kind()),
				));
			}
		};

		let id = fields.iter().find_map(|(key, value)| match value {
			Node::String(id) if key.eq_ignore_ascii_case("id") => Some(id.clone()),
			_ => None,
		});
		let Some(id) = id else {
			return Err(I18nError::malformed(
				catalog.language().as_str(),
				format!("list entry {} has no string `id`", index),
			));
		};

		if let Some(definition) = message_from_fields(catalog.language(), &id, fields)? {
			catalog.insert(id, definition);
		}
	}
	Ok(())
}

fn is_message(fields: &[(String, Node)]) -> bool {
	fields.iter().any(|(key, value)| match value {
		Node::String(_) => RESERVED_KEYS.iter().any(|r| key.eq_ignore_ascii_case(r)),
		Node::Table(_) => key.eq_ignore_ascii_case("translation"),
		_ => false,
	})
}

fn message_from_fields(
	language: &LanguageTag,
	id: &str,
	fields: Vec<(String, Node)>,
) -> Result<Option<MessageDefinition>> {
	let mut forms = BTreeMap::new();
	let mut flat = None;

	for (key, value) in fields {
		if key.eq_ignore_ascii_case("translation") {
			match value {
				Node::String(text) => flat = Some(text),
				Node::Table(nested) => {
					if let Some(MessageDefinition::Plural(nested_forms)) =
						message_from_fields(language, id, nested)?
					{
						forms.extend(nested_forms);
					}
				}
				other => return Err(unexpected_form(language, id, &key, &other)),
			}
		} else if let Ok(category) = key.parse::<PluralCategory>() {
			match value {
				Node::String(text) => {
					forms.insert(category, text);
				}
				other => return Err(unexpected_form(language, id, &key, &other)),
			}
		}
	}

	if !forms.is_empty() {
		Ok(Some(MessageDefinition::Plural(forms)))
	} else {
		Ok(flat.map(MessageDefinition::Flat))
	}
}

fn unexpected_form(language: &LanguageTag, id: &str, key: &str, value: &Node) -> I18nError {
	I18nError::malformed(
		language.as_str(),
		format!(
			"form '{}' of message '{}' must be a string, found {}",
			key,
			id,
			value.kind()
		),
	)
}

impl From<toml::Value> for Node {
	fn from(value: toml::Value) -> Self {
		match value {
			toml::Value::String(s) => Self::String(s),
			toml::Value::Table(table) => {
				Self::Table(table.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
			}
			toml::Value::Array(items) => Self::List(items.into_iter().map(Node::from).collect()),
			toml::Value::Integer(_) => Self::Other("integer"),
			toml::Value::Float(_) => Self::Other("float"),
			toml::Value::Boolean(_) => Self::Other("boolean"),
			toml::Value::Datetime(_) => Self::Other("datetime"),
		}
	}
}

impl From<serde_json::Value> for Node {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::String(s) => Self::String(s),
			serde_json::Value::Object(map) => {
				Self::Table(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
			}
			serde_json::Value::Array(items) => Self::List(items.into_iter().map(Node::from).collect()),
			serde_json::Value::Number(_) => Self::Other("number"),
			serde_json::Value::Bool(_) => Self::Other("boolean"),
		}
	}
}

impl TryFrom<serde_yaml::Value> for Node {
	type Error = String;

	fn try_from(value: serde_yaml::Value) -> std::result::Result<Self, Self::Error> {
		Ok(match value {
			serde_yaml::Value::Null => Self::Null,
			serde_yaml::Value::String(s) => Self::String(s),
			serde_yaml::Value::Mapping(mapping) => {
				let mut entries = Vec::with_capacity(mapping.len());
				for (key, value) in mapping {
					let key = match key {
						serde_yaml::Value::String(s) => s,
						serde_yaml::Value::Number(n) => n.to_string(),
						serde_yaml::Value::Bool(b) => b.to_string(),
						other => return Err(format!("unsupported YAML key: {:?}", other)),
					};
					entries.push((key, Node::try_from(value)?));
				}
				Self::Table(entries)
			}
			serde_yaml::Value::Sequence(items) => Self::List(
				items
					.into_iter()
					.map(Node::try_from)
					.collect::<std::result::Result<_, _>>()?,
			),
			serde_yaml::Value::Number(_) => Self::Other("number"),
			serde_yaml::Value::Bool(_) => Self::Other("boolean"),
			serde_yaml::Value::Tagged(tagged) => Node::try_from(tagged.value)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn flat(text: &str) -> MessageDefinition {
		MessageDefinition::Flat(text.to_string())
	}

	#[rstest]
	#[case(b"" as &[u8])]
	#[case(b"   \n\t")]
	fn test_empty_input_yields_empty_catalog(#[case] input: &[u8]) {
		for format in [CatalogFormat::Toml, CatalogFormat::Yaml, CatalogFormat::Json] {
			let catalog = parse_catalog("en", format, input).unwrap();
			assert!(catalog.is_empty(), "{} should parse to an empty catalog", format);
		}
	}

	#[rstest]
	fn test_quoted_dotted_key_is_literal_id() {
		// Arrange
		let source = br#""shop_nextPage.one" = "Show Me The Money""#;

		// Act
		let catalog = parse("en", source).unwrap();

		// Assert
		assert_eq!(
			catalog.get("shop_nextPage.one"),
			Some(&flat("Show Me The Money"))
		);
		assert!(catalog.get("shop_nextPage").is_none());
	}

	#[rstest]
	fn test_bare_dotted_key_is_plural_table() {
		// Arrange
		let source = br#"foo.one =  "abc""#;

		// Act
		let catalog = parse("pt-br", source).unwrap();

		// Assert
		let definition = catalog.get("foo").unwrap();
		assert_eq!(definition.select(PluralCategory::One), Some("abc"));
		assert!(catalog.get("foo.one").is_none());
	}

	#[rstest]
	fn test_namespace_tables_nest_ids() {
		// Arrange
		let source = b"[menu]\nhome = \"Home\"\n[menu.posts]\nother = \"Posts\"\n";

		// Act
		let catalog = parse("en", source).unwrap();

		// Assert
		assert_eq!(catalog.get("menu.home"), Some(&flat("Home")));
		assert_eq!(
			catalog
				.get("menu.posts")
				.and_then(|d| d.select(PluralCategory::One)),
			Some("Posts")
		);
	}

	#[rstest]
	fn test_description_is_ignored() {
		let source = b"[hello]\ndescription = \"Greeting\"\nother = \"Hello\"\n";

		let catalog = parse("en", source).unwrap();

		assert_eq!(
			catalog.get("hello"),
			Some(&MessageDefinition::plural([(PluralCategory::Other, "Hello")]))
		);
	}

	#[rstest]
	fn test_description_only_message_is_skipped() {
		let catalog = parse("en", b"[todo]\ndescription = \"Not translated yet\"\n").unwrap();

		assert!(catalog.is_empty());
	}

	#[rstest]
	fn test_yaml_catalog() {
		// Arrange
		let source = b"hello: Hola\nreadingTime:\n  one: Un minuto\n  other: \"{{ .Count }} minutos\"\n";

		// Act
		let catalog = parse_catalog("es", CatalogFormat::Yaml, source).unwrap();

		// Assert
		assert_eq!(catalog.get("hello"), Some(&flat("Hola")));
		assert_eq!(
			catalog
				.get("readingTime")
				.and_then(|d| d.select(PluralCategory::Other)),
			Some("{{ .Count }} minutos")
		);
	}

	#[rstest]
	fn test_json_catalog() {
		let source = br#"{"hello": {"other": "Bonjour"}, "bye": "Au revoir"}"#;

		let catalog = parse_catalog("fr", CatalogFormat::Json, source).unwrap();

		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.get("bye"), Some(&flat("Au revoir")));
	}

	#[rstest]
	fn test_legacy_list_form() {
		// Arrange
		let source = br#"[
			{"id": "hello", "translation": "Hallo"},
			{"id": "items", "translation": {"one": "ein Artikel", "other": "Artikel"}}
		]"#;

		// Act
		let catalog = parse_catalog("de", CatalogFormat::Json, source).unwrap();

		// Assert
		assert_eq!(catalog.get("hello"), Some(&flat("Hallo")));
		assert_eq!(
			catalog.get("items").and_then(|d| d.select(PluralCategory::One)),
			Some("ein Artikel")
		);
	}

	#[rstest]
	fn test_legacy_list_entry_without_id_is_malformed() {
		let source = br#"[{"translation": "Hallo"}]"#;

		let result = parse_catalog("de", CatalogFormat::Json, source);

		assert!(matches!(result, Err(I18nError::MalformedCatalog { .. })));
	}

	#[rstest]
	#[case(CatalogFormat::Toml, b"[hello\nother = \"x\"" as &[u8])]
	#[case(CatalogFormat::Toml, b"count = 3")]
	#[case(CatalogFormat::Toml, b"[hello]\nother = 3")]
	#[case(CatalogFormat::Json, b"{\"hello\": ")]
	#[case(CatalogFormat::Json, b"\"just a string\"")]
	#[case(CatalogFormat::Yaml, b"hello: [unclosed")]
	#[case(CatalogFormat::Toml, b"\xff\xfe")]
	fn test_malformed_sources(#[case] format: CatalogFormat, #[case] source: &[u8]) {
		// Act
		let result = parse_catalog("xx", format, source);

		// Assert
		match result {
			Err(I18nError::MalformedCatalog { language, .. }) => assert_eq!(language, "xx"),
			other => panic!("expected MalformedCatalog, got {:?}", other),
		}
	}

	#[rstest]
	#[case("toml", CatalogFormat::Toml)]
	#[case("YAML", CatalogFormat::Yaml)]
	#[case("yml", CatalogFormat::Yaml)]
	#[case("json", CatalogFormat::Json)]
	fn test_format_from_extension(#[case] extension: &str, #[case] expected: CatalogFormat) {
		assert_eq!(CatalogFormat::from_extension(extension).unwrap(), expected);
	}

	#[rstest]
	fn test_unknown_extension_is_unsupported() {
		assert!(matches!(
			CatalogFormat::from_extension("po"),
			Err(I18nError::UnsupportedFormat(ext)) if ext == "po"
		));
	}
}
