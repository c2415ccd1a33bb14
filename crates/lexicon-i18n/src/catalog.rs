//! Message catalog for storing one language's translations

use crate::language::LanguageTag;
use crate::plural::PluralCategory;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A translatable message as written in a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDefinition {
	/// A single string used for every count
	Flat(String),
	/// One template per plural category
	Plural(BTreeMap<PluralCategory, String>),
}

impl MessageDefinition {
	/// Build a plural definition from `(category, template)` pairs
	pub fn plural<I, S>(forms: I) -> Self
	where
		I: IntoIterator<Item = (PluralCategory, S)>,
		S: Into<String>,
	{
		Self::Plural(forms.into_iter().map(|(c, s)| (c, s.into())).collect())
	}

	/// Select the template for `category`
	///
	/// A missing category falls back to `other`. A definition holding only
	/// a single form serves it for every category, so catalogs that only
	/// ever define `one` still produce text. Returns `None` only when several
	/// forms exist and neither the category nor `other` is among them.
	pub fn select(&self, category: PluralCategory) -> Option<&str> {
		match self {
			Self::Flat(template) => Some(template),
			Self::Plural(forms) => forms
				.get(&category)
				.or_else(|| forms.get(&PluralCategory::Other))
				.or_else(|| match forms.len() {
					1 => forms.values().next(),
					_ => None,
				})
				.map(String::as_str),
		}
	}

	pub fn is_plural(&self) -> bool {
		matches!(self, Self::Plural(_))
	}
}

/// A message catalog containing translations for a specific language
///
/// # Example
/// ```
/// use lexicon_i18n::{Catalog, MessageDefinition, PluralCategory};
///
/// let mut catalog = Catalog::new("fr");
/// catalog.add_translation("hello", "Bonjour");
/// catalog.add_plural(
///     "items",
///     [(PluralCategory::One, "un article"), (PluralCategory::Other, "{{ .Count }} articles")],
/// );
///
/// assert_eq!(catalog.get("hello"), Some(&MessageDefinition::Flat("Bonjour".to_string())));
/// assert!(catalog.get("items").is_some_and(MessageDefinition::is_plural));
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
	language: LanguageTag,
	messages: IndexMap<String, MessageDefinition>,
}

impl Catalog {
	/// Create an empty catalog for the given language
	pub fn new(language: impl Into<LanguageTag>) -> Self {
		Self {
			language: language.into(),
			messages: IndexMap::new(),
		}
	}

	pub fn language(&self) -> &LanguageTag {
		&self.language
	}

	/// Add a flat translation
	pub fn add_translation(&mut self, id: impl Into<String>, translation: impl Into<String>) {
		self.messages
			.insert(id.into(), MessageDefinition::Flat(translation.into()));
	}

	/// Add a plural translation
	pub fn add_plural<I, S>(&mut self, id: impl Into<String>, forms: I)
	where
		I: IntoIterator<Item = (PluralCategory, S)>,
		S: Into<String>,
	{
		self.messages
			.insert(id.into(), MessageDefinition::plural(forms));
	}

	/// Insert a definition, replacing any previous one for `id`
	pub fn insert(&mut self, id: impl Into<String>, definition: MessageDefinition) {
		self.messages.insert(id.into(), definition);
	}

	/// Get the definition for an exact message id
	pub fn get(&self, id: &str) -> Option<&MessageDefinition> {
		self.messages.get(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.messages.contains_key(id)
	}

	/// Message ids in catalog order
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.messages.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Fill in ids missing from this catalog with those of `other`
	///
	/// Ids already present are kept, so the first catalog merged for a
	/// language has the highest priority.
	pub fn merge_missing(&mut self, other: Catalog) {
		for (id, definition) in other.messages {
			self.messages.entry(id).or_insert(definition);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_catalog_basic() {
		// Arrange
		let mut catalog = Catalog::new("es");
		catalog.add_translation("goodMorning", "Buenos días");

		// Act
		let result = catalog.get("goodMorning");
		let missing = catalog.get("unknown");

		// Assert
		assert_eq!(
			result,
			Some(&MessageDefinition::Flat("Buenos días".to_string()))
		);
		assert_eq!(missing, None);
		assert_eq!(catalog.language().as_str(), "es");
	}

	#[rstest]
	fn test_dotted_id_is_stored_verbatim() {
		// Arrange
		let mut catalog = Catalog::new("en");
		catalog.add_translation("shop_nextPage.one", "Show Me The Money");

		// Act & Assert
		assert!(catalog.contains("shop_nextPage.one"));
		assert!(!catalog.contains("shop_nextPage"));
	}

	#[rstest]
	#[case(PluralCategory::One, Some("one car"))]
	#[case(PluralCategory::Other, Some("cars"))]
	#[case(PluralCategory::Few, Some("cars"))]
	fn test_select_falls_back_to_other(
		#[case] category: PluralCategory,
		#[case] expected: Option<&str>,
	) {
		let definition = MessageDefinition::plural([
			(PluralCategory::One, "one car"),
			(PluralCategory::Other, "cars"),
		]);

		assert_eq!(definition.select(category), expected);
	}

	#[rstest]
	fn test_select_single_form_serves_every_category() {
		let definition = MessageDefinition::plural([(PluralCategory::One, "abc")]);

		assert_eq!(definition.select(PluralCategory::One), Some("abc"));
		assert_eq!(definition.select(PluralCategory::Other), Some("abc"));
	}

	#[rstest]
	fn test_select_without_other_or_match() {
		let definition = MessageDefinition::plural([
			(PluralCategory::One, "jeden"),
			(PluralCategory::Few, "kilka"),
		]);

		assert_eq!(definition.select(PluralCategory::Many), None);
	}

	#[rstest]
	fn test_flat_ignores_category() {
		let definition = MessageDefinition::Flat("hi".to_string());

		assert_eq!(definition.select(PluralCategory::Two), Some("hi"));
		assert!(!definition.is_plural());
	}

	#[rstest]
	fn test_merge_missing_keeps_existing_ids() {
		// Arrange
		let mut project = Catalog::new("en");
		project.add_translation("title", "My Site");
		let mut theme = Catalog::new("en");
		theme.add_translation("title", "Theme Default");
		theme.add_translation("readMore", "Read more");

		// Act
		project.merge_missing(theme);

		// Assert
		assert_eq!(project.len(), 2);
		assert_eq!(
			project.get("title"),
			Some(&MessageDefinition::Flat("My Site".to_string()))
		);
		assert!(project.contains("readMore"));
		assert_eq!(project.ids().collect::<Vec<_>>(), vec!["title", "readMore"]);
	}
}
