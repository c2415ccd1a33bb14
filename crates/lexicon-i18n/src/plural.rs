//! Locale plural rules
//!
//! Maps a language tag to a function selecting a CLDR plural category for an
//! integer count. Tags without a registered rule borrow the English rule;
//! message text is unaffected by that fallback.

use crate::language::LanguageTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A CLDR plural category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluralCategory {
	Zero,
	One,
	Two,
	Few,
	Many,
	Other,
}

impl PluralCategory {
	/// All categories in CLDR order
	pub const ALL: [PluralCategory; 6] = [
		Self::Zero,
		Self::One,
		Self::Two,
		Self::Few,
		Self::Many,
		Self::Other,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Zero => "zero",
			Self::One => "one",
			Self::Two => "two",
			Self::Few => "few",
			Self::Many => "many",
			Self::Other => "other",
		}
	}
}

impl fmt::Display for PluralCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PluralCategory {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|c| c.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("unknown plural category: {}", s))
	}
}

/// A plural selection function over the absolute value of a count
pub type PluralRule = fn(u64) -> PluralCategory;

/// Tag whose rule serves every unregistered language
pub const FALLBACK_RULE_TAG: &str = "en";

static RULES: Lazy<HashMap<&'static str, PluralRule>> = Lazy::new(|| {
	let mut rules: HashMap<&'static str, PluralRule> = HashMap::new();
	let mut register = |tags: &[&'static str], rule: PluralRule| {
		for tag in tags {
			rules.insert(*tag, rule);
		}
	};

	register(
		&[
			"en", "de", "nl", "sv", "da", "nb", "nn", "no", "it", "es", "el", "fi", "et", "hu",
			"bg", "ca", "eu", "gl", "af", "sq", "az", "eo", "fo", "fy", "ka", "kk", "ky", "lb",
			"ml", "mn", "ne", "oc", "or", "ps", "so", "sw", "ta", "te", "tk", "ur", "uz", "tr",
			"pt-pt", "mr",
		],
		one_other,
	);
	register(
		&[
			"ja", "zh", "ko", "vi", "th", "id", "ms", "lo", "my", "km", "jv", "bo", "dz", "yo",
		],
		other_only,
	);
	register(
		&[
			"fr", "pt", "pt-br", "ff", "kab", "hi", "bn", "gu", "pa", "am", "zu", "hy", "fa",
			"kn",
		],
		zero_one_as_one,
	);
	register(&["is", "mk"], last_digit_one);
	register(&["he", "iw"], hebrew);
	register(&["ru", "uk", "be"], east_slavic);
	register(&["sr", "hr", "bs", "sh"], south_slavic);
	register(&["pl"], polish);
	register(&["cs", "sk"], czech);
	register(&["sl"], slovenian);
	register(&["lt"], lithuanian);
	register(&["lv"], latvian);
	register(&["ro", "mo"], romanian);
	register(&["ar"], arabic);
	register(&["ga"], irish);
	register(&["cy"], welsh);

	rules
});

/// Whether a rule is registered for the tag itself or its primary subtag
pub fn has_rule(tag: &LanguageTag) -> bool {
	registered_rule(tag).is_some()
}

/// The rule governing `tag`, falling back to English
///
/// Lookup tries the full tag (with `_` read as `-`), then the primary subtag.
pub fn rule_for(tag: &LanguageTag) -> PluralRule {
	registered_rule(tag)
		.or_else(|| RULES.get(FALLBACK_RULE_TAG).copied())
		.unwrap_or(one_other)
}

/// Select the plural category for `count` in `tag`
///
/// # Example
/// ```
/// use lexicon_i18n::{LanguageTag, PluralCategory, category_for};
///
/// assert_eq!(category_for(&LanguageTag::new("en"), 1), PluralCategory::One);
/// assert_eq!(category_for(&LanguageTag::new("klingon"), 3), PluralCategory::Other);
/// assert_eq!(category_for(&LanguageTag::new("ru"), 3), PluralCategory::Few);
/// ```
pub fn category_for(tag: &LanguageTag, count: i64) -> PluralCategory {
	rule_for(tag)(count.unsigned_abs())
}

fn registered_rule(tag: &LanguageTag) -> Option<PluralRule> {
	let full = tag.as_str().replace('_', "-");
	RULES
		.get(full.as_str())
		.or_else(|| RULES.get(tag.primary()))
		.copied()
}

fn one_other(n: u64) -> PluralCategory {
	if n == 1 {
		PluralCategory::One
	} else {
		PluralCategory::Other
	}
}

fn other_only(_n: u64) -> PluralCategory {
	PluralCategory::Other
}

// 0 and 1 are singular
fn zero_one_as_one(n: u64) -> PluralCategory {
	if n <= 1 {
		PluralCategory::One
	} else {
		PluralCategory::Other
	}
}

// 1, 21, 31, ... but not 11
fn last_digit_one(n: u64) -> PluralCategory {
	if n % 10 == 1 && n % 100 != 11 {
		PluralCategory::One
	} else {
		PluralCategory::Other
	}
}

fn hebrew(n: u64) -> PluralCategory {
	match n {
		1 => PluralCategory::One,
		2 => PluralCategory::Two,
		_ => PluralCategory::Other,
	}
}

fn east_slavic(n: u64) -> PluralCategory {
	let (n10, n100) = (n % 10, n % 100);
	if n10 == 1 && n100 != 11 {
		PluralCategory::One
	} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
		PluralCategory::Few
	} else {
		PluralCategory::Many
	}
}

fn south_slavic(n: u64) -> PluralCategory {
	match east_slavic(n) {
		PluralCategory::Many => PluralCategory::Other,
		category => category,
	}
}

fn polish(n: u64) -> PluralCategory {
	let (n10, n100) = (n % 10, n % 100);
	if n == 1 {
		PluralCategory::One
	} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
		PluralCategory::Few
	} else {
		PluralCategory::Many
	}
}

fn czech(n: u64) -> PluralCategory {
	match n {
		1 => PluralCategory::One,
		2..=4 => PluralCategory::Few,
		_ => PluralCategory::Other,
	}
}

fn slovenian(n: u64) -> PluralCategory {
	match n % 100 {
		1 => PluralCategory::One,
		2 => PluralCategory::Two,
		3 | 4 => PluralCategory::Few,
		_ => PluralCategory::Other,
	}
}

fn lithuanian(n: u64) -> PluralCategory {
	let (n10, n100) = (n % 10, n % 100);
	if (11..=19).contains(&n100) {
		PluralCategory::Other
	} else if n10 == 1 {
		PluralCategory::One
	} else if n10 >= 2 {
		PluralCategory::Few
	} else {
		PluralCategory::Other
	}
}

fn latvian(n: u64) -> PluralCategory {
	let (n10, n100) = (n % 10, n % 100);
	if n10 == 0 || (11..=19).contains(&n100) {
		PluralCategory::Zero
	} else if n10 == 1 {
		PluralCategory::One
	} else {
		PluralCategory::Other
	}
}

fn romanian(n: u64) -> PluralCategory {
	let n100 = n % 100;
	if n == 1 {
		PluralCategory::One
	} else if n == 0 || (1..=19).contains(&n100) {
		PluralCategory::Few
	} else {
		PluralCategory::Other
	}
}

fn arabic(n: u64) -> PluralCategory {
	match (n, n % 100) {
		(0, _) => PluralCategory::Zero,
		(1, _) => PluralCategory::One,
		(2, _) => PluralCategory::Two,
		(_, 3..=10) => PluralCategory::Few,
		(_, 11..=99) => PluralCategory::Many,
		_ => PluralCategory::Other,
	}
}

fn irish(n: u64) -> PluralCategory {
	match n {
		1 => PluralCategory::One,
		2 => PluralCategory::Two,
		3..=6 => PluralCategory::Few,
		7..=10 => PluralCategory::Many,
		_ => PluralCategory::Other,
	}
}

fn welsh(n: u64) -> PluralCategory {
	match n {
		0 => PluralCategory::Zero,
		1 => PluralCategory::One,
		2 => PluralCategory::Two,
		3 => PluralCategory::Few,
		6 => PluralCategory::Many,
		_ => PluralCategory::Other,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::PluralCategory::*;
	use proptest::prelude::*;
	use rstest::rstest;

	fn category(tag: &str, count: i64) -> PluralCategory {
		category_for(&LanguageTag::new(tag), count)
	}

	#[rstest]
	#[case("en", 1, One)]
	#[case("en", 0, Other)]
	#[case("en", 2, Other)]
	#[case("de", 1, One)]
	#[case("es", 21, Other)]
	fn test_english_style(#[case] tag: &str, #[case] count: i64, #[case] expected: PluralCategory) {
		assert_eq!(category(tag, count), expected);
	}

	#[rstest]
	#[case("ru", 1, One)]
	#[case("ru", 2, Few)]
	#[case("ru", 5, Many)]
	#[case("ru", 11, Many)]
	#[case("ru", 12, Many)]
	#[case("ru", 21, One)]
	#[case("ru", 22, Few)]
	#[case("ru", 111, Many)]
	#[case("ru", 121, One)]
	#[case("hr", 5, Other)]
	#[case("hr", 23, Few)]
	fn test_slavic(#[case] tag: &str, #[case] count: i64, #[case] expected: PluralCategory) {
		assert_eq!(category(tag, count), expected, "{} plural for count={}", tag, count);
	}

	#[rstest]
	#[case("pl", 1, One)]
	#[case("pl", 2, Few)]
	#[case("pl", 5, Many)]
	#[case("pl", 12, Many)]
	#[case("pl", 22, Few)]
	#[case("pl", 0, Many)]
	#[case("cs", 1, One)]
	#[case("cs", 4, Few)]
	#[case("cs", 5, Other)]
	#[case("sl", 101, One)]
	#[case("sl", 102, Two)]
	#[case("sl", 4, Few)]
	#[case("sl", 5, Other)]
	fn test_west_and_south_slavic(
		#[case] tag: &str,
		#[case] count: i64,
		#[case] expected: PluralCategory,
	) {
		assert_eq!(category(tag, count), expected, "{} plural for count={}", tag, count);
	}

	#[rstest]
	#[case(0, Zero)]
	#[case(1, One)]
	#[case(2, Two)]
	#[case(3, Few)]
	#[case(10, Few)]
	#[case(11, Many)]
	#[case(99, Many)]
	#[case(100, Other)]
	fn test_arabic(#[case] count: i64, #[case] expected: PluralCategory) {
		assert_eq!(category("ar", count), expected);
	}

	#[rstest]
	#[case("lt", 1, One)]
	#[case("lt", 11, Other)]
	#[case("lt", 22, Few)]
	#[case("lt", 10, Other)]
	#[case("lv", 0, Zero)]
	#[case("lv", 15, Zero)]
	#[case("lv", 21, One)]
	#[case("lv", 22, Other)]
	#[case("ro", 1, One)]
	#[case("ro", 0, Few)]
	#[case("ro", 19, Few)]
	#[case("ro", 20, Other)]
	#[case("ro", 101, Few)]
	#[case("ro", 119, Few)]
	#[case("ro", 120, Other)]
	#[case("ga", 4, Few)]
	#[case("ga", 8, Many)]
	#[case("cy", 6, Many)]
	#[case("cy", 7, Other)]
	fn test_baltic_romance_celtic(
		#[case] tag: &str,
		#[case] count: i64,
		#[case] expected: PluralCategory,
	) {
		assert_eq!(category(tag, count), expected, "{} plural for count={}", tag, count);
	}

	#[rstest]
	#[case("fr", 0, One)]
	#[case("fr", 1, One)]
	#[case("fr", 2, Other)]
	#[case("pt-br", 0, One)]
	#[case("pt-PT", 0, Other)]
	#[case("pt-pt", 1, One)]
	#[case("hi", 0, One)]
	#[case("bn", 0, One)]
	#[case("hy", 0, One)]
	#[case("fa", 1, One)]
	#[case("hi", 2, Other)]
	fn test_french_and_portuguese(
		#[case] tag: &str,
		#[case] count: i64,
		#[case] expected: PluralCategory,
	) {
		assert_eq!(category(tag, count), expected);
	}

	#[rstest]
	#[case("ja", 1)]
	#[case("zh", 100)]
	#[case("ko", 0)]
	fn test_no_plural_languages(#[case] tag: &str, #[case] count: i64) {
		assert_eq!(category(tag, count), Other);
	}

	#[rstest]
	#[case("tr", 1, One)]
	#[case("tr", 2, Other)]
	#[case("mr", 0, Other)]
	#[case("ka", 1, One)]
	#[case("is", 1, One)]
	#[case("is", 21, One)]
	#[case("is", 11, Other)]
	#[case("mk", 21, One)]
	#[case("mk", 111, Other)]
	#[case("he", 1, One)]
	#[case("he", 2, Two)]
	#[case("he", 20, Other)]
	#[case("iw", 2, Two)]
	fn test_other_families(
		#[case] tag: &str,
		#[case] count: i64,
		#[case] expected: PluralCategory,
	) {
		assert_eq!(category(tag, count), expected, "{} plural for count={}", tag, count);
	}

	#[rstest]
	fn test_region_subtag_uses_primary_rule() {
		// Arrange
		let tag = LanguageTag::new("ru-RU");

		// Act & Assert
		assert!(has_rule(&tag));
		assert_eq!(category_for(&tag, 2), Few);
		assert_eq!(category_for(&LanguageTag::new("ru_RU"), 5), Many);
	}

	#[rstest]
	fn test_unknown_language_uses_english_rule() {
		let tag = LanguageTag::new("klingon");

		assert!(!has_rule(&tag));
		assert_eq!(category_for(&tag, 1), One);
		assert_eq!(category_for(&tag, 3), Other);
	}

	#[rstest]
	fn test_negative_counts_use_absolute_value() {
		assert_eq!(category("en", -1), One);
		assert_eq!(category("ru", -22), Few);
	}

	#[rstest]
	#[case("one", One)]
	#[case("OTHER", Other)]
	#[case("Few", Few)]
	fn test_category_from_str(#[case] input: &str, #[case] expected: PluralCategory) {
		assert_eq!(input.parse::<PluralCategory>(), Ok(expected));
	}

	#[rstest]
	fn test_category_from_str_rejects_unknown() {
		assert!("several".parse::<PluralCategory>().is_err());
	}

	proptest! {
		#[test]
		fn prop_english_selects_other_except_for_one(n in any::<i64>()) {
			let expected = if n.unsigned_abs() == 1 { One } else { Other };
			prop_assert_eq!(category("en", n), expected);
		}

		#[test]
		fn prop_unknown_tags_match_english(n in 0i64..10_000) {
			prop_assert_eq!(category("tlh-x-klingon", n), category(FALLBACK_RULE_TAG, n));
		}
	}
}
