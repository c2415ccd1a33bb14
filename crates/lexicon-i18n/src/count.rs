//! Plural count extraction
//!
//! The count that drives plural selection is derived from whatever argument
//! the caller passed. Extraction is an ordered chain of typed extractors; the
//! first one whose shape matches decides the result, even when that result
//! is `0`. Unresolvable shapes degrade to `0`.

use crate::value::Value;

/// Name of the field, map key or accessor carrying a plural count
pub const COUNT_FIELD: &str = "Count";

// Guards against records whose fields point back at themselves.
const MAX_DEPTH: usize = 16;

type Extractor = fn(&Value, usize) -> Option<i64>;

/// Extractors in precedence order. Maps come before record inspection so a
/// map without a count key never reaches field or accessor lookup.
const EXTRACTORS: &[Extractor] = &[
	nil_count,
	integer_count,
	float_count,
	string_count,
	map_count,
	record_field_count,
	record_accessor_count,
	indirect_count,
];

const SCALAR_EXTRACTORS: &[Extractor] = &[nil_count, integer_count, float_count, string_count];

/// Extract a plural count from an arbitrary argument
///
/// Never fails; shapes that carry no count yield `0`.
///
/// # Example
/// ```
/// use lexicon_i18n::{Value, resolve_count};
///
/// assert_eq!(resolve_count(&Value::Float(1234.6)), 1234);
/// assert_eq!(resolve_count(&Value::from("1234")), 1234);
/// assert_eq!(resolve_count(&Value::from("foo")), 0);
/// assert_eq!(resolve_count(&Value::Nil), 0);
/// ```
pub fn resolve_count(value: &Value) -> i64 {
	resolve_at_depth(value, 0)
}

fn resolve_at_depth(value: &Value, depth: usize) -> i64 {
	if depth > MAX_DEPTH {
		return 0;
	}
	EXTRACTORS
		.iter()
		.find_map(|extract| extract(value, depth))
		.unwrap_or(0)
}

/// Scalar-only resolution, used for accessor results
fn scalar_count(value: &Value) -> i64 {
	SCALAR_EXTRACTORS
		.iter()
		.find_map(|extract| extract(value, 0))
		.unwrap_or(0)
}

fn nil_count(value: &Value, _depth: usize) -> Option<i64> {
	value.is_nil().then_some(0)
}

fn integer_count(value: &Value, _depth: usize) -> Option<i64> {
	match value {
		Value::Int(i) => Some(*i),
		_ => None,
	}
}

fn float_count(value: &Value, _depth: usize) -> Option<i64> {
	match value {
		Value::Float(f) => Some(truncate(*f)),
		_ => None,
	}
}

fn string_count(value: &Value, _depth: usize) -> Option<i64> {
	match value {
		Value::String(s) => {
			let s = s.trim();
			let count = s
				.parse::<i64>()
				.ok()
				.or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(truncate))
				.unwrap_or(0);
			Some(count)
		}
		_ => None,
	}
}

fn map_count(value: &Value, depth: usize) -> Option<i64> {
	match value {
		Value::Map(map) => Some(
			map.iter()
				.find(|(key, _)| key.eq_ignore_ascii_case(COUNT_FIELD))
				.map(|(_, v)| resolve_at_depth(v, depth + 1))
				.unwrap_or(0),
		),
		_ => None,
	}
}

fn record_field_count(value: &Value, depth: usize) -> Option<i64> {
	match value {
		Value::Record(record) => record
			.field(COUNT_FIELD)
			.map(|v| resolve_at_depth(&v, depth + 1)),
		_ => None,
	}
}

fn record_accessor_count(value: &Value, _depth: usize) -> Option<i64> {
	match value {
		Value::Record(record) => record.call(COUNT_FIELD).map(|v| scalar_count(&v)),
		_ => None,
	}
}

fn indirect_count(value: &Value, depth: usize) -> Option<i64> {
	match value {
		Value::Ref(inner) => Some(resolve_at_depth(inner, depth + 1)),
		_ => None,
	}
}

/// Truncate toward zero; NaN becomes 0 and infinities saturate
fn truncate(f: f64) -> i64 {
	f.trunc() as i64
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.6, 0)]
	#[case(1.0, 1)]
	#[case(1234.4, 1234)]
	#[case(1234.6, 1234)]
	#[case(-2.7, -2)]
	#[case(f64::NAN, 0)]
	fn test_float_truncates_toward_zero(#[case] input: f64, #[case] expected: i64) {
		assert_eq!(resolve_count(&Value::Float(input)), expected);
	}

	#[rstest]
	#[case("1234", 1234)]
	#[case(" 7 ", 7)]
	#[case("12.9", 12)]
	#[case("foo", 0)]
	#[case("", 0)]
	#[case("inf", 0)]
	fn test_string_parsing(#[case] input: &str, #[case] expected: i64) {
		assert_eq!(resolve_count(&Value::from(input)), expected);
	}

	#[rstest]
	fn test_bool_and_list_are_not_counts() {
		assert_eq!(resolve_count(&Value::Bool(true)), 0);
		assert_eq!(resolve_count(&Value::from(vec![1, 2, 3])), 0);
	}

	#[rstest]
	fn test_map_count_value_recurses() {
		// Arrange
		let mut inner = indexmap::IndexMap::new();
		inner.insert("count".to_string(), Value::from("5"));
		let mut outer = indexmap::IndexMap::new();
		outer.insert("COUNT".to_string(), Value::Map(inner));

		// Act
		let count = resolve_count(&Value::Map(outer));

		// Assert
		assert_eq!(count, 5);
	}

	#[rstest]
	fn test_self_referencing_record_terminates() {
		struct Loop;

		impl std::fmt::Display for Loop {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str("loop")
			}
		}

		impl crate::Record for Loop {
			fn field(&self, _name: &str) -> Option<Value> {
				Some(Value::record(Loop))
			}
		}

		assert_eq!(resolve_count(&Value::record(Loop)), 0);
	}

	proptest! {
		#[test]
		fn prop_integers_resolve_to_themselves(n in any::<i64>()) {
			prop_assert_eq!(resolve_count(&Value::Int(n)), n);
		}

		#[test]
		fn prop_integer_strings_resolve_to_their_value(n in any::<i64>()) {
			prop_assert_eq!(resolve_count(&Value::String(n.to_string())), n);
		}

		#[test]
		fn prop_refs_are_transparent(n in any::<i32>()) {
			let wrapped = Value::reference(Value::from(n));
			prop_assert_eq!(resolve_count(&wrapped), i64::from(n));
		}
	}
}
