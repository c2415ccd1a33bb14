//! Argument values passed to a translation
//!
//! Template data arrives in many shapes: plain numbers, strings, maps coming
//! from front matter, or structured records such as a page exposing a
//! `Count` field or accessor. [`Value`] is the closed set of shapes the core
//! understands, and [`Record`] is the capability interface for structured
//! data.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A structured value exposing named fields and zero-argument accessors
///
/// # Example
/// ```
/// use lexicon_i18n::{Record, Value, resolve_count};
/// use std::fmt;
///
/// struct Page {
///     words: i64,
/// }
///
/// impl fmt::Display for Page {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "page({} words)", self.words)
///     }
/// }
///
/// impl Record for Page {
///     fn field(&self, _name: &str) -> Option<Value> {
///         None
///     }
///
///     fn call(&self, name: &str) -> Option<Value> {
///         (name == "Count").then(|| Value::Int(self.words / 200))
///     }
/// }
///
/// assert_eq!(resolve_count(&Value::record(Page { words: 1000 })), 5);
/// ```
pub trait Record: fmt::Display + Send + Sync {
	/// Look up an exported field by its exact, case-sensitive name
	fn field(&self, name: &str) -> Option<Value>;

	/// Invoke a zero-argument accessor by name
	fn call(&self, name: &str) -> Option<Value> {
		let _ = name;
		None
	}
}

/// An argument supplied to a translation
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	Nil,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<Value>),
	Map(IndexMap<String, Value>),
	Record(Arc<dyn Record>),
	/// Indirection to another value, resolved transparently
	Ref(Arc<Value>),
}

impl Value {
	/// Wrap a [`Record`] implementation
	pub fn record(record: impl Record + 'static) -> Self {
		Self::Record(Arc::new(record))
	}

	/// Wrap a value behind a shared reference
	pub fn reference(value: Value) -> Self {
		Self::Ref(Arc::new(value))
	}

	/// Expose a serializable struct as a field-only [`Record`]
	pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
		Ok(Self::record(SerializedRecord::new(value)?))
	}

	pub fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}

	/// Follow [`Value::Ref`] indirections
	pub fn deref_all(&self) -> &Value {
		let mut current = self;
		while let Self::Ref(inner) = current {
			current = inner;
		}
		current
	}

	/// Convert to JSON; records are represented by their display text
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Nil => serde_json::Value::Null,
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Int(i) => serde_json::Value::from(*i),
			Self::Float(f) => serde_json::Number::from_f64(*f)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Self::String(s) => serde_json::Value::String(s.clone()),
			Self::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
			Self::Map(map) => serde_json::Value::Object(
				map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
			),
			Self::Record(record) => serde_json::Value::String(record.to_string()),
			Self::Ref(inner) => inner.to_json(),
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nil => f.write_str("Nil"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
			Self::String(s) => f.debug_tuple("String").field(s).finish(),
			Self::List(items) => f.debug_tuple("List").field(items).finish(),
			Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
			Self::Record(record) => f
				.debug_tuple("Record")
				.field(&format_args!("{}", record))
				.finish(),
			Self::Ref(inner) => f.debug_tuple("Ref").field(inner).finish(),
		}
	}
}

/// Text used when a value is interpolated into a message
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Nil => Ok(()),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Int(i) => write!(f, "{}", i),
			Self::Float(x) => write!(f, "{}", x),
			Self::String(s) => f.write_str(s),
			Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
			Self::Record(record) => write!(f, "{}", record),
			Self::Ref(inner) => write!(f, "{}", inner),
		}
	}
}

/// A [`Record`] backed by the serialized fields of a struct
///
/// Field lookup is exact, so a struct field named `counts` does not answer
/// for `Count`. Serialized records expose no accessors.
#[derive(Debug, Clone)]
pub struct SerializedRecord {
	type_name: &'static str,
	fields: serde_json::Map<String, serde_json::Value>,
}

impl SerializedRecord {
	pub fn new<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
		let fields = match serde_json::to_value(value)? {
			serde_json::Value::Object(fields) => fields,
			other => {
				let mut fields = serde_json::Map::new();
				fields.insert("value".to_string(), other);
				fields
			}
		};
		Ok(Self {
			type_name: std::any::type_name::<T>(),
			fields,
		})
	}
}

impl fmt::Display for SerializedRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let short = self.type_name.rsplit("::").next().unwrap_or(self.type_name);
		write!(f, "{}{}", short, serde_json::Value::Object(self.fields.clone()))
	}
}

impl Record for SerializedRecord {
	fn field(&self, name: &str) -> Option<Value> {
		self.fields.get(name).cloned().map(Value::from)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					Self::Int(i64::from(v))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
	fn from(v: u64) -> Self {
		Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
	}
}

impl From<usize> for Value {
	fn from(v: usize) -> Self {
		Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
	}
}

impl From<isize> for Value {
	fn from(v: isize) -> Self {
		Self::Int(v as i64)
	}
}

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Self::Float(f64::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::String(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Self::Nil)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(v: Vec<T>) -> Self {
		Self::List(v.into_iter().map(Into::into).collect())
	}
}

impl From<IndexMap<String, Value>> for Value {
	fn from(v: IndexMap<String, Value>) -> Self {
		Self::Map(v)
	}
}

impl<T: Into<Value>> From<HashMap<String, T>> for Value {
	fn from(v: HashMap<String, T>) -> Self {
		Self::Map(v.into_iter().map(|(k, v)| (k, v.into())).collect())
	}
}

impl From<serde_json::Value> for Value {
	fn from(v: serde_json::Value) -> Self {
		match v {
			serde_json::Value::Null => Self::Nil,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Self::Int(i)
				} else if let Some(u) = n.as_u64() {
					Self::from(u)
				} else {
					Self::Float(n.as_f64().unwrap_or_default())
				}
			}
			serde_json::Value::String(s) => Self::String(s),
			serde_json::Value::Array(items) => {
				Self::List(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => {
				Self::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
			}
		}
	}
}
