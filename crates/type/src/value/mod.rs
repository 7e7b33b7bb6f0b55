// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

mod into;
mod kind;

pub use into::IntoValue;
pub use kind::Kind;

/// String keyed map of values. Enumeration follows insertion order, equality does not.
pub type Map = indexmap::IndexMap<String, Value>;

/// A value exchanged with the player, represented as a native Rust type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Value is absent (think null in common programming languages)
	#[default]
	None,
	/// A boolean: true or false.
	Bool(bool),
	/// An 8-byte signed integer
	Int(i64),
	/// An 8-byte floating point
	Float(f64),
	/// A UTF-8 encoded text
	String(String),
	/// An ordered list of values
	List(Vec<Value>),
	/// A string keyed map of values
	Map(Map),
	/// Raw bytes
	Bytes(Vec<u8>),
}

impl Value {
	pub fn none() -> Self {
		Value::None
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Bool(v.into())
	}

	pub fn int(v: impl Into<i64>) -> Self {
		Value::Int(v.into())
	}

	pub fn float(v: impl Into<f64>) -> Self {
		Value::Float(v.into())
	}

	pub fn string(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
		Value::Bytes(v.into())
	}

	pub fn list<I, V>(items: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: IntoValue,
	{
		Value::List(items.into_iter().map(IntoValue::into_value).collect())
	}

	pub fn map<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: IntoValue,
	{
		Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into_value())).collect())
	}

	pub fn kind(&self) -> Kind {
		match self {
			Value::None => Kind::None,
			Value::Bool(_) => Kind::Bool,
			Value::Int(_) => Kind::Int,
			Value::Float(_) => Kind::Float,
			Value::String(_) => Kind::String,
			Value::List(_) => Kind::List,
			Value::Map(_) => Kind::Map,
			Value::Bytes(_) => Kind::Bytes,
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			Value::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Value::Map(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Value::Bytes(v) => Some(v),
			_ => None,
		}
	}

	/// Look up a map entry; `None` for missing keys and non-map values
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map().and_then(|map| map.get(key))
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => f.write_str("none"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::String(v) => write!(f, "{v:?}"),
			Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
			Value::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Value::Map(map) => {
				f.write_str("{")?;
				for (i, (key, value)) in map.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key:?}: {value}")?;
				}
				f.write_str("}")
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_map_equality_ignores_order() {
		let left = Value::map([("a", 1i64), ("b", 2i64)]);
		let right = Value::map([("b", 2i64), ("a", 1i64)]);
		assert_eq!(left, right);
	}

	#[test]
	fn test_map_keeps_insertion_order() {
		let value = Value::map([("speed", Value::float(1.5)), ("pause", Value::bool(false))]);
		let keys: Vec<&str> = value.as_map().unwrap().keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["speed", "pause"]);
	}

	#[test]
	fn test_kind() {
		assert_eq!(Value::None.kind(), Kind::None);
		assert_eq!(Value::bytes(vec![1u8]).kind(), Kind::Bytes);
		assert_eq!(Value::list(["a", "b"]).kind(), Kind::List);
	}

	#[test]
	fn test_display() {
		let value = Value::map([("filters", Value::list(["a", "b"])), ("volume", Value::int(50))]);
		assert_eq!(value.to_string(), r#"{"filters": ["a", "b"], "volume": 50}"#);
	}

	#[test]
	fn test_json_representation() {
		let value: Value = serde_json::from_str(r#"{"pause": true, "speed": 1.5, "volume": 50, "title": null}"#)
			.unwrap();
		assert_eq!(value.get("pause"), Some(&Value::Bool(true)));
		assert_eq!(value.get("speed"), Some(&Value::Float(1.5)));
		assert_eq!(value.get("volume"), Some(&Value::Int(50)));
		assert_eq!(value.get("title"), Some(&Value::None));

		let list: Value = serde_json::from_str("[1, 2]").unwrap();
		assert_eq!(list, Value::list([1i64, 2i64]));
	}
}
