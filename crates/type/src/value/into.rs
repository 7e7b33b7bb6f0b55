// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Map, Value};

pub trait IntoValue {
	fn into_value(self) -> Value;
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

impl IntoValue for bool {
	fn into_value(self) -> Value {
		Value::Bool(self)
	}
}

impl IntoValue for i32 {
	fn into_value(self) -> Value {
		Value::Int(self as i64)
	}
}

impl IntoValue for i64 {
	fn into_value(self) -> Value {
		Value::Int(self)
	}
}

impl IntoValue for u32 {
	fn into_value(self) -> Value {
		Value::Int(self as i64)
	}
}

impl IntoValue for f64 {
	fn into_value(self) -> Value {
		Value::Float(self)
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::String(self.to_string())
	}
}

impl IntoValue for String {
	fn into_value(self) -> Value {
		Value::String(self)
	}
}

impl IntoValue for Vec<Value> {
	fn into_value(self) -> Value {
		Value::List(self)
	}
}

impl IntoValue for Map {
	fn into_value(self) -> Value {
		Value::Map(self)
	}
}

impl<T: IntoValue> IntoValue for Option<T> {
	fn into_value(self) -> Value {
		match self {
			Some(v) => v.into_value(),
			None => Value::None,
		}
	}
}

macro_rules! impl_from {
	($($t:ty),*) => {
		$(
			impl From<$t> for Value {
				fn from(v: $t) -> Self {
					v.into_value()
				}
			}
		)*
	};
}

impl_from!(bool, i32, i64, u32, f64, &str, String, Vec<Value>, Map);
