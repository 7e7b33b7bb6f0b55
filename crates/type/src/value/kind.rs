// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The kind of a [`Value`](super::Value), without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
	None,
	Bool,
	Int,
	Float,
	String,
	List,
	Map,
	Bytes,
}

impl Kind {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Kind::None => "none",
			Kind::Bool => "bool",
			Kind::Int => "int",
			Kind::Float => "float",
			Kind::String => "string",
			Kind::List => "list",
			Kind::Map => "map",
			Kind::Bytes => "bytes",
		}
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
