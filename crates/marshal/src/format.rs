// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Mapping between value kinds and node formats

use mpvbind_abi::Format;
use mpvbind_type::Kind;

/// Node format used to carry values of `kind`. `Kind::None` has no format and maps to
/// `Format::NONE`, which callers must treat as "cannot convert".
pub const fn format_for(kind: Kind) -> Format {
	match kind {
		Kind::String => Format::STRING,
		Kind::Bool => Format::FLAG,
		Kind::Int => Format::INT64,
		Kind::Float => Format::DOUBLE,
		Kind::Bytes => Format::BYTE_ARRAY,
		Kind::List => Format::NODE_ARRAY,
		Kind::Map => Format::NODE_MAP,
		Kind::None => Format::NONE,
	}
}

/// Value kind produced when decoding `format`
pub const fn kind_for(format: Format) -> Kind {
	match format {
		Format::STRING => Kind::String,
		Format::FLAG => Kind::Bool,
		Format::INT64 => Kind::Int,
		Format::DOUBLE => Kind::Float,
		Format::BYTE_ARRAY => Kind::Bytes,
		Format::NODE_ARRAY => Kind::List,
		Format::NODE_MAP => Kind::Map,
		_ => Kind::None,
	}
}

/// Format to hand to the typed property entry points. They only accept non-recursive
/// formats and take containers as a generic NODE whose own format does the dispatch.
pub const fn condense(format: Format) -> Format {
	match format {
		Format::NODE_ARRAY | Format::NODE_MAP => Format::NODE,
		other => other,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KINDS: [Kind; 8] =
		[Kind::None, Kind::Bool, Kind::Int, Kind::Float, Kind::String, Kind::List, Kind::Map, Kind::Bytes];

	#[test]
	fn test_format_kind_bijection() {
		for kind in KINDS {
			assert_eq!(kind_for(format_for(kind)), kind, "{kind}");
		}
	}

	#[test]
	fn test_unknown_formats_map_to_none() {
		assert_eq!(kind_for(Format::NODE), Kind::None);
		assert_eq!(kind_for(Format::OSD_STRING), Kind::None);
		assert_eq!(kind_for(Format(42)), Kind::None);
	}

	#[test]
	fn test_condense() {
		assert_eq!(condense(Format::NODE_ARRAY), Format::NODE);
		assert_eq!(condense(Format::NODE_MAP), Format::NODE);
		assert_eq!(condense(Format::STRING), Format::STRING);
		assert_eq!(condense(Format::FLAG), Format::FLAG);
		assert_eq!(condense(Format::BYTE_ARRAY), Format::BYTE_ARRAY);
		assert_eq!(condense(Format::NONE), Format::NONE);
	}
}
