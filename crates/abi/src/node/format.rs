// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{
	ffi::c_int,
	fmt::{self, Display, Formatter},
};

/// Format tag of a node or of a typed property payload (`mpv_format`)
///
/// Kept as a transparent integer instead of a Rust enum: libmpv may hand back values
/// this crate does not know about, and those must stay representable.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format(pub c_int);

impl Format {
	/// Invalid or empty value
	pub const NONE: Format = Format(0);
	/// NUL-terminated UTF-8 string (`char *`)
	pub const STRING: Format = Format(1);
	/// OSD formatted string, read-only
	pub const OSD_STRING: Format = Format(2);
	/// Boolean as `int` (0 or 1)
	pub const FLAG: Format = Format(3);
	/// Signed 64 bit integer
	pub const INT64: Format = Format(4);
	/// Double precision float
	pub const DOUBLE: Format = Format(5);
	/// Generic `mpv_node`, the real type is the node's own format
	pub const NODE: Format = Format(6);
	/// `mpv_node_list` without keys
	pub const NODE_ARRAY: Format = Format(7);
	/// `mpv_node_list` with keys
	pub const NODE_MAP: Format = Format(8);
	/// `mpv_byte_array`
	pub const BYTE_ARRAY: Format = Format(9);

	pub const fn code(self) -> c_int {
		self.0
	}

	/// Whether the payload is backed by an `mpv_node_list`
	pub const fn is_list(self) -> bool {
		matches!(self, Format::NODE_ARRAY | Format::NODE_MAP)
	}

	/// Symbolic name, or `None` for values outside the known set
	pub const fn name(self) -> Option<&'static str> {
		match self {
			Format::NONE => Some("NONE"),
			Format::STRING => Some("STRING"),
			Format::OSD_STRING => Some("OSD_STRING"),
			Format::FLAG => Some("FLAG"),
			Format::INT64 => Some("INT64"),
			Format::DOUBLE => Some("DOUBLE"),
			Format::NODE => Some("NODE"),
			Format::NODE_ARRAY => Some("NODE_ARRAY"),
			Format::NODE_MAP => Some("NODE_MAP"),
			Format::BYTE_ARRAY => Some("BYTE_ARRAY"),
			_ => None,
		}
	}
}

impl Default for Format {
	fn default() -> Self {
		Format::NONE
	}
}

impl Display for Format {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "FORMAT({})", self.0),
		}
	}
}
