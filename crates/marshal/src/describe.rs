// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::CStr,
	fmt::{self, Write},
};

use mpvbind_abi::{Format, NodeFFI};

/// Render a node tree for diagnostics
///
/// The output is deterministic and never fails, also for malformed trees: null handles
/// render as `Null` and unknown formats as `Unknown(code)`.
///
/// ```text
/// Dictionary(2, pause = Flag(no), filters = Array(1, String(a)))
/// ```
///
/// # Safety
/// `node` and everything below it must be live and initialized.
pub unsafe fn describe(node: &NodeFFI) -> String {
	let mut out = String::new();
	// Writing into a String does not fail
	let _ = unsafe { write_node(&mut out, node) };
	out
}

unsafe fn write_node(out: &mut String, node: &NodeFFI) -> fmt::Result {
	unsafe {
		match node.format {
			Format::NONE => out.write_str("None"),
			Format::STRING => write_string(out, "String", node),
			Format::OSD_STRING => write_string(out, "OsdString", node),
			Format::FLAG => write!(out, "Flag({})", if node.u.flag != 0 { "yes" } else { "no" }),
			Format::INT64 => write!(out, "Int64({})", node.u.int64),
			Format::DOUBLE => write!(out, "Double({:.6})", node.u.double_),
			Format::BYTE_ARRAY => {
				let ba = node.u.ba;
				if ba.is_null() {
					return out.write_str("Null");
				}
				let bytes = (*ba).as_slice();
				write!(out, "Bytes({}", bytes.len())?;
				for byte in bytes {
					write!(out, ", {byte}")?;
				}
				out.write_str(")")
			}
			Format::NODE_ARRAY | Format::NODE_MAP => {
				let list = node.u.list;
				if list.is_null() {
					return out.write_str("Null");
				}
				let list = &*list;
				let is_map = node.format == Format::NODE_MAP;
				write!(out, "{}({}", if is_map { "Dictionary" } else { "Array" }, list.len())?;

				let keys = list.keys();
				for (index, value) in list.values().iter().enumerate() {
					out.write_str(", ")?;
					if is_map {
						match keys.get(index) {
							Some(key) if !key.is_null() => {
								write!(out, "{} = ", CStr::from_ptr(*key).to_string_lossy())?
							}
							_ => out.write_str("Null = ")?,
						}
					}
					write_node(out, value)?;
				}
				out.write_str(")")
			}
			other => write!(out, "Unknown({})", other.code()),
		}
	}
}

unsafe fn write_string(out: &mut String, label: &str, node: &NodeFFI) -> fmt::Result {
	let string = unsafe { node.u.string };
	if string.is_null() {
		return out.write_str("Null");
	}
	write!(out, "{label}({})", unsafe { CStr::from_ptr(string) }.to_string_lossy())
}

#[cfg(test)]
mod tests {
	use std::ptr::null_mut;

	use mpvbind_abi::{NodeListFFI, NodeUnionFFI};
	use mpvbind_type::Value;

	use super::*;
	use crate::encode;

	fn render(value: &Value) -> String {
		encode(value).unwrap().to_string()
	}

	#[test]
	fn test_describe_dictionary() {
		let value = Value::map([
			("speed", Value::float(1.5)),
			("pause", Value::bool(false)),
			("filters", Value::list(["a", "b"])),
		]);
		assert_eq!(
			render(&value),
			"Dictionary(3, speed = Double(1.500000), pause = Flag(no), filters = Array(2, String(a), String(b)))"
		);
	}

	#[test]
	fn test_describe_scalars() {
		assert_eq!(render(&Value::int(-7)), "Int64(-7)");
		assert_eq!(render(&Value::bool(true)), "Flag(yes)");
		assert_eq!(render(&Value::float(0.1)), "Double(0.100000)");
		assert_eq!(render(&Value::string("")), "String()");
		assert_eq!(render(&Value::bytes(vec![0u8, 16, 255])), "Bytes(3, 0, 16, 255)");
	}

	#[test]
	fn test_describe_empty_containers() {
		assert_eq!(render(&Value::List(vec![])), "Array(0)");
		assert_eq!(render(&Value::Map(Default::default())), "Dictionary(0)");
	}

	#[test]
	fn test_describe_is_deterministic() {
		let value = Value::list([Value::map([("x", 1i64)]), Value::string("y")]);
		let node = encode(&value).unwrap();
		assert_eq!(node.to_string(), node.to_string());
		assert_eq!(node.to_string(), "Array(2, Dictionary(1, x = Int64(1)), String(y))");
	}

	#[test]
	fn test_describe_malformed_nodes() {
		let none = NodeFFI::empty();
		let null_string = NodeFFI {
			u: NodeUnionFFI::empty(),
			format: Format::STRING,
		};
		let unknown = NodeFFI {
			u: NodeUnionFFI::empty(),
			format: Format(31),
		};
		let nested = NodeFFI {
			u: NodeUnionFFI::empty(),
			format: Format::NODE,
		};
		unsafe {
			assert_eq!(describe(&none), "None");
			assert_eq!(describe(&null_string), "Null");
			assert_eq!(describe(&unknown), "Unknown(31)");
			assert_eq!(describe(&nested), "Unknown(6)");
		}
	}

	#[test]
	fn test_describe_map_with_missing_keys() {
		let mut values = [NodeFFI::empty()];
		let mut list = NodeListFFI {
			num: 1,
			values: values.as_mut_ptr(),
			keys: null_mut(),
		};
		let node = NodeFFI {
			u: NodeUnionFFI {
				list: &mut list,
			},
			format: Format::NODE_MAP,
		};
		assert_eq!(unsafe { describe(&node) }, "Dictionary(1, Null = None)");
	}
}
