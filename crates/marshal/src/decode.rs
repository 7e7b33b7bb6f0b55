// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Node to value decoding
//!
//! Decoding only reads. Trees may be owned by libmpv, so nothing here frees, and every
//! string and buffer is copied into the resulting value.

use std::ffi::{CStr, c_char, c_int, c_void};

use indexmap::map::Entry;
use mpvbind_abi::{ByteArrayFFI, Format, NodeFFI, NodeListFFI};
use mpvbind_type::{Map, Value};

use crate::DecodeError;

/// Decode a typed payload
///
/// `data` points at a value of type `format` the way the typed property entry points and
/// property events lay it out: a `char *` slot for strings, a `mpv_node` for NODE, the
/// union slot of a node for everything else. The generic NODE unwraps one level and
/// re-dispatches on the inner node's own format.
///
/// # Safety
/// `data` must be null or point to a live, initialized value of type `format`.
pub unsafe fn decode(format: Format, data: *const c_void) -> Result<Value, DecodeError> {
	if data.is_null() {
		return match format {
			Format::NONE => Ok(Value::None),
			format if format.name().is_none() => Ok(Value::None),
			format => Err(DecodeError::NullPayload(format)),
		};
	}

	unsafe {
		match format {
			Format::NODE => decode_node(&*(data as *const NodeFFI)),
			Format::STRING | Format::OSD_STRING => decode_string(format, *(data as *const *const c_char)),
			Format::FLAG => Ok(Value::Bool(*(data as *const c_int) != 0)),
			Format::INT64 => Ok(Value::Int(*(data as *const i64))),
			Format::DOUBLE => Ok(Value::Float(*(data as *const f64))),
			Format::NODE_ARRAY => decode_array(*(data as *const *const NodeListFFI)),
			Format::NODE_MAP => decode_map(*(data as *const *const NodeListFFI)),
			Format::BYTE_ARRAY => decode_bytes(*(data as *const *const ByteArrayFFI)),
			_ => Ok(Value::None),
		}
	}
}

/// Decode a node by its own format
///
/// A node tagged NODE is rejected: the tag only makes sense for typed payloads, a node
/// cannot hold another node directly.
///
/// # Safety
/// `node` and everything below it must be live and initialized.
pub unsafe fn decode_node(node: &NodeFFI) -> Result<Value, DecodeError> {
	if node.format == Format::NODE {
		return Err(DecodeError::NestedNode);
	}
	unsafe { decode(node.format, node.payload()) }
}

unsafe fn decode_string(format: Format, string: *const c_char) -> Result<Value, DecodeError> {
	if string.is_null() {
		return Err(DecodeError::NullPayload(format));
	}
	let text = unsafe { CStr::from_ptr(string) };
	Ok(Value::String(text.to_string_lossy().into_owned()))
}

unsafe fn decode_bytes(ba: *const ByteArrayFFI) -> Result<Value, DecodeError> {
	if ba.is_null() {
		return Err(DecodeError::NullPayload(Format::BYTE_ARRAY));
	}
	let ba = unsafe { &*ba };
	if ba.size > 0 && ba.data.is_null() {
		return Err(DecodeError::MissingEntries {
			format: Format::BYTE_ARRAY,
			len: ba.size,
		});
	}
	Ok(Value::Bytes(unsafe { ba.as_slice() }.to_vec()))
}

unsafe fn decode_array(list: *const NodeListFFI) -> Result<Value, DecodeError> {
	if list.is_null() {
		return Err(DecodeError::NullPayload(Format::NODE_ARRAY));
	}
	let list = unsafe { &*list };
	if list.has_keys() {
		return Err(DecodeError::ArrayWithKeys);
	}

	let values = unsafe { entries(list, Format::NODE_ARRAY) }?;
	let mut result = Vec::with_capacity(values.len());
	for value in values {
		result.push(unsafe { decode_node(value) }?);
	}
	Ok(Value::List(result))
}

unsafe fn decode_map(list: *const NodeListFFI) -> Result<Value, DecodeError> {
	if list.is_null() {
		return Err(DecodeError::NullPayload(Format::NODE_MAP));
	}
	let list = unsafe { &*list };
	if !list.has_keys() {
		return Err(DecodeError::MapWithoutKeys);
	}

	let values = unsafe { entries(list, Format::NODE_MAP) }?;
	let keys = unsafe { list.keys() };
	let mut result = Map::with_capacity(values.len());
	for (index, (key, value)) in keys.iter().zip(values).enumerate() {
		if key.is_null() {
			return Err(DecodeError::NullKey {
				index,
			});
		}
		let key = unsafe { CStr::from_ptr(*key) }.to_string_lossy().into_owned();
		let value = unsafe { decode_node(value) }?;
		match result.entry(key) {
			Entry::Occupied(entry) => {
				return Err(DecodeError::DuplicateKey {
					index,
					key: entry.key().clone(),
				});
			}
			Entry::Vacant(entry) => {
				entry.insert(value);
			}
		}
	}
	Ok(Value::Map(result))
}

/// The entries of a list, rejecting counts the backing arrays cannot hold
unsafe fn entries(list: &NodeListFFI, format: Format) -> Result<&[NodeFFI], DecodeError> {
	if list.num < 0 {
		return Err(DecodeError::NegativeCount {
			format,
			num: list.num,
		});
	}
	if list.num > 0 && list.values.is_null() {
		return Err(DecodeError::MissingEntries {
			format,
			len: list.len(),
		});
	}
	Ok(unsafe { list.values() })
}

#[cfg(test)]
mod tests {
	use std::{
		ffi::{CString, c_char, c_void},
		ptr::{null, null_mut},
	};

	use mpvbind_abi::{ByteArrayFFI, Format, NodeFFI, NodeListFFI, NodeUnionFFI};
	use mpvbind_type::Value;

	use super::*;
	use crate::encode;

	#[test]
	fn test_decode_scalar_payloads() {
		let flag: i32 = 1;
		let int: i64 = -3;
		let double: f64 = 2.5;
		unsafe {
			assert_eq!(decode(Format::FLAG, &flag as *const i32 as *const c_void), Ok(Value::Bool(true)));
			assert_eq!(decode(Format::INT64, &int as *const i64 as *const c_void), Ok(Value::Int(-3)));
			assert_eq!(decode(Format::DOUBLE, &double as *const f64 as *const c_void), Ok(Value::Float(2.5)));
		}
	}

	#[test]
	fn test_decode_nonzero_flag_is_true() {
		let flag: i32 = 7;
		assert_eq!(unsafe { decode(Format::FLAG, &flag as *const i32 as *const c_void) }, Ok(Value::Bool(true)));
	}

	#[test]
	fn test_decode_string_slot() {
		let text = CString::new("mkv").unwrap();
		let slot: *const c_char = text.as_ptr();
		let data = &slot as *const *const c_char as *const c_void;
		assert_eq!(unsafe { decode(Format::STRING, data) }, Ok(Value::string("mkv")));
		assert_eq!(unsafe { decode(Format::OSD_STRING, data) }, Ok(Value::string("mkv")));
	}

	#[test]
	fn test_decode_null_data() {
		unsafe {
			assert_eq!(decode(Format::NONE, null()), Ok(Value::None));
			assert_eq!(decode(Format(99), null()), Ok(Value::None));
			assert_eq!(decode(Format::INT64, null()), Err(DecodeError::NullPayload(Format::INT64)));
		}
	}

	#[test]
	fn test_decode_unknown_format_is_none() {
		let node = NodeFFI {
			u: NodeUnionFFI {
				int64: 5,
			},
			format: Format(42),
		};
		assert_eq!(unsafe { decode_node(&node) }, Ok(Value::None));
	}

	#[test]
	fn test_generic_node_unwraps_one_level() {
		let value = Value::map([("a", Value::list([1i64, 2i64])), ("b", Value::string("x"))]);
		let node = encode(&value).unwrap();
		let direct = unsafe { decode_node(node.as_ffi()) }.unwrap();
		let wrapped = unsafe { decode(Format::NODE, node.as_ffi() as *const NodeFFI as *const c_void) }.unwrap();
		assert_eq!(direct, wrapped);
		assert_eq!(direct, value);
	}

	#[test]
	fn test_nested_node_tag_is_rejected() {
		let inner = NodeFFI {
			u: NodeUnionFFI::empty(),
			format: Format::NODE,
		};
		assert_eq!(unsafe { decode_node(&inner) }, Err(DecodeError::NestedNode));
	}

	#[test]
	fn test_array_with_keys_is_rejected() {
		let mut values = [NodeFFI {
			u: NodeUnionFFI {
				int64: 1,
			},
			format: Format::INT64,
		}];
		let key = CString::new("k").unwrap();
		let mut keys = [key.as_ptr() as *mut c_char];
		let mut list = NodeListFFI {
			num: 1,
			values: values.as_mut_ptr(),
			keys: keys.as_mut_ptr(),
		};
		let node = NodeFFI {
			u: NodeUnionFFI {
				list: &mut list,
			},
			format: Format::NODE_ARRAY,
		};
		assert_eq!(unsafe { decode_node(&node) }, Err(DecodeError::ArrayWithKeys));
	}

	#[test]
	fn test_map_without_keys_is_rejected() {
		let mut values = [NodeFFI {
			u: NodeUnionFFI {
				int64: 1,
			},
			format: Format::INT64,
		}];
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
		assert_eq!(unsafe { decode_node(&node) }, Err(DecodeError::MapWithoutKeys));
	}

	#[test]
	fn test_null_key_is_rejected() {
		let mut values = [NodeFFI::empty(), NodeFFI::empty()];
		let key = CString::new("first").unwrap();
		let mut keys = [key.as_ptr() as *mut c_char, null_mut()];
		let mut list = NodeListFFI {
			num: 2,
			values: values.as_mut_ptr(),
			keys: keys.as_mut_ptr(),
		};
		let node = NodeFFI {
			u: NodeUnionFFI {
				list: &mut list,
			},
			format: Format::NODE_MAP,
		};
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::NullKey {
				index: 1
			})
		);
	}

	#[test]
	fn test_null_handles_are_rejected() {
		for format in [Format::STRING, Format::NODE_ARRAY, Format::NODE_MAP, Format::BYTE_ARRAY] {
			let node = NodeFFI {
				u: NodeUnionFFI::empty(),
				format,
			};
			assert_eq!(unsafe { decode_node(&node) }, Err(DecodeError::NullPayload(format)));
		}
	}

	#[test]
	fn test_empty_byte_array_with_null_data() {
		let mut ba = ByteArrayFFI::empty();
		let node = NodeFFI {
			u: NodeUnionFFI {
				ba: &mut ba,
			},
			format: Format::BYTE_ARRAY,
		};
		assert_eq!(unsafe { decode_node(&node) }, Ok(Value::Bytes(vec![])));
	}

	#[test]
	fn test_invalid_utf8_is_replaced() {
		let bytes = CString::new(vec![b'a', 0xff, b'b']).unwrap();
		let node = NodeFFI {
			u: NodeUnionFFI {
				string: bytes.as_ptr() as *mut c_char,
			},
			format: Format::STRING,
		};
		assert_eq!(unsafe { decode_node(&node) }, Ok(Value::string("a\u{fffd}b")));
	}

	fn list_node(list: &mut NodeListFFI, format: Format) -> NodeFFI {
		NodeFFI {
			u: NodeUnionFFI {
				list,
			},
			format,
		}
	}

	#[test]
	fn test_array_with_null_values_is_rejected() {
		let mut list = NodeListFFI {
			num: 3,
			values: null_mut(),
			keys: null_mut(),
		};
		let node = list_node(&mut list, Format::NODE_ARRAY);
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::MissingEntries {
				format: Format::NODE_ARRAY,
				len: 3
			})
		);
	}

	#[test]
	fn test_negative_count_is_rejected() {
		let mut list = NodeListFFI {
			num: -4,
			values: null_mut(),
			keys: null_mut(),
		};
		let node = list_node(&mut list, Format::NODE_ARRAY);
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::NegativeCount {
				format: Format::NODE_ARRAY,
				num: -4
			})
		);
	}

	#[test]
	fn test_map_with_null_values_is_rejected() {
		let first = CString::new("a").unwrap();
		let second = CString::new("b").unwrap();
		let mut keys = [first.as_ptr() as *mut c_char, second.as_ptr() as *mut c_char];
		let mut list = NodeListFFI {
			num: 2,
			values: null_mut(),
			keys: keys.as_mut_ptr(),
		};
		let node = list_node(&mut list, Format::NODE_MAP);
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::MissingEntries {
				format: Format::NODE_MAP,
				len: 2
			})
		);
	}

	#[test]
	fn test_map_with_entries_and_null_keys_is_rejected() {
		let mut values = [NodeFFI::empty(), NodeFFI::empty()];
		let mut list = NodeListFFI {
			num: 2,
			values: values.as_mut_ptr(),
			keys: null_mut(),
		};
		let node = list_node(&mut list, Format::NODE_MAP);
		assert_eq!(unsafe { decode_node(&node) }, Err(DecodeError::MapWithoutKeys));
	}

	#[test]
	fn test_empty_array_with_null_values() {
		let mut list = NodeListFFI::empty();
		let node = list_node(&mut list, Format::NODE_ARRAY);
		assert_eq!(unsafe { decode_node(&node) }, Ok(Value::List(vec![])));
	}

	#[test]
	fn test_duplicate_key_is_rejected() {
		let mut values = [
			NodeFFI {
				u: NodeUnionFFI {
					int64: 1,
				},
				format: Format::INT64,
			},
			NodeFFI {
				u: NodeUnionFFI {
					int64: 2,
				},
				format: Format::INT64,
			},
		];
		let key = CString::new("speed").unwrap();
		let mut keys = [key.as_ptr() as *mut c_char, key.as_ptr() as *mut c_char];
		let mut list = NodeListFFI {
			num: 2,
			values: values.as_mut_ptr(),
			keys: keys.as_mut_ptr(),
		};
		let node = list_node(&mut list, Format::NODE_MAP);
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::DuplicateKey {
				index: 1,
				key: "speed".to_string()
			})
		);
	}

	#[test]
	fn test_byte_array_with_null_data_is_rejected() {
		let mut ba = ByteArrayFFI {
			data: null_mut(),
			size: 4,
		};
		let node = NodeFFI {
			u: NodeUnionFFI {
				ba: &mut ba,
			},
			format: Format::BYTE_ARRAY,
		};
		assert_eq!(
			unsafe { decode_node(&node) },
			Err(DecodeError::MissingEntries {
				format: Format::BYTE_ARRAY,
				len: 4
			})
		);
	}
}
