// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Node trees owned by the fake library
//!
//! These play the part of memory libmpv allocates itself (property results, command
//! results, event payloads). The client must hand them back through `free_node_contents`
//! or `free`; freeing them any other way is a bug the fake can detect.

use std::{
	ffi::{CStr, CString, c_char, c_int, c_void},
	ptr::{null_mut, slice_from_raw_parts_mut},
};

use mpvbind_abi::{ByteArrayFFI, Format, NodeFFI, NodeListFFI, NodeUnionFFI};
use mpvbind_type::{Map, Value};

/// Allocate a node tree for `value`. `Value::None` and strings with NUL bytes become an
/// empty node.
pub(crate) fn build(value: &Value) -> NodeFFI {
	match value {
		Value::None => NodeFFI::empty(),
		Value::Bool(v) => NodeFFI {
			u: NodeUnionFFI {
				flag: *v as c_int,
			},
			format: Format::FLAG,
		},
		Value::Int(v) => NodeFFI {
			u: NodeUnionFFI {
				int64: *v,
			},
			format: Format::INT64,
		},
		Value::Float(v) => NodeFFI {
			u: NodeUnionFFI {
				double_: *v,
			},
			format: Format::DOUBLE,
		},
		Value::String(v) => match CString::new(v.as_str()) {
			Ok(s) => NodeFFI {
				u: NodeUnionFFI {
					string: s.into_raw(),
				},
				format: Format::STRING,
			},
			Err(_) => NodeFFI::empty(),
		},
		Value::Bytes(v) => {
			let data: Box<[u8]> = v.as_slice().into();
			let size = data.len();
			NodeFFI {
				u: NodeUnionFFI {
					ba: Box::into_raw(Box::new(ByteArrayFFI {
						data: Box::into_raw(data) as *mut u8 as *mut c_void,
						size,
					})),
				},
				format: Format::BYTE_ARRAY,
			}
		}
		Value::List(items) => list(Format::NODE_ARRAY, items.iter().map(build).collect(), null_mut()),
		Value::Map(map) => {
			let keys: Box<[*mut c_char]> = map
				.keys()
				.map(|k| CString::new(k.as_str()).unwrap_or_default().into_raw())
				.collect();
			list(Format::NODE_MAP, map.values().map(build).collect(), Box::into_raw(keys) as *mut *mut c_char)
		}
	}
}

fn list(format: Format, values: Box<[NodeFFI]>, keys: *mut *mut c_char) -> NodeFFI {
	let num = values.len() as c_int;
	NodeFFI {
		u: NodeUnionFFI {
			list: Box::into_raw(Box::new(NodeListFFI {
				num,
				values: Box::into_raw(values) as *mut NodeFFI,
				keys,
			})),
		},
		format,
	}
}

/// Address identifying the allocation behind a node, if it has one
pub(crate) fn root_address(node: &NodeFFI) -> Option<usize> {
	let address = unsafe {
		match node.format {
			Format::STRING | Format::OSD_STRING => node.u.string as usize,
			Format::NODE_ARRAY | Format::NODE_MAP => node.u.list as usize,
			Format::BYTE_ARRAY => node.u.ba as usize,
			_ => 0,
		}
	};
	(address != 0).then_some(address)
}

/// Free a tree made by [`build`]
pub(crate) unsafe fn free(node: NodeFFI) {
	unsafe {
		match node.format {
			Format::STRING | Format::OSD_STRING if !node.u.string.is_null() => {
				drop(CString::from_raw(node.u.string));
			}
			Format::BYTE_ARRAY if !node.u.ba.is_null() => {
				let ba = Box::from_raw(node.u.ba);
				if !ba.data.is_null() {
					drop(Box::from_raw(slice_from_raw_parts_mut(ba.data as *mut u8, ba.size)));
				}
			}
			Format::NODE_ARRAY | Format::NODE_MAP if !node.u.list.is_null() => {
				let list = Box::from_raw(node.u.list);
				let values = Box::from_raw(slice_from_raw_parts_mut(list.values, list.len()));
				for value in values.iter() {
					free(*value);
				}
				if !list.keys.is_null() {
					let keys = Box::from_raw(slice_from_raw_parts_mut(list.keys, list.len()));
					for key in keys.iter() {
						drop(CString::from_raw(*key));
					}
				}
			}
			_ => {}
		}
	}
}

/// Read a node written by the client. Malformed parts read as `Value::None`.
pub(crate) unsafe fn read_node(node: &NodeFFI) -> Value {
	unsafe { read(node.format, node.payload()) }
}

/// Read a typed payload written by the client
pub(crate) unsafe fn read(format: Format, data: *const c_void) -> Value {
	if data.is_null() {
		return Value::None;
	}
	unsafe {
		match format {
			Format::NODE => read_node(&*(data as *const NodeFFI)),
			Format::STRING | Format::OSD_STRING => read_string(*(data as *const *const c_char))
				.map(Value::String)
				.unwrap_or_default(),
			Format::FLAG => Value::Bool(*(data as *const c_int) != 0),
			Format::INT64 => Value::Int(*(data as *const i64)),
			Format::DOUBLE => Value::Float(*(data as *const f64)),
			Format::BYTE_ARRAY => {
				let ba = *(data as *const *const ByteArrayFFI);
				if ba.is_null() {
					return Value::None;
				}
				Value::Bytes((*ba).as_slice().to_vec())
			}
			Format::NODE_ARRAY | Format::NODE_MAP => {
				let list = *(data as *const *const NodeListFFI);
				if list.is_null() {
					return Value::None;
				}
				let list = &*list;
				let values = list.values().iter().map(|v| read_node(v));
				if format == Format::NODE_ARRAY {
					Value::List(values.collect())
				} else {
					let keys = list.keys().iter().map(|k| read_string(*k).unwrap_or_default());
					Value::Map(keys.zip(values).collect::<Map>())
				}
			}
			_ => Value::None,
		}
	}
}

pub(crate) unsafe fn read_string(string: *const c_char) -> Option<String> {
	if string.is_null() {
		return None;
	}
	Some(unsafe { CStr::from_ptr(string) }.to_string_lossy().into_owned())
}
