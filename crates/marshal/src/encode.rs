// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Value to node encoding

use std::{
	ffi::{CString, c_char, c_int, c_void},
	ptr::null_mut,
};

use mpvbind_abi::{ByteArrayFFI, Format, NodeFFI, NodeListFFI, NodeUnionFFI};
use mpvbind_type::{Kind, Map, Value};

use crate::{EncodeError, Node};

/// Encode a value into an owned node tree
///
/// Lists and maps keep the order in which the value enumerates its entries. On failure
/// every part of the tree built so far is released before the error is returned.
pub fn encode(value: &Value) -> Result<Node, EncodeError> {
	match value {
		Value::None => Err(EncodeError::UnsupportedKind(Kind::None)),
		Value::Bool(v) => Ok(scalar(
			Format::FLAG,
			NodeUnionFFI {
				flag: *v as c_int,
			},
		)),
		Value::Int(v) => Ok(scalar(
			Format::INT64,
			NodeUnionFFI {
				int64: *v,
			},
		)),
		Value::Float(v) => Ok(scalar(
			Format::DOUBLE,
			NodeUnionFFI {
				double_: *v,
			},
		)),
		Value::String(v) => encode_string(v),
		Value::Bytes(v) => Ok(encode_bytes(v)),
		Value::List(items) => encode_list(items),
		Value::Map(map) => encode_map(map),
	}
}

/// Copy a string onto the heap as a NUL-terminated buffer
pub fn c_string(s: &str) -> Result<CString, EncodeError> {
	CString::new(s).map_err(|e| EncodeError::InteriorNul {
		position: e.nul_position(),
	})
}

fn scalar(format: Format, u: NodeUnionFFI) -> Node {
	// SAFETY: scalar payloads own no allocation
	unsafe {
		Node::from_raw(NodeFFI {
			u,
			format,
		})
	}
}

fn list_len(len: usize) -> Result<c_int, EncodeError> {
	c_int::try_from(len).map_err(|_| EncodeError::TooLarge {
		len,
	})
}

fn encode_string(s: &str) -> Result<Node, EncodeError> {
	let string = c_string(s)?.into_raw();
	// SAFETY: the buffer was just allocated by CString and is owned by the node
	Ok(unsafe {
		Node::from_raw(NodeFFI {
			u: NodeUnionFFI {
				string,
			},
			format: Format::STRING,
		})
	})
}

fn encode_bytes(bytes: &[u8]) -> Node {
	let data: Box<[u8]> = bytes.into();
	let size = data.len();
	let ba = Box::into_raw(Box::new(ByteArrayFFI {
		data: Box::into_raw(data) as *mut u8 as *mut c_void,
		size,
	}));
	// SAFETY: both the handle and the buffer were just allocated and are owned by the node
	unsafe {
		Node::from_raw(NodeFFI {
			u: NodeUnionFFI {
				ba,
			},
			format: Format::BYTE_ARRAY,
		})
	}
}

fn encode_list(items: &[Value]) -> Result<Node, EncodeError> {
	let num = list_len(items.len())?;

	// Children already built are dropped, and therefore released, if a later one fails
	let mut values = Vec::with_capacity(items.len());
	for item in items {
		values.push(encode(item)?);
	}

	let list = Box::into_raw(Box::new(NodeListFFI {
		num,
		values: into_node_array(values),
		keys: null_mut(),
	}));
	// SAFETY: the list and all children are owned by the node from here on
	Ok(unsafe {
		Node::from_raw(NodeFFI {
			u: NodeUnionFFI {
				list,
			},
			format: Format::NODE_ARRAY,
		})
	})
}

fn encode_map(map: &Map) -> Result<Node, EncodeError> {
	let num = list_len(map.len())?;

	let mut keys = Vec::with_capacity(map.len());
	let mut values = Vec::with_capacity(map.len());
	for (key, value) in map {
		if key.is_empty() {
			return Err(EncodeError::EmptyKey);
		}
		keys.push(c_string(key)?);
		values.push(encode(value)?);
	}

	let keys: Box<[*mut c_char]> = keys.into_iter().map(CString::into_raw).collect();
	let list = Box::into_raw(Box::new(NodeListFFI {
		num,
		values: into_node_array(values),
		keys: Box::into_raw(keys) as *mut *mut c_char,
	}));
	// SAFETY: the list, the keys and all children are owned by the node from here on
	Ok(unsafe {
		Node::from_raw(NodeFFI {
			u: NodeUnionFFI {
				list,
			},
			format: Format::NODE_MAP,
		})
	})
}

fn into_node_array(nodes: Vec<Node>) -> *mut NodeFFI {
	let nodes: Box<[NodeFFI]> = nodes.into_iter().map(Node::into_raw).collect();
	Box::into_raw(nodes) as *mut NodeFFI
}
