// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::CString, ptr::slice_from_raw_parts_mut};

use mpvbind_abi::{ByteArrayFFI, Format, NodeFFI, NodeListFFI};

/// Free every allocation below a node built by the encoder
///
/// Containers release their children first, then their keys, then the arrays and the list
/// handle itself. Scalar formats own nothing.
///
/// # Safety
/// `node` must come from [`Node::into_raw`](crate::Node::into_raw) (or an encoder internal
/// equivalent) and must not be released twice. Nodes allocated by libmpv must go through
/// `free_node_contents` instead.
pub unsafe fn release(node: NodeFFI) {
	match node.format {
		Format::STRING | Format::OSD_STRING => unsafe {
			let string = node.u.string;
			if !string.is_null() {
				drop(CString::from_raw(string));
			}
		},
		Format::BYTE_ARRAY => unsafe { release_bytes(node.u.ba) },
		Format::NODE_ARRAY | Format::NODE_MAP => unsafe { release_list(node.u.list) },
		_ => {}
	}
}

unsafe fn release_bytes(ba: *mut ByteArrayFFI) {
	if ba.is_null() {
		return;
	}
	let ba = unsafe { Box::from_raw(ba) };
	if !ba.data.is_null() {
		drop(unsafe { Box::from_raw(slice_from_raw_parts_mut(ba.data as *mut u8, ba.size)) });
	}
}

unsafe fn release_list(list: *mut NodeListFFI) {
	if list.is_null() {
		return;
	}
	let list = unsafe { Box::from_raw(list) };
	let len = list.len();

	if !list.values.is_null() {
		let values = unsafe { Box::from_raw(slice_from_raw_parts_mut(list.values, len)) };
		for value in values.iter() {
			unsafe { release(*value) };
		}
	}

	if !list.keys.is_null() {
		let keys = unsafe { Box::from_raw(slice_from_raw_parts_mut(list.keys, len)) };
		for key in keys.iter() {
			if !key.is_null() {
				drop(unsafe { CString::from_raw(*key) });
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use mpvbind_abi::{NodeFFI, NodeListFFI, NodeUnionFFI};

	use super::*;

	#[test]
	fn test_release_scalar_is_noop() {
		let node = NodeFFI {
			u: NodeUnionFFI {
				int64: 99,
			},
			format: Format::INT64,
		};
		unsafe { release(node) };
	}

	#[test]
	fn test_release_tolerates_null_handles() {
		unsafe {
			release(NodeFFI {
				u: NodeUnionFFI::empty(),
				format: Format::STRING,
			});
			release(NodeFFI {
				u: NodeUnionFFI::empty(),
				format: Format::NODE_MAP,
			});
			release(NodeFFI {
				u: NodeUnionFFI::empty(),
				format: Format::BYTE_ARRAY,
			});
		}
	}

	#[test]
	fn test_release_unknown_format_is_noop() {
		unsafe {
			release(NodeFFI {
				u: NodeUnionFFI::empty(),
				format: Format(77),
			})
		};
	}

	#[test]
	fn test_release_empty_list() {
		let list = Box::into_raw(Box::new(NodeListFFI::empty()));
		unsafe {
			release(NodeFFI {
				u: NodeUnionFFI {
					list,
				},
				format: Format::NODE_ARRAY,
			})
		};
	}
}
