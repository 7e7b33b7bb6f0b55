// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{
	ffi::{c_char, c_int, c_void},
	fmt::{self, Debug, Formatter},
	ptr::null_mut,
};

use super::Format;

/// Payload of a node (`mpv_node.u`)
///
/// Which member is valid is decided by the owning node's format:
/// - `STRING`, `OSD_STRING`: `string`
/// - `FLAG`: `flag`
/// - `INT64`: `int64`
/// - `DOUBLE`: `double_`
/// - `NODE_ARRAY`, `NODE_MAP`: `list`
/// - `BYTE_ARRAY`: `ba`
#[repr(C)]
#[derive(Clone, Copy)]
pub union NodeUnionFFI {
	pub string: *mut c_char,
	pub flag: c_int,
	pub int64: i64,
	pub double_: f64,
	pub list: *mut NodeListFFI,
	pub ba: *mut ByteArrayFFI,
}

impl NodeUnionFFI {
	/// A zeroed payload
	pub const fn empty() -> Self {
		Self {
			int64: 0,
		}
	}
}

/// FFI-safe generic node (`mpv_node`)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct NodeFFI {
	pub u: NodeUnionFFI,
	pub format: Format,
}

impl NodeFFI {
	/// Create a node carrying no value
	pub const fn empty() -> Self {
		Self {
			u: NodeUnionFFI::empty(),
			format: Format::NONE,
		}
	}

	/// Pointer to the payload slot, as expected by the typed property entry points
	pub fn payload(&self) -> *const c_void {
		&self.u as *const NodeUnionFFI as *const c_void
	}

	/// Mutable pointer to the payload slot
	pub fn payload_mut(&mut self) -> *mut c_void {
		&mut self.u as *mut NodeUnionFFI as *mut c_void
	}
}

impl Default for NodeFFI {
	fn default() -> Self {
		Self::empty()
	}
}

impl Debug for NodeFFI {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("NodeFFI").field("format", &self.format).finish_non_exhaustive()
	}
}

/// FFI-safe list of nodes backing arrays and maps (`mpv_node_list`)
///
/// `keys` is null for arrays. For maps it points to `num` NUL-terminated, non-empty keys,
/// one per entry of `values`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NodeListFFI {
	/// Number of entries in `values` (and `keys`)
	pub num: c_int,
	/// Pointer to `num` nodes
	pub values: *mut NodeFFI,
	/// Pointer to `num` keys, or null for arrays
	pub keys: *mut *mut c_char,
}

impl NodeListFFI {
	/// Create an empty array list
	pub const fn empty() -> Self {
		Self {
			num: 0,
			values: null_mut(),
			keys: null_mut(),
		}
	}

	/// Number of entries, treating negative counts as empty
	pub fn len(&self) -> usize {
		usize::try_from(self.num).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn has_keys(&self) -> bool {
		!self.keys.is_null()
	}

	/// View the values as a slice
	///
	/// # Safety
	/// `values` must point to `num` initialized nodes that outlive the returned slice.
	pub unsafe fn values(&self) -> &[NodeFFI] {
		if self.values.is_null() || self.is_empty() {
			return &[];
		}
		// SAFETY: Caller guarantees values points to num initialized nodes
		unsafe { core::slice::from_raw_parts(self.values, self.len()) }
	}

	/// View the keys as a slice of C-string pointers
	///
	/// # Safety
	/// `keys` must be null or point to `num` entries that outlive the returned slice.
	pub unsafe fn keys(&self) -> &[*mut c_char] {
		if self.keys.is_null() || self.is_empty() {
			return &[];
		}
		// SAFETY: Caller guarantees keys points to num entries
		unsafe { core::slice::from_raw_parts(self.keys, self.len()) }
	}
}

/// FFI-safe byte buffer (`mpv_byte_array`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ByteArrayFFI {
	/// Pointer to the data
	pub data: *mut c_void,
	/// Size of the data in bytes
	pub size: usize,
}

impl ByteArrayFFI {
	pub const fn empty() -> Self {
		Self {
			data: null_mut(),
			size: 0,
		}
	}

	/// View the buffer as a byte slice
	///
	/// # Safety
	/// `data` must be null or point to `size` readable bytes that outlive the slice.
	pub unsafe fn as_slice(&self) -> &[u8] {
		if self.data.is_null() || self.size == 0 {
			return &[];
		}
		// SAFETY: Caller guarantees data points to size bytes
		unsafe { core::slice::from_raw_parts(self.data as *const u8, self.size) }
	}
}
