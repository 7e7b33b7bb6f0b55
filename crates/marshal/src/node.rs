// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::c_void,
	fmt::{self, Debug, Display, Formatter},
	mem::ManuallyDrop,
};

use mpvbind_abi::{Format, NodeFFI};
use mpvbind_type::Value;

use crate::{DecodeError, condense, decode_node, describe, release};

/// A node tree built by [`encode`](crate::encode), owning every allocation below its root
///
/// Dropping the node frees the whole tree. The tree is only ever lent to libmpv as a read
/// only argument; [`Node::into_raw`] hands ownership away explicitly.
pub struct Node {
	raw: NodeFFI,
}

// SAFETY: the tree is exclusively owned and has no thread affinity
unsafe impl Send for Node {}

impl Node {
	/// Take ownership of a tree built by the encoder
	///
	/// # Safety
	/// Every allocation below `raw` must have been made by this crate's encoder and must not
	/// be owned by anything else.
	pub(crate) unsafe fn from_raw(raw: NodeFFI) -> Self {
		Self {
			raw,
		}
	}

	pub fn format(&self) -> Format {
		self.raw.format
	}

	pub fn as_ffi(&self) -> &NodeFFI {
		&self.raw
	}

	/// Pointer for entry points that take a node argument (`mpv_command_node`). The callee
	/// reads the tree and must not modify or free it.
	pub fn as_mut_ptr(&mut self) -> *mut NodeFFI {
		&mut self.raw
	}

	/// Format and payload pointer for the typed property entry points
	///
	/// Containers are passed as the generic NODE pointing at the whole node, everything else
	/// as its own format pointing at the payload slot.
	pub fn typed_payload(&mut self) -> (Format, *mut c_void) {
		let format = condense(self.raw.format);
		if format == Format::NODE {
			(format, &mut self.raw as *mut NodeFFI as *mut c_void)
		} else {
			(format, self.raw.payload_mut())
		}
	}

	/// Read the tree back into a value
	pub fn decode(&self) -> Result<Value, DecodeError> {
		// SAFETY: the tree was built by the encoder and is alive
		unsafe { decode_node(&self.raw) }
	}

	/// Give up ownership; the caller becomes responsible for calling [`release`] once
	pub fn into_raw(self) -> NodeFFI {
		let node = ManuallyDrop::new(self);
		node.raw
	}
}

impl Drop for Node {
	fn drop(&mut self) {
		// SAFETY: the tree was built by the encoder and is released exactly once here
		unsafe { release(self.raw) }
	}
}

impl Display for Node {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		// SAFETY: the tree was built by the encoder and is alive
		f.write_str(&unsafe { describe(&self.raw) })
	}
}

impl Debug for Node {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Node").field(&format_args!("{self}")).finish()
	}
}
