// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{
	ffi::{c_char, c_double, c_int, c_void},
	marker::{PhantomData, PhantomPinned},
};

use crate::{
	event::EventFFI,
	node::{Format, NodeFFI},
};

/// Opaque client handle (`mpv_handle`)
#[repr(C)]
pub struct HandleFFI {
	_data: [u8; 0],
	_marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// libmpv client entry points
///
/// Every member has the signature of the C function of the same name in `client.h`
/// (`mpv_create`, `mpv_initialize`, ...). The table is filled either from a loaded
/// shared library or from an in-process test double.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ClientCallbacks {
	/// Create a new, uninitialized handle
	///
	/// # Returns
	/// - The handle, or null on allocation failure
	pub create: unsafe extern "C" fn() -> *mut HandleFFI,

	/// Initialize a handle created with `create`
	///
	/// # Returns
	/// - 0 on success, negative error code on failure
	pub initialize: unsafe extern "C" fn(handle: *mut HandleFFI) -> c_int,

	/// Disconnect and destroy the handle; the pointer is invalid afterwards
	pub terminate_destroy: unsafe extern "C" fn(handle: *mut HandleFFI),

	/// Set an option from its string representation (before `initialize`)
	///
	/// # Parameters
	/// - `name`: NUL-terminated option name
	/// - `data`: NUL-terminated option value
	///
	/// # Returns
	/// - 0 on success, negative error code on failure
	pub set_option_string:
		unsafe extern "C" fn(handle: *mut HandleFFI, name: *const c_char, data: *const c_char) -> c_int,

	/// Run a command given as an array node
	///
	/// # Parameters
	/// - `args`: Node whose format is NODE_ARRAY, read only
	/// - `result`: Receives a node allocated by the library; must be released with
	///   `free_node_contents`. Only written on success.
	///
	/// # Returns
	/// - 0 on success, negative error code on failure
	pub command_node: unsafe extern "C" fn(handle: *mut HandleFFI, args: *mut NodeFFI, result: *mut NodeFFI) -> c_int,

	/// Read a property into a typed payload
	///
	/// # Parameters
	/// - `name`: NUL-terminated property name
	/// - `format`: Requested format; containers must use NODE
	/// - `data`: Receives the value; strings must be released with `free`, nodes with
	///   `free_node_contents`
	///
	/// # Returns
	/// - 0 on success, negative error code on failure
	pub get_property: unsafe extern "C" fn(
		handle: *mut HandleFFI,
		name: *const c_char,
		format: Format,
		data: *mut c_void,
	) -> c_int,

	/// Write a property from a typed payload
	///
	/// # Parameters
	/// - `name`: NUL-terminated property name
	/// - `format`: Format of `data`; containers must use NODE
	/// - `data`: Value to write, read only, ownership stays with the caller
	///
	/// # Returns
	/// - 0 on success, negative error code on failure
	pub set_property: unsafe extern "C" fn(
		handle: *mut HandleFFI,
		name: *const c_char,
		format: Format,
		data: *mut c_void,
	) -> c_int,

	/// Fetch the next event
	///
	/// # Parameters
	/// - `timeout`: Seconds to wait; 0 never blocks
	///
	/// # Returns
	/// - Pointer to an event owned by the handle, valid until the next call. Never null;
	///   the kind is NONE when nothing is pending.
	pub wait_event: unsafe extern "C" fn(handle: *mut HandleFFI, timeout: c_double) -> *mut EventFFI,

	/// Free every allocation inside a node populated by the library
	pub free_node_contents: unsafe extern "C" fn(node: *mut NodeFFI),

	/// Free memory allocated by the library (e.g. strings from `get_property`)
	pub free: unsafe extern "C" fn(data: *mut c_void),
}
