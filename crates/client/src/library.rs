// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Loading libmpv as a shared library

use std::ffi::OsStr;

use libloading::Library;
use mpvbind_abi::ClientCallbacks;
use tracing::{debug, instrument};

use crate::Result;

/// A loaded libmpv together with the entry points resolved from it
///
/// The callback table is only valid while this value is alive; [`Player`](crate::Player)
/// keeps the library it was built from.
pub struct ClientLibrary {
	_library: Library,
	callbacks: ClientCallbacks,
}

impl ClientLibrary {
	/// Load libmpv by its platform file name (`libmpv.so`, `mpv.dll`, ...)
	pub fn load_default() -> Result<Self> {
		Self::load(libloading::library_filename("mpv"))
	}

	/// Load libmpv from `path` and resolve every entry point the client uses
	#[instrument(name = "library::load", level = "debug", skip(path), fields(path = ?path.as_ref()))]
	pub fn load(path: impl AsRef<OsStr>) -> Result<Self> {
		// SAFETY: loading libmpv runs no initialization routines with preconditions
		let library = unsafe { Library::new(path.as_ref()) }?;

		// SAFETY: the declared types are the signatures from client.h
		let callbacks = unsafe {
			ClientCallbacks {
				create: symbol(&library, b"mpv_create\0")?,
				initialize: symbol(&library, b"mpv_initialize\0")?,
				terminate_destroy: symbol(&library, b"mpv_terminate_destroy\0")?,
				set_option_string: symbol(&library, b"mpv_set_option_string\0")?,
				command_node: symbol(&library, b"mpv_command_node\0")?,
				get_property: symbol(&library, b"mpv_get_property\0")?,
				set_property: symbol(&library, b"mpv_set_property\0")?,
				wait_event: symbol(&library, b"mpv_wait_event\0")?,
				free_node_contents: symbol(&library, b"mpv_free_node_contents\0")?,
				free: symbol(&library, b"mpv_free\0")?,
			}
		};
		debug!("libmpv entry points resolved");

		Ok(Self {
			_library: library,
			callbacks,
		})
	}

	pub fn callbacks(&self) -> ClientCallbacks {
		self.callbacks
	}
}

/// Resolve a function pointer of type `T`
///
/// # Safety
/// `T` must match the actual type of the symbol.
unsafe fn symbol<T: Copy>(library: &Library, name: &[u8]) -> Result<T> {
	let symbol = unsafe { library.get::<T>(name) }?;
	Ok(*symbol)
}
