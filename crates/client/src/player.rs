// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::{c_char, c_void},
	ptr::null_mut,
};

use mpvbind_abi::{ClientCallbacks, Format, HandleFFI, NodeFFI, is_failure};
use mpvbind_marshal::{EncodeError, condense, decode, encode, encode::c_string, format_for};
use mpvbind_type::{Kind, Map, Value};
use tracing::{debug, instrument, trace, warn};

use crate::{ClientLibrary, Error, Event, PlayerConfig, Result, decode_event, log};

/// One libmpv client handle
///
/// Every operation except [`create`](Player::create) fails with [`Error::NotActive`] until
/// the handle exists. Each call encodes its arguments into a node tree owned by the call,
/// lends it to libmpv and frees it before returning, on success and on failure. Results
/// allocated by libmpv are decoded and handed back to libmpv's own release functions.
pub struct Player {
	callbacks: ClientCallbacks,
	handle: *mut HandleFFI,
	config: PlayerConfig,
	// Declared last: the callbacks point into it
	_library: Option<ClientLibrary>,
}

// SAFETY: libmpv handles may be used from any thread; the player has exclusive ownership
unsafe impl Send for Player {}

impl Player {
	pub fn new(callbacks: ClientCallbacks) -> Self {
		Self::with_config(callbacks, PlayerConfig::default())
	}

	pub fn with_config(callbacks: ClientCallbacks, config: PlayerConfig) -> Self {
		Self {
			callbacks,
			handle: null_mut(),
			config,
			_library: None,
		}
	}

	pub fn from_library(library: ClientLibrary) -> Self {
		Self {
			callbacks: library.callbacks(),
			handle: null_mut(),
			config: PlayerConfig::default(),
			_library: Some(library),
		}
	}

	pub(crate) fn configure(mut self, config: PlayerConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &PlayerConfig {
		&self.config
	}

	pub fn is_active(&self) -> bool {
		!self.handle.is_null()
	}

	/// Create and initialize the handle
	///
	/// Options from the configuration are applied first, then `options`; values must be
	/// strings, flags or numbers. If any step fails the half-created handle is destroyed.
	#[instrument(name = "player::create", level = "debug", skip_all)]
	pub fn create(&mut self, options: &Map) -> Result<()> {
		if self.is_active() {
			return Err(Error::AlreadyActive);
		}

		let mut merged: Vec<(String, String)> =
			self.config.options.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
		for (name, value) in options {
			merged.push((name.clone(), option_string(value)?));
		}

		let handle = unsafe { (self.callbacks.create)() };
		if handle.is_null() {
			warn!("mpv_create returned null");
			return Err(Error::CreateFailed);
		}
		self.handle = handle;

		if let Err(err) = self.initialize(&merged) {
			self.destroy();
			return Err(err);
		}
		debug!(options = merged.len(), "player created");
		Ok(())
	}

	fn initialize(&mut self, options: &[(String, String)]) -> Result<()> {
		for (name, value) in options {
			let c_name = c_string(name)?;
			let c_value = c_string(value)?;
			let status = unsafe { (self.callbacks.set_option_string)(self.handle, c_name.as_ptr(), c_value.as_ptr()) };
			if is_failure(status) {
				warn!(option = %name, status, "failed to set option");
				return Err(Error::boundary("set_option_string", status, format!("'{name}' = '{value}'")));
			}
		}

		let status = unsafe { (self.callbacks.initialize)(self.handle) };
		if is_failure(status) {
			warn!(status, "failed to initialize");
			return Err(Error::boundary("initialize", status, String::new()));
		}

		if let Some(level) = self.config.request_log_messages.clone() {
			self.command(&[Value::string("request_log_messages"), Value::String(level)])?;
		}
		Ok(())
	}

	/// Destroy the handle. Does nothing when inactive.
	pub fn destroy(&mut self) {
		if self.handle.is_null() {
			return;
		}
		unsafe { (self.callbacks.terminate_destroy)(self.handle) };
		self.handle = null_mut();
		debug!("player destroyed");
	}

	/// Run a command, e.g. `["loadfile", "movie.mkv"]`, and return its result
	#[instrument(name = "player::command", level = "debug", skip_all)]
	pub fn command(&mut self, args: &[Value]) -> Result<Value> {
		self.ensure_active()?;

		let mut node = encode(&Value::List(args.to_vec()))?;
		debug!(args = %node, "command");

		let mut result = NodeFFI::empty();
		let status = unsafe { (self.callbacks.command_node)(self.handle, node.as_mut_ptr(), &mut result) };
		if is_failure(status) {
			warn!(args = %node, status, "command failed");
			return Err(Error::boundary("command", status, node.to_string()));
		}
		drop(node);

		let value = unsafe { mpvbind_marshal::decode_node(&result) };
		unsafe { (self.callbacks.free_node_contents)(&mut result) };
		Ok(value?)
	}

	/// Read a property as `kind`
	///
	/// Lists and maps are requested as generic nodes. Byte arrays cannot be read, libmpv
	/// refuses the format for property reads.
	#[instrument(name = "player::get_prop", level = "debug", skip(self))]
	pub fn get_prop(&mut self, kind: Kind, name: &str) -> Result<Value> {
		self.ensure_active()?;

		let format = condense(format_for(kind));
		if format == Format::NONE {
			return Err(EncodeError::UnsupportedKind(kind).into());
		}
		if format == Format::BYTE_ARRAY {
			return Err(Error::UnreadableKind(kind));
		}
		let c_name = c_string(name)?;

		let mut slot = NodeFFI::empty();
		let data = if format == Format::NODE {
			&mut slot as *mut NodeFFI as *mut c_void
		} else {
			slot.payload_mut()
		};

		let status = unsafe { (self.callbacks.get_property)(self.handle, c_name.as_ptr(), format, data) };
		if is_failure(status) {
			warn!(property = %name, %kind, status, "get property failed");
			return Err(Error::boundary("get_property", status, format!("'{name}' as {kind}")));
		}

		let value = unsafe { decode(format, data) };
		unsafe { self.release_result(format, slot) };
		Ok(value?)
	}

	/// Hand a property result back to libmpv
	unsafe fn release_result(&self, format: Format, mut slot: NodeFFI) {
		unsafe {
			match format {
				Format::STRING | Format::OSD_STRING => {
					let string: *mut c_char = slot.u.string;
					(self.callbacks.free)(string as *mut c_void);
				}
				Format::NODE => (self.callbacks.free_node_contents)(&mut slot),
				_ => {}
			}
		}
	}

	/// Write a property
	#[instrument(name = "player::set_prop", level = "debug", skip(self, value))]
	pub fn set_prop(&mut self, name: &str, value: &Value) -> Result<()> {
		self.ensure_active()?;

		let c_name = c_string(name)?;
		let mut node = encode(value)?;
		let (format, data) = node.typed_payload();
		debug!(value = %node, "set property");

		let status = unsafe { (self.callbacks.set_property)(self.handle, c_name.as_ptr(), format, data) };
		if is_failure(status) {
			warn!(property = %name, value = %node, status, "set property failed");
			return Err(Error::boundary("set_property", status, format!("'{name}' = {node}")));
		}
		Ok(())
	}

	/// Drain pending events, handing each to `emit` in order
	///
	/// Waits up to the configured poll timeout for the first event, then drains without
	/// blocking until the queue is empty. An event whose payload cannot be decoded is still
	/// emitted, with `Value::None` as payload. Returns the number of events emitted.
	#[instrument(name = "player::poll", level = "trace", skip_all)]
	pub fn poll(&mut self, mut emit: impl FnMut(Event)) -> Result<usize> {
		self.ensure_active()?;

		let mut timeout = self.config.poll_timeout;
		let mut count = 0;
		loop {
			let raw = unsafe { (self.callbacks.wait_event)(self.handle, timeout) };
			timeout = 0.0;
			if raw.is_null() {
				break;
			}
			let raw = unsafe { &*raw };
			if raw.event_id.is_none() {
				break;
			}

			let event = match unsafe { decode_event(raw) } {
				Ok(event) => event,
				Err(err) => {
					warn!(event = %raw.event_id, error = %err, "undecodable event payload");
					Event::without_payload(raw)
				}
			};
			trace!(event = event.name, status = event.status_code, "event");

			if self.config.forward_log_messages && event.kind == mpvbind_abi::EventId::LOG_MESSAGE {
				log::forward(&event.payload);
			}
			emit(event);
			count += 1;
		}
		Ok(count)
	}

	/// Drain pending events into a vector
	pub fn poll_events(&mut self) -> Result<Vec<Event>> {
		let mut events = Vec::new();
		self.poll(|event| events.push(event))?;
		Ok(events)
	}

	fn ensure_active(&self) -> Result<()> {
		if self.is_active() {
			Ok(())
		} else {
			Err(Error::NotActive)
		}
	}
}

impl Drop for Player {
	fn drop(&mut self) {
		self.destroy();
	}
}

/// String form of an option value as `mpv_set_option_string` expects it
fn option_string(value: &Value) -> Result<String> {
	match value {
		Value::String(v) => Ok(v.clone()),
		Value::Bool(v) => Ok(if *v { "yes" } else { "no" }.to_string()),
		Value::Int(v) => Ok(v.to_string()),
		Value::Float(v) => Ok(v.to_string()),
		other => Err(EncodeError::UnsupportedKind(other.kind()).into()),
	}
}
