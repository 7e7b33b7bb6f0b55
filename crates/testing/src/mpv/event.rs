// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	ffi::{CString, c_char, c_int, c_void},
	ptr::null_mut,
};

use mpvbind_abi::{
	EndFileReason, EventClientMessageFFI, EventCommandFFI, EventEndFileFFI, EventFFI, EventHookFFI, EventId,
	EventLogMessageFFI, EventPropertyFFI, EventStartFileFFI, Format, NodeFFI,
};
use mpvbind_type::Value;

use super::foreign;

/// An event queued on the fake, handed out by `wait_event` in order
#[derive(Debug, Clone)]
pub enum ScriptedEvent {
	/// An event without payload (SHUTDOWN, FILE_LOADED, ...), also for unknown kinds
	Bare(EventId),
	LogMessage {
		prefix: String,
		level: String,
		text: String,
		log_level: c_int,
	},
	/// Delivered as a NODE payload, or as NONE with null data for `Value::None`
	PropertyChange {
		name: String,
		value: Value,
	},
	GetPropertyReply {
		name: String,
		value: Value,
		status: c_int,
		request_id: u64,
	},
	CommandReply {
		result: Value,
		status: c_int,
		request_id: u64,
	},
	StartFile {
		entry_id: i64,
	},
	EndFile {
		reason: EndFileReason,
		error: c_int,
		entry_id: i64,
		insert_id: i64,
		insert_count: c_int,
	},
	ClientMessage {
		args: Vec<String>,
	},
	Hook {
		name: String,
		id: u64,
	},
}

impl ScriptedEvent {
	pub fn log(prefix: &str, level: &str, text: &str, log_level: c_int) -> Self {
		ScriptedEvent::LogMessage {
			prefix: prefix.to_string(),
			level: level.to_string(),
			text: text.to_string(),
			log_level,
		}
	}

	pub fn property_change(name: &str, value: impl Into<Value>) -> Self {
		ScriptedEvent::PropertyChange {
			name: name.to_string(),
			value: value.into(),
		}
	}
}

/// Memory behind the event most recently returned by `wait_event`
///
/// Kept alive until the next `wait_event` call, the same validity libmpv documents.
pub(crate) struct EventStorage {
	header: Box<EventFFI>,
	strings: Vec<CString>,
	payloads: Vec<Box<dyn Any>>,
	nodes: Vec<NodeFFI>,
}

impl EventStorage {
	pub(crate) fn none() -> Self {
		Self::with_header(EventFFI::none())
	}

	fn with_header(header: EventFFI) -> Self {
		Self {
			header: Box::new(header),
			strings: Vec::new(),
			payloads: Vec::new(),
			nodes: Vec::new(),
		}
	}

	pub(crate) fn header_ptr(&mut self) -> *mut EventFFI {
		&mut *self.header
	}

	pub(crate) fn build(event: &ScriptedEvent) -> Self {
		match event {
			ScriptedEvent::Bare(id) => Self::with_header(EventFFI {
				event_id: *id,
				..EventFFI::none()
			}),
			ScriptedEvent::LogMessage {
				prefix,
				level,
				text,
				log_level,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::LOG_MESSAGE,
					..EventFFI::none()
				});
				let payload = EventLogMessageFFI {
					prefix: storage.string(prefix),
					level: storage.string(level),
					text: storage.string(text),
					log_level: *log_level,
				};
				storage.attach(payload);
				storage
			}
			ScriptedEvent::PropertyChange {
				name,
				value,
			} => Self::property(EventId::PROPERTY_CHANGE, name, value, 0, 0),
			ScriptedEvent::GetPropertyReply {
				name,
				value,
				status,
				request_id,
			} => Self::property(EventId::GET_PROPERTY_REPLY, name, value, *status, *request_id),
			ScriptedEvent::CommandReply {
				result,
				status,
				request_id,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::COMMAND_REPLY,
					error: *status,
					reply_userdata: *request_id,
					data: null_mut(),
				});
				let result = storage.node(result);
				storage.attach(EventCommandFFI {
					result,
				});
				storage
			}
			ScriptedEvent::StartFile {
				entry_id,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::START_FILE,
					..EventFFI::none()
				});
				storage.attach(EventStartFileFFI {
					playlist_entry_id: *entry_id,
				});
				storage
			}
			ScriptedEvent::EndFile {
				reason,
				error,
				entry_id,
				insert_id,
				insert_count,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::END_FILE,
					..EventFFI::none()
				});
				storage.attach(EventEndFileFFI {
					reason: *reason,
					error: *error,
					playlist_entry_id: *entry_id,
					playlist_insert_id: *insert_id,
					playlist_insert_num_entries: *insert_count,
				});
				storage
			}
			ScriptedEvent::ClientMessage {
				args,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::CLIENT_MESSAGE,
					..EventFFI::none()
				});
				let pointers: Box<[*const c_char]> = args.iter().map(|arg| storage.string(arg)).collect();
				let payload = EventClientMessageFFI {
					num_args: pointers.len() as c_int,
					args: pointers.as_ptr(),
				};
				storage.payloads.push(Box::new(pointers));
				storage.attach(payload);
				storage
			}
			ScriptedEvent::Hook {
				name,
				id,
			} => {
				let mut storage = Self::with_header(EventFFI {
					event_id: EventId::HOOK,
					..EventFFI::none()
				});
				let payload = EventHookFFI {
					name: storage.string(name),
					id: *id,
				};
				storage.attach(payload);
				storage
			}
		}
	}

	fn property(event_id: EventId, name: &str, value: &Value, status: c_int, request_id: u64) -> Self {
		let mut storage = Self::with_header(EventFFI {
			event_id,
			error: status,
			reply_userdata: request_id,
			data: null_mut(),
		});
		let name = storage.string(name);
		let payload = if value.is_none() {
			EventPropertyFFI {
				name,
				format: Format::NONE,
				data: null_mut(),
			}
		} else {
			let node = storage.node(value);
			let mut node = Box::new(node);
			let data = &mut *node as *mut NodeFFI as *mut c_void;
			storage.payloads.push(node);
			EventPropertyFFI {
				name,
				format: Format::NODE,
				data,
			}
		};
		storage.attach(payload);
		storage
	}

	fn string(&mut self, s: &str) -> *const c_char {
		let s = CString::new(s).unwrap_or_default();
		let ptr = s.as_ptr();
		self.strings.push(s);
		ptr
	}

	fn node(&mut self, value: &Value) -> NodeFFI {
		let node = foreign::build(value);
		self.nodes.push(node);
		node
	}

	fn attach<T: 'static>(&mut self, payload: T) {
		let mut payload = Box::new(payload);
		self.header.data = &mut *payload as *mut T as *mut c_void;
		self.payloads.push(payload);
	}
}

impl Drop for EventStorage {
	fn drop(&mut self) {
		for node in self.nodes.drain(..) {
			unsafe { foreign::free(node) };
		}
	}
}
