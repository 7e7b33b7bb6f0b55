// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod payload;

use mpvbind_abi::{EventFFI, EventId};
use mpvbind_marshal::DecodeError;
use mpvbind_type::Value;
use serde::{Serialize, Serializer};

/// An event drained from the player, with its payload decoded into a host value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
	/// Name as libmpv spells it, e.g. "end-file"
	pub name: &'static str,
	#[serde(rename = "type", serialize_with = "serialize_kind")]
	pub kind: EventId,
	/// Status of the request this event replies to; 0 or a negative libmpv code
	pub status_code: i32,
	/// Userdata of the asynchronous request this event replies to
	pub request_id: u64,
	pub payload: Value,
}

fn serialize_kind<S: Serializer>(kind: &EventId, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_i32(kind.code())
}

impl Event {
	/// The event's header without its payload
	pub fn without_payload(event: &EventFFI) -> Self {
		Self {
			name: event_name(event.event_id),
			kind: event.event_id,
			status_code: event.error,
			request_id: event.reply_userdata,
			payload: Value::None,
		}
	}

	pub fn is_error(&self) -> bool {
		self.status_code < 0
	}
}

/// Name of an event kind as `mpv_event_name` reports it; "unknown" for unlisted kinds
pub fn event_name(kind: EventId) -> &'static str {
	kind.name().unwrap_or("unknown")
}

/// Decode an event returned by `wait_event`
///
/// Kinds with a payload are dispatched to their decoder; every other kind, including kinds
/// this crate does not know, yields `Value::None`. Nothing is freed: the event memory
/// belongs to the handle.
///
/// # Safety
/// `event.data` must be null or point to the payload struct libmpv defines for
/// `event.event_id`, valid for the duration of the call.
pub unsafe fn decode_event(event: &EventFFI) -> Result<Event, DecodeError> {
	let mut decoded = Event::without_payload(event);
	if event.data.is_null() {
		return Ok(decoded);
	}
	if let Some(decoder) = payload::decoder_for(event.event_id) {
		decoded.payload = unsafe { decoder(event.data) }?;
	}
	Ok(decoded)
}

#[cfg(test)]
mod tests {
	use std::{
		ffi::{CString, c_char, c_void},
		ptr::{null, null_mut},
	};

	use mpvbind_abi::{
		EndFileReason, EventClientMessageFFI, EventCommandFFI, EventEndFileFFI, EventHookFFI,
		EventLogMessageFFI, EventPropertyFFI, EventStartFileFFI, Format, MPV_ERROR_PROPERTY_UNAVAILABLE,
		MPV_LOG_LEVEL_INFO, NodeFFI, NodeListFFI, NodeUnionFFI,
	};
	use mpvbind_type::Value;

	use super::*;

	fn header(event_id: EventId, data: *mut c_void) -> EventFFI {
		EventFFI {
			event_id,
			error: 0,
			reply_userdata: 0,
			data,
		}
	}

	fn ptr<T>(payload: &mut T) -> *mut c_void {
		payload as *mut T as *mut c_void
	}

	#[test]
	fn test_log_message() {
		let prefix = CString::new("cplayer").unwrap();
		let level = CString::new("info").unwrap();
		let text = CString::new("hello").unwrap();
		let mut payload = EventLogMessageFFI {
			prefix: prefix.as_ptr(),
			level: level.as_ptr(),
			text: text.as_ptr(),
			log_level: MPV_LOG_LEVEL_INFO,
		};
		let event = unsafe { decode_event(&header(EventId::LOG_MESSAGE, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.name, "log-message");
		assert_eq!(event.payload, Value::map([("prefix", "cplayer"), ("level", "info"), ("message", "hello")]));
	}

	#[test]
	fn test_property_change_with_int64() {
		let name = CString::new("volume").unwrap();
		let mut volume: i64 = 80;
		let mut payload = EventPropertyFFI {
			name: name.as_ptr(),
			format: Format::INT64,
			data: ptr(&mut volume),
		};
		let event = unsafe { decode_event(&header(EventId::PROPERTY_CHANGE, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.name, "property-change");
		assert_eq!(event.payload, Value::Int(80));
	}

	#[test]
	fn test_property_without_data_is_none() {
		let name = CString::new("path").unwrap();
		let mut payload = EventPropertyFFI {
			name: name.as_ptr(),
			format: Format::NONE,
			data: null_mut(),
		};
		let mut raw = header(EventId::GET_PROPERTY_REPLY, ptr(&mut payload));
		raw.error = MPV_ERROR_PROPERTY_UNAVAILABLE;
		raw.reply_userdata = 42;
		let event = unsafe { decode_event(&raw) }.unwrap();
		assert_eq!(event.payload, Value::None);
		assert_eq!(event.status_code, -10);
		assert_eq!(event.request_id, 42);
		assert!(event.is_error());
	}

	#[test]
	fn test_end_file() {
		let mut payload = EventEndFileFFI {
			reason: EndFileReason::ERROR,
			error: -13,
			playlist_entry_id: 3,
			playlist_insert_id: 0,
			playlist_insert_num_entries: 0,
		};
		let event = unsafe { decode_event(&header(EventId::END_FILE, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.name, "end-file");
		assert_eq!(
			event.payload,
			Value::map([
				("reason", 4i64),
				("error", -13i64),
				("entry_id", 3i64),
				("insert_id", 0i64),
				("insert_count", 0i64)
			])
		);
	}

	#[test]
	fn test_start_file_and_missing_payload() {
		let mut payload = EventStartFileFFI {
			playlist_entry_id: 9,
		};
		let event = unsafe { decode_event(&header(EventId::START_FILE, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.payload, Value::Int(9));

		let event = unsafe { decode_event(&header(EventId::START_FILE, null_mut())) }.unwrap();
		assert_eq!(event.payload, Value::None);
	}

	#[test]
	fn test_client_message() {
		let first = CString::new("script-binding").unwrap();
		let second = CString::new("stats").unwrap();
		let args: [*const c_char; 2] = [first.as_ptr(), second.as_ptr()];
		let mut payload = EventClientMessageFFI {
			num_args: 2,
			args: args.as_ptr(),
		};
		let event = unsafe { decode_event(&header(EventId::CLIENT_MESSAGE, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.payload, Value::list(["script-binding", "stats"]));

		let mut empty = EventClientMessageFFI {
			num_args: 0,
			args: null(),
		};
		let event = unsafe { decode_event(&header(EventId::CLIENT_MESSAGE, ptr(&mut empty))) }.unwrap();
		assert_eq!(event.payload, Value::List(vec![]));
	}

	#[test]
	fn test_hook() {
		let name = CString::new("on_load").unwrap();
		let mut payload = EventHookFFI {
			name: name.as_ptr(),
			id: 17,
		};
		let event = unsafe { decode_event(&header(EventId::HOOK, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.payload, Value::map([("id", Value::Int(17)), ("name", Value::string("on_load"))]));
	}

	#[test]
	fn test_command_reply() {
		let mut payload = EventCommandFFI {
			result: NodeFFI {
				u: NodeUnionFFI {
					double_: 0.5,
				},
				format: Format::DOUBLE,
			},
		};
		let event = unsafe { decode_event(&header(EventId::COMMAND_REPLY, ptr(&mut payload))) }.unwrap();
		assert_eq!(event.name, "command-reply");
		assert_eq!(event.payload, Value::Float(0.5));
	}

	#[test]
	fn test_malformed_command_reply_is_an_error() {
		let mut list = NodeListFFI::empty();
		let mut payload = EventCommandFFI {
			result: NodeFFI {
				u: NodeUnionFFI {
					list: &mut list,
				},
				format: Format::NODE_MAP,
			},
		};
		let result = unsafe { decode_event(&header(EventId::COMMAND_REPLY, ptr(&mut payload))) };
		assert_eq!(result, Err(DecodeError::MapWithoutKeys));
	}

	#[test]
	fn test_kinds_without_payload() {
		let mut junk: u64 = 0xdead_beef;
		for kind in [EventId::SHUTDOWN, EventId::FILE_LOADED, EventId::SEEK, EventId::PLAYBACK_RESTART] {
			let event = unsafe { decode_event(&header(kind, ptr(&mut junk))) }.unwrap();
			assert_eq!(event.payload, Value::None);
			assert_eq!(event.kind, kind);
		}
	}

	#[test]
	fn test_unknown_kind() {
		let event = unsafe { decode_event(&header(EventId(1234), null_mut())) }.unwrap();
		assert_eq!(event.name, "unknown");
		assert_eq!(event.payload, Value::None);
	}

	#[test]
	fn test_serialize() {
		let event = Event {
			name: "seek",
			kind: EventId::SEEK,
			status_code: 0,
			request_id: 0,
			payload: Value::None,
		};
		assert_eq!(
			serde_json::to_string(&event).unwrap(),
			r#"{"name":"seek","type":20,"status_code":0,"request_id":0,"payload":null}"#
		);
	}
}
