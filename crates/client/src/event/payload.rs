// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-kind event payload decoders
//!
//! Each decoder receives the non-null `data` pointer of an event and knows which libmpv
//! struct sits behind it for its kind. The raw casts live here and nowhere else.

use std::ffi::{CStr, c_char, c_void};

use mpvbind_abi::{
	EventClientMessageFFI, EventCommandFFI, EventEndFileFFI, EventHookFFI, EventId, EventLogMessageFFI,
	EventPropertyFFI, EventStartFileFFI,
};
use mpvbind_marshal::{DecodeError, decode, decode_node};
use mpvbind_type::{Map, Value};

pub(crate) type PayloadDecoder = unsafe fn(*const c_void) -> Result<Value, DecodeError>;

/// Event kinds that carry a payload. Kinds not listed decode to `Value::None`.
pub(crate) const DECODERS: [(EventId, PayloadDecoder); 8] = [
	(EventId::GET_PROPERTY_REPLY, property),
	(EventId::PROPERTY_CHANGE, property),
	(EventId::LOG_MESSAGE, log_message),
	(EventId::CLIENT_MESSAGE, client_message),
	(EventId::START_FILE, start_file),
	(EventId::END_FILE, end_file),
	(EventId::HOOK, hook),
	(EventId::COMMAND_REPLY, command_reply),
];

pub(crate) fn decoder_for(kind: EventId) -> Option<PayloadDecoder> {
	DECODERS.iter().find(|(id, _)| *id == kind).map(|(_, decoder)| *decoder)
}

unsafe fn text(ptr: *const c_char) -> String {
	if ptr.is_null() {
		return String::new();
	}
	unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

unsafe fn property(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventPropertyFFI) };
	if event.data.is_null() {
		return Ok(Value::None);
	}
	unsafe { decode(event.format, event.data) }
}

unsafe fn log_message(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventLogMessageFFI) };
	let mut map = Map::with_capacity(3);
	map.insert("prefix".to_string(), Value::String(unsafe { text(event.prefix) }));
	map.insert("level".to_string(), Value::String(unsafe { text(event.level) }));
	map.insert("message".to_string(), Value::String(unsafe { text(event.text) }));
	Ok(Value::Map(map))
}

unsafe fn client_message(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventClientMessageFFI) };
	if event.args.is_null() {
		return Ok(Value::List(Vec::new()));
	}
	let len = usize::try_from(event.num_args).unwrap_or(0);
	let args = unsafe { std::slice::from_raw_parts(event.args, len) };
	Ok(Value::List(args.iter().map(|arg| Value::String(unsafe { text(*arg) })).collect()))
}

unsafe fn start_file(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventStartFileFFI) };
	Ok(Value::Int(event.playlist_entry_id))
}

unsafe fn end_file(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventEndFileFFI) };
	Ok(Value::map([
		("reason", Value::Int(event.reason.0.into())),
		("error", Value::Int(event.error.into())),
		("entry_id", Value::Int(event.playlist_entry_id)),
		("insert_id", Value::Int(event.playlist_insert_id)),
		("insert_count", Value::Int(event.playlist_insert_num_entries.into())),
	]))
}

unsafe fn hook(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventHookFFI) };
	Ok(Value::map([
		// Ids are opaque tokens, reinterpreting the bits is lossless
		("id", Value::Int(event.id as i64)),
		("name", Value::String(unsafe { text(event.name) })),
	]))
}

unsafe fn command_reply(data: *const c_void) -> Result<Value, DecodeError> {
	let event = unsafe { &*(data as *const EventCommandFFI) };
	unsafe { decode_node(&event.result) }
}
