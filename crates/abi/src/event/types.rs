// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{
	ffi::{c_char, c_int, c_void},
	ptr::{null, null_mut},
};

use super::{EndFileReason, EventId};
use crate::node::{Format, NodeFFI};

/// FFI-safe event header (`mpv_event`)
///
/// The memory behind `data` belongs to the handle and stays valid only until the next
/// `wait_event` call on the same handle.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventFFI {
	/// Event kind
	pub event_id: EventId,
	/// Status of the request this event replies to (0 or a negative error code)
	pub error: c_int,
	/// Userdata passed with the originating asynchronous request
	pub reply_userdata: u64,
	/// Kind-specific payload, or null
	pub data: *mut c_void,
}

impl EventFFI {
	/// Create the "nothing pending" sentinel
	pub const fn none() -> Self {
		Self {
			event_id: EventId::NONE,
			error: 0,
			reply_userdata: 0,
			data: null_mut(),
		}
	}
}

/// Payload of `GET_PROPERTY_REPLY` and `PROPERTY_CHANGE` (`mpv_event_property`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventPropertyFFI {
	/// Property name
	pub name: *const c_char,
	/// Format of `data`; NONE when the property is unavailable
	pub format: Format,
	/// Pointer to a value of type `format`, or null
	pub data: *mut c_void,
}

/// Payload of `LOG_MESSAGE` (`mpv_event_log_message`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventLogMessageFFI {
	/// Module prefix, e.g. "cplayer"
	pub prefix: *const c_char,
	/// Level as string, e.g. "info"
	pub level: *const c_char,
	/// Message text, usually terminated by a newline
	pub text: *const c_char,
	/// Level as `mpv_log_level`
	pub log_level: c_int,
}

/// Payload of `START_FILE` (`mpv_event_start_file`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventStartFileFFI {
	pub playlist_entry_id: i64,
}

/// Payload of `END_FILE` (`mpv_event_end_file`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventEndFileFFI {
	pub reason: EndFileReason,
	/// Error code when `reason` is ERROR, 0 otherwise
	pub error: c_int,
	pub playlist_entry_id: i64,
	pub playlist_insert_id: i64,
	pub playlist_insert_num_entries: c_int,
}

/// Payload of `CLIENT_MESSAGE` (`mpv_event_client_message`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventClientMessageFFI {
	pub num_args: c_int,
	pub args: *const *const c_char,
}

impl EventClientMessageFFI {
	pub const fn empty() -> Self {
		Self {
			num_args: 0,
			args: null(),
		}
	}
}

/// Payload of `HOOK` (`mpv_event_hook`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventHookFFI {
	/// Hook name, as passed to `mpv_hook_add`
	pub name: *const c_char,
	/// Id to pass to `mpv_hook_continue`
	pub id: u64,
}

/// Payload of `COMMAND_REPLY` (`mpv_event_command`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EventCommandFFI {
	/// Result of the command, owned by the event
	pub result: NodeFFI,
}

// Log levels (`mpv_log_level`)

pub const MPV_LOG_LEVEL_NONE: c_int = 0;
pub const MPV_LOG_LEVEL_FATAL: c_int = 10;
pub const MPV_LOG_LEVEL_ERROR: c_int = 20;
pub const MPV_LOG_LEVEL_WARN: c_int = 30;
pub const MPV_LOG_LEVEL_INFO: c_int = 40;
pub const MPV_LOG_LEVEL_V: c_int = 50;
pub const MPV_LOG_LEVEL_DEBUG: c_int = 60;
pub const MPV_LOG_LEVEL_TRACE: c_int = 70;
