// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{
	ffi::c_int,
	fmt::{self, Display, Formatter},
};

/// Event kind (`mpv_event_id`)
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub c_int);

impl EventId {
	/// Nothing happened; returned on timeouts and when the queue is drained
	pub const NONE: EventId = EventId(0);
	pub const SHUTDOWN: EventId = EventId(1);
	/// Data: `mpv_event_log_message`
	pub const LOG_MESSAGE: EventId = EventId(2);
	/// Data: `mpv_event_property`
	pub const GET_PROPERTY_REPLY: EventId = EventId(3);
	pub const SET_PROPERTY_REPLY: EventId = EventId(4);
	/// Data: `mpv_event_command`
	pub const COMMAND_REPLY: EventId = EventId(5);
	/// Data: `mpv_event_start_file`
	pub const START_FILE: EventId = EventId(6);
	/// Data: `mpv_event_end_file`
	pub const END_FILE: EventId = EventId(7);
	pub const FILE_LOADED: EventId = EventId(8);
	pub const IDLE: EventId = EventId(11);
	pub const TICK: EventId = EventId(14);
	/// Data: `mpv_event_client_message`
	pub const CLIENT_MESSAGE: EventId = EventId(16);
	pub const VIDEO_RECONFIG: EventId = EventId(17);
	pub const AUDIO_RECONFIG: EventId = EventId(18);
	pub const SEEK: EventId = EventId(20);
	pub const PLAYBACK_RESTART: EventId = EventId(21);
	/// Data: `mpv_event_property`
	pub const PROPERTY_CHANGE: EventId = EventId(22);
	pub const QUEUE_OVERFLOW: EventId = EventId(24);
	/// Data: `mpv_event_hook`
	pub const HOOK: EventId = EventId(25);

	pub const fn code(self) -> c_int {
		self.0
	}

	pub const fn is_none(self) -> bool {
		self.0 == Self::NONE.0
	}

	/// Event name, identical to `mpv_event_name`
	pub const fn name(self) -> Option<&'static str> {
		match self {
			EventId::NONE => Some("none"),
			EventId::SHUTDOWN => Some("shutdown"),
			EventId::LOG_MESSAGE => Some("log-message"),
			EventId::GET_PROPERTY_REPLY => Some("get-property-reply"),
			EventId::SET_PROPERTY_REPLY => Some("set-property-reply"),
			EventId::COMMAND_REPLY => Some("command-reply"),
			EventId::START_FILE => Some("start-file"),
			EventId::END_FILE => Some("end-file"),
			EventId::FILE_LOADED => Some("file-loaded"),
			EventId::IDLE => Some("idle"),
			EventId::TICK => Some("tick"),
			EventId::CLIENT_MESSAGE => Some("client-message"),
			EventId::VIDEO_RECONFIG => Some("video-reconfig"),
			EventId::AUDIO_RECONFIG => Some("audio-reconfig"),
			EventId::SEEK => Some("seek"),
			EventId::PLAYBACK_RESTART => Some("playback-restart"),
			EventId::PROPERTY_CHANGE => Some("property-change"),
			EventId::QUEUE_OVERFLOW => Some("event-queue-overflow"),
			EventId::HOOK => Some("hook"),
			_ => None,
		}
	}
}

impl Display for EventId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "unknown({})", self.0),
		}
	}
}

/// Reason carried by `END_FILE` (`mpv_end_file_reason`)
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndFileReason(pub c_int);

impl EndFileReason {
	pub const EOF: EndFileReason = EndFileReason(0);
	pub const STOP: EndFileReason = EndFileReason(2);
	pub const QUIT: EndFileReason = EndFileReason(3);
	pub const ERROR: EndFileReason = EndFileReason(4);
	pub const REDIRECT: EndFileReason = EndFileReason(5);
}
