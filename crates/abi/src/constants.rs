// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Status codes returned by libmpv entry points

use core::ffi::c_int;

// ==================== Status Codes ====================
// Every entry point returning `int` uses these. Non-negative means success.

pub const MPV_ERROR_SUCCESS: c_int = 0;
pub const MPV_ERROR_EVENT_QUEUE_FULL: c_int = -1;
pub const MPV_ERROR_NOMEM: c_int = -2;
pub const MPV_ERROR_UNINITIALIZED: c_int = -3;
pub const MPV_ERROR_INVALID_PARAMETER: c_int = -4;
pub const MPV_ERROR_OPTION_NOT_FOUND: c_int = -5;
pub const MPV_ERROR_OPTION_FORMAT: c_int = -6;
pub const MPV_ERROR_OPTION_ERROR: c_int = -7;
pub const MPV_ERROR_PROPERTY_NOT_FOUND: c_int = -8;
pub const MPV_ERROR_PROPERTY_FORMAT: c_int = -9;
pub const MPV_ERROR_PROPERTY_UNAVAILABLE: c_int = -10;
pub const MPV_ERROR_PROPERTY_ERROR: c_int = -11;
pub const MPV_ERROR_COMMAND: c_int = -12;
pub const MPV_ERROR_LOADING_FAILED: c_int = -13;
pub const MPV_ERROR_AO_INIT_FAILED: c_int = -14;
pub const MPV_ERROR_VO_INIT_FAILED: c_int = -15;
pub const MPV_ERROR_NOTHING_TO_PLAY: c_int = -16;
pub const MPV_ERROR_UNKNOWN_FORMAT: c_int = -17;
pub const MPV_ERROR_UNSUPPORTED: c_int = -18;
pub const MPV_ERROR_NOT_IMPLEMENTED: c_int = -19;
pub const MPV_ERROR_GENERIC: c_int = -20;

/// Human readable text for a status code, identical to `mpv_error_string`
pub const fn error_string(status: c_int) -> &'static str {
	match status {
		MPV_ERROR_SUCCESS => "success",
		MPV_ERROR_EVENT_QUEUE_FULL => "event queue full",
		MPV_ERROR_NOMEM => "memory allocation failed",
		MPV_ERROR_UNINITIALIZED => "core not uninitialized",
		MPV_ERROR_INVALID_PARAMETER => "invalid parameter",
		MPV_ERROR_OPTION_NOT_FOUND => "option not found",
		MPV_ERROR_OPTION_FORMAT => "unsupported format for accessing option",
		MPV_ERROR_OPTION_ERROR => "error setting option",
		MPV_ERROR_PROPERTY_NOT_FOUND => "property not found",
		MPV_ERROR_PROPERTY_FORMAT => "unsupported format for accessing property",
		MPV_ERROR_PROPERTY_UNAVAILABLE => "property unavailable",
		MPV_ERROR_PROPERTY_ERROR => "error accessing property",
		MPV_ERROR_COMMAND => "error running command",
		MPV_ERROR_LOADING_FAILED => "loading failed",
		MPV_ERROR_AO_INIT_FAILED => "audio output initialization failed",
		MPV_ERROR_VO_INIT_FAILED => "video output initialization failed",
		MPV_ERROR_NOTHING_TO_PLAY => "no audio or video data played",
		MPV_ERROR_UNKNOWN_FORMAT => "unrecognized file format",
		MPV_ERROR_UNSUPPORTED => "not supported",
		MPV_ERROR_NOT_IMPLEMENTED => "operation not implemented",
		MPV_ERROR_GENERIC => "something happened",
		_ => "unknown error",
	}
}

/// Helper to check if a status code signals failure
///
/// # Example
/// ```
/// use mpvbind_abi::*;
///
/// assert!(is_failure(MPV_ERROR_PROPERTY_UNAVAILABLE));
/// assert!(!is_failure(MPV_ERROR_SUCCESS));
/// ```
#[inline]
pub const fn is_failure(status: c_int) -> bool {
	status < 0
}
