// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ffi::c_int;

use mpvbind_abi::error_string;
use mpvbind_marshal::{DecodeError, EncodeError};
use mpvbind_type::Kind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Encode(#[from] EncodeError),

	#[error("malformed node from libmpv: {0}")]
	Decode(#[from] DecodeError),

	/// A libmpv entry point returned a negative status
	#[error("{operation} failed with status '{status}' ({message}): {diagnostic}")]
	Boundary {
		operation: &'static str,
		status: c_int,
		message: &'static str,
		/// Rendering of the request that failed
		diagnostic: String,
	},

	#[error("properties cannot be read as '{0}', libmpv has no property format for it")]
	UnreadableKind(Kind),

	#[error("mpv is not initialized, call 'create()' first")]
	NotActive,

	#[error("mpv is already initialized")]
	AlreadyActive,

	#[error("mpv_create returned no handle")]
	CreateFailed,

	#[error("failed to load libmpv: {0}")]
	Library(#[from] libloading::Error),

	#[error("invalid player configuration: {0}")]
	Config(#[from] serde_json::Error),
}

impl Error {
	pub(crate) fn boundary(operation: &'static str, status: c_int, diagnostic: impl Into<String>) -> Self {
		Error::Boundary {
			operation,
			status,
			message: error_string(status),
			diagnostic: diagnostic.into(),
		}
	}

	/// libmpv status code, if the error came from a libmpv call
	pub fn status(&self) -> Option<c_int> {
		match self {
			Error::Boundary {
				status,
				..
			} => Some(*status),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use mpvbind_abi::MPV_ERROR_OPTION_NOT_FOUND;

	use super::*;

	#[test]
	fn test_boundary_message() {
		let err = Error::boundary("set_property", MPV_ERROR_OPTION_NOT_FOUND, "'vid' = String(no)");
		assert_eq!(err.status(), Some(-5));
		assert_eq!(err.to_string(), "set_property failed with status '-5' (option not found): 'vid' = String(no)");
	}

	#[test]
	fn test_status_of_other_errors() {
		assert_eq!(Error::NotActive.status(), None);
		assert_eq!(Error::from(EncodeError::EmptyKey).status(), None);
	}
}
