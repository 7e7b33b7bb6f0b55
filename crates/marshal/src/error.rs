// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ffi::c_int;

use mpvbind_abi::Format;
use mpvbind_type::Kind;

/// Failure to build a node from a value. Nothing allocated before the failure survives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
	#[error("cannot convert value of kind '{0}'")]
	UnsupportedKind(Kind),

	#[error("map must have only non-empty strings as keys")]
	EmptyKey,

	#[error("string contains a NUL byte at position {position}")]
	InteriorNul {
		position: usize,
	},

	#[error("container with {len} entries exceeds the node list capacity")]
	TooLarge {
		len: usize,
	},
}

/// Integrity violation found while reading a node tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
	#[error("format is 'NODE_ARRAY', but 'keys' is defined")]
	ArrayWithKeys,

	#[error("format is 'NODE_MAP', but 'keys' is null")]
	MapWithoutKeys,

	#[error("format is '{0}', but the payload is null")]
	NullPayload(Format),

	#[error("map entry {index} has a null key")]
	NullKey {
		index: usize,
	},

	#[error("node is tagged 'NODE', which is only valid for typed payloads")]
	NestedNode,

	#[error("format is '{format}', but the entry count {num} is negative")]
	NegativeCount {
		format: Format,
		num: c_int,
	},

	#[error("format is '{format}' with {len} entries, but the entry data is null")]
	MissingEntries {
		format: Format,
		len: usize,
	},

	#[error("map entry {index} repeats the key '{key}'")]
	DuplicateKey {
		index: usize,
		key: String,
	},
}
