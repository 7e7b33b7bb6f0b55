// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! FFI-safe event structures returned by `mpv_wait_event`

mod id;
mod types;

pub use id::*;
pub use types::*;
