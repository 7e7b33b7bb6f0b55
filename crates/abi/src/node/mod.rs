// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! FFI-safe `mpv_node` tagged union and its backing lists

mod format;
mod node;

pub use format::*;
pub use node::*;
