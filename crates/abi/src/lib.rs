// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the libmpv client API
//!
//! This crate mirrors the parts of `client.h` the bridge exchanges with libmpv: the
//! `mpv_node` tagged union, the event structures returned by `mpv_wait_event`, and the
//! table of entry points the host calls. Layouts match the C header byte for byte.

pub mod callbacks;
pub mod constants;
pub mod event;
pub mod node;

pub use callbacks::client::{ClientCallbacks, HandleFFI};
pub use constants::*;
pub use event::*;
pub use node::*;
