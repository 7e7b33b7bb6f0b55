// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Client side of the libmpv bridge
//!
//! [`Player`] owns one libmpv handle and exposes commands, property access and event
//! polling in terms of host [`Value`](mpvbind_type::Value)s. The entry points come from a
//! [`ClientCallbacks`](mpvbind_abi::ClientCallbacks) table, usually filled by
//! [`ClientLibrary::load`].

pub mod config;
pub mod error;
pub mod event;
pub mod library;
mod log;
pub mod player;

pub use config::{PlayerBuilder, PlayerConfig};
pub use error::{Error, Result};
pub use event::{Event, decode_event, event_name};
pub use library::ClientLibrary;
pub use player::Player;
