// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Drive libmpv with plain host values
//!
//! ```ignore
//! use mpvbind::{MpvBuilder, Value};
//!
//! let mut player = MpvBuilder::load_default()?
//!     .option("vo", "null")
//!     .with_tracing(|t| t.with_filter("info"))
//!     .create()?;
//! player.command(&[Value::string("loadfile"), Value::string("movie.mkv")])?;
//! for event in player.poll_events()? {
//!     println!("{} {}", event.name, event.payload);
//! }
//! ```

mod builder;

pub use builder::{BuildError, MpvBuilder};
pub use mpvbind_abi as abi;
pub use mpvbind_client::{
	ClientLibrary, Error, Event, Player, PlayerBuilder, PlayerConfig, Result, decode_event, event_name,
};
pub use mpvbind_marshal as marshal;
#[cfg(feature = "sub_tracing")]
pub use mpvbind_sub_tracing::{TracingBuilder, TracingFormat};
pub use mpvbind_type::{Kind, Map, Value};
