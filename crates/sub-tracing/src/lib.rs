// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tracing subscriber setup
//!
//! The library crates only emit `tracing` events. Applications that want them printed,
//! including the libmpv log messages a player forwards under the `mpv` target, install a
//! subscriber through [`TracingBuilder`].

mod builder;
mod factory;

pub use builder::{TracingBuilder, TracingError, TracingFormat};
pub use factory::{TracingConfigurator, TracingFactory};
