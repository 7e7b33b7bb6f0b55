// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use mpvbind_abi::ClientCallbacks;
use mpvbind_type::Map;
use serde::{Deserialize, Serialize};

use crate::{ClientLibrary, Player, Result};

/// Settings applied when a player creates its handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
	/// Options passed to `mpv_set_option_string` before initialization, in order
	pub options: IndexMap<String, String>,
	/// Minimum libmpv log level to receive as events ("info", "debug", ...)
	pub request_log_messages: Option<String>,
	/// Re-emit received log message events through `tracing`
	pub forward_log_messages: bool,
	/// Seconds `poll` waits for the first event; 0 never blocks
	pub poll_timeout: f64,
}

impl Default for PlayerConfig {
	fn default() -> Self {
		Self {
			options: IndexMap::new(),
			request_log_messages: None,
			forward_log_messages: true,
			poll_timeout: 0.0,
		}
	}
}

impl PlayerConfig {
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

enum Source {
	Callbacks(ClientCallbacks),
	Library(ClientLibrary),
}

/// Builder for a [`Player`]
///
/// ```ignore
/// let player = PlayerBuilder::from_library(ClientLibrary::load_default()?)
///     .option("vo", "null")
///     .request_log_messages("info")
///     .create()?;
/// ```
pub struct PlayerBuilder {
	source: Source,
	config: PlayerConfig,
}

impl PlayerBuilder {
	pub fn new(callbacks: ClientCallbacks) -> Self {
		Self {
			source: Source::Callbacks(callbacks),
			config: PlayerConfig::default(),
		}
	}

	pub fn from_library(library: ClientLibrary) -> Self {
		Self {
			source: Source::Library(library),
			config: PlayerConfig::default(),
		}
	}

	/// Replace the whole configuration
	pub fn config(mut self, config: PlayerConfig) -> Self {
		self.config = config;
		self
	}

	pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.config.options.insert(name.into(), value.into());
		self
	}

	pub fn request_log_messages(mut self, level: impl Into<String>) -> Self {
		self.config.request_log_messages = Some(level.into());
		self
	}

	pub fn forward_log_messages(mut self, forward: bool) -> Self {
		self.config.forward_log_messages = forward;
		self
	}

	pub fn poll_timeout(mut self, seconds: f64) -> Self {
		self.config.poll_timeout = seconds;
		self
	}

	/// Build an inactive player
	pub fn build(self) -> Player {
		match self.source {
			Source::Callbacks(callbacks) => Player::with_config(callbacks, self.config),
			Source::Library(library) => Player::from_library(library).configure(self.config),
		}
	}

	/// Build the player and create its handle
	pub fn create(self) -> Result<Player> {
		let mut player = self.build();
		player.create(&Map::new())?;
		Ok(player)
	}
}
