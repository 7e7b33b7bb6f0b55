// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mpvbind_abi::ClientCallbacks;
use mpvbind_client::{ClientLibrary, Player, PlayerBuilder, PlayerConfig};
#[cfg(feature = "sub_tracing")]
use mpvbind_sub_tracing::{TracingBuilder, TracingError, TracingFactory};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error(transparent)]
	Client(#[from] mpvbind_client::Error),

	#[cfg(feature = "sub_tracing")]
	#[error(transparent)]
	Tracing(#[from] TracingError),
}

/// Player builder that also sets up the process wide subscriber
pub struct MpvBuilder {
	player: PlayerBuilder,
	#[cfg(feature = "sub_tracing")]
	tracing_configurator: Option<Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static>>,
}

impl MpvBuilder {
	pub fn new(callbacks: ClientCallbacks) -> Self {
		Self::from_player_builder(PlayerBuilder::new(callbacks))
	}

	pub fn from_library(library: ClientLibrary) -> Self {
		Self::from_player_builder(PlayerBuilder::from_library(library))
	}

	/// Load libmpv by its platform file name
	pub fn load_default() -> Result<Self, BuildError> {
		Ok(Self::from_library(ClientLibrary::load_default()?))
	}

	fn from_player_builder(player: PlayerBuilder) -> Self {
		Self {
			player,
			#[cfg(feature = "sub_tracing")]
			tracing_configurator: None,
		}
	}

	pub fn config(mut self, config: PlayerConfig) -> Self {
		self.player = self.player.config(config);
		self
	}

	pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.player = self.player.option(name, value);
		self
	}

	pub fn request_log_messages(mut self, level: impl Into<String>) -> Self {
		self.player = self.player.request_log_messages(level);
		self
	}

	pub fn poll_timeout(mut self, seconds: f64) -> Self {
		self.player = self.player.poll_timeout(seconds);
		self
	}

	#[cfg(feature = "sub_tracing")]
	pub fn with_tracing<F>(mut self, configurator: F) -> Self
	where
		F: FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static,
	{
		self.tracing_configurator = Some(Box::new(configurator));
		self
	}

	/// Install tracing if configured and build an inactive player
	pub fn build(self) -> Result<Player, BuildError> {
		#[cfg(feature = "sub_tracing")]
		if let Some(configurator) = self.tracing_configurator {
			TracingFactory::with_configurator(configurator).install()?;
		}
		Ok(self.player.build())
	}

	/// Install tracing if configured, build the player and create its handle
	pub fn create(self) -> Result<Player, BuildError> {
		let mut player = self.build()?;
		player.create(&mpvbind_type::Map::new())?;
		Ok(player)
	}
}
