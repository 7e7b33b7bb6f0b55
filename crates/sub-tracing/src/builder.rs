// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
	#[error("invalid filter directive '{directive}': {source}")]
	Filter {
		directive: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},

	#[error("a global subscriber is already installed")]
	AlreadyInstalled,
}

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingFormat {
	/// Human readable, one line per event
	#[default]
	Compact,
	/// Newline delimited JSON
	Json,
}

/// Builder for the global tracing subscriber
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	filter: String,
	format: TracingFormat,
	with_target: bool,
	with_thread_ids: bool,
	with_ansi: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TracingBuilder {
	/// Defaults to `info` unless `RUST_LOG` is set
	pub fn new() -> Self {
		Self {
			filter: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
			format: TracingFormat::Compact,
			with_target: true,
			with_thread_ids: false,
			with_ansi: true,
		}
	}

	/// Filter directive in `EnvFilter` syntax, e.g. `"mpvbind_client=debug,mpv=warn"`
	pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
		self.filter = directive.into();
		self
	}

	pub fn with_format(mut self, format: TracingFormat) -> Self {
		self.format = format;
		self
	}

	pub fn json(self) -> Self {
		self.with_format(TracingFormat::Json)
	}

	pub fn with_target(mut self, enabled: bool) -> Self {
		self.with_target = enabled;
		self
	}

	pub fn with_thread_ids(mut self, enabled: bool) -> Self {
		self.with_thread_ids = enabled;
		self
	}

	pub fn with_ansi(mut self, enabled: bool) -> Self {
		self.with_ansi = enabled;
		self
	}

	pub fn filter(&self) -> &str {
		&self.filter
	}

	pub fn format(&self) -> TracingFormat {
		self.format
	}

	fn env_filter(&self) -> Result<EnvFilter, TracingError> {
		EnvFilter::try_new(&self.filter).map_err(|source| TracingError::Filter {
			directive: self.filter.clone(),
			source,
		})
	}

	/// Install the subscriber for the whole process
	pub fn try_init(self) -> Result<(), TracingError> {
		let filter = self.env_filter()?;
		let registry = tracing_subscriber::registry().with(filter);

		let result = match self.format {
			TracingFormat::Compact => registry
				.with(fmt::layer()
					.compact()
					.with_ansi(self.with_ansi)
					.with_target(self.with_target)
					.with_thread_ids(self.with_thread_ids))
				.try_init(),
			TracingFormat::Json => registry
				.with(fmt::layer()
					.json()
					.with_target(self.with_target)
					.with_thread_ids(self.with_thread_ids))
				.try_init(),
		};
		result.map_err(|_| TracingError::AlreadyInstalled)?;
		debug!(filter = %self.filter, format = ?self.format, "tracing subscriber installed");
		Ok(())
	}

	/// Install the subscriber, ignoring an already installed one
	pub fn init(self) -> Result<(), TracingError> {
		match self.try_init() {
			Err(TracingError::AlreadyInstalled) => {
				debug!("tracing subscriber already installed, keeping it");
				Ok(())
			}
			other => other,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{
		io::{self, Write},
		sync::{Arc, Mutex},
	};

	use super::*;

	#[test]
	fn test_builder_settings() {
		let builder = TracingBuilder::new().with_filter("mpv=debug").json().with_thread_ids(true);
		assert_eq!(builder.filter(), "mpv=debug");
		assert_eq!(builder.format(), TracingFormat::Json);
	}

	#[test]
	fn test_invalid_filter() {
		let err = TracingBuilder::new().with_filter("mpv=notalevel").try_init().unwrap_err();
		assert!(matches!(err, TracingError::Filter { .. }));
	}

	#[derive(Clone, Default)]
	struct Captured(Arc<Mutex<Vec<u8>>>);

	impl Write for Captured {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn test_init_reports_installation() {
		let captured = Captured::default();
		let writer = captured.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_max_level(tracing::Level::DEBUG)
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();

		tracing::subscriber::with_default(subscriber, || {
			TracingBuilder::new().with_filter("warn").init().unwrap();
			TracingBuilder::new().with_filter("warn").init().unwrap();
		});

		let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
		assert!(output.contains("tracing subscriber already installed"), "{output}");
	}

	#[test]
	fn test_init_twice() {
		TracingBuilder::new().with_filter("warn").init().unwrap();
		TracingBuilder::new().with_filter("warn").init().unwrap();
	}
}
