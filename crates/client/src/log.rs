// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Forwarding of libmpv log messages to `tracing`

use mpvbind_type::Value;
use tracing::{debug, error, info, trace, warn};

/// Re-emit a decoded LOG_MESSAGE payload at the matching tracing level
///
/// # Parameters
/// - `payload`: Map with `prefix`, `level` and `message` as produced by the event decoder
pub(crate) fn forward(payload: &Value) {
	let field = |key: &str| payload.get(key).and_then(Value::as_str).unwrap_or_default();
	let prefix = field("prefix");
	let message = field("message").trim_end();

	match field("level") {
		"fatal" | "error" => error!(target: "mpv", prefix, "{message}"),
		"warn" => warn!(target: "mpv", prefix, "{message}"),
		"info" | "status" => info!(target: "mpv", prefix, "{message}"),
		"v" | "debug" => debug!(target: "mpv", prefix, "{message}"),
		"trace" => trace!(target: "mpv", prefix, "{message}"),
		_ => info!(target: "mpv", prefix, "{message}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_forward_tolerates_partial_payloads() {
		forward(&Value::None);
		forward(&Value::map([("level", "warn")]));
		forward(&Value::map([("prefix", "ao"), ("level", "bogus"), ("message", "text\n")]));
	}
}
