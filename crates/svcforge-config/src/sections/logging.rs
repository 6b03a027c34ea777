// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration section.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
	#[default]
	Text,
	Json,
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"text" => Ok(LogFormat::Text),
			"json" => Ok(LogFormat::Json),
			other => Err(format!("unknown log format '{other}' (expected text or json)")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
	pub format: Option<LogFormat>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(|| "info".to_string()),
			format: self.format.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
	/// `EnvFilter` directive used when `RUST_LOG` is unset
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		LoggingConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = LoggingConfig::default();
		assert_eq!(config.level, "info");
		assert_eq!(config.format, LogFormat::Text);
	}

	#[test]
	fn test_parse_format() {
		assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
		assert_eq!("TEXT".parse::<LogFormat>(), Ok(LogFormat::Text));
		assert!("yaml".parse::<LogFormat>().is_err());
	}

	#[test]
	fn test_deserialize_layer() {
		let layer: LoggingConfigLayer = toml::from_str(
			r#"
level = "svcforge_core=debug"
format = "json"
"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(config.level, "svcforge_core=debug");
		assert_eq!(config.format, LogFormat::Json);
	}

	#[test]
	fn test_merge_keeps_unset_fields() {
		let mut base = LoggingConfigLayer {
			level: Some("warn".to_string()),
			format: Some(LogFormat::Json),
		};
		base.merge(LoggingConfigLayer {
			level: Some("debug".to_string()),
			format: None,
		});
		assert_eq!(base.level.as_deref(), Some("debug"));
		assert_eq!(base.format, Some(LogFormat::Json));
	}
}
