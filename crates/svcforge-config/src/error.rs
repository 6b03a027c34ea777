// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading a config file
	#[error("Failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Missing required field
	#[error("Missing required field: {0}")]
	MissingField(String),

	/// Invalid value
	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// Provisioning template does not parse
	#[error("Invalid provisioning template: {0}")]
	Template(#[from] svcforge_core::SynthError),

	/// Home directory not found
	#[error("Could not determine home directory")]
	HomeDirNotFound,
}

impl ConfigError {
	/// Create a missing field error
	pub fn missing_field(field: impl Into<String>) -> Self {
		Self::MissingField(field.into())
	}

	/// Create an invalid value error
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
