// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment, command line.

use std::collections::HashMap;
use std::path::PathBuf;

use svcforge_common_secret::SecretString;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::sections::{LogFormat, LoggingConfigLayer, ProvisionConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	CommandLine = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source.
///
/// System and user files are optional; a file named explicitly on the
/// command line must exist.
pub struct TomlSource {
	path: PathBuf,
	precedence: Precedence,
	required: bool,
}

impl TomlSource {
	pub fn system(paths: &PathsConfig) -> Self {
		Self::system_at(paths.system_config_file.clone())
	}

	/// Optional system-level file at `path`; used when user paths cannot be
	/// resolved.
	pub fn system_at(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::SystemFile,
			required: false,
		}
	}

	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			required: false,
		}
	}

	pub fn explicit(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::ExplicitFile,
			required: true,
		}
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		match self.precedence {
			Precedence::SystemFile => "system-config",
			Precedence::UserFile => "user-config",
			_ => "config-file",
		}
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.required && !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `SVCFORGE_PROV_<FIELD>` and `SVCFORGE_LOG_<FIELD>`.
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn process() -> Self {
		Self { vars: None }
	}

	/// Reads from a fixed set of variables instead of the process environment.
	pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.is_empty())
	}

	fn load_provision(&self) -> ProvisionConfigLayer {
		ProvisionConfigLayer {
			template: self.var("SVCFORGE_PROV_TEMPLATE"),
			agents: self.var("SVCFORGE_PROV_AGENTS"),
			disk: self.var("SVCFORGE_PROV_DISK"),
			iops: self.var("SVCFORGE_PROV_IOPS"),
			memory: self.var("SVCFORGE_PROV_MEM"),
			root_password: self.var("SVCFORGE_PROV_PASSWORD").map(SecretString::from),
			net_gateway: self.var("SVCFORGE_PROV_NET_GATEWAY"),
			net_mask: self.var("SVCFORGE_PROV_NET_MASK"),
			db_image: self.var("SVCFORGE_PROV_DB_IMAGE"),
			compliance_moduleset: self.var("SVCFORGE_PROV_COMPLIANCE_MODULESET"),
		}
	}

	fn load_logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		let format = match self.var("SVCFORGE_LOG_FORMAT") {
			Some(v) => Some(
				v.parse::<LogFormat>()
					.map_err(|message| ConfigError::invalid_value("SVCFORGE_LOG_FORMAT", message))?,
			),
			None => None,
		};

		Ok(LoggingConfigLayer {
			level: self.var("SVCFORGE_LOG_LEVEL"),
			format,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ConfigLayer {
			provision: Some(self.load_provision()),
			logging: Some(self.load_logging()?),
		})
	}
}

/// Command-line overrides, already shaped as a layer.
pub struct CliSource {
	layer: ConfigLayer,
}

impl CliSource {
	pub fn new(layer: ConfigLayer) -> Self {
		Self { layer }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"command-line"
	}

	fn precedence(&self) -> Precedence {
		Precedence::CommandLine
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}
