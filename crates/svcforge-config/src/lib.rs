// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for svcforge.
//!
//! This crate provides:
//! - Layered configuration from defaults, TOML files, environment and command line
//! - Consistent environment variable naming (`SVCFORGE_PROV_*`, `SVCFORGE_LOG_*`)
//! - Resolution of the provisioning parameters consumed by `svcforge-core`
//!
//! # Usage
//!
//! ```ignore
//! use svcforge_config::{load_config, LoadOptions};
//!
//! let config = load_config(LoadOptions::default())?;
//! let params = config.provision.params()?;
//! ```

pub mod error;
pub mod layer;
pub mod paths;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::{resolve_xdg_paths, PathsConfig};
pub use sections::*;
pub use sources::{CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct SvcforgeConfig {
	pub provision: ProvisionConfig,
	pub logging: LoggingConfig,
}

/// Inputs to [`load_config`] that come from the command line.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// File named with `--config`; must exist when set.
	pub config_file: Option<PathBuf>,
	/// Flag overrides, applied last.
	pub overrides: ConfigLayer,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Command-line flags
/// 2. Environment variables (`SVCFORGE_*`)
/// 3. Explicit config file (`--config`)
/// 4. User config file (`~/.config/svcforge/config.toml`)
/// 5. System config file (`/etc/svcforge/config.toml`)
/// 6. Built-in defaults
pub fn load_config(options: LoadOptions) -> Result<SvcforgeConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];

	match resolve_xdg_paths() {
		Ok(paths) => {
			sources.push(Box::new(TomlSource::system(&paths)));
			sources.push(Box::new(TomlSource::user(&paths)));
		}
		Err(e) => {
			debug!(error = %e, "skipping user config file");
			sources.push(Box::new(TomlSource::system_at(paths::SYSTEM_CONFIG_FILE)));
		}
	}

	if let Some(path) = options.config_file {
		sources.push(Box::new(TomlSource::explicit(path)));
	}
	sources.push(Box::new(EnvSource::process()));
	sources.push(Box::new(CliSource::new(options.overrides)));

	load_from_sources(sources)
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<SvcforgeConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

fn finalize(layer: ConfigLayer) -> Result<SvcforgeConfig, ConfigError> {
	let provision = layer.provision.unwrap_or_default().resolve()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		template = %provision.descriptor,
		agents = %provision.agents,
		disk = %provision.disk,
		iops = %provision.iops,
		memory = %provision.memory,
		db_image = %provision.db_image,
		root_password_set = provision.root_password.is_some(),
		"Configuration loaded"
	);

	Ok(SvcforgeConfig { provision, logging })
}
