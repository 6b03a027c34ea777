// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant config file locations.

use std::path::PathBuf;

use crate::ConfigError;

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/svcforge/config.toml";

/// Resolved config file locations.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// User config file: ~/.config/svcforge/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/svcforge/config.toml
	pub system_config_file: PathBuf,
}

/// Resolve config paths, honouring `XDG_CONFIG_HOME` and falling back to
/// `~/.config`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
		Some(dir) if !dir.is_empty() => PathBuf::from(dir),
		_ => dirs::home_dir()
			.ok_or(ConfigError::HomeDirNotFound)?
			.join(".config"),
	};

	tracing::debug!(config_home = %config_home.display(), "resolved XDG config home");

	Ok(PathsConfig {
		user_config_file: config_home.join("svcforge/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
	})
}
