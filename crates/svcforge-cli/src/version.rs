// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information and version utilities.

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
pub const PLATFORM: &str = env!("SVCFORGE_PLATFORM");

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format version info for display.
pub fn format_version_info() -> String {
	format!(
		"svcforge version: {VERSION}\n\
         Platform:         {PLATFORM}"
	)
}
