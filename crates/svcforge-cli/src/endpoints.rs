// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Target endpoint list handling.

use std::path::Path;

use anyhow::{Context, Result};

/// One address per line. Blank lines and `#` comments are skipped.
pub fn parse_endpoint_lines(content: &str) -> Vec<String> {
	content
		.lines()
		.map(|line| line.split('#').next().unwrap_or_default().trim())
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}

/// Endpoints given with `--endpoint`, followed by those in `--endpoints-file`.
pub fn collect_endpoints(flags: &[String], file: Option<&Path>) -> Result<Vec<String>> {
	let mut endpoints: Vec<String> = flags.iter().map(|e| e.trim().to_string()).collect();

	if let Some(path) = file {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read endpoints file {}", path.display()))?;
		endpoints.extend(parse_endpoint_lines(&content));
	}

	Ok(endpoints)
}
