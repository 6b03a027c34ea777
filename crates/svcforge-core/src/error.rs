// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Synthesis error and warning types.

use crate::pod::PodId;

/// Result type alias for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that abort manifest synthesis. No partial manifest is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
	/// Descriptor did not split into exactly five dot-separated fields
	#[error(
		"Malformed descriptor '{descriptor}': expected 5 dot-separated fields \
		 (microservice.fstype.fspool.fsmode.fspath), found {fields}"
	)]
	MalformedDescriptor { descriptor: String, fields: usize },

	/// Endpoints were supplied but there is nowhere to place them
	#[error("No allocation hosts available for {endpoints} endpoint(s)")]
	NoAllocationHosts { endpoints: usize },
}

/// Non-fatal conditions recorded while synthesizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthWarning {
	/// No address on the allocation host shares the endpoint's /24 prefix.
	/// The ip section is emitted with a blank `ipdev`.
	UnresolvedInterface {
		pod: PodId,
		endpoint: String,
		host: String,
	},
}

impl std::fmt::Display for SynthWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SynthWarning::UnresolvedInterface {
				pod,
				endpoint,
				host,
			} => write!(
				f,
				"pod{pod}: no interface on host {host} shares a subnet with {endpoint}"
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_malformed_descriptor_message() {
		let err = SynthError::MalformedDescriptor {
			descriptor: "docker.ext4".to_string(),
			fields: 2,
		};
		let msg = err.to_string();
		assert!(msg.contains("docker.ext4"));
		assert!(msg.contains("found 2"));
	}

	#[test]
	fn test_warning_display() {
		let warning = SynthWarning::UnresolvedInterface {
			pod: PodId::from_index(2),
			endpoint: "10.1.2.3".to_string(),
			host: "db-agent-1".to_string(),
		};
		assert_eq!(
			warning.to_string(),
			"pod03: no interface on host db-agent-1 shares a subnet with 10.1.2.3"
		);
	}
}
