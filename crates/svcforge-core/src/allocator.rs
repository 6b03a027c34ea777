// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Round-robin pod allocation.

use tracing::debug;

use crate::error::{SynthError, SynthResult};
use crate::host::AllocationHost;
use crate::placement::EnablePlacement;
use crate::pod::PodId;

/// A target endpoint bound to its pod id and allocation host.
#[derive(Debug, Clone, Copy)]
pub struct PodAllocation<'a> {
	pub pod: PodId,
	pub endpoint: &'a str,
	pub host: &'a AllocationHost,
	pub placement: EnablePlacement,
}

/// Assign each endpoint a sequential pod id and the host at
/// `index mod hosts.len()`.
///
/// An empty endpoint list yields no pods regardless of the host pool.
pub fn allocate<'a, S: AsRef<str>>(
	endpoints: &'a [S],
	hosts: &'a [AllocationHost],
) -> SynthResult<Vec<PodAllocation<'a>>> {
	if endpoints.is_empty() {
		return Ok(Vec::new());
	}
	if hosts.is_empty() {
		return Err(SynthError::NoAllocationHosts {
			endpoints: endpoints.len(),
		});
	}

	let total = endpoints.len();
	let pods = endpoints
		.iter()
		.enumerate()
		.map(|(index, endpoint)| {
			let host = &hosts[index % hosts.len()];
			let pod = PodId::from_index(index);
			debug!(
				pod = %pod,
				endpoint = endpoint.as_ref(),
				host = %host.name,
				host_slot = index % hosts.len(),
				host_count = hosts.len(),
				"allocated pod"
			);
			PodAllocation {
				pod,
				endpoint: endpoint.as_ref(),
				host,
				placement: EnablePlacement::new(index, total),
			}
		})
		.collect();

	Ok(pods)
}
