// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subnet-based interface resolution.
//!
//! Addresses are compared as dotted-quad strings on their first three octets,
//! i.e. every network is assumed to be a /24. Non-/24 networks can mismatch;
//! generated manifests for existing deployments depend on this rule, so it is
//! kept as-is.

use crate::host::AllocationHost;

/// First three dotted-quad octets of `address`, if it has at least three.
fn subnet_prefix(address: &str) -> Option<[&str; 3]> {
	let mut octets = address.split('.');
	Some([octets.next()?, octets.next()?, octets.next()?])
}

/// Interface on `host` whose address shares the endpoint's /24 prefix.
///
/// When several addresses match, the last one in inventory order wins.
pub fn resolve_interface<'a>(host: &'a AllocationHost, endpoint: &str) -> Option<&'a str> {
	let target = subnet_prefix(endpoint)?;
	host.addresses
		.iter()
		.rev()
		.find(|addr| subnet_prefix(&addr.address) == Some(target))
		.map(|addr| addr.interface.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn agent() -> AllocationHost {
		AllocationHost::new("agent1", vec![])
			.with_address("127.0.0.1", "lo")
			.with_address("192.168.1.20", "eth0")
			.with_address("10.8.0.20", "eth1")
	}

	#[test]
	fn test_matches_same_slash_24() {
		assert_eq!(resolve_interface(&agent(), "192.168.1.50"), Some("eth0"));
		assert_eq!(resolve_interface(&agent(), "10.8.0.7"), Some("eth1"));
	}

	#[test]
	fn test_no_match() {
		assert_eq!(resolve_interface(&agent(), "172.16.0.5"), None);
	}

	#[test]
	fn test_only_first_three_octets_compared() {
		// 10.8.0.0/16 peers on a different third octet do not match.
		assert_eq!(resolve_interface(&agent(), "10.8.1.7"), None);
	}

	#[test]
	fn test_last_match_wins() {
		let host = agent().with_address("192.168.1.21", "bond0");
		assert_eq!(resolve_interface(&host, "192.168.1.50"), Some("bond0"));
	}

	#[test]
	fn test_short_addresses_never_match() {
		let host = AllocationHost::new("odd", vec![]).with_address("10.8", "eth9");
		assert_eq!(resolve_interface(&host, "10.8"), None);
		assert_eq!(resolve_interface(&agent(), "garbage"), None);
	}

	#[test]
	fn test_host_without_addresses() {
		let host = AllocationHost::new("bare", vec![]);
		assert_eq!(resolve_interface(&host, "10.0.0.1"), None);
	}
}
