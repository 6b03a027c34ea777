// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `[env]` block assembly.
//!
//! The environment block holds the values every `{env.*}` placeholder in the
//! manifest resolves against: cluster-wide scalars copied from the
//! provisioning parameters, the computed network address, and one
//! `ip_podNN` binding per pod.

use svcforge_common_secret::SecretString;

use crate::pod::PodId;
use crate::section::{Fragment, Section, SectionKind};

/// Database container image used when none is configured.
pub const DEFAULT_DB_IMAGE: &str = "mariadb:latest";

/// Scalar provisioning parameters, copied verbatim into the manifest.
#[derive(Debug, Clone)]
pub struct ProvisionParams {
	/// Node list the orchestrator places the service on.
	pub agents: String,
	pub disk_size: String,
	pub iops: String,
	pub memory: String,
	pub root_password: SecretString,
	pub net_gateway: String,
	pub net_mask: String,
	pub db_image: String,
	pub compliance_moduleset: String,
}

/// Network address of `gateway` under `mask`.
///
/// Works on the literal octet strings: each gateway octet whose mask octet is
/// exactly `"0"` becomes `"0"`, everything else is kept as written. Extra mask
/// octets beyond the gateway's are ignored.
pub fn network_address(gateway: &str, mask: &str) -> String {
	gateway
		.split('.')
		.zip(mask.split('.').map(Some).chain(std::iter::repeat(None)))
		.map(|(octet, m)| if m == Some("0") { "0" } else { octet })
		.collect::<Vec<_>>()
		.join(".")
}

/// Render the `[env]` block for the given per-pod endpoint bindings.
pub fn render<'a>(
	params: &ProvisionParams,
	bindings: impl IntoIterator<Item = (PodId, &'a str)>,
) -> Fragment {
	let mut section = Section::new("env")
		.entry("nodes", &params.agents)
		.entry("size", &params.disk_size)
		.entry("db_img", &params.db_image);

	for (pod, endpoint) in bindings {
		section.push(format!("ip_pod{pod}"), endpoint);
	}

	let section = section
		.entry("mysql_root_password", params.root_password.expose())
		.entry("network", network_address(&params.net_gateway, &params.net_mask))
		.entry("gateway", &params.net_gateway)
		.entry("netmask", &params.net_mask)
		.entry("base_dir", "/srv/{svcname}")
		.entry("max_iops", &params.iops)
		.entry("max_mem", &params.memory);

	Fragment::from_section(SectionKind::Environment, &section)
}

#[cfg(test)]
pub(crate) fn test_params() -> ProvisionParams {
	ProvisionParams {
		agents: "node1 node2".to_string(),
		disk_size: "20G".to_string(),
		iops: "300".to_string(),
		memory: "256".to_string(),
		root_password: SecretString::from("hunter2"),
		net_gateway: "192.168.1.1".to_string(),
		net_mask: "255.255.255.0".to_string(),
		db_image: DEFAULT_DB_IMAGE.to_string(),
		compliance_moduleset: "mariadb.svc.mrm.db".to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_network_slash_24() {
		assert_eq!(network_address("192.168.1.1", "255.255.255.0"), "192.168.1.0");
	}

	#[test]
	fn test_network_slash_16() {
		assert_eq!(network_address("192.168.1.1", "255.255.0.0"), "192.168.0.0");
	}

	#[test]
	fn test_network_only_literal_zero_masks() {
		// "00" and "128" are not "0": the octet is kept as written.
		assert_eq!(network_address("10.1.2.3", "255.00.128.0"), "10.1.2.0");
	}

	#[test]
	fn test_network_non_numeric_octets_are_opaque() {
		assert_eq!(network_address("gw.x.y.z", "255.0.255.0"), "gw.0.y.0");
	}

	#[test]
	fn test_network_mask_shorter_than_gateway() {
		assert_eq!(network_address("10.1.2.3", "255.0"), "10.0.2.3");
	}

	#[test]
	fn test_network_mask_longer_than_gateway() {
		assert_eq!(network_address("10.1", "255.0.0.0"), "10.0");
	}

	#[test]
	fn test_render_env_block() {
		let params = test_params();
		let fragment = render(
			&params,
			[
				(PodId::from_index(0), "10.0.0.5"),
				(PodId::from_index(1), "10.0.0.6"),
			],
		);
		assert_eq!(fragment.kind, SectionKind::Environment);
		assert_eq!(
			fragment.text,
			"[env]\n\
			 nodes = node1 node2\n\
			 size = 20G\n\
			 db_img = mariadb:latest\n\
			 ip_pod01 = 10.0.0.5\n\
			 ip_pod02 = 10.0.0.6\n\
			 mysql_root_password = hunter2\n\
			 network = 192.168.1.0\n\
			 gateway = 192.168.1.1\n\
			 netmask = 255.255.255.0\n\
			 base_dir = /srv/{svcname}\n\
			 max_iops = 300\n\
			 max_mem = 256\n"
		);
	}

	#[test]
	fn test_params_debug_hides_password() {
		let rendered = format!("{:?}", test_params());
		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("[REDACTED]"));
	}

	proptest! {
		#[test]
		fn full_mask_keeps_gateway(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
			let gateway = format!("{a}.{b}.{c}.{d}");
			prop_assert_eq!(network_address(&gateway, "255.255.255.255"), gateway);
		}

		#[test]
		fn zero_mask_octets_zero_the_gateway(a in 1u8..=255, b in 1u8..=255, c in 1u8..=255, d in 1u8..=255) {
			let gateway = format!("{a}.{b}.{c}.{d}");
			prop_assert_eq!(network_address(&gateway, "255.255.0.0"), format!("{a}.{b}.0.0"));
		}
	}
}
