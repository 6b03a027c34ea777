// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Manifest composition.
//!
//! Fragments are generated per pod, then stably sorted by [`SectionKind`](crate::section::SectionKind),
//! which gives the fixed document order:
//!
//! ```text
//! [DEFAULT] (+ sandbox container)
//! disk sections        (all pods)
//! fs sections          (all pods)
//! post_provision directive
//! ip sections          (all pods)
//! container sections   (all pods, containerized only)
//! [env]
//! ```
//!
//! The orchestrator resolves forward references late, so the grouping is for
//! readability; it is still fixed so identical inputs give identical bytes.

use tracing::{debug, info, warn};

use crate::allocator::{allocate, PodAllocation};
use crate::descriptor::Descriptor;
use crate::environment::{self, ProvisionParams};
use crate::error::{SynthResult, SynthWarning};
use crate::host::AllocationHost;
use crate::placement::EnablePlacement;
use crate::pod::PodId;
use crate::resolver::resolve_interface;
use crate::sections::{compute, directive, disk, filesystem, header, network, PodContext};

/// Where one pod landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodPlan {
	pub pod: PodId,
	pub endpoint: String,
	pub host: String,
	/// `None` for containerized pods and for resolution misses.
	pub interface: Option<String>,
	pub placement: EnablePlacement,
}

/// Allocation and interface resolution for every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
	pub pods: Vec<PodPlan>,
	pub warnings: Vec<SynthWarning>,
}

/// A synthesized manifest and what went into it.
#[derive(Debug, Clone)]
pub struct Manifest {
	pub descriptor: Descriptor,
	pub text: String,
	pub pods: Vec<PodPlan>,
	pub warnings: Vec<SynthWarning>,
}

/// Interface for one allocated pod. Containerized pods skip resolution and
/// use the bridge; a miss is recorded as a warning and left blank.
fn pod_interface<'a>(
	descriptor: &Descriptor,
	allocation: &PodAllocation<'a>,
	warnings: &mut Vec<SynthWarning>,
) -> Option<&'a str> {
	if descriptor.is_containerized() {
		return None;
	}

	let interface = resolve_interface(allocation.host, allocation.endpoint);
	match interface {
		Some(name) => debug!(
			pod = %allocation.pod,
			host = %allocation.host.name,
			interface = name,
			"resolved interface"
		),
		None => {
			let warning = SynthWarning::UnresolvedInterface {
				pod: allocation.pod,
				endpoint: allocation.endpoint.to_string(),
				host: allocation.host.name.clone(),
			};
			warn!(
				pod = %allocation.pod,
				endpoint = allocation.endpoint,
				host = %allocation.host.name,
				"no interface shares a subnet with endpoint, leaving ipdev blank"
			);
			warnings.push(warning);
		}
	}
	interface
}

fn pod_plan(allocation: &PodAllocation<'_>, interface: Option<&str>) -> PodPlan {
	PodPlan {
		pod: allocation.pod,
		endpoint: allocation.endpoint.to_string(),
		host: allocation.host.name.clone(),
		interface: interface.map(str::to_string),
		placement: allocation.placement,
	}
}

/// Allocate endpoints to hosts and resolve interfaces without rendering.
pub fn plan_pods<S: AsRef<str>>(
	descriptor: &Descriptor,
	endpoints: &[S],
	hosts: &[AllocationHost],
) -> SynthResult<Plan> {
	let mut plan = Plan::default();
	for allocation in allocate(endpoints, hosts)? {
		let interface = pod_interface(descriptor, &allocation, &mut plan.warnings);
		plan.pods.push(pod_plan(&allocation, interface));
	}
	Ok(plan)
}

/// Parse `descriptor` and compose the manifest.
pub fn synthesize<S: AsRef<str>>(
	descriptor: &str,
	endpoints: &[S],
	hosts: &[AllocationHost],
	params: &ProvisionParams,
) -> SynthResult<Manifest> {
	let descriptor = Descriptor::parse(descriptor)?;
	compose(descriptor, endpoints, hosts, params)
}

/// Compose the manifest for an already parsed descriptor.
pub fn compose<S: AsRef<str>>(
	descriptor: Descriptor,
	endpoints: &[S],
	hosts: &[AllocationHost],
	params: &ProvisionParams,
) -> SynthResult<Manifest> {
	let allocations = allocate(endpoints, hosts)?;

	let mut fragments = header::render(&descriptor);
	fragments.push(directive::compliance_fix(&params.compliance_moduleset));
	let mut pods = Vec::with_capacity(allocations.len());
	let mut warnings = Vec::new();

	for allocation in &allocations {
		let interface = pod_interface(&descriptor, allocation, &mut warnings);
		let ctx = PodContext {
			pod: allocation.pod,
			interface,
			descriptor: &descriptor,
			placement: allocation.placement,
		};

		fragments.extend(disk::render(&ctx));
		fragments.push(filesystem::render(&ctx));
		fragments.push(network::render(&ctx));
		fragments.extend(compute::render(&ctx));
		pods.push(pod_plan(allocation, interface));
	}

	fragments.push(environment::render(
		params,
		allocations.iter().map(|a| (a.pod, a.endpoint)),
	));

	// Stable: pods keep endpoint order within each kind.
	fragments.sort_by_key(|f| f.kind);

	let text = fragments
		.iter()
		.map(|f| f.text.as_str())
		.collect::<Vec<_>>()
		.join("\n");

	info!(
		descriptor = %descriptor,
		pods = pods.len(),
		hosts = hosts.len(),
		fragments = fragments.len(),
		warnings = warnings.len(),
		bytes = text.len(),
		"synthesized manifest"
	);

	Ok(Manifest {
		descriptor,
		text,
		pods,
		warnings,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::environment::test_params;
	use crate::error::SynthError;
	use crate::section::SectionKind;

	fn agent(name: &str, addr: &str, intf: &str) -> AllocationHost {
		AllocationHost::new(name, vec![]).with_address(addr, intf)
	}

	fn headers(text: &str) -> Vec<&str> {
		text.lines().filter(|l| l.starts_with('[')).collect()
	}

	#[test]
	fn test_section_order_docker() {
		let hosts = vec![agent("a1", "10.0.0.9", "eth0")];
		let manifest = synthesize(
			"docker.ext4.lvm.loopback./data",
			&["10.0.0.5", "10.0.0.6"],
			&hosts,
			&test_params(),
		)
		.unwrap();

		assert_eq!(
			headers(&manifest.text),
			vec![
				"[DEFAULT]",
				"[container#00]",
				"[disk#01]",
				"[disk#1001]",
				"[disk#02]",
				"[disk#1002]",
				"[fs#01]",
				"[fs#02]",
				"[ip#01]",
				"[ip#02]",
				"[container#01]",
				"[container#02]",
				"[env]",
			]
		);

		let directive = manifest.text.find("post_provision =").unwrap();
		let last_fs = manifest.text.find("[fs#02]").unwrap();
		let first_ip = manifest.text.find("[ip#01]").unwrap();
		assert!(last_fs < directive && directive < first_ip);
	}

	#[test]
	fn test_sections_grouped_by_kind_in_pod_order() {
		let hosts = vec![
			agent("a1", "10.0.0.9", "eth0"),
			agent("a2", "10.0.0.10", "eth1"),
		];
		let manifest = synthesize(
			"system.ext4.lvm.loopback./data",
			&["10.0.0.5", "10.0.0.6", "10.0.0.7"],
			&hosts,
			&test_params(),
		)
		.unwrap();

		assert_eq!(
			headers(&manifest.text),
			vec![
				"[DEFAULT]",
				"[disk#01]",
				"[disk#1001]",
				"[disk#02]",
				"[disk#1002]",
				"[disk#03]",
				"[disk#1003]",
				"[fs#01]",
				"[fs#02]",
				"[fs#03]",
				"[ip#01]",
				"[ip#02]",
				"[ip#03]",
				"[env]",
			]
		);
	}

	#[test]
	fn test_system_has_no_containers() {
		let hosts = vec![agent("a1", "10.0.0.9", "eth0")];
		let manifest = synthesize(
			"system.xfs.none.physical./dev/sdb",
			&["10.0.0.5"],
			&hosts,
			&test_params(),
		)
		.unwrap();

		assert_eq!(
			headers(&manifest.text),
			vec!["[DEFAULT]", "[fs#01]", "[ip#01]", "[env]"]
		);
		assert!(manifest.text.contains("ipdev = eth0\n"));
		assert!(manifest.warnings.is_empty());
	}

	#[test]
	fn test_unresolved_interface_is_soft() {
		let hosts = vec![agent("a1", "172.16.0.9", "eth0")];
		let manifest = synthesize(
			"system.ext4.none.loopback./data",
			&["10.0.0.5"],
			&hosts,
			&test_params(),
		)
		.unwrap();

		assert!(manifest.text.contains("\nipdev =\n"));
		assert_eq!(
			manifest.warnings,
			vec![SynthWarning::UnresolvedInterface {
				pod: PodId::from_index(0),
				endpoint: "10.0.0.5".to_string(),
				host: "a1".to_string(),
			}]
		);
		assert_eq!(manifest.pods[0].interface, None);
	}

	#[test]
	fn test_docker_skips_resolution() {
		// No host address matches, but containerized pods never look.
		let hosts = vec![agent("a1", "172.16.0.9", "eth0")];
		let plan = plan_pods(
			&Descriptor::parse("docker.ext4.none.loopback./data").unwrap(),
			&["10.0.0.5"],
			&hosts,
		)
		.unwrap();
		assert!(plan.warnings.is_empty());
		assert_eq!(plan.pods[0].interface, None);
	}

	#[test]
	fn test_plan_round_robin_and_interfaces() {
		let hosts = vec![
			agent("a1", "10.0.0.9", "eth0"),
			agent("a2", "10.0.1.9", "eth1"),
		];
		let plan = plan_pods(
			&Descriptor::parse("system.ext4.none.loopback./data").unwrap(),
			&["10.0.0.5", "10.0.1.6", "10.0.0.7"],
			&hosts,
		)
		.unwrap();

		let summary: Vec<(String, &str, Option<&str>)> = plan
			.pods
			.iter()
			.map(|p| (p.pod.to_string(), p.host.as_str(), p.interface.as_deref()))
			.collect();
		assert_eq!(
			summary,
			vec![
				("01".to_string(), "a1", Some("eth0")),
				("02".to_string(), "a2", Some("eth1")),
				("03".to_string(), "a1", Some("eth0")),
			]
		);
	}

	#[test]
	fn test_malformed_descriptor_aborts() {
		let hosts = vec![agent("a1", "10.0.0.9", "eth0")];
		let err = synthesize("docker.ext4", &["10.0.0.5"], &hosts, &test_params()).unwrap_err();
		assert!(matches!(err, SynthError::MalformedDescriptor { .. }));
	}

	#[test]
	fn test_no_hosts_aborts() {
		let err = synthesize(
			"docker.ext4.lvm.loopback./data",
			&["10.0.0.5"],
			&[],
			&test_params(),
		)
		.unwrap_err();
		assert_eq!(err, SynthError::NoAllocationHosts { endpoints: 1 });
	}

	#[test]
	fn test_no_endpoints_still_renders_skeleton() {
		let endpoints: [&str; 0] = [];
		let manifest = synthesize(
			"system.ext4.none.loopback./data",
			&endpoints,
			&[],
			&test_params(),
		)
		.unwrap();
		assert_eq!(headers(&manifest.text), vec!["[DEFAULT]", "[env]"]);
		assert!(manifest.pods.is_empty());
	}

	#[test]
	fn test_output_is_stable() {
		let hosts = vec![agent("a1", "10.0.0.9", "eth0")];
		let render = || {
			synthesize(
				"system.ext4.lvm.loopback./data",
				&["10.0.0.5", "10.0.0.6", "10.0.0.7"],
				&hosts,
				&test_params(),
			)
			.unwrap()
			.text
		};
		assert_eq!(render(), render());
	}

	#[test]
	fn test_fragment_kinds_used_by_directive() {
		let fragment = directive::compliance_fix("custom.moduleset");
		assert_eq!(fragment.kind, SectionKind::Directive);
		assert!(fragment.text.ends_with("--moduleset custom.moduleset\n"));
	}
}
