// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::section::{Fragment, Section, SectionKind};

use super::{PodContext, SANDBOX_CONTAINER_RID};

/// Bridge device containerized pods attach to.
pub const CONTAINER_BRIDGE: &str = "br0";

/// IP resource for one pod. Address, netmask, network and gateway are left as
/// `{env.*}` placeholders for the orchestrator.
pub fn render(ctx: &PodContext<'_>) -> Fragment {
	let pod = ctx.pod;
	let mut section = Section::new(format!("ip#{pod}")).entry(
		"tags",
		format!("sm sm.container sm.container.pod{pod} pod{pod}"),
	);

	if ctx.descriptor.is_containerized() {
		section.push("type", "docker");
		section.push("ipdev", CONTAINER_BRIDGE);
		section.push("container_rid", SANDBOX_CONTAINER_RID);
	} else {
		// An unresolved interface is surfaced as a blank value.
		section.push("ipdev", ctx.interface.unwrap_or_default());
	}

	let section = section
		.entry("ipname", format!("{{env.ip_pod{pod}}}"))
		.entry("netmask", "{env.netmask}")
		.entry("network", "{env.network}")
		.entry("gateway", "{env.gateway}")
		.entry("del_net_route", "true")
		.entry("disable", "true")
		.entry("enable_on", ctx.placement);

	Fragment::from_section(SectionKind::Network, &section)
}
