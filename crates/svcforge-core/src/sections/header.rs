// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `[DEFAULT]` section and, for containerized services, the sandbox container.

use crate::descriptor::Descriptor;
use crate::section::{Fragment, Section, SectionKind};

use super::SANDBOX_CONTAINER_RID;

pub fn render(descriptor: &Descriptor) -> Vec<Fragment> {
	let mut defaults = Section::new("DEFAULT")
		.entry("nodes", "{env.nodes}")
		.entry("flex_primary", "{env.nodes[0]}")
		.entry("cluster_type", "flex")
		.entry("rollback", "false")
		.entry("show_disabled", "false");

	if !descriptor.is_containerized() {
		return vec![Fragment::from_section(SectionKind::Header, &defaults)];
	}

	defaults.push("docker_daemon_private", "false");
	defaults.push("docker_data_dir", "{env.base_dir}/docker");
	defaults.push(
		"docker_daemon_args",
		"--log-opt max-size=1m --storage-driver=aufs",
	);

	let sandbox = Section::new(SANDBOX_CONTAINER_RID)
		.entry("type", "docker")
		.entry("run_image", "busybox:latest")
		.entry(
			"run_args",
			"--net=none -i -t\n    -v /etc/localtime:/etc/localtime:ro",
		)
		.entry("run_command", "/bin/sh");

	vec![
		Fragment::from_section(SectionKind::Header, &defaults),
		Fragment::from_section(SectionKind::Header, &sandbox),
	]
}
