// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::descriptor::{FsType, PoolStrategy};
use crate::section::{Fragment, Section, SectionKind};

use super::PodContext;

/// Disk id a generic filesystem mounts from: the LVM disk for the lvm pool,
/// the pod's own disk otherwise.
pub fn disk_reference(ctx: &PodContext<'_>) -> String {
	if ctx.descriptor.fs_pool == PoolStrategy::Lvm {
		ctx.pod.lvm_disk_id()
	} else {
		ctx.pod.to_string()
	}
}

pub fn render(ctx: &PodContext<'_>) -> Fragment {
	let pod = ctx.pod;
	let name = format!("fs#{pod}");

	let section = if ctx.descriptor.fs_type == FsType::Directory {
		// Always enabled: the pre-provision hook isolates the pod network.
		Section::new(name)
			.entry("type", "directory")
			.entry("path", format!("{{env.base_dir}}/pod{pod}"))
			.entry(
				"pre_provision",
				"docker network create {env.subnet_name} --subnet {env.subnet_cidr}",
			)
	} else {
		Section::new(name)
			.entry("type", &ctx.descriptor.fs_type)
			.entry("dev", format!("{{disk#{}.file}}", disk_reference(ctx)))
			.entry("mnt", format!("{{env.base_dir}}/pod{pod}"))
			.entry("size", "{env.size}")
			.entry("disable", "true")
			.entry("enable_on", ctx.placement)
	};

	Fragment::from_section(SectionKind::Filesystem, &section)
}
