// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::descriptor::{PlacementMode, PoolStrategy};
use crate::section::{Fragment, Section, SectionKind};

use super::PodContext;

/// Loop disk for loopback placement, then an LVM volume over it for the lvm
/// pool. Either, both, or neither may be emitted.
pub fn render(ctx: &PodContext<'_>) -> Vec<Fragment> {
	let mut fragments = Vec::with_capacity(2);
	let pod = ctx.pod;

	if ctx.descriptor.fs_mode == PlacementMode::Loopback {
		let section = Section::new(format!("disk#{pod}"))
			.entry("type", "loop")
			.entry(
				"file",
				format!("{}/{{svcname}}_pod{pod}.dsk", ctx.descriptor.fs_path),
			)
			.entry("size", "{env.size}");
		fragments.push(Fragment::from_section(SectionKind::Disk, &section));
	}

	if ctx.descriptor.fs_pool == PoolStrategy::Lvm {
		let section = Section::new(format!("disk#{}", pod.lvm_disk_id()))
			.entry("name", "{svcname}")
			.entry("type", "lvm")
			.entry("pvs", format!("{{disk#{pod}.file}}"));
		fragments.push(Fragment::from_section(SectionKind::Disk, &section));
	}

	fragments
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::Descriptor;
	use crate::sections::test_support::context;

	#[test]
	fn test_loopback_lvm_emits_both() {
		let d = Descriptor::parse("docker.ext4.lvm.loopback./data").unwrap();
		let fragments = render(&context(&d, 0, 2));
		assert_eq!(fragments.len(), 2);
		assert_eq!(
			fragments[0].text,
			"[disk#01]\ntype = loop\nfile = /data/{svcname}_pod01.dsk\nsize = {env.size}\n"
		);
		assert_eq!(
			fragments[1].text,
			"[disk#1001]\nname = {svcname}\ntype = lvm\npvs = {disk#01.file}\n"
		);
	}

	#[test]
	fn test_loopback_only() {
		let d = Descriptor::parse("system.xfs.none.loopback./var/lib/disks").unwrap();
		let fragments = render(&context(&d, 4, 5));
		assert_eq!(fragments.len(), 1);
		assert!(fragments[0]
			.text
			.contains("file = /var/lib/disks/{svcname}_pod05.dsk\n"));
	}

	#[test]
	fn test_physical_without_pool_emits_nothing() {
		let d = Descriptor::parse("system.xfs.none.physical./dev/sdb").unwrap();
		assert!(render(&context(&d, 0, 1)).is_empty());
	}

	#[test]
	fn test_physical_lvm_emits_lvm_only() {
		let d = Descriptor::parse("system.xfs.lvm.physical./dev/sdb").unwrap();
		let fragments = render(&context(&d, 1, 2));
		assert_eq!(fragments.len(), 1);
		assert!(fragments[0].text.starts_with("[disk#1002]\n"));
	}
}
