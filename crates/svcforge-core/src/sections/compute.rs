// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::section::{Fragment, Section, SectionKind};

use super::PodContext;

/// Database container for a containerized pod; `None` for other kinds.
///
/// The container joins the sandbox network namespace and keeps its data,
/// configuration and init scripts under `{env.base_dir}/podNN`.
pub fn render(ctx: &PodContext<'_>) -> Option<Fragment> {
	if !ctx.descriptor.is_containerized() {
		return None;
	}

	let pod = ctx.pod;
	let run_args = [
		"--net=container:{svcname}.container.00".to_string(),
		"-e MYSQL_ROOT_PASSWORD={env.mysql_root_password}".to_string(),
		"-e MYSQL_INITDB_SKIP_TZINFO=yes".to_string(),
		"-v /etc/localtime:/etc/localtime:ro".to_string(),
		format!("-v {{env.base_dir}}/pod{pod}/data:/var/lib/mysql:rw"),
		format!("-v {{env.base_dir}}/pod{pod}/conf/my.cnf:/etc/mysql/my.cnf:rw"),
		format!("-v {{env.base_dir}}/pod{pod}/init:/docker-entrypoint-initdb.d:rw"),
	]
	.join("\n   ");

	let section = Section::new(format!("container#{pod}"))
		.entry("tags", format!("pod{pod}"))
		.entry("type", "docker")
		.entry("run_image", "{env.db_img}")
		.entry("run_args", run_args)
		.entry("disable", "true")
		.entry("enable_on", ctx.placement);

	Some(Fragment::from_section(SectionKind::Compute, &section))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::Descriptor;
	use crate::sections::test_support::context;

	#[test]
	fn test_system_has_no_container() {
		let d = Descriptor::parse("system.ext4.none.physical./dev/sdb").unwrap();
		assert!(render(&context(&d, 0, 1)).is_none());
	}

	#[test]
	fn test_docker_container() {
		let d = Descriptor::parse("docker.ext4.lvm.loopback./data").unwrap();
		let fragment = render(&context(&d, 1, 2)).unwrap();
		assert_eq!(fragment.kind, SectionKind::Compute);
		assert_eq!(
			fragment.text,
			"[container#02]\n\
			 tags = pod02\n\
			 type = docker\n\
			 run_image = {env.db_img}\n\
			 run_args = --net=container:{svcname}.container.00\n   \
			 -e MYSQL_ROOT_PASSWORD={env.mysql_root_password}\n   \
			 -e MYSQL_INITDB_SKIP_TZINFO=yes\n   \
			 -v /etc/localtime:/etc/localtime:ro\n   \
			 -v {env.base_dir}/pod02/data:/var/lib/mysql:rw\n   \
			 -v {env.base_dir}/pod02/conf/my.cnf:/etc/mysql/my.cnf:rw\n   \
			 -v {env.base_dir}/pod02/init:/docker-entrypoint-initdb.d:rw\n\
			 disable = true\n\
			 enable_on = {nodes[$(1//(2//{#nodes}))]}\n"
		);
	}
}
