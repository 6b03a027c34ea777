// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::section::{Fragment, SectionKind};

/// Compliance module set attached after provisioning unless configured otherwise.
pub const DEFAULT_COMPLIANCE_MODULESET: &str = "mariadb.svc.mrm.db";

/// Post-provisioning compliance fix, emitted once after the filesystem sections.
pub fn compliance_fix(moduleset: &str) -> Fragment {
	Fragment::new(
		SectionKind::Directive,
		format!(
			"post_provision = {{svcmgr}} -s {{svcname}} compliance fix --attach --moduleset {moduleset}\n"
		),
	)
}
