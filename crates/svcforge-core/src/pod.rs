// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// Prefix prepended to a pod id to name the LVM disk layered on its loop disk.
const LVM_DISK_PREFIX: &str = "10";

/// Sequential 1-based pod identifier, rendered zero-padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PodId(usize);

impl PodId {
	/// Pod id for the endpoint at 0-based position `index`.
	pub fn from_index(index: usize) -> Self {
		Self(index.saturating_add(1))
	}

	/// Identifier of the LVM disk backed by this pod's loop disk.
	pub fn lvm_disk_id(self) -> String {
		format!("{LVM_DISK_PREFIX}{self}")
	}
}

impl fmt::Display for PodId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}", self.0)
	}
}
