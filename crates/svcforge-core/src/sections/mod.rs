// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-kind section generators.
//!
//! Each generator is a pure text producer: it receives the pod context and
//! returns the fragment(s) for its kind. Cross references between sections
//! (`{disk#NN.file}`, `container#00`) are by name and resolved by the
//! orchestrator.

pub mod compute;
pub mod directive;
pub mod disk;
pub mod filesystem;
pub mod header;
pub mod network;

use crate::descriptor::Descriptor;
use crate::placement::EnablePlacement;
use crate::pod::PodId;

/// Resource id of the sandbox container whose network namespace pods join.
pub const SANDBOX_CONTAINER_RID: &str = "container#00";

/// Everything a generator needs to know about one pod.
#[derive(Debug, Clone, Copy)]
pub struct PodContext<'a> {
	pub pod: PodId,
	/// Resolved host interface; `None` for containerized pods or on a miss.
	pub interface: Option<&'a str>,
	pub descriptor: &'a Descriptor,
	pub placement: EnablePlacement,
}

#[cfg(test)]
pub(crate) mod test_support {
	use super::*;

	pub fn context<'a>(descriptor: &'a Descriptor, index: usize, total: usize) -> PodContext<'a> {
		PodContext {
			pod: PodId::from_index(index),
			interface: None,
			descriptor,
			placement: EnablePlacement::new(index, total),
		}
	}
}
