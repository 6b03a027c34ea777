// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deferred enable-placement expressions.
//!
//! Disabled resources carry an `enable_on` formula that picks the node a pod
//! runs on. Two terms are known at synthesis time (the pod's 0-based index and
//! the total pod count); the node count is only known to the orchestrator and
//! stays symbolic:
//!
//! ```text
//! {nodes[$(1//(4//{#nodes}))]}
//! ```

use std::fmt;

/// Orchestrator placeholder for the live cluster's node count.
pub const NODE_COUNT_TOKEN: &str = "{#nodes}";

/// Partially evaluated node-selection formula for one pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnablePlacement {
	pub pod_index: usize,
	pub total_pods: usize,
}

impl EnablePlacement {
	pub fn new(pod_index: usize, total_pods: usize) -> Self {
		Self {
			pod_index,
			total_pods,
		}
	}
}

impl fmt::Display for EnablePlacement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{{nodes[$({}//({}//{}))]}}",
			self.pod_index, self.total_pods, NODE_COUNT_TOKEN
		)
	}
}
