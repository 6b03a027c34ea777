// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allocation host inventory for manifest synthesis.
//!
//! The synthesizer treats inventory as a read-only snapshot. This crate
//! turns a collector node listing (or an in-memory list) into the ordered
//! [`AllocationHost`] values that `svcforge-core` allocates pods onto.

pub mod error;
pub mod snapshot;

pub use error::{InventoryError, InventoryResult};
pub use snapshot::{IpRecord, NodeListing, NodeRecord, SnapshotInventory};

use svcforge_core::AllocationHost;

/// A source of allocation hosts.
pub trait Inventory: Send + Sync {
	/// Human-readable origin, used in logs and errors.
	fn name(&self) -> &str;

	/// Hosts in inventory order.
	fn allocation_hosts(&self) -> InventoryResult<Vec<AllocationHost>>;
}

/// In-memory inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
	hosts: Vec<AllocationHost>,
}

impl StaticInventory {
	pub fn new(hosts: Vec<AllocationHost>) -> Self {
		Self { hosts }
	}
}

impl Inventory for StaticInventory {
	fn name(&self) -> &str {
		"static"
	}

	fn allocation_hosts(&self) -> InventoryResult<Vec<AllocationHost>> {
		if self.hosts.is_empty() {
			return Err(InventoryError::EmptyInventory {
				origin: self.name().to_string(),
			});
		}
		Ok(self.hosts.clone())
	}
}
