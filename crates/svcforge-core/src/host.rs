// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Allocation host inventory model.

use serde::{Deserialize, Serialize};

/// One address bound to a named interface on an allocation host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddress {
	pub address: String,
	pub interface: String,
}

impl NetworkAddress {
	pub fn new(address: impl Into<String>, interface: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			interface: interface.into(),
		}
	}
}

/// A candidate execution node and its IP inventory, in inventory order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationHost {
	pub name: String,
	pub addresses: Vec<NetworkAddress>,
}

impl AllocationHost {
	pub fn new(name: impl Into<String>, addresses: Vec<NetworkAddress>) -> Self {
		Self {
			name: name.into(),
			addresses,
		}
	}

	/// Builder-style helper used mostly by tests and static inventories.
	pub fn with_address(mut self, address: impl Into<String>, interface: impl Into<String>) -> Self {
		self.addresses.push(NetworkAddress::new(address, interface));
		self
	}
}
