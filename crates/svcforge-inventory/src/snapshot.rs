// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pre-fetched node listings from the collector.

use std::path::Path;

use serde::{Deserialize, Serialize};
use svcforge_core::{AllocationHost, NetworkAddress};
use tracing::{debug, instrument};

use crate::error::{InventoryError, InventoryResult};
use crate::Inventory;

/// Top-level collector response: `{"data": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeListing {
	#[serde(default)]
	pub data: Vec<NodeRecord>,
}

/// One node as listed by the collector, with its IP inventory attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
	pub id: Option<i64>,
	pub node_id: Option<String>,
	pub nodename: String,
	pub cpu_cores: Option<u32>,
	pub cpu_freq: Option<String>,
	pub mem_bytes: Option<u64>,
	pub os_kernel: Option<String>,
	pub os_name: Option<String>,
	#[serde(default, alias = "Ips")]
	pub ips: Vec<IpRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpRecord {
	pub addr: String,
	pub addr_type: Option<String>,
	pub mask: Option<String>,
	pub net_broadcast: Option<String>,
	pub net_gateway: Option<String>,
	pub net_name: Option<String>,
	pub net_netmask: Option<String>,
	pub net_network: Option<String>,
	pub id: Option<i64>,
	pub intf: String,
}

impl From<&NodeRecord> for AllocationHost {
	fn from(node: &NodeRecord) -> Self {
		AllocationHost::new(
			node.nodename.clone(),
			node.ips
				.iter()
				.map(|ip| NetworkAddress::new(ip.addr.clone(), ip.intf.clone()))
				.collect(),
		)
	}
}

/// Inventory backed by a JSON snapshot of the collector's node listing.
#[derive(Debug, Clone)]
pub struct SnapshotInventory {
	origin: String,
	nodes: Vec<NodeRecord>,
	filter: Vec<String>,
}

impl SnapshotInventory {
	/// Reads a snapshot file.
	#[instrument(skip_all, fields(path = %path.as_ref().display()))]
	pub fn from_path(path: impl AsRef<Path>) -> InventoryResult<Self> {
		let path = path.as_ref();
		let json = std::fs::read_to_string(path).map_err(|source| InventoryError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_json(path.display().to_string(), &json)
	}

	/// Parses a snapshot held in memory. `origin` names it in errors.
	pub fn from_json(origin: impl Into<String>, json: &str) -> InventoryResult<Self> {
		let origin = origin.into();
		let listing: NodeListing =
			serde_json::from_str(json).map_err(|source| InventoryError::Parse {
				origin: origin.clone(),
				source,
			})?;

		debug!(origin = %origin, nodes = listing.data.len(), "parsed inventory snapshot");

		Ok(Self {
			origin,
			nodes: listing.data,
			filter: Vec::new(),
		})
	}

	/// Restricts the inventory to the named nodes. An empty list keeps all.
	pub fn with_filter<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.filter = names.into_iter().map(Into::into).collect();
		self
	}
}

impl Inventory for SnapshotInventory {
	fn name(&self) -> &str {
		&self.origin
	}

	fn allocation_hosts(&self) -> InventoryResult<Vec<AllocationHost>> {
		if self.nodes.is_empty() {
			return Err(InventoryError::EmptyInventory {
				origin: self.origin.clone(),
			});
		}

		if let Some(missing) = self
			.filter
			.iter()
			.find(|name| !self.nodes.iter().any(|n| &n.nodename == *name))
		{
			return Err(InventoryError::UnknownHost {
				name: missing.clone(),
				origin: self.origin.clone(),
			});
		}

		let hosts: Vec<AllocationHost> = self
			.nodes
			.iter()
			.filter(|n| self.filter.is_empty() || self.filter.contains(&n.nodename))
			.map(AllocationHost::from)
			.collect();

		debug!(
			origin = %self.origin,
			hosts = hosts.len(),
			filtered = !self.filter.is_empty(),
			"selected allocation hosts"
		);
		Ok(hosts)
	}
}
