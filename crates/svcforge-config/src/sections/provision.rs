// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning configuration section.

use serde::{Deserialize, Serialize};
use svcforge_common_secret::SecretString;
use svcforge_core::{Descriptor, ProvisionParams, DEFAULT_COMPLIANCE_MODULESET, DEFAULT_DB_IMAGE};

use crate::error::ConfigError;

pub const DEFAULT_TEMPLATE: &str = "docker.ext4.lvm.loopback./data";
pub const DEFAULT_DISK: &str = "20G";
pub const DEFAULT_IOPS: &str = "300";
pub const DEFAULT_MEMORY: &str = "256";
pub const DEFAULT_NET_GATEWAY: &str = "192.168.0.254";
pub const DEFAULT_NET_MASK: &str = "255.255.255.0";

/// Provisioning configuration layer (for merging).
///
/// All fields are optional to support layered configuration from
/// multiple sources (defaults, files, environment, command line).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionConfigLayer {
	/// Descriptor: `microservice.fstype.fspool.fsmode.fspath`
	pub template: Option<String>,
	/// Node list written to `[env] nodes`
	pub agents: Option<String>,
	pub disk: Option<String>,
	pub iops: Option<String>,
	pub memory: Option<String>,
	pub root_password: Option<SecretString>,
	pub net_gateway: Option<String>,
	pub net_mask: Option<String>,
	pub db_image: Option<String>,
	pub compliance_moduleset: Option<String>,
}

impl ProvisionConfigLayer {
	/// Merges another layer on top of this one.
	/// Values from `other` take precedence when present.
	pub fn merge(&mut self, other: ProvisionConfigLayer) {
		if other.template.is_some() {
			self.template = other.template;
		}
		if other.agents.is_some() {
			self.agents = other.agents;
		}
		if other.disk.is_some() {
			self.disk = other.disk;
		}
		if other.iops.is_some() {
			self.iops = other.iops;
		}
		if other.memory.is_some() {
			self.memory = other.memory;
		}
		if other.root_password.is_some() {
			self.root_password = other.root_password;
		}
		if other.net_gateway.is_some() {
			self.net_gateway = other.net_gateway;
		}
		if other.net_mask.is_some() {
			self.net_mask = other.net_mask;
		}
		if other.db_image.is_some() {
			self.db_image = other.db_image;
		}
		if other.compliance_moduleset.is_some() {
			self.compliance_moduleset = other.compliance_moduleset;
		}
	}

	/// Resolves this layer into a runtime configuration.
	///
	/// The template is parsed here so a malformed descriptor fails before any
	/// inventory is read.
	pub fn resolve(self) -> Result<ProvisionConfig, ConfigError> {
		let template = self
			.template
			.unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
		let descriptor = Descriptor::parse(&template)?;

		Ok(ProvisionConfig {
			descriptor,
			agents: self.agents.unwrap_or_default(),
			disk: self.disk.unwrap_or_else(|| DEFAULT_DISK.to_string()),
			iops: self.iops.unwrap_or_else(|| DEFAULT_IOPS.to_string()),
			memory: self.memory.unwrap_or_else(|| DEFAULT_MEMORY.to_string()),
			root_password: self.root_password,
			net_gateway: self
				.net_gateway
				.unwrap_or_else(|| DEFAULT_NET_GATEWAY.to_string()),
			net_mask: self
				.net_mask
				.unwrap_or_else(|| DEFAULT_NET_MASK.to_string()),
			db_image: self
				.db_image
				.unwrap_or_else(|| DEFAULT_DB_IMAGE.to_string()),
			compliance_moduleset: self
				.compliance_moduleset
				.unwrap_or_else(|| DEFAULT_COMPLIANCE_MODULESET.to_string()),
		})
	}
}

/// Provisioning configuration (runtime, resolved).
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
	pub descriptor: Descriptor,
	pub agents: String,
	pub disk: String,
	pub iops: String,
	pub memory: String,
	/// Only required when rendering a manifest.
	pub root_password: Option<SecretString>,
	pub net_gateway: String,
	pub net_mask: String,
	pub db_image: String,
	pub compliance_moduleset: String,
}

impl ProvisionConfig {
	/// Scalar parameters for manifest synthesis.
	pub fn params(&self) -> Result<ProvisionParams, ConfigError> {
		let root_password = self
			.root_password
			.clone()
			.ok_or_else(|| ConfigError::missing_field("provision.root_password"))?;

		Ok(ProvisionParams {
			agents: self.agents.clone(),
			disk_size: self.disk.clone(),
			iops: self.iops.clone(),
			memory: self.memory.clone(),
			root_password,
			net_gateway: self.net_gateway.clone(),
			net_mask: self.net_mask.clone(),
			db_image: self.db_image.clone(),
			compliance_moduleset: self.compliance_moduleset.clone(),
		})
	}
}
