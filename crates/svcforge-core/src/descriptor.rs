// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning descriptor parsing.
//!
//! A descriptor is a compact dot-delimited string with exactly five fields:
//!
//! ```text
//! microservice.fstype.fspool.fsmode.fspath
//! docker.ext4.lvm.loopback./data
//! ```
//!
//! Only the field count is validated. Tokens the generators do not know about
//! are kept verbatim in an `Other` variant and rendered as-is, so
//! `descriptor.to_string()` always reproduces the parsed input.

use std::fmt;
use std::str::FromStr;

use crate::error::{SynthError, SynthResult};

const FIELD_COUNT: usize = 5;

macro_rules! descriptor_axis {
	(
		$(#[$meta:meta])*
		$name:ident { $($variant:ident => $token:literal),+ $(,)? }
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash)]
		pub enum $name {
			$($variant,)+
			Other(String),
		}

		impl $name {
			pub fn parse(token: &str) -> Self {
				match token {
					$($token => Self::$variant,)+
					other => Self::Other(other.to_string()),
				}
			}

			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $token,)+
					Self::Other(other) => other,
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

descriptor_axis! {
	/// How the database instance runs on a node.
	MicroserviceKind {
		Docker => "docker",
		System => "system",
	}
}

descriptor_axis! {
	/// Filesystem created on each pod's disk.
	FsType {
		Directory => "directory",
		Ext4 => "ext4",
		Xfs => "xfs",
		Zfs => "zfs",
		Btrfs => "btrfs",
	}
}

descriptor_axis! {
	/// Volume management layered over the pod's disk.
	PoolStrategy {
		None => "none",
		Lvm => "lvm",
		Zpool => "zpool",
	}
}

descriptor_axis! {
	/// Where the pod's disk comes from.
	PlacementMode {
		Loopback => "loopback",
		Physical => "physical",
	}
}

impl MicroserviceKind {
	/// Containerized kinds use a fixed bridge device and a compute section.
	pub fn is_containerized(&self) -> bool {
		matches!(self, MicroserviceKind::Docker)
	}
}

/// The five parsed axes of a provisioning descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
	pub microservice: MicroserviceKind,
	pub fs_type: FsType,
	pub fs_pool: PoolStrategy,
	pub fs_mode: PlacementMode,
	pub fs_path: String,
}

impl Descriptor {
	/// Split a descriptor string into its five axes.
	pub fn parse(input: &str) -> SynthResult<Self> {
		let fields: Vec<&str> = input.split('.').collect();
		if fields.len() != FIELD_COUNT {
			return Err(SynthError::MalformedDescriptor {
				descriptor: input.to_string(),
				fields: fields.len(),
			});
		}

		Ok(Self {
			microservice: MicroserviceKind::parse(fields[0]),
			fs_type: FsType::parse(fields[1]),
			fs_pool: PoolStrategy::parse(fields[2]),
			fs_mode: PlacementMode::parse(fields[3]),
			fs_path: fields[4].to_string(),
		})
	}

	pub fn is_containerized(&self) -> bool {
		self.microservice.is_containerized()
	}
}

impl FromStr for Descriptor {
	type Err = SynthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}.{}.{}.{}.{}",
			self.microservice, self.fs_type, self.fs_pool, self.fs_mode, self.fs_path
		)
	}
}
