// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level configuration layer.

use serde::{Deserialize, Serialize};

use crate::sections::{LoggingConfigLayer, ProvisionConfigLayer};

/// One source's view of the configuration; every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
	pub provision: Option<ProvisionConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl ConfigLayer {
	/// Merges another layer on top of this one.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_section(&mut self.provision, other.provision, ProvisionConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: impl FnOnce(&mut T, T)) {
	if let Some(other) = other {
		match base.as_mut() {
			Some(existing) => merge(existing, other),
			None => *base = Some(other),
		}
	}
}
