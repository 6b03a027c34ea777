// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Debug, Error)]
pub enum InventoryError {
	/// The snapshot file could not be read.
	#[error("failed to read inventory {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The snapshot is not a valid node listing.
	#[error("failed to parse inventory {origin}: {source}")]
	Parse {
		origin: String,
		#[source]
		source: serde_json::Error,
	},

	/// The snapshot lists no nodes.
	#[error("inventory {origin} contains no nodes")]
	EmptyInventory { origin: String },

	/// A requested node is not in the snapshot.
	#[error("node '{name}' not found in inventory {origin}")]
	UnknownHost { name: String, origin: String },
}
