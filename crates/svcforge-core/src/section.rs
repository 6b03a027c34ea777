// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Section-based manifest text blocks.

use std::fmt;

/// Kind of a manifest fragment; determines its position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
	Header,
	Disk,
	Filesystem,
	Directive,
	Network,
	Compute,
	Environment,
}

/// A bracketed section with ordered `key = value` entries.
///
/// Values may span several lines; continuation lines are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
	name: String,
	entries: Vec<(String, String)>,
}

impl Section {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			entries: Vec::new(),
		}
	}

	pub fn entry(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
		self.entries.push((key.into(), value.to_string()));
		self
	}

	pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) {
		self.entries.push((key.into(), value.to_string()));
	}
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "[{}]", self.name)?;
		for (key, value) in &self.entries {
			if value.is_empty() {
				writeln!(f, "{key} =")?;
			} else {
				writeln!(f, "{key} = {value}")?;
			}
		}
		Ok(())
	}
}

/// One rendered block of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
	pub kind: SectionKind,
	pub text: String,
}

impl Fragment {
	pub fn new(kind: SectionKind, text: impl Into<String>) -> Self {
		Self {
			kind,
			text: text.into(),
		}
	}

	pub fn from_section(kind: SectionKind, section: &Section) -> Self {
		Self::new(kind, section.to_string())
	}
}
