// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type for svcforge.
//!
//! [`Secret<T>`] holds a sensitive value (the database root credential, for
//! instance) and refuses to print it: `Debug` and `Display` both render
//! [`REDACTED`], and serialization writes the same placeholder. The inner
//! value is zeroized when the wrapper is dropped.
//!
//! The only way to read the value is [`Secret::expose`], which makes every
//! access site easy to grep for.

use std::fmt;

use zeroize::Zeroize;

/// Placeholder rendered in place of secret values.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must never end up in logs.
pub struct Secret<T: Zeroize> {
	inner: T,
}

/// The common case: a secret string.
pub type SecretString = Secret<String>;

impl<T: Zeroize> Secret<T> {
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the underlying value.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl<T: Zeroize> Drop for Secret<T> {
	fn drop(&mut self) {
		self.inner.zeroize();
	}
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T: Zeroize> fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
impl<T: Zeroize> serde::Serialize for Secret<T> {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(REDACTED)
	}
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: Zeroize + serde::Deserialize<'de>,
{
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		T::deserialize(deserializer).map(Secret::new)
	}
}
