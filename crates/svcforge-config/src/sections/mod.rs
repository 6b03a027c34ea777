// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod logging;
pub mod provision;

pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use provision::{ProvisionConfig, ProvisionConfigLayer};
