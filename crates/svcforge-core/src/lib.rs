// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deployment manifest synthesis for multi-node database clusters.
//!
//! Turns a provisioning descriptor, a list of target database endpoints and
//! a pool of allocation hosts into a section-based service manifest for an
//! external orchestrator. Synthesis is a pure, synchronous function: it does
//! no I/O and never evaluates the `{env.*}`, `{disk#*}` or `{nodes[...]}`
//! placeholders it emits.
//!
//! # Architecture
//!
//! ```text
//! descriptor ──► Descriptor::parse
//! endpoints  ──► allocate (round robin over hosts) ──► resolve_interface (/24 match)
//!                  │
//!                  ▼ per pod
//!        disk / filesystem / network / compute generators
//!                  │
//!                  ▼
//!        environment::render ──► compose (fixed section order) ──► Manifest
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use svcforge_core::{synthesize, AllocationHost, ProvisionParams};
//!
//! let hosts = vec![AllocationHost::new("agent1", vec![]).with_address("10.0.0.9", "eth0")];
//! let manifest = synthesize("docker.ext4.lvm.loopback./data", &["10.0.0.5"], &hosts, &params)?;
//! println!("{}", manifest.text);
//! ```

pub mod allocator;
pub mod composer;
pub mod descriptor;
pub mod environment;
pub mod error;
pub mod host;
pub mod placement;
pub mod pod;
pub mod resolver;
pub mod section;
pub mod sections;

pub use allocator::{allocate, PodAllocation};
pub use composer::{compose, plan_pods, synthesize, Manifest, Plan, PodPlan};
pub use descriptor::{Descriptor, FsType, MicroserviceKind, PlacementMode, PoolStrategy};
pub use environment::{network_address, ProvisionParams, DEFAULT_DB_IMAGE};
pub use error::{SynthError, SynthResult, SynthWarning};
pub use host::{AllocationHost, NetworkAddress};
pub use placement::{EnablePlacement, NODE_COUNT_TOKEN};
pub use pod::PodId;
pub use resolver::resolve_interface;
pub use section::{Fragment, Section, SectionKind};
pub use sections::directive::DEFAULT_COMPLIANCE_MODULESET;
pub use svcforge_common_secret::SecretString;
