// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! svcforge binary: synthesize service manifests for database clusters.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use svcforge_config::{
	load_config, ConfigLayer, LoadOptions, LogFormat, LoggingConfig, ProvisionConfigLayer,
	SvcforgeConfig,
};
use svcforge_core::{compose, plan_pods, AllocationHost, Plan};
use svcforge_inventory::{Inventory, SnapshotInventory};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod endpoints;
mod version;

/// svcforge - service manifest synthesis for multi-node database clusters.
#[derive(Parser, Debug)]
#[command(
	name = "svcforge",
	about = "Synthesize service manifests for database clusters",
	version
)]
struct Args {
	/// Config file (layered over the system and user config files)
	#[arg(long, global = true, env = "SVCFORGE_CONFIG", value_name = "FILE")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Render the service manifest
	Generate(GenerateArgs),
	/// Show pod allocation and interface resolution without rendering
	Plan(SynthArgs),
	/// Show version and build information
	Version,
}

#[derive(ClapArgs, Debug)]
struct GenerateArgs {
	#[command(flatten)]
	input: SynthArgs,

	/// Write the manifest here instead of stdout
	#[arg(long, short, value_name = "FILE")]
	output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct SynthArgs {
	/// Provisioning descriptor, e.g. docker.ext4.lvm.loopback./data
	#[arg(long, value_name = "DESCRIPTOR")]
	descriptor: Option<String>,

	/// Collector node listing snapshot (JSON)
	#[arg(long, value_name = "FILE")]
	inventory: PathBuf,

	/// Target database endpoint address (repeatable)
	#[arg(long = "endpoint", value_name = "ADDR")]
	endpoints: Vec<String>,

	/// File with one endpoint address per line
	#[arg(long, value_name = "FILE")]
	endpoints_file: Option<PathBuf>,

	/// Only allocate onto these inventory nodes (repeatable)
	#[arg(long = "agent", value_name = "NAME")]
	agent_filter: Vec<String>,

	#[command(flatten)]
	overrides: ProvisionOverrides,
}

/// Flag overrides for provisioning parameters.
#[derive(ClapArgs, Debug, Default)]
struct ProvisionOverrides {
	/// Node list written to the manifest's `nodes` entry
	#[arg(long)]
	agents: Option<String>,
	/// Per-pod disk size, e.g. 20G
	#[arg(long)]
	disk: Option<String>,
	/// Per-pod IOPS budget
	#[arg(long)]
	iops: Option<String>,
	/// Per-pod memory budget
	#[arg(long)]
	mem: Option<String>,
	#[arg(long)]
	net_gateway: Option<String>,
	#[arg(long)]
	net_mask: Option<String>,
	/// Database container image
	#[arg(long)]
	db_image: Option<String>,
}

impl ProvisionOverrides {
	fn into_layer(self, descriptor: Option<String>) -> ConfigLayer {
		ConfigLayer {
			provision: Some(ProvisionConfigLayer {
				template: descriptor,
				agents: self.agents,
				disk: self.disk,
				iops: self.iops,
				memory: self.mem,
				net_gateway: self.net_gateway,
				net_mask: self.net_mask,
				db_image: self.db_image,
				..Default::default()
			}),
			logging: None,
		}
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	let (input, output) = match args.command {
		Command::Version => {
			println!("{}", version::format_version_info());
			return Ok(());
		}
		Command::Generate(g) => (g.input, Some(g.output)),
		Command::Plan(input) => (input, None),
	};

	let config = load_config(LoadOptions {
		config_file: args.config,
		overrides: input.overrides.into_layer(input.descriptor),
	})
	.context("failed to load configuration")?;

	init_tracing(&config.logging);

	let endpoints =
		endpoints::collect_endpoints(&input.endpoints, input.endpoints_file.as_deref())?;
	if endpoints.is_empty() {
		warn!("no endpoints given, the manifest will contain no pods");
	}

	let hosts = load_hosts(&input.inventory, input.agent_filter)?;

	match output {
		Some(output) => generate(&config, &endpoints, &hosts, output),
		None => {
			let plan = plan_pods(&config.provision.descriptor, &endpoints, &hosts)?;
			print!("{}", format_plan(&plan));
			Ok(())
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	match logging.format {
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.init(),
		LogFormat::Text => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init(),
	}
}

fn load_hosts(path: &std::path::Path, agent_filter: Vec<String>) -> Result<Vec<AllocationHost>> {
	let inventory = SnapshotInventory::from_path(path)?.with_filter(agent_filter);
	let hosts = inventory
		.allocation_hosts()
		.with_context(|| format!("no usable allocation hosts in {}", inventory.name()))?;
	info!(inventory = inventory.name(), hosts = hosts.len(), "loaded inventory");
	Ok(hosts)
}

fn generate(
	config: &SvcforgeConfig,
	endpoints: &[String],
	hosts: &[AllocationHost],
	output: Option<PathBuf>,
) -> Result<()> {
	let params = config.provision.params()?;
	let manifest = compose(config.provision.descriptor.clone(), endpoints, hosts, &params)?;

	if !manifest.warnings.is_empty() {
		warn!(
			count = manifest.warnings.len(),
			"manifest has pods with an empty interface"
		);
	}

	match output {
		Some(path) => {
			std::fs::write(&path, &manifest.text)
				.with_context(|| format!("failed to write manifest to {}", path.display()))?;
			info!(path = %path.display(), pods = manifest.pods.len(), "manifest written");
		}
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout
				.write_all(manifest.text.as_bytes())
				.context("failed to write manifest to stdout")?;
			stdout.flush()?;
		}
	}

	Ok(())
}

fn format_plan(plan: &Plan) -> String {
	plan.pods
		.iter()
		.map(|p| {
			format!(
				"pod{} {} {} {}\n",
				p.pod,
				p.endpoint,
				p.host,
				p.interface.as_deref().unwrap_or("-")
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use svcforge_core::{EnablePlacement, PodId, PodPlan};

	#[test]
	fn test_parse_generate() {
		let args = Args::try_parse_from([
			"svcforge",
			"generate",
			"--inventory",
			"nodes.json",
			"--endpoint",
			"10.0.0.5",
			"--endpoint",
			"10.0.0.6",
			"--descriptor",
			"docker.ext4.lvm.loopback./data",
			"--mem",
			"1024",
			"-o",
			"out.conf",
		])
		.unwrap();

		match args.command {
			Command::Generate(g) => {
				assert_eq!(g.input.endpoints, ["10.0.0.5", "10.0.0.6"]);
				assert_eq!(g.input.inventory, PathBuf::from("nodes.json"));
				assert_eq!(g.output, Some(PathBuf::from("out.conf")));
				assert_eq!(g.input.overrides.mem.as_deref(), Some("1024"));
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_parse_plan_with_agent_filter() {
		let args = Args::try_parse_from([
			"svcforge",
			"--config",
			"custom.toml",
			"plan",
			"--inventory",
			"nodes.json",
			"--endpoints-file",
			"endpoints.txt",
			"--agent",
			"n1",
			"--agent",
			"n2",
		])
		.unwrap();

		assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
		match args.command {
			Command::Plan(p) => {
				assert_eq!(p.agent_filter, ["n1", "n2"]);
				assert_eq!(p.endpoints_file, Some(PathBuf::from("endpoints.txt")));
				assert!(p.endpoints.is_empty());
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_inventory_is_required() {
		assert!(Args::try_parse_from(["svcforge", "generate", "--endpoint", "10.0.0.5"]).is_err());
	}

	#[test]
	fn test_parse_version() {
		let args = Args::try_parse_from(["svcforge", "version"]).unwrap();
		assert!(matches!(args.command, Command::Version));
	}

	#[test]
	fn test_overrides_become_cli_layer() {
		let overrides = ProvisionOverrides {
			disk: Some("40G".to_string()),
			mem: Some("2048".to_string()),
			..Default::default()
		};
		let layer = overrides.into_layer(Some("system.xfs.none.physical./dev/sdb".to_string()));
		let provision = layer.provision.unwrap();
		assert_eq!(provision.disk.as_deref(), Some("40G"));
		assert_eq!(provision.memory.as_deref(), Some("2048"));
		assert_eq!(
			provision.template.as_deref(),
			Some("system.xfs.none.physical./dev/sdb")
		);
		assert!(provision.root_password.is_none());
		assert!(provision.iops.is_none());
	}

	#[test]
	fn test_format_plan() {
		let plan = Plan {
			pods: vec![
				PodPlan {
					pod: PodId::from_index(0),
					endpoint: "10.0.0.5".to_string(),
					host: "n1".to_string(),
					interface: Some("eth0".to_string()),
					placement: EnablePlacement::new(0, 2),
				},
				PodPlan {
					pod: PodId::from_index(1),
					endpoint: "10.9.9.9".to_string(),
					host: "n1".to_string(),
					interface: None,
					placement: EnablePlacement::new(1, 2),
				},
			],
			warnings: Vec::new(),
		};
		assert_eq!(
			format_plan(&plan),
			"pod01 10.0.0.5 n1 eth0\npod02 10.9.9.9 n1 -\n"
		);
	}
}
