use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use stylus_abi::targets::{current_target_descriptor, local_target_name};
use stylus_abi::{EvmApiMethod, OutcomeCode, EVM_API_METHOD_REQ_OFFSET};
use stylus_host::config::{bridge_root, CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML};
use stylus_host::BridgeConfig;

#[derive(Parser)]
#[command(
    name = "stylus-admin",
    about = "Offline helpers for the Stylus bridge: config, targets and wire codes"
)]
struct Cli {
    /// Bridge root holding config.toml (defaults to $STYLUS_BRIDGE_ROOT or .stylus)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write a default config.toml under the bridge root
    InitConfig {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config as JSON
    ShowConfig,
    /// Show the local target and what bootstrap would register
    Targets,
    /// Decode an outcome code returned by the engine
    Outcome { code: u8 },
    /// Decode a request type (decimal or 0x-prefixed hex)
    Request { req_type: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let root = cli.root.unwrap_or_else(bridge_root);
    tracing::debug!(root = %root.display(), "bridge root");
    match cli.cmd {
        Cmd::InitConfig { force } => {
            let path = init_config(&root, force)?;
            println!("wrote {}", path.display());
            Ok(())
        }
        Cmd::ShowConfig => print_json(&BridgeConfig::load(&root)?),
        Cmd::Targets => print_json(&targets_report(&BridgeConfig::load(&root)?)?),
        Cmd::Outcome { code } => print_json(&describe_outcome(code)),
        Cmd::Request { req_type } => print_json(&describe_request(parse_u32(&req_type)?)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_config(root: &Path, force: bool) -> Result<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    ensure!(
        force || !path.exists(),
        "{} already exists (use --force to overwrite)",
        path.display()
    );
    fs::create_dir_all(root).with_context(|| format!("mkdir -p {root:?}"))?;
    fs::write(&path, DEFAULT_CONFIG_TOML).with_context(|| format!("writing {path:?}"))?;
    tracing::info!(path = %path.display(), force, "default config written");
    Ok(path)
}

// ----------------- Reports -----------------

#[derive(Debug, Serialize)]
struct TargetLine {
    name: String,
    descriptor: Option<String>,
    native: bool,
}

#[derive(Debug, Serialize)]
struct TargetsReport {
    local: &'static str,
    local_descriptor: Option<&'static str>,
    lru_capacity_bytes: u64,
    targets: Vec<TargetLine>,
}

fn targets_report(cfg: &BridgeConfig) -> Result<TargetsReport> {
    let local = local_target_name();
    let mut targets = Vec::new();
    for name in cfg.targets.wasm_targets(local)? {
        let descriptor = cfg.targets.descriptor_for(&name)?.map(str::to_string);
        if descriptor.is_none() {
            tracing::debug!(target_name = %name, "no native descriptor, bootstrap skips it");
        }
        targets.push(TargetLine {
            native: name == local,
            name,
            descriptor,
        });
    }
    Ok(TargetsReport {
        local,
        local_descriptor: current_target_descriptor().ok(),
        lru_capacity_bytes: cfg.cache.capacity_bytes(),
        targets,
    })
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct OutcomeReport {
    code: u8,
    kind: Option<String>,
    known: bool,
}

fn describe_outcome(code: u8) -> OutcomeReport {
    let kind = OutcomeCode(code).kind();
    OutcomeReport {
        code,
        kind: kind.map(|k| k.to_string()),
        known: kind.is_some(),
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct RequestReport {
    req_type: u32,
    offset: u32,
    method: Option<EvmApiMethod>,
}

fn describe_request(req_type: u32) -> RequestReport {
    RequestReport {
        req_type,
        offset: EVM_API_METHOD_REQ_OFFSET,
        method: EvmApiMethod::from_request_type(req_type),
    }
}

fn parse_u32(text: &str) -> Result<u32> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.with_context(|| format!("not a u32: {text:?}"))
}
