use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use stylus_abi::targets::{
    is_supported_target, AMD64_TARGET_NAME, ARM64_TARGET_NAME, HOST_DESCRIPTOR,
    HOST_TARGET_NAME, LINUX_ARM64_DESCRIPTOR, LINUX_X64_DESCRIPTOR, WAVM_TARGET_NAME,
};
use stylus_abi::TargetError;

pub const ROOT_ENV_VAR: &str = "STYLUS_BRIDGE_ROOT";
pub const DEFAULT_ROOT: &str = ".stylus";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_CONFIG_TOML: &str = r#"# Stylus bridge configuration

[targets]
amd64 = "x86_64-linux-unknown+sse4.2+lzcnt+bmi"
arm64 = "arm64-linux-unknown+neon"
host = ""
extra_archs = ["wavm"]

[cache]
native_lru_cache_capacity_mb = 256

[runtime]
debug = false
"#;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub targets: TargetConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl BridgeConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::info!(
                "No config file found at {}. Using BridgeConfig::default().",
                path.display()
            );
            return Ok(BridgeConfig::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Loads from the root named by `STYLUS_BRIDGE_ROOT`, or `.stylus`.
    pub fn from_env() -> Result<Self> {
        Self::load(&bridge_root())
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str::<BridgeConfig>(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing bridge config")
    }
}

/// Resolve the bridge root. Allow override via STYLUS_BRIDGE_ROOT (tests/deploys).
pub fn bridge_root() -> PathBuf {
    std::env::var_os(ROOT_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
}

// ----------------- Targets -----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "TargetConfig::default_amd64")]
    pub amd64: String,
    #[serde(default = "TargetConfig::default_arm64")]
    pub arm64: String,
    #[serde(default = "TargetConfig::default_host")]
    pub host: String,
    #[serde(default = "TargetConfig::default_extra_archs")]
    pub extra_archs: Vec<String>,
}

impl TargetConfig {
    fn default_amd64() -> String {
        LINUX_X64_DESCRIPTOR.to_string()
    }

    fn default_arm64() -> String {
        LINUX_ARM64_DESCRIPTOR.to_string()
    }

    fn default_host() -> String {
        HOST_DESCRIPTOR.to_string()
    }

    fn default_extra_archs() -> Vec<String> {
        vec![WAVM_TARGET_NAME.to_string()]
    }

    /// Local target plus `extra_archs`, deduplicated and sorted. Unknown
    /// names are rejected before anything is registered.
    pub fn wasm_targets(&self, local: &str) -> Result<Vec<String>, TargetError> {
        let mut names = BTreeSet::new();
        names.insert(local.to_string());
        for arch in &self.extra_archs {
            if !is_supported_target(arch) {
                return Err(TargetError::UnsupportedTarget(arch.clone()));
            }
            names.insert(arch.clone());
        }
        Ok(names.into_iter().collect())
    }

    /// Descriptor registered for `name`. `wavm` has none: it is never
    /// registered with the native compiler.
    pub fn descriptor_for(&self, name: &str) -> Result<Option<&str>, TargetError> {
        match name {
            WAVM_TARGET_NAME => Ok(None),
            AMD64_TARGET_NAME => Ok(Some(self.amd64.as_str())),
            ARM64_TARGET_NAME => Ok(Some(self.arm64.as_str())),
            HOST_TARGET_NAME => Ok(Some(self.host.as_str())),
            other => Err(TargetError::UnsupportedTarget(other.to_string())),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            amd64: Self::default_amd64(),
            arm64: Self::default_arm64(),
            host: Self::default_host(),
            extra_archs: Self::default_extra_archs(),
        }
    }
}

// ----------------- Cache -----------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_capacity_mb")]
    pub native_lru_cache_capacity_mb: u64,
}

impl CacheConfig {
    fn default_capacity_mb() -> u64 {
        256
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.native_lru_cache_capacity_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            native_lru_cache_capacity_mb: Self::default_capacity_mb(),
        }
    }
}

// ----------------- Runtime -----------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub debug: bool,
}
