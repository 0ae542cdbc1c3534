// stylus-host/src/init.rs

use anyhow::Result;
use once_cell::sync::OnceCell;

use stylus_abi::targets::local_target_name;

use crate::config::BridgeConfig;
use crate::engine::StylusEngine;
use crate::error::BridgeError;
use crate::native::StylusNative;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredTarget {
    pub name: String,
    pub descriptor: String,
    pub native: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub lru_capacity_bytes: u64,
    pub local_target: String,
    pub registered: Vec<RegisteredTarget>,
}

// ---------- single global init gate ----------

static INIT: OnceCell<InitReport> = OnceCell::new();

/// Idempotent process-wide bootstrap. The first successful run wins; later
/// calls return its report without touching the engine. A failed run leaves
/// the gate open.
pub fn ensure_initialized_once<E: StylusEngine>(
    native: &StylusNative<E>,
    config: &BridgeConfig,
) -> Result<&'static InitReport> {
    INIT.get_or_try_init(|| initialize(native, config).map_err(anyhow::Error::from))
}

/// Sizes the native LRU cache and registers the configured compile targets,
/// marking the one matching this machine as native.
pub fn initialize<E: StylusEngine>(
    native: &StylusNative<E>,
    config: &BridgeConfig,
) -> Result<InitReport, BridgeError> {
    initialize_for(native, config, local_target_name())
}

/// [`initialize`] with an explicit local target name.
pub fn initialize_for<E: StylusEngine>(
    native: &StylusNative<E>,
    config: &BridgeConfig,
    local: &str,
) -> Result<InitReport, BridgeError> {
    let lru_capacity_bytes = config.cache.capacity_bytes();
    native.set_cache_lru_capacity(lru_capacity_bytes);
    tracing::debug!(lru_capacity_bytes, "native lru cache capacity set");

    let targets = config.targets.wasm_targets(local)?;
    let mut registered = Vec::new();

    for name in &targets {
        let Some(descriptor) = config.targets.descriptor_for(name)? else {
            tracing::debug!(target_name = %name, "skipping target without native descriptor");
            continue;
        };
        let is_native = name == local;
        let outcome = native.set_target(name, descriptor, is_native);
        if !outcome.is_success() {
            return Err(BridgeError::TargetRegistration {
                target: name.clone(),
                descriptor: descriptor.to_string(),
                status: outcome.status,
                message: outcome.error,
            });
        }
        tracing::debug!(target_name = %name, descriptor, native = is_native, "target registered");
        registered.push(RegisteredTarget {
            name: name.clone(),
            descriptor: descriptor.to_string(),
            native: is_native,
        });
    }

    if !registered.iter().any(|t| t.native) {
        return Err(BridgeError::MissingLocalTarget {
            local: local.to_string(),
            targets,
        });
    }

    Ok(InitReport {
        lru_capacity_bytes,
        local_target: local.to_string(),
        registered,
    })
}
