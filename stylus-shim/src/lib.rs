// stylus-shim/src/lib.rs
//
// Loadable boundary between a host and the native Stylus engine. The
// `cdylib` exports `stylus_call_export` and its companions; Rust hosts use
// `LinkedEngine` through `stylus_host::StylusNative` instead.

mod ffi;
mod linked;

pub mod exports;

pub use linked::LinkedEngine;

use anyhow::Result;
use stylus_host::{ensure_initialized_once, BridgeConfig, InitReport, StylusNative};

/// Safe API over the linked engine.
pub fn native() -> StylusNative<LinkedEngine> {
    StylusNative::new(LinkedEngine)
}

/// Loads the bridge config (see `STYLUS_BRIDGE_ROOT`) and bootstraps the
/// linked engine once per process.
pub fn init_from_env() -> Result<&'static InitReport> {
    let config = BridgeConfig::from_env()?;
    ensure_initialized_once(&native(), &config)
}

#[cfg(test)]
mod stub;
