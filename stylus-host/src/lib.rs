// stylus-host/src/lib.rs

pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod init;
pub mod native;

// Public API
pub use config::{BridgeConfig, CacheConfig, RuntimeConfig, TargetConfig};
pub use engine::StylusEngine;
pub use error::BridgeError;
pub use handler::{EvmApi, EvmApiResponse};
pub use init::{ensure_initialized_once, initialize, initialize_for, InitReport, RegisteredTarget};
pub use native::{ActivateResult, NativeResult, StylusNative};

pub use stylus_abi as abi;
