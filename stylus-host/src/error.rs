use stylus_abi::{BrotliStatus, OutcomeCode, TargetError};
use thiserror::Error;

/// Local failures of the host API. Engine outcomes are reported through
/// `NativeResult`, not through this type.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("failed to set target {target} with descriptor {descriptor:?}: {message} ({status})")]
    TargetRegistration {
        target: String,
        descriptor: String,
        status: OutcomeCode,
        message: String,
    },

    #[error("local target {local} missing in list of archs {}", .targets.join(", "))]
    MissingLocalTarget { local: String, targets: Vec<String> },

    #[error("engine returned {status}: {message}")]
    Engine { status: OutcomeCode, message: String },

    #[error("failed to {operation} data, status: {status}")]
    Brotli {
        operation: &'static str,
        status: BrotliStatus,
    },
}
