use crate::bytes::{Bytes20, Bytes32};
use serde::{Deserialize, Serialize};

/// Block and transaction context of the surrounding EVM frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvmData {
    pub arbos_version: u64,
    pub block_basefee: Bytes32,
    pub chainid: u64,
    pub block_coinbase: Bytes20,
    pub block_gas_limit: u64,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub contract_address: Bytes20,
    pub module_hash: Bytes32,
    pub msg_sender: Bytes20,
    pub msg_value: Bytes32,
    pub tx_gas_price: Bytes32,
    pub tx_origin: Bytes20,
    pub reentrant: u32,
    pub return_data_len: u32,
    pub cached: bool,
    pub tracing: bool,
}

/// Metering metadata produced by activation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StylusData {
    pub init_cost: u16,
    pub cached_init_cost: u16,
    pub footprint: u16,
    pub asm_estimate: u32,
}
