// stylus-abi/src/request.rs

use crate::slices::{GoSliceData, RustSlice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request types on the wire are `EVM_API_METHOD_REQ_OFFSET + method`.
pub const EVM_API_METHOD_REQ_OFFSET: u32 = 0x1000_0000;

/// Host service the engine asks for while a program runs.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvmApiMethod {
    GetBytes32 = 0,
    SetTrieSlots = 1,
    GetTransientBytes32 = 2,
    SetTransientBytes32 = 3,
    ContractCall = 4,
    DelegateCall = 5,
    StaticCall = 6,
    Create1 = 7,
    Create2 = 8,
    EmitLog = 9,
    AccountBalance = 10,
    AccountCode = 11,
    AccountCodeHash = 12,
    AddPages = 13,
    CaptureHostIo = 14,
}

impl EvmApiMethod {
    pub const ALL: [EvmApiMethod; 15] = [
        EvmApiMethod::GetBytes32,
        EvmApiMethod::SetTrieSlots,
        EvmApiMethod::GetTransientBytes32,
        EvmApiMethod::SetTransientBytes32,
        EvmApiMethod::ContractCall,
        EvmApiMethod::DelegateCall,
        EvmApiMethod::StaticCall,
        EvmApiMethod::Create1,
        EvmApiMethod::Create2,
        EvmApiMethod::EmitLog,
        EvmApiMethod::AccountBalance,
        EvmApiMethod::AccountCode,
        EvmApiMethod::AccountCodeHash,
        EvmApiMethod::AddPages,
        EvmApiMethod::CaptureHostIo,
    ];

    /// Decodes a wire request type. Values below the offset or past the last
    /// method yield `None`.
    pub fn from_request_type(req_type: u32) -> Option<Self> {
        let index = req_type.checked_sub(EVM_API_METHOD_REQ_OFFSET)?;
        Self::ALL.into_iter().find(|m| *m as u32 == index)
    }

    pub fn request_type(self) -> u32 {
        EVM_API_METHOD_REQ_OFFSET + self as u32
    }
}

impl fmt::Display for EvmApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Leading status byte used by several request responses.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvmApiStatus {
    Success = 0,
    Failure = 1,
    OutOfGas = 2,
    WriteProtection = 3,
}

impl TryFrom<u8> for EvmApiStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EvmApiStatus::Success),
            1 => Ok(EvmApiStatus::Failure),
            2 => Ok(EvmApiStatus::OutOfGas),
            3 => Ok(EvmApiStatus::WriteProtection),
            other => Err(other),
        }
    }
}

/// `(id, req_type, data, gas_cost, result, raw_data)`
pub type HandleRequestFn = unsafe extern "C" fn(
    id: usize,
    req_type: u32,
    data: *mut RustSlice,
    gas_cost: *mut u64,
    result: *mut GoSliceData,
    raw_data: *mut GoSliceData,
);

/// Callback the engine re-enters for host services. `id` is opaque to the
/// engine and handed back verbatim on every request.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NativeRequestHandler {
    pub handle_request_fptr: HandleRequestFn,
    pub id: usize,
}

/// Response bytes copied out of the handler's result slices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub result: Vec<u8>,
    pub raw_data: Vec<u8>,
    pub gas_cost: u64,
}

impl NativeRequestHandler {
    pub fn fptr_addr(&self) -> usize {
        self.handle_request_fptr as usize
    }

    /// Issues one request the way the engine does and copies the response
    /// out before returning.
    ///
    /// # Safety
    /// `handle_request_fptr` and `id` must form a live handler, and the
    /// result slices it writes must stay readable until this returns.
    pub unsafe fn request(&self, req_type: u32, input: &[u8]) -> RawResponse {
        let mut data = RustSlice::new(input);
        let mut gas_cost = 0u64;
        let mut result = GoSliceData::empty();
        let mut raw_data = GoSliceData::empty();
        (self.handle_request_fptr)(
            self.id,
            req_type,
            &mut data,
            &mut gas_cost,
            &mut result,
            &mut raw_data,
        );
        RawResponse {
            result: result.as_slice().to_vec(),
            raw_data: raw_data.as_slice().to_vec(),
            gas_cost,
        }
    }
}
