// Scripted in-process engine for exercising the host API without libstylus.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use stylus_host::abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RawResponse, RustBytes, StylusConfig, StylusData,
};
use stylus_host::StylusEngine;

/// What the next `call` does: issue `requests` through the handler, then
/// finish with `status`, `output` and `gas_left`.
#[derive(Debug, Clone)]
pub struct CallScript {
    pub status: OutcomeCode,
    pub output: Vec<u8>,
    pub gas_left: u64,
    pub requests: Vec<(u32, Vec<u8>)>,
    pub echo_last_response: bool,
}

impl CallScript {
    pub fn finish(status: OutcomeCode, output: &[u8], gas_left: u64) -> Self {
        Self {
            status,
            output: output.to_vec(),
            gas_left,
            requests: Vec::new(),
            echo_last_response: false,
        }
    }

    pub fn request(mut self, req_type: u32, input: &[u8]) -> Self {
        self.requests.push((req_type, input.to_vec()));
        self
    }

    pub fn echo(mut self) -> Self {
        self.echo_last_response = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenCall {
    pub module: Vec<u8>,
    pub calldata: Vec<u8>,
    pub config: StylusConfig,
    pub gas_in: u64,
    pub arbos_tag: u32,
    pub debug: bool,
}

#[derive(Default)]
pub struct FakeEngine {
    pub scripts: RefCell<VecDeque<CallScript>>,
    pub calls: RefCell<Vec<SeenCall>>,
    pub responses: RefCell<Vec<RawResponse>>,
    pub allocs: Cell<usize>,
    pub frees: Cell<usize>,
    pub activate_status: Cell<Option<OutcomeCode>>,
    pub failing_target: RefCell<Option<String>>,
    pub targets: RefCell<Vec<(String, String, bool)>>,
    pub lru_capacity: Cell<Option<u64>>,
    pub ops: RefCell<Vec<String>>,
    pub metrics: Cell<CacheMetrics>,
    /// `(input, output capacity)` for each brotli call.
    pub brotli_calls: RefCell<Vec<(Vec<u8>, usize)>>,
    pub brotli_status: Cell<Option<BrotliStatus>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, script: CallScript) -> &Self {
        self.scripts.borrow_mut().push_back(script);
        self
    }

    pub fn fail_target(&self, name: &str) {
        *self.failing_target.borrow_mut() = Some(name.to_string());
    }

    unsafe fn write_output(&self, output: *mut RustBytes, bytes: Vec<u8>) {
        self.allocs.set(self.allocs.get() + 1);
        *output = RustBytes::from_vec(bytes);
    }

    /// Records the call and fills `output` with `frame` when it fits.
    unsafe fn brotli_io(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        frame: &[u8],
    ) -> BrotliStatus {
        let bytes = std::slice::from_raw_parts(input.ptr, *input.len).to_vec();
        self.brotli_calls.borrow_mut().push((bytes, *output.len));
        if let Some(status) = self.brotli_status.get() {
            return status;
        }
        if frame.len() > *output.len {
            return BrotliStatus::FAILURE;
        }
        std::ptr::copy_nonoverlapping(frame.as_ptr(), output.ptr, frame.len());
        *output.len = frame.len();
        BrotliStatus::SUCCESS
    }

    fn op(&self, text: String) {
        self.ops.borrow_mut().push(text);
    }
}

pub const ACTIVATION_INFO: StylusData = StylusData {
    init_cost: 11,
    cached_init_cost: 7,
    footprint: 3,
    asm_estimate: 4096,
};
pub const ACTIVATION_GAS: u64 = 1_000;

impl StylusEngine for FakeEngine {
    unsafe fn call(
        &self,
        module: GoSliceData,
        calldata: GoSliceData,
        config: StylusConfig,
        handler: NativeRequestHandler,
        _evm_data: EvmData,
        debug: bool,
        output: *mut RustBytes,
        gas: *mut u64,
        arbos_tag: u32,
    ) -> OutcomeCode {
        let gas_in = *gas;
        self.calls.borrow_mut().push(SeenCall {
            module: module.as_slice().to_vec(),
            calldata: calldata.as_slice().to_vec(),
            config,
            gas_in,
            arbos_tag,
            debug,
        });
        let script = self
            .scripts
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| CallScript::finish(OutcomeCode::SUCCESS, &[], gas_in));

        let mut last = Vec::new();
        for (req_type, input) in &script.requests {
            let response = handler.request(*req_type, input);
            last = response.result.clone();
            self.responses.borrow_mut().push(response);
        }

        let bytes = if script.echo_last_response {
            last
        } else {
            script.output
        };
        self.write_output(output, bytes);
        *gas = script.gas_left;
        script.status
    }

    unsafe fn activate(
        &self,
        wasm: GoSliceData,
        _page_limit: u16,
        stylus_version: u16,
        _arbos_version_for_gas: u64,
        _debug: bool,
        output: *mut RustBytes,
        codehash: *const Bytes32,
        module_hash: *mut Bytes32,
        stylus_data: *mut StylusData,
        gas: *mut u64,
    ) -> OutcomeCode {
        *gas = (*gas).saturating_sub(ACTIVATION_GAS);
        if let Some(status) = self.activate_status.get() {
            self.write_output(output, b"activation rejected".to_vec());
            return status;
        }
        let mut hash = (*codehash).0;
        hash.reverse();
        *module_hash = Bytes32(hash);
        *stylus_data = ACTIVATION_INFO;
        let mut wavm = wasm.as_slice().to_vec();
        wavm.extend_from_slice(&stylus_version.to_be_bytes());
        self.write_output(output, wavm);
        OutcomeCode::SUCCESS
    }

    unsafe fn compile(
        &self,
        wasm: GoSliceData,
        version: u16,
        _debug: bool,
        target_name: GoSliceData,
        _cranelift: bool,
        output: *mut RustBytes,
    ) -> OutcomeCode {
        let target = String::from_utf8_lossy(target_name.as_slice()).into_owned();
        if target == "bogus" {
            self.write_output(output, format!("unknown target {target}").into_bytes());
            return OutcomeCode::FAILURE;
        }
        let mut asm = target.into_bytes();
        asm.extend_from_slice(wasm.as_slice());
        asm.push(version as u8);
        self.write_output(output, asm);
        OutcomeCode::SUCCESS
    }

    unsafe fn target_set(
        &self,
        name: GoSliceData,
        description: GoSliceData,
        output: *mut RustBytes,
        native: bool,
    ) -> OutcomeCode {
        let name = String::from_utf8_lossy(name.as_slice()).into_owned();
        let description = String::from_utf8_lossy(description.as_slice()).into_owned();
        if self.failing_target.borrow().as_deref() == Some(name.as_str()) {
            self.write_output(output, format!("cannot register {name}").into_bytes());
            return OutcomeCode::FAILURE;
        }
        self.targets.borrow_mut().push((name, description, native));
        self.write_output(output, Vec::new());
        OutcomeCode::SUCCESS
    }

    unsafe fn wat_to_wasm(&self, wat: GoSliceData, output: *mut RustBytes) -> OutcomeCode {
        let text = wat.as_slice();
        if text.starts_with(b"(module") {
            self.write_output(output, b"\0asm\x01\0\0\0".to_vec());
            OutcomeCode::SUCCESS
        } else {
            self.write_output(output, b"expected module".to_vec());
            OutcomeCode::FAILURE
        }
    }

    unsafe fn cache_module(
        &self,
        module: GoSliceData,
        module_hash: Bytes32,
        version: u16,
        arbos_tag: u32,
        debug: bool,
    ) {
        self.op(format!(
            "cache {} {module_hash} {version} {arbos_tag} {debug}",
            module.len
        ));
    }

    fn evict_module(&self, module_hash: Bytes32, version: u16, arbos_tag: u32, debug: bool) {
        self.op(format!("evict {module_hash} {version} {arbos_tag} {debug}"));
    }

    fn reorg_vm(&self, block: u64, arbos_tag: u32) {
        self.op(format!("reorg {block} {arbos_tag}"));
    }

    fn set_cache_lru_capacity(&self, capacity_bytes: u64) {
        self.lru_capacity.set(Some(capacity_bytes));
    }

    fn clear_lru_cache(&self) {
        self.op("clear_lru".to_string());
    }

    fn clear_long_term_cache(&self) {
        self.op("clear_long_term".to_string());
    }

    unsafe fn entry_size_estimate_bytes(
        &self,
        module: GoSliceData,
        version: u16,
        _debug: bool,
    ) -> u64 {
        module.len as u64 * 16 + version as u64
    }

    unsafe fn cache_metrics(&self, output: *mut CacheMetrics) {
        *output = self.metrics.get();
    }

    unsafe fn free_rust_bytes(&self, bytes: RustBytes) {
        self.frees.set(self.frees.get() + 1);
        drop(bytes.into_vec());
    }

    // Frames are `[dictionary, level]` followed by the input as-is.
    unsafe fn brotli_compress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
        level: u32,
    ) -> BrotliStatus {
        let mut frame = vec![dictionary as u8, level as u8];
        frame.extend_from_slice(std::slice::from_raw_parts(input.ptr, *input.len));
        self.brotli_io(input, output, &frame)
    }

    unsafe fn brotli_decompress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
    ) -> BrotliStatus {
        let frame = std::slice::from_raw_parts(input.ptr, *input.len);
        let plain = match frame {
            [dict, _level, rest @ ..] if *dict == dictionary as u8 => rest.to_vec(),
            _ => {
                self.brotli_calls.borrow_mut().push((frame.to_vec(), *output.len));
                return BrotliStatus::FAILURE;
            }
        };
        self.brotli_io(input, output, &plain)
    }
}

pub fn program() -> Vec<u8> {
    b"\0asm\x01\0\0\0program".to_vec()
}
