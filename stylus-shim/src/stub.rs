// Test-only engine. Defines the native symbols so the shim links without
// libstylus; each thread gets its own scripted state.

use std::cell::RefCell;
use std::collections::VecDeque;

use stylus_abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RawResponse, RustBytes, StylusConfig, StylusData,
};

pub(crate) const ACTIVATION_GAS: u64 = 1_000;
pub(crate) const ACTIVATION_INFO: StylusData = StylusData {
    init_cost: 21,
    cached_init_cost: 9,
    footprint: 2,
    asm_estimate: 8192,
};

#[derive(Debug, Clone)]
pub(crate) struct Script {
    pub status: OutcomeCode,
    pub output: Vec<u8>,
    pub gas_left: u64,
    pub requests: Vec<(u32, Vec<u8>)>,
    pub echo_last_response: bool,
}

impl Script {
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

#[derive(Debug, Clone)]
pub(crate) struct SeenCall {
    pub module: Vec<u8>,
    pub calldata: Vec<u8>,
    pub module_ptr: *const u8,
    pub calldata_ptr: *const u8,
    pub config: StylusConfig,
    pub handler_fptr: usize,
    pub handler_id: usize,
    pub evm_data: EvmData,
    pub debug: bool,
    pub gas_in: u64,
    pub arbos_tag: u32,
    // Input bytes differed between entry and exit.
    pub mutated: bool,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub scripts: VecDeque<Script>,
    pub calls: Vec<SeenCall>,
    pub responses: Vec<RawResponse>,
    pub allocs: usize,
    pub frees: usize,
    pub activate_status: Option<OutcomeCode>,
    pub seen_code_hash: Option<Bytes32>,
    pub failing_target: Option<String>,
    pub targets: Vec<(String, String, bool)>,
    pub lru_capacity: Option<u64>,
    pub ops: Vec<String>,
    pub metrics: CacheMetrics,
    pub brotli_inputs: Vec<Vec<u8>>,
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::default());
}

/// Borrow the current thread's state. Never call into a handler from `f`.
pub(crate) fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

pub(crate) fn reset() {
    with_state(|s| *s = State::default());
}

pub(crate) fn push_script(script: Script) {
    with_state(|s| s.scripts.push_back(script));
}

unsafe fn write_output(output: *mut RustBytes, bytes: Vec<u8>) {
    with_state(|s| s.allocs += 1);
    *output = RustBytes::from_vec(bytes);
}

unsafe fn brotli_input(buffer: BrotliBuffer) -> Vec<u8> {
    let bytes = std::slice::from_raw_parts(buffer.ptr, *buffer.len).to_vec();
    with_state(|s| s.brotli_inputs.push(bytes.clone()));
    bytes
}

/// Copies `bytes` into `output` if they fit, leaving `len` untouched otherwise.
unsafe fn brotli_output(output: BrotliBuffer, bytes: &[u8]) -> BrotliStatus {
    if bytes.len() > *output.len {
        return BrotliStatus::FAILURE;
    }
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), output.ptr, bytes.len());
    *output.len = bytes.len();
    BrotliStatus::SUCCESS
}

fn text(slice: GoSliceData) -> String {
    String::from_utf8_lossy(unsafe { slice.as_slice() }).into_owned()
}

// ----------------- Symbols -----------------

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn stylus_call(
    module: GoSliceData,
    calldata: GoSliceData,
    config: StylusConfig,
    req_handler: NativeRequestHandler,
    evm_data: EvmData,
    debug: bool,
    output: *mut RustBytes,
    gas: *mut u64,
    arbos_tag: u32,
) -> OutcomeCode {
    let gas_in = *gas;
    let seen = SeenCall {
        module: module.as_slice().to_vec(),
        calldata: calldata.as_slice().to_vec(),
        module_ptr: module.ptr,
        calldata_ptr: calldata.ptr,
        config,
        handler_fptr: req_handler.fptr_addr(),
        handler_id: req_handler.id,
        evm_data,
        debug,
        gas_in,
        arbos_tag,
        mutated: false,
    };
    let (index, script) = with_state(|s| {
        s.calls.push(seen);
        (s.calls.len() - 1, s.scripts.pop_front())
    });
    let script = script.unwrap_or_else(|| Script::finish(OutcomeCode::SUCCESS, &[], gas_in));

    let mut last = Vec::new();
    for (req_type, input) in &script.requests {
        let response = req_handler.request(*req_type, input);
        last = response.result.clone();
        with_state(|s| s.responses.push(response));
    }

    let (module_now, calldata_now) = (module.as_slice(), calldata.as_slice());
    with_state(|s| {
        if let Some(call) = s.calls.get_mut(index) {
            call.mutated = module_now != call.module.as_slice()
                || calldata_now != call.calldata.as_slice();
        }
    });

    let bytes = if script.echo_last_response {
        last
    } else {
        script.output
    };
    write_output(output, bytes);
    *gas = script.gas_left;
    script.status
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn stylus_activate(
    wasm: GoSliceData,
    _page_limit: u16,
    _stylus_version: u16,
    _arbos_version_for_gas: u64,
    _debug: bool,
    output: *mut RustBytes,
    codehash: *const Bytes32,
    module_hash: *mut Bytes32,
    stylus_data: *mut StylusData,
    gas: *mut u64,
) -> OutcomeCode {
    *gas = (*gas).saturating_sub(ACTIVATION_GAS);
    let code_hash = *codehash;
    let rejected = with_state(|s| {
        s.seen_code_hash = Some(code_hash);
        s.activate_status
    });
    if let Some(status) = rejected {
        write_output(output, b"activation rejected".to_vec());
        return status;
    }
    let mut hash = code_hash.0;
    hash.reverse();
    *module_hash = Bytes32(hash);
    *stylus_data = ACTIVATION_INFO;
    write_output(output, wasm.as_slice().to_vec());
    OutcomeCode::SUCCESS
}

#[no_mangle]
pub unsafe extern "C" fn stylus_compile(
    wasm: GoSliceData,
    version: u16,
    _debug: bool,
    target_name: GoSliceData,
    _cranelift: bool,
    output: *mut RustBytes,
) -> OutcomeCode {
    let mut asm = text(target_name).into_bytes();
    asm.extend_from_slice(wasm.as_slice());
    asm.push(version as u8);
    write_output(output, asm);
    OutcomeCode::SUCCESS
}

#[no_mangle]
pub unsafe extern "C" fn stylus_target_set(
    name: GoSliceData,
    description: GoSliceData,
    output: *mut RustBytes,
    native: bool,
) -> OutcomeCode {
    let name = text(name);
    let description = text(description);
    let failing = with_state(|s| s.failing_target.as_deref() == Some(name.as_str()));
    if failing {
        write_output(output, format!("cannot register {name}").into_bytes());
        return OutcomeCode::FAILURE;
    }
    with_state(|s| s.targets.push((name, description, native)));
    write_output(output, Vec::new());
    OutcomeCode::SUCCESS
}

#[no_mangle]
pub unsafe extern "C" fn wat_to_wasm(wat: GoSliceData, output: *mut RustBytes) -> OutcomeCode {
    if wat.as_slice().starts_with(b"(module") {
        write_output(output, b"\0asm\x01\0\0\0".to_vec());
        OutcomeCode::SUCCESS
    } else {
        write_output(output, b"expected module".to_vec());
        OutcomeCode::FAILURE
    }
}

#[no_mangle]
pub unsafe extern "C" fn stylus_cache_module(
    module: GoSliceData,
    module_hash: Bytes32,
    version: u16,
    arbos_tag: u32,
    debug: bool,
) {
    let len = module.len;
    with_state(|s| {
        s.ops
            .push(format!("cache {len} {module_hash} {version} {arbos_tag} {debug}"))
    });
}

#[no_mangle]
pub extern "C" fn stylus_evict_module(
    module_hash: Bytes32,
    version: u16,
    arbos_tag: u32,
    debug: bool,
) {
    with_state(|s| {
        s.ops
            .push(format!("evict {module_hash} {version} {arbos_tag} {debug}"))
    });
}

#[no_mangle]
pub extern "C" fn stylus_reorg_vm(block: u64, arbos_tag: u32) {
    with_state(|s| s.ops.push(format!("reorg {block} {arbos_tag}")));
}

#[no_mangle]
pub extern "C" fn stylus_set_cache_lru_capacity(capacity_bytes: u64) {
    with_state(|s| s.lru_capacity = Some(capacity_bytes));
}

#[no_mangle]
pub extern "C" fn stylus_clear_lru_cache() {
    with_state(|s| s.ops.push("clear_lru".to_string()));
}

#[no_mangle]
pub extern "C" fn stylus_clear_long_term_cache() {
    with_state(|s| s.ops.push("clear_long_term".to_string()));
}

#[no_mangle]
pub unsafe extern "C" fn stylus_get_entry_size_estimate_bytes(
    module: GoSliceData,
    version: u16,
    _debug: bool,
) -> u64 {
    module.len as u64 * 16 + version as u64
}

#[no_mangle]
pub unsafe extern "C" fn stylus_get_cache_metrics(output: *mut CacheMetrics) {
    *output = with_state(|s| s.metrics);
}

// Stand-in codec: a `[dictionary, level]` header, then the input reversed.

#[no_mangle]
pub unsafe extern "C" fn brotli_compress(
    input: BrotliBuffer,
    output: BrotliBuffer,
    dictionary: BrotliDictionary,
    level: u32,
) -> BrotliStatus {
    let mut frame = vec![dictionary as u8, level as u8];
    frame.extend(brotli_input(input).into_iter().rev());
    brotli_output(output, &frame)
}

#[no_mangle]
pub unsafe extern "C" fn brotli_decompress(
    input: BrotliBuffer,
    output: BrotliBuffer,
    dictionary: BrotliDictionary,
) -> BrotliStatus {
    let frame = brotli_input(input);
    match frame.split_first() {
        Some((&dict, rest)) if dict == dictionary as u8 && !rest.is_empty() => {
            let plain: Vec<u8> = rest[1..].iter().rev().copied().collect();
            brotli_output(output, &plain)
        }
        _ => BrotliStatus::FAILURE,
    }
}

#[no_mangle]
pub unsafe extern "C" fn free_rust_bytes(bytes: RustBytes) {
    with_state(|s| s.frees += 1);
    drop(bytes.into_vec());
}
