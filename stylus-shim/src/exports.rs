// stylus-shim/src/exports.rs
//
// C entry points of the shim. Each one hands its arguments to the matching
// native symbol and returns whatever comes back, untouched. No logging here.

use stylus_abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RustBytes, StylusConfig, StylusData,
};

use crate::ffi;

/// Runs `module` against `calldata` in the native engine.
///
/// # Safety
/// `module` and `calldata` must be readable for their full length and left
/// untouched until this returns. `output` and `gas` must be valid for writes
/// (`gas` also for reads), and `req_handler` must remain callable for the
/// whole call, including re-entrant use.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn stylus_call_export(
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
    ffi::stylus_call(
        module,
        calldata,
        config,
        req_handler,
        evm_data,
        debug,
        output,
        gas,
        arbos_tag,
    )
}

/// # Safety
/// As for [`stylus_call_export`]; `codehash` must be readable and the
/// remaining out-pointers writable.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn stylus_activate_export(
    wasm: GoSliceData,
    page_limit: u16,
    stylus_version: u16,
    arbos_version_for_gas: u64,
    debug: bool,
    output: *mut RustBytes,
    codehash: *const Bytes32,
    module_hash: *mut Bytes32,
    stylus_data: *mut StylusData,
    gas: *mut u64,
) -> OutcomeCode {
    ffi::stylus_activate(
        wasm,
        page_limit,
        stylus_version,
        arbos_version_for_gas,
        debug,
        output,
        codehash,
        module_hash,
        stylus_data,
        gas,
    )
}

/// # Safety
/// Slices must be readable; `output` must be writable.
#[no_mangle]
pub unsafe extern "C" fn stylus_compile_export(
    wasm: GoSliceData,
    version: u16,
    debug: bool,
    target_name: GoSliceData,
    cranelift: bool,
    output: *mut RustBytes,
) -> OutcomeCode {
    ffi::stylus_compile(wasm, version, debug, target_name, cranelift, output)
}

/// # Safety
/// Slices must be readable; `output` must be writable.
#[no_mangle]
pub unsafe extern "C" fn stylus_target_set_export(
    name: GoSliceData,
    description: GoSliceData,
    output: *mut RustBytes,
    native: bool,
) -> OutcomeCode {
    ffi::stylus_target_set(name, description, output, native)
}

/// # Safety
/// `wat` must be readable; `output` must be writable.
#[no_mangle]
pub unsafe extern "C" fn wat_to_wasm_export(
    wat: GoSliceData,
    output: *mut RustBytes,
) -> OutcomeCode {
    ffi::wat_to_wasm(wat, output)
}

// ----------------- Cache control -----------------

/// # Safety
/// `module` must be readable.
#[no_mangle]
pub unsafe extern "C" fn stylus_cache_module_export(
    module: GoSliceData,
    module_hash: Bytes32,
    version: u16,
    arbos_tag: u32,
    debug: bool,
) {
    ffi::stylus_cache_module(module, module_hash, version, arbos_tag, debug)
}

#[no_mangle]
pub extern "C" fn stylus_evict_module_export(
    module_hash: Bytes32,
    version: u16,
    arbos_tag: u32,
    debug: bool,
) {
    unsafe { ffi::stylus_evict_module(module_hash, version, arbos_tag, debug) }
}

#[no_mangle]
pub extern "C" fn stylus_reorg_vm_export(block: u64, arbos_tag: u32) {
    unsafe { ffi::stylus_reorg_vm(block, arbos_tag) }
}

#[no_mangle]
pub extern "C" fn stylus_set_cache_lru_capacity_export(capacity_bytes: u64) {
    unsafe { ffi::stylus_set_cache_lru_capacity(capacity_bytes) }
}

#[no_mangle]
pub extern "C" fn stylus_clear_lru_cache_export() {
    unsafe { ffi::stylus_clear_lru_cache() }
}

#[no_mangle]
pub extern "C" fn stylus_clear_long_term_cache_export() {
    unsafe { ffi::stylus_clear_long_term_cache() }
}

/// # Safety
/// `module` must be readable.
#[no_mangle]
pub unsafe extern "C" fn stylus_get_entry_size_estimate_bytes_export(
    module: GoSliceData,
    version: u16,
    debug: bool,
) -> u64 {
    ffi::stylus_get_entry_size_estimate_bytes(module, version, debug)
}

/// # Safety
/// `output` must be writable.
#[no_mangle]
pub unsafe extern "C" fn stylus_get_cache_metrics_export(output: *mut CacheMetrics) {
    ffi::stylus_get_cache_metrics(output)
}

/// # Safety
/// `bytes` must come from the engine and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn free_rust_bytes_export(bytes: RustBytes) {
    ffi::free_rust_bytes(bytes)
}

/// # Safety
/// Both buffers must be valid for their `len`. `output.len` is overwritten
/// with the number of bytes written.
#[no_mangle]
pub unsafe extern "C" fn brotli_compress_export(
    input: BrotliBuffer,
    output: BrotliBuffer,
    dictionary: BrotliDictionary,
    level: u32,
) -> BrotliStatus {
    ffi::brotli_compress(input, output, dictionary, level)
}

/// # Safety
/// Same contract as [`brotli_compress_export`].
#[no_mangle]
pub unsafe extern "C" fn brotli_decompress_export(
    input: BrotliBuffer,
    output: BrotliBuffer,
    dictionary: BrotliDictionary,
) -> BrotliStatus {
    ffi::brotli_decompress(input, output, dictionary)
}
