use stylus_abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RustBytes, StylusConfig, StylusData,
};
use stylus_host::StylusEngine;

use crate::exports;

/// The engine reached through this library's own exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedEngine;

impl StylusEngine for LinkedEngine {
    unsafe fn call(
        &self,
        module: GoSliceData,
        calldata: GoSliceData,
        config: StylusConfig,
        handler: NativeRequestHandler,
        evm_data: EvmData,
        debug: bool,
        output: *mut RustBytes,
        gas: *mut u64,
        arbos_tag: u32,
    ) -> OutcomeCode {
        exports::stylus_call_export(
            module, calldata, config, handler, evm_data, debug, output, gas, arbos_tag,
        )
    }

    unsafe fn activate(
        &self,
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
        exports::stylus_activate_export(
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

    unsafe fn compile(
        &self,
        wasm: GoSliceData,
        version: u16,
        debug: bool,
        target_name: GoSliceData,
        cranelift: bool,
        output: *mut RustBytes,
    ) -> OutcomeCode {
        exports::stylus_compile_export(wasm, version, debug, target_name, cranelift, output)
    }

    unsafe fn target_set(
        &self,
        name: GoSliceData,
        description: GoSliceData,
        output: *mut RustBytes,
        native: bool,
    ) -> OutcomeCode {
        exports::stylus_target_set_export(name, description, output, native)
    }

    unsafe fn wat_to_wasm(&self, wat: GoSliceData, output: *mut RustBytes) -> OutcomeCode {
        exports::wat_to_wasm_export(wat, output)
    }

    unsafe fn cache_module(
        &self,
        module: GoSliceData,
        module_hash: Bytes32,
        version: u16,
        arbos_tag: u32,
        debug: bool,
    ) {
        exports::stylus_cache_module_export(module, module_hash, version, arbos_tag, debug)
    }

    fn evict_module(&self, module_hash: Bytes32, version: u16, arbos_tag: u32, debug: bool) {
        exports::stylus_evict_module_export(module_hash, version, arbos_tag, debug)
    }

    fn reorg_vm(&self, block: u64, arbos_tag: u32) {
        exports::stylus_reorg_vm_export(block, arbos_tag)
    }

    fn set_cache_lru_capacity(&self, capacity_bytes: u64) {
        exports::stylus_set_cache_lru_capacity_export(capacity_bytes)
    }

    fn clear_lru_cache(&self) {
        exports::stylus_clear_lru_cache_export()
    }

    fn clear_long_term_cache(&self) {
        exports::stylus_clear_long_term_cache_export()
    }

    unsafe fn entry_size_estimate_bytes(
        &self,
        module: GoSliceData,
        version: u16,
        debug: bool,
    ) -> u64 {
        exports::stylus_get_entry_size_estimate_bytes_export(module, version, debug)
    }

    unsafe fn free_rust_bytes(&self, bytes: RustBytes) {
        exports::free_rust_bytes_export(bytes)
    }

    unsafe fn cache_metrics(&self, output: *mut CacheMetrics) {
        exports::stylus_get_cache_metrics_export(output)
    }

    unsafe fn brotli_compress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
        level: u32,
    ) -> BrotliStatus {
        exports::brotli_compress_export(input, output, dictionary, level)
    }

    unsafe fn brotli_decompress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
    ) -> BrotliStatus {
        exports::brotli_decompress_export(input, output, dictionary)
    }
}
