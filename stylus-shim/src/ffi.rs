// Symbols provided by the native Stylus library.

use stylus_abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RustBytes, StylusConfig, StylusData,
};

extern "C" {
    pub fn stylus_call(
        module: GoSliceData,
        calldata: GoSliceData,
        config: StylusConfig,
        req_handler: NativeRequestHandler,
        evm_data: EvmData,
        debug: bool,
        output: *mut RustBytes,
        gas: *mut u64,
        arbos_tag: u32,
    ) -> OutcomeCode;

    pub fn stylus_activate(
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
    ) -> OutcomeCode;

    pub fn stylus_compile(
        wasm: GoSliceData,
        version: u16,
        debug: bool,
        target_name: GoSliceData,
        cranelift: bool,
        output: *mut RustBytes,
    ) -> OutcomeCode;

    pub fn stylus_target_set(
        name: GoSliceData,
        description: GoSliceData,
        output: *mut RustBytes,
        native: bool,
    ) -> OutcomeCode;

    pub fn wat_to_wasm(wat: GoSliceData, output: *mut RustBytes) -> OutcomeCode;

    pub fn stylus_cache_module(
        module: GoSliceData,
        module_hash: Bytes32,
        version: u16,
        arbos_tag: u32,
        debug: bool,
    );

    pub fn stylus_evict_module(module_hash: Bytes32, version: u16, arbos_tag: u32, debug: bool);

    pub fn stylus_reorg_vm(block: u64, arbos_tag: u32);

    pub fn stylus_set_cache_lru_capacity(capacity_bytes: u64);

    pub fn stylus_clear_lru_cache();

    pub fn stylus_clear_long_term_cache();

    pub fn stylus_get_entry_size_estimate_bytes(module: GoSliceData, version: u16, debug: bool)
        -> u64;

    pub fn stylus_get_cache_metrics(output: *mut CacheMetrics);

    pub fn free_rust_bytes(bytes: RustBytes);

    pub fn brotli_compress(
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
        level: u32,
    ) -> BrotliStatus;

    pub fn brotli_decompress(
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
    ) -> BrotliStatus;
}
