use stylus_abi::{
    BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics, EvmData, GoSliceData,
    NativeRequestHandler, OutcomeCode, RustBytes, StylusConfig, StylusData,
};

/// One method per native library entry point, taking raw ABI values.
///
/// Implementations forward to the real engine (see the shim crate's
/// `LinkedEngine`) or stand in for it in tests. Output buffers written by
/// `call`, `activate`, `compile`, `target_set` and `wat_to_wasm` belong to the
/// engine and must come back through `free_rust_bytes`.
///
/// # Safety
/// Every pointer argument must be valid for the duration of the call, and
/// `handler` must stay live until `call` returns.
pub trait StylusEngine {
    #[allow(clippy::too_many_arguments)]
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
    ) -> OutcomeCode;

    #[allow(clippy::too_many_arguments)]
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
    ) -> OutcomeCode;

    unsafe fn compile(
        &self,
        wasm: GoSliceData,
        version: u16,
        debug: bool,
        target_name: GoSliceData,
        cranelift: bool,
        output: *mut RustBytes,
    ) -> OutcomeCode;

    unsafe fn target_set(
        &self,
        name: GoSliceData,
        description: GoSliceData,
        output: *mut RustBytes,
        native: bool,
    ) -> OutcomeCode;

    unsafe fn wat_to_wasm(&self, wat: GoSliceData, output: *mut RustBytes) -> OutcomeCode;

    unsafe fn cache_module(
        &self,
        module: GoSliceData,
        module_hash: Bytes32,
        version: u16,
        arbos_tag: u32,
        debug: bool,
    );

    fn evict_module(&self, module_hash: Bytes32, version: u16, arbos_tag: u32, debug: bool);

    fn reorg_vm(&self, block: u64, arbos_tag: u32);

    fn set_cache_lru_capacity(&self, capacity_bytes: u64);

    fn clear_lru_cache(&self);

    fn clear_long_term_cache(&self);

    unsafe fn entry_size_estimate_bytes(
        &self,
        module: GoSliceData,
        version: u16,
        debug: bool,
    ) -> u64;

    unsafe fn cache_metrics(&self, output: *mut CacheMetrics);

    unsafe fn free_rust_bytes(&self, bytes: RustBytes);

    // ----------------- Brotli -----------------

    /// `output.len` carries the capacity in and the bytes written out.
    unsafe fn brotli_compress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
        level: u32,
    ) -> BrotliStatus;

    unsafe fn brotli_decompress(
        &self,
        input: BrotliBuffer,
        output: BrotliBuffer,
        dictionary: BrotliDictionary,
    ) -> BrotliStatus;
}
