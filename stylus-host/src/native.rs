// stylus-host/src/native.rs

use stylus_abi::{
    compressed_buffer_size, BrotliBuffer, BrotliDictionary, BrotliStatus, Bytes32, CacheMetrics,
    EvmData, GoSliceData, OutcomeCode, RustBytes, StylusConfig, StylusData, UserOutcomeKind,
};

use crate::engine::StylusEngine;
use crate::error::BridgeError;
use crate::handler::{EvmApi, HandlerContext};

// ----------------- Results -----------------

/// Outcome of one engine operation: the raw status, a message for non-success
/// codes, and whatever value the operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeResult<T> {
    pub status: OutcomeCode,
    pub error: String,
    pub value: Option<T>,
}

impl<T> NativeResult<T> {
    pub fn success(value: T) -> Self {
        Self {
            status: OutcomeCode::SUCCESS,
            error: String::new(),
            value: Some(value),
        }
    }

    pub fn failure(status: OutcomeCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            value: None,
        }
    }

    pub fn failure_with(status: OutcomeCode, error: impl Into<String>, value: T) -> Self {
        Self {
            status,
            error: error.into(),
            value: Some(value),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn kind(&self) -> Option<UserOutcomeKind> {
        self.status.kind()
    }

    pub fn into_result(self) -> Result<T, BridgeError> {
        match self.value {
            Some(value) if self.status.is_success() => Ok(value),
            _ => Err(BridgeError::Engine {
                status: self.status,
                message: self.error,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateResult {
    pub module_hash: Bytes32,
    pub activation_info: StylusData,
    pub wavm_module: Vec<u8>,
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn classify_call(status: OutcomeCode, output: Vec<u8>) -> NativeResult<Vec<u8>> {
    match status.kind() {
        Some(UserOutcomeKind::Success) => NativeResult::success(output),
        Some(UserOutcomeKind::Revert) => NativeResult::failure_with(status, lossy(&output), output),
        Some(UserOutcomeKind::Failure) => NativeResult::failure(status, lossy(&output)),
        Some(UserOutcomeKind::OutOfInk) => NativeResult::failure(status, "out of gas"),
        Some(UserOutcomeKind::OutOfStack) => {
            NativeResult::failure(status, "max call depth exceeded")
        }
        None => NativeResult::failure_with(status, "Unknown error during Stylus call", output),
    }
}

/// The engine rejects zero-length brotli input; a single zero byte stands in.
fn non_empty(input: &[u8]) -> &[u8] {
    if input.is_empty() {
        &[0]
    } else {
        input
    }
}

fn bytes_or_message(status: OutcomeCode, output: Vec<u8>) -> NativeResult<Vec<u8>> {
    if status.is_success() {
        NativeResult::success(output)
    } else {
        NativeResult::failure(status, lossy(&output))
    }
}

// ----------------- API -----------------

/// Typed front door to a [`StylusEngine`].
///
/// Borrowed inputs are turned into byte views, engine-owned output buffers
/// are copied out and released exactly once, and outcome codes are mapped to
/// [`NativeResult`]s.
#[derive(Debug, Clone, Default)]
pub struct StylusNative<E> {
    engine: E,
}

impl<E: StylusEngine> StylusNative<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs a program. `gas` is read as the budget and overwritten with
    /// whatever the engine leaves in it.
    #[allow(clippy::too_many_arguments)]
    pub fn call(
        &self,
        module: &[u8],
        calldata: &[u8],
        config: StylusConfig,
        api: &mut dyn EvmApi,
        evm_data: EvmData,
        debug: bool,
        arbos_tag: u32,
        gas: &mut u64,
    ) -> NativeResult<Vec<u8>> {
        let gas_before = *gas;
        let mut ctx = HandlerContext::new(api);
        let handler = ctx.native_handler();
        let mut output = RustBytes::empty();

        let status = unsafe {
            self.engine.call(
                GoSliceData::from_slice(module),
                GoSliceData::from_slice(calldata),
                config,
                handler,
                evm_data,
                debug,
                &mut output,
                gas,
                arbos_tag,
            )
        };
        let requests = ctx.requests();
        drop(ctx);

        let output = self.read_and_free(output);
        tracing::trace!(
            module_len = module.len(),
            calldata_len = calldata.len(),
            requests,
            gas_before,
            gas_left = *gas,
            %status,
            "stylus call returned"
        );
        classify_call(status, output)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn activate(
        &self,
        wasm: &[u8],
        page_limit: u16,
        stylus_version: u16,
        arbos_version_for_gas: u64,
        debug: bool,
        code_hash: Bytes32,
        gas: &mut u64,
    ) -> NativeResult<ActivateResult> {
        let mut output = RustBytes::empty();
        let mut module_hash = Bytes32::default();
        let mut stylus_data = StylusData::default();

        let status = unsafe {
            self.engine.activate(
                GoSliceData::from_slice(wasm),
                page_limit,
                stylus_version,
                arbos_version_for_gas,
                debug,
                &mut output,
                &code_hash,
                &mut module_hash,
                &mut stylus_data,
                gas,
            )
        };
        let output = self.read_and_free(output);
        tracing::debug!(
            wasm_len = wasm.len(),
            %status,
            gas_left = *gas,
            "stylus activation returned"
        );

        if !status.is_success() {
            return NativeResult::failure(status, lossy(&output));
        }
        NativeResult::success(ActivateResult {
            module_hash,
            activation_info: stylus_data,
            wavm_module: output,
        })
    }

    pub fn compile(
        &self,
        wasm: &[u8],
        version: u16,
        debug: bool,
        target_name: &str,
        cranelift: bool,
    ) -> NativeResult<Vec<u8>> {
        let mut output = RustBytes::empty();
        let status = unsafe {
            self.engine.compile(
                GoSliceData::from_slice(wasm),
                version,
                debug,
                GoSliceData::from_slice(target_name.as_bytes()),
                cranelift,
                &mut output,
            )
        };
        bytes_or_message(status, self.read_and_free(output))
    }

    pub fn set_target(&self, name: &str, descriptor: &str, native: bool) -> NativeResult<Vec<u8>> {
        let mut output = RustBytes::empty();
        let status = unsafe {
            self.engine.target_set(
                GoSliceData::from_slice(name.as_bytes()),
                GoSliceData::from_slice(descriptor.as_bytes()),
                &mut output,
                native,
            )
        };
        bytes_or_message(status, self.read_and_free(output))
    }

    pub fn wat_to_wasm(&self, wat: &[u8]) -> NativeResult<Vec<u8>> {
        let mut output = RustBytes::empty();
        let status = unsafe {
            self.engine
                .wat_to_wasm(GoSliceData::from_slice(wat), &mut output)
        };
        bytes_or_message(status, self.read_and_free(output))
    }

    // ----------------- Cache control -----------------

    pub fn cache_module(
        &self,
        module: &[u8],
        module_hash: Bytes32,
        version: u16,
        arbos_tag: u32,
        debug: bool,
    ) {
        unsafe {
            self.engine.cache_module(
                GoSliceData::from_slice(module),
                module_hash,
                version,
                arbos_tag,
                debug,
            )
        }
    }

    pub fn evict_module(&self, module_hash: Bytes32, version: u16, arbos_tag: u32, debug: bool) {
        self.engine
            .evict_module(module_hash, version, arbos_tag, debug)
    }

    pub fn reorg_vm(&self, block: u64, arbos_tag: u32) {
        self.engine.reorg_vm(block, arbos_tag)
    }

    pub fn set_cache_lru_capacity(&self, capacity_bytes: u64) {
        self.engine.set_cache_lru_capacity(capacity_bytes)
    }

    pub fn clear_lru_cache(&self) {
        self.engine.clear_lru_cache()
    }

    pub fn clear_long_term_cache(&self) {
        self.engine.clear_long_term_cache()
    }

    pub fn entry_size_estimate(&self, module: &[u8], version: u16, debug: bool) -> u64 {
        unsafe {
            self.engine
                .entry_size_estimate_bytes(GoSliceData::from_slice(module), version, debug)
        }
    }

    pub fn cache_metrics(&self) -> CacheMetrics {
        let mut metrics = CacheMetrics::default();
        unsafe { self.engine.cache_metrics(&mut metrics) };
        metrics
    }

    // ----------------- Brotli -----------------

    /// Compresses into a caller buffer. Returns the status and the byte count
    /// the engine reported; on failure the count is not meaningful.
    pub fn brotli_compress_into(
        &self,
        input: &[u8],
        output: &mut [u8],
        level: u32,
        dictionary: BrotliDictionary,
    ) -> (BrotliStatus, usize) {
        let input = non_empty(input);
        let mut input_len = input.len();
        let mut output_len = output.len();
        let status = unsafe {
            self.engine.brotli_compress(
                BrotliBuffer {
                    ptr: input.as_ptr() as *mut u8,
                    len: &mut input_len,
                },
                BrotliBuffer {
                    ptr: output.as_mut_ptr(),
                    len: &mut output_len,
                },
                dictionary,
                level,
            )
        };
        (status, output_len)
    }

    pub fn brotli_decompress_into(
        &self,
        input: &[u8],
        output: &mut [u8],
        dictionary: BrotliDictionary,
    ) -> (BrotliStatus, usize) {
        let input = non_empty(input);
        let mut input_len = input.len();
        let mut output_len = output.len();
        let status = unsafe {
            self.engine.brotli_decompress(
                BrotliBuffer {
                    ptr: input.as_ptr() as *mut u8,
                    len: &mut input_len,
                },
                BrotliBuffer {
                    ptr: output.as_mut_ptr(),
                    len: &mut output_len,
                },
                dictionary,
            )
        };
        (status, output_len)
    }

    /// Compresses into a buffer sized by [`compressed_buffer_size`].
    pub fn brotli_compress(
        &self,
        input: &[u8],
        level: u32,
        dictionary: BrotliDictionary,
    ) -> Result<Vec<u8>, BridgeError> {
        let mut output = vec![0u8; compressed_buffer_size(non_empty(input).len())];
        let (status, written) = self.brotli_compress_into(input, &mut output, level, dictionary);
        if !status.is_success() {
            return Err(BridgeError::Brotli {
                operation: "compress",
                status,
            });
        }
        output.truncate(written);
        Ok(output)
    }

    /// Decompresses at most `max_size` bytes.
    pub fn brotli_decompress(
        &self,
        input: &[u8],
        max_size: usize,
        dictionary: BrotliDictionary,
    ) -> Result<Vec<u8>, BridgeError> {
        let mut output = vec![0u8; max_size];
        let (status, written) = self.brotli_decompress_into(input, &mut output, dictionary);
        if !status.is_success() {
            return Err(BridgeError::Brotli {
                operation: "decompress",
                status,
            });
        }
        output.truncate(written);
        Ok(output)
    }

    /// Copies the buffer out and hands it back to the engine, empty or not.
    fn read_and_free(&self, output: RustBytes) -> Vec<u8> {
        let bytes = unsafe { output.as_slice() }.to_vec();
        unsafe { self.engine.free_rust_bytes(output) };
        bytes
    }
}
