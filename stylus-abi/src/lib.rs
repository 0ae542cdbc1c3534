// Value types that cross the Stylus execution boundary.
//
// Every struct here is `#[repr(C)]` and mirrors the native library's layout
// field for field. Nothing in this crate calls into the engine.

pub mod brotli;
pub mod bytes;
pub mod cache;
pub mod evm;
pub mod outcome;
pub mod params;
pub mod request;
pub mod slices;
pub mod targets;

pub use brotli::{
    compressed_buffer_size, BrotliBuffer, BrotliDictionary, BrotliStatus, BROTLI_LEVEL_WELL,
    BROTLI_WINDOW_SIZE,
};
pub use bytes::{Bytes20, Bytes32, BytesError};
pub use cache::{CacheMetrics, LongTermCacheMetrics, LruCacheMetrics};
pub use evm::{EvmData, StylusData};
pub use outcome::{OutcomeCode, UnknownOutcome, UserOutcomeKind};
pub use params::{PricingParams, StylusConfig};
pub use request::{
    EvmApiMethod, EvmApiStatus, HandleRequestFn, NativeRequestHandler, RawResponse,
    EVM_API_METHOD_REQ_OFFSET,
};
pub use slices::{GoSliceData, RustBytes, RustSlice};
pub use targets::TargetError;
