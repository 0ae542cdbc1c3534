// stylus-abi/src/brotli.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// In/out buffer for the engine's brotli entry points. `len` holds the
/// buffer capacity on the way in and the bytes written on the way out.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BrotliBuffer {
    pub ptr: *mut u8,
    pub len: *mut usize,
}

/// Status word returned by `brotli_compress` / `brotli_decompress`. Kept
/// transparent so an unexpected value is reported instead of trusted.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BrotliStatus(pub u32);

impl BrotliStatus {
    pub const FAILURE: Self = Self(0);
    pub const SUCCESS: Self = Self(1);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl fmt::Display for BrotliStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SUCCESS => f.write_str("success"),
            Self::FAILURE => f.write_str("failure"),
            Self(other) => write!(f, "unknown({other})"),
        }
    }
}

/// Preset dictionary shared by compressor and decompressor.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrotliDictionary {
    #[default]
    Empty = 0,
    StylusProgram = 1,
}

impl TryFrom<u32> for BrotliDictionary {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BrotliDictionary::Empty),
            1 => Ok(BrotliDictionary::StylusProgram),
            other => Err(other),
        }
    }
}

/// Quality used for on-chain data (arbcompress `LEVEL_WELL`).
pub const BROTLI_LEVEL_WELL: u32 = 11;
/// Default window, log2 bytes.
pub const BROTLI_WINDOW_SIZE: u32 = 22;

/// Worst-case compressed size for `input_len` bytes.
pub const fn compressed_buffer_size(input_len: usize) -> usize {
    input_len + (input_len >> 10) * 8 + 64
}
