// stylus-abi/src/slices.rs
//
// Byte views passed by value across the boundary. `GoSliceData` and
// `RustSlice` are borrowed views; `RustBytes` is an engine-owned buffer that
// must be handed back to `free_rust_bytes` exactly once.

use std::mem::ManuallyDrop;
use std::ptr;

/// Borrowed input view (module bytes, calldata, target names, handler responses).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GoSliceData {
    pub ptr: *const u8,
    pub len: usize,
}

impl GoSliceData {
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null(),
            len: 0,
        }
    }

    /// Empty slices are passed as a null pointer with zero length.
    pub fn from_slice(data: &[u8]) -> Self {
        if data.is_empty() {
            return Self::empty();
        }
        Self {
            ptr: data.as_ptr(),
            len: data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_null() || self.len == 0
    }

    /// # Safety
    /// `ptr` must be null or point to `len` readable bytes that outlive `'a`.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.is_empty() {
            return &[];
        }
        std::slice::from_raw_parts(self.ptr, self.len)
    }
}

impl Default for GoSliceData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Request payload view handed to the request handler by the engine.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RustSlice {
    pub ptr: *const u8,
    pub len: usize,
}

impl RustSlice {
    pub fn new(data: &[u8]) -> Self {
        Self {
            ptr: data.as_ptr(),
            len: data.len(),
        }
    }

    /// # Safety
    /// `ptr` must be null or point to `len` readable bytes that outlive `'a`.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.ptr.is_null() || self.len == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.ptr, self.len)
    }
}

/// Output buffer allocated by the engine (a `Vec<u8>` split into raw parts).
#[repr(C)]
#[derive(Debug)]
pub struct RustBytes {
    pub ptr: *mut u8,
    pub len: usize,
    pub cap: usize,
}

impl RustBytes {
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            cap: 0,
        }
    }

    /// Leaks `bytes` into raw parts. Ownership moves to whoever later calls
    /// [`RustBytes::into_vec`].
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let mut bytes = ManuallyDrop::new(bytes);
        Self {
            ptr: bytes.as_mut_ptr(),
            len: bytes.len(),
            cap: bytes.capacity(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_null() || self.len == 0
    }

    /// # Safety
    /// The buffer must still be live (not yet freed).
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.is_empty() {
            return &[];
        }
        std::slice::from_raw_parts(self.ptr, self.len)
    }

    /// # Safety
    /// The parts must come from [`RustBytes::from_vec`] in the same allocator,
    /// and must not be reclaimed twice.
    pub unsafe fn into_vec(self) -> Vec<u8> {
        if self.ptr.is_null() {
            return Vec::new();
        }
        Vec::from_raw_parts(self.ptr, self.len, self.cap)
    }
}

impl Default for RustBytes {
    fn default() -> Self {
        Self::empty()
    }
}
