// stylus-host/src/handler.rs
//
// The engine re-enters the host through a C function pointer plus an opaque
// `id`. Here `id` is the address of a per-call `HandlerContext`, so every
// request lands on the exact `EvmApi` borrowed by that call. No registry.

use std::panic::{self, AssertUnwindSafe};

use stylus_abi::{EvmApiMethod, GoSliceData, NativeRequestHandler, RustSlice};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvmApiResponse {
    pub result: Vec<u8>,
    pub raw_data: Vec<u8>,
    pub gas_cost: u64,
}

impl EvmApiResponse {
    pub fn new(result: Vec<u8>, raw_data: Vec<u8>, gas_cost: u64) -> Self {
        Self {
            result,
            raw_data,
            gas_cost,
        }
    }
}

/// Host services the engine may request during a call. May be re-entered
/// any number of times per call, always on the calling thread.
pub trait EvmApi {
    fn handle(&mut self, method: EvmApiMethod, input: &[u8]) -> EvmApiResponse;
}

impl<F> EvmApi for F
where
    F: FnMut(EvmApiMethod, &[u8]) -> EvmApiResponse,
{
    fn handle(&mut self, method: EvmApiMethod, input: &[u8]) -> EvmApiResponse {
        self(method, input)
    }
}

pub(crate) struct HandlerContext<'a> {
    api: &'a mut dyn EvmApi,
    // Response buffers must outlive the trampoline: the engine reads them
    // after we return. Dropped once the engine call completes.
    arena: Vec<Vec<u8>>,
    requests: usize,
}

impl<'a> HandlerContext<'a> {
    pub(crate) fn new(api: &'a mut dyn EvmApi) -> Self {
        Self {
            api,
            arena: Vec::new(),
            requests: 0,
        }
    }

    /// The context must not move or be touched until the engine call that
    /// receives this handler has returned.
    pub(crate) fn native_handler(&mut self) -> NativeRequestHandler {
        let ctx: *mut HandlerContext<'a> = self;
        NativeRequestHandler {
            handle_request_fptr: handle_request_trampoline,
            id: ctx as usize,
        }
    }

    pub(crate) fn requests(&self) -> usize {
        self.requests
    }

    fn dispatch(&mut self, req_type: u32, input: &[u8]) -> EvmApiResponse {
        self.requests += 1;
        match EvmApiMethod::from_request_type(req_type) {
            Some(method) => self.api.handle(method, input),
            None => {
                tracing::warn!(req_type, "unknown stylus request type; answering empty");
                EvmApiResponse::default()
            }
        }
    }

    fn retain(&mut self, bytes: Vec<u8>) -> GoSliceData {
        if bytes.is_empty() {
            return GoSliceData::empty();
        }
        self.arena.push(bytes);
        let kept = &self.arena[self.arena.len() - 1];
        GoSliceData::from_slice(kept)
    }
}

unsafe extern "C" fn handle_request_trampoline(
    id: usize,
    req_type: u32,
    data: *mut RustSlice,
    gas_cost: *mut u64,
    result: *mut GoSliceData,
    raw_data: *mut GoSliceData,
) {
    let ctx = &mut *(id as *mut HandlerContext<'_>);
    let input = if data.is_null() {
        &[][..]
    } else {
        (*data).as_slice()
    };

    let response = match panic::catch_unwind(AssertUnwindSafe(|| ctx.dispatch(req_type, input))) {
        Ok(response) => response,
        Err(_) => {
            // Unwinding into the engine is undefined; fail fast instead.
            tracing::error!(req_type, "stylus request handler panicked; aborting");
            std::process::abort();
        }
    };

    *gas_cost = response.gas_cost;
    *result = ctx.retain(response.result);
    *raw_data = ctx.retain(response.raw_data);
}
