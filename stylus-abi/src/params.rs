use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingParams {
    /// Price of ink in gas-basis points.
    pub ink_price: u32,
}

/// Per-call engine tuning, copied by value into every `stylus_call`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StylusConfig {
    pub version: u16,
    pub max_depth: u32,
    pub pricing: PricingParams,
}

impl StylusConfig {
    pub fn new(version: u16, max_depth: u32, ink_price: u32) -> Self {
        Self {
            version,
            max_depth,
            pricing: PricingParams { ink_price },
        }
    }
}
