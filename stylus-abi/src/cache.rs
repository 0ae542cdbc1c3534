use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LruCacheMetrics {
    pub count: u32,
    pub size_bytes: u64,
    pub hits: u32,
    pub misses: u32,
    pub does_not_fit: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LongTermCacheMetrics {
    pub count: u32,
    pub size_bytes: u64,
    pub hits: u32,
    pub misses: u32,
}

/// Snapshot written by `stylus_get_cache_metrics`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheMetrics {
    pub lru: LruCacheMetrics,
    pub long_term: LongTermCacheMetrics,
}
