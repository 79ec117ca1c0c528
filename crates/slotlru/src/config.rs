//! Cache construction settings

use crate::error::{Error, Result};

/// Largest accepted capacity; slot ids `0..=capacity` must fit a `u32`
pub const MAX_CAPACITY: u32 = u32::MAX - 1;

/// Default capacity used by [`CacheConfig::default`]
pub const DEFAULT_CAPACITY: u32 = 1024;

/// Settings fixed at cache construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entry slots (the sentinel is extra)
    pub capacity: u32,

    /// Record hit/miss/eviction counters
    pub track_stats: bool,
}

impl CacheConfig {
    /// Create a config for the given capacity with stats enabled
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Enable or disable statistics collection
    pub fn with_stats(mut self, track_stats: bool) -> Self {
        self.track_stats = track_stats;
        self
    }

    /// Check that the capacity can back a slot list
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge(u64::from(self.capacity)));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            track_stats: true,
        }
    }
}
