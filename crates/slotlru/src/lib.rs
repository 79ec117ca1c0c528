//! # slotlru
//!
//! Fixed-capacity LRU cache backed by a preallocated slot list.
//!
//! ## Architecture
//! - **Slot list**: `capacity + 1` slots allocated once; slot 0 is a sentinel
//!   anchoring a circular doubly-linked list in recency order
//! - **Index**: AHash map from key to slot and value (O(1))
//! - **Eviction**: the sentinel's `prev` slot is reused in place for the new key
//!
//! ```
//! use slotlru::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get("a");
//! cache.set("c", 3);
//!
//! assert!(cache.contains("a"));
//! assert!(!cache.contains("b"));
//! # Ok::<(), slotlru::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod list;
mod stats;

pub use ahash::RandomState;
pub use cache::{Iter, LruCache};
pub use config::{CacheConfig, DEFAULT_CAPACITY, MAX_CAPACITY};
pub use error::{Error, Result};
pub use stats::CacheStats;
