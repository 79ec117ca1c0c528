//! LRU cache over a preallocated slot list

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::list::{SlotId, SlotIter, SlotList};
use crate::stats::CacheStats;

/// Index value: where the key lives in the list, plus its value
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<V> {
    slot: SlotId,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// Recency is tracked by a circular list of `capacity + 1` slots allocated at
/// construction, and keys are found through a hash index mapping each key to
/// its slot. `set`, `get` and eviction are O(1) and never allocate list nodes.
///
/// `get` is a mutating read: a hit makes the entry the most recently used.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    list: SlotList<K>,
    map: HashMap<K, Entry<V>, RandomState>,
    len: u32,
    stats: CacheStats,
    track_stats: bool,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` if `capacity` is 0
    /// * `Error::CapacityTooLarge` if `capacity` exceeds `MAX_CAPACITY`
    pub fn new(capacity: u32) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a cache from explicit settings
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            capacity = config.capacity,
            track_stats = config.track_stats,
            "allocating lru slot list"
        );

        Ok(Self {
            list: SlotList::new(config.capacity),
            map: HashMap::with_capacity_and_hasher(config.capacity as usize, RandomState::new()),
            len: 0,
            stats: CacheStats::new(),
            track_stats: config.track_stats,
        })
    }

    /// Insert or overwrite `key`, making it the most recently used entry.
    ///
    /// A new key on a full cache reuses the slot of the least recently used
    /// entry, which is dropped.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(entry) = self.map.get_mut(&key) {
            entry.value = value;
            self.list.touch(entry.slot);
            if self.track_stats {
                self.stats.record_update();
            }
            return;
        }

        let evicted = if self.is_full() {
            self.list.replace_last(key.clone())
        } else {
            None
        };

        let slot = match evicted {
            Some((slot, old_key)) => {
                self.map.remove(&old_key);
                trace!(slot = slot.0, "evicted least recently used entry");
                if self.track_stats {
                    self.stats.record_eviction();
                }
                slot
            }
            None => {
                self.len += 1;
                let slot = SlotId(self.len);
                self.list.insert_after_sentinel(slot, key.clone());
                slot
            }
        };

        self.map.insert(key, Entry { slot, value });
        if self.track_stats {
            self.stats.record_insert();
        }
    }

    /// Look up `key`, making it the most recently used entry on a hit
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(key) {
            Some(entry) => {
                self.list.touch(entry.slot);
                if self.track_stats {
                    self.stats.record_hit();
                }
                Some(&entry.value)
            }
            None => {
                if self.track_stats {
                    self.stats.record_miss();
                }
                None
            }
        }
    }

    /// Copy every live entry out without changing recency order
    pub fn get_all(&self) -> HashMap<K, V, RandomState>
    where
        V: Clone,
    {
        self.map
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    /// Look up `key` without touching it
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Check whether `key` is cached, without touching it
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// The entry the next new key would evict once the cache is full
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.list.key(self.list.tail()?)?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }

    /// Drop every entry. The slot list stays allocated; stats are kept.
    pub fn clear(&mut self) {
        debug!(dropped = self.len, "clearing lru cache");
        self.map.clear();
        self.list.clear();
        self.len = 0;
    }
}

impl<K, V> LruCache<K, V> {
    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.list.capacity() as usize
    }

    /// Whether the next new key evicts an entry
    pub fn is_full(&self) -> bool {
        self.len == self.list.capacity()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset cache statistics
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Iterate entries from most to least recently used.
    ///
    /// Iteration does not touch entries. Use `.rev()` for oldest first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.list.iter(),
            list: &self.list,
            map: &self.map,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Recency-ordered iterator returned by [`LruCache::iter`]
pub struct Iter<'a, K, V> {
    slots: SlotIter<'a, K>,
    list: &'a SlotList<K>,
    map: &'a HashMap<K, Entry<V>, RandomState>,
}

impl<'a, K, V> Iter<'a, K, V>
where
    K: Hash + Eq,
{
    fn resolve(&self, id: SlotId) -> Option<(&'a K, &'a V)> {
        let key = self.list.key(id)?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.slots.next()?;
        self.resolve(id)
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V>
where
    K: Hash + Eq,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.slots.next_back()?;
        self.resolve(id)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> where K: Hash + Eq {}
