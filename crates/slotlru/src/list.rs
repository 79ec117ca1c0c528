//! Slot-indexed circular doubly-linked list
//!
//! All slots are allocated up front. Slot 0 is a sentinel that anchors the
//! ring: `sentinel.next` is the most recently used slot and `sentinel.prev`
//! the least recently used one, so head and tail need no special cases.

use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

/// Position of a slot in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SlotId(pub(crate) u32);

impl SlotId {
    /// The sentinel slot, never bound to a key
    pub(crate) const SENTINEL: SlotId = SlotId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element of the slot array
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot<K> {
    pub(crate) next: SlotId,
    pub(crate) prev: SlotId,
    pub(crate) key: Option<K>,
}

impl<K> Slot<K> {
    fn unlinked() -> Self {
        Self {
            next: SlotId::SENTINEL,
            prev: SlotId::SENTINEL,
            key: None,
        }
    }
}

/// Fixed ring of `capacity + 1` slots
#[derive(Debug, Clone)]
pub(crate) struct SlotList<K> {
    slots: Box<[Slot<K>]>,
}

impl<K> SlotList<K> {
    /// Allocate the sentinel plus `capacity` entry slots
    pub(crate) fn new(capacity: u32) -> Self {
        let slots = (0..=capacity)
            .map(|_| Slot::unlinked())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { slots }
    }

    /// Number of entry slots
    pub(crate) fn capacity(&self) -> u32 {
        (self.slots.len() - 1) as u32
    }

    /// Least recently used slot, the next eviction victim
    pub(crate) fn tail(&self) -> Option<SlotId> {
        Some(self[SlotId::SENTINEL].prev).filter(|id| *id != SlotId::SENTINEL)
    }

    /// Key stored in `id`
    pub(crate) fn key(&self, id: SlotId) -> Option<&K> {
        self[id].key.as_ref()
    }

    /// Unlink `id` from wherever it sits. Its own links are left stale.
    fn detach(&mut self, id: SlotId) {
        debug_assert_ne!(id, SlotId::SENTINEL, "sentinel cannot be detached");
        let Slot { prev, next, .. } = self[id];
        self[prev].next = next;
        self[next].prev = prev;
    }

    /// Link `id` directly after the sentinel
    fn link_front(&mut self, id: SlotId) {
        debug_assert_ne!(id, SlotId::SENTINEL, "sentinel cannot be relinked");
        let first = self[SlotId::SENTINEL].next;
        self[id].prev = SlotId::SENTINEL;
        self[id].next = first;
        self[SlotId::SENTINEL].next = id;
        self[first].prev = id;
    }

    /// Bind `key` to an unused slot and make it the most recently used
    pub(crate) fn insert_after_sentinel(&mut self, id: SlotId, key: K) {
        self[id].key = Some(key);
        self.link_front(id);
    }

    /// Move `id` to the most recently used position
    pub(crate) fn touch(&mut self, id: SlotId) {
        self.detach(id);
        self.link_front(id);
    }

    /// Rebind the tail slot to `key` and move it to the front.
    ///
    /// Returns the reused slot and the key it held before. Returns `None` if
    /// the list has no live slot.
    pub(crate) fn replace_last(&mut self, key: K) -> Option<(SlotId, K)> {
        let last = self.tail()?;
        let old_key = self[last].key.take()?;
        self[last].key = Some(key);
        self.detach(last);
        self.link_front(last);
        Some((last, old_key))
    }

    /// Unlink every slot and drop all keys. Slots stay allocated.
    pub(crate) fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::unlinked();
        }
    }

    /// Walk live slots from most to least recently used
    pub(crate) fn iter(&self) -> SlotIter<'_, K> {
        SlotIter {
            list: self,
            front: self[SlotId::SENTINEL].next,
            back: self[SlotId::SENTINEL].prev,
            done: self[SlotId::SENTINEL].next == SlotId::SENTINEL,
        }
    }
}

impl<K> Index<SlotId> for SlotList<K> {
    type Output = Slot<K>;

    #[inline]
    fn index(&self, id: SlotId) -> &Slot<K> {
        &self.slots[id.index()]
    }
}

impl<K> IndexMut<SlotId> for SlotList<K> {
    #[inline]
    fn index_mut(&mut self, id: SlotId) -> &mut Slot<K> {
        &mut self.slots[id.index()]
    }
}

/// Iterator over live slot ids in recency order
pub(crate) struct SlotIter<'a, K> {
    list: &'a SlotList<K>,
    front: SlotId,
    back: SlotId,
    done: bool,
}

impl<K> Iterator for SlotIter<'_, K> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        if self.done {
            return None;
        }
        let id = self.front;
        if id == self.back {
            self.done = true;
        } else {
            self.front = self.list[id].next;
        }
        Some(id)
    }
}

impl<K> DoubleEndedIterator for SlotIter<'_, K> {
    fn next_back(&mut self) -> Option<SlotId> {
        if self.done {
            return None;
        }
        let id = self.back;
        if id == self.front {
            self.done = true;
        } else {
            self.back = self.list[id].prev;
        }
        Some(id)
    }
}

impl<K> FusedIterator for SlotIter<'_, K> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// `(next, prev, key)` for the first `n` slots
    fn layout(list: &SlotList<i32>, n: u32) -> Vec<(u32, u32, Option<i32>)> {
        (0..n)
            .map(|i| {
                let slot = &list[SlotId(i)];
                (slot.next.0, slot.prev.0, slot.key)
            })
            .collect()
    }

    #[test]
    fn test_list_init() {
        let list: SlotList<i32> = SlotList::new(5);

        assert_eq!(list.slots.len(), 6);
        assert_eq!(list.capacity(), 5);
        assert_eq!(list[SlotId::SENTINEL], Slot::unlinked());
        assert_eq!(list.tail(), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_list_relink_sequence() {
        let mut list = SlotList::new(4);

        list.insert_after_sentinel(SlotId(1), 5);
        assert_eq!(layout(&list, 2), vec![(1, 1, None), (0, 0, Some(5))]);

        list.insert_after_sentinel(SlotId(2), 10);
        assert_eq!(
            layout(&list, 3),
            vec![(2, 1, None), (0, 2, Some(5)), (1, 0, Some(10))]
        );

        list.insert_after_sentinel(SlotId(3), 15);
        assert_eq!(
            layout(&list, 4),
            vec![(3, 1, None), (0, 2, Some(5)), (1, 3, Some(10)), (2, 0, Some(15))]
        );

        list.insert_after_sentinel(SlotId(4), 20);
        assert_eq!(
            layout(&list, 5),
            vec![
                (4, 1, None),
                (0, 2, Some(5)),
                (1, 3, Some(10)),
                (2, 4, Some(15)),
                (3, 0, Some(20)),
            ]
        );

        assert_eq!(list.replace_last(30), Some((SlotId(1), 5)));
        assert_eq!(
            layout(&list, 5),
            vec![
                (1, 2, None),
                (4, 0, Some(30)),
                (0, 3, Some(10)),
                (2, 4, Some(15)),
                (3, 1, Some(20)),
            ]
        );

        list.touch(SlotId(3));
        assert_eq!(
            layout(&list, 5),
            vec![
                (3, 2, None),
                (4, 3, Some(30)),
                (0, 4, Some(10)),
                (1, 0, Some(15)),
                (2, 1, Some(20)),
            ]
        );
    }

    #[test]
    fn test_list_touch_head_and_single() {
        let mut list = SlotList::new(3);

        list.insert_after_sentinel(SlotId(1), 1);
        list.touch(SlotId(1));
        assert_eq!(layout(&list, 2), vec![(1, 1, None), (0, 0, Some(1))]);

        list.insert_after_sentinel(SlotId(2), 2);
        list.touch(SlotId(2));
        assert_eq!(
            layout(&list, 3),
            vec![(2, 1, None), (0, 2, Some(1)), (1, 0, Some(2))]
        );
    }

    #[test]
    fn test_list_replace_last_empty() {
        let mut list: SlotList<i32> = SlotList::new(2);
        assert_eq!(list.replace_last(7), None);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_list_iter_both_ways() {
        let mut list = SlotList::new(4);
        for (i, key) in [10, 20, 30].into_iter().enumerate() {
            list.insert_after_sentinel(SlotId(i as u32 + 1), key);
        }

        let forward: Vec<_> = list.iter().filter_map(|id| list.key(id).copied()).collect();
        assert_eq!(forward, vec![30, 20, 10]);

        let backward: Vec<_> = list
            .iter()
            .rev()
            .filter_map(|id| list.key(id).copied())
            .collect();
        assert_eq!(backward, vec![10, 20, 30]);

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(SlotId(3)));
        assert_eq!(iter.next_back(), Some(SlotId(1)));
        assert_eq!(iter.next(), Some(SlotId(2)));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_list_clear() {
        let mut list = SlotList::new(2);
        list.insert_after_sentinel(SlotId(1), 1);
        list.insert_after_sentinel(SlotId(2), 2);

        list.clear();

        assert_eq!(list.capacity(), 2);
        assert_eq!(list.tail(), None);
        assert_eq!(layout(&list, 3), vec![(0, 0, None); 3]);
    }
}
