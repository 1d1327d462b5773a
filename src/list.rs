//! Index-addressed doubly linked list used for recency ordering.
//!
//! Entries live in a slot arena and link to each other by slot index rather than
//! by pointer. The list exclusively owns every value; callers hold [`NodeId`]
//! handles, which carry the slot's generation so a handle to a removed entry
//! can never resolve to whatever later reuses the slot.
//!
//! ```text
//!   head                                   tail
//!    │                                      │
//!    ▼                                      ▼
//!  ┌─────┐  next  ┌─────┐  next  ┌─────┐
//!  │ s2  │ ─────▶ │ s0  │ ─────▶ │ s3  │        free: s1
//!  │     │ ◀───── │     │ ◀───── │     │
//!  └─────┘  prev  └─────┘  prev  └─────┘
//! ```

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::num::NonZeroUsize;

/// Stable handle to an entry in a [`List`].
///
/// A handle stays valid until its entry is removed. After that every lookup
/// through it returns `None`, even if the underlying slot has been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A linked entry: the value plus its neighbours' slot indices.
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

enum SlotEntry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

struct Slot<T> {
    /// Bumped every time the slot is vacated.
    generation: u32,
    entry: SlotEntry<T>,
}

/// A doubly linked list with fixed capacity, backed by a slot arena.
///
/// The front of the list is the most recently attached entry and the back is
/// the oldest one. All operations are O(1). Vacated slots are recycled before
/// the arena grows, so the arena never holds more than `cap` slots.
///
/// # Examples
///
/// ```ignore
/// use sync_lru::list::List;
/// use core::num::NonZeroUsize;
///
/// let mut list = List::new(NonZeroUsize::new(2).unwrap());
/// let a = list.push_front("a").unwrap();
/// list.push_front("b").unwrap();
/// assert!(list.push_front("c").is_none());
///
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some("b"));
/// ```
pub struct List<T> {
    cap: NonZeroUsize,
    len: usize,
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
}

impl<T> List<T> {
    /// Creates an empty list that holds at most `cap` items.
    ///
    /// Slots are allocated on demand, so a large capacity costs nothing up front.
    pub fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
        }
    }

    /// Returns the maximum number of items the list can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns a handle to the new entry, or `None` if the list is already full,
    /// in which case `value` is dropped.
    pub fn push_front(&mut self, value: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }
        let index = self.alloc(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(index);
        self.len += 1;
        Some(NodeId {
            index,
            generation: self.slots[index].generation,
        })
    }

    /// Moves an entry to the front of the list.
    ///
    /// Does no relinking if the entry is already at the front. Returns false if
    /// the handle no longer refers to an entry of this list.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        let Some(index) = self.resolve(id) else {
            return false;
        };
        if self.head != Some(index) {
            self.unlink(index);
            self.link_front(index);
        }
        true
    }

    /// Removes the last (least recently attached) entry and returns its value.
    pub fn remove_last(&mut self) -> Option<T> {
        let index = self.tail?;
        self.unlink(index);
        self.len -= 1;
        Some(self.release(index))
    }

    /// Returns a reference to the value behind `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.resolve(id)?;
        Some(&self.node(index).value)
    }

    /// Returns a mutable reference to the value behind `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.resolve(id)?;
        Some(&mut self.node_mut(index).value)
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|index| &self.node(index).value)
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Walks the links in both directions and panics if the list is inconsistent.
    pub(crate) fn debug_validate(&self) {
        assert!(self.len <= self.cap.get(), "list exceeds its capacity");
        assert!(self.slots.len() <= self.cap.get(), "arena grew past capacity");

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index);
            assert_eq!(node.prev, prev, "broken back link at slot {index}");
            count += 1;
            assert!(count <= self.len, "cycle in recency list");
            prev = Some(index);
            cursor = node.next;
        }
        assert_eq!(prev, self.tail, "tail does not terminate the forward walk");
        assert_eq!(count, self.len, "length does not match linked entries");

        let mut vacant = 0;
        let mut cursor = self.free;
        while let Some(index) = cursor {
            match &self.slots[index].entry {
                SlotEntry::Vacant { next_free } => cursor = *next_free,
                SlotEntry::Occupied(_) => panic!("occupied slot {index} on the free list"),
            }
            vacant += 1;
        }
        assert_eq!(vacant + self.len, self.slots.len(), "leaked arena slots");
    }

    /// Maps a handle to a slot index if it still names a live entry.
    fn resolve(&self, id: NodeId) -> Option<usize> {
        let slot = self.slots.get(id.index)?;
        match slot.entry {
            SlotEntry::Occupied(_) if slot.generation == id.generation => Some(id.index),
            _ => None,
        }
    }

    fn node(&self, index: usize) -> &Node<T> {
        match &self.slots[index].entry {
            SlotEntry::Occupied(node) => node,
            SlotEntry::Vacant { .. } => unreachable!("linked slot {index} is vacant"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.slots[index].entry {
            SlotEntry::Occupied(node) => node,
            SlotEntry::Vacant { .. } => unreachable!("linked slot {index} is vacant"),
        }
    }

    /// Stores `node` in a free slot, growing the arena only when none is free.
    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(index) => {
                let slot = &mut self.slots[index];
                let next_free = match slot.entry {
                    SlotEntry::Vacant { next_free } => next_free,
                    SlotEntry::Occupied(_) => unreachable!("free list points at live slot"),
                };
                slot.entry = SlotEntry::Occupied(node);
                self.free = next_free;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: SlotEntry::Occupied(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Vacates an unlinked slot and returns the value it held.
    fn release(&mut self, index: usize) -> T {
        let slot = &mut self.slots[index];
        let entry = mem::replace(
            &mut slot.entry,
            SlotEntry::Vacant {
                next_free: self.free,
            },
        );
        slot.generation = slot.generation.wrapping_add(1);
        self.free = Some(index);
        match entry {
            SlotEntry::Occupied(node) => node.value,
            SlotEntry::Vacant { .. } => unreachable!("released slot {index} was vacant"),
        }
    }

    /// Detaches a linked slot from its neighbours without vacating it.
    fn unlink(&mut self, index: usize) {
        let (prev, next) = {
            let node = self.node_mut(index);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Attaches a detached slot at the front.
    fn link_front(&mut self, index: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(index);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("cap", &self.cap)
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let index = self.next?;
        let node = self.list.node(index);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
