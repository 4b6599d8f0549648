/// A stable handle to a node in a [`LinkedList`].
///
/// A handle is invalidated when its node is removed from the list (directly,
/// or via [`LinkedList::clear()`]); operations against a stale handle resolve
/// to "absent" rather than panicking or touching a reused slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    /// Bumped on every removal from this slot, invalidating outstanding
    /// [`NodeRef`] handles to prior occupants.
    generation: u32,
    entry: Option<Entry<T>>,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    prev: Option<u32>,
    next: Option<u32>,
}

/// A doubly linked list over a slab of nodes, addressable by stable
/// generation-checked [`NodeRef`] handles.
///
/// Nodes live in a contiguous slab rather than as individually boxed,
/// pointer-linked allocations; removed slots are recycled through a free list.
/// This keeps handles [`Copy`] and lets a stale handle be detected (its slot
/// generation has moved on) instead of dereferencing a dangling pointer.
///
/// All operations are O(1).
///
/// ```
/// use arbor::LinkedList;
///
/// let mut l = LinkedList::new();
///
/// let b = l.push_back("b");
/// l.push_back("c");
/// let a = l.insert_before(b, "a").unwrap();
///
/// assert_eq!(l.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
///
/// // Removing a node invalidates its handle.
/// assert_eq!(l.remove(a), Some("a"));
/// assert_eq!(l.remove(a), None);
/// ```
#[derive(Debug, Clone)]
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> LinkedList<T> {
    /// Initialise an empty [`LinkedList`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` at the tail of the list, returning a handle to the new
    /// node.
    pub fn push_back(&mut self, value: T) -> NodeRef {
        let index = self.alloc(Entry {
            value,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.entry_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);

        self.len += 1;
        self.handle(index)
    }

    /// Prepend `value` at the head of the list, returning a handle to the new
    /// node.
    pub fn push_front(&mut self, value: T) -> NodeRef {
        let index = self.alloc(Entry {
            value,
            prev: None,
            next: self.head,
        });

        match self.head {
            Some(head) => self.entry_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);

        self.len += 1;
        self.handle(index)
    }

    /// Insert `value` immediately before the node `at`, returning a handle to
    /// the new node, or [`None`] (leaving the list unchanged) if `at` is
    /// stale.
    pub fn insert_before(&mut self, at: NodeRef, value: T) -> Option<NodeRef> {
        let at = self.resolve(at)?;
        let prev = self.entry(at).prev;

        let index = self.alloc(Entry {
            value,
            prev,
            next: Some(at),
        });

        self.entry_mut(at).prev = Some(index);
        match prev {
            Some(prev) => self.entry_mut(prev).next = Some(index),
            None => self.head = Some(index),
        }

        self.len += 1;
        Some(self.handle(index))
    }

    /// Insert `value` immediately after the node `at`, returning a handle to
    /// the new node, or [`None`] (leaving the list unchanged) if `at` is
    /// stale.
    pub fn insert_after(&mut self, at: NodeRef, value: T) -> Option<NodeRef> {
        let at = self.resolve(at)?;
        let next = self.entry(at).next;

        let index = self.alloc(Entry {
            value,
            prev: Some(at),
            next,
        });

        self.entry_mut(at).next = Some(index);
        match next {
            Some(next) => self.entry_mut(next).prev = Some(index),
            None => self.tail = Some(index),
        }

        self.len += 1;
        Some(self.handle(index))
    }

    /// Detach the node `node` from the list and return its value.
    ///
    /// Returns [`None`] if `node` is stale (already removed), leaving the
    /// list unchanged.
    pub fn remove(&mut self, node: NodeRef) -> Option<T> {
        let index = self.resolve(node)?;

        let slot = &mut self.slots[index as usize];
        let entry = slot.entry.take().unwrap();

        // Invalidate any outstanding handles to this node.
        slot.generation = slot.generation.wrapping_add(1);

        match entry.prev {
            Some(prev) => self.entry_mut(prev).next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(next) => self.entry_mut(next).prev = entry.prev,
            None => self.tail = entry.prev,
        }

        self.free.push(index);
        self.len -= 1;
        Some(entry.value)
    }

    /// Remove and return the value at the head of the list, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head()?;
        self.remove(head)
    }

    /// Remove and return the value at the tail of the list, if any.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail()?;
        self.remove(tail)
    }

    /// A handle to the head node, if any.
    pub fn head(&self) -> Option<NodeRef> {
        self.head.map(|index| self.handle(index))
    }

    /// A handle to the tail node, if any.
    pub fn tail(&self) -> Option<NodeRef> {
        self.tail.map(|index| self.handle(index))
    }

    /// A handle to the node after `node`, if any.
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        let index = self.resolve(node)?;
        self.entry(index).next.map(|v| self.handle(v))
    }

    /// A handle to the node before `node`, if any.
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        let index = self.resolve(node)?;
        self.entry(index).prev.map(|v| self.handle(v))
    }

    /// A reference to the value held by `node`, or [`None`] if the handle is
    /// stale.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        let index = self.resolve(node)?;
        Some(&self.entry(index).value)
    }

    /// A mutable reference to the value held by `node`, or [`None`] if the
    /// handle is stale.
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        let index = self.resolve(node)?;
        Some(&mut self.slots[index as usize].entry.as_mut().unwrap().value)
    }

    /// A reference to the value at the head of the list, if any.
    pub fn front(&self) -> Option<&T> {
        Some(&self.entry(self.head?).value)
    }

    /// A reference to the value at the tail of the list, if any.
    pub fn back(&self) -> Option<&T> {
        Some(&self.entry(self.tail?).value)
    }

    /// Remove all values, invalidating every outstanding handle.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// The number of values stored in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// An iterator over the values, head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    /// Place `entry` into a recycled slot (or a new one), returning its
    /// index.
    fn alloc(&mut self, entry: Entry<T>) -> u32 {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.entry.is_none());
                slot.entry = Some(entry);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Map `node` back to its slot index, or [`None`] if the handle is stale
    /// or never belonged to this list.
    fn resolve(&self, node: NodeRef) -> Option<u32> {
        let slot = self.slots.get(node.index as usize)?;
        if slot.generation != node.generation || slot.entry.is_none() {
            return None;
        }
        Some(node.index)
    }

    fn handle(&self, index: u32) -> NodeRef {
        NodeRef {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn entry(&self, index: u32) -> &Entry<T> {
        self.slots[index as usize].entry.as_ref().unwrap()
    }

    fn entry_mut(&mut self, index: u32) -> &mut Entry<T> {
        self.slots[index as usize].entry.as_mut().unwrap()
    }

    /// Walk the links in both directions, asserting they mirror each other.
    #[cfg(test)]
    fn assert_links(&self) {
        let mut forward = Vec::new();
        let mut ptr = self.head;
        while let Some(index) = ptr {
            forward.push(index);
            ptr = self.entry(index).next;
        }

        let mut backward = Vec::new();
        let mut ptr = self.tail;
        while let Some(index) = ptr {
            backward.push(index);
            ptr = self.entry(index).prev;
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), self.len);
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut l = Self::new();
        l.extend(iter);
        l
    }
}

/// An iterator over borrowed [`LinkedList`] values, head to tail.
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    next: Option<u32>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let entry = self.list.entry(index);
        self.next = entry.next;
        Some(&entry.value)
    }
}
