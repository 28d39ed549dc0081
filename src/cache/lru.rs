//! LRU List Module
//!
//! Arena-backed doubly linked list that tracks key recency for eviction.

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
///
/// Handles stay valid until the node is removed; a removed slot may be reused
/// by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Tracks access order for LRU eviction.
///
/// Nodes live in a `Vec` of slots and link to each other by index:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every operation except iteration is O(1).
#[derive(Debug, Clone)]
pub struct LruList<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> Default for LruList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts a key at the head (most recent) and returns its handle.
    pub fn push_front(&mut self, key: K) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;

        NodeId(idx)
    }

    // == Move To Front ==
    /// Marks a node as recently used.
    ///
    /// Does nothing if the node is already at the head.
    pub fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id.0) {
            return;
        }
        self.unlink(id.0);

        let old_head = self.head;
        {
            let node = self.node_mut(id.0);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(id.0),
            None => self.tail = Some(id.0),
        }
        self.head = Some(id.0);
    }

    // == Remove ==
    /// Removes a node and returns its key.
    ///
    /// Returns None if the handle does not point at a live node.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        if !matches!(self.slots.get(id.0), Some(Some(_))) {
            return None;
        }
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    pub fn peek_back(&self) -> Option<&K> {
        self.tail
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Returns the most recently used key.
    #[cfg(test)]
    pub(crate) fn peek_front(&self) -> Option<&K> {
        self.head
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|node| &node.key)
    }

    /// Returns the key stored under a handle.
    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.slots.get(id.0)?.as_ref().map(|node| &node.key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // Detaches a live node from its neighbours, fixing head/tail.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
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

    fn node(&self, idx: usize) -> &Node<K> {
        self.slots[idx]
            .as_ref()
            .expect("linked index must point at a live node")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        self.slots[idx]
            .as_mut()
            .expect("linked index must point at a live node")
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`LruList`].
pub struct Iter<'a, K> {
    list: &'a LruList<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots[idx].as_ref()?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
