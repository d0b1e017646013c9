//! Key-addressed Fibonacci heap implementation
//!
//! The structure is a forest of heap-ordered multi-way trees. Roots are
//! joined in a circular doubly linked list (the root ring), and the siblings
//! under each parent form their own ring. The heap keeps a pointer to the
//! best root ("top") and a secondary [`KeyIndex`] from keys to live nodes so
//! elements can be re-keyed or deleted by key alone.
//!
//! Amortized bounds: O(1) push/peek/merge/change_key, O(log n) pop/delete.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::HeapError;
use crate::index::KeyIndex;
use crate::order::Order;

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NonNull<Node<K, V>>>,
    child: Option<NonNull<Node<K, V>>>,
    left: NonNull<Node<K, V>>,
    right: NonNull<Node<K, V>>,
    degree: usize,
    marked: bool,
}

/// Splices `node` into the ring immediately left of `anchor`.
///
/// # Safety
/// Both pointers must be live nodes; `node` must currently be self-ringed.
unsafe fn splice_before<K, V>(anchor: NonNull<Node<K, V>>, node: NonNull<Node<K, V>>) {
    let left = (*anchor.as_ptr()).left;
    (*node.as_ptr()).right = anchor;
    (*node.as_ptr()).left = left;
    (*left.as_ptr()).right = node;
    (*anchor.as_ptr()).left = node;
}

/// Unlinks `node` from its ring, leaving it self-ringed. Returns the former
/// right neighbor, which is `node` itself for a singleton ring.
///
/// # Safety
/// `node` must be a live node in a well-formed ring.
unsafe fn unlink<K, V>(node: NonNull<Node<K, V>>) -> NonNull<Node<K, V>> {
    let left = (*node.as_ptr()).left;
    let right = (*node.as_ptr()).right;
    (*left.as_ptr()).right = right;
    (*right.as_ptr()).left = left;
    (*node.as_ptr()).left = node;
    (*node.as_ptr()).right = node;
    right
}

/// Joins the rings containing `a` and `b` with a four-pointer splice.
///
/// # Safety
/// `a` and `b` must be live nodes in two disjoint well-formed rings.
unsafe fn concat_rings<K, V>(a: NonNull<Node<K, V>>, b: NonNull<Node<K, V>>) {
    let a_left = (*a.as_ptr()).left;
    let b_left = (*b.as_ptr()).left;
    (*a_left.as_ptr()).right = b;
    (*b.as_ptr()).left = a_left;
    (*b_left.as_ptr()).right = a;
    (*a.as_ptr()).left = b_left;
}

/// Makes `child` a child of `parent`, clearing the child's mark.
///
/// # Safety
/// Both pointers must be live root nodes of the same heap.
unsafe fn link<K, V>(child: NonNull<Node<K, V>>, parent: NonNull<Node<K, V>>) {
    unlink(child);
    (*child.as_ptr()).parent = Some(parent);
    (*child.as_ptr()).marked = false;
    match (*parent.as_ptr()).child {
        Some(first) => splice_before(first, child),
        None => (*parent.as_ptr()).child = Some(child),
    }
    (*parent.as_ptr()).degree += 1;
}

/// Key-addressed Fibonacci heap.
///
/// Keys order the elements per the heap's [`Order`]; values are opaque
/// payloads. Duplicate keys are allowed; key-addressed operations pick an
/// arbitrary occurrence among duplicates.
///
/// The heap owns its nodes exclusively and is intentionally neither `Send`
/// nor `Sync`; callers needing shared access must serialize externally.
///
/// # Example
///
/// ```rust
/// use keyheap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::from_keys([5, 3, 8]);
/// assert_eq!(heap.peek_key(), Some(&3));
/// assert_eq!(heap.pop(), Some(3));
/// assert_eq!(heap.len(), 2);
/// ```
pub struct FibonacciHeap<K, V> {
    top: Option<NonNull<Node<K, V>>>,
    order: Order<K>,
    index: KeyIndex<K, NonNull<Node<K, V>>>,
    len: usize,
    // Signals ownership of the boxed nodes for drop check purposes.
    _phantom: PhantomData<Box<Node<K, V>>>,
}

impl<K, V> FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    /// Creates an empty min-heap: smaller keys come out first.
    pub fn new() -> Self {
        Self::with_order(Order::Min)
    }

    /// Creates an empty min-heap. Alias for [`FibonacciHeap::new`].
    pub fn min() -> Self {
        Self::with_order(Order::Min)
    }

    /// Creates an empty max-heap: larger keys come out first.
    pub fn max() -> Self {
        Self::with_order(Order::Max)
    }

    /// Creates an empty heap with the given ordering policy.
    pub fn with_order(order: Order<K>) -> Self {
        FibonacciHeap {
            top: None,
            order,
            index: KeyIndex::new(),
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// The ordering policy this heap was constructed with.
    pub fn order(&self) -> Order<K> {
        self.order
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// True if at least one live element holds `key`. O(1).
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Inserts an element. O(1): the node is spliced into the root ring
    /// next to the current top.
    pub fn push(&mut self, key: K, value: V) {
        let node = Box::new(Node {
            key: key.clone(),
            value,
            parent: None,
            child: None,
            left: NonNull::dangling(), // set immediately below
            right: NonNull::dangling(),
            degree: 0,
            marked: false,
        });
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(node)) };
        unsafe {
            (*node.as_ptr()).left = node;
            (*node.as_ptr()).right = node;
        }
        self.index.insert(key, node);
        match self.top {
            Some(top) => unsafe {
                splice_before(top, node);
                if self
                    .order
                    .better(&(*node.as_ptr()).key, &(*top.as_ptr()).key)
                {
                    self.top = Some(node);
                }
            },
            None => self.top = Some(node),
        }
        self.len += 1;
    }

    /// Returns the best element without removing it. O(1).
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.top.map(|top| unsafe {
            let node = top.as_ptr();
            (&(*node).key, &(*node).value)
        })
    }

    /// Returns the key of the best element without removing it. O(1).
    pub fn peek_key(&self) -> Option<&K> {
        self.top.map(|top| unsafe { &(*top.as_ptr()).key })
    }

    /// Removes and returns the value of the best element. Amortized
    /// O(log n); a single call may cost O(n) after a long push run.
    pub fn pop(&mut self) -> Option<V> {
        self.pop_entry().map(|(_, value)| value)
    }

    fn pop_entry(&mut self) -> Option<(K, V)> {
        let top = self.top?;
        unsafe {
            let removed = self.index.remove(&(*top.as_ptr()).key, top);
            debug_assert!(removed, "popped node was not in the key index");
            Some(self.extract(top))
        }
    }

    /// Changes `old_key` to `new_key` on an arbitrary live occurrence of
    /// `old_key`, repairing heap order with a cut and cascading cuts.
    ///
    /// Returns `Ok(None)` when the key is absent or unchanged, and
    /// `Err(HeapError::OrderViolation)` when the move goes in the wrong
    /// direction for this heap's ordering (e.g. increasing a key in a
    /// min-heap). Amortized O(1).
    ///
    /// ```rust
    /// use keyheap::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::from_keys([1, 2]);
    /// assert!(heap.change_key(&2, 3).is_err());
    /// assert_eq!(heap.change_key(&2, 0).unwrap(), Some((0, &2)));
    /// assert_eq!(heap.pop(), Some(2));
    /// assert_eq!(heap.pop(), Some(1));
    /// ```
    pub fn change_key(&mut self, old_key: &K, new_key: K) -> Result<Option<(K, &V)>, HeapError> {
        if !self.index.contains(old_key) || *old_key == new_key {
            return Ok(None);
        }
        if !self.order.better(&new_key, old_key) {
            return Err(HeapError::OrderViolation);
        }
        let Some(node) = self.index.take_any(old_key) else {
            return Ok(None);
        };
        unsafe {
            (*node.as_ptr()).key = new_key.clone();
            self.index.insert(new_key, node);
            if let Some(parent) = (*node.as_ptr()).parent {
                if self
                    .order
                    .better(&(*node.as_ptr()).key, &(*parent.as_ptr()).key)
                {
                    self.cut(node);
                    self.cascading_cut(parent);
                }
            }
            if let Some(top) = self.top {
                if self
                    .order
                    .better(&(*node.as_ptr()).key, &(*top.as_ptr()).key)
                {
                    self.top = Some(node);
                }
            }
            let node = node.as_ptr();
            Ok(Some(((*node).key.clone(), &(*node).value)))
        }
    }

    /// Deletes an arbitrary live occurrence of `key` and returns its value,
    /// or `None` if the key is absent. Amortized O(log n).
    ///
    /// The node is floated to the root ring with an unconditional cut (the
    /// delete path bypasses the direction check of [`change_key`]), made the
    /// top, and then removed exactly as [`pop`] removes the top.
    ///
    /// [`change_key`]: FibonacciHeap::change_key
    /// [`pop`]: FibonacciHeap::pop
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let node = self.index.take_any(key)?;
        unsafe {
            if let Some(parent) = (*node.as_ptr()).parent {
                self.cut(node);
                self.cascading_cut(parent);
            }
            self.top = Some(node);
            let (_, value) = self.extract(node);
            Some(value)
        }
    }

    /// Merges `other` into `self`, consuming it. O(1): the two root rings
    /// are spliced together and the key indexes bucket-concatenated.
    ///
    /// Fails with [`HeapError::IncompatibleOrder`] if the heaps were
    /// constructed with different orderings; the donor is dropped either way.
    pub fn merge(&mut self, mut other: Self) -> Result<(), HeapError> {
        if self.order != other.order {
            return Err(HeapError::IncompatibleOrder);
        }
        let Some(other_top) = other.top.take() else {
            return Ok(());
        };
        let other_index = mem::replace(&mut other.index, KeyIndex::new());
        let other_len = mem::take(&mut other.len);
        self.index.absorb(other_index);
        match self.top {
            Some(top) => unsafe {
                concat_rings(top, other_top);
                if self
                    .order
                    .better(&(*other_top.as_ptr()).key, &(*top.as_ptr()).key)
                {
                    self.top = Some(other_top);
                }
            },
            None => self.top = Some(other_top),
        }
        self.len += other_len;
        Ok(())
    }

    /// Removes every element, releasing all nodes. O(n).
    pub fn clear(&mut self) {
        self.release_all();
    }

    /// Removes `node` from the heap and returns its key and value.
    ///
    /// # Safety
    /// `node` must be the current top, must be in the root ring, and must
    /// already have been removed from the key index.
    unsafe fn extract(&mut self, node: NonNull<Node<K, V>>) -> (K, V) {
        // Orphan the children: clear parent refs and marks, then splice the
        // child ring into the root ring in the extracted node's place.
        let child = (*node.as_ptr()).child.take();
        if let Some(child) = child {
            let mut current = child;
            loop {
                (*current.as_ptr()).parent = None;
                (*current.as_ptr()).marked = false;
                current = (*current.as_ptr()).right;
                if current == child {
                    break;
                }
            }
        }
        let right = unlink(node);
        let was_lone_root = right == node;
        self.top = match (was_lone_root, child) {
            (true, None) => None,
            (true, Some(child)) => Some(child),
            (false, None) => Some(right),
            (false, Some(child)) => {
                concat_rings(right, child);
                Some(right)
            }
        };
        if self.top.is_some() {
            self.consolidate();
        }
        self.len -= 1;
        let Node { key, value, .. } = *Box::from_raw(node.as_ptr());
        (key, value)
    }

    /// Merges equal-degree trees until every root has a distinct degree,
    /// then rebuilds the root ring, recomputing the top in the same scan.
    unsafe fn consolidate(&mut self) {
        let Some(start) = self.top else { return };
        // Snapshot the roots; linking mutates the ring as we go.
        let mut roots = Vec::new();
        let mut current = start;
        loop {
            roots.push(current);
            current = (*current.as_ptr()).right;
            if current == start {
                break;
            }
        }
        let mut by_degree: Vec<Option<NonNull<Node<K, V>>>> =
            vec![None; self.len.ilog2() as usize + 2];
        for root in roots {
            let mut node = root;
            let mut degree = (*node.as_ptr()).degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(other) = by_degree[degree] else { break };
                by_degree[degree] = None;
                // The worse root becomes a child of the better one.
                let (parent, child) = if self
                    .order
                    .better(&(*other.as_ptr()).key, &(*node.as_ptr()).key)
                {
                    (other, node)
                } else {
                    (node, other)
                };
                link(child, parent);
                node = parent;
                degree += 1;
            }
            by_degree[degree] = Some(node);
        }
        // Rebuild the root ring from the surviving buckets.
        self.top = None;
        for root in by_degree.into_iter().flatten() {
            (*root.as_ptr()).left = root;
            (*root.as_ptr()).right = root;
            match self.top {
                Some(top) => {
                    splice_before(top, root);
                    if self
                        .order
                        .better(&(*root.as_ptr()).key, &(*top.as_ptr()).key)
                    {
                        self.top = Some(root);
                    }
                }
                None => self.top = Some(root),
            }
        }
    }

    /// Detaches `node` from its parent's child ring and splices it into the
    /// root ring with its mark cleared.
    ///
    /// # Safety
    /// `node` must be a live node; no-op if it is already a root.
    unsafe fn cut(&mut self, node: NonNull<Node<K, V>>) {
        let Some(parent) = (*node.as_ptr()).parent.take() else {
            return;
        };
        let right = unlink(node);
        let parent = parent.as_ptr();
        (*parent).degree -= 1;
        if (*parent).degree == 0 {
            (*parent).child = None;
        } else if (*parent).child == Some(node) {
            (*parent).child = Some(right);
        }
        (*node.as_ptr()).marked = false;
        match self.top {
            Some(top) => splice_before(top, node),
            None => self.top = Some(node),
        }
    }

    /// Walks up from `node`: marked ancestors are cut too; the first
    /// unmarked non-root ancestor is marked and the walk stops.
    ///
    /// # Safety
    /// `node` must be a live node.
    unsafe fn cascading_cut(&mut self, mut node: NonNull<Node<K, V>>) {
        while let Some(parent) = (*node.as_ptr()).parent {
            if !(*node.as_ptr()).marked {
                (*node.as_ptr()).marked = true;
                return;
            }
            self.cut(node);
            node = parent;
        }
    }
}

impl<K> FibonacciHeap<K, K>
where
    K: Ord + Eq + Hash + Clone,
{
    /// Inserts an element whose value is its key.
    pub fn push_key(&mut self, key: K) {
        self.push(key.clone(), key);
    }

    /// Builds a min-heap from keys, with each value equal to its key.
    ///
    /// ```rust
    /// use keyheap::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::from_keys([3, 1, 2]);
    /// assert_eq!(heap.pop(), Some(1));
    /// ```
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut heap = Self::new();
        for key in keys {
            heap.push_key(key);
        }
        heap
    }
}

impl<K, V> Default for FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FibonacciHeap<K, V> {
    /// Frees every node. The index holds each live node exactly once, so
    /// draining it visits the complete set of allocations.
    fn release_all(&mut self) {
        for node in self.index.drain() {
            unsafe {
                drop(Box::from_raw(node.as_ptr()));
            }
        }
        self.top = None;
        self.len = 0;
    }
}

impl<K, V> Drop for FibonacciHeap<K, V> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<K, V> fmt::Debug for FibonacciHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Lazy draining iterator in priority order. Consuming the heap makes the
/// "no mutation during iteration" rule a compile-time guarantee.
pub struct IntoIter<K, V> {
    heap: FibonacciHeap<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.heap.pop_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> where K: Ord + Eq + Hash + Clone {}

impl<K, V> std::iter::FusedIterator for IntoIter<K, V> where K: Ord + Eq + Hash + Clone {}

impl<K, V> IntoIterator for FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter { heap: self }
    }
}

#[cfg(test)]
impl<K, V> FibonacciHeap<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    /// Walks the whole forest checking ring integrity, heap order, degree
    /// counts, the top invariant, and the size counter.
    fn assert_invariants(&self) {
        let Some(top) = self.top else {
            assert_eq!(self.len, 0, "empty heap must have len 0");
            return;
        };
        let mut count = 0;
        unsafe {
            let mut current = top;
            loop {
                assert!(
                    (*current.as_ptr()).parent.is_none(),
                    "root ring node has a parent"
                );
                assert!(
                    !self
                        .order
                        .better(&(*current.as_ptr()).key, &(*top.as_ptr()).key),
                    "top is not best-or-tied among roots"
                );
                count += self.assert_subtree(current);
                let next = (*current.as_ptr()).right;
                assert_eq!((*next.as_ptr()).left, current, "broken ring back-link");
                current = next;
                if current == top {
                    break;
                }
            }
        }
        assert_eq!(count, self.len, "size counter out of sync");
    }

    unsafe fn assert_subtree(&self, node: NonNull<Node<K, V>>) -> usize {
        let mut count = 1;
        if let Some(child) = (*node.as_ptr()).child {
            let mut kids = 0;
            let mut current = child;
            loop {
                kids += 1;
                assert_eq!(
                    (*current.as_ptr()).parent,
                    Some(node),
                    "child ring node has wrong parent"
                );
                assert!(
                    !self
                        .order
                        .better(&(*current.as_ptr()).key, &(*node.as_ptr()).key),
                    "heap order violated"
                );
                count += self.assert_subtree(current);
                let next = (*current.as_ptr()).right;
                assert_eq!((*next.as_ptr()).left, current, "broken ring back-link");
                current = next;
                if current == child {
                    break;
                }
            }
            assert_eq!(kids, (*node.as_ptr()).degree, "degree count out of sync");
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.pop(), None);

        heap.push(5, "a");
        heap.push(3, "b");
        heap.push(7, "c");

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some((&3, &"b")));
        assert_eq!(heap.peek_key(), Some(&3));
        heap.assert_invariants();

        assert_eq!(heap.pop(), Some("b"));
        assert_eq!(heap.peek(), Some((&5, &"a")));
        heap.assert_invariants();
        assert_eq!(heap.pop(), Some("a"));
        assert_eq!(heap.pop(), Some("c"));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        heap.push(10, "a");
        heap.push(20, "b");
        heap.push(30, "c");

        assert_eq!(heap.peek(), Some((&10, &"a")));

        assert_eq!(heap.change_key(&20, 5).unwrap(), Some((5, &"b")));
        assert_eq!(heap.peek(), Some((&5, &"b")));
        heap.assert_invariants();

        assert_eq!(heap.change_key(&30, 1).unwrap(), Some((1, &"c")));
        assert_eq!(heap.peek(), Some((&1, &"c")));
        heap.assert_invariants();
    }

    #[test]
    fn test_decrease_key_below_parent_cuts() {
        let mut heap = FibonacciHeap::from_keys(0..32);
        // Force consolidation so the forest has real tree structure.
        assert_eq!(heap.pop(), Some(0));
        heap.assert_invariants();

        // Repeated cuts must keep every invariant intact.
        for key in (20..30).rev() {
            assert!(heap.change_key(&key, key - 20).is_ok());
            heap.assert_invariants();
        }
        let drained: Vec<i32> = heap.into_iter().map(|(k, _)| k).collect();
        let mut sorted = drained.clone();
        sorted.sort_unstable();
        assert_eq!(drained, sorted);
    }

    #[test]
    fn test_change_key_rejects_wrong_direction() {
        let mut heap = FibonacciHeap::from_keys([1, 2]);
        assert_eq!(heap.change_key(&2, 3), Err(HeapError::OrderViolation));
        heap.assert_invariants();

        let mut heap = FibonacciHeap::max();
        heap.push_key(1);
        heap.push_key(2);
        assert_eq!(heap.change_key(&1, 0), Err(HeapError::OrderViolation));
        assert_eq!(heap.change_key(&1, 3).unwrap(), Some((3, &1)));
        assert_eq!(heap.peek_key(), Some(&3));
    }

    #[test]
    fn test_change_key_absent_or_unchanged() {
        let mut heap = FibonacciHeap::from_keys([1, 2, 3]);
        assert_eq!(heap.change_key(&9, 0).unwrap(), None);
        assert_eq!(heap.change_key(&2, 2).unwrap(), None);
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_delete() {
        let mut heap = FibonacciHeap::from_keys([1, 2]);
        assert_eq!(heap.delete(&1), Some(1));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.delete(&7), None);
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.pop(), Some(2));
    }

    #[test]
    fn test_delete_interior_node() {
        let mut heap = FibonacciHeap::from_keys(0..64);
        assert_eq!(heap.pop(), Some(0)); // consolidate into trees
        assert_eq!(heap.delete(&40), Some(40));
        heap.assert_invariants();
        assert_eq!(heap.len(), 62);
        let drained: Vec<i32> = heap.into_iter().map(|(k, _)| k).collect();
        let expected: Vec<i32> = (1..64).filter(|&k| k != 40).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn test_merge() {
        let mut heap1 = FibonacciHeap::new();
        heap1.push(5, "a");
        heap1.push(10, "b");

        let mut heap2 = FibonacciHeap::new();
        heap2.push(3, "c");
        heap2.push(7, "d");

        heap1.merge(heap2).unwrap();
        assert_eq!(heap1.peek(), Some((&3, &"c")));
        assert_eq!(heap1.len(), 4);
        heap1.assert_invariants();
    }

    #[test]
    fn test_merge_incompatible_orders() {
        let mut min: FibonacciHeap<i32, i32> = FibonacciHeap::min();
        let max: FibonacciHeap<i32, i32> = FibonacciHeap::max();
        assert_eq!(min.merge(max), Err(HeapError::IncompatibleOrder));
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut heap = FibonacciHeap::from_keys([2, 1, 3]);
        heap.merge(FibonacciHeap::new()).unwrap();
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_key(), Some(&1));
        heap.assert_invariants();

        let mut empty = FibonacciHeap::new();
        empty.merge(heap).unwrap();
        assert_eq!(empty.len(), 3);
        assert_eq!(empty.pop(), Some(1));
    }

    #[test]
    fn test_duplicate_keys() {
        let mut heap = FibonacciHeap::new();
        heap.push(1, "first");
        heap.push(1, "second");
        heap.push(0, "zero");
        assert!(heap.contains_key(&1));
        assert_eq!(heap.pop(), Some("zero"));

        // One arbitrary occurrence is re-keyed, never both.
        assert!(heap.change_key(&1, 0).unwrap().is_some());
        assert!(heap.contains_key(&1));
        assert!(heap.contains_key(&0));
        heap.assert_invariants();
        assert_eq!(heap.len(), 2);
        heap.pop();
        heap.pop();
        assert!(!heap.contains_key(&1));
    }

    #[test]
    fn test_clear() {
        let mut heap = FibonacciHeap::from_keys(0..100);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.pop(), None);
        heap.push_key(7);
        assert_eq!(heap.pop(), Some(7));
    }

    #[test]
    fn test_into_iter_is_sorted_and_sized() {
        let heap = FibonacciHeap::from_keys([4, 1, 3, 2]);
        let mut iter = heap.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some((1, 1)));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), vec![(2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_drop_releases_partial_heap() {
        // Dropped mid-drain with trees and cut marks in place.
        let mut heap = FibonacciHeap::from_keys(0..200);
        for _ in 0..50 {
            heap.pop();
        }
        for key in 150..170 {
            heap.change_key(&key, key - 100).unwrap();
        }
        drop(heap);
    }
}
