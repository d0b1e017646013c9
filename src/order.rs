//! Heap ordering policy
//!
//! All heap invariants are defined purely in terms of a strict "better
//! than" predicate over keys. [`Order::Min`] makes smaller keys better (a
//! min-heap, the default), [`Order::Max`] the inverse, and
//! [`Order::Custom`] accepts an arbitrary strict predicate.

use std::cmp::Ordering;
use std::fmt;

/// Ordering policy captured when a heap is constructed.
///
/// Ties are permitted; the relative order in which equal-priority elements
/// are returned is unspecified.
///
/// # Example
///
/// ```rust
/// use keyheap::{FibonacciHeap, Order};
///
/// fn longer(a: &&str, b: &&str) -> bool {
///     a.len() > b.len()
/// }
///
/// let mut heap = FibonacciHeap::with_order(Order::Custom(longer));
/// heap.push("hi", 1);
/// heap.push("hello", 2);
/// assert_eq!(heap.peek(), Some((&"hello", &2)));
/// ```
pub enum Order<K> {
    /// Smaller keys are better: elements come out in ascending key order.
    Min,
    /// Larger keys are better: elements come out in descending key order.
    Max,
    /// `Custom(better)` where `better(a, b)` means `a` is strictly higher
    /// priority than `b`.
    Custom(fn(&K, &K) -> bool),
}

impl<K: Ord> Order<K> {
    /// True when `a` is strictly higher priority than `b`.
    #[inline]
    pub fn better(&self, a: &K, b: &K) -> bool {
        match self {
            Order::Min => a.cmp(b) == Ordering::Less,
            Order::Max => a.cmp(b) == Ordering::Greater,
            Order::Custom(better) => better(a, b),
        }
    }
}

// Manual impls: derives would put unnecessary bounds on `K`, which only
// appears behind a fn pointer.

impl<K> Clone for Order<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Order<K> {}

impl<K> PartialEq for Order<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Order::Min, Order::Min) | (Order::Max, Order::Max) => true,
            (Order::Custom(a), Order::Custom(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

impl<K> Eq for Order<K> {}

impl<K> fmt::Debug for Order<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Min => f.write_str("Min"),
            Order::Max => f.write_str("Max"),
            Order::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<K> Default for Order<K> {
    fn default() -> Self {
        Order::Min
    }
}
