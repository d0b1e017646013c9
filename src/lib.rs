//! Key-addressed Fibonacci heap
//!
//! This crate provides a mergeable priority queue with:
//! - O(1) amortized push, merge, and peek
//! - O(log n) amortized pop (extract-top)
//! - O(1) amortized priority decrease for an arbitrary key
//! - O(log n) amortized deletion of an arbitrary key
//!
//! Unlike handle-based heaps, every element is addressed by its *key*: a
//! secondary index maps keys (duplicates allowed) to live nodes, so callers
//! can change or delete priorities without holding on to an opaque handle.
//!
//! The ordering is chosen at construction: min-heap (the default), max-heap,
//! or a custom "better than" predicate. See [`Order`].
//!
//! # Example
//!
//! ```rust
//! use keyheap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.push(2, "two");
//! heap.push(1, "one");
//! assert_eq!(heap.peek(), Some((&1, &"one")));
//!
//! // Re-key an element by its key, no handle required.
//! assert_eq!(heap.change_key(&2, 0).unwrap(), Some((0, &"two")));
//! assert_eq!(heap.pop(), Some("two"));
//! assert_eq!(heap.pop(), Some("one"));
//! assert_eq!(heap.pop(), None);
//! ```

pub mod error;
pub mod fibonacci;
pub mod order;

mod index;

pub use error::HeapError;
pub use fibonacci::FibonacciHeap;
pub use order::Order;
