//! An order-statistics binary search tree supporting uniform random node
//! sampling.
//!
//! [`OrderStatTree`] is a binary search tree in which every node carries the
//! exact size of its left and right subtree. The counters are maintained
//! incrementally during inserts and removes at no asymptotic cost, and allow
//! a key to be drawn uniformly at random by a single weighted walk from the
//! root - no full scan, and no bias towards shallow or deep nodes:
//!
//! ```
//! use orderstat::OrderStatTree;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut t = OrderStatTree::default();
//!
//! for key in [4, 2, 5, 1, 3, 8, 7] {
//!     t.insert(key);
//! }
//!
//! assert_eq!(t.find(&5), Some(&5));
//! assert_eq!(t.find(&6), None);
//!
//! // Every stored key is drawn with probability 1/7.
//! let mut rng = StdRng::seed_from_u64(42);
//! let key = t.sample(&mut rng).unwrap();
//! assert!(t.contains(key));
//!
//! // Removal keeps the counters exact.
//! assert_eq!(t.remove(&4), 4);
//! assert_eq!(t.len(), 6);
//! ```
//!
//! The tree is deliberately unbalanced: operations cost `O(height)`, which
//! is logarithmic for random insertion orders and linear in the worst case.
//! Keys only need a total order ([`Ord`]); duplicate keys are stored as
//! distinct nodes and sampled individually.
//!
//! The random source is caller-supplied ([`rand::Rng`]), so deterministic
//! draws are a matter of seeding - there is no hidden global RNG state.

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::todo,
    clippy::dbg_macro
)]

mod iter;
mod node;
mod tree;


pub use iter::OwnedIter;
pub use tree::*;
