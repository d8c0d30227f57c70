//! An ordered symbol table backed by an unbalanced binary search tree.
//!
//! This crate provides [`BstMap`], a key-value map that keeps its keys in
//! sorted order and augments every tree node with the size of its subtree.
//! On top of the usual map operations it answers ordered queries:
//!
//! - [`min`](BstMap::min) / [`max`](BstMap::max) - The smallest and largest key
//! - [`floor`](BstMap::floor) / [`ceiling`](BstMap::ceiling) - The nearest key at or below / at or above a probe
//! - [`rank`](BstMap::rank) - How many keys sort before a probe
//! - [`select`](BstMap::select) - The key at a given sorted position
//! - [`range_count`](BstMap::range_count) / [`keys_in`](BstMap::keys_in) - The keys in a closed range
//! - [`level_order`](BstMap::level_order) - The keys in breadth-first order
//!
//! # Example
//!
//! ```
//! use bst_symtab::{BstMap, Rank};
//!
//! let mut scores = BstMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Keys are sorted alphabetically
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank("Carol"), 2);
//! assert_eq!(scores.floor("Bz"), Some(&"Bob"));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Storing `None` deletes
//! scores.put("Bob", None);
//! assert_eq!(scores.len(), 2);
//! ```
//!
//! # Implementation
//!
//! The tree is a plain binary search tree: it is never rebalanced, so its
//! height, and the cost of every operation, depends on the order in which
//! keys arrive. Nodes live in a flat arena addressed by integer handles and
//! every walk is iterative, so tall trees are slow but never overflow the
//! stack. Deleting a node with two children promotes its in-order successor
//! (Hibbard deletion).
//!
//! The crate is `no_std` and only requires `alloc`. Structural changes emit
//! `tracing` events at `trace` level; install a subscriber to see them.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod bst_map;

pub use bst_map::BstMap;
pub use error::{Error, Result};
pub use order_statistic::Rank;
