//! # `headvec` - Header-Prefixed Growable Vector
//!
//! A contiguous, growable array in the spirit of `Vec<T>`, whose bookkeeping
//! lives in the same heap block as its elements. The handle is a single
//! pointer to the first element; the header sits directly in front of it.
//!
//! ## Key Features
//!
//! - **One block per vector**: header and element slots are allocated, moved
//!   and freed together
//! - **Policy-driven capacity**: the capacity is recomputed after every length
//!   change, so the same rule grows and shrinks the buffer
//! - **Per-instance hooks**: a custom capacity policy and a custom teardown
//!   hook can be installed on any vector
//! - **Functional toolkit**: search, count, stable merge sort, reverse,
//!   filter, map, reduce, any/all and stepped slicing
//!
//! ## Architecture
//!
//! 1. **Layout** (`alloc::header`): the block layout and the fixed-offset
//!    arithmetic between a handle and its header.
//! 2. **Capacity policy** (`alloc::policy`): the default doubling rule and the
//!    [`CapacityFn`] override.
//! 3. **Raw blocks** (`alloc::raw`): allocation, relocation of the live
//!    elements, release.
//! 4. **Vector** (`collections::vec`): mutation and bulk operations on top.
//!
//! ## Capacity
//!
//! With the default policy a vector never holds fewer slots than its
//! initial capacity (4 unless configured), and otherwise holds the first value
//! of `initial, 2 * initial, 4 * initial, ...` that exceeds its length:
//!
//! ```rust
//! use headvec::Vector;
//!
//! let mut v = Vector::new();
//! assert_eq!(v.capacity(), 4);
//!
//! for i in 0..10 {
//!     v.push(i);
//! }
//! assert_eq!(v.len(), 10);
//! assert_eq!(v.capacity(), 16);
//!
//! v.insert_at(5, 100);
//! assert_eq!(v.index_of(&100, |a, b| a == b), 5);
//!
//! let every_other = v.slice(0, v.len(), 2);
//! assert_eq!(every_other, [0, 2, 4, 5, 7, 9]);
//! ```
//!
//! ## Errors
//!
//! Precondition violations (an index out of range, popping an empty vector, a
//! missing value, bad slice bounds) panic. Each such operation has a `try_*`
//! form returning [`VectorError`] instead. Allocation failure aborts through
//! [`std::alloc::handle_alloc_error`].
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, relocations, hook installation and hook
//! execution are reported through the `tracing` crate.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod collections;
pub mod error;

pub use alloc::{default_capacity, CapacityFn, Meta, DEFAULT_INITIAL_CAPACITY};
pub use collections::{FreeFn, Teardown, Vector, VectorOptions};
pub use error::VectorError;

// Compile-time assertions for layout claims
const _: () = {
    use core::mem;

    // The handle is one pointer, with a niche.
    assert!(mem::size_of::<Vector<u8>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Option<Vector<u8>>>() == mem::size_of::<usize>());

    // Slot 0 is aligned for the element type, however large its alignment.
    assert!(alloc::header::data_offset::<u8>() % mem::align_of::<u8>() == 0);
    assert!(alloc::header::data_offset::<u128>() % mem::align_of::<u128>() == 0);
};
