//! The header-prefixed vector.
//!
//! - `vector`: the handle type, configuration, hooks and teardown
//! - `mutation`: push, insert, pop, remove, clear, concat, copy
//! - `bulk`: search, sort, reverse, filter, map, reduce, any/all, slice
//! - `sort`: the bottom-up merge sort behind [`Vector::sort`]

mod bulk;
mod mutation;
mod sort;
pub mod vector;

pub use vector::{FreeFn, Teardown, Vector, VectorOptions};
