//! Collections built on the header-prefixed block layout.

pub mod vec;

pub use vec::{FreeFn, Teardown, Vector, VectorOptions};
