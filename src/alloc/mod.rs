//! Raw memory for header-prefixed vectors.
//!
//! - `header`: block layout and the address arithmetic between a handle and its header
//! - `policy`: the capacity policy that drives growth and shrinking
//! - `raw`: allocation, relocation and release of blocks
//! - `constants`: tuning defaults

pub mod constants;
pub(crate) mod header;
pub mod policy;
pub(crate) mod raw;

pub use constants::DEFAULT_INITIAL_CAPACITY;
pub use header::Meta;
pub use policy::{default_capacity, CapacityFn};
