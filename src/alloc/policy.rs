//! Capacity policy: how many slots a vector should have for its current length.
//!
//! The default policy keeps the capacity at the configured floor while the
//! vector is small, and otherwise picks the first value of the doubling series
//! `initial_capacity, 2 * initial_capacity, 4 * initial_capacity, ...` that is
//! strictly greater than the length. Because the policy is re-evaluated after
//! every length change, the same rule both grows and shrinks the buffer.

use crate::alloc::constants::GROWTH_FACTOR;
use crate::alloc::header::Meta;

/// A user-supplied replacement for the default capacity policy.
///
/// The returned value is used as the new capacity as-is. It must be at least the
/// current length, and strictly greater than it when the vector is about to
/// grow; a policy that breaks this makes the growing operation panic.
pub type CapacityFn = fn(&Meta) -> usize;

/// The default target capacity for `length` live elements.
///
/// Equivalent to starting at `initial_capacity` and doubling until the value
/// exceeds `length`, computed with a leading-zero count instead of a loop.
///
/// # Panics
/// Panics with `"capacity overflow"` if the target does not fit in `usize`.
#[inline]
pub fn default_capacity(length: usize, initial_capacity: usize) -> usize {
    debug_assert!(initial_capacity > 0, "initial capacity must be greater than zero");
    if length < initial_capacity {
        return initial_capacity;
    }

    // Line the top bit of the floor up with the top bit of the length: the
    // result is the largest doubling step with the same bit width as `length`.
    let shift = initial_capacity.leading_zeros() - length.leading_zeros();
    let candidate = initial_capacity << shift;
    if candidate > length {
        candidate
    } else {
        candidate
            .checked_mul(GROWTH_FACTOR)
            .unwrap_or_else(|| capacity_overflow())
    }
}

/// Evaluates the policy configured for a vector.
#[inline]
pub(crate) fn target_capacity(meta: &Meta, capacity_fn: Option<CapacityFn>) -> usize {
    match capacity_fn {
        Some(policy) => policy(meta),
        None => default_capacity(meta.length, meta.initial_capacity),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
