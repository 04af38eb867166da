//! Layout of a vector allocation.
//!
//! Every vector is one heap block: a fixed-size [`Header`] followed directly by
//! the element slots. The handle a caller holds points at slot 0, so the header
//! is always found at a constant negative offset from it:
//!
//! ```text
//! +-----------------------+---------+---------+-----+-----------------+
//! | Header<T> (+ padding) | slot 0  | slot 1  | ... | slot capacity-1 |
//! +-----------------------+---------+---------+-----+-----------------+
//! ^ allocation start      ^ handle
//! ```
//!
//! The padding between the header and slot 0 rounds the header size up to
//! `align_of::<T>()`, and the block itself is aligned to the larger of the two
//! alignments, so slot 0 is always correctly aligned for `T`.

use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use crate::alloc::policy::CapacityFn;
use crate::collections::vec::FreeFn;
use crate::error::VectorError;

/// The numeric part of a vector header.
///
/// This is what a custom capacity policy gets to look at. It is a plain copy,
/// so holding one never keeps the vector borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meta {
    pub(crate) element_size: usize,
    pub(crate) length: usize,
    pub(crate) capacity: usize,
    pub(crate) initial_capacity: usize,
}

impl Meta {
    /// Builds a snapshot by hand, mostly useful for exercising a capacity policy
    /// outside of a vector.
    pub const fn new(element_size: usize, length: usize, capacity: usize, initial_capacity: usize) -> Self {
        Self {
            element_size,
            length,
            capacity,
            initial_capacity,
        }
    }

    /// Byte size of one element.
    #[inline]
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of live elements.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Number of allocated element slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity floor of the default policy.
    #[inline]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// `true` when every slot is in use.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.length == self.capacity
    }

    /// `true` when the capacity is above the floor and less than half of it is used.
    #[inline]
    pub const fn is_underfilled(&self) -> bool {
        // `length * 2 < capacity` without the overflow.
        self.capacity > self.initial_capacity && self.length < self.capacity - self.capacity / 2
    }

    /// `true` when there are no live elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Metadata stored in front of the element slots.
#[repr(C)]
pub(crate) struct Header<T> {
    pub(crate) meta: Meta,
    pub(crate) free_fn: Option<FreeFn<T>>,
    pub(crate) capacity_fn: Option<CapacityFn>,
}

impl<T> Header<T> {
    pub(crate) fn new(
        capacity: usize,
        initial_capacity: usize,
        free_fn: Option<FreeFn<T>>,
        capacity_fn: Option<CapacityFn>,
    ) -> Self {
        Self {
            meta: Meta::new(mem::size_of::<T>(), 0, capacity, initial_capacity),
            free_fn,
            capacity_fn,
        }
    }
}

/// Distance in bytes from the start of the allocation to slot 0.
#[inline]
pub(crate) const fn data_offset<T>() -> usize {
    let size = mem::size_of::<Header<T>>();
    let align = mem::align_of::<T>();
    (size + align - 1) & !(align - 1)
}

/// Layout of a block holding the header plus `capacity` slots of `T`.
///
/// # Errors
/// Returns [`VectorError::CapacityOverflow`] if the block size overflows
/// `isize::MAX`.
pub(crate) fn buffer_layout<T>(capacity: usize) -> Result<Layout, VectorError> {
    let slots = mem::size_of::<T>()
        .checked_mul(capacity)
        .ok_or(VectorError::CapacityOverflow)?;
    let size = data_offset::<T>()
        .checked_add(slots)
        .ok_or(VectorError::CapacityOverflow)?;
    let align = mem::align_of::<Header<T>>().max(mem::align_of::<T>());

    Layout::from_size_align(size, align).map_err(|_| VectorError::CapacityOverflow)
}

/// Resolves the header of the block that `data` points into.
///
/// # Safety
/// `data` must be slot 0 of a live block created by [`crate::alloc::raw`].
#[inline]
pub(crate) unsafe fn header_from_data<T>(data: NonNull<T>) -> NonNull<Header<T>> {
    // SAFETY: the header sits exactly `data_offset` bytes before slot 0 of the same block.
    unsafe { NonNull::new_unchecked(data.as_ptr().cast::<u8>().sub(data_offset::<T>()).cast()) }
}

/// Inverse of [`header_from_data`].
///
/// # Safety
/// `header` must be the start of a live block created by [`crate::alloc::raw`].
#[inline]
pub(crate) unsafe fn data_from_header<T>(header: NonNull<Header<T>>) -> NonNull<T> {
    // SAFETY: slot 0 lies inside the same block, `data_offset` bytes after its start.
    unsafe { NonNull::new_unchecked(header.as_ptr().cast::<u8>().add(data_offset::<T>()).cast()) }
}
