//! Allocation, relocation and release of header-prefixed blocks.
//!
//! These are the only functions that talk to the global allocator. They never
//! construct or drop elements: callers decide which slots are live.

use core::ptr::{self, NonNull};
use std::alloc::{alloc, dealloc, handle_alloc_error};

use crate::alloc::header::{buffer_layout, data_from_header, header_from_data, Header};
use crate::alloc::policy::capacity_overflow;

fn layout_for<T>(capacity: usize) -> core::alloc::Layout {
    buffer_layout::<T>(capacity).unwrap_or_else(|_| capacity_overflow())
}

/// Allocates a block with room for `header.meta.capacity` elements, writes the
/// header into it and returns slot 0.
///
/// Aborts through [`handle_alloc_error`] if the allocator fails.
pub(crate) fn allocate<T>(header: Header<T>) -> NonNull<T> {
    let layout = layout_for::<T>(header.meta.capacity);
    // SAFETY: the layout always covers at least the header, so it is never zero-sized.
    unsafe {
        let raw = alloc(layout).cast::<Header<T>>();
        let Some(block) = NonNull::new(raw) else {
            handle_alloc_error(layout);
        };
        block.as_ptr().write(header);
        data_from_header(block)
    }
}

/// Moves the vector at `data` into a fresh block of `new_capacity` slots.
///
/// Only the header and the first `length` slots are copied; the old block is
/// released afterwards. Every pointer into the old block is dangling once this
/// returns.
///
/// # Safety
/// `data` must be slot 0 of a live block and `new_capacity` must be at least
/// the current length.
pub(crate) unsafe fn relocate<T>(data: NonNull<T>, new_capacity: usize) -> NonNull<T> {
    unsafe {
        let old_header = header_from_data(data);
        let old_meta = (*old_header.as_ptr()).meta;
        debug_assert!(new_capacity >= old_meta.length);

        let new_layout = layout_for::<T>(new_capacity);
        let raw = alloc(new_layout).cast::<Header<T>>();
        let Some(new_header) = NonNull::new(raw) else {
            handle_alloc_error(new_layout);
        };

        ptr::copy_nonoverlapping(old_header.as_ptr(), new_header.as_ptr(), 1);
        let new_data = data_from_header(new_header);
        ptr::copy_nonoverlapping(data.as_ptr(), new_data.as_ptr(), old_meta.length);
        (*new_header.as_ptr()).meta.capacity = new_capacity;

        dealloc(old_header.as_ptr().cast(), layout_for::<T>(old_meta.capacity));
        new_data
    }
}

/// Returns the block behind `data` to the allocator.
///
/// # Safety
/// `data` must be slot 0 of a live block. Live elements are not dropped; the
/// caller must have dropped or moved them out already.
pub(crate) unsafe fn deallocate<T>(data: NonNull<T>) {
    unsafe {
        let header = header_from_data(data);
        let layout = layout_for::<T>((*header.as_ptr()).meta.capacity);
        dealloc(header.as_ptr().cast(), layout);
    }
}
