//! Length-changing operations.
//!
//! Growing operations consult the capacity policy before writing, shrinking
//! operations after the length has dropped; either way the block may move.

use core::cmp::Ordering;
use core::ptr;

use super::vector::Vector;
use crate::alloc::header::{Header, Meta};
use crate::alloc::raw;
use crate::error::{enforce, VectorError};

impl<T> Vector<T> {
    /// Appends `value`. Amortized O(1).
    ///
    /// # Panics
    /// Panics if a custom capacity policy leaves no free slot.
    #[track_caller]
    pub fn push(&mut self, value: T) {
        let len = self.len();
        enforce(self.try_fit(len + 1));
        // SAFETY: the policy check guarantees `capacity > len`.
        unsafe {
            self.as_mut_ptr().add(len).write(value);
            self.set_len(len + 1);
        }
    }

    /// Inserts `value` at `index`, shifting later elements right. O(n).
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    /// [`VectorError::IndexOutOfBounds`] if `index > len`; `value` is dropped.
    pub fn try_insert_at(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        let len = self.len();
        if index > len {
            return Err(VectorError::IndexOutOfBounds { index, len });
        }
        self.try_fit(len + 1)?;
        // SAFETY: `index <= len < capacity`; the tail moves one slot right
        // within the block, then the hole at `index` is filled.
        unsafe {
            let base = self.as_mut_ptr();
            ptr::copy(base.add(index), base.add(index + 1), len - index);
            base.add(index).write(value);
            self.set_len(len + 1);
        }
        Ok(())
    }

    /// Panicking form of [`Vector::try_insert_at`].
    #[track_caller]
    pub fn insert_at(&mut self, index: usize, value: T) {
        enforce(self.try_insert_at(index, value));
    }

    /// Inserts `value` before the first element that does not compare less
    /// than it, and returns the index it landed at.
    ///
    /// On a vector sorted by `compare` this keeps it sorted; the new value lands
    /// in front of any elements that compare equal to it. O(log n) comparisons
    /// plus an O(n) shift.
    #[track_caller]
    pub fn insert_sorted<F>(&mut self, value: T, mut compare: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut low = 0;
        let mut high = self.len();
        while low < high {
            let mid = low + (high - low) / 2;
            if compare(&self[mid], &value) == Ordering::Less {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        self.insert_at(low, value);
        low
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    /// [`VectorError::Empty`] if there is nothing to pop, or
    /// [`VectorError::PolicyTooSmall`] if a custom policy has no room for the
    /// remaining elements. The vector is unchanged on error.
    pub fn try_pop(&mut self) -> Result<T, VectorError> {
        let len = self.len();
        if len == 0 {
            return Err(VectorError::Empty);
        }
        let target = self.plan_shrink(len - 1)?;
        // SAFETY: slot `len - 1` is initialized; shrinking the length first
        // moves ownership of it out of the vector.
        let value = unsafe {
            self.set_len(len - 1);
            self.as_ptr().add(len - 1).read()
        };
        self.relocate_to(target);
        Ok(value)
    }

    /// Panicking form of [`Vector::try_pop`].
    #[track_caller]
    pub fn pop(&mut self) -> T {
        enforce(self.try_pop())
    }

    /// Removes and returns the element at `index`, shifting later elements left. O(n).
    ///
    /// # Errors
    /// [`VectorError::IndexOutOfBounds`] if `index >= len`, or
    /// [`VectorError::PolicyTooSmall`] as for [`Vector::try_pop`]. The vector is
    /// unchanged on error.
    pub fn try_remove_at(&mut self, index: usize) -> Result<T, VectorError> {
        let len = self.len();
        if index >= len {
            return Err(VectorError::IndexOutOfBounds { index, len });
        }
        let target = self.plan_shrink(len - 1)?;
        // SAFETY: `index < len`; the element is read out before its slot is
        // overwritten by the tail.
        let value = unsafe {
            let base = self.as_mut_ptr();
            let value = base.add(index).read();
            ptr::copy(base.add(index + 1), base.add(index), len - index - 1);
            self.set_len(len - 1);
            value
        };
        self.relocate_to(target);
        Ok(value)
    }

    /// Panicking form of [`Vector::try_remove_at`].
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> T {
        enforce(self.try_remove_at(index))
    }

    /// Removes the first element equal to `value` and returns its former index.
    ///
    /// # Errors
    /// [`VectorError::NotFound`] if no element matches.
    pub fn try_remove_value<F>(&mut self, value: &T, equals: F) -> Result<usize, VectorError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let index = self.try_index_of(value, equals)?;
        self.try_remove_at(index)?;
        Ok(index)
    }

    /// Panicking form of [`Vector::try_remove_value`].
    #[track_caller]
    pub fn remove_value<F>(&mut self, value: &T, equals: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        enforce(self.try_remove_value(value, equals))
    }

    /// Drops every element and lets the capacity fall back toward the floor.
    ///
    /// # Panics
    /// Panics, before dropping anything, if a custom policy returns no capacity
    /// usable for an empty vector.
    #[track_caller]
    pub fn clear(&mut self) {
        let len = self.len();
        let target = enforce(self.plan_shrink(0));
        // SAFETY: the length is zeroed before the drops run, so a panicking
        // destructor cannot lead to a double drop.
        unsafe {
            self.set_len(0);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len));
        }
        self.relocate_to(target);
    }

    /// Policy target for the vector once its length has dropped to `length`.
    fn plan_shrink(&self, length: usize) -> Result<usize, VectorError> {
        let planned = Meta {
            length,
            ..self.meta()
        };
        self.plan_capacity(&planned, length)
    }
}

impl<T: Clone> Vector<T> {
    /// Appends a clone of every element of `other`, one push at a time.
    #[track_caller]
    pub fn concat(&mut self, other: &Vector<T>) {
        for item in other {
            self.push(item.clone());
        }
    }

    /// Duplicates the vector: same capacity, same configuration, cloned elements.
    ///
    /// For `Copy` element types this is a plain bitwise copy. Nested vectors
    /// are cloned through their own `Clone`, never aliased.
    pub fn copy(&self) -> Vector<T> {
        let source = self.header();
        let header = Header::new(
            source.meta.capacity,
            source.meta.initial_capacity,
            source.free_fn,
            source.capacity_fn,
        );
        // SAFETY: a freshly allocated block with length 0 is a valid vector.
        let mut copy = unsafe { Vector::from_raw(raw::allocate(header)) };
        for (slot, item) in self.iter().enumerate() {
            // SAFETY: `slot < len <= capacity` of the new block; the length is
            // bumped after each write so a panicking `clone` leaves it valid.
            unsafe {
                copy.as_mut_ptr().add(slot).write(item.clone());
                copy.set_len(slot + 1);
            }
        }
        copy
    }
}
