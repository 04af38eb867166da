//! `Vector`: a growable array whose metadata lives in front of its elements.
//!
//! A `Vector<T>` is a single pointer to element slot 0 of a heap block that
//! starts with a header (element size, length, capacity, capacity floor and two
//! optional hooks). See [`crate::alloc`] for the block layout.
//!
//! Design:
//! - Every length change re-evaluates the capacity policy, which may move the
//!   whole block. Operations that can move it take `&mut self`, so no slice,
//!   element reference or iterator can survive across them.
//! - Raw pointers from [`Vector::as_ptr`] / [`Vector::as_mut_ptr`] are not
//!   tracked by the borrow checker: treat them as stale after any push, pop,
//!   insert, remove, clear or capacity-floor change.
//! - The capacity policy and the teardown hook are per-instance and travel
//!   with the block.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use crate::alloc::constants::DEFAULT_INITIAL_CAPACITY;
use crate::alloc::header::{header_from_data, Header, Meta};
use crate::alloc::policy::{target_capacity, CapacityFn};
use crate::alloc::raw;
use crate::error::{enforce, VectorError};

/// A user-supplied teardown hook, run instead of the default teardown when a
/// vector is destroyed or dropped.
///
/// The hook receives the vector's remaining contents as a [`Teardown`]. It can
/// move elements out (for example to destroy nested vectors in a particular
/// order); anything it leaves behind is dropped and the block is released when
/// the `Teardown` goes out of scope.
pub type FreeFn<T> = for<'a> fn(Teardown<'a, T>);

/// Construction-time configuration of a [`Vector`].
pub struct VectorOptions<T> {
    /// Capacity the vector starts with, and the floor of the default policy.
    pub initial_capacity: usize,
    /// Teardown hook, see [`FreeFn`].
    pub free_fn: Option<FreeFn<T>>,
    /// Replacement capacity policy, see [`CapacityFn`].
    pub capacity_fn: Option<CapacityFn>,
}

impl<T> VectorOptions<T> {
    /// Default options: a floor of [`DEFAULT_INITIAL_CAPACITY`] and no hooks.
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            free_fn: None,
            capacity_fn: None,
        }
    }

    /// Sets the initial capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the teardown hook.
    #[must_use]
    pub fn with_free_fn(mut self, free_fn: FreeFn<T>) -> Self {
        self.free_fn = Some(free_fn);
        self
    }

    /// Sets the capacity policy.
    #[must_use]
    pub fn with_capacity_fn(mut self, capacity_fn: CapacityFn) -> Self {
        self.capacity_fn = Some(capacity_fn);
        self
    }
}

impl<T> Default for VectorOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for VectorOptions<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VectorOptions<T> {}

impl<T> fmt::Debug for VectorOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorOptions")
            .field("initial_capacity", &self.initial_capacity)
            .field("free_fn", &self.free_fn.is_some())
            .field("capacity_fn", &self.capacity_fn.is_some())
            .finish()
    }
}

/// A growable, contiguous array with its metadata stored in the same block.
pub struct Vector<T> {
    ptr: NonNull<T>,
    // Owns `T`s, and invariant in `T` because the header stores hooks typed over it.
    _marker: PhantomData<(T, fn(T) -> T)>,
}

// SAFETY: a `Vector` owns its block exclusively; sending or sharing it is
// exactly as safe as sending or sharing the elements.
unsafe impl<T: Send> Send for Vector<T> {}
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T> Vector<T> {
    /// Creates an empty vector with [`DEFAULT_INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_options(VectorOptions::new())
    }

    /// Creates an empty vector whose capacity floor is `initial_capacity`.
    ///
    /// # Panics
    /// Panics if `initial_capacity` is zero.
    #[track_caller]
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self::with_options(VectorOptions::new().with_initial_capacity(initial_capacity))
    }

    /// Creates an empty vector configured by `options`.
    ///
    /// The block is allocated with exactly `options.initial_capacity` slots.
    ///
    /// # Panics
    /// Panics if `options.initial_capacity` is zero.
    #[track_caller]
    pub fn with_options(options: VectorOptions<T>) -> Self {
        if options.initial_capacity == 0 {
            enforce::<()>(Err(VectorError::ZeroInitialCapacity));
        }
        let header = Header::new(
            options.initial_capacity,
            options.initial_capacity,
            options.free_fn,
            options.capacity_fn,
        );
        // SAFETY: the block was just allocated and belongs to nobody else.
        unsafe { Self::from_raw(raw::allocate(header)) }
    }

    /// Creates a vector holding clones of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        items.iter().cloned().collect()
    }

    /// Wraps slot 0 of a block produced by [`raw::allocate`].
    ///
    /// # Safety
    /// `ptr` must come from `raw::allocate::<T>` and not be owned by anything else.
    #[inline]
    pub(crate) unsafe fn from_raw(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn header(&self) -> &Header<T> {
        // SAFETY: `ptr` is slot 0 of the live block owned by `self`.
        unsafe { header_from_data(self.ptr).as_ref() }
    }

    #[inline]
    pub(crate) fn header_mut(&mut self) -> &mut Header<T> {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { header_from_data(self.ptr).as_mut() }
    }

    /// Sets the number of live elements without touching them or the capacity.
    ///
    /// # Safety
    /// `len` must not exceed the capacity, and slots `[0, len)` must hold
    /// initialized elements.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.header_mut().meta.length = len;
    }

    /// A copy of the numeric header fields.
    #[inline]
    pub fn meta(&self) -> Meta {
        self.header().meta
    }

    /// Byte size of one element.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.header().meta.element_size
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.header().meta.length
    }

    /// Number of allocated element slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.header().meta.capacity
    }

    /// The capacity floor of the default policy.
    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.header().meta.initial_capacity
    }

    /// `true` when every slot is in use.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.header().meta.is_full()
    }

    /// `true` when the capacity is above the floor and less than half of it is used.
    #[inline]
    pub fn is_underfilled(&self) -> bool {
        self.header().meta.is_underfilled()
    }

    /// `true` when there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.header().meta.is_empty()
    }

    /// Changes the capacity floor and immediately re-applies the capacity policy.
    ///
    /// # Errors
    /// [`VectorError::ZeroInitialCapacity`] for a floor of zero, or
    /// [`VectorError::PolicyTooSmall`] if a custom policy then asks for fewer
    /// slots than there are elements. Either way the vector is left unchanged.
    pub fn try_set_initial_capacity(&mut self, initial_capacity: usize) -> Result<(), VectorError> {
        if initial_capacity == 0 {
            return Err(VectorError::ZeroInitialCapacity);
        }
        let planned = Meta {
            initial_capacity,
            ..self.meta()
        };
        let target = self.plan_capacity(&planned, planned.length)?;
        self.header_mut().meta.initial_capacity = initial_capacity;
        self.relocate_to(target);
        Ok(())
    }

    /// Panicking form of [`Vector::try_set_initial_capacity`].
    #[track_caller]
    pub fn set_initial_capacity(&mut self, initial_capacity: usize) {
        enforce(self.try_set_initial_capacity(initial_capacity));
    }

    /// Installs a teardown hook, replacing any previous one.
    pub fn set_free_fn(&mut self, free_fn: FreeFn<T>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(element_size = self.element_size(), "installing vector free hook");
        self.header_mut().free_fn = Some(free_fn);
    }

    /// Restores the default teardown.
    pub fn clear_free_fn(&mut self) {
        self.header_mut().free_fn = None;
    }

    /// `true` if a teardown hook is installed.
    pub fn has_free_fn(&self) -> bool {
        self.header().free_fn.is_some()
    }

    /// Installs a capacity policy, replacing the default one.
    ///
    /// The policy takes effect at the next length change; see [`CapacityFn`]
    /// for what it must return.
    pub fn set_capacity_fn(&mut self, capacity_fn: CapacityFn) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            element_size = self.element_size(),
            capacity = self.capacity(),
            "installing custom capacity policy"
        );
        self.header_mut().capacity_fn = Some(capacity_fn);
    }

    /// Restores the default capacity policy.
    pub fn clear_capacity_fn(&mut self) {
        self.header_mut().capacity_fn = None;
    }

    /// `true` if a custom capacity policy is installed.
    pub fn has_capacity_fn(&self) -> bool {
        self.header().capacity_fn.is_some()
    }

    /// Re-applies the capacity policy to the current length, relocating the
    /// block if the target differs from the current capacity.
    ///
    /// # Panics
    /// Panics if a custom policy returns less than the current length.
    #[track_caller]
    pub fn resize_if_needed(&mut self) {
        let len = self.len();
        enforce(self.try_fit(len));
    }

    /// Evaluates the capacity policy and relocates to its target, checking that
    /// the target leaves room for `required` elements.
    pub(crate) fn try_fit(&mut self, required: usize) -> Result<(), VectorError> {
        let target = self.plan_capacity(&self.meta(), required)?;
        self.relocate_to(target);
        Ok(())
    }

    /// The capacity this vector's policy picks for `meta`, rejected if it is
    /// below `required`. Nothing is changed, so callers can plan a length
    /// change before committing to it.
    pub(crate) fn plan_capacity(&self, meta: &Meta, required: usize) -> Result<usize, VectorError> {
        let target = target_capacity(meta, self.header().capacity_fn);
        if target < required {
            return Err(VectorError::PolicyTooSmall { target, required });
        }
        Ok(target)
    }

    /// Moves the block to `target` slots unless it already has that many.
    ///
    /// `target` must come from [`Vector::plan_capacity`] for the current length.
    pub(crate) fn relocate_to(&mut self, target: usize) {
        let meta = self.header().meta;
        debug_assert!(target >= meta.length);
        if target != meta.capacity {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                length = meta.length,
                from = meta.capacity,
                to = target,
                "relocating vector"
            );
            // SAFETY: `ptr` is live and `target >= length`.
            self.ptr = unsafe { raw::relocate(self.ptr, target) };
        }
    }

    /// Pointer to slot 0. Stale after any operation that changes the length.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to slot 0. Stale after any operation that changes the length.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized and `ptr` is aligned and non-null.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    /// The live elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
    }

    /// Destroys the vector.
    ///
    /// Runs the teardown hook if one is installed, otherwise drops every element
    /// and releases the block. Equivalent to dropping the vector, spelled out.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        let free_fn = self.header().free_fn;
        let teardown = Teardown::new(self);
        match free_fn {
            Some(hook) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(length = teardown.len(), "running vector free hook");
                hook(teardown);
            }
            None => drop(teardown),
        }
    }
}

/// The contents of a vector that is being destroyed.
///
/// Handed to a [`FreeFn`] hook. Dropping it drops whatever elements are still
/// inside and releases the block, so a hook cannot leak or double-free the
/// vector whatever it does.
pub struct Teardown<'a, T> {
    data: NonNull<T>,
    _marker: PhantomData<&'a mut Vector<T>>,
}

impl<'a, T> Teardown<'a, T> {
    fn new(vector: &'a mut Vector<T>) -> Self {
        Self {
            data: vector.ptr,
            _marker: PhantomData,
        }
    }

    fn header(&self) -> &Header<T> {
        // SAFETY: the block stays live until `self` is dropped.
        unsafe { header_from_data(self.data).as_ref() }
    }

    /// A copy of the numeric header fields.
    pub fn meta(&self) -> Meta {
        self.header().meta
    }

    /// Number of elements still inside.
    pub fn len(&self) -> usize {
        self.header().meta.length
    }

    /// `true` when every element has been moved out.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The remaining elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `[0, len)` are initialized.
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len()) }
    }

    /// The remaining elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: slots `[0, len)` are initialized and `self` is the only accessor.
        unsafe { slice::from_raw_parts_mut(self.data.as_ptr(), len) }
    }

    /// Moves the last remaining element out. The block is not resized.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        // SAFETY: slot `len - 1` is initialized; shrinking the length first
        // hands ownership of it to the caller.
        unsafe {
            header_from_data(self.data).as_mut().meta.length = len - 1;
            Some(self.data.as_ptr().add(len - 1).read())
        }
    }
}

impl<T> Drop for Teardown<'_, T> {
    fn drop(&mut self) {
        let _release = ReleaseOnDrop(self.data);
        let len = self.len();
        // SAFETY: slots `[0, len)` are initialized and dropped exactly once;
        // the length is cleared first so nothing observes them afterwards.
        unsafe {
            header_from_data(self.data).as_mut().meta.length = 0;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data.as_ptr(), len));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Teardown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("remaining", &self.as_slice())
            .finish()
    }
}

/// Releases a block even if dropping its elements panics.
struct ReleaseOnDrop<T>(NonNull<T>);

impl<T> Drop for ReleaseOnDrop<T> {
    fn drop(&mut self) {
        // SAFETY: the owning `Teardown` hands the block over and never touches it again.
        unsafe { raw::deallocate(self.0) };
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<Vector<U>> for Vector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vector<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T, U> PartialEq<[U]> for Vector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for Vector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(*item);
        }
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
