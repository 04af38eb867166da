//! Searching, reordering and functional operations.
//!
//! Operations that build a new vector (`filter`, `map`, `slice`) return one
//! with default configuration: the default capacity floor and no hooks.

use core::cmp::Ordering;

use super::sort::merge_sort;
use super::vector::Vector;
use crate::error::{enforce, VectorError};

impl<T> Vector<T> {
    /// Index of the first element for which `equals(element, value)` holds.
    ///
    /// # Errors
    /// [`VectorError::NotFound`] if there is none.
    pub fn try_index_of<F>(&self, value: &T, mut equals: F) -> Result<usize, VectorError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.iter()
            .position(|item| equals(item, value))
            .ok_or(VectorError::NotFound)
    }

    /// Panicking form of [`Vector::try_index_of`].
    #[track_caller]
    pub fn index_of<F>(&self, value: &T, equals: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        enforce(self.try_index_of(value, equals))
    }

    /// Number of elements for which `equals(element, value)` holds.
    pub fn count<F>(&self, value: &T, mut equals: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.iter().filter(|item| equals(*item, value)).count()
    }

    /// Reverses the elements in place with `len / 2` swaps.
    pub fn reverse(&mut self) {
        let len = self.len();
        let items = self.as_mut_slice();
        for i in 0..len / 2 {
            items.swap(i, len - 1 - i);
        }
    }

    /// Sorts the elements stably with a bottom-up merge sort.
    ///
    /// `compare(a, b)` returns `Less` if `a` belongs before `b`, `Greater` if
    /// after, and `Equal` to keep their current relative order.
    pub fn sort<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self.as_mut_slice(), compare);
    }

    /// Calls `f` on every element in order, allowing it to modify them.
    pub fn foreach<F>(&mut self, f: F)
    where
        F: FnMut(&mut T),
    {
        self.iter_mut().for_each(f);
    }

    /// A new vector holding `f(element)` for every element, in order.
    pub fn map<U, F>(&self, f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// Left fold: `acc = f(acc, element)` for every element, starting at `initial`.
    pub fn reduce<A, F>(&self, f: F, initial: A) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(initial, f)
    }

    /// `true` as soon as one element satisfies `predicate`.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }

    /// `true` unless some element fails `predicate`; vacuously `true` when empty.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().all(predicate)
    }
}

impl<T: Clone> Vector<T> {
    /// A new vector holding clones of the elements that satisfy `predicate`, in order.
    pub fn filter<F>(&self, mut predicate: F) -> Vector<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|item| predicate(*item)).cloned().collect()
    }

    /// A new vector holding clones of the elements at `start`, `start + step`,
    /// `start + 2 * step`, ... below `end`.
    ///
    /// # Errors
    /// [`VectorError::InvalidSlice`] unless `start < len` and `end <= len`;
    /// [`VectorError::ZeroStep`] if `step` is zero.
    pub fn try_slice(&self, start: usize, end: usize, step: usize) -> Result<Vector<T>, VectorError> {
        let len = self.len();
        if start >= len || end > len {
            return Err(VectorError::InvalidSlice { start, end, len });
        }
        if step == 0 {
            return Err(VectorError::ZeroStep);
        }
        let items = self.as_slice();
        Ok((start..end).step_by(step).map(|i| items[i].clone()).collect())
    }

    /// Panicking form of [`Vector::try_slice`].
    #[track_caller]
    pub fn slice(&self, start: usize, end: usize, step: usize) -> Vector<T> {
        enforce(self.try_slice(start, end, step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::DEFAULT_INITIAL_CAPACITY;

    fn same(a: &i32, b: &i32) -> bool {
        a == b
    }

    #[test]
    fn test_index_of_and_count() {
        let v = Vector::from([3, 1, 3, 2, 3]);
        assert_eq!(v.index_of(&3, same), 0);
        assert_eq!(v.index_of(&2, same), 3);
        assert_eq!(v.try_index_of(&7, same), Err(VectorError::NotFound));
        assert_eq!(v.count(&3, same), 3);
        assert_eq!(v.count(&7, same), 0);
    }

    #[test]
    fn test_reverse() {
        let mut odd = Vector::from([1, 2, 3, 4, 5]);
        odd.reverse();
        assert_eq!(odd, [5, 4, 3, 2, 1]);

        let mut even = Vector::from([1, 2, 3, 4]);
        even.reverse();
        assert_eq!(even, [4, 3, 2, 1]);

        let mut empty: Vector<i32> = Vector::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sort_with_custom_order() {
        let mut v = Vector::from([4, 9, 1, 7, 3]);
        v.sort(|a, b| b.cmp(a));
        assert_eq!(v, [9, 7, 4, 3, 1]);
    }

    #[test]
    fn test_filter_map_reduce() {
        let v: Vector<i32> = (1..=10).collect();

        let evens = v.filter(|x| x % 2 == 0);
        assert_eq!(evens, [2, 4, 6, 8, 10]);
        assert_eq!(evens.initial_capacity(), DEFAULT_INITIAL_CAPACITY);

        let labels = v.map(|x| format!("#{x}"));
        assert_eq!(labels[0], "#1");
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.element_size(), core::mem::size_of::<String>());

        assert_eq!(v.reduce(|acc, x| acc + x, 0), 55);
        assert_eq!(v.reduce(|acc: String, x| acc + &x.to_string(), String::new()), "12345678910");
    }

    #[test]
    fn test_foreach_mutates_in_place() {
        let mut v = Vector::from([1, 2, 3]);
        v.foreach(|x| *x *= 10);
        assert_eq!(v, [10, 20, 30]);
    }

    #[test]
    fn test_any_all() {
        let v = Vector::from([2, 4, 6]);
        assert!(v.all(|x| x % 2 == 0));
        assert!(!v.any(|x| *x > 6));
        assert!(v.any(|x| *x == 4));

        let empty: Vector<i32> = Vector::new();
        assert!(empty.all(|_| false));
        assert!(!empty.any(|_| true));
    }

    #[test]
    fn test_slice_steps() {
        let v: Vector<i32> = (0..10).collect();
        assert_eq!(v.slice(0, 10, 2), [0, 2, 4, 6, 8]);
        assert_eq!(v.slice(1, 10, 3), [1, 4, 7]);
        assert_eq!(v.slice(9, 10, 1), [9]);
        assert!(v.slice(5, 3, 1).is_empty());
    }

    #[test]
    fn test_slice_rejects_bad_bounds() {
        let v: Vector<i32> = (0..4).collect();
        assert_eq!(
            v.try_slice(4, 4, 1).unwrap_err(),
            VectorError::InvalidSlice { start: 4, end: 4, len: 4 }
        );
        assert_eq!(
            v.try_slice(0, 5, 1).unwrap_err(),
            VectorError::InvalidSlice { start: 0, end: 5, len: 4 }
        );
        assert_eq!(v.try_slice(0, 4, 0).unwrap_err(), VectorError::ZeroStep);
    }
}
