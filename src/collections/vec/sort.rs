//! Bottom-up merge sort.
//!
//! Runs of width 1, 2, 4, ... are merged pairwise, left to right, until one run
//! covers the whole slice. Each merge copies its two runs into temporary
//! buffers and writes the result back in place, so the sort is stable and uses
//! O(n) extra memory at most.

use core::cmp::Ordering;
use core::ptr;

/// Sorts `v` stably by `compare`.
pub(crate) fn merge_sort<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len - width {
            let mid = start + width;
            let end = mid.saturating_add(width).min(len);
            merge(&mut v[start..end], width, &mut compare);
            start = end;
        }
        width = width.saturating_mul(2);
    }
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]`.
fn merge<T, F>(v: &mut [T], mid: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    debug_assert!(mid > 0 && mid < len);

    // The buffers only ever hold bitwise copies; their length stays 0 so that
    // dropping them frees memory without dropping elements.
    let mut left = Vec::<T>::with_capacity(mid);
    let mut right = Vec::<T>::with_capacity(len - mid);

    // SAFETY: both runs are copied out whole, after which every element of `v`
    // exists exactly once across `v[..dest]`, `left[l..]` and `right[r..]`.
    // `Hole` restores that invariant into `v` if `compare` panics.
    unsafe {
        ptr::copy_nonoverlapping(v.as_ptr(), left.as_mut_ptr(), mid);
        ptr::copy_nonoverlapping(v.as_ptr().add(mid), right.as_mut_ptr(), len - mid);

        let mut hole = Hole {
            left: left.as_ptr(),
            left_len: mid,
            l: 0,
            right: right.as_ptr(),
            right_len: len - mid,
            r: 0,
            dest: v.as_mut_ptr(),
            d: 0,
        };

        while hole.l < hole.left_len && hole.r < hole.right_len {
            let from_left = &*hole.left.add(hole.l);
            let from_right = &*hole.right.add(hole.r);
            // Ties go to the left run, which keeps the sort stable.
            if compare(from_left, from_right) == Ordering::Greater {
                ptr::copy_nonoverlapping(from_right, hole.dest.add(hole.d), 1);
                hole.r += 1;
            } else {
                ptr::copy_nonoverlapping(from_left, hole.dest.add(hole.d), 1);
                hole.l += 1;
            }
            hole.d += 1;
        }
        // Dropping `hole` copies whichever run is left over into place.
    }
}

/// The unmerged remainder of a merge in progress.
struct Hole<T> {
    left: *const T,
    left_len: usize,
    l: usize,
    right: *const T,
    right_len: usize,
    r: usize,
    dest: *mut T,
    d: usize,
}

impl<T> Drop for Hole<T> {
    fn drop(&mut self) {
        // SAFETY: `dest[d..]` has exactly `(left_len - l) + (right_len - r)`
        // slots whose contents were already copied out into the buffers.
        unsafe {
            let rest_left = self.left_len - self.l;
            ptr::copy_nonoverlapping(self.left.add(self.l), self.dest.add(self.d), rest_left);
            let rest_right = self.right_len - self.r;
            ptr::copy_nonoverlapping(
                self.right.add(self.r),
                self.dest.add(self.d + rest_left),
                rest_right,
            );
        }
    }
}
