//! In-place quicksort with a median-of-three pivot and a Hoare style partition.
//!
//! Both cursors stop on keys equal to the pivot. The left one advances only while its key is
//! strictly less, not while it is less or equal, and the right one only while its key is strictly
//! greater. Runs of equal keys are swapped across and split evenly instead of all landing on one
//! side, so inputs with many duplicates stay away from the quadratic case. The partition result
//! is the same: `[start, right]` is not greater than the pivot, `[left, end]` is not less, and
//! `left == right + 1`.

use core::marker::PhantomData;
use core::ptr;

use crate::pivot;

/// Where the ordering used by a sort comes from.
///
/// Only a natural order (`Ord` or [`crate::Unmanaged::natural_cmp`]) is taken to be a strict
/// total order. Caller supplied comparators and key selectors may violate it, in which case the
/// result is unspecified but still a permutation of the input, and the checks that depend on the
/// order being consistent are skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Order {
    Natural,
    Caller,
}

/// Index based view of the region being sorted.
///
/// The engine only ever asks "does the element at `a` order before the element at `b`" and
/// "swap these two positions", which lets the natural, comparer, key-selector and
/// key-selector + comparer shapes all share one body.
pub(crate) trait SortAccess {
    fn len(&self) -> usize;

    fn is_less(&mut self, a: usize, b: usize) -> bool;

    fn swap(&mut self, a: usize, b: usize);

    fn order(&self) -> Order;
}

/// Bounds checked access through a slice, used for every managed element type and for all
/// key-selector orderings.
pub(crate) struct SliceAccess<'a, T, F> {
    v: &'a mut [T],
    is_less: F,
    order: Order,
}

impl<'a, T, F> SliceAccess<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    pub(crate) fn new(v: &'a mut [T], is_less: F, order: Order) -> Self {
        Self { v, is_less, order }
    }
}

impl<T, F> SortAccess for SliceAccess<'_, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    #[inline]
    fn len(&self) -> usize {
        self.v.len()
    }

    #[inline]
    fn is_less(&mut self, a: usize, b: usize) -> bool {
        (self.is_less)(&self.v[a], &self.v[b])
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.v.swap(a, b);
    }

    #[inline]
    fn order(&self) -> Order {
        self.order
    }
}

/// Raw pointer access for unmanaged element types. Swaps are plain pointer swaps, no bounds
/// checks in release builds.
pub(crate) struct PtrAccess<'a, T, F> {
    base: *mut T,
    len: usize,
    is_less: F,
    order: Order,
    _marker: PhantomData<&'a mut [T]>,
}

impl<'a, T, F> PtrAccess<'a, T, F>
where
    T: crate::Unmanaged,
    F: FnMut(&T, &T) -> bool,
{
    pub(crate) fn new(v: &'a mut [T], is_less: F, order: Order) -> Self {
        Self {
            base: v.as_mut_ptr(),
            len: v.len(),
            is_less,
            order,
            _marker: PhantomData,
        }
    }
}

impl<T, F> SortAccess for PtrAccess<'_, T, F>
where
    T: crate::Unmanaged,
    F: FnMut(&T, &T) -> bool,
{
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_less(&mut self, a: usize, b: usize) -> bool {
        debug_assert!(a < self.len && b < self.len);

        // SAFETY: The engine only produces positions inside the inclusive range it was handed,
        // and `quicksort` checks that range against `len` before starting. `base` is valid for
        // `len` elements for the lifetime `'a` of the exclusive borrow.
        unsafe { (self.is_less)(&*self.base.add(a), &*self.base.add(b)) }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.len && b < self.len);

        // SAFETY: See `is_less`. `ptr::swap` allows `a == b`.
        unsafe { ptr::swap(self.base.add(a), self.base.add(b)) }
    }

    #[inline]
    fn order(&self) -> Order {
        self.order
    }
}

/// Sorts the inclusive range `[start, end]` of `access`.
///
/// Recursion always goes into the smaller partition and the larger one is handled by the loop,
/// so the stack depth stays within *O*(log(*n*)) even for adversarial inputs. The running time
/// is *O*(*n*^2) worst-case.
pub(crate) fn quicksort<A: SortAccess>(access: &mut A, mut start: usize, mut end: usize) {
    assert!(
        start > end || end < access.len(),
        "sort range [{start}, {end}] exceeds length {}",
        access.len()
    );

    loop {
        if end <= start {
            return;
        }

        if end == start + 1 {
            if access.is_less(end, start) {
                access.swap(start, end);
            }
            return;
        }

        let (right, left) = partition(access, start, end);

        if right - start < end - left {
            quicksort(access, start, right);
            start = left;
        } else {
            quicksort(access, left, end);
            end = right;
        }
    }
}

/// Hoare style partition of `[start, end]` around the median of the first, middle and last
/// element. Requires at least three elements.
///
/// Returns `(right, left)` such that every element in `[start, right]` is not greater than the
/// pivot and every element in `[left, end]` is not less than it, with `left == right + 1`.
fn partition<A: SortAccess>(access: &mut A, start: usize, end: usize) -> (usize, usize) {
    debug_assert!(end - start >= 2);

    let mid = start + (end - start) / 2;

    // The pivot is compared by position. It is tracked through swaps instead of copied out, so
    // element types don't need to be `Clone`.
    let mut pivot = pivot::median_of_three(access, start, mid, end);

    let mut left = start;
    let mut right = end;

    loop {
        // The bounds only matter for comparison functions that don't implement a total order.
        // With a total order the pivot itself stops both cursors.
        while left < end && access.is_less(left, pivot) {
            left += 1;
        }

        while right > start && access.is_less(pivot, right) {
            right -= 1;
        }

        if left >= right {
            break;
        }

        access.swap(left, right);

        if pivot == left {
            pivot = right;
        } else if pivot == right {
            pivot = left;
        }

        left += 1;
        right -= 1;
    }

    if left == right {
        // Both cursors stopped on an element equal to the pivot. It may join either side, pick
        // the one that keeps both partitions strictly smaller than the input.
        if right > start {
            right -= 1;
        } else {
            left += 1;
        }
    } else if left > right + 1 {
        // Only reachable when `is_less` is not a strict weak order. Positions passed by both
        // cursors join the left side.
        right = left - 1;
    }

    self_check!(
        left == right + 1,
        "partition cursors differ by exactly one position"
    );

    (right, left)
}

/// `true` if no element of `[start, end]` orders before its predecessor.
pub(crate) fn is_sorted<A: SortAccess>(access: &mut A, start: usize, end: usize) -> bool {
    (start..end).all(|i| !access.is_less(i + 1, i))
}

/// Post-sort check for the callers. Trivially `true` for caller supplied orders, which may be
/// inconsistent.
pub(crate) fn is_sorted_if_natural<A: SortAccess>(
    access: &mut A,
    start: usize,
    end: usize,
) -> bool {
    access.order() == Order::Caller || is_sorted(access, start, end)
}
