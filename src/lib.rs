//! Allocation free, type generic array primitives: in-place sorting, sequence equality and
//! comparison, overlap safe bulk copy and in-place reversal.
//!
//! The functions at the crate root work for any element type, through its `Ord`/`PartialEq`
//! implementation or a caller supplied comparator or key selector. The [`unmanaged`] module
//! holds the same operations specialized for fixed-width scalars, working on raw bytes and
//! machine words.
//!
//! None of the operations allocate, except [`duplicate`] and [`unmanaged::duplicate`] which are
//! defined to return a new buffer.
//!
//! ```
//! let mut v = [5, 3, 1, 4, 2];
//! arraykit::sort(&mut v);
//! assert_eq!(v, [1, 2, 3, 4, 5]);
//!
//! let mut buf = [1u32, 2, 3, 4, 5];
//! arraykit::unmanaged::copy_within(&mut buf, 0, 1, 4).unwrap();
//! assert_eq!(buf, [1, 1, 2, 3, 4]);
//! ```

use core::cmp::Ordering;

/// Panics with [`ArrayError::InternalInvariantViolation`] if `$cond` doesn't hold. Compiled out
/// unless debug assertions or the `self_check` feature are enabled.
macro_rules! self_check {
    ($cond:expr, $invariant:literal) => {
        if cfg!(any(debug_assertions, feature = "self_check")) && !$cond {
            panic!(
                "{}",
                $crate::ArrayError::InternalInvariantViolation {
                    invariant: $invariant
                }
            );
        }
    };
}

mod copy;
mod error;
mod pivot;
mod quicksort;
pub mod range;
mod relational;
mod reverse;
pub mod unmanaged;

pub use copy::BYTEWISE_THRESHOLD;
pub use error::{ArrayError, Result};
pub use range::{Index, IndexRange};
pub use relational::WORDWISE_THRESHOLD;
pub use unmanaged::{ElementKind, Unmanaged};

use quicksort::{Order, SliceAccess};

// --- Sort ---

/// Sorts the slice, but might not preserve the order of equal elements.
///
/// In-place quicksort with a median-of-three pivot. Returns the same slice for chaining.
#[inline]
pub fn sort<T>(v: &mut [T]) -> &mut [T]
where
    T: Ord,
{
    sort_impl(v, Order::Natural, |a, b| a.lt(b))
}

/// Sorts the slice with a comparator function, but might not preserve the order of equal
/// elements.
///
/// The comparator should implement a total order. If it doesn't, the resulting order is
/// unspecified, but all original elements remain in the slice.
///
/// # Panics
///
/// Only if `compare` panics. The slice then still holds all of its original elements.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F) -> &mut [T]
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_impl(v, Order::Caller, |a, b| compare(a, b) == Ordering::Less)
}

/// Sorts the slice by the key `f` extracts.
///
/// Keys are not cached, `f` runs twice per comparison and should be cheap and pure.
#[inline]
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F) -> &mut [T]
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_impl(v, Order::Caller, |a, b| f(a).lt(&f(b)))
}

/// Sorts the slice by the key `f` extracts, ordering keys with `compare`.
#[inline]
pub fn sort_by_key_with<T, K, F, C>(v: &mut [T], mut f: F, mut compare: C) -> &mut [T]
where
    F: FnMut(&T) -> K,
    C: FnMut(&K, &K) -> Ordering,
{
    sort_impl(v, Order::Caller, |a, b| compare(&f(a), &f(b)) == Ordering::Less)
}

/// Sorts `count` elements starting at `offset`, leaving the rest of the slice untouched.
pub fn sort_range<T>(v: &mut [T], offset: isize, count: isize) -> Result<&mut [T]>
where
    T: Ord,
{
    let (offset, count) = range::offset_count(v.len(), offset, count)?;

    if count >= 2 {
        sort_inclusive(v, offset, offset + count - 1, Order::Natural, |a: &T, b: &T| a.lt(b));
    }

    Ok(v)
}

#[inline]
fn sort_impl<T, F>(v: &mut [T], order: Order, is_less: F) -> &mut [T]
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() >= 2 {
        let end = v.len() - 1;
        sort_inclusive(v, 0, end, order, is_less);
    }

    v
}

fn sort_inclusive<T, F>(v: &mut [T], start: usize, end: usize, order: Order, is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    tracing::trace!(start, end, "sort");

    let mut access = SliceAccess::new(v, is_less, order);
    quicksort::quicksort(&mut access, start, end);

    self_check!(
        quicksort::is_sorted_if_natural(&mut access, start, end),
        "range is ascending after sort"
    );
}

// --- Equality and comparison ---

/// `true` if both slices have the same length and all positional pairs are equal.
#[inline]
pub fn sequence_equal<T>(a: &[T], b: &[T]) -> bool
where
    T: PartialEq,
{
    relational::equal_by(a, b, |x, y| x == y)
}

/// Same as [`sequence_equal`] with a caller supplied equality.
#[inline]
pub fn sequence_equal_by<T, F>(a: &[T], b: &[T], eq: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    relational::equal_by(a, b, eq)
}

/// Compares the keys `f` extracts.
#[inline]
pub fn sequence_equal_by_key<T, K, F>(a: &[T], b: &[T], mut f: F) -> bool
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    relational::equal_by(a, b, |x, y| f(x) == f(y))
}

/// Compares the keys `f` extracts with `eq`.
#[inline]
pub fn sequence_equal_by_key_with<T, K, F, E>(a: &[T], b: &[T], mut f: F, mut eq: E) -> bool
where
    F: FnMut(&T) -> K,
    E: FnMut(&K, &K) -> bool,
{
    relational::equal_by(a, b, |x, y| eq(&f(x), &f(y)))
}

/// Lexicographic comparison. The first non-equal pair decides, on a common prefix the shorter
/// slice orders first.
#[inline]
pub fn sequence_compare<T>(a: &[T], b: &[T]) -> Ordering
where
    T: Ord,
{
    relational::compare_by(a, b, |x, y| x.cmp(y))
}

#[inline]
pub fn sequence_compare_by<T, F>(a: &[T], b: &[T], compare: F) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    relational::compare_by(a, b, compare)
}

#[inline]
pub fn sequence_compare_by_key<T, K, F>(a: &[T], b: &[T], mut f: F) -> Ordering
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    relational::compare_by(a, b, |x, y| f(x).cmp(&f(y)))
}

#[inline]
pub fn sequence_compare_by_key_with<T, K, F, C>(
    a: &[T],
    b: &[T],
    mut f: F,
    mut compare: C,
) -> Ordering
where
    F: FnMut(&T) -> K,
    C: FnMut(&K, &K) -> Ordering,
{
    relational::compare_by(a, b, |x, y| compare(&f(x), &f(y)))
}

/// Index of the first position where the slices differ. If one is a prefix of the other that's
/// the length of the shorter one, `None` means they are equal.
#[inline]
pub fn mismatch<T>(a: &[T], b: &[T]) -> Option<usize>
where
    T: PartialEq,
{
    relational::mismatch_by(a, b, |x, y| x == y)
}

// --- Copy ---

/// Assigns clones of all elements of `src` to the front of `dst`.
///
/// This is the logical copy, every assignment goes through `Clone` and drops the overwritten
/// value. Use [`unmanaged::copy`] for raw byte copies.
pub fn copy<T>(src: &[T], dst: &mut [T]) -> Result<()>
where
    T: Clone,
{
    if dst.len() < src.len() {
        tracing::debug!(
            required = src.len(),
            available = dst.len(),
            "copy destination too short"
        );
        return Err(ArrayError::InsufficientCapacity {
            required: src.len(),
            available: dst.len(),
        });
    }

    dst[..src.len()].clone_from_slice(src);
    Ok(())
}

/// Logical copy of `count` elements from `src_offset` to `dst_offset` inside one buffer. The runs
/// may overlap, the result is the same as going through a temporary buffer.
pub fn copy_within<T>(
    buf: &mut [T],
    src_offset: isize,
    dst_offset: isize,
    count: isize,
) -> Result<()>
where
    T: Clone,
{
    let (src_offset, count) = range::offset_count(buf.len(), src_offset, count)?;
    let (dst_offset, _) = range::offset_count(buf.len(), dst_offset, count as isize)?;

    copy::clone_within(buf, src_offset, dst_offset, count);
    Ok(())
}

/// Returns a new vector holding clones of the elements of `v`.
#[inline]
pub fn duplicate<T: Clone>(v: &[T]) -> Vec<T> {
    v.to_vec()
}

// --- Reverse ---

/// Reverses the slice in place and returns it.
#[inline]
pub fn reverse<T>(v: &mut [T]) -> &mut [T] {
    reverse::reverse_slice(v);
    v
}

/// Reverses `count` elements starting at `offset`.
pub fn reverse_range<T>(v: &mut [T], offset: isize, count: isize) -> Result<&mut [T]> {
    let (offset, count) = range::offset_count(v.len(), offset, count)?;
    reverse::reverse_slice(&mut v[offset..offset + count]);
    Ok(v)
}

// --- Regions ---

/// Bounds checked sub-slice of `count` elements starting at `offset`.
pub fn region<T>(v: &[T], offset: isize, count: isize) -> Result<&[T]> {
    let (offset, count) = range::offset_count(v.len(), offset, count)?;
    Ok(&v[offset..offset + count])
}

/// Mutable version of [`region`].
pub fn region_mut<T>(v: &mut [T], offset: isize, count: isize) -> Result<&mut [T]> {
    let (offset, count) = range::offset_count(v.len(), offset, count)?;
    Ok(&mut v[offset..offset + count])
}

/// Sub-slice named by a range, which may count from the end, see [`IndexRange`].
pub fn region_of<T>(v: &mut [T], range: impl Into<IndexRange>) -> Result<&mut [T]> {
    let (offset, count) = range::resolve(v.len(), range)?;
    Ok(&mut v[offset..offset + count])
}
