//! Fast paths for fixed-width scalar element types.
//!
//! The functions in this module are only available for types implementing [`Unmanaged`], a
//! sealed set of primitive scalars without padding or indirection. Their memory can be treated
//! as plain bytes, which lets sorting use raw pointer swaps, equality and comparison scan whole
//! machine words, copying run a `memmove` style engine and reversal swap words at a time.
//!
//! The choice between this module and the generic functions at the crate root is made by the
//! trait bound, so it is resolved once per monomorphization and costs nothing at runtime.

use core::cmp::Ordering;
use core::mem;
use core::slice;

use crate::error::{ArrayError, Result};
use crate::quicksort::{self, Order, PtrAccess};
use crate::{copy as bulk, range, relational, reverse as reversal};

mod private {
    pub trait Sealed {}
}

/// The classified primitive types, see [`Unmanaged::KIND`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Bool,
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    ISize,
    USize,
    F32,
    F64,
}

impl ElementKind {
    /// Width of one element in bytes.
    pub const fn width(self) -> usize {
        match self {
            ElementKind::Bool | ElementKind::I8 | ElementKind::U8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::Char | ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::I64 | ElementKind::U64 | ElementKind::F64 => 8,
            ElementKind::I128 | ElementKind::U128 => 16,
            ElementKind::ISize | ElementKind::USize => mem::size_of::<usize>(),
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ElementKind::F32 | ElementKind::F64)
    }
}

/// Fixed-width scalar that may be handled as raw bytes.
///
/// # Safety
///
/// Implementors must have no padding, no interior pointers and no interior mutability, and
/// every byte of a value must be initialized. The trait is sealed, the implementations below
/// are the complete set.
pub unsafe trait Unmanaged: Copy + Send + Sync + 'static + private::Sealed {
    const KIND: ElementKind;

    /// Natural ordering of the fast path.
    ///
    /// Two values compare `Equal` exactly when their bytes are identical, so byte-wise equality
    /// and this ordering always agree. For floats this is IEEE 754 total order.
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_unmanaged_ord {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            unsafe impl Unmanaged for $t {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

macro_rules! impl_unmanaged_float {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl private::Sealed for $t {}

            unsafe impl Unmanaged for $t {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn natural_cmp(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    };
}

impl_unmanaged_ord!(
    bool => Bool,
    char => Char,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    isize => ISize,
    usize => USize,
);

impl_unmanaged_float!(f32 => F32, f64 => F64);

/// Views the elements as their underlying bytes.
#[inline]
pub fn as_bytes<T: Unmanaged>(v: &[T]) -> &[u8] {
    // SAFETY: `Unmanaged` guarantees fully initialized bytes without padding. The length in
    // bytes can't overflow, it's the size of an existing allocation.
    unsafe { slice::from_raw_parts(v.as_ptr() as *const u8, mem::size_of_val(v)) }
}

// --- Sort ---

/// Sorts the slice in natural order, see [`Unmanaged::natural_cmp`].
///
/// Unstable and in-place. Returns the same slice for chaining.
#[inline]
pub fn sort<T: Unmanaged>(v: &mut [T]) -> &mut [T] {
    if v.len() >= 2 {
        let end = v.len() - 1;
        sort_inclusive(v, 0, end, Order::Natural, &mut T::natural_cmp);
    }

    v
}

/// Sorts the slice with a comparator function.
///
/// The comparator should implement a total order, otherwise the resulting order is unspecified.
/// All original elements remain in the slice either way.
pub fn sort_by<T, F>(v: &mut [T], mut compare: F) -> &mut [T]
where
    T: Unmanaged,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() >= 2 {
        let end = v.len() - 1;
        sort_inclusive(v, 0, end, Order::Caller, &mut compare);
    }

    v
}

/// Sorts `count` elements starting at `offset` in natural order. The rest of the slice is left
/// untouched.
pub fn sort_range<T: Unmanaged>(v: &mut [T], offset: isize, count: isize) -> Result<&mut [T]> {
    let (offset, count) = range::offset_count(v.len(), offset, count)?;

    if count >= 2 {
        sort_inclusive(v, offset, offset + count - 1, Order::Natural, &mut T::natural_cmp);
    }

    Ok(v)
}

fn sort_inclusive<T, F>(v: &mut [T], start: usize, end: usize, order: Order, compare: &mut F)
where
    T: Unmanaged,
    F: FnMut(&T, &T) -> Ordering,
{
    tracing::trace!(kind = ?T::KIND, start, end, "unmanaged sort");

    let mut access = PtrAccess::new(v, |a: &T, b: &T| compare(a, b) == Ordering::Less, order);
    quicksort::quicksort(&mut access, start, end);

    self_check!(
        quicksort::is_sorted_if_natural(&mut access, start, end),
        "range is ascending after sort"
    );
}

// --- Equality and comparison ---

/// `true` if both slices have the same length and identical bytes.
///
/// For floats this means `NaN` equals a `NaN` with the same payload, and `-0.0` differs from
/// `0.0`, matching [`Unmanaged::natural_cmp`].
#[inline]
pub fn sequence_equal<T: Unmanaged>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    // SAFETY: Both pointers are valid for `size_of_val(a)` bytes, and b has the same length.
    unsafe {
        relational::equal_bytes(
            a.as_ptr() as *const u8,
            b.as_ptr() as *const u8,
            mem::size_of_val(a),
        )
    }
}

/// Lexicographic comparison in natural order. On a common prefix the shorter slice is less.
pub fn sequence_compare<T: Unmanaged>(a: &[T], b: &[T]) -> Ordering {
    let common = a.len().min(b.len());

    match first_mismatch(&a[..common], &b[..common]) {
        Some(i) => a[i].natural_cmp(&b[i]),
        None => a.len().cmp(&b.len()),
    }
}

/// Index of the first position where the slices differ. If one is a prefix of the other that's
/// the length of the shorter one, `None` means they are equal.
pub fn mismatch<T: Unmanaged>(a: &[T], b: &[T]) -> Option<usize> {
    let common = a.len().min(b.len());

    first_mismatch(&a[..common], &b[..common]).or(if a.len() != b.len() {
        Some(common)
    } else {
        None
    })
}

fn first_mismatch<T: Unmanaged>(a: &[T], b: &[T]) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());

    // SAFETY: Same length, both valid for `size_of_val(a)` bytes.
    let byte_pos = unsafe {
        relational::mismatch_bytes(
            a.as_ptr() as *const u8,
            b.as_ptr() as *const u8,
            mem::size_of_val(a),
        )
    }?;

    Some(byte_pos / mem::size_of::<T>())
}

// --- Copy ---

/// Copies all of `src` into the front of `dst` as raw bytes.
pub fn copy<T: Unmanaged>(src: &[T], dst: &mut [T]) -> Result<()> {
    if dst.len() < src.len() {
        tracing::debug!(required = src.len(), available = dst.len(), "copy destination too short");
        return Err(ArrayError::InsufficientCapacity {
            required: src.len(),
            available: dst.len(),
        });
    }

    // SAFETY: `src` is valid for reads and `dst` for writes of `size_of_val(src)` bytes. The
    // borrows guarantee the regions don't overlap, the engine handles both cases anyway.
    unsafe {
        bulk::move_bytes(
            dst.as_mut_ptr() as *mut u8,
            src.as_ptr() as *const u8,
            mem::size_of_val(src),
            mem::size_of::<T>(),
        );
    }

    Ok(())
}

/// Copies `count` elements starting at `src_offset` to `dst_offset` inside the same buffer.
///
/// The runs may overlap, the result is the same as going through a temporary buffer.
pub fn copy_within<T: Unmanaged>(
    buf: &mut [T],
    src_offset: isize,
    dst_offset: isize,
    count: isize,
) -> Result<()> {
    let (src_offset, count) = range::offset_count(buf.len(), src_offset, count)?;
    let (dst_offset, _) = range::offset_count(buf.len(), dst_offset, count as isize)?;

    let size = mem::size_of::<T>();
    let base = buf.as_mut_ptr() as *mut u8;

    // SAFETY: Both runs were checked against `buf.len()`. Both pointers derive from the same
    // exclusive borrow.
    unsafe {
        bulk::move_bytes(
            base.add(dst_offset * size),
            base.add(src_offset * size),
            count * size,
            size,
        );
    }

    Ok(())
}

/// Copies `count` elements from `src` to `dst`, the regions may overlap.
///
/// # Safety
///
/// Unless null, `src` must be valid for reads and `dst` valid for writes of `count` elements.
pub unsafe fn copy_raw<T: Unmanaged>(src: *const T, dst: *mut T, count: usize) -> Result<()> {
    if src.is_null() {
        return Err(ArrayError::NullArgument { argument: "src" });
    }

    if dst.is_null() {
        return Err(ArrayError::NullArgument { argument: "dst" });
    }

    let size = mem::size_of::<T>();
    let len = count
        .checked_mul(size)
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(ArrayError::OutOfBounds {
            offset: 0,
            count,
            len: isize::MAX as usize / size,
        })?;

    // SAFETY: The caller guarantees validity for `count` elements.
    unsafe { bulk::move_bytes(dst as *mut u8, src as *const u8, len, size) };

    Ok(())
}

/// Returns a new vector holding a copy of `v`.
pub fn duplicate<T: Unmanaged>(v: &[T]) -> Vec<T> {
    let mut out = Vec::<T>::with_capacity(v.len());

    // SAFETY: The new allocation is valid for `v.len()` writes and can't overlap `v`. After the
    // copy every element is initialized.
    unsafe {
        bulk::move_bytes(
            out.as_mut_ptr() as *mut u8,
            v.as_ptr() as *const u8,
            mem::size_of_val(v),
            mem::size_of::<T>(),
        );
        out.set_len(v.len());
    }

    out
}

// --- Reverse ---

/// Reverses the slice in place, whole words at a time where the element type allows it.
#[inline]
pub fn reverse<T: Unmanaged>(v: &mut [T]) -> &mut [T] {
    reversal::reverse_unmanaged(v);
    v
}

/// Reverses `count` elements starting at `offset`.
pub fn reverse_range<T: Unmanaged>(v: &mut [T], offset: isize, count: isize) -> Result<&mut [T]> {
    let (offset, count) = range::offset_count(v.len(), offset, count)?;
    reversal::reverse_unmanaged(&mut v[offset..offset + count]);
    Ok(v)
}
