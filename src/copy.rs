//! Overlap safe bulk copy.
//!
//! `move_bytes` has `memmove` semantics: the destination ends up holding the bytes the source
//! held before the call, even if the two regions overlap. The strategy is chosen per call:
//!
//! - Disjoint regions are copied forward with the widest word.
//! - Overlapping regions are copied away from the overlap, backwards if the destination lies
//!   ahead of the source and forwards otherwise.
//! - For overlapping regions the word width never exceeds the distance between source and
//!   destination, so the bytes read for one unit are never the bytes written by that unit.
//! - Very short overlapping runs are copied byte by byte.
//!
//! Every width specific routine follows the same shape. Align the destination with a few
//! narrower moves, copy blocks of 8 words, then mop up the remaining words and trailing bytes
//! with a 4/2/1 cascade. Wide stores only ever hit aligned destination addresses.

use core::mem;
use core::ptr;

/// Overlapping runs shorter than this many bytes are copied byte by byte.
pub const BYTEWISE_THRESHOLD: usize = 16;

const MAX_WIDTH: usize = mem::size_of::<usize>();

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Unit of transfer used by the bulk of a copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Width {
    W8 = 1,
    W16 = 2,
    W32 = 4,
    W64 = 8,
}

impl Width {
    const fn bytes(self) -> usize {
        self as usize
    }

    const fn widest() -> Self {
        if MAX_WIDTH >= 8 {
            Width::W64
        } else {
            Width::W32
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Plan {
    pub direction: Direction,
    pub width: Width,
}

/// Picks direction and width for moving `len` bytes from address `src` to address `dst`, where
/// `len` is a multiple of `stride`.
pub(crate) fn plan(dst: usize, src: usize, len: usize, stride: usize) -> Plan {
    let distance = dst.abs_diff(src);

    if distance >= len {
        return Plan {
            direction: Direction::Forward,
            width: Width::widest(),
        };
    }

    let direction = if dst > src {
        Direction::Backward
    } else {
        Direction::Forward
    };

    if len < BYTEWISE_THRESHOLD {
        return Plan {
            direction,
            width: Width::W8,
        };
    }

    let width = [Width::W64, Width::W32, Width::W16]
        .into_iter()
        .find(|w| {
            let bytes = w.bytes();
            bytes <= MAX_WIDTH
                && bytes <= distance
                && (len % bytes == 0 || stride % bytes == 0)
        })
        .unwrap_or(Width::W8);

    Plan { direction, width }
}

/// Copies `len` bytes from `src` to `dst`. The regions may overlap.
///
/// # Safety
///
/// `src` must be valid for reads and `dst` valid for writes of `len` bytes.
pub(crate) unsafe fn move_bytes(dst: *mut u8, src: *const u8, len: usize, stride: usize) {
    if len == 0 || ptr::eq(dst as *const u8, src) {
        return;
    }

    let plan = plan(dst as usize, src as usize, len, stride);
    tracing::trace!(len, stride, ?plan, "move bytes");

    // SAFETY: Forwarded caller guarantee. `plan` only picks a width no larger than the
    // distance between overlapping regions and the direction that reads ahead of the writes.
    unsafe {
        match (plan.direction, plan.width) {
            (Direction::Forward, Width::W64) => copy_forward::<u64>(dst, src, len),
            (Direction::Forward, Width::W32) => copy_forward::<u32>(dst, src, len),
            (Direction::Forward, Width::W16) => copy_forward::<u16>(dst, src, len),
            (Direction::Forward, Width::W8) => copy_forward::<u8>(dst, src, len),
            (Direction::Backward, Width::W64) => copy_backward::<u64>(dst, src, len),
            (Direction::Backward, Width::W32) => copy_backward::<u32>(dst, src, len),
            (Direction::Backward, Width::W16) => copy_backward::<u16>(dst, src, len),
            (Direction::Backward, Width::W8) => copy_backward::<u8>(dst, src, len),
        }
    }
}

/// Moves one `U` sized unit. The whole unit is read before anything is written.
#[inline(always)]
unsafe fn move_unit<U: Copy>(dst: *mut u8, src: *const u8) {
    // SAFETY: The caller guarantees `size_of::<U>()` valid bytes at both pointers.
    unsafe {
        let val = ptr::read_unaligned(src as *const U);
        ptr::write_unaligned(dst as *mut U, val);
    }
}

/// Moves 8 consecutive `U` units to an aligned destination.
#[inline(always)]
unsafe fn move_block<U: Copy>(dst: *mut u8, src: *const u8) {
    debug_assert_eq!(dst as usize % mem::align_of::<U>(), 0);

    // SAFETY: The caller guarantees `8 * size_of::<U>()` valid bytes at both pointers and an
    // aligned destination. All 8 units are read before the first write.
    unsafe {
        let block = ptr::read_unaligned(src as *const [U; 8]);
        ptr::write(dst as *mut [U; 8], block);
    }
}

unsafe fn copy_forward<U: Copy>(mut dst: *mut u8, mut src: *const u8, mut len: usize) {
    let unit = mem::size_of::<U>();

    macro_rules! step {
        ($t:ty, $n:expr) => {{
            move_unit::<$t>(dst, src);
            dst = dst.add($n);
            src = src.add($n);
            len -= $n;
        }};
    }

    // SAFETY: Every step advances both pointers by exactly the number of bytes it moved and
    // decreases `len` by the same amount, no step moves more than `len` bytes.
    unsafe {
        // Align the destination, no step wider than `U`.
        if unit > 1 && len >= unit {
            if dst as usize & 1 != 0 {
                step!(u8, 1);
            }
            if unit > 2 && dst as usize & 2 != 0 && len >= 2 {
                step!(u16, 2);
            }
            if unit > 4 && dst as usize & 4 != 0 && len >= 4 {
                step!(u32, 4);
            }
        }

        let block = 8 * unit;
        while len >= block {
            move_block::<U>(dst, src);
            dst = dst.add(block);
            src = src.add(block);
            len -= block;
        }

        let units = len / unit;
        if units & 4 != 0 {
            step!([U; 4], 4 * unit);
        }
        if units & 2 != 0 {
            step!([U; 2], 2 * unit);
        }
        if units & 1 != 0 {
            step!(U, unit);
        }

        if unit > 4 && len & 4 != 0 {
            step!(u32, 4);
        }
        if unit > 2 && len & 2 != 0 {
            step!(u16, 2);
        }
        if unit > 1 && len & 1 != 0 {
            // Last byte, the pointers are not read again.
            move_unit::<u8>(dst, src);
            len -= 1;
        }
    }

    self_check!(len == 0, "forward copy leaves no trailing bytes");
}

unsafe fn copy_backward<U: Copy>(dst: *mut u8, src: *const u8, mut len: usize) {
    let unit = mem::size_of::<U>();

    // SAFETY: `dst` and `src` are valid for `len` bytes, one past the end is a valid pointer.
    let (mut dst_end, mut src_end) = unsafe { (dst.add(len), src.add(len)) };

    macro_rules! step {
        ($t:ty, $n:expr) => {{
            dst_end = dst_end.sub($n);
            src_end = src_end.sub($n);
            move_unit::<$t>(dst_end, src_end);
            len -= $n;
        }};
    }

    // SAFETY: Mirror image of `copy_forward`, the end pointers never move below the start.
    unsafe {
        if unit > 1 && len >= unit {
            if dst_end as usize & 1 != 0 {
                step!(u8, 1);
            }
            if unit > 2 && dst_end as usize & 2 != 0 && len >= 2 {
                step!(u16, 2);
            }
            if unit > 4 && dst_end as usize & 4 != 0 && len >= 4 {
                step!(u32, 4);
            }
        }

        let block = 8 * unit;
        while len >= block {
            dst_end = dst_end.sub(block);
            src_end = src_end.sub(block);
            move_block::<U>(dst_end, src_end);
            len -= block;
        }

        let units = len / unit;
        if units & 4 != 0 {
            step!([U; 4], 4 * unit);
        }
        if units & 2 != 0 {
            step!([U; 2], 2 * unit);
        }
        if units & 1 != 0 {
            step!(U, unit);
        }

        if unit > 4 && len & 4 != 0 {
            step!(u32, 4);
        }
        if unit > 2 && len & 2 != 0 {
            step!(u16, 2);
        }
        if unit > 1 && len & 1 != 0 {
            step!(u8, 1);
        }
    }

    self_check!(len == 0, "backward copy leaves no trailing bytes");
    debug_assert!(ptr::eq(dst_end, dst));
}

// --- Logical copy ---

/// Element-wise copy through `Clone`, every destination slot is assigned, dropping its old
/// value. Runs in the direction that never reads an already overwritten slot.
pub(crate) fn clone_within<T: Clone>(buf: &mut [T], src: usize, dst: usize, count: usize) {
    if src == dst || count == 0 {
        return;
    }

    if dst < src {
        for i in 0..count {
            buf[dst + i] = buf[src + i].clone();
        }
    } else {
        for i in (0..count).rev() {
            buf[dst + i] = buf[src + i].clone();
        }
    }
}
