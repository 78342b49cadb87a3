use core::mem;
use core::ptr;

use crate::Unmanaged;

/// Two-cursor swap from both ends towards the middle.
pub(crate) fn reverse_slice<T>(v: &mut [T]) {
    let mut i = 0;
    let mut j = v.len();

    while i + 1 < j {
        j -= 1;
        v.swap(i, j);
        i += 1;
    }
}

/// Reverses the order of the `8 / lane` lanes of width `lane` bytes inside `x`.
#[inline(always)]
fn reverse_lanes(x: u64, lane: usize) -> u64 {
    match lane {
        1 => x.swap_bytes(),
        2 => {
            let x = x.rotate_left(32);
            ((x & 0xFFFF_0000_FFFF_0000) >> 16) | ((x & 0x0000_FFFF_0000_FFFF) << 16)
        }
        4 => x.rotate_left(32),
        _ => x,
    }
}

/// Reverses `v` by exchanging whole 64-bit words from both ends, with their lanes reversed, and
/// finishes the middle with element swaps. Elements of 8 bytes or more are swapped directly.
pub(crate) fn reverse_unmanaged<T: Unmanaged>(v: &mut [T]) {
    let size = mem::size_of::<T>();
    let len = v.len();
    let base = v.as_mut_ptr();

    let mut lo = 0;
    let mut hi = len;

    if size < 8 {
        let per_word = 8 / size;
        let bytes = base as *mut u8;

        while hi - lo >= 2 * per_word {
            // SAFETY: `lo + per_word <= hi - per_word <= len`, the two words are in bounds and
            // don't overlap. Any byte permutation of lanes is a valid `T`, lanes are whole
            // elements.
            unsafe {
                let front = bytes.add(lo * size) as *mut u64;
                let back = bytes.add((hi - per_word) * size) as *mut u64;

                let f = ptr::read_unaligned(front);
                let b = ptr::read_unaligned(back);

                ptr::write_unaligned(front, reverse_lanes(b, size));
                ptr::write_unaligned(back, reverse_lanes(f, size));
            }

            lo += per_word;
            hi -= per_word;
        }
    }

    while lo + 1 < hi {
        hi -= 1;
        // SAFETY: `lo < hi < len`.
        unsafe { ptr::swap(base.add(lo), base.add(hi)) };
        lo += 1;
    }
}
