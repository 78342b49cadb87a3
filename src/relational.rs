//! Sequence equality and lexicographic comparison.

use core::cmp::Ordering;
use core::mem;
use core::ptr;

/// Runs shorter than this many bytes are compared byte by byte. Entering the word loop isn't
/// worth it below that.
pub const WORDWISE_THRESHOLD: usize = 32;

type Word = usize;

const WORD_SIZE: usize = mem::size_of::<Word>();

const BLOCK_SIZE: usize = 8 * WORD_SIZE;

#[inline(always)]
unsafe fn read_word(p: *const u8, offset: usize) -> Word {
    // SAFETY: The caller guarantees `offset + WORD_SIZE` bytes are readable.
    unsafe { ptr::read_unaligned(p.add(offset) as *const Word) }
}

/// `true` if the `len` bytes at `a` and `b` are identical.
///
/// # Safety
///
/// `a` and `b` must be valid for reads of `len` bytes.
pub(crate) unsafe fn equal_bytes(a: *const u8, b: *const u8, len: usize) -> bool {
    if ptr::eq(a, b) {
        return true;
    }

    if len < WORDWISE_THRESHOLD {
        // SAFETY: Forwarded caller guarantee.
        return unsafe { mismatch_bytewise(a, b, 0, len) }.is_none();
    }

    let mut offset = 0;

    // SAFETY: Every read stays below `len`, checked by the loop conditions.
    unsafe {
        while len - offset >= BLOCK_SIZE {
            let mut diff = 0;
            for i in 0..8 {
                let at = offset + i * WORD_SIZE;
                diff |= read_word(a, at) ^ read_word(b, at);
            }

            if diff != 0 {
                return false;
            }

            offset += BLOCK_SIZE;
        }

        while len - offset >= WORD_SIZE {
            if read_word(a, offset) != read_word(b, offset) {
                return false;
            }
            offset += WORD_SIZE;
        }

        mismatch_bytewise(a, b, offset, len).is_none()
    }
}

/// Offset of the first byte that differs between the `len` byte runs at `a` and `b`.
///
/// # Safety
///
/// `a` and `b` must be valid for reads of `len` bytes.
pub(crate) unsafe fn mismatch_bytes(a: *const u8, b: *const u8, len: usize) -> Option<usize> {
    if ptr::eq(a, b) {
        return None;
    }

    if len < WORDWISE_THRESHOLD {
        // SAFETY: Forwarded caller guarantee.
        return unsafe { mismatch_bytewise(a, b, 0, len) };
    }

    let mut offset = 0;

    // SAFETY: Every read stays below `len`, checked by the loop conditions.
    unsafe {
        while len - offset >= BLOCK_SIZE {
            let mut diff = 0;
            for i in 0..8 {
                let at = offset + i * WORD_SIZE;
                diff |= read_word(a, at) ^ read_word(b, at);
            }

            if diff != 0 {
                // The word loop below finds the exact position inside this block.
                break;
            }

            offset += BLOCK_SIZE;
        }

        while len - offset >= WORD_SIZE {
            let diff = read_word(a, offset) ^ read_word(b, offset);
            if diff != 0 {
                return Some(offset + first_set_byte(diff));
            }
            offset += WORD_SIZE;
        }

        mismatch_bytewise(a, b, offset, len)
    }
}

/// Position in memory order of the first non-zero byte of `diff`.
#[inline(always)]
fn first_set_byte(diff: Word) -> usize {
    let bits = if cfg!(target_endian = "little") {
        diff.trailing_zeros()
    } else {
        diff.leading_zeros()
    };

    (bits / 8) as usize
}

#[inline(always)]
unsafe fn mismatch_bytewise(a: *const u8, b: *const u8, from: usize, len: usize) -> Option<usize> {
    // SAFETY: The caller guarantees `len` readable bytes.
    (from..len).find(|&i| unsafe { *a.add(i) != *b.add(i) })
}

// --- Generic paths ---

pub(crate) fn equal_by<T, F>(a: &[T], b: &[T], mut eq: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

/// First non-`Equal` result of `compare` over the positional pairs, the length decides a common
/// prefix.
pub(crate) fn compare_by<T, F>(a: &[T], b: &[T], mut compare: F) -> Ordering
where
    F: FnMut(&T, &T) -> Ordering,
{
    for (x, y) in a.iter().zip(b) {
        match compare(x, y) {
            Ordering::Equal => {}
            non_eq => return non_eq,
        }
    }

    a.len().cmp(&b.len())
}

pub(crate) fn mismatch_by<T, F>(a: &[T], b: &[T], mut eq: F) -> Option<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let common = a.len().min(b.len());

    match a.iter().zip(b).position(|(x, y)| !eq(x, y)) {
        Some(i) => Some(i),
        None if a.len() != b.len() => Some(common),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch_of(a: &[u8], b: &[u8]) -> Option<usize> {
        assert_eq!(a.len(), b.len());
        unsafe { mismatch_bytes(a.as_ptr(), b.as_ptr(), a.len()) }
    }

    fn equal_of(a: &[u8], b: &[u8]) -> bool {
        assert_eq!(a.len(), b.len());
        unsafe { equal_bytes(a.as_ptr(), b.as_ptr(), a.len()) }
    }

    #[test]
    fn every_position_on_both_sides_of_threshold() {
        for len in [0, 1, 7, 8, 9, 31, 32, 33, 63, 64, 65, 100, 200, 257] {
            let a: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            assert!(equal_of(&a, &a.clone()));
            assert_eq!(mismatch_of(&a, &a.clone()), None);

            for pos in 0..len {
                let mut b = a.clone();
                b[pos] ^= 0x40;
                assert!(!equal_of(&a, &b), "len {len} pos {pos}");
                assert_eq!(mismatch_of(&a, &b), Some(pos), "len {len} pos {pos}");
            }
        }
    }

    #[test]
    fn same_pointer_is_equal() {
        let a = [1u8, 2, 3];
        assert!(equal_of(&a, &a));
    }

    #[test]
    fn generic_compare() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert_eq!(compare_by(&[1, 2, 3], &[1, 2, 3, 4], cmp), Ordering::Less);
        assert_eq!(compare_by(&[1, 2, 4], &[1, 2, 3, 4], cmp), Ordering::Greater);
        assert_eq!(compare_by::<i32, _>(&[], &[], cmp), Ordering::Equal);

        let eq = |a: &i32, b: &i32| a == b;
        assert_eq!(mismatch_by(&[1, 2], &[1, 2, 3], eq), Some(2));
        assert_eq!(mismatch_by(&[1, 5, 3], &[1, 2, 3], eq), Some(1));
        assert_eq!(mismatch_by(&[1, 2], &[1, 2], eq), None);
        assert!(!equal_by(&[1], &[1, 1], eq));
    }
}
