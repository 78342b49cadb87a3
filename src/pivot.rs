use crate::quicksort::{Order, SortAccess};

/// Returns the position of the median of the elements at `a`, `b` and `c`, using exactly three
/// comparisons.
///
/// The chosen value is always the median. With a tied pair the position depends on the third
/// value: if the pair orders below it the later slot of the pair is returned, if above the earlier
/// one. Three equal values return `b`.
#[inline]
pub(crate) fn median_of_three<A: SortAccess>(access: &mut A, a: usize, b: usize, c: usize) -> usize {
    let x = access.is_less(b, a) as u8;
    let y = access.is_less(c, a) as u8;
    let z = access.is_less(c, b) as u8;

    let v = [a, b, c];
    let pos = v[((x == y) as u8 + (y ^ z)) as usize];

    self_check!(
        access.order() == Order::Caller || is_median(access, pos, [a, b, c]),
        "median of three selects the middle value"
    );

    pos
}

// At most one of the other two candidates may order strictly before the chosen one, and at most
// one strictly after it.
fn is_median<A: SortAccess>(access: &mut A, pos: usize, candidates: [usize; 3]) -> bool {
    let mut below = 0;
    let mut above = 0;

    for other in candidates {
        if other == pos {
            continue;
        }

        below += access.is_less(other, pos) as u8;
        above += access.is_less(pos, other) as u8;
    }

    below <= 1 && above <= 1
}
