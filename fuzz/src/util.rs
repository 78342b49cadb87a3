use std::mem;

/// Reinterprets the input as a vector of `u32`, dropping trailing bytes that don't fill a whole
/// element.
pub fn u8_as_u32(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(mem::size_of::<u32>())
        .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Splits off a little header of `N` bytes, `None` if the input is too short.
pub fn split_header<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    if data.len() < N {
        return None;
    }

    let (head, rest) = data.split_at(N);
    let mut header = [0u8; N];
    header.copy_from_slice(head);

    Some((header, rest))
}
