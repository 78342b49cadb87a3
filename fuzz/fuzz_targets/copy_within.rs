#![no_main]

use libfuzzer_sys::fuzz_target;

use arraykit_fuzz::split_header;

fuzz_target!(|data: &[u8]| {
    // Three header bytes pick source, destination and count inside the remaining buffer.
    let Some(([a, b, c], rest)) = split_header::<3>(data) else {
        return;
    };

    let len = rest.len();
    if len == 0 {
        return;
    }

    let count = c as usize % (len + 1);
    let src = a as usize % (len - count + 1);
    let dst = b as usize % (len - count + 1);

    let mut expected = rest.to_vec();
    expected.copy_within(src..src + count, dst);

    let mut got = rest.to_vec();
    arraykit::unmanaged::copy_within(&mut got, src as isize, dst as isize, count as isize)
        .unwrap();

    assert_eq!(got, expected);
});
