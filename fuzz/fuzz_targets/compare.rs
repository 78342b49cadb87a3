#![no_main]

use libfuzzer_sys::fuzz_target;

use arraykit_fuzz::split_header;

fuzz_target!(|data: &[u8]| {
    let Some(([split], rest)) = split_header::<1>(data) else {
        return;
    };

    let (a, b) = rest.split_at(split as usize % (rest.len() + 1));

    let equal = arraykit::unmanaged::sequence_equal(a, b);
    let order = arraykit::unmanaged::sequence_compare(a, b);

    assert_eq!(equal, a == b);
    assert_eq!(order, a.cmp(b));
    assert_eq!(arraykit::unmanaged::mismatch(a, b).is_none(), equal);
});
