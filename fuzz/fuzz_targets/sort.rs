#![no_main]

use libfuzzer_sys::fuzz_target;

use arraykit_fuzz::u8_as_u32;

fuzz_target!(|data: &[u8]| {
    let mut managed = u8_as_u32(data);
    let mut unmanaged = managed.clone();
    let mut expected = managed.clone();
    expected.sort_unstable();

    arraykit::sort(&mut managed);
    arraykit::unmanaged::sort(&mut unmanaged);

    assert_eq!(managed, expected);
    assert_eq!(unmanaged, expected);
});
