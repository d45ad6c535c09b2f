#![no_main]

use libfuzzer_sys::fuzz_target;

use dbor::ValueSequence;

fuzz_target!(|data: &[u8]| {
    let mut total = 0;
    for value in &ValueSequence::new(data) {
        assert!(value.len() >= 1);
        total += value.len();
    }
    assert_eq!(total, data.len());
});
