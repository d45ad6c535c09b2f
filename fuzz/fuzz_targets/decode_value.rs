#![no_main]

use libfuzzer_sys::fuzz_target;

use dbor::{DecimalRational, Value};

fuzz_target!(|data: &[u8]| {
    let value = Value::new(data);
    let _ = value.get::<u8>();
    let _ = value.get::<u16>();
    let _ = value.get::<u32>();
    let _ = value.get::<u64>();
    let _ = value.get::<i8>();
    let _ = value.get::<i16>();
    let _ = value.get::<i32>();
    let _ = value.get::<i64>();
    let _ = value.get::<f32>();
    let _ = value.get::<f64>();
    let _ = value.get::<DecimalRational>();
    let _ = value.get::<&[u8]>();

    let (s, _) = value.get_utf8(data.len());
    let _ = s.check();
    let _ = s.get_ascii(true);
    let _ = s.get_utf8(0x20, 0xFFFF);
});
