use dbor::{DecimalRational, ResultCode, Value};

fn value(bytes: &[u8]) -> Value<'_> {
    let v = Value::new(bytes);
    assert!(v.is_complete(), "test vector must be complete: {bytes:?}");
    v
}

#[test]
fn unsigned_in_range_is_exact() {
    assert_eq!(value(&[0x00]).get::<u8>(), (0, ResultCode::Ok));
    assert_eq!(value(&[0x17]).get::<u8>(), (23, ResultCode::Ok));
    assert_eq!(value(&[0x18, 0x00]).get::<u8>(), (24, ResultCode::Ok));
    assert_eq!(value(&[0x18, 0xE7]).get::<u8>(), (255, ResultCode::Ok));

    // 65535 = 0xFEE7 + 0x0101 + 23
    assert_eq!(
        value(&[0x19, 0xE7, 0xFE]).get::<u16>(),
        (u16::MAX, ResultCode::Ok)
    );
    assert_eq!(
        value(&[0x1B, 0xFF, 0xFF, 0xFF, 0xFF]).get::<u64>(),
        (0xFFFF_FFFF + 0x0101_0101 + 23, ResultCode::Ok)
    );
}

#[test]
fn unsigned_saturates_outside_range() {
    assert_eq!(
        value(&[0x18, 0xE8]).get::<u8>(),
        (255, ResultCode::ApproxExtreme)
    );
    // 65536 in a u16
    assert_eq!(
        value(&[0x19, 0xE8, 0xFE]).get::<u16>(),
        (u16::MAX, ResultCode::ApproxExtreme)
    );
    // the same bytes fit a u32 exactly
    assert_eq!(
        value(&[0x19, 0xE8, 0xFE]).get::<u32>(),
        (65536, ResultCode::Ok)
    );
    // a 4-byte natural token never fits a u16
    assert_eq!(
        value(&[0x1B, 0xFF, 0xFF, 0xFF, 0xFF]).get::<u16>(),
        (u16::MAX, ResultCode::ApproxExtreme)
    );
    // an 8-byte natural token can exceed u64
    assert_eq!(
        value(&[0x1F, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE]).get::<u64>(),
        (u64::MAX, ResultCode::ApproxExtreme)
    );

    // negative sources clamp to zero
    assert_eq!(value(&[0x20]).get::<u8>(), (0, ResultCode::ApproxExtreme));
    assert_eq!(
        value(&[0x38, 0x00]).get::<u32>(),
        (0, ResultCode::ApproxExtreme)
    );
}

#[test]
fn unsigned_numberlike_and_none() {
    assert_eq!(value(&[0xFC]).get::<u8>(), (0, ResultCode::ApproxImprecise));
    assert_eq!(value(&[0xFD]).get::<u8>(), (0, ResultCode::ApproxExtreme));
    assert_eq!(value(&[0xFE]).get::<u8>(), (255, ResultCode::ApproxExtreme));
    assert_eq!(value(&[0xFF]).get::<u8>(), (0, ResultCode::NoObject));
}

#[test]
fn signed_in_range_is_exact() {
    assert_eq!(value(&[0x17]).get::<i8>(), (23, ResultCode::Ok));
    assert_eq!(value(&[0x20]).get::<i8>(), (-1, ResultCode::Ok));
    assert_eq!(value(&[0x37]).get::<i8>(), (-24, ResultCode::Ok));
    assert_eq!(value(&[0x38, 0x00]).get::<i8>(), (-25, ResultCode::Ok));
    assert_eq!(value(&[0x18, 0x67]).get::<i8>(), (127, ResultCode::Ok));

    // -128 is representable although 128 is not
    assert_eq!(value(&[0x38, 0x67]).get::<i8>(), (i8::MIN, ResultCode::Ok));

    let mut encoded_i64_min = [0x3F, 0xE7, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0x7E];
    assert_eq!(
        value(&encoded_i64_min).get::<i64>(),
        (i64::MIN, ResultCode::Ok)
    );
    // one more saturates
    encoded_i64_min[1] = 0xE8;
    assert_eq!(
        value(&encoded_i64_min).get::<i64>(),
        (i64::MIN, ResultCode::ApproxExtreme)
    );
}

#[test]
fn signed_saturates_outside_range() {
    assert_eq!(
        value(&[0x18, 0x68]).get::<i8>(),
        (i8::MAX, ResultCode::ApproxExtreme)
    );
    assert_eq!(
        value(&[0x38, 0x68]).get::<i8>(),
        (i8::MIN, ResultCode::ApproxExtreme)
    );
    assert_eq!(value(&[0xFD]).get::<i16>(), (i16::MIN, ResultCode::ApproxExtreme));
    assert_eq!(value(&[0xFE]).get::<i16>(), (i16::MAX, ResultCode::ApproxExtreme));
    assert_eq!(value(&[0xFC]).get::<i32>(), (0, ResultCode::ApproxImprecise));
    assert_eq!(value(&[0xFF]).get::<i64>(), (0, ResultCode::NoObject));
}

#[test]
fn float_zeroes_and_infinities() {
    assert_eq!(value(&[0x00]).get::<f64>(), (0.0, ResultCode::Ok));

    let (v, code) = value(&[0xFC]).get::<f64>();
    assert_eq!(code, ResultCode::Ok);
    assert!(v == 0.0 && v.is_sign_negative());

    assert_eq!(
        value(&[0xFD]).get::<f32>(),
        (f32::NEG_INFINITY, ResultCode::Ok)
    );
    assert_eq!(value(&[0xFE]).get::<f64>(), (f64::INFINITY, ResultCode::Ok));

    let (v, code) = value(&[0xFF]).get::<f32>();
    assert!(v.is_nan());
    assert_eq!(code, ResultCode::NoObject);

    // non-zero integers are not numbers of this kind
    let (v, code) = value(&[0x01]).get::<f64>();
    assert!(v.is_nan());
    assert_eq!(code, ResultCode::Incompatible);
}

#[test]
fn float_exact_binary_rationals() {
    // k = 1, all zero: 2^-15
    let (v, code) = value(&[0xC9, 0x00, 0x00]).get::<f32>();
    assert_eq!((v, code), (f32::from_bits(0x3800_0000), ResultCode::Ok));

    // k = 7 carries binary64 verbatim: 1.0
    let one = [0xCF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F];
    assert_eq!(value(&one).get::<f64>(), (1.0, ResultCode::Ok));
    assert_eq!(value(&one).get::<f32>(), (1.0, ResultCode::Ok));

    // k = 3, all zero: 2^-127, a binary32 denormal
    let tiny = [0xCB, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(
        value(&tiny).get::<f32>(),
        (f32::from_bits(0x0040_0000), ResultCode::Ok)
    );
    assert_eq!(
        value(&tiny).get::<f64>(),
        (f64::from_bits(0x3800_0000_0000_0000), ResultCode::Ok)
    );
}

#[test]
fn float_narrowing_reports_direction() {
    // 1 + 2^-30 is exact in binary64, truncates towards zero in binary32
    let precise = [0xCF, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0xF0, 0x3F];
    assert_eq!(value(&precise).get::<f64>().1, ResultCode::Ok);
    assert_eq!(
        value(&precise).get::<f32>(),
        (1.0, ResultCode::ApproxImprecise)
    );

    // 2^200 is finite in binary64 but beyond binary32
    let big = [0xCF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x70, 0x4C];
    assert_eq!(value(&big).get::<f64>(), (2f64.powi(200), ResultCode::Ok));
    assert_eq!(
        value(&big).get::<f32>(),
        (f32::INFINITY, ResultCode::ApproxExtreme)
    );

    // exactly f32::MAX narrows without loss
    let at_max = [0xCF, 0x00, 0x00, 0x00, 0xE0, 0xFF, 0xFF, 0xEF, 0x47];
    assert_eq!(
        value(&at_max).get::<f32>(),
        (f32::MAX, ResultCode::Ok)
    );

    // just above f32::MAX but below 2^128: still overflow, not truncation
    let above_max = [0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xEF, 0x47];
    assert_eq!(value(&above_max).get::<f64>().1, ResultCode::Ok);
    assert_eq!(
        value(&above_max).get::<f32>(),
        (f32::INFINITY, ResultCode::ApproxExtreme)
    );
}

#[test]
fn float_extreme_exponent_saturates() {
    // k = 7 with an all-ones exponent is finite in DBOR, outside binary64
    let huge = [0xCF, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x7F];
    assert_eq!(
        value(&huge).get::<f64>(),
        (f64::INFINITY, ResultCode::ApproxExtreme)
    );
    assert_eq!(
        value(&huge).get::<f32>(),
        (f32::INFINITY, ResultCode::ApproxExtreme)
    );

    let huge_negative = [0xCF, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0xFF];
    assert_eq!(
        value(&huge_negative).get::<f64>(),
        (f64::NEG_INFINITY, ResultCode::ApproxExtreme)
    );

    // k = 6 with an all-ones exponent field rebiases to the same territory
    let k6 = [0xCE, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0xFF];
    assert_eq!(
        value(&k6).get::<f64>(),
        (f64::NEG_INFINITY, ResultCode::ApproxExtreme)
    );
}

#[test]
fn float_sign_only_payload_is_illformed() {
    let negative_nothing = [0xCF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
    let (v, code) = value(&negative_nothing).get::<f64>();
    assert!(v.is_nan());
    assert_eq!(code, ResultCode::Illformed);
}

#[test]
fn decimal_from_integers() {
    assert_eq!(
        value(&[0x00]).get::<DecimalRational>(),
        (DecimalRational { mant: 0, exp10: 0 }, ResultCode::Ok)
    );
    assert_eq!(
        value(&[0x18, 0xE7]).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: 255,
                exp10: 0
            },
            ResultCode::Ok
        )
    );
    // outside i32: an in-range approximation, saturated
    assert_eq!(
        value(&[0x1B, 0xFF, 0xFF, 0xFF, 0xFF]).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: i32::MAX,
                exp10: 0
            },
            ResultCode::ApproxImprecise
        )
    );
    assert_eq!(
        value(&[0x3B, 0xFF, 0xFF, 0xFF, 0xFF]).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: i32::MIN,
                exp10: 0
            },
            ResultCode::ApproxImprecise
        )
    );
}

#[test]
fn decimal_mantissa_saturates_with_exponent_kept() {
    let buffer = [0xE0, 0x1B, 0xFF, 0xFF, 0xFF, 0xFF];
    assert_eq!(
        value(&buffer).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: i32::MAX,
                exp10: 1
            },
            ResultCode::ApproxExtreme
        )
    );
}

#[test]
fn decimal_exponent_outside_i32_is_unsupported() {
    // |e| = 0xFFFFFFFF + 0x01010101 + 8
    let buffer = [0xD3, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
    assert_eq!(
        value(&buffer).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::Unsupported)
    );

    // the 8-byte exponent token overflows u64 entirely
    let buffer = [0xD7, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
    assert_eq!(
        value(&buffer).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::Unsupported)
    );
}

#[test]
fn decimal_numberlike_and_none() {
    assert_eq!(
        value(&[0xFC]).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::ApproxImprecise)
    );
    assert_eq!(
        value(&[0xFD]).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: i32::MIN,
                exp10: i32::MAX
            },
            ResultCode::ApproxExtreme
        )
    );
    assert_eq!(
        value(&[0xFE]).get::<DecimalRational>(),
        (
            DecimalRational {
                mant: i32::MAX,
                exp10: i32::MAX
            },
            ResultCode::ApproxExtreme
        )
    );
    assert_eq!(
        value(&[0xFF]).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::NoObject)
    );
}

#[test]
fn decimal_grammar_violations() {
    // exponent token followed by a non-integer token: the exponent token
    // stands alone as a one-byte ill-formed value
    let standalone = value(&[0xE0, 0xFF]);
    assert_eq!(standalone.len(), 1);
    assert_eq!(
        standalone.get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::Illformed)
    );
    // zero mantissa must be encoded as IntegerValue(0)
    assert_eq!(
        value(&[0xE0, 0x00]).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::Illformed)
    );
    // a binary rational is not a decimal rational
    assert_eq!(
        value(&[0xC8, 0x00]).get::<DecimalRational>(),
        (DecimalRational::default(), ResultCode::Incompatible)
    );
}

#[test]
fn byte_string_extraction() {
    let buffer = [0x43, 0x01, 0x02, 0x03];
    let (bytes, code) = value(&buffer).get::<&[u8]>();
    assert_eq!(code, ResultCode::Ok);
    assert_eq!(bytes, &[0x01, 0x02, 0x03]);

    let empty = [0x40];
    let (bytes, code) = value(&empty).get::<&[u8]>();
    assert_eq!(code, ResultCode::Ok);
    assert!(bytes.is_empty());

    // a UTF-8 string is not a byte string
    let (bytes, code) = value(&[0x61, 0x41]).get::<&[u8]>();
    assert_eq!(code, ResultCode::Incompatible);
    assert!(bytes.is_empty());

    let (bytes, code) = value(&[0xFF]).get::<&[u8]>();
    assert_eq!(code, ResultCode::NoObject);
    assert!(bytes.is_empty());
}

#[test]
fn utf8_string_respects_max_size() {
    let buffer = [0x62, 0x41, 0x42];

    let (s, code) = value(&buffer).get_utf8(2);
    assert_eq!(code, ResultCode::Ok);
    assert_eq!(s.bytes(), b"AB");

    let (s, code) = value(&buffer).get_utf8(1);
    assert_eq!(code, ResultCode::Range);
    assert!(s.is_empty());

    let (s, code) = value(&[0x43, 0x01, 0x02, 0x03]).get_utf8(100);
    assert_eq!(code, ResultCode::Incompatible);
    assert!(s.is_empty());
}

#[test]
fn containers_are_incompatible_with_scalars() {
    for buffer in [&[0x80][..], &[0xA0], &[0xC0, 0x00, 0x07]] {
        let v = value(buffer);
        assert_eq!(v.get::<u32>().1, ResultCode::Incompatible);
        assert_eq!(v.get::<i64>().1, ResultCode::Incompatible);
        assert_eq!(v.get::<f64>().1, ResultCode::Incompatible);
        assert_eq!(v.get::<&[u8]>().1, ResultCode::Incompatible);
    }
}

#[test]
fn reserved_first_bytes_are_illformed() {
    for b in 0xF0..=0xFB_u8 {
        let buffer = [b];
        let v = value(&buffer);
        assert_eq!(v.get::<u8>(), (0, ResultCode::Illformed));
        assert_eq!(v.get::<i64>(), (0, ResultCode::Illformed));
        assert_eq!(v.get::<f64>().1, ResultCode::Illformed);
        assert_eq!(v.get::<&[u8]>().1, ResultCode::Illformed);
        assert_eq!(v.get_utf8(8).1, ResultCode::Illformed);
    }
}

#[test]
fn incomplete_values_report_incomplete() {
    for buffer in [&[0x19][..], &[0x58, 0x00], &[0xC9, 0x00], &[0xD1, 0xFF]] {
        let v = Value::new(buffer);
        assert!(!v.is_complete());
        assert_eq!(v.get::<u64>(), (0, ResultCode::Incomplete));
        assert_eq!(v.get::<i32>(), (0, ResultCode::Incomplete));
        assert_eq!(v.get::<f32>().1, ResultCode::Incomplete);
        assert_eq!(
            v.get::<DecimalRational>(),
            (DecimalRational::default(), ResultCode::Incomplete)
        );
        assert_eq!(v.get::<&[u8]>().1, ResultCode::Incomplete);
        assert_eq!(v.get_utf8(100).1, ResultCode::Incomplete);
    }
}
