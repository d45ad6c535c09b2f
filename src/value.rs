use core::cmp::Ordering;

use crate::result::ResultCode;
use crate::string::StringRef;
use crate::token::{
    self, decode_binary_rational_token_32, decode_binary_rational_token_64,
    decode_natural_token_u32, narrow_binary_rational_64_to_32, size_of_token, size_of_value,
    widen_binary_rational_32_to_64,
};

const SIGN_MASK_64: u64 = 1 << 63;

/// A DBOR value (well-formed, ill-formed or incomplete) in a borrowed byte
/// buffer.
///
/// A value is *complete* if the buffer is long enough to determine its size
/// and holds at least that many bytes; the view then covers exactly the
/// value's bytes. Otherwise the value is *incomplete* and covers the whole
/// remaining buffer. The default-constructed value is empty and incomplete.
///
/// ```
/// use dbor::Value;
///
/// let buffer = [
///     0xC8, 0x00, // BinaryRationalValue representing 0.125
///     0x07,       // IntegerValue(7)
/// ];
///
/// let value = Value::new(&buffer);
/// assert_eq!(value.len(), 2);
/// assert!(value.is_complete());
///
/// let truncated = Value::new(&buffer[..1]);
/// assert_eq!(truncated.len(), 1);
/// assert!(!truncated.is_complete());
/// ```
///
/// The typed [`get`](Self::get) operations decode the represented object into
/// a caller-chosen target type; the accompanying [`ResultCode`] states how
/// output and object relate (see [`ResultCode`]). On every "not ok" outcome
/// the output is the target's deterministic default (`0`, NaN, an empty
/// view), so chained extractions never read uninitialised state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value<'a> {
    bytes: &'a [u8],
    complete: bool,
}

/// Typed extraction of one DBOR value, implemented for every supported
/// target type.
///
/// Implementations return the decoded output and the [`ResultCode`]
/// describing its relation to the encoded object; on failure the output is
/// the target's default. Usually invoked through [`Value::get`].
pub trait Decode<'a>: Sized {
    /// Decodes `value` into this target type.
    fn decode(value: &Value<'a>) -> (Self, ResultCode);
}

impl<'a> Value<'a> {
    /// Views the first value in `buffer`.
    ///
    /// Reads at most the bytes needed to determine the value's size (one or
    /// two in the typical case) and runs in constant time.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        if buffer.is_empty() {
            return Self::default();
        }
        let size = size_of_value(buffer);
        if size == 0 || size > buffer.len() {
            Self {
                bytes: buffer,
                complete: false,
            }
        } else {
            Self {
                bytes: &buffer[..size],
                complete: true,
            }
        }
    }

    /// Returns the viewed bytes; empty if and only if no buffer is assigned.
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the size of the value in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` iff no buffer is assigned.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` iff the buffer holds the complete value.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    #[inline]
    fn first_byte(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    /// Returns `true` iff this is the explicit absence marker (`NoneValue`).
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.first_byte() == Some(token::NONE)
    }

    /// Returns `true` iff this is minus zero, minus infinity or infinity.
    #[inline]
    #[must_use]
    pub fn is_numberlike(&self) -> bool {
        matches!(self.first_byte(), Some(token::MINUS_ZERO..=token::INF))
    }

    /// Returns `true` iff this is an integer, binary-rational or
    /// decimal-rational value (well-formed or not).
    #[inline]
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.first_byte(), Some(0x00..=0x3F | 0xC8..=0xEF))
    }

    /// Returns `true` iff this is a byte or UTF-8 string (well-formed or not).
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self.first_byte(), Some(0x40..=0x7F))
    }

    /// Returns `true` iff this is a sequence, dictionary or allocated value
    /// (well-formed or not).
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self.first_byte(), Some(0x80..=0xC7))
    }

    /// Decodes this value into `T`.
    ///
    /// ```
    /// use dbor::{ResultCode, Value};
    ///
    /// let (v, code) = Value::new(&[0x18, 0xE7]).get::<u8>();
    /// assert_eq!((v, code), (255, ResultCode::Ok));
    ///
    /// let (v, code) = Value::new(&[0x18, 0xFF]).get::<u8>();
    /// assert_eq!((v, code), (255, ResultCode::ApproxExtreme));
    /// ```
    #[inline]
    #[must_use]
    pub fn get<T: Decode<'a>>(&self) -> (T, ResultCode) {
        T::decode(self)
    }

    /// Decodes this value as a UTF-8 string of at most `max_size` bytes.
    ///
    /// The payload is *not* validated as UTF-8; use [`StringRef::check`] or
    /// the narrowing accessors on the returned view. A payload larger than
    /// `max_size` yields an empty view with `Range`.
    #[must_use]
    pub fn get_utf8(&self, max_size: usize) -> (StringRef<'a>, ResultCode) {
        if !self.complete {
            return (StringRef::default(), ResultCode::Incomplete);
        }
        match self.bytes[0] {
            b @ 0x60..=0x7F => {
                let payload = &self.bytes[size_of_token(b)..];
                if payload.len() <= max_size {
                    (StringRef::new(payload), ResultCode::Ok)
                } else {
                    (StringRef::default(), ResultCode::Range)
                }
            }
            token::NONE => (StringRef::default(), ResultCode::NoObject),
            0xF0..=0xFB => (StringRef::default(), ResultCode::Illformed),
            _ => (StringRef::default(), ResultCode::Incompatible),
        }
    }
}

impl Ord for Value<'_> {
    /// Compares as (complete or incomplete) byte sequences: absent before
    /// present, then by first byte, then by size, then bytewise from the last
    /// byte towards the first (so that for two integers the one with the
    /// smaller magnitude is smaller), and finally incomplete before complete.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.bytes.is_empty(), other.bytes.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        self.bytes[0]
            .cmp(&other.bytes[0])
            .then(self.bytes.len().cmp(&other.bytes.len()))
            .then_with(|| {
                for i in (1..self.bytes.len()).rev() {
                    let ordering = self.bytes[i].cmp(&other.bytes[i]);
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            })
            .then(self.complete.cmp(&other.complete))
    }
}

impl PartialOrd for Value<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_decode_unsigned {
    ($($t:ty => $decode:path),* $(,)?) => {$(
        impl<'a> Decode<'a> for $t {
            fn decode(value: &Value<'a>) -> (Self, ResultCode) {
                if !value.complete {
                    return (0, ResultCode::Incomplete);
                }
                match value.bytes[0] {
                    b @ 0x00..=0x17 => (<$t>::from(b), ResultCode::Ok),
                    0x18..=0x1F => match $decode(&value.bytes[1..], 23) {
                        Some(v) if v <= <$t>::MAX.into() => (v as $t, ResultCode::Ok),
                        _ => (<$t>::MAX, ResultCode::ApproxExtreme),
                    },
                    0x20..=0x3F => (0, ResultCode::ApproxExtreme),
                    token::MINUS_ZERO => (0, ResultCode::ApproxImprecise),
                    token::MINUS_INF => (0, ResultCode::ApproxExtreme),
                    token::INF => (<$t>::MAX, ResultCode::ApproxExtreme),
                    token::NONE => (0, ResultCode::NoObject),
                    0xF0..=0xFB => (0, ResultCode::Illformed),
                    _ => (0, ResultCode::Incompatible),
                }
            }
        }
    )*};
}

macro_rules! impl_decode_signed {
    ($($t:ty => $decode:path),* $(,)?) => {$(
        impl<'a> Decode<'a> for $t {
            fn decode(value: &Value<'a>) -> (Self, ResultCode) {
                if !value.complete {
                    return (0, ResultCode::Incomplete);
                }
                match value.bytes[0] {
                    b @ 0x00..=0x17 => (b as $t, ResultCode::Ok),
                    0x18..=0x1F => match $decode(&value.bytes[1..], 23) {
                        Some(v) if v <= <$t>::MAX as _ => (v as $t, ResultCode::Ok),
                        _ => (<$t>::MAX, ResultCode::ApproxExtreme),
                    },
                    b @ 0x20..=0x37 => (-((b & 0x1F) as $t) - 1, ResultCode::Ok),
                    // magnitude - 1 decodes like a non-negative integer;
                    // -(2^(w-1)) is still representable
                    0x38..=0x3F => match $decode(&value.bytes[1..], 23) {
                        Some(v) if v <= <$t>::MAX as _ => (-(v as $t) - 1, ResultCode::Ok),
                        _ => (<$t>::MIN, ResultCode::ApproxExtreme),
                    },
                    token::MINUS_ZERO => (0, ResultCode::ApproxImprecise),
                    token::MINUS_INF => (<$t>::MIN, ResultCode::ApproxExtreme),
                    token::INF => (<$t>::MAX, ResultCode::ApproxExtreme),
                    token::NONE => (0, ResultCode::NoObject),
                    0xF0..=0xFB => (0, ResultCode::Illformed),
                    _ => (0, ResultCode::Incompatible),
                }
            }
        }
    )*};
}

impl_decode_unsigned! {
    u8 => crate::token::decode_natural_token_u32,
    u16 => crate::token::decode_natural_token_u32,
    u32 => crate::token::decode_natural_token_u32,
    u64 => crate::token::decode_natural_token_u64,
}

impl_decode_signed! {
    i8 => crate::token::decode_natural_token_u32,
    i16 => crate::token::decode_natural_token_u32,
    i32 => crate::token::decode_natural_token_u32,
    i64 => crate::token::decode_natural_token_u64,
}

/// Outcome of reassembling a binary-rational token into binary64 wire bits.
enum RationalBits {
    Finite(u64),
    /// Exponent field is all ones: finite in DBOR, outside binary64.
    Extreme { negative: bool },
    Illformed,
}

fn binary_rational_bits_64(first_byte: u8, payload: &[u8]) -> RationalBits {
    let k = (first_byte & 7) as usize;
    let bits = if k < 4 {
        widen_binary_rational_32_to_64(decode_binary_rational_token_32(payload))
    } else {
        decode_binary_rational_token_64(payload)
    };

    if k == 7 && bits & !SIGN_MASK_64 == 0 {
        // An 8-byte payload of zero except for the sign bit is not a number.
        return RationalBits::Illformed;
    }
    if (bits >> 52) & 0x7FF == 0x7FF {
        return RationalBits::Extreme {
            negative: bits & SIGN_MASK_64 != 0,
        };
    }
    RationalBits::Finite(bits)
}

impl<'a> Decode<'a> for f64 {
    fn decode(value: &Value<'a>) -> (Self, ResultCode) {
        if !value.complete {
            return (Self::NAN, ResultCode::Incomplete);
        }
        match value.bytes[0] {
            0x00 => (0.0, ResultCode::Ok),
            token::MINUS_ZERO => (-0.0, ResultCode::Ok),
            token::MINUS_INF => (Self::NEG_INFINITY, ResultCode::Ok),
            token::INF => (Self::INFINITY, ResultCode::Ok),
            token::NONE => (Self::NAN, ResultCode::NoObject),
            b @ 0xC8..=0xCF => match binary_rational_bits_64(b, &value.bytes[1..]) {
                RationalBits::Finite(bits) => (Self::from_bits(bits), ResultCode::Ok),
                RationalBits::Extreme { negative } => (
                    if negative {
                        Self::NEG_INFINITY
                    } else {
                        Self::INFINITY
                    },
                    ResultCode::ApproxExtreme,
                ),
                RationalBits::Illformed => (Self::NAN, ResultCode::Illformed),
            },
            0xF0..=0xFB => (Self::NAN, ResultCode::Illformed),
            _ => (Self::NAN, ResultCode::Incompatible),
        }
    }
}

impl<'a> Decode<'a> for f32 {
    fn decode(value: &Value<'a>) -> (Self, ResultCode) {
        if !value.complete {
            return (Self::NAN, ResultCode::Incomplete);
        }
        match value.bytes[0] {
            0x00 => (0.0, ResultCode::Ok),
            token::MINUS_ZERO => (-0.0, ResultCode::Ok),
            token::MINUS_INF => (Self::NEG_INFINITY, ResultCode::Ok),
            token::INF => (Self::INFINITY, ResultCode::Ok),
            token::NONE => (Self::NAN, ResultCode::NoObject),
            b @ 0xC8..=0xCF => match binary_rational_bits_64(b, &value.bytes[1..]) {
                RationalBits::Finite(bits) => {
                    let (narrowed, abs_dir) = narrow_binary_rational_64_to_32(bits);
                    let code = match abs_dir {
                        0 => ResultCode::Ok,
                        d if d > 0 => ResultCode::ApproxExtreme,
                        _ => ResultCode::ApproxImprecise,
                    };
                    (Self::from_bits(narrowed), code)
                }
                RationalBits::Extreme { negative } => (
                    if negative {
                        Self::NEG_INFINITY
                    } else {
                        Self::INFINITY
                    },
                    ResultCode::ApproxExtreme,
                ),
                RationalBits::Illformed => (Self::NAN, ResultCode::Illformed),
            },
            0xF0..=0xFB => (Self::NAN, ResultCode::Illformed),
            _ => (Self::NAN, ResultCode::Incompatible),
        }
    }
}

/// A decimal rational number `mant * 10^exp10`.
///
/// Target type of the decimal extraction; see [`Value::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalRational {
    /// Mantissa.
    pub mant: i32,
    /// Decimal exponent.
    pub exp10: i32,
}

/// Decodes an integer token into `i32`, saturating with `ApproxExtreme`.
///
/// `bytes[0]` must be in `0x00..=0x3F`.
fn decode_integer_token_i32(bytes: &[u8]) -> (i32, ResultCode) {
    match bytes[0] {
        b @ 0x00..=0x17 => (i32::from(b), ResultCode::Ok),
        0x18..=0x1F => match decode_natural_token_u32(&bytes[1..], 23) {
            Some(v) if v <= i32::MAX as u32 => (v as i32, ResultCode::Ok),
            _ => (i32::MAX, ResultCode::ApproxExtreme),
        },
        b @ 0x20..=0x37 => (-i32::from(b & 0x1F) - 1, ResultCode::Ok),
        _ => match decode_natural_token_u32(&bytes[1..], 23) {
            Some(v) if v <= i32::MAX as u32 => (-(v as i32) - 1, ResultCode::Ok),
            _ => (i32::MIN, ResultCode::ApproxExtreme),
        },
    }
}

impl<'a> Decode<'a> for DecimalRational {
    fn decode(value: &Value<'a>) -> (Self, ResultCode) {
        if !value.complete {
            return (Self::default(), ResultCode::Incomplete);
        }
        let bytes = value.bytes;
        match bytes[0] {
            0x00..=0x3F => {
                // An integer m is the decimal rational (m, 0); outside i32 it
                // saturates as an in-range approximation of (m / 10^n, n).
                let (mant, code) = decode_integer_token_i32(bytes);
                let code = if code.is_ok() {
                    code
                } else {
                    ResultCode::ApproxImprecise
                };
                (Self { mant, exp10: 0 }, code)
            }
            b @ 0xD0..=0xEF => decode_decimal_rational(b, bytes),
            token::MINUS_ZERO => (Self::default(), ResultCode::ApproxImprecise),
            token::MINUS_INF => (
                Self {
                    mant: i32::MIN,
                    exp10: i32::MAX,
                },
                ResultCode::ApproxExtreme,
            ),
            token::INF => (
                Self {
                    mant: i32::MAX,
                    exp10: i32::MAX,
                },
                ResultCode::ApproxExtreme,
            ),
            token::NONE => (Self::default(), ResultCode::NoObject),
            0xF0..=0xFB => (Self::default(), ResultCode::Illformed),
            _ => (Self::default(), ResultCode::Incompatible),
        }
    }
}

fn decode_decimal_rational(first_byte: u8, bytes: &[u8]) -> (DecimalRational, ResultCode) {
    let head = if first_byte < 0xE0 {
        size_of_token(first_byte)
    } else {
        1
    };

    // exponent token must be followed by a non-zero integer mantissa
    let Some(&mant_first) = bytes.get(head) else {
        return (DecimalRational::default(), ResultCode::Illformed);
    };
    if mant_first >= 0x40 || mant_first == 0x00 {
        return (DecimalRational::default(), ResultCode::Illformed);
    }

    let magnitude = if first_byte < 0xE0 {
        // 1101xyyy: |e| - 8 follows as a natural-number token
        match crate::token::decode_natural_token_u64(&bytes[1..head], 8) {
            Some(v) if v <= i32::MAX as u64 => v as u32,
            _ => return (DecimalRational::default(), ResultCode::Unsupported),
        }
    } else {
        // 1110xeee: |e| = eee + 1
        u32::from(first_byte & 0x07) + 1
    };

    let exp10 = if first_byte & 0x08 == 0 {
        magnitude as i32
    } else {
        -(magnitude as i32)
    };
    let (mant, code) = decode_integer_token_i32(&bytes[head..]);
    (DecimalRational { mant, exp10 }, code)
}

impl<'a> Decode<'a> for &'a [u8] {
    /// Byte-string extraction: yields the payload without validating its
    /// content.
    fn decode(value: &Value<'a>) -> (Self, ResultCode) {
        if !value.complete {
            return (&[], ResultCode::Incomplete);
        }
        match value.bytes[0] {
            b @ 0x40..=0x5F => (&value.bytes[size_of_token(b)..], ResultCode::Ok),
            token::NONE => (&[], ResultCode::NoObject),
            0xF0..=0xFB => (&[], ResultCode::Illformed),
            _ => (&[], ResultCode::Incompatible),
        }
    }
}
