//! Buffer-safe UTF-8 scanning per Unicode 13.0, chapter 3.
//!
//! The scanner never reads past the given buffer and reports, for every
//! failure mode, how many bytes it consumed, so that callers can resume or
//! truncate without tearing a multi-byte code point.

/// A Unicode code point, valid if in `0x0000..=0xD7FF` or `0xE000..=0x10FFFF`.
pub type CodePoint = u32;

/// Sentinel for "no valid code point".
pub const INVALID_CODE_POINT: CodePoint = CodePoint::MAX;

/// Returns the UTF-8 encoded size (1..=4) of `code_point`, or `0` if it is
/// not a Unicode scalar value.
#[must_use]
pub const fn size_of_utf8_for_code_point(code_point: CodePoint) -> usize {
    if code_point < 0x80 {
        1
    } else if code_point < 0x800 {
        2
    } else if code_point < 0x1_0000 {
        if code_point >= 0xD800 && code_point <= 0xDFFF {
            0
        } else {
            3
        }
    } else if code_point < 0x11_0000 {
        4
    } else {
        0
    }
}

/// Returns the first UTF-8 encoded code point in `buffer` and the number of
/// consumed bytes.
///
/// The code point is [`INVALID_CODE_POINT`] if the buffer is empty (size 0),
/// if the leading byte is not a valid UTF-8 start byte (size 1), if the
/// buffer holds fewer continuation bytes than the start byte promises (size
/// = `buffer.len()`), if a continuation byte is not of the form `10xxxxxx`
/// (size = bytes consumed so far), or if the sequence is a UTF-16 surrogate
/// or not the shortest form (size = sequence length). Otherwise the size is
/// in `1..=min(4, buffer.len())`.
#[must_use]
pub fn first_code_point_in(buffer: &[u8]) -> (CodePoint, usize) {
    let Some(&first) = buffer.first() else {
        return (INVALID_CODE_POINT, 0);
    };

    if first < 0b1000_0000 {
        return (CodePoint::from(first), 1);
    }
    if first < 0b1100_0000 || first >= 0b1111_1000 {
        // Invalid as a first byte; the sequence length cannot be determined.
        return (INVALID_CODE_POINT, 1);
    }

    // first      h  n
    // 110xxxxx   2  2
    // 1110xxxx   1  3
    // 11110xxx   0  4
    let h = usize::from((!first >> 4) & (first >> 5));
    let n = 4 - h;

    if n > buffer.len() {
        return (INVALID_CODE_POINT, buffer.len());
    }

    let mut c = CodePoint::from(first & (0x7F >> n));
    for (i, &b) in buffer[1..n].iter().enumerate() {
        if b & 0xC0 != 0x80 {
            return (INVALID_CODE_POINT, i + 1);
        }
        c = (c << 6) | CodePoint::from(b & 0x3F);
    }

    if n != size_of_utf8_for_code_point(c) {
        // Surrogate or over-long encoding.
        return (INVALID_CODE_POINT, n);
    }

    (c, n)
}

/// Returns the byte offset of the last potential code point start in
/// `buffer`: at most three bytes are scanned back from the end while they
/// are continuation bytes (`10xxxxxx`).
///
/// Returns `0` for an empty buffer and a value in
/// `max(0, len - 4)..=len - 1` otherwise. Truncating the buffer at the
/// returned offset never tears a well-formed code point.
#[must_use]
pub fn offset_of_last_code_point_in(buffer: &[u8]) -> usize {
    if buffer.is_empty() {
        return 0;
    }

    let mut offset = buffer.len() - 1;
    let mut n = offset.min(3);
    while n > 0 && buffer[offset] & 0xC0 == 0x80 {
        offset -= 1;
        n -= 1;
    }
    offset
}
