use crate::result::ResultCode;
use crate::utf8::{first_code_point_in, CodePoint, INVALID_CODE_POINT};

/// Code-point summary of a well-formed UTF-8 string, produced by
/// [`StringRef::check`].
///
/// For an empty or ill-formed string, `count` is `0` and `min`/`max` are
/// [`INVALID_CODE_POINT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePointStats {
    /// Number of code points.
    pub count: usize,
    /// Smallest code point.
    pub min: CodePoint,
    /// Largest code point.
    pub max: CodePoint,
}

impl CodePointStats {
    const EMPTY: Self = Self {
        count: 0,
        min: INVALID_CODE_POINT,
        max: INVALID_CODE_POINT,
    };
}

/// Non-owning view of a byte buffer that may hold a UTF-8 encoded Unicode
/// string.
///
/// Construction never validates; validation is the explicit [`check`]
/// operation. The narrowing accessors [`get_ascii`] and [`get_utf8`] combine
/// validation with a code-point range constraint.
///
/// [`check`]: Self::check
/// [`get_ascii`]: Self::get_ascii
/// [`get_utf8`]: Self::get_utf8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringRef<'a> {
    bytes: &'a [u8],
}

impl<'a> StringRef<'a> {
    /// Wraps `bytes` without validating.
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the underlying bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the size of the underlying buffer in bytes.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` iff the underlying buffer is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    /// Checks whether the buffer is empty or a well-formed UTF-8 string and
    /// summarises its code points.
    ///
    /// Returns `Ok` with the count and the minimum/maximum code point, or
    /// `Illformed` with the empty summary.
    #[must_use]
    pub fn check(self) -> (CodePointStats, ResultCode) {
        if self.bytes.is_empty() {
            return (CodePointStats::EMPTY, ResultCode::Ok);
        }
        self.check_non_empty()
    }

    /// Checks whether the buffer is empty or a well-formed UTF-8 string.
    #[must_use]
    pub fn is_well_formed(self) -> bool {
        self.check().1.is_ok()
    }

    fn check_non_empty(self) -> (CodePointStats, ResultCode) {
        let mut min = INVALID_CODE_POINT;
        let mut max = 0;
        let mut count = 0;

        let mut rest = self.bytes;
        loop {
            let (c, len) = first_code_point_in(rest);
            if c == INVALID_CODE_POINT {
                return (CodePointStats::EMPTY, ResultCode::Illformed);
            }

            if min > c {
                min = c;
            }
            if max < c {
                max = c;
            }
            count += 1;

            rest = &rest[len..];
            if rest.is_empty() {
                return (CodePointStats { count, min, max }, ResultCode::Ok);
            }
        }
    }

    /// Returns the buffer as an ASCII string if it is empty or well-formed
    /// UTF-8 with every code point in `0x20..=0x7E` (`printable_only`) or
    /// `0x00..=0x7F` (otherwise).
    ///
    /// Returns `Ok` with the bytes on success; `Range` if well-formed but
    /// outside the requested range, `Illformed` if ill-formed, each with an
    /// empty slice.
    #[must_use]
    pub fn get_ascii(self, printable_only: bool) -> (&'a [u8], ResultCode) {
        if self.bytes.is_empty() {
            return (self.bytes, ResultCode::Ok);
        }

        let (stats, code) = self.check_non_empty();
        if !code.is_ok() {
            return (&[], code);
        }

        let in_range = if printable_only {
            stats.min >= 0x20 && stats.max < 0x7F
        } else {
            stats.max < 0x80
        };
        if in_range {
            (self.bytes, ResultCode::Ok)
        } else {
            (&[], ResultCode::Range)
        }
    }

    /// Returns the buffer as a UTF-8 string if it is empty or well-formed
    /// with every code point in `min_code_point..=max_code_point`.
    ///
    /// Returns `Ok` with the bytes on success; `Range` if well-formed but
    /// outside the requested range, `Illformed` if ill-formed, each with an
    /// empty slice.
    #[must_use]
    pub fn get_utf8(
        self,
        min_code_point: CodePoint,
        max_code_point: CodePoint,
    ) -> (&'a [u8], ResultCode) {
        if self.bytes.is_empty() {
            return (self.bytes, ResultCode::Ok);
        }

        let (stats, code) = self.check_non_empty();
        if !code.is_ok() {
            return (&[], code);
        }

        if stats.min >= min_code_point && stats.max <= max_code_point {
            (self.bytes, ResultCode::Ok)
        } else {
            (&[], ResultCode::Range)
        }
    }
}
