use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

/// Code of the result of a single operation involving a DBOR value.
///
/// The numeric value of a code reflects its severity: the higher the value,
/// the more severe the outcome. `Ok` is zero; every other code occupies one
/// distinct bit so that codes combine losslessly into a [`ResultCodes`] set.
///
/// For extraction operations, the code describes the relation between the
/// written output and the encoded object:
///
/// | Code | Output |
/// |---|---|
/// | `Ok` | the object, exactly |
/// | `ApproxImprecise` | in-range approximation, rounded towards zero |
/// | `ApproxExtreme` | minimum or maximum of the target because the object lies outside |
/// | `Range` | default for the target type (object violates a caller-given constraint) |
/// | `NoObject` | default (the source is the explicit absence marker) |
/// | `Incompatible` | default (well-formed value of an unexpected kind) |
/// | `Unsupported` | default (well-formed but beyond this implementation) |
/// | `Illformed` | default (violates the DBOR grammar) |
/// | `Incomplete` | default (buffer ended before the value did) |
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultCode {
    /// Exact result.
    Ok = 0,
    /// Representable approximation inside the target's range.
    ApproxImprecise = 1 << 0,
    /// Saturated at the representable minimum or maximum.
    ApproxExtreme = 1 << 1,
    /// Valid DBOR, but outside the constraints the caller requested.
    Range = 1 << 2,
    /// The source is the explicit absence marker (`NoneValue`).
    NoObject = 1 << 3,
    /// Valid DBOR of an unexpected kind.
    Incompatible = 1 << 4,
    /// Valid DBOR beyond this implementation's representational reach.
    Unsupported = 1 << 5,
    /// The value violates the DBOR grammar.
    Illformed = 1 << 6,
    /// The buffer ended before the value did.
    Incomplete = 1 << 7,
}

impl ResultCode {
    /// Returns `true` iff this is [`ResultCode::Ok`].
    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns `true` iff this is `Ok` after clearing the bits in `exceptions`.
    #[inline]
    #[must_use]
    pub const fn is_ok_except(self, exceptions: ResultCodes) -> bool {
        ResultCodes(self as u8).is_ok_except(exceptions)
    }

    /// Returns `true` iff this is one of the two approximation codes.
    #[inline]
    #[must_use]
    pub const fn is_approx(self) -> bool {
        matches!(self, Self::ApproxImprecise | Self::ApproxExtreme)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Ok => "ok",
            Self::ApproxImprecise => "approximated (imprecise)",
            Self::ApproxExtreme => "approximated (extreme)",
            Self::Range => "outside requested range",
            Self::NoObject => "no object",
            Self::Incompatible => "incompatible kind",
            Self::Unsupported => "unsupported value",
            Self::Illformed => "ill-formed value",
            Self::Incomplete => "incomplete value",
        };
        f.write_str(msg)
    }
}

/// Set of "not ok" result codes.
///
/// Sets arise from OR-folding the codes of several operations:
///
/// ```
/// use dbor::{ResultCode, ResultCodes, Value};
///
/// let first = Value::new(&[0x18, 0xFF]);
/// let second = Value::new(&[0xFF]);
///
/// let (a, ca) = first.get::<u8>();
/// let (b, cb) = second.get::<u8>();
/// let results: ResultCodes = ca | cb;
///
/// assert_eq!((a, b), (255, 0));
/// assert!(results.contains(ResultCode::ApproxExtreme));
/// assert!(results.contains(ResultCode::NoObject));
/// assert!(results.is_ok_except(ResultCode::ApproxExtreme | ResultCode::NoObject));
/// ```
///
/// `|` is set union, `&` is intersection and `-` removes members; all three
/// accept [`ResultCode`] and [`ResultCodes`] operands on either side. Use
/// [`least_severe`](Self::least_severe) to walk the members of a set in
/// severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultCodes(u8);

impl ResultCodes {
    /// The empty set: every operation reported `Ok`.
    pub const NONE: Self = Self(0);
    /// The set of all "not ok" codes.
    pub const ALL: Self = Self(0xFF);

    const APPROX: u8 = ResultCode::ApproxImprecise as u8 | ResultCode::ApproxExtreme as u8;

    /// Returns the raw bitmask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reconstructs a set from a raw bitmask.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns `true` iff the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` iff `code` is a member of the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, code: ResultCode) -> bool {
        self.0 & code as u8 != 0
    }

    /// Returns `true` iff the set is empty after removing `exceptions`.
    ///
    /// Use this to tolerate a chosen subset of outcomes, e.g. accept
    /// `ApproxImprecise` but reject everything else.
    #[inline]
    #[must_use]
    pub const fn is_ok_except(self, exceptions: Self) -> bool {
        self.0 & !exceptions.0 == 0
    }

    /// Returns `true` iff the set is non-empty and contains approximation
    /// codes only.
    #[inline]
    #[must_use]
    pub const fn is_approx(self) -> bool {
        self.0 != 0 && self.0 & !Self::APPROX == 0
    }

    /// Returns the least severe member, or `Ok` for the empty set.
    ///
    /// Repeatedly removing the returned code iterates over the members of the
    /// set in order of increasing severity.
    #[must_use]
    pub const fn least_severe(self) -> ResultCode {
        // isolate the lowest set bit
        match self.0 & self.0.wrapping_neg() {
            0x01 => ResultCode::ApproxImprecise,
            0x02 => ResultCode::ApproxExtreme,
            0x04 => ResultCode::Range,
            0x08 => ResultCode::NoObject,
            0x10 => ResultCode::Incompatible,
            0x20 => ResultCode::Unsupported,
            0x40 => ResultCode::Illformed,
            0x80 => ResultCode::Incomplete,
            _ => ResultCode::Ok,
        }
    }
}

impl fmt::Display for ResultCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("ok");
        }
        let mut rest = *self;
        let mut first = true;
        while !rest.is_ok() {
            let code = rest.least_severe();
            if !first {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(&code, f)?;
            rest -= code;
            first = false;
        }
        Ok(())
    }
}

impl From<ResultCode> for ResultCodes {
    #[inline]
    fn from(code: ResultCode) -> Self {
        Self(code as u8)
    }
}

macro_rules! impl_set_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for ResultCodes {
            type Output = ResultCodes;
            #[inline]
            fn $method(self, rhs: ResultCodes) -> ResultCodes {
                ResultCodes(self.0 $op rhs.0)
            }
        }

        impl $trait<ResultCode> for ResultCodes {
            type Output = ResultCodes;
            #[inline]
            fn $method(self, rhs: ResultCode) -> ResultCodes {
                self.$method(ResultCodes::from(rhs))
            }
        }

        impl $trait<ResultCodes> for ResultCode {
            type Output = ResultCodes;
            #[inline]
            fn $method(self, rhs: ResultCodes) -> ResultCodes {
                ResultCodes::from(self).$method(rhs)
            }
        }

        impl $trait for ResultCode {
            type Output = ResultCodes;
            #[inline]
            fn $method(self, rhs: ResultCode) -> ResultCodes {
                ResultCodes::from(self).$method(ResultCodes::from(rhs))
            }
        }

        impl $assign_trait for ResultCodes {
            #[inline]
            fn $assign_method(&mut self, rhs: ResultCodes) {
                *self = (*self).$method(rhs);
            }
        }

        impl $assign_trait<ResultCode> for ResultCodes {
            #[inline]
            fn $assign_method(&mut self, rhs: ResultCode) {
                *self = (*self).$method(rhs);
            }
        }
    };
}

// Union.
impl_set_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
// Intersection.
impl_set_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);

impl Sub for ResultCodes {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl Sub<ResultCode> for ResultCodes {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: ResultCode) -> Self {
        self - Self::from(rhs)
    }
}

impl SubAssign for ResultCodes {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<ResultCode> for ResultCodes {
    #[inline]
    fn sub_assign(&mut self, rhs: ResultCode) {
        *self = *self - rhs;
    }
}
