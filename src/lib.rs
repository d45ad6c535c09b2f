//! # dbor
//!
//! Decoder for **DBOR** (Dense Binary Object Representation), a self-describing
//! binary format for compactly encoded numbers, strings and containers.
//!
//! ## Design principles
//!
//! - **Caller-owned buffers only.**
//!   Every product of this crate ([`Value`], [`StringRef`], iterators) is a
//!   non-owning view into a byte slice supplied by the caller. The crate never
//!   allocates and never performs I/O, which makes it usable from interrupt
//!   handlers and other freestanding contexts.
//! - **Errors are values.**
//!   Every decode operation returns its output together with a [`ResultCode`];
//!   codes combine into a [`ResultCodes`] set so that a chain of extractions
//!   can be checked in one place. Nothing panics, nothing aborts.
//! - **Truncated input is a state, not a failure.**
//!   A buffer that ends in the middle of a value yields an *incomplete*
//!   [`Value`] reporting [`ResultCode::Incomplete`]; extending the buffer and
//!   retrying is always meaningful.
//!
//! ## Feature flags
//!
//! - `fast-64bit-arith` *(default)*: decode natural-number tokens for 64-bit
//!   targets in one 64-bit pass. Without it, a split 32-bit-halves routine is
//!   used; results are bit-identical.
//! - `serde`: `serde::Serialize`/`Deserialize` for [`ResultCode`] and
//!   [`ResultCodes`].
//!
//! ## Example
//!
//! ```
//! use dbor::{ResultCodes, Value, ValueSequence};
//!
//! // None, IntegerValue(12), Infinity
//! let buffer = [0xFF, 0x0C, 0xFE];
//!
//! let mut results = ResultCodes::NONE;
//! let mut decoded = [0u8; 3];
//! for (slot, value) in decoded.iter_mut().zip(&ValueSequence::new(&buffer)) {
//!     let (v, code) = value.get::<u8>();
//!     *slot = v;
//!     results |= code;
//! }
//!
//! assert_eq!(decoded, [0, 12, 255]);
//! assert!(!results.is_ok());
//! ```
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod result;
mod sequence;
mod string;
mod token;
mod utf8;
mod value;

pub use crate::result::{ResultCode, ResultCodes};
pub use crate::sequence::{SequenceIter, ValueSequence};
pub use crate::string::{CodePointStats, StringRef};
pub use crate::token::{
    decode_binary_rational_token_32, decode_binary_rational_token_64, decode_natural_token_u16,
    decode_natural_token_u32, decode_natural_token_u64, encode_natural_token,
    narrow_binary_rational_64_to_32, size_of_byte_string, size_of_integer, size_of_token,
    size_of_unsigned_integer, size_of_utf8_string, size_of_value,
    widen_binary_rational_32_to_64, INF, MINUS_INF, MINUS_ZERO, NONE,
};
pub use crate::utf8::{
    first_code_point_in, offset_of_last_code_point_in, size_of_utf8_for_code_point, CodePoint,
    INVALID_CODE_POINT,
};
pub use crate::value::{Decode, DecimalRational, Value};
