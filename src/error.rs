// Copyright (c) 2023 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors that may occur in this crate.
//!
//! All fallible operations return [`HpackError`] (or [`BufferError`] for
//! raw-buffer primitives, which nests into `HpackError`). Every error maps
//! to a 32-bit numeric code composed as `(domain << 16) | subcode`, which
//! is what the [`tracer`] hook receives.
//!
//! [`tracer`]: crate::tracer

use thiserror::Error;

use crate::tracer::make_error;
use crate::util::raw_buffer::BufferError;

/// Error domain of the codec and table operations.
pub const DOMAIN_HPACK: u16 = 0x0001;
/// Error domain of the raw byte buffer.
pub const DOMAIN_BUFFER: u16 = 0x0002;

/// Errors that may occur when using this crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HpackError {
    /// A zero-sized input was passed where at least one byte is required.
    #[error("input size is zero")]
    EmptyInput,

    /// The integer prefix width is outside `[1, 8]`.
    #[error("unsupported integer prefix width: {0}")]
    UnsupportedPrefix(u8),

    /// A symbol bit length is outside `[1, 30]`.
    #[error("unsupported symbol bit length: {0}")]
    UnsupportedBitLength(u8),

    /// The output slice cannot hold the encoded or decoded result.
    #[error("output buffer too small")]
    BufferTooSmall,

    /// The nibble FSM hit a bit pattern that is no Huffman code prefix.
    #[error("invalid Huffman code prefix (nibble fsm)")]
    InvalidPrefixNibble,

    /// The full-byte FSM hit a bit pattern that is no Huffman code prefix.
    #[error("invalid Huffman code prefix (full-byte fsm)")]
    InvalidPrefixFullByte,

    /// The Huffman stream did not end on valid EOS padding (nibble fsm).
    #[error("invalid Huffman EOS padding (nibble fsm)")]
    InvalidEosPaddingNibble,

    /// The Huffman stream did not end on valid EOS padding (full-byte fsm).
    #[error("invalid Huffman EOS padding (full-byte fsm)")]
    InvalidEosPaddingFullByte,

    /// A prefix integer ran out of input before its final byte.
    #[error("prefix integer is not terminated")]
    IntegerUnterminated,

    /// A prefix integer does not fit the value type.
    #[error("prefix integer overflow")]
    IntegerOverflow,

    /// A raw-buffer operation failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

impl HpackError {
    /// Returns the 32-bit numeric code of this error,
    /// `(domain << 16) | subcode`.
    pub fn code(&self) -> u32 {
        match self {
            Self::EmptyInput => make_error(DOMAIN_HPACK, 1),
            Self::UnsupportedPrefix(_) => make_error(DOMAIN_HPACK, 2),
            Self::UnsupportedBitLength(_) => make_error(DOMAIN_HPACK, 3),
            Self::BufferTooSmall => make_error(DOMAIN_HPACK, 4),
            Self::InvalidPrefixNibble => make_error(DOMAIN_HPACK, 5),
            Self::InvalidPrefixFullByte => make_error(DOMAIN_HPACK, 6),
            Self::InvalidEosPaddingNibble => make_error(DOMAIN_HPACK, 7),
            Self::InvalidEosPaddingFullByte => make_error(DOMAIN_HPACK, 8),
            Self::IntegerUnterminated => make_error(DOMAIN_HPACK, 9),
            Self::IntegerOverflow => make_error(DOMAIN_HPACK, 10),
            Self::Buffer(e) => make_error(DOMAIN_BUFFER, e.subcode()),
        }
    }
}
