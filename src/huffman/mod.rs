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

//! [Huffman coding] implementation of the HTTP/2 protocol.
//!
//! [Huffman Coding]: https://en.wikipedia.org/wiki/Huffman_coding
//!
//! # Huffman code in HTTP/2
//! There is a table of Huffman code in `RFC7541`. This [Huffman code] was
//! generated from statistics obtained on a large sample of HTTP headers.
//! It is a canonical Huffman code with some tweaking to ensure that no
//! symbol has a unique code length.
//!
//! [Huffman Code]: https://www.rfc-editor.org/rfc/rfc7541.html#ref-HUFFMAN
//!
//! # Variants
//! The encoder and decoder each have two interchangeable implementations
//! producing identical wire bytes, chosen at compile time:
//!
//! - encoder: bit-op path (default) or the precomputed code-piece table
//!   (`huffman_table_encode` feature);
//! - decoder: nibble FSM (default, two lookups per byte) or full-byte FSM
//!   (`huffman_full_byte` feature, one lookup per byte).
//!
//! Decoding is strict: the stream must end on padding that is a prefix of
//! the EOS code no longer than seven bits.

pub mod codebook;

mod decode;
mod encode;
mod fsm;

pub mod codegen;

use crate::error::HpackError;
use crate::util::raw_buffer::RawBuffer;

/// Huffman-encodes `src` into `dst`, returning the number of bytes
/// written.
///
/// Empty input writes zero bytes and succeeds. Returns
/// [`HpackError::BufferTooSmall`] when `dst` cannot hold the result;
/// [`max_encoded_len`] gives a sufficient size.
pub fn encode(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    #[cfg(feature = "huffman_table_encode")]
    {
        encode::encode_table_piece(src, dst)
    }
    #[cfg(not(feature = "huffman_table_encode"))]
    {
        encode::encode_bitwise(src, dst)
    }
}

/// Decodes the Huffman stream `src` into `dst`, returning the number of
/// octets written.
///
/// Empty input writes zero bytes and succeeds. The decoder is strict:
/// an invalid code prefix or invalid EOS padding is an error, and no
/// assumption is made about the character encoding of the output.
pub fn decode(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    #[cfg(feature = "huffman_full_byte")]
    {
        decode::decode_full_byte(src, dst)
    }
    #[cfg(not(feature = "huffman_full_byte"))]
    {
        decode::decode_nibble(src, dst)
    }
}

/// Returns a sufficient output size for encoding `input_len` bytes:
/// every symbol takes at most 30 bits plus up to 7 padding bits.
pub const fn max_encoded_len(input_len: usize) -> usize {
    (input_len * 30 + 7) / 8
}

/// Returns a sufficient output size for decoding `encoded_len` bytes.
pub const fn max_decoded_len(encoded_len: usize) -> usize {
    (encoded_len * 30 + 7) / 8
}

/// Huffman-encodes `src`, appending the result to `out`. The buffer is
/// untouched on error.
pub fn encode_to_buffer(src: &[u8], out: &mut RawBuffer) -> Result<usize, HpackError> {
    let start = out.size();
    let span = out.append(max_encoded_len(src.len()))?;
    match encode(src, span) {
        Ok(written) => {
            out.truncate(start + written);
            Ok(written)
        }
        Err(e) => {
            out.truncate(start);
            Err(e)
        }
    }
}

/// Decodes the Huffman stream `src`, appending the octets to `out`. The
/// buffer is untouched on error.
pub fn decode_to_buffer(src: &[u8], out: &mut RawBuffer) -> Result<usize, HpackError> {
    let start = out.size();
    let span = out.append(max_decoded_len(src.len()))?;
    match decode(src, span) {
        Ok(written) => {
            out.truncate(start + written);
            Ok(written)
        }
        Err(e) => {
            out.truncate(start);
            Err(e)
        }
    }
}
