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

//! Huffman encoder variants. Both produce identical wire bytes.
//!
//! Each input byte contributes its code, MSB-first, to a 64-bit
//! accumulator holding the pending bits right-justified. Whenever 32 or
//! more bits are pending, the top 32 are flushed as a big-endian word.
//! A stream that does not end on a byte boundary is completed with the
//! high bits of the EOS code, which are all ones.

use super::codebook::{CODE, EOS_CODE, EOS_LEN, LEN};
use super::fsm::ENCODE_TABLE;
use crate::error::HpackError;

/// Bit-wise variant: codes come straight from the codebook arrays.
pub(crate) fn encode_bitwise(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    if src.is_empty() {
        return Ok(0);
    }

    let mut acc: u64 = 0;
    let mut bits: u32 = 0;
    let mut pos = 0usize;

    for &sym in src {
        let code = CODE[sym as usize] as u64;
        let len = LEN[sym as usize] as u32;
        acc = (acc << len) | code;
        bits += len;
        pos = flush_words(acc, &mut bits, dst, pos)?;
        if bits > 0 {
            acc &= (1u64 << bits) - 1;
        } else {
            acc = 0;
        }
    }

    flush_tail(acc, bits, dst, pos)
}

/// Table-piece variant: codes come from the precomputed encode table as
/// left-aligned byte pieces.
pub(crate) fn encode_table_piece(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    if src.is_empty() {
        return Ok(0);
    }

    let mut acc: u64 = 0;
    let mut bits: u32 = 0;
    let mut pos = 0usize;

    for &sym in src {
        let entry = &ENCODE_TABLE[sym as usize];
        let len = entry.bit_length as u32;

        // reassemble the left-aligned pieces, then keep the top `len` bits
        let mut piece: u64 = 0;
        for b in 0..entry.byte_count as usize {
            piece |= (entry.bytes[b] as u64) << (56 - 8 * b);
        }
        let code = piece >> (64 - len);

        acc = (acc << len) | code;
        bits += len;
        pos = flush_words(acc, &mut bits, dst, pos)?;
        if bits > 0 {
            acc &= (1u64 << bits) - 1;
        } else {
            acc = 0;
        }
    }

    flush_tail(acc, bits, dst, pos)
}

// Flushes whole 32-bit groups big-endian; returns the new output position.
fn flush_words(
    acc: u64,
    bits: &mut u32,
    dst: &mut [u8],
    mut pos: usize,
) -> Result<usize, HpackError> {
    while *bits >= 32 {
        let word = (acc >> (*bits - 32)) as u32;
        if pos + 4 > dst.len() {
            return Err(HpackError::BufferTooSmall);
        }
        dst[pos..pos + 4].copy_from_slice(&word.to_be_bytes());
        pos += 4;
        *bits -= 32;
    }
    Ok(pos)
}

// Pads the pending bits with the high bits of EOS and emits the rest.
fn flush_tail(
    mut acc: u64,
    mut bits: u32,
    dst: &mut [u8],
    mut pos: usize,
) -> Result<usize, HpackError> {
    if bits == 0 {
        return Ok(pos);
    }
    let pad = (8 - (bits & 7)) & 7;
    if pad > 0 {
        let pad_bits = (EOS_CODE >> (EOS_LEN as u32 - pad)) as u64;
        acc = (acc << pad) | pad_bits;
        bits += pad;
    }
    while bits >= 8 {
        bits -= 8;
        if pos >= dst.len() {
            return Err(HpackError::BufferTooSmall);
        }
        dst[pos] = (acc >> bits) as u8;
        pos += 1;
    }
    Ok(pos)
}
