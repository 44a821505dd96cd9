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

//! Table-driven Huffman decoder variants.
//!
//! Both variants run the same machine: a state is a position inside the
//! code trie, each lookup consumes input bits and emits zero, one or two
//! symbols. The decoders are octet-transparent: emitted bytes are never
//! interpreted as characters.
//!
//! On completion the final state must be a valid terminal: the consumed
//! padding has to be a most-significant prefix of the EOS code (all ones)
//! no longer than seven bits. Anything else is rejected.

use super::fsm::{
    byte_fsm, is_accepting, BIT_FSM, EMIT_INVALID, EOS_PAD_STATE, NIBBLE_ERROR, NIBBLE_FSM,
    STATE_DEPTH,
};
use crate::error::HpackError;

/// Nibble-FSM variant: two lookups per input byte, indexed by
/// `state * 16 + nibble`.
pub(crate) fn decode_nibble(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    if src.is_empty() {
        return Ok(0);
    }

    let mut state: u16 = 0;
    let mut pos = 0usize;

    for &byte in src {
        for nib in [byte >> 4, byte & 0x0f] {
            let packed = NIBBLE_FSM[state as usize * 16 + nib as usize];
            if packed & NIBBLE_ERROR != 0 {
                return Err(HpackError::InvalidPrefixNibble);
            }
            let emit = ((packed >> 20) & 0x3) as usize;
            if emit > 0 {
                if pos + emit > dst.len() {
                    return Err(HpackError::BufferTooSmall);
                }
                dst[pos] = (packed >> 12) as u8;
                if emit == 2 {
                    dst[pos + 1] = (packed >> 4) as u8;
                }
                pos += emit;
            }
            state = ((packed >> 22) & 0x1ff) as u16;
        }
    }

    if !terminal_is_valid(state) {
        return Err(HpackError::InvalidEosPaddingNibble);
    }
    Ok(pos)
}

/// Full-byte variant: one lookup per input byte, indexed by
/// `state * 256 + byte`.
pub(crate) fn decode_full_byte(src: &[u8], dst: &mut [u8]) -> Result<usize, HpackError> {
    if src.is_empty() {
        return Ok(0);
    }

    let table = byte_fsm();
    let mut state: u16 = 0;
    let mut pos = 0usize;

    for &byte in src {
        let entry = &table[state as usize * 256 + byte as usize];
        if entry.emit_count == EMIT_INVALID {
            return Err(HpackError::InvalidPrefixFullByte);
        }
        let emit = entry.emit_count as usize;
        if emit > 0 {
            if pos + emit > dst.len() {
                return Err(HpackError::BufferTooSmall);
            }
            dst[pos..pos + emit].copy_from_slice(&entry.symbols[..emit]);
            pos += emit;
        }
        state = entry.next_state;
    }

    // the state depth is the exact padding length consumed; feed the
    // missing ones of the padding byte and require them to land on the
    // eight-ones state without emitting
    if state != 0 {
        let depth = STATE_DEPTH[state as usize];
        if !(1..=7).contains(&depth) {
            return Err(HpackError::InvalidEosPaddingFullByte);
        }
        let mut s = state;
        for _ in depth..8 {
            let step = BIT_FSM[s as usize][1];
            if step.emit_count != 0 {
                return Err(HpackError::InvalidEosPaddingFullByte);
            }
            s = step.next_state;
        }
        if s != EOS_PAD_STATE {
            return Err(HpackError::InvalidEosPaddingFullByte);
        }
    }
    Ok(pos)
}

// Feeds up to seven synthetic `1` bits through the bit FSM; the padding
// is valid iff some feed lands on an accepting state without emitting.
fn terminal_is_valid(state: u16) -> bool {
    let mut s = state;
    for _ in 0..=7 {
        if is_accepting(s) {
            return true;
        }
        let step = BIT_FSM[s as usize][1];
        if step.emit_count != 0 {
            return false;
        }
        s = step.next_state;
    }
    false
}
