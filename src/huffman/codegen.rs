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

//! Source emission for the `huffman_table_gen` tool.
//!
//! Renders the precomputed Huffman tables as standalone Rust source files
//! so other projects can embed them without running the trie construction
//! themselves. Output is deterministic: the same codebook always renders
//! byte-identical files.

use std::io::{self, Write};

use super::codebook::SYMBOL_COUNT;
use super::fsm::{byte_fsm, ACCEPTING, BIT_FSM, ENCODE_TABLE, FSM_STATES, NIBBLE_FSM, STATE_DEPTH};

fn write_banner(out: &mut dyn Write, mode: &str) -> io::Result<()> {
    writeln!(out, "// @generated by huffman_table_gen --mode={mode}")?;
    writeln!(out, "// DO NOT EDIT THIS FILE DIRECTLY.")?;
    writeln!(
        out,
        "// If this file mismatches the RFC 7541 codebook, Huffman decoding will fail."
    )?;
    writeln!(out)
}

/// Writes the per-symbol encode table: `(bit_length, byte_count, bytes)`
/// with each code left-aligned at the MSB of its byte run.
pub fn write_encode_table(out: &mut dyn Write) -> io::Result<()> {
    write_banner(out, "encode")?;
    writeln!(
        out,
        "pub static ENCODE_TABLE: [(u8, u8, [u8; 5]); {SYMBOL_COUNT}] = ["
    )?;
    for entry in ENCODE_TABLE.iter() {
        let b = entry.bytes;
        writeln!(
            out,
            "    ({}, {}, [{:#04x}, {:#04x}, {:#04x}, {:#04x}, {:#04x}]),",
            entry.bit_length, entry.byte_count, b[0], b[1], b[2], b[3], b[4]
        )?;
    }
    writeln!(out, "];")
}

/// Writes the nibble FSM (`state * 16 + nibble` indexing) plus the
/// terminal-validation auxiliaries.
pub fn write_nibble_fsm(out: &mut dyn Write) -> io::Result<()> {
    write_banner(out, "nibble")?;
    writeln!(
        out,
        "// Transition word: error(1) | next_state(9) | emit_count(2) |"
    )?;
    writeln!(out, "// symbol0(8) | symbol1(8) | reserved(4)")?;
    writeln!(
        out,
        "pub static NIBBLE_FSM: [u32; {}] = [",
        FSM_STATES * 16
    )?;
    for row in NIBBLE_FSM.chunks(8) {
        let words: Vec<String> = row.iter().map(|w| format!("{w:#010x}")).collect();
        writeln!(out, "    {},", words.join(", "))?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    write_terminal_tables(out)
}

/// Writes the full-byte FSM (`state * 256 + byte` indexing) plus the
/// terminal-validation auxiliaries.
pub fn write_full_byte_fsm(out: &mut dyn Write) -> io::Result<()> {
    write_banner(out, "full")?;
    writeln!(
        out,
        "// (next_state, emit_count, symbols); emit_count 0xff marks an"
    )?;
    writeln!(out, "// invalid transition")?;
    writeln!(
        out,
        "pub static BYTE_FSM: [(u16, u8, [u8; 2]); {}] = [",
        FSM_STATES * 256
    )?;
    for entry in byte_fsm() {
        writeln!(
            out,
            "    ({}, {:#04x}, [{}, {}]),",
            entry.next_state, entry.emit_count, entry.symbols[0], entry.symbols[1]
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    write_terminal_tables(out)
}

// Bit FSM, accepting bitset and state depths, shared by both FSM modes.
fn write_terminal_tables(out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "// Single-bit transitions: (next_state, emit_count) on bits 0 and 1."
    )?;
    writeln!(
        out,
        "pub static BIT_FSM: [[(u16, u8); 2]; {FSM_STATES}] = ["
    )?;
    for row in BIT_FSM.iter() {
        writeln!(
            out,
            "    [({}, {:#04x}), ({}, {:#04x})],",
            row[0].next_state, row[0].emit_count, row[1].next_state, row[1].emit_count
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "// Valid terminal states of a Huffman stream.")?;
    writeln!(out, "pub static ACCEPTING: [u64; {}] = [", ACCEPTING.len())?;
    for word in ACCEPTING.iter() {
        writeln!(out, "    {word:#018x},")?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "// Bits consumed since the last emitted symbol.")?;
    writeln!(out, "pub static STATE_DEPTH: [u8; {FSM_STATES}] = [")?;
    for row in STATE_DEPTH.chunks(16) {
        let cells: Vec<String> = row.iter().map(|d| d.to_string()).collect();
        writeln!(out, "    {},", cells.join(", "))?;
    }
    writeln!(out, "];")
}

#[cfg(test)]
mod ut_codegen {
    use super::*;

    /// UT test cases for the generated-source banners.
    ///
    /// # Brief
    /// 1. Renders each mode into memory.
    /// 2. Checks the `@generated` marker and the emitted array headers.
    #[test]
    fn ut_codegen_banner() {
        let mut nibble = Vec::new();
        write_nibble_fsm(&mut nibble).unwrap();
        let text = String::from_utf8(nibble).unwrap();
        assert!(text.starts_with("// @generated by huffman_table_gen --mode=nibble"));
        assert!(text.contains("DO NOT EDIT"));
        assert!(text.contains("pub static NIBBLE_FSM: [u32; 4096]"));
        assert!(text.contains("pub static ACCEPTING"));

        let mut encode = Vec::new();
        write_encode_table(&mut encode).unwrap();
        let text = String::from_utf8(encode).unwrap();
        assert!(text.contains("pub static ENCODE_TABLE: [(u8, u8, [u8; 5]); 257]"));
    }

    /// UT test cases for output determinism.
    ///
    /// # Brief
    /// 1. Renders the nibble tables twice.
    /// 2. Checks the outputs are byte-identical.
    #[test]
    fn ut_codegen_deterministic() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_nibble_fsm(&mut first).unwrap();
        write_nibble_fsm(&mut second).unwrap();
        assert_eq!(first, second);
    }
}
