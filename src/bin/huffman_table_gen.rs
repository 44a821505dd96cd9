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

//! Offline generator for the Huffman FSM and encode tables.
//!
//! ```text
//! huffman_table_gen --mode=full   [output_file.rs]
//! huffman_table_gen --mode=nibble [output_file.rs]
//! huffman_table_gen --mode=encode [output_file.rs]
//! ```
//!
//! Emits a deterministic Rust source file carrying a `@generated` marker.
//! Exits with code 0 on success and non-zero on argument or I/O errors.

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use ylong_hpack::huffman::codegen;

enum Mode {
    FullByte,
    Nibble,
    Encode,
}

fn usage(program: &str) {
    eprintln!("Usage: {program} --mode=[full|nibble|encode] [output_file.rs]");
}

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| String::from("huffman_table_gen"));

    let mut mode = None;
    let mut out_path = None;
    for arg in args {
        match arg.as_str() {
            "--mode=full" => mode = Some(Mode::FullByte),
            "--mode=nibble" => mode = Some(Mode::Nibble),
            "--mode=encode" => mode = Some(Mode::Encode),
            other if other.starts_with("--") => {
                eprintln!("unknown option: {other}");
                usage(&program);
                return ExitCode::FAILURE;
            }
            other => out_path = Some(String::from(other)),
        }
    }

    let Some(mode) = mode else {
        usage(&program);
        return ExitCode::FAILURE;
    };

    let out_path = out_path.unwrap_or_else(|| {
        String::from(match mode {
            Mode::FullByte => "huffman_table_full.rs",
            Mode::Nibble => "huffman_table_nibble.rs",
            Mode::Encode => "huffman_table_encode.rs",
        })
    });

    let file = match File::create(&out_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("cannot open {out_path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut out = BufWriter::new(file);

    let result = match mode {
        Mode::FullByte => codegen::write_full_byte_fsm(&mut out),
        Mode::Nibble => codegen::write_nibble_fsm(&mut out),
        Mode::Encode => codegen::write_encode_table(&mut out),
    };
    if let Err(e) = result {
        eprintln!("write to {out_path} failed: {e}");
        return ExitCode::FAILURE;
    }

    println!("generated Huffman tables to {out_path}");
    ExitCode::SUCCESS
}
