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

#![allow(dead_code)]
#![allow(unused_imports)]

//! `ylong_hpack` provides the wire-level building blocks of [HPACK], the
//! header compression format of the HTTP/2 protocol. You can use these
//! components to build an HTTP/2 header-block encoder or decoder.
//!
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! # Components
//! - [`huffman`]: Huffman codec driven by precomputed finite-state-machine
//!   tables, with strict end-of-stream padding validation.
//! - [`integer`]: N-bit prefix integer codec.
//! - [`table`]: the 61-entry static table and the bounded, concurrent
//!   dynamic table.
//! - [`util`]: the raw byte buffer and bit packer the codecs build on.
//! - [`tracer`]: optional diagnostic hook invoked on non-fatal error paths.
//!
//! The codecs are octet-transparent: decoded bytes are returned as-is and
//! are never interpreted as text.

pub mod error;
pub mod huffman;
pub mod integer;
pub mod table;
pub mod tracer;
pub mod util;

mod header;
mod stats;

pub use error::HpackError;
pub use header::Header;
pub use stats::HpackStats;
pub use table::{DynamicTable, EntryType, StaticTable, TableEntry, TableIndex};
