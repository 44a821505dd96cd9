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

//! [`Static Table`][static_table] and [`Dynamic Table`][dynamic_table]
//! implementations of [HPACK].
//!
//! [static_table]: https://httpwg.org/specs/rfc7541.html#static.table
//! [dynamic_table]: https://httpwg.org/specs/rfc7541.html#dynamic.table
//! [HPACK]: https://httpwg.org/specs/rfc7541.html

mod dynamic;
mod static_table;

pub use dynamic::{DynamicTable, TableEntry};
pub use static_table::{StaticTable, TableIndex, STATIC_TABLE_SIZE};

/// Identifies the form of an HPACK header field or instruction. Used for
/// tracing, metrics and diagnostics to distinguish how each header was
/// represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// A fully indexed header field (static or dynamic table lookup),
    /// RFC 7541 section 6.1.
    Indexed = 0,

    /// Literal header with incremental indexing (inserted into the
    /// dynamic table), RFC 7541 section 6.2.1.
    LiteralWithIndexing = 1,

    /// Literal header without indexing, RFC 7541 section 6.2.2.
    LiteralWithoutIndexing = 2,

    /// Literal header that must never be indexed (sensitive values),
    /// RFC 7541 section 6.2.3.
    LiteralNeverIndexed = 3,

    /// Dynamic table size update instruction, RFC 7541 section 6.3.
    SizeUpdate = 4,
}
