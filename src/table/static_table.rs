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

//! The [`Static Table`][static_table] of [HPACK].
//!
//! [static_table]: https://httpwg.org/specs/rfc7541.html#static.table
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! A predefined, ordered list of 61 common header fields. Indices are
//! 1-based; dynamic-table indices start right after it, at 62.

use crate::header::Header;

/// Number of entries in the static table.
pub const STATIC_TABLE_SIZE: usize = 61;

/// Outcome of a table search: a full `(name, value)` match or a
/// name-only match, each carrying the 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableIndex {
    /// Name and value both matched.
    Field(usize),
    /// Only the name matched.
    Name(usize),
}

// index = position + 1
const ENTRIES: [(&[u8], &[u8]); STATIC_TABLE_SIZE] = [
    (b":authority", b""),
    (b":method", b"GET"),
    (b":method", b"POST"),
    (b":path", b"/"),
    (b":path", b"/index.html"),
    (b":scheme", b"http"),
    (b":scheme", b"https"),
    (b":status", b"200"),
    (b":status", b"204"),
    (b":status", b"206"),
    (b":status", b"304"),
    (b":status", b"400"),
    (b":status", b"404"),
    (b":status", b"500"),
    (b"accept-charset", b""),
    (b"accept-encoding", b"gzip, deflate"),
    (b"accept-language", b""),
    (b"accept-ranges", b""),
    (b"accept", b""),
    (b"access-control-allow-origin", b""),
    (b"age", b""),
    (b"allow", b""),
    (b"authorization", b""),
    (b"cache-control", b""),
    (b"content-disposition", b""),
    (b"content-encoding", b""),
    (b"content-language", b""),
    (b"content-length", b""),
    (b"content-location", b""),
    (b"content-range", b""),
    (b"content-type", b""),
    (b"cookie", b""),
    (b"date", b""),
    (b"etag", b""),
    (b"expect", b""),
    (b"expires", b""),
    (b"from", b""),
    (b"host", b""),
    (b"if-match", b""),
    (b"if-modified-since", b""),
    (b"if-none-match", b""),
    (b"if-range", b""),
    (b"if-unmodified-since", b""),
    (b"last-modified", b""),
    (b"link", b""),
    (b"location", b""),
    (b"max-forwards", b""),
    (b"proxy-authenticate", b""),
    (b"proxy-authorization", b""),
    (b"range", b""),
    (b"referer", b""),
    (b"refresh", b""),
    (b"retry-after", b""),
    (b"server", b""),
    (b"set-cookie", b""),
    (b"strict-transport-security", b""),
    (b"transfer-encoding", b""),
    (b"user-agent", b""),
    (b"vary", b""),
    (b"via", b""),
    (b"www-authenticate", b""),
];

/// The 61-entry constant lookup table.
pub struct StaticTable;

impl StaticTable {
    /// Gets the header at the given 1-based index, `index ∈ [1, 61]`.
    pub fn header(index: usize) -> Option<Header<'static>> {
        if (1..=STATIC_TABLE_SIZE).contains(&index) {
            let (name, value) = ENTRIES[index - 1];
            Some(Header::new(name, value))
        } else {
            None
        }
    }

    /// Searches the table for `(name, value)`. A full match wins; with a
    /// non-matching or empty value, the first entry with the same name is
    /// reported as a name-only match.
    pub fn find(name: &[u8], value: &[u8]) -> Option<TableIndex> {
        let mut name_match = None;
        for (pos, (n, v)) in ENTRIES.iter().enumerate() {
            if *n != name {
                continue;
            }
            if !value.is_empty() && *v == value {
                return Some(TableIndex::Field(pos + 1));
            }
            if name_match.is_none() {
                name_match = Some(TableIndex::Name(pos + 1));
            }
        }
        name_match
    }
}
