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

//! Cumulative statistics of a dynamic-table instance.

/// Cumulative counters of an HPACK dynamic table. Obtained as a snapshot
/// via [`DynamicTable::snapshot_stats`]; counters only grow, except that
/// [`DynamicTable::clear`] resets them alongside the rest of the table
/// state.
///
/// [`DynamicTable::snapshot_stats`]: crate::DynamicTable::snapshot_stats
/// [`DynamicTable::clear`]: crate::DynamicTable::clear
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HpackStats {
    /// Successful dynamic-table lookups.
    pub cache_hits: u64,

    /// Failed dynamic-table lookups.
    pub cache_misses: u64,

    /// Entries evicted from the dynamic table due to size limits.
    pub evictions: u64,

    /// Errors encountered by table operations.
    pub error_count: u64,

    /// Header fields inserted into the table.
    pub total_encoded_headers: u64,

    /// Header fields resolved by index lookups.
    pub total_decoded_headers: u64,

    /// Total name and value bytes accepted by insertions.
    pub total_bytes_processed: u64,
}
