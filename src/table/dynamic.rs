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

//! The [`Dynamic Table`][dynamic_table] implementation of [HPACK].
//!
//! [dynamic_table]: https://httpwg.org/specs/rfc7541.html#dynamic.table
//! [HPACK]: https://httpwg.org/specs/rfc7541.html
//!
//! # Introduction
//! The dynamic table consists of a list of header fields maintained in
//! first-in, first-out order. The first and newest entry is at the lowest
//! index (62, right past the static table), and the oldest entry is at
//! the highest index. The table is strictly size-bounded: inserting
//! evicts entries from the oldest end until the new entry fits.
//!
//! The table may contain duplicate entries (same name and same value);
//! duplicates are not an error.
//!
//! # Storage and handles
//! Raw name and value bytes live in an append-only arena. Every insert
//! freezes its spans, so the handles returned by lookups keep their byte
//! views valid even after the entry is evicted or the arena grows. All
//! public operations take an internal lock for the duration of a single
//! call; handle access needs no lock.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use bytes::{Bytes, BytesMut};

use crate::error::HpackError;
use crate::stats::HpackStats;
use crate::table::static_table::STATIC_TABLE_SIZE;
use crate::table::EntryType;
use crate::tracer::{trace_error, ErrorCallback};

/// One dynamic-table entry: wire-exact bytes plus the decoded form.
/// Handles are reference-counted; the raw byte views stay valid for the
/// lifetime of the handle, eviction notwithstanding.
#[derive(Debug)]
pub struct TableEntry {
    raw_name: Bytes,
    raw_value: Bytes,
    decoded_name: String,
    decoded_value: String,
    entry_type: EntryType,
    seq: u64,
}

impl TableEntry {
    /// The name bytes exactly as they appeared on the wire.
    pub fn raw_name(&self) -> &[u8] {
        &self.raw_name
    }

    /// The value bytes exactly as they appeared on the wire.
    pub fn raw_value(&self) -> &[u8] {
        &self.raw_value
    }

    /// The decoded (canonical) header name.
    pub fn decoded_name(&self) -> &str {
        &self.decoded_name
    }

    /// The decoded (canonical) header value.
    pub fn decoded_value(&self) -> &str {
        &self.decoded_value
    }

    /// How this header was represented on the wire.
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// The bytes this entry accounts for against the table bound.
    pub fn size(&self) -> usize {
        self.raw_name.len() + self.raw_value.len()
    }
}

struct Inner {
    arena: BytesMut,
    map: HashMap<Bytes, Arc<TableEntry>>,
    queue: VecDeque<Arc<TableEntry>>,
    max_bytes: usize,
    current_bytes: usize,
    next_seq: u64,
    stats: HpackStats,
    tracer: Option<ErrorCallback>,
}

impl Inner {
    fn evict_if_needed(&mut self, need: usize) {
        while self.current_bytes + need > self.max_bytes && !self.queue.is_empty() {
            self.evict_one();
        }
    }

    fn evict_one(&mut self) {
        let Some(entry) = self.queue.pop_front() else {
            return;
        };
        let size = entry.size();
        // a newer insert with the same name owns the binding now; only
        // remove the key when it still points at the evicted entry
        let stale = self
            .map
            .get(entry.raw_name())
            .is_some_and(|bound| Arc::ptr_eq(bound, &entry));
        if stale {
            self.map.remove(entry.raw_name());
        }
        self.current_bytes -= size;
        self.stats.evictions += 1;
        tracing::trace!(size, seq = entry.seq, "dynamic table eviction");
    }

    fn newest_seq(&self) -> u64 {
        self.next_seq - 1
    }

    fn display_index(&self, seq: u64) -> usize {
        STATIC_TABLE_SIZE + (self.newest_seq() - seq + 1) as usize
    }
}

/// The bounded, shared-mutable dynamic header table.
///
/// All operations are synchronous and run to completion under an
/// internal lock, so a table can be shared across threads behind an
/// `Arc`. Insertions take effect in program order; a lookup observing an
/// entry observes all of its bytes.
pub struct DynamicTable {
    inner: Mutex<Inner>,
}

impl DynamicTable {
    /// Creates a table bounded to `max_bytes`. The arena is reserved up
    /// front so inserts within the bound do not reallocate.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                arena: BytesMut::with_capacity(max_bytes),
                map: HashMap::new(),
                queue: VecDeque::new(),
                max_bytes,
                current_bytes: 0,
                next_seq: 1,
                stats: HpackStats::default(),
                tracer: None,
            }),
        }
    }

    /// Installs a per-instance error callback, overriding the
    /// process-wide hook for this table. `None` restores the default.
    pub fn set_tracer(&self, tracer: Option<ErrorCallback>) {
        self.inner.lock().unwrap().tracer = tracer;
    }

    /// Looks an entry up by its raw name bytes. Counts a cache hit or
    /// miss.
    pub fn find(&self, name: &[u8]) -> Option<Arc<TableEntry>> {
        let mut inner = self.inner.lock().unwrap();
        match inner.map.get(name).cloned() {
            Some(entry) => {
                inner.stats.cache_hits += 1;
                Some(entry)
            }
            None => {
                inner.stats.cache_misses += 1;
                None
            }
        }
    }

    /// Looks an entry up by its absolute HPACK index (static table
    /// offset included; the newest entry is 62). Counts a cache hit or
    /// miss, and a decoded header on a hit.
    pub fn find_by_index(&self, index: usize) -> Option<Arc<TableEntry>> {
        let mut inner = self.inner.lock().unwrap();
        let found = inner
            .queue
            .iter()
            .find(|e| inner.display_index(e.seq) == index)
            .cloned();
        match found {
            Some(entry) => {
                inner.stats.cache_hits += 1;
                inner.stats.total_decoded_headers += 1;
                Some(entry)
            }
            None => {
                inner.stats.cache_misses += 1;
                None
            }
        }
    }

    /// Inserts a new entry, evicting the oldest entries until it fits.
    ///
    /// An entry larger than the whole table empties it and is not
    /// inserted, per RFC 7541 section 4.4; `None` is returned and the
    /// error is traced.
    pub fn insert(
        &self,
        name: &[u8],
        value: &[u8],
        decoded_name: String,
        decoded_value: String,
        entry_type: EntryType,
    ) -> Option<Arc<TableEntry>> {
        let mut inner = self.inner.lock().unwrap();
        let need = name.len() + value.len();
        inner.evict_if_needed(need);
        if inner.current_bytes + need > inner.max_bytes {
            inner.stats.error_count += 1;
            trace_error(
                inner.tracer.as_ref(),
                0,
                HpackError::BufferTooSmall.code(),
                "dynamic table insert exceeds the table bound",
            );
            return None;
        }

        inner.arena.extend_from_slice(name);
        let raw_name = inner.arena.split().freeze();
        inner.arena.extend_from_slice(value);
        let raw_value = inner.arena.split().freeze();

        let seq = inner.next_seq;
        inner.next_seq += 1;
        let entry = Arc::new(TableEntry {
            raw_name: raw_name.clone(),
            raw_value,
            decoded_name,
            decoded_value,
            entry_type,
            seq,
        });

        inner.queue.push_back(entry.clone());
        inner.map.insert(raw_name, entry.clone());
        inner.current_bytes += need;
        inner.stats.total_encoded_headers += 1;
        inner.stats.total_bytes_processed += need as u64;
        Some(entry)
    }

    /// Updates the size bound and evicts down to it. `set_max_bytes(0)`
    /// evicts everything.
    pub fn set_max_bytes(&self, new_max: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.max_bytes = new_max;
        inner.evict_if_needed(0);
    }

    /// Returns the bytes currently accounted against the bound.
    pub fn bytes_used(&self) -> usize {
        self.inner.lock().unwrap().current_bytes
    }

    /// Returns the current size bound.
    pub fn max_bytes(&self) -> usize {
        self.inner.lock().unwrap().max_bytes
    }

    /// Returns the number of live entries.
    pub fn entry_count(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Returns the absolute HPACK index of a live entry, or `None` once
    /// it has been evicted. The newest entry is 62; every insertion
    /// shifts older entries one index up.
    pub fn index_of(&self, entry: &TableEntry) -> Option<usize> {
        let inner = self.inner.lock().unwrap();
        let oldest = inner.queue.front()?.seq;
        if entry.seq < oldest || entry.seq > inner.newest_seq() {
            return None;
        }
        Some(inner.display_index(entry.seq))
    }

    /// Removes all entries, releases the arena and resets statistics.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        let max_bytes = inner.max_bytes;
        inner.map.clear();
        inner.queue.clear();
        inner.arena = BytesMut::with_capacity(max_bytes);
        inner.current_bytes = 0;
        inner.next_seq = 1;
        inner.stats = HpackStats::default();
    }

    /// Returns a snapshot of the statistics, consistent with the
    /// operations completed before this call.
    pub fn snapshot_stats(&self) -> HpackStats {
        self.inner.lock().unwrap().stats
    }
}

#[cfg(test)]
mod ut_dynamic_table {
    use super::*;

    fn insert(table: &DynamicTable, name: &str, value: &str) -> Option<Arc<TableEntry>> {
        table.insert(
            name.as_bytes(),
            value.as_bytes(),
            String::from(name),
            String::from(value),
            EntryType::LiteralWithIndexing,
        )
    }

    /// UT test cases for `DynamicTable::new`.
    ///
    /// # Brief
    /// 1. Creates a table with a size bound.
    /// 2. Checks the empty-state invariants.
    #[test]
    fn ut_dynamic_table_new() {
        let table = DynamicTable::new(4096);
        assert_eq!(table.bytes_used(), 0);
        assert_eq!(table.max_bytes(), 4096);
        assert_eq!(table.entry_count(), 0);
        assert!(table.find(b"nothing").is_none());
        assert!(table.find_by_index(62).is_none());
    }

    /// UT test cases for `DynamicTable::insert` and `find`.
    ///
    /// # Brief
    /// 1. Inserts entries and looks them up by name and by index.
    /// 2. Checks byte accounting and index ordering: the newest entry is
    ///    62 and older entries shift up.
    #[test]
    fn ut_dynamic_table_insert_find() {
        let table = DynamicTable::new(64);
        let method = insert(&table, ":method", "GET").unwrap();
        assert_eq!(table.bytes_used(), 7);
        assert_eq!(table.index_of(&method), Some(62));

        let path = insert(&table, ":path", "/index.html").unwrap();
        assert_eq!(table.bytes_used(), 23);
        assert_eq!(table.index_of(&path), Some(62));
        assert_eq!(table.index_of(&method), Some(63));

        let found = table.find(b":method").unwrap();
        assert_eq!(found.raw_value(), b"GET");
        assert_eq!(found.decoded_value(), "GET");
        assert_eq!(found.entry_type(), EntryType::LiteralWithIndexing);

        assert!(Arc::ptr_eq(&table.find_by_index(62).unwrap(), &path));
        assert!(Arc::ptr_eq(&table.find_by_index(63).unwrap(), &method));
        assert!(table.find_by_index(64).is_none());
        assert!(table.find_by_index(61).is_none());
    }

    /// UT test cases for FIFO eviction.
    ///
    /// # Brief
    /// 1. Fills the table past its bound.
    /// 2. Checks the oldest entries leave first and accounting follows.
    #[test]
    fn ut_dynamic_table_eviction_order() {
        let table = DynamicTable::new(20);
        insert(&table, "a", "11111111").unwrap(); // 9 bytes
        insert(&table, "b", "22222222").unwrap(); // 9 bytes
        assert_eq!(table.bytes_used(), 18);

        // 9 more bytes: "a" must go, "b" stays
        insert(&table, "c", "33333333").unwrap();
        assert_eq!(table.bytes_used(), 18);
        assert!(table.find(b"a").is_none());
        assert!(table.find(b"b").is_some());
        assert!(table.find(b"c").is_some());

        let stats = table.snapshot_stats();
        assert_eq!(stats.evictions, 1);
    }

    /// UT test cases for `DynamicTable::set_max_bytes`.
    ///
    /// # Brief
    /// 1. Shrinks the bound below the current usage and to zero.
    /// 2. Checks eviction down to the new bound.
    #[test]
    fn ut_dynamic_table_set_max_bytes() {
        let table = DynamicTable::new(64);
        insert(&table, ":method", "GET").unwrap();
        insert(&table, ":path", "/index.html").unwrap();
        assert_eq!(table.bytes_used(), 23);

        table.set_max_bytes(16);
        assert_eq!(table.bytes_used(), 16);
        assert!(table.find(b":method").is_none());

        table.set_max_bytes(0);
        assert_eq!(table.bytes_used(), 0);
        assert_eq!(table.entry_count(), 0);
    }

    /// UT test cases for oversized inserts.
    ///
    /// # Brief
    /// 1. Installs a per-instance tracer and inserts an entry larger than
    ///    the whole table.
    /// 2. Checks the table is emptied, nothing is inserted, the error is
    ///    counted and the tracer observed it.
    #[test]
    fn ut_dynamic_table_oversized_insert() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let table = DynamicTable::new(16);
        let seen = Arc::new(AtomicU32::new(0));
        let sink = Arc::clone(&seen);
        table.set_tracer(Some(Arc::new(move |_, code, _| {
            sink.store(code, Ordering::SeqCst);
        })));

        insert(&table, "k", "v").unwrap();
        assert!(insert(&table, "name", "value-that-is-way-too-long").is_none());
        assert_eq!(table.bytes_used(), 0);
        assert_eq!(table.entry_count(), 0);

        let stats = table.snapshot_stats();
        assert_eq!(stats.error_count, 1);
        assert_eq!(seen.load(Ordering::SeqCst), HpackError::BufferTooSmall.code());
    }

    /// UT test cases for duplicate-name inserts across eviction.
    ///
    /// # Brief
    /// 1. Inserts two entries with the same name, then forces the older
    ///    one out.
    /// 2. Checks the name still resolves to the newer entry.
    #[test]
    fn ut_dynamic_table_duplicate_names() {
        let table = DynamicTable::new(12);
        insert(&table, "k", "11111").unwrap(); // 6 bytes
        let newer = insert(&table, "k", "22222").unwrap();
        assert!(Arc::ptr_eq(&table.find(b"k").unwrap(), &newer));

        // evict the oldest "k"; the binding must survive
        insert(&table, "x", "33333").unwrap();
        assert!(Arc::ptr_eq(&table.find(b"k").unwrap(), &newer));
    }

    /// UT test cases for handle validity across eviction.
    ///
    /// # Brief
    /// 1. Holds a handle, evicts its entry, clears the table.
    /// 2. Checks the handle's byte views stay intact while the index is
    ///    gone.
    #[test]
    fn ut_dynamic_table_handle_outlives_eviction() {
        let table = DynamicTable::new(32);
        let entry = insert(&table, "authorization", "secret-token").unwrap();
        table.set_max_bytes(0);
        assert!(table.find(b"authorization").is_none());
        assert_eq!(table.index_of(&entry), None);
        assert_eq!(entry.raw_name(), b"authorization");
        assert_eq!(entry.raw_value(), b"secret-token");

        table.clear();
        assert_eq!(entry.decoded_value(), "secret-token");
    }

    /// UT test cases for `DynamicTable::clear` and statistics.
    ///
    /// # Brief
    /// 1. Performs a mix of operations and snapshots the counters.
    /// 2. Clears the table and checks counters reset.
    #[test]
    fn ut_dynamic_table_stats() {
        let table = DynamicTable::new(64);
        insert(&table, ":method", "GET").unwrap();
        table.find(b":method");
        table.find(b":missing");
        table.find_by_index(62);

        let stats = table.snapshot_stats();
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.total_encoded_headers, 1);
        assert_eq!(stats.total_decoded_headers, 1);
        assert_eq!(stats.total_bytes_processed, 7);

        table.clear();
        assert_eq!(table.snapshot_stats(), HpackStats::default());
        assert_eq!(table.bytes_used(), 0);
    }
}
