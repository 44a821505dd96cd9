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

use std::sync::Arc;
use std::thread;

use ylong_hpack::{DynamicTable, EntryType};

fn insert(table: &DynamicTable, name: &str, value: &str) -> Option<Arc<ylong_hpack::TableEntry>> {
    table.insert(
        name.as_bytes(),
        value.as_bytes(),
        String::from(name),
        String::from(value),
        EntryType::LiteralWithIndexing,
    )
}

/// SDV test cases for byte accounting and index assignment.
///
/// # Brief
/// 1. Replays the two-entry scenario: `(":method", "GET")` then
///    `(":path", "/index.html")` in a 64-byte table.
/// 2. Checks `bytes_used`, and that the newest entry is index 62 with the
///    older one shifted to 63.
#[test]
fn sdv_dynamic_table_accounting_and_indices() {
    let table = DynamicTable::new(64);
    let method = insert(&table, ":method", "GET").unwrap();
    let path = insert(&table, ":path", "/index.html").unwrap();

    assert_eq!(table.bytes_used(), 23);
    assert_eq!(table.index_of(&path), Some(62));
    assert_eq!(table.index_of(&method), Some(63));

    // a third insert shifts both again
    let status = insert(&table, ":status", "200").unwrap();
    assert_eq!(table.index_of(&status), Some(62));
    assert_eq!(table.index_of(&path), Some(63));
    assert_eq!(table.index_of(&method), Some(64));
    assert_eq!(table.find_by_index(64).unwrap().raw_name(), b":method");
}

/// SDV test cases for the size-bound invariant across operation mixes.
///
/// # Brief
/// 1. Runs inserts, bound changes and clears over a small table.
/// 2. Checks `bytes_used` equals the live-entry sum and never exceeds the
///    bound.
#[test]
fn sdv_dynamic_table_bound_invariant() {
    let table = DynamicTable::new(48);
    let mut live: Vec<(String, String)> = Vec::new();

    for i in 0..32 {
        let name = format!("name-{i}");
        let value = format!("value-{i}");
        insert(&table, &name, &value).unwrap();
        live.push((name, value));

        // mirror FIFO eviction in the model
        let mut used: usize = live.iter().map(|(n, v)| n.len() + v.len()).sum();
        while used > 48 {
            let (n, v) = live.remove(0);
            used -= n.len() + v.len();
        }
        assert_eq!(table.bytes_used(), used);
        assert!(table.bytes_used() <= 48);
        assert_eq!(table.entry_count(), live.len());
    }

    table.set_max_bytes(13);
    assert!(table.bytes_used() <= 13);
    table.clear();
    assert_eq!(table.bytes_used(), 0);
}

/// SDV test cases for concurrent find and insert.
///
/// # Brief
/// 1. Shares one table across writer and reader threads.
/// 2. Checks every observed entry is fully written and the final state is
///    consistent.
#[test]
fn sdv_dynamic_table_concurrent() {
    let table = Arc::new(DynamicTable::new(1 << 16));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..200 {
                    let name = format!("key-{t}-{i}");
                    let value = format!("val-{t}-{i}");
                    insert(&table, &name, &value).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..200 {
                    let name = format!("key-{t}-{i}");
                    if let Some(entry) = table.find(name.as_bytes()) {
                        // an observed entry is fully written
                        assert_eq!(entry.raw_name(), name.as_bytes());
                        assert_eq!(entry.raw_value(), format!("val-{t}-{i}").as_bytes());
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let stats = table.snapshot_stats();
    assert_eq!(stats.total_encoded_headers, 800);
    for t in 0..4 {
        for i in 0..200 {
            let entry = table.find(format!("key-{t}-{i}").as_bytes()).unwrap();
            assert_eq!(entry.decoded_value(), format!("val-{t}-{i}"));
        }
    }
}

/// SDV test cases for handle lifetime across arena growth.
///
/// # Brief
/// 1. Keeps handles while the table churns far past its original arena
///    reservation.
/// 2. Checks the held byte views never change.
#[test]
fn sdv_dynamic_table_handles_across_churn() {
    let table = DynamicTable::new(256);
    let first = insert(&table, "pinned-name", "pinned-value").unwrap();

    for i in 0..1000 {
        insert(&table, &format!("churn-{i}"), "xxxxxxxxxxxxxxxx").unwrap();
    }

    assert!(table.find(b"pinned-name").is_none());
    assert_eq!(first.raw_name(), b"pinned-name");
    assert_eq!(first.raw_value(), b"pinned-value");
    assert!(table.bytes_used() <= 256);
}
