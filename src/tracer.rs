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

//! Diagnostic hook invoked on non-fatal error paths.
//!
//! Library users can register a callback to observe every traced error.
//! The callback receives the HTTP/2 stream identifier (0 when no stream is
//! involved), the 32-bit numeric error code and a human-readable message.
//! Registration is process-wide; [`DynamicTable`] additionally accepts a
//! per-instance override.
//!
//! [`DynamicTable`]: crate::DynamicTable

use std::sync::{Arc, RwLock};

/// Signature of the error callback hook.
pub type ErrorCallback = Arc<dyn Fn(u32, u32, &str) + Send + Sync>;

static ERROR_CALLBACK: RwLock<Option<ErrorCallback>> = RwLock::new(None);

/// Composes a 32-bit error code from a domain (high 16 bits) and a
/// subcode (low 16 bits).
pub const fn make_error(domain: u16, subcode: u16) -> u32 {
    ((domain as u32) << 16) | subcode as u32
}

/// Registers the process-wide error callback. Passing `None` clears the
/// hook. Registration is thread-safe; the hook is read on every traced
/// error and written rarely.
pub fn set_error_callback(cb: Option<ErrorCallback>) {
    *ERROR_CALLBACK.write().unwrap() = cb;
}

/// Returns the current process-wide error callback, if any.
pub fn error_callback() -> Option<ErrorCallback> {
    ERROR_CALLBACK.read().unwrap().clone()
}

/// Reports an error to the registered hook and to the `tracing`
/// subscriber. `local` takes precedence over the process-wide hook.
pub(crate) fn trace_error(local: Option<&ErrorCallback>, stream_id: u32, code: u32, message: &str) {
    tracing::debug!(stream_id, code, message, "hpack error");
    if let Some(cb) = local {
        cb(stream_id, code, message);
        return;
    }
    if let Some(cb) = error_callback() {
        cb(stream_id, code, message);
    }
}

#[cfg(test)]
mod ut_tracer {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    /// UT test cases for `make_error`.
    ///
    /// # Brief
    /// 1. Composes codes from domain and subcode pairs.
    /// 2. Checks both halves of the result.
    #[test]
    fn ut_make_error() {
        assert_eq!(make_error(0x0001, 5), 0x0001_0005);
        assert_eq!(make_error(0xffff, 0xffff), 0xffff_ffff);
        assert_eq!(make_error(0, 0), 0);
    }

    /// UT test cases for callback registration.
    ///
    /// # Brief
    /// 1. Registers a callback and traces an error.
    /// 2. Checks that the callback observed the code.
    /// 3. Clears the hook and checks nothing more is observed.
    #[test]
    fn ut_error_callback_roundtrip() {
        static SEEN: AtomicU32 = AtomicU32::new(0);
        // other tests trace with stream id 0; only record our own stream
        set_error_callback(Some(Arc::new(|stream_id, code, _| {
            if stream_id == 7 {
                SEEN.store(code, Ordering::SeqCst);
            }
        })));
        trace_error(None, 7, make_error(0x0001, 9), "test");
        assert_eq!(SEEN.load(Ordering::SeqCst), 0x0001_0009);

        set_error_callback(None);
        SEEN.store(0, Ordering::SeqCst);
        trace_error(None, 7, make_error(0x0001, 9), "test");
        assert_eq!(SEEN.load(Ordering::SeqCst), 0);
    }
}
