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

//! A growable byte buffer with explicit error reporting.
//!
//! [`RawBuffer`] separates reserved capacity from the initialized size and
//! reports every failure, allocation included, through [`BufferError`]
//! instead of panicking. The reserved region is kept zero-initialized so
//! slices bounded by the capacity are always valid byte storage.

use thiserror::Error;

/// Errors returned by [`RawBuffer`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
    /// A zero length was passed where at least one byte is required.
    #[error("invalid argument")]
    InvalidArgs,

    /// The starting position lies outside the slice boundary.
    #[error("position out of range")]
    OutOfRange,

    /// The requested length overruns the slice boundary.
    #[error("length overruns the buffer")]
    Overrun,

    /// The allocator could not provide the requested capacity.
    #[error("allocation failure")]
    AllocationFailure,
}

impl BufferError {
    /// Returns the subcode half of this error's numeric code.
    pub(crate) fn subcode(&self) -> u16 {
        match self {
            Self::InvalidArgs => 1,
            Self::OutOfRange => 2,
            Self::Overrun => 3,
            Self::AllocationFailure => 4,
        }
    }
}

/// A resizable byte buffer that distinguishes reserved capacity from
/// initialized size.
///
/// `size` counts the bytes handed out through [`append`]; `capacity` is
/// the reserved storage. `size <= capacity` always holds. Moving the
/// buffer transfers ownership and leaves the source empty (Rust move
/// semantics); [`clear`] keeps the capacity, [`reset`] releases it.
///
/// [`append`]: RawBuffer::append
/// [`clear`]: RawBuffer::clear
/// [`reset`]: RawBuffer::reset
#[derive(Debug, Default)]
pub struct RawBuffer {
    // storage.len() is the reserved capacity; everything in it is
    // initialized (zeroed past `size`).
    storage: Vec<u8>,
    size: usize,
}

impl RawBuffer {
    /// Creates an empty buffer with no reserved storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with `capacity` bytes reserved up front.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut buf = Self::new();
        buf.reserve(capacity)?;
        Ok(buf)
    }

    /// Reserves storage for at least `new_cap` bytes. Never shrinks.
    pub fn reserve(&mut self, new_cap: usize) -> Result<(), BufferError> {
        if new_cap <= self.storage.len() {
            return Ok(());
        }
        let additional = new_cap - self.storage.len();
        self.storage
            .try_reserve_exact(additional)
            .map_err(|_| BufferError::AllocationFailure)?;
        self.storage.resize(new_cap, 0);
        Ok(())
    }

    /// Appends `n` bytes and returns the writable span covering them.
    /// Grows by doubling the capacity or to `size + n`, whichever is
    /// larger.
    pub fn append(&mut self, n: usize) -> Result<&mut [u8], BufferError> {
        let end = self.size + n;
        if end > self.storage.len() {
            let new_cap = usize::max(self.storage.len() * 2, end);
            let additional = new_cap - self.storage.len();
            self.storage
                .try_reserve(additional)
                .map_err(|_| BufferError::AllocationFailure)?;
            self.storage.resize(new_cap, 0);
        }
        let start = self.size;
        self.size = end;
        Ok(&mut self.storage[start..end])
    }

    /// Returns the initialized bytes.
    pub fn data(&self) -> &[u8] {
        &self.storage[..self.size]
    }

    /// Returns the initialized bytes mutably.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.storage[..self.size]
    }

    /// Returns the number of initialized bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the reserved capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no bytes are initialized.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Shortens the initialized region to `new_size`; no-op when the
    /// buffer is already shorter. Capacity is unchanged.
    pub fn truncate(&mut self, new_size: usize) {
        if new_size < self.size {
            self.storage[new_size..self.size].fill(0);
            self.size = new_size;
        }
    }

    /// Clears the contents but keeps the reserved capacity.
    pub fn clear(&mut self) {
        self.storage[..self.size].fill(0);
        self.size = 0;
    }

    /// Releases all storage.
    pub fn reset(&mut self) {
        self.storage = Vec::new();
        self.size = 0;
    }

    /// Returns a single contiguous span of `len` bytes starting at `pos`.
    ///
    /// The boundary is `size()` by default, or `capacity()` when
    /// `end_on_capacity` is set. A `(0, 0)` request on an empty boundary
    /// yields an empty span; any other request must satisfy `len > 0`,
    /// `pos < boundary` and `len <= boundary - pos`.
    pub fn slice(
        &self,
        len: usize,
        pos: usize,
        end_on_capacity: bool,
    ) -> Result<&[u8], BufferError> {
        let limit = if end_on_capacity {
            self.storage.len()
        } else {
            self.size
        };
        if limit == 0 {
            return if len == 0 && pos == 0 {
                Ok(&[])
            } else {
                Err(BufferError::OutOfRange)
            };
        }
        if len == 0 {
            return Err(BufferError::InvalidArgs);
        }
        if pos >= limit {
            return Err(BufferError::OutOfRange);
        }
        if len > limit - pos {
            return Err(BufferError::Overrun);
        }
        Ok(&self.storage[pos..pos + len])
    }

    /// Splits `[0, boundary)` into ordered spans of at most `chunk` bytes,
    /// where the boundary is `size()` or, when `end_on_capacity` is set,
    /// `capacity()`.
    pub fn slices(
        &self,
        chunk: usize,
        end_on_capacity: bool,
    ) -> Result<Vec<&[u8]>, BufferError> {
        if chunk == 0 {
            return Err(BufferError::InvalidArgs);
        }
        let limit = if end_on_capacity {
            self.storage.len()
        } else {
            self.size
        };
        Ok(self.storage[..limit].chunks(chunk).collect())
    }
}
