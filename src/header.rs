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

//! Borrowed header field representation.

/// An HTTP header name/value pair as borrowed byte slices. Both components
/// are views into backing storage: the static table constants, a dynamic
/// table entry, or user-supplied bytes. Equality and hashing are byte-wise
/// on both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header<'a> {
    /// The header field name (e.g. `:method`, `content-type`).
    pub name: &'a [u8],

    /// The header field value (e.g. `GET`, `application/json`).
    pub value: &'a [u8],
}

impl<'a> Header<'a> {
    /// Creates a `Header` from name and value slices.
    pub const fn new(name: &'a [u8], value: &'a [u8]) -> Self {
        Self { name, value }
    }

    /// Returns the combined length of name and value in bytes.
    pub fn len(&self) -> usize {
        self.name.len() + self.value.len()
    }

    /// Returns `true` if both name and value are empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}
