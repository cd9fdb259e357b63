// Copyright (C) 2019-2026 The Verus Bridge Team.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

/// A stable 160-bit identifier derived from `(name, parent_id)`.
///
/// `primitive-types` does not ship a 160-bit integer, so this is a plain
/// 20-byte newtype with manual trait impls rather than pulling in a generic
/// fixed-width-integer crate for one extra width.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct CurrencyId(pub [u8; 20]);

impl CurrencyId {
    pub const ZERO: CurrencyId = CurrencyId([0u8; 20]);

    /// The reserved "all bits set" sentinel used to close out the last
    /// bucket of a bucketing pass.
    pub const SENTINEL: CurrencyId = CurrencyId([0xffu8; 20]);

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 20 {
            return None;
        }
        let mut id = [0u8; 20];
        id.copy_from_slice(bytes);
        Some(CurrencyId(id))
    }
}

impl fmt::Debug for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyId({})", hex::encode(self.0))
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
