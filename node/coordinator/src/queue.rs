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

use std::collections::BTreeMap;

use primitive_types::U256;

use bridge_types::ProposedNotaryHeader;

/// Solved headers ordered by hash-as-big-integer, smallest (best proof of
/// work) first. A `BTreeMap` gives that ordering directly and
/// for free, unlike the source's explicit comparator on an `arith_uint256`
/// key.
#[derive(Debug, Default)]
pub struct QualifiedHeaderQueue {
    headers: BTreeMap<U256, ProposedNotaryHeader>,
}

impl QualifiedHeaderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hash: U256, header: ProposedNotaryHeader) {
        self.headers.insert(hash, header);
    }

    /// Removes and returns the best (smallest-hash) header, if any.
    pub fn pop_best(&mut self) -> Option<(U256, ProposedNotaryHeader)> {
        let key = *self.headers.keys().next()?;
        self.headers.remove_entry(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn clear(&mut self) {
        self.headers.clear();
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }
}
