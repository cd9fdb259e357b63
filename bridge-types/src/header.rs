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

use crate::id::CurrencyId;

/// A notary block header under construction. PBaaS sub-headers are the
/// per-child merge-mining commitments embedded into it; everything
/// else about the header (previous hash, timestamp, nonce, …) is opaque to
/// the bridge and carried as `raw_fields` since proof-of-work and
/// consensus are out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedNotaryHeader {
    pub sub_headers: BTreeMap<CurrencyId, Vec<u8>>,
    pub raw_fields: Vec<u8>,
}

impl ProposedNotaryHeader {
    pub fn committed_chain_ids(&self) -> impl Iterator<Item = &CurrencyId> {
        self.sub_headers.keys()
    }
}
