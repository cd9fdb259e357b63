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

use crate::currency::CurrencyDefinition;
use crate::target::CompactTarget;

/// Where to reach a child/notary daemon's JSON-RPC interface.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RpcEndpoint {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl RpcEndpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// A child chain's current block-under-construction, mutable in place by
/// later `AddMergedBlock` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTemplate {
    /// The child's native sub-header: the merge-mining commitment embedded
    /// into the notary's proposed header.
    pub native_sub_header: Vec<u8>,
    /// The target this template is currently mined against.
    pub bits: CompactTarget,
    /// The template's declared time, used by the prune cutoff.
    pub time: u64,
    /// Full serialized block (sans final header), reconstructed on
    /// dispatch by overwriting its header portion.
    pub raw_block: Vec<u8>,
}

/// A merge-mined chain candidate, keyed by `chain_definition.id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeMineCandidate {
    pub chain_definition: CurrencyDefinition,
    pub block_template: BlockTemplate,
    pub rpc_endpoint: RpcEndpoint,
}

impl MergeMineCandidate {
    pub fn chain_id(&self) -> crate::id::CurrencyId {
        self.chain_definition.id
    }
}
