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

use bridge_node_rpc::NotaryLiveness;
use bridge_types::{CurrencyDefinition, CurrencyId};

use crate::queue::QualifiedHeaderQueue;
use crate::registry::MergeMineRegistry;

/// The single latest block this chain has won, pending notarization to the
/// notary chain.
#[derive(Debug, Clone)]
pub struct EarnedNotarization {
    pub block_hash: [u8; 32],
    pub tx_index: u32,
    pub height: u64,
}

/// One destination for a portion of a mining reward (the "latest mining
/// payout outputs"): a positional output index and an opaque payout
/// script, mirroring the source's `vector<pair<int, CScript>>`.
#[derive(Debug, Clone)]
pub struct MiningOutput {
    pub position: i32,
    pub script: Vec<u8>,
}

/// Everything guarded by the single `cs_mergemining` lock: the
/// merge-mine registry, the qualified-header queue, the earned-
/// notarization slot, latest mining payout outputs, and notary liveness.
#[derive(Debug, Default)]
pub struct MergeMiningState {
    pub registry: MergeMineRegistry,
    pub queue: QualifiedHeaderQueue,
    pub earned_notarization: Option<EarnedNotarization>,
    pub mining_outputs: Vec<MiningOutput>,
    pub mining_destination_chain: Option<CurrencyId>,
    pub notary_liveness: Option<NotaryLiveness>,
    /// This chain's own definition, refreshed from the notary before block
    /// 1.
    pub own_currency_definition: Option<CurrencyDefinition>,
}
