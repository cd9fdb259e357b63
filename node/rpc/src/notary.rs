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

use bridge_errors::RpcError;
use bridge_types::CurrencyDefinition;

use crate::client::{get_currency_definition, get_info, JsonRpcClient};
use bridge_node_env::NOTARY_VERSION_FLOOR;

/// What a child chain knows about the notary's liveness (coordinator
/// state).
#[derive(Debug, Clone)]
pub struct NotaryLiveness {
    pub version: String,
    pub height: u64,
    /// Set once the notary's height reaches this chain's `start_block`,
    /// unblocking block-1 mining.
    pub ready_to_start: bool,
}

impl NotaryLiveness {
    /// String-compared against [`NOTARY_VERSION_FLOOR`] exactly as the
    /// source does — this is a lexicographic comparison, not a semver
    /// comparison, and is intentionally preserved as such.
    pub fn meets_version_floor(&self) -> bool {
        self.version.as_str() >= NOTARY_VERSION_FLOOR
    }
}

/// Polls the notary's `getinfo` and `getcurrencydefinition`, and — before
/// this chain's block 1 — refreshes the child's own definition from the
/// notary, setting `ready_to_start` once the notary's height reaches
/// `this_chain_start_block`.
pub fn probe_notary(
    client: &JsonRpcClient,
    this_chain_name: &str,
    this_chain_start_block: u64,
    this_chain_height: u64,
) -> Result<(NotaryLiveness, Option<CurrencyDefinition>), RpcError> {
    let info = get_info(client)?;

    let mut refreshed_definition = None;
    if this_chain_height == 0 {
        let raw = get_currency_definition(client, this_chain_name)?;
        refreshed_definition = serde_json::from_value(raw).ok();
    }

    let ready_to_start = info.blocks >= this_chain_start_block;

    Ok((NotaryLiveness { version: info.version, height: info.blocks, ready_to_start }, refreshed_definition))
}
