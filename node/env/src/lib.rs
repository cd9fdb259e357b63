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

//! Recognized configuration constants and per-peer-chain settings.

use std::time::Duration;

use bridge_types::RpcEndpoint;

/// Maximum reserve transfers bundled into one export.
pub const MAX_EXPORT_INPUTS: usize = 64;

/// Flush trigger: blocks elapsed since the destination's last export.
pub const MIN_BLOCKS: u64 = 10;

/// Flush trigger: pending transfers waiting for a destination.
pub const MIN_INPUTS: usize = 10;

/// Merge-mine registry prune cutoff, in seconds.
pub const MERGE_MINE_PRUNE_AGE: Duration = Duration::from_secs(300);

/// Child-mode import poll interval.
pub const IMPORT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Child-mode per-iteration sleep.
pub const CHILD_MODE_TICK: Duration = Duration::from_secs(3);

/// Notary RPC call timeout.
pub const NOTARY_RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimum notary version accepted, compared as a string.
pub const NOTARY_VERSION_FLOOR: &str = "0.6.4";

/// Which role this process plays: the notary root chain, or a PBaaS child
/// chain pointed at a notary.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum ChainRole {
    Notary,
    Child { notary: RpcEndpoint },
}

/// Process-wide configuration assembled from CLI flags.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BridgeConfig {
    pub this_chain_id_hex: String,
    pub role: ChainRole,
}
