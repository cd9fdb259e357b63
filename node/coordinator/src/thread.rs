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

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bridge_errors::RpcError;
use bridge_node_env::{CHILD_MODE_TICK, IMPORT_POLL_INTERVAL, MERGE_MINE_PRUNE_AGE, NOTARY_RPC_TIMEOUT};
use bridge_node_rpc::{file_earned_notarization, probe_notary, JsonRpcClient};
use bridge_types::RpcEndpoint;

use crate::coordinator::Coordinator;

/// Cooperative cancellation latch for the submission thread, mirroring the
/// teacher's `node/cdn` `Arc<AtomicBool>` "failed" flag: checked at every
/// loop boundary rather than forcibly killing the thread.
#[derive(Clone, Default)]
pub struct ShutdownSignal(Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The notary-side submission loop: prune stale candidates, then
/// either drain the qualified-header queue or wait for a combined header to
/// arrive.
pub fn run_notary_mode(
    coordinator: &Coordinator,
    rpc_client_for: impl Fn(&bridge_types::MergeMineCandidate) -> Result<JsonRpcClient, RpcError>,
    shutdown: &ShutdownSignal,
) {
    while !shutdown.is_requested() {
        coordinator.prune_old_chains(MERGE_MINE_PRUNE_AGE);

        if coordinator.registry_is_empty() && !coordinator.queue_is_empty() {
            // No registered child can possibly match what's queued anymore.
            coordinator.clear_queue();
            continue;
        }

        if coordinator.queue_is_empty() {
            coordinator.wait_for_work(Duration::from_millis(500));
            continue;
        }

        let outcomes = coordinator.submit_qualified_blocks(&rpc_client_for);
        for (name, result) in outcomes {
            match result {
                Ok(id) => tracing::info!(chain = %name, submitted = %id, "merge-mined block accepted"),
                Err(err) => tracing::warn!(chain = %name, error = %err, "merge-mined block rejected"),
            }
        }
    }
}

/// The child-side submission loop: probe the notary's
/// liveness every tick, and re-poll for new imports no more often than
/// [`IMPORT_POLL_INTERVAL`] or whenever the notary's height has advanced.
pub fn run_child_mode(
    coordinator: &Coordinator,
    this_chain_name: &str,
    this_chain_start_block: u64,
    notary_endpoint: &RpcEndpoint,
    shutdown: &ShutdownSignal,
    mut on_new_imports_available: impl FnMut(),
) {
    let client = loop {
        if shutdown.is_requested() {
            return;
        }
        match JsonRpcClient::new(notary_endpoint.clone(), NOTARY_RPC_TIMEOUT) {
            Ok(client) => break client,
            Err(err) => {
                tracing::warn!(error = %err, "failed to build the notary RPC client, retrying");
                std::thread::sleep(CHILD_MODE_TICK);
            }
        }
    };
    let mut last_poll = Instant::now() - IMPORT_POLL_INTERVAL;
    let mut last_seen_height = 0u64;

    while !shutdown.is_requested() {
        if let Some(earned) = coordinator.take_earned_notarization() {
            let block_hash_hex = hex::encode(earned.block_hash);
            match file_earned_notarization(&client, &block_hash_hex, earned.tx_index) {
                Ok(id) => tracing::info!(notarization = %id, "filed earned notarization with the notary"),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to file earned notarization, will retry next tick");
                    coordinator.set_earned_notarization(earned);
                }
            }
        }

        let this_chain_height = coordinator.notary_liveness().map(|l| l.height).unwrap_or(0);

        match probe_notary(&client, this_chain_name, this_chain_start_block, this_chain_height) {
            Ok((liveness, refreshed_definition)) => {
                let height_advanced = liveness.height > last_seen_height;
                last_seen_height = liveness.height;
                coordinator.set_notary_liveness(liveness);
                if let Some(definition) = refreshed_definition {
                    coordinator.refresh_own_currency_definition(definition);
                }

                let due_for_poll = last_poll.elapsed() >= IMPORT_POLL_INTERVAL;
                if due_for_poll || height_advanced {
                    on_new_imports_available();
                    last_poll = Instant::now();
                }
            }
            Err(err) => tracing::warn!(error = %err, "notary liveness probe failed"),
        }

        std::thread::sleep(CHILD_MODE_TICK);
    }
}
